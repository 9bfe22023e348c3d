//! Runner behaviour properties
//!
//! These check the run surface end to end: sampling, falsification counts,
//! discard accounting and the rendered failure report.

use crate::{arbitrary_seed, expect_pass};
use sift::*;

/// Property: Sampling a constant yields exactly that value, test_limit times
pub fn test_constant_samples() {
    let prop = for_all_named(arbitrary_seed(), "seed", |&seed| {
        let config = Config::default().with_seed(seed);
        matches!(Gen::constant('k').sample(&config), Ok(values) if values == vec!['k'; 100])
    });

    expect_pass(prop, "constant samples", 50);
}

/// The full signed range at seed 0 falsifies once a draw reaches the threshold
pub fn test_int32_threshold_scenario() {
    let prop = for_all(Gen::<i32>::integer(), |&x| x < 1000);
    let result = prop
        .check(&Config::default().with_seed(0))
        .expect("generation succeeds");

    assert!(result.falsified);
    // The first draw at seed 0 is negative and satisfies the property.
    assert_eq!(result.iterations, 2);
    assert_eq!(result.counterexample.expect("a counterexample").value, 1000);
}

/// A domain that never satisfies the property falsifies on the first test
pub fn test_falsified_on_first_iteration() {
    let prop = for_all(Gen::<i32>::from_range(Range::new(1000, i32::MAX)), |&x| x < 1000);
    let result = prop
        .check(&Config::default().with_seed(0))
        .expect("generation succeeds");

    assert!(result.falsified);
    assert_eq!(result.iterations, 1);
    let counterexample = result.counterexample.expect("a counterexample");
    assert_eq!(counterexample.value, 1000);
    println!("✓ Falsified after {} test", result.iterations);
}

/// Discards are retried and counted, never reported as failures
pub fn test_discards_are_counted() {
    let prop = for_all(Gen::int_range(0, 99), |&x| -> PropertyResult {
        precondition(x % 4 == 0)?;
        if x % 2 == 0 {
            Ok(())
        } else {
            failure("precondition let an odd value through")
        }
    });
    let result = prop
        .check(&Config::default().with_seed(3).with_tests(50))
        .expect("generation succeeds");

    assert!(!result.falsified);
    assert_eq!(result.iterations, 50);
    assert!(result.discards > 50);
    println!("{result}");
}

/// Generator errors carry the name the generator was given
pub fn test_named_generator_errors() {
    let gen: Gen<i32> = Gen::create(|_| panic!("no value")).named("my_gen");
    match gen.sample(&Config::default().with_seed(0)) {
        Err(SiftError::GenError { generator, message }) => {
            assert_eq!(generator, "my_gen");
            assert_eq!(message, "no value");
        }
        other => panic!("Expected a generator error, got: {other:?}"),
    }

    let strings = Gen::string().between(5, 1).build().named("names");
    match for_all(strings, |_| true).check(&Config::default().with_seed(0)) {
        Err(SiftError::GenError { generator, .. }) => assert_eq!(generator, "names"),
        other => panic!("Expected a generator error, got: {other:?}"),
    }
}

/// The failure report carries the progression, the minimal value and the replay
pub fn test_failure_report_rendering() {
    let prop = for_all_named(Gen::int_range(0, 1000), "n", |&n| n < 500);
    let result = prop
        .check_with_context(&Config::default().with_seed(9), Some("prop_below_500"))
        .expect("generation succeeds");
    let report = result.to_string();
    let counterexample = result.counterexample.expect("a counterexample");

    assert_eq!(counterexample.value, 500);
    assert!(report.starts_with("  ✗ prop_below_500 failed after"));
    assert!(report.contains("Shrinking progression:"));
    assert!(report.contains(&format!(
        "│ forAll {} = 500 -- n",
        counterexample.shrinks
    )));
    assert!(report.contains("=== Boolean Condition ==="));
    assert!(report.contains("Minimal counterexample: 500"));
    assert!(report.ends_with(&format!("Replay: {}", counterexample.encoded_replay)));
}
