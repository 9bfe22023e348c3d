//! Combinator law properties
//!
//! These properties check the algebra of generator combinators: map
//! composition, bind with constants, filter soundness, discard propagation
//! and weighted choice.

use crate::{arbitrary_parameters, expect_pass, instance};
use sift::*;

/// Property: gen.map(f).map(g) == gen.map(|x| g(f(x))), shrinks included
pub fn test_map_composition() {
    let prop = for_all_named(arbitrary_parameters(), "parameters", |&parameters| {
        let f = |x: &i32| x.wrapping_mul(3);
        let g = |x: &i32| x.wrapping_sub(7);

        let base = Gen::int_range(-10_000, 10_000);
        let chained = instance(&base.clone().map(f).map(g), parameters);
        let composed = instance(&base.map(move |x| g(&f(x))), parameters);

        chained.value() == composed.value()
            && chained.shrink_values(30) == composed.shrink_values(30)
    });

    expect_pass(prop, "map composition", 100);
}

/// Property: constant(x).bind(f) generates exactly what f(x) generates
pub fn test_constant_bind_matches_continuation() {
    let prop = for_all_named(
        Gen::<(i32, GenParameters)>::tuple_of(Gen::int_range(0, 50), arbitrary_parameters()),
        "(n, parameters)",
        |&(n, parameters)| {
            let continuation = |&n: &i32| Gen::list(Gen::int_range(0, n)).of_length(3).build();
            let bound = instance(&Gen::constant(n).bind(continuation), parameters);
            let direct = instance(&continuation(&n), parameters);
            bound.value() == direct.value()
        },
    );

    expect_pass(prop, "constant bind", 100);
}

/// Property: Filtered generators never produce rejected values, even when shrinking
pub fn test_filter_never_yields_rejected_values() {
    let prop = for_all_named(arbitrary_parameters(), "parameters", |&parameters| {
        let gen = Gen::vec_of(Gen::int_range(0, 100)).filter(|xs| xs.iter().sum::<i32>() % 3 == 0);
        match gen.generate(parameters) {
            GenIteration::Instance { example_space, .. } => example_space
                .traverse()
                .take(200)
                .all(|node| node.value().iter().sum::<i32>() % 3 == 0),
            GenIteration::Discard { .. } => true,
            GenIteration::Error { .. } => false,
        }
    });

    expect_pass(prop, "filter soundness", 100);
}

/// Exhaustion propagates through bind no matter which side cannot be satisfied
pub fn test_exhaustion_propagates_through_bind() {
    let config = Config::default().with_seed(1);
    let unsatisfiable = || Gen::int_range(0, 10).filter(|_| false);

    let left = unsatisfiable().bind(|_| Gen::int_range(0, 10));
    assert!(matches!(left.sample(&config), Err(SiftError::GenExhausted { .. })));

    let right = Gen::int_range(0, 10).bind(move |_| unsatisfiable());
    assert!(matches!(right.sample(&config), Err(SiftError::GenExhausted { .. })));

    let constant = Gen::constant(5).filter(|_| false);
    assert!(matches!(constant.sample(&config), Err(SiftError::GenExhausted { .. })));
    println!("✓ Exhaustion propagates through bind");
}

/// Minimising over an unsatisfiable generator exhausts instead of looping
pub fn test_minimal_exhaustion() {
    let config = Config::default().with_seed(1);
    let unsatisfiable = Gen::int_range(0, 10).filter(|_| false);
    assert!(matches!(
        unsatisfiable.minimal(|_| true, &config),
        Err(SiftError::GenExhausted { .. })
    ));

    let bound = Gen::int_range(0, 10).bind(|_| Gen::int_range(0, 10).filter(|_| false));
    assert!(matches!(
        bound.minimal(|_| true, &config),
        Err(SiftError::GenExhausted { .. })
    ));
    println!("✓ Minimal exhausts on unsatisfiable generators");
}

/// A dependent generator that fails while shrinking is reported, not skipped
pub fn test_bind_failures_surface_during_shrinking() {
    let gen = Gen::int_range(0, 100).bind(|&n| {
        if n < 50 {
            Gen::fail("half", format!("{n} is below 50"))
        } else {
            Gen::constant(n)
        }
    });
    let prop = for_all(gen, |_| false);

    for seed in 0..20 {
        match prop.check(&Config::default().with_seed(seed)) {
            Err(SiftError::GenError { generator, .. }) => assert_eq!(generator, "half"),
            other => panic!("Expected a generator error, got: {other:?}"),
        }
    }
    println!("✓ Generator failures surface during shrinking");
}

/// Property: Weighted choice only ever picks choices with positive weight
pub fn test_frequency_only_picks_weighted_choices() {
    let gen = Gen::frequency(vec![
        WeightedChoice::new(3, Gen::int_range(0, 9)),
        WeightedChoice::new(0, Gen::constant(-1)),
        WeightedChoice::new(1, Gen::int_range(100, 109)),
    ])
    .expect("weights are valid");

    let prop = for_all_named(gen, "choice", |&x| {
        (0..=9).contains(&x) || (100..=109).contains(&x)
    });

    expect_pass(prop, "frequency choices", 300);
}
