//! Shrinking correctness properties
//!
//! These properties ensure that shrinking behaves correctly - that shrinks
//! stay inside the generator's domain and that the greedy search converges
//! to minimal counterexamples.

use crate::{arbitrary_parameters, expect_pass, instance};
use sift::*;

/// Property: Every shrink of a ranged integer stays in the range
pub fn test_shrinks_stay_in_range() {
    let prop = for_all_named(arbitrary_parameters(), "parameters", |&parameters| {
        let gen = Gen::<i32>::from_range(Range::new(-77, 1234).with_origin(100));
        instance(&gen, parameters)
            .traverse()
            .take(300)
            .all(|node| (-77..=1234).contains(node.value()))
    });

    expect_pass(prop, "shrinks in range", 100);
}

/// Property: An always-true predicate minimises to the origin
pub fn test_integer_minimal_is_origin() {
    let prop = for_all_named(
        Gen::<(i32, u64)>::tuple_of(
            Gen::int_range(-1000, 1000),
            Gen::<u64>::from_range(Range::new(0, 1000)),
        ),
        "(origin, seed)",
        |&(origin, seed)| {
            let gen = Gen::<i32>::from_range(Range::new(-1000, 1000).with_origin(origin));
            let config = Config::default().with_seed(seed);
            matches!(gen.minimal(|_| true, &config), Ok(Minimal { value, .. }) if value == origin)
        },
    );

    expect_pass(prop, "integer origin", 50);
}

/// Property: Shrinking a threshold failure lands exactly on the threshold
pub fn test_shrinking_finds_boundary() {
    let prop = for_all_named(
        Gen::<(i32, u64)>::tuple_of(Gen::int_range(1, 1_000_000), Gen::<u64>::from_range(Range::new(0, 1000))),
        "(threshold, seed)",
        |&(threshold, seed)| {
            let inner = for_all(Gen::<i32>::integer(), move |&x| x < threshold);
            match inner.check(&Config::default().with_seed(seed)) {
                Ok(result) => match result.counterexample {
                    Some(counterexample) => counterexample.value == threshold,
                    // Every draw was below the threshold.
                    None => true,
                },
                Err(_) => false,
            }
        },
    );

    expect_pass(prop, "threshold boundary", 30);
}

/// Property: A list length failure shrinks to the shortest list of origins
pub fn test_list_minimal_length() {
    let prop = for_all_named(
        Gen::<u64>::from_range(Range::new(0, 1000)),
        "seed",
        |&seed| {
            let gen = Gen::vec_of(Gen::int_range(-100, 100));
            let config = Config::default().with_seed(seed);
            match gen.minimal(|xs| xs.len() >= 4, &config) {
                Ok(minimal) => minimal.value == vec![0, 0, 0, 0],
                Err(SiftError::NoMinimalFound { .. }) => true,
                Err(_) => false,
            }
        },
    );

    expect_pass(prop, "list minimal", 30);
}
