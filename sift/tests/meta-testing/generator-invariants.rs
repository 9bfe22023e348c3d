//! Generator invariant properties
//!
//! These properties ensure that generators respect their declared ranges at
//! every size, and that generation is a pure function of its parameters.

use crate::{arbitrary_parameters, arbitrary_size, expect_pass, instance};
use sift::*;

/// Property: Integer generators stay within their bounds at every size and seed
pub fn test_integer_bounds_at_every_size() {
    let prop = for_all_named(arbitrary_parameters(), "parameters", |&parameters| {
        let ranges = [
            Range::new(-1000, 1000),
            Range::linear(-1000, 1000),
            Range::exponential(-1000, 1000),
            Range::linear(5, 10),
        ];
        ranges.iter().all(|&range| {
            let value = *instance(&Gen::<i64>::from_range(range), parameters).value();
            (range.min..=range.max).contains(&value)
        })
    });

    expect_pass(prop, "integer bounds", 200);
}

/// Property: At size zero every scaled range collapses to its origin
pub fn test_size_zero_generates_origin() {
    let prop = for_all_named(
        Gen::<(i32, i32)>::tuple_of(Gen::int_range(-500, 0), Gen::int_range(1, 500)),
        "(min, max)",
        |&(min, max)| {
            let gen = Gen::<i32>::from_range(Range::linear(min, max));
            let value = *instance(&gen, GenParameters::create(1, Size::ZERO)).value();
            value == 0
        },
    );

    expect_pass(prop, "size zero origin", 100);
}

/// Property: The same parameters always generate the same value and shrinks
pub fn test_generation_is_deterministic() {
    let prop = for_all_named(arbitrary_parameters(), "parameters", |&parameters| {
        let gen = Gen::vec_of(Gen::<char>::ascii_alphanumeric());
        let first = instance(&gen, parameters);
        let second = instance(&gen, parameters);

        first.value() == second.value()
            && first.shrink_values(20) == second.shrink_values(20)
    });

    expect_pass(prop, "determinism", 100);
}

/// Property: Lists respect their length range, shrinks included
pub fn test_list_lengths_within_bounds() {
    let prop = for_all_named(
        Gen::<(Size, u64)>::tuple_of(arbitrary_size(), Gen::<u64>::from_range(Range::new(0, 1000))),
        "(size, seed)",
        |&(size, seed)| {
            let gen = Gen::list(Gen::bool()).between(3, 12).build();
            let space = instance(&gen, GenParameters::create(seed, size));
            space
                .traverse()
                .take(200)
                .all(|node| (3..=12).contains(&node.value().len()))
        },
    );

    expect_pass(prop, "list lengths", 100);
}

/// Property: Character generators stay in their classes while shrinking
pub fn test_char_classes_hold_under_shrinking() {
    let prop = for_all_named(arbitrary_parameters(), "parameters", |&parameters| {
        let gen = Gen::string()
            .with_chars(CharType::NUMERIC | CharType::UPPERCASE)
            .between(0, 8)
            .build();
        let space = instance(&gen, parameters);
        space.traverse().take(100).all(|node| {
            node.value()
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        })
    });

    expect_pass(prop, "char classes", 100);
}
