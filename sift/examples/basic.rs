//! Basic examples: sampling generators and checking simple properties.

use sift::*;

fn main() {
    println!("Sift Basic Examples\n");

    sampling();
    passing_property();
    failing_property();
}

fn sampling() {
    println!("=== Sampling ===");

    let config = Config::default().with_tests(5).with_seed(42);

    let numbers = Gen::int_range(-100, 100).sample(&config);
    println!("int_range(-100, 100): {numbers:?}");

    let words = Gen::<String>::ascii_alpha().sample(&config);
    println!("ascii_alpha: {words:?}");

    let pairs = Gen::<(bool, char)>::tuple_of(Gen::bool(), Gen::<char>::ascii_alphanumeric())
        .sample(&config);
    println!("tuple_of(bool, char): {pairs:?}");

    let maybe = Gen::option(Gen::int_range(1, 6)).sample(&config);
    println!("option(int_range(1, 6)): {maybe:?}\n");
}

fn passing_property() {
    println!("=== Passing Property ===");

    let prop = for_all_named(Gen::vec_of(Gen::int_range(0, 1000)), "xs", |xs| {
        let mut sorted = xs.clone();
        sorted.sort();
        sorted.windows(2).all(|w| w[0] <= w[1])
    });

    match prop.check_with_context(&Config::default(), Some("sort_orders_elements")) {
        Ok(result) => println!("{result}\n"),
        Err(e) => println!("could not run: {e}\n"),
    }
}

fn failing_property() {
    println!("=== Failing Property ===");

    let prop = for_all_named(Gen::<i32>::integer(), "x", |&x| x < 1000);

    match prop.check_with_context(&Config::default(), Some("below_one_thousand")) {
        Ok(result) => println!("{result}\n"),
        Err(e) => println!("could not run: {e}\n"),
    }
}
