//! Shrinking examples: inspecting example spaces and minimal counterexamples.

use sift::*;

fn main() {
    println!("Sift Shrinking Examples\n");

    integer_space();
    list_minimal();
    preconditions();
}

fn integer_space() {
    println!("=== Integer Example Space ===");

    let gen = Gen::<i32>::from_range(Range::new(0, 100));
    match gen.generate(GenParameters::create(3, Size::MAX)) {
        GenIteration::Instance { example_space, .. } => {
            println!("Shrinks of {} (two levels):", example_space.value());
            print!("{}", example_space.render(2, 4));
        }
        other => println!("no value: {other:?}"),
    }
    println!();
}

fn list_minimal() {
    println!("=== Minimal List ===");

    let gen = Gen::vec_of(Gen::int_range(-50, 50));
    match gen.minimal(|xs| xs.iter().sum::<i32>() > 60, &Config::default().with_seed(5)) {
        Ok(minimal) => println!(
            "smallest list summing past 60: {:?} ({} shrinks, found after {} tests)",
            minimal.value, minimal.shrinks, minimal.iterations
        ),
        Err(e) => println!("no minimal found: {e}"),
    }
    println!();
}

fn preconditions() {
    println!("=== Preconditions ===");

    let prop = for_all_named(
        Gen::<(i32, i32)>::tuple_of(Gen::int_range(-20, 20), Gen::int_range(-20, 20)),
        "(a, b)",
        |&(a, b)| -> PropertyResult {
            precondition(b != 0)?;
            if (a / b) * b + a % b == a {
                Ok(())
            } else {
                failure("division identity does not hold")
            }
        },
    );

    match prop.check(&Config::default()) {
        Ok(result) => println!("{result} ({} discarded)", result.discards),
        Err(e) => println!("could not run: {e}"),
    }
}
