//! Replay examples: reproducing a counterexample from its replay token.

use sift::*;

fn main() {
    println!("Sift Replay Examples\n");

    let prop = for_all_named(Gen::string().between(0, 30).build(), "s", |s| {
        !s.contains(char::is_whitespace)
    });

    let first = match prop.check(&Config::default()) {
        Ok(result) => result,
        Err(e) => {
            println!("could not run: {e}");
            return;
        }
    };
    println!("{first}\n");

    let Some(counterexample) = first.counterexample else {
        println!("no counterexample to replay");
        return;
    };

    println!("Token contents: {}", counterexample.replay);
    let config = Config::default().with_replay(counterexample.encoded_replay.clone());
    match prop.check(&config) {
        Ok(replayed) => println!("Replayed in {} test:\n{replayed}", replayed.iterations),
        Err(e) => println!("replay failed: {e}"),
    }
}
