//! Replay codec properties
//!
//! Replays must survive encoding unchanged and must reproduce the exact
//! counterexample a check reported.

use crate::{arbitrary_seed, arbitrary_size, expect_pass};
use sift::*;

/// Property: decode(encode(r)) == r
pub fn test_replay_round_trip() {
    let gen = Gen::<(u64, Size, Vec<usize>)>::tuple_of(
        Gen::<u64>::integer(),
        arbitrary_size(),
        Gen::vec_of(Gen::<usize>::from_range(Range::exponential(0, usize::MAX))),
    );
    let prop = for_all_named(gen, "(seed, size, path)", |(seed, size, path)| {
        let replay = Replay::new(*seed, *size, path.clone());
        match replay.encode() {
            Ok(encoded) => matches!(Replay::decode(&encoded), Ok(decoded) if decoded == replay),
            Err(_) => false,
        }
    });

    expect_pass(prop, "replay round trip", 200);

    let fixed = Replay::new(0, Size::ZERO, vec![0]);
    let encoded = fixed.encode().expect("encoding succeeds");
    assert_eq!(fixed.encode().expect("encoding succeeds"), encoded);
    assert_eq!(Replay::decode(&encoded).expect("decoding succeeds"), fixed);
}

/// Property: Replaying a reported counterexample reproduces it in one test
pub fn test_replay_reproduces_minimal() {
    let prop = for_all_named(arbitrary_seed(), "seed", |&seed| {
        let inner = for_all(
            Gen::<(i32, Vec<bool>)>::tuple_of(Gen::int_range(0, 500), Gen::vec_of(Gen::bool())),
            |(n, flags)| *n < 250 || flags.len() < 2,
        );
        let Ok(result) = inner.check(&Config::default().with_seed(seed)) else {
            return false;
        };
        let Some(original) = result.counterexample else {
            return true;
        };

        let replay_config = Config::default().with_replay(original.encoded_replay.clone());
        match inner.check(&replay_config) {
            Ok(replayed) => {
                replayed.iterations == 1
                    && replayed
                        .counterexample
                        .is_some_and(|c| c.value == original.value)
            }
            Err(_) => false,
        }
    });

    expect_pass(prop, "replay reproduces minimal", 30);
}
