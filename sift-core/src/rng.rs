//! Splittable, purely functional random source.

use crate::error::RangeError;
use crate::scaling::Integral;
use std::fmt;

/// A pure pseudo-random number stream.
///
/// An `Rng` is a small immutable value: every operation returns a new `Rng`
/// rather than mutating the receiver, so the same input always produces the
/// same output. `family` identifies a lineage, `seed` is the current state
/// and `order` counts the steps taken since the lineage was created or forked.
///
/// Every lineage starts with `seed == family`, so the state of any rooted
/// `Rng` is fully determined by `(family, order)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rng {
    family: u64,
    seed: u64,
    order: u64,
}

impl Rng {
    /// Create a root random source from a seed.
    pub fn create(seed: u64) -> Self {
        Rng {
            family: seed,
            seed,
            order: 0,
        }
    }

    /// Create a root random source from a non-deterministic seed.
    ///
    /// Only meant for process-level entry points; generators never call this.
    pub fn spawn() -> Self {
        use rand::Rng as _;
        Rng::create(rand::thread_rng().gen())
    }

    /// The lineage this source belongs to.
    pub fn family(&self) -> u64 {
        self.family
    }

    /// The current state of the stream.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of steps since the lineage was created or forked.
    pub fn order(&self) -> u64 {
        self.order
    }

    /// Advance the stream by one step within the same lineage.
    pub fn next(self) -> Self {
        Rng {
            family: self.family,
            seed: splitmix64_mix(self.seed),
            order: self.order.wrapping_add(1),
        }
    }

    /// Derive an independent lineage.
    ///
    /// The new family is a non-linear mix of the current family and order, so
    /// forking two different positions of a lineage yields unrelated streams.
    pub fn fork(self) -> Self {
        let family = mix_family(self.family, self.order);
        Rng {
            family,
            seed: family,
            order: 0,
        }
    }

    /// Draw a value from the closed interval `[min, max]`.
    ///
    /// The result depends only on `seed` and the interval, never on the
    /// family or order.
    pub fn value<N: Integral>(&self, min: N, max: N) -> Result<N, RangeError> {
        let (lo, hi) = (min.to_wide(), max.to_wide());
        if lo > hi {
            return Err(RangeError::Inverted { min: lo, max: hi });
        }

        // Both bounds fit in 64 bits, so the width always fits in a u128.
        let width = (hi - lo) as u128;
        let high = splitmix64_mix(self.seed ^ VALUE_SALT);
        let low = splitmix64_mix(high);
        let bits = ((high as u128) << 64) | low as u128;
        let offset = if width == u128::MAX {
            bits
        } else {
            bits % (width + 1)
        };

        let drawn = lo + offset as i128;
        N::from_wide(drawn).ok_or(RangeError::Inverted { min: lo, max: hi })
    }
}

impl fmt::Display for Rng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rng({}, {}, {})", self.family, self.seed, self.order)
    }
}

const VALUE_SALT: u64 = 0x5851_f42d_4c95_7f2d;

/// SplitMix64 mixing function for high-quality output.
fn splitmix64_mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Mix a family and an order into a fresh family.
fn mix_family(family: u64, order: u64) -> u64 {
    let z = splitmix64_mix(family.rotate_left(29) ^ order.wrapping_mul(0xd1b54a32d192ed03));
    // An unchanged family would make the fork correlated with its parent.
    if z == family {
        splitmix64_mix(z)
    } else {
        z
    }
}
