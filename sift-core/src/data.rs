//! Core data types threaded through generation.

use crate::error::RangeError;
use crate::rng::Rng;
use std::fmt;

/// Size parameter for controlling test data generation.
///
/// Size ranges from 0 to 100, where larger values generate larger and more
/// complex test data. Values outside that range cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Size(usize);

impl Size {
    pub const ZERO: Size = Size(0);
    pub const MAX: Size = Size(100);

    /// Create a new size value, failing outside `0..=100`.
    pub fn new(value: usize) -> Result<Self, RangeError> {
        if value > Self::MAX.0 {
            return Err(RangeError::Size(value));
        }
        Ok(Size(value))
    }

    /// Get the inner size value.
    pub fn get(&self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for Size {
    type Error = RangeError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Size::new(value)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Size({})", self.0)
    }
}

/// The complete input state of one generator invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenParameters {
    pub rng: Rng,
    pub size: Size,
}

impl GenParameters {
    pub fn new(rng: Rng, size: Size) -> Self {
        GenParameters { rng, size }
    }

    /// Parameters for a root random source.
    pub fn create(seed: u64, size: Size) -> Self {
        GenParameters::new(Rng::create(seed), size)
    }

    pub fn with_rng(self, rng: Rng) -> Self {
        GenParameters { rng, ..self }
    }

    pub fn with_size(self, size: Size) -> Self {
        GenParameters { size, ..self }
    }

    /// Advance the random source by one step.
    pub fn next(self) -> Self {
        self.with_rng(self.rng.next())
    }

    /// Move to an independent random lineage.
    pub fn fork(self) -> Self {
        self.with_rng(self.rng.fork())
    }

    /// Restart from a root source seeded with the current state.
    ///
    /// A rerooted invocation can be reproduced from `(seed, size)` alone.
    pub fn rerooted(self) -> Self {
        GenParameters::create(self.rng.seed(), self.size)
    }
}

/// Configuration for property testing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of iterations to run.
    pub test_limit: usize,

    /// Maximum number of shrinks to attempt in one search.
    pub shrink_limit: usize,

    /// Maximum number of consecutive discards before giving up.
    pub discard_limit: usize,

    /// Size used for every iteration.
    pub size: Size,

    /// Root seed. A fresh seed is spawned when absent.
    pub seed: Option<u64>,

    /// Encoded replay of a single case to re-check.
    pub replay: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            test_limit: 100,
            shrink_limit: 1000,
            discard_limit: 100,
            size: Size::MAX,
            seed: None,
            replay: None,
        }
    }
}

impl Config {
    /// Create a new config with the given number of tests.
    pub fn with_tests(mut self, tests: usize) -> Self {
        self.test_limit = tests;
        self
    }

    /// Create a new config with the given shrink limit.
    pub fn with_shrinks(mut self, shrinks: usize) -> Self {
        self.shrink_limit = shrinks;
        self
    }

    /// Create a new config with the given discard limit.
    pub fn with_discard_limit(mut self, discards: usize) -> Self {
        self.discard_limit = discards;
        self
    }

    /// Create a new config with the given size.
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Create a new config with a fixed root seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Create a new config that re-checks a single encoded case.
    pub fn with_replay(mut self, replay: impl Into<String>) -> Self {
        self.replay = Some(replay.into());
        self
    }

    /// Parameters for the first iteration of a run.
    pub fn initial_parameters(&self) -> GenParameters {
        let rng = match self.seed {
            Some(seed) => Rng::create(seed),
            None => Rng::spawn(),
        };
        GenParameters::new(rng, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_accepts_valid_range() {
        for value in 0..=100 {
            assert_eq!(Size::new(value).unwrap().get(), value);
        }
    }

    #[test]
    fn test_size_rejects_out_of_range() {
        assert!(matches!(Size::new(101), Err(RangeError::Size(101))));
        assert!(Size::try_from(usize::MAX).is_err());
    }

    #[test]
    fn test_parameters_reroot() {
        let params = GenParameters::create(11, Size::MAX).next().fork().next();
        let rerooted = params.rerooted();
        assert_eq!(rerooted.rng.seed(), params.rng.seed());
        assert_eq!(rerooted.rng.order(), 0);
        assert_eq!(rerooted.size, params.size);
    }

    #[test]
    fn test_config_builders() {
        let config = Config::default()
            .with_tests(20)
            .with_shrinks(5)
            .with_discard_limit(3)
            .with_seed(9)
            .with_size(Size::ZERO);
        assert_eq!(config.test_limit, 20);
        assert_eq!(config.shrink_limit, 5);
        assert_eq!(config.discard_limit, 3);
        assert_eq!(config.initial_parameters(), GenParameters::create(9, Size::ZERO));
    }
}
