//! Replay tokens that reproduce a single generated or shrunk value.

use crate::data::{GenParameters, Size};
use crate::error::{Result, SiftError};
use crate::gen::{Gen, GenIteration};
use crate::space::ExampleSpace;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

/// The seed and size of one iteration plus the path to a node of its space.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Replay {
    pub seed: u64,
    pub size: Size,
    pub path: Vec<usize>,
}

impl Replay {
    pub fn new(seed: u64, size: Size, path: Vec<usize>) -> Self {
        Replay { seed, size, path }
    }

    /// Replay a node generated from rerooted `parameters`.
    pub fn from_parameters(parameters: GenParameters, path: Vec<usize>) -> Self {
        Replay::new(parameters.rng.seed(), parameters.size, path)
    }

    /// The parameters the replayed iteration was generated from.
    pub fn parameters(&self) -> GenParameters {
        GenParameters::create(self.seed, self.size)
    }

    /// Compress and base64-encode the replay.
    pub fn encode(&self) -> Result<String> {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(self.to_string().as_bytes())?;
        let compressed = encoder.finish()?;
        Ok(STANDARD.encode(compressed))
    }

    /// Inverse of [`Replay::encode`].
    pub fn decode(encoded: &str) -> Result<Self> {
        let invalid = |reason: String| SiftError::InvalidReplay {
            replay: encoded.to_string(),
            reason,
        };

        let compressed = STANDARD
            .decode(encoded.trim())
            .map_err(|e| invalid(e.to_string()))?;
        let mut text = String::new();
        DeflateDecoder::new(compressed.as_slice())
            .read_to_string(&mut text)
            .map_err(|e| invalid(e.to_string()))?;
        text.parse().map_err(invalid)
    }

    /// Regenerate the replayed iteration and walk to the replayed node.
    pub fn reproduce<T: Clone + 'static>(&self, gen: &Gen<T>) -> Result<ExampleSpace<T>> {
        let invalid = |reason: &str| SiftError::InvalidReplay {
            replay: self.to_string(),
            reason: reason.to_string(),
        };

        match gen.generate(self.parameters()) {
            GenIteration::Instance { example_space, .. } => example_space
                .navigate(&self.path)?
                .ok_or_else(|| invalid("the path does not exist in the example space")),
            GenIteration::Discard { .. } => Err(invalid("the replayed iteration was discarded")),
            GenIteration::Error { generator, message } => {
                Err(SiftError::GenError { generator, message })
            }
        }
    }
}

/// The uncompressed token: `seed.size.path`, path indices joined by `:`.
impl fmt::Display for Replay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path: Vec<String> = self.path.iter().map(usize::to_string).collect();
        write!(f, "{}.{}.{}", self.seed, self.size.get(), path.join(":"))
    }
}

impl FromStr for Replay {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        let [seed, size, path] = parts.as_slice() else {
            return Err(format!("expected three '.'-separated fields, found {}", parts.len()));
        };

        let seed = seed
            .parse::<u64>()
            .map_err(|e| format!("invalid seed '{seed}': {e}"))?;
        let size = size
            .parse::<usize>()
            .map_err(|e| format!("invalid size '{size}': {e}"))
            .and_then(|size| Size::new(size).map_err(|e| e.to_string()))?;
        let path = if path.is_empty() {
            Vec::new()
        } else {
            path.split(':')
                .map(|index| {
                    index
                        .parse::<usize>()
                        .map_err(|e| format!("invalid path index '{index}': {e}"))
                })
                .collect::<std::result::Result<Vec<_>, _>>()?
        };

        Ok(Replay { seed, size, path })
    }
}
