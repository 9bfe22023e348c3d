//! Error types and run reports for Sift property-based testing.

use crate::replay::Replay;
use std::fmt;
use thiserror::Error;

/// Main error type for Sift.
#[derive(Error, Debug)]
pub enum SiftError {
    /// A generator failed irrecoverably while producing a value.
    #[error("Generator '{generator}' failed: {message}")]
    GenError { generator: String, message: String },

    /// A generator kept discarding until the discard limit was exceeded.
    #[error("Generator '{generator}' exhausted after {discards} consecutive discards")]
    GenExhausted { generator: String, discards: usize },

    /// Property test failed with a counterexample.
    #[error(
        "Property failed after {iterations} tests and {shrinks} shrinks: {counterexample} (replay: {replay})"
    )]
    PropertyFailed {
        counterexample: String,
        iterations: usize,
        shrinks: usize,
        replay: String,
    },

    /// No generated value satisfied the predicate given to `minimal`.
    #[error("No value satisfying the predicate was found in {iterations} tests")]
    NoMinimalFound { iterations: usize },

    /// Invalid generator construction.
    #[error("Invalid generator: {message}")]
    InvalidGenerator { message: String },

    /// A replay token could not be decoded or reproduced.
    #[error("Invalid replay '{replay}': {reason}")]
    InvalidReplay { replay: String, reason: String },

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error("Replay encoding failed: {0}")]
    Encoding(#[from] std::io::Error),
}

/// A generator failure met while rebuilding a shrink candidate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Generator '{generator}' failed while shrinking: {message}")]
pub struct GenFault {
    pub generator: String,
    pub message: String,
}

impl From<GenFault> for SiftError {
    fn from(fault: GenFault) -> Self {
        SiftError::GenError {
            generator: fault.generator,
            message: fault.message,
        }
    }
}

/// A value fell outside its permitted range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("size {0} is outside the range 0..=100")]
    Size(usize),

    #[error("minimum {min} is greater than maximum {max}")]
    Inverted { min: i128, max: i128 },

    #[error("index {index} is outside the range 0..{total}")]
    Index { index: u64, total: u64 },
}

/// Result type for Sift operations.
pub type Result<T> = std::result::Result<T, SiftError>;

/// A shrinking step in the failure progression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShrinkStep {
    /// The counterexample value at this step.
    pub counterexample: String,
    /// The step number (0 = original, 1+ = shrinks).
    pub step: usize,
    /// Optional variable name for this input (e.g., "xs", "n", "input").
    pub variable_name: Option<String>,
}

/// A minimal failing input found by a check.
#[derive(Debug, Clone, PartialEq)]
pub struct Counterexample<T> {
    /// The shrunk failing input.
    pub value: T,
    /// Why the property failed for this input.
    pub reason: String,
    /// Number of successful shrink descents.
    pub shrinks: usize,
    /// Reproduces exactly this input.
    pub replay: Replay,
    /// `replay`, encoded for persistence.
    pub encoded_replay: String,
    /// The shrinking progression from the original failure.
    pub shrink_steps: Vec<ShrinkStep>,
}

/// Outcome of checking a property.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult<T> {
    pub falsified: bool,
    /// Iterations that produced a value, including the falsifying one.
    pub iterations: usize,
    /// Total number of discarded draws over the run.
    pub discards: usize,
    pub counterexample: Option<Counterexample<T>>,
    pub property_name: Option<String>,
}

impl<T: fmt::Debug> fmt::Display for CheckResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prop_name = self.property_name.as_deref().unwrap_or("property");

        let Some(counterexample) = &self.counterexample else {
            return write!(f, "  ✓ {} passed {} tests.", prop_name, self.iterations);
        };

        writeln!(
            f,
            "  ✗ {} failed after {} tests and {} shrinks.",
            prop_name, self.iterations, counterexample.shrinks
        )?;

        if !counterexample.shrink_steps.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Shrinking progression:")?;
            for step in &counterexample.shrink_steps {
                match (&step.variable_name, step.step) {
                    (Some(var_name), n) => writeln!(
                        f,
                        "      │ forAll {} = {} -- {}",
                        n, step.counterexample, var_name
                    )?,
                    (None, 0) => writeln!(f, "      │ Original: {}", step.counterexample)?,
                    (None, n) => writeln!(f, "      │ Step {}: {}", n, step.counterexample)?,
                }
            }
            writeln!(f)?;
        }

        writeln!(f, "    === {} ===", counterexample.reason)?;
        writeln!(f, "    Minimal counterexample: {:?}", counterexample.value)?;
        write!(f, "    Replay: {}", counterexample.encoded_replay)
    }
}

impl<T: fmt::Debug> CheckResult<T> {
    /// Convert a falsified result into an error, for assert-style callers.
    pub fn into_result(self) -> Result<()> {
        match self.counterexample {
            Some(counterexample) => Err(SiftError::PropertyFailed {
                counterexample: format!("{:?}", counterexample.value),
                iterations: self.iterations,
                shrinks: counterexample.shrinks,
                replay: counterexample.encoded_replay,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Size;

    fn failing_result(variable_name: Option<&str>) -> CheckResult<i32> {
        let steps = [20, 10, 7]
            .iter()
            .enumerate()
            .map(|(step, value)| ShrinkStep {
                counterexample: value.to_string(),
                step,
                variable_name: variable_name.map(str::to_string),
            })
            .collect();

        CheckResult {
            falsified: true,
            iterations: 1,
            discards: 0,
            counterexample: Some(Counterexample {
                value: 7,
                reason: "Boolean Condition".to_string(),
                shrinks: 2,
                replay: Replay::new(0, Size::ZERO, vec![0]),
                encoded_replay: "TOKEN".to_string(),
                shrink_steps: steps,
            }),
            property_name: Some("prop_small".to_string()),
        }
    }

    #[test]
    fn test_failure_reporting() {
        let expected = "  ✗ prop_small failed after 1 tests and 2 shrinks.\n\
                        \n    Shrinking progression:\n\
                        \x20     │ Original: 20\n\
                        \x20     │ Step 1: 10\n\
                        \x20     │ Step 2: 7\n\
                        \n    === Boolean Condition ===\n\
                        \x20   Minimal counterexample: 7\n\
                        \x20   Replay: TOKEN";
        assert_eq!(failing_result(None).to_string(), expected);
    }

    #[test]
    fn test_variable_name_reporting() {
        let output = failing_result(Some("n")).to_string();
        assert!(output.contains("│ forAll 0 = 20 -- n"));
        assert!(output.contains("│ forAll 2 = 7 -- n"));
    }

    #[test]
    fn test_success_reporting() {
        let result: CheckResult<i32> = CheckResult {
            falsified: false,
            iterations: 100,
            discards: 3,
            counterexample: None,
            property_name: None,
        };
        assert_eq!(result.to_string(), "  ✓ property passed 100 tests.");
        assert!(result.into_result().is_ok());
    }

    #[test]
    fn test_into_result_embeds_counterexample() {
        match failing_result(None).into_result() {
            Err(SiftError::PropertyFailed {
                counterexample,
                iterations,
                shrinks,
                replay,
            }) => {
                assert_eq!(counterexample, "7");
                assert_eq!(iterations, 1);
                assert_eq!(shrinks, 2);
                assert_eq!(replay, "TOKEN");
            }
            other => panic!("Expected PropertyFailed, got: {other:?}"),
        }
    }
}
