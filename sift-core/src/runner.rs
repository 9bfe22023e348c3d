//! Driving generators over many iterations.

use crate::data::{Config, GenParameters};
use crate::error::{Result, SiftError};
use crate::gen::{Gen, GenIteration};
use crate::replay::Replay;
use crate::shrink::minimize;
use crate::space::ExampleSpace;
use std::ops::ControlFlow;

/// Totals of a finished run.
pub(crate) struct Run<B> {
    pub iterations: usize,
    pub discards: usize,
    pub stopped: Option<B>,
}

/// Generate up to `config.test_limit` instances, handing each to `visit`
/// together with the parameters it was generated from.
///
/// Each iteration starts from rerooted parameters, so an instance is
/// reproducible from its seed and size alone. Discards are retried with the
/// parameters they return; more than `config.discard_limit` of them in a
/// row exhausts the generator.
pub(crate) fn drive<T, B, F>(gen: &Gen<T>, config: &Config, mut visit: F) -> Result<Run<B>>
where
    T: Clone + 'static,
    F: FnMut(GenParameters, ExampleSpace<T>) -> Result<ControlFlow<B>>,
{
    let mut parameters = config.initial_parameters();
    let mut run = Run {
        iterations: 0,
        discards: 0,
        stopped: None,
    };
    let mut consecutive_discards = 0;

    while run.iterations < config.test_limit {
        let rooted = parameters.rerooted();
        match gen.generate(rooted) {
            GenIteration::Instance {
                next_parameters,
                example_space,
            } => {
                consecutive_discards = 0;
                run.iterations += 1;
                parameters = next_parameters;
                if let ControlFlow::Break(stopped) = visit(rooted, example_space)? {
                    run.stopped = Some(stopped);
                    break;
                }
            }
            GenIteration::Discard { next_parameters } => {
                run.discards += 1;
                consecutive_discards += 1;
                if consecutive_discards > config.discard_limit {
                    return Err(SiftError::GenExhausted {
                        generator: gen.name().to_string(),
                        discards: consecutive_discards,
                    });
                }
                parameters = next_parameters;
            }
            GenIteration::Error { generator, message } => {
                return Err(SiftError::GenError { generator, message });
            }
        }
    }

    Ok(run)
}

/// The smallest value found satisfying a predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Minimal<T> {
    pub value: T,
    /// Iterations until the first satisfying value.
    pub iterations: usize,
    pub shrinks: usize,
    pub replay: Replay,
}

impl<T: Clone + 'static> Gen<T> {
    /// Generate `config.test_limit` values.
    pub fn sample(&self, config: &Config) -> Result<Vec<T>> {
        Ok(self
            .sample_spaces(config)?
            .into_iter()
            .map(ExampleSpace::into_value)
            .collect())
    }

    /// Generate a single value.
    pub fn sample_one(&self, config: &Config) -> Result<T> {
        let run = drive(self, &config.clone().with_tests(1), |_, space| {
            Ok(ControlFlow::Break(space.into_value()))
        })?;
        run.stopped.ok_or_else(|| SiftError::GenError {
            generator: self.name().to_string(),
            message: "no value was generated".to_string(),
        })
    }

    /// Generate `config.test_limit` values along with their shrinks.
    pub fn sample_spaces(&self, config: &Config) -> Result<Vec<ExampleSpace<T>>> {
        let mut spaces = Vec::with_capacity(config.test_limit);
        drive(self, config, |_, space| {
            spaces.push(space);
            Ok(ControlFlow::<()>::Continue(()))
        })?;
        Ok(spaces)
    }

    /// Find the smallest generated value satisfying `predicate`.
    ///
    /// Generates until a value satisfies the predicate, then shrinks it for
    /// as long as the shrinks keep satisfying it.
    pub fn minimal<F>(&self, predicate: F, config: &Config) -> Result<Minimal<T>>
    where
        F: Fn(&T) -> bool,
    {
        let run = drive(self, config, |parameters, space| {
            if !predicate(space.value()) {
                return Ok(ControlFlow::Continue(()));
            }
            let shrunk = minimize(space, &predicate, config.shrink_limit)?;
            Ok(ControlFlow::Break((parameters, shrunk)))
        })?;

        match run.stopped {
            Some((parameters, shrunk)) => Ok(Minimal {
                replay: Replay::from_parameters(parameters, shrunk.path().to_vec()),
                value: shrunk.space.into_value(),
                iterations: run.iterations,
                shrinks: shrunk.shrinks,
            }),
            None => Err(SiftError::NoMinimalFound {
                iterations: run.iterations,
            }),
        }
    }
}
