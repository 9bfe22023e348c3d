//! Property definitions for property-based testing.

use crate::error::ShrinkStep;
use crate::gen::panic_message;
use crate::replay::Replay;
use crate::runner::drive;
use crate::shrink::{minimize, Shrunk};
use crate::{data::*, error::*, gen::*};
use std::fmt;
use std::ops::ControlFlow;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

/// The outcome of running a property body on one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(String),
    /// A precondition did not hold; the input is skipped.
    Discard,
}

impl Verdict {
    pub fn is_failure(&self) -> bool {
        matches!(self, Verdict::Fail(_))
    }

    /// Why the property failed, or an empty string.
    pub fn reason(&self) -> &str {
        match self {
            Verdict::Fail(reason) => reason,
            _ => "",
        }
    }
}

/// Early exit from a property body.
///
/// Any error type converts into a failure, so `?` works on fallible calls
/// inside a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    Failed(String),
    Discarded,
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyError::Failed(reason) => write!(f, "{reason}"),
            PropertyError::Discarded => write!(f, "precondition failed"),
        }
    }
}

impl<E: std::error::Error> From<E> for PropertyError {
    fn from(error: E) -> Self {
        PropertyError::Failed(error.to_string())
    }
}

pub type PropertyResult = std::result::Result<(), PropertyError>;

/// Skip the current input unless `holds`.
pub fn precondition(holds: bool) -> PropertyResult {
    if holds {
        Ok(())
    } else {
        Err(PropertyError::Discarded)
    }
}

/// Fail the current input with a reason.
pub fn failure(reason: impl Into<String>) -> PropertyResult {
    Err(PropertyError::Failed(reason.into()))
}

/// Values a property body may return.
pub trait IntoVerdict {
    fn into_verdict(self) -> Verdict;
}

impl IntoVerdict for Verdict {
    fn into_verdict(self) -> Verdict {
        self
    }
}

impl IntoVerdict for bool {
    fn into_verdict(self) -> Verdict {
        if self {
            Verdict::Pass
        } else {
            Verdict::Fail("Boolean Condition".to_string())
        }
    }
}

impl IntoVerdict for () {
    fn into_verdict(self) -> Verdict {
        Verdict::Pass
    }
}

impl IntoVerdict for PropertyResult {
    fn into_verdict(self) -> Verdict {
        match self {
            Ok(()) => Verdict::Pass,
            Err(PropertyError::Failed(reason)) => Verdict::Fail(reason),
            Err(PropertyError::Discarded) => Verdict::Discard,
        }
    }
}

/// An input paired with the verdict of the property on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Test<T> {
    pub input: T,
    pub verdict: Verdict,
}

/// A property that can be tested with generated inputs.
///
/// A property is itself a generator of tests: inputs whose precondition
/// fails are discards, so they are retried and pruned from shrinking
/// exactly like values rejected by [`Gen::filter`].
#[derive(Clone)]
pub struct Property<T> {
    gen: Gen<Test<T>>,
    variable_name: Option<String>,
}

impl<T> Property<T>
where
    T: 'static + fmt::Debug + Clone,
{
    /// Create a new property from a generator and test function.
    pub fn new<F, O>(generator: Gen<T>, test_function: F) -> Self
    where
        F: Fn(&T) -> O + 'static,
        O: IntoVerdict,
    {
        let gen = generator
            .map(move |input: &T| Test {
                input: input.clone(),
                verdict: evaluate(&test_function, input),
            })
            .filter(|test| test.verdict != Verdict::Discard);
        Property::from_gen(gen)
    }

    /// Create a property from a generator of tests.
    pub fn from_gen(gen: Gen<Test<T>>) -> Self {
        Property {
            gen,
            variable_name: None,
        }
    }

    /// Create a property that checks a condition for all inputs.
    pub fn for_all<F, O>(generator: Gen<T>, condition: F) -> Self
    where
        F: Fn(&T) -> O + 'static,
        O: IntoVerdict,
    {
        Property::new(generator, condition)
    }

    /// Create a property whose input is reported under `variable_name`.
    pub fn for_all_named<F, O>(generator: Gen<T>, variable_name: &str, condition: F) -> Self
    where
        F: Fn(&T) -> O + 'static,
        O: IntoVerdict,
    {
        Property::new(generator, condition).with_variable_name(variable_name)
    }

    pub fn with_variable_name(mut self, variable_name: &str) -> Self {
        self.variable_name = Some(variable_name.to_string());
        self
    }

    pub fn gen(&self) -> &Gen<Test<T>> {
        &self.gen
    }

    pub fn into_gen(self) -> Gen<Test<T>> {
        self.gen
    }

    /// Check the property.
    pub fn check(&self, config: &Config) -> Result<CheckResult<T>> {
        self.check_with_context(config, None)
    }

    /// Check the property, naming it in the report.
    pub fn check_with_context(
        &self,
        config: &Config,
        property_name: Option<&str>,
    ) -> Result<CheckResult<T>> {
        if let Some(encoded) = &config.replay {
            return self.check_replay(encoded, property_name);
        }

        let run = drive(&self.gen, config, |parameters, space| {
            if !space.value().verdict.is_failure() {
                return Ok(ControlFlow::Continue(()));
            }
            let shrunk = minimize(
                space,
                |test: &Test<T>| test.verdict.is_failure(),
                config.shrink_limit,
            )?;
            Ok(ControlFlow::Break((parameters, shrunk)))
        })?;

        let counterexample = match run.stopped {
            Some((parameters, shrunk)) => Some(self.counterexample(parameters, shrunk)?),
            None => None,
        };

        Ok(CheckResult {
            falsified: counterexample.is_some(),
            iterations: run.iterations,
            discards: run.discards,
            counterexample,
            property_name: property_name.map(str::to_string),
        })
    }

    /// Check the property, failing with a descriptive error on falsification.
    pub fn assert(&self, config: &Config) -> Result<()> {
        self.check(config)?.into_result()
    }

    fn counterexample(
        &self,
        parameters: GenParameters,
        shrunk: Shrunk<Test<T>>,
    ) -> Result<Counterexample<T>> {
        let replay = Replay::from_parameters(parameters, shrunk.path().to_vec());
        let encoded_replay = replay.encode()?;
        let shrink_steps = shrunk
            .trail
            .iter()
            .enumerate()
            .map(|(step, test)| self.shrink_step(step, &test.input))
            .collect();
        let test = shrunk.space.into_value();

        Ok(Counterexample {
            value: test.input,
            reason: test.verdict.reason().to_string(),
            shrinks: shrunk.shrinks,
            replay,
            encoded_replay,
            shrink_steps,
        })
    }

    fn check_replay(&self, encoded: &str, property_name: Option<&str>) -> Result<CheckResult<T>> {
        let replay = Replay::decode(encoded)?;
        let test = replay.reproduce(&self.gen)?.into_value();

        let counterexample = test.verdict.is_failure().then(|| Counterexample {
            reason: test.verdict.reason().to_string(),
            shrinks: replay.path.len(),
            shrink_steps: vec![self.shrink_step(0, &test.input)],
            value: test.input.clone(),
            replay: replay.clone(),
            encoded_replay: encoded.to_string(),
        });

        Ok(CheckResult {
            falsified: counterexample.is_some(),
            iterations: 1,
            discards: 0,
            counterexample,
            property_name: property_name.map(str::to_string),
        })
    }

    fn shrink_step(&self, step: usize, input: &T) -> ShrinkStep {
        ShrinkStep {
            counterexample: format!("{input:?}"),
            step,
            variable_name: self.variable_name.clone(),
        }
    }
}

fn evaluate<T, F, O>(test_function: &F, input: &T) -> Verdict
where
    F: Fn(&T) -> O,
    O: IntoVerdict,
{
    match panic::catch_unwind(AssertUnwindSafe(|| test_function(input))) {
        Ok(outcome) => outcome.into_verdict(),
        Err(payload) => Verdict::Fail(format!("panicked: {}", panic_message(&*payload))),
    }
}

/// Create a property from a generator and test function.
pub fn property<T, F, O>(generator: Gen<T>, test_function: F) -> Property<T>
where
    T: 'static + fmt::Debug + Clone,
    F: Fn(&T) -> O + 'static,
    O: IntoVerdict,
{
    Property::new(generator, test_function)
}

/// Create a property that checks a condition for all inputs.
pub fn for_all<T, F, O>(generator: Gen<T>, condition: F) -> Property<T>
where
    T: 'static + fmt::Debug + Clone,
    F: Fn(&T) -> O + 'static,
    O: IntoVerdict,
{
    Property::for_all(generator, condition)
}

/// Create a property whose input is reported under `variable_name`.
pub fn for_all_named<T, F, O>(generator: Gen<T>, variable_name: &str, condition: F) -> Property<T>
where
    T: 'static + fmt::Debug + Clone,
    F: Fn(&T) -> O + 'static,
    O: IntoVerdict,
{
    Property::for_all_named(generator, variable_name, condition)
}

/// Create a property over an outer input and an inner property built from it.
///
/// Preconditions in the inner property discard the combined input, and
/// shrinking the outer input rebuilds the inner property for each candidate.
pub fn for_all_nested<T, U, F>(generator: Gen<T>, inner: F) -> Property<(T, U)>
where
    T: 'static + fmt::Debug + Clone,
    U: 'static + fmt::Debug + Clone,
    F: Fn(&T) -> Property<U> + 'static,
{
    let inner = Rc::new(inner);
    let gen = generator.bind(move |outer: &T| {
        let outer = outer.clone();
        inner(&outer).into_gen().map(move |test: &Test<U>| Test {
            input: (outer.clone(), test.input.clone()),
            verdict: test.verdict.clone(),
        })
    });
    Property::from_gen(gen)
}
