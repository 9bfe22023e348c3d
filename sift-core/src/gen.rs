//! Generator combinators for property-based testing.

use crate::{data::*, error::GenFault, space::*};
use std::any::Any;
use std::fmt::Debug;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

mod choice;
mod collections;
mod ints;
mod tuple;

pub use choice::WeightedChoice;
pub use collections::{ListGen, StringGen, DEFAULT_COUNT_LIMIT};
pub use ints::{towards, CharType};

/// The outcome of running a generator once.
#[derive(Debug)]
pub enum GenIteration<T> {
    /// A value was produced, along with its shrinks.
    Instance {
        next_parameters: GenParameters,
        example_space: ExampleSpace<T>,
    },
    /// The draw was rejected and should be retried with `next_parameters`.
    Discard { next_parameters: GenParameters },
    /// Generation failed irrecoverably.
    Error { generator: String, message: String },
}

impl<T> GenIteration<T> {
    pub fn error(generator: &str, message: impl Into<String>) -> Self {
        GenIteration::Error {
            generator: generator.to_string(),
            message: message.into(),
        }
    }

    pub fn is_instance(&self) -> bool {
        matches!(self, GenIteration::Instance { .. })
    }

    pub fn is_discard(&self) -> bool {
        matches!(self, GenIteration::Discard { .. })
    }

    /// The produced space as a shrink candidate: a discard rejects the
    /// candidate and an error fails it.
    pub fn into_candidate(self) -> Result<Option<ExampleSpace<T>>, GenFault> {
        match self {
            GenIteration::Instance { example_space, .. } => Ok(Some(example_space)),
            GenIteration::Discard { .. } => Ok(None),
            GenIteration::Error { generator, message } => Err(GenFault { generator, message }),
        }
    }

    /// Split off an instance, or retype a discard or error for early return.
    pub fn split<U>(self) -> Result<(GenParameters, ExampleSpace<T>), GenIteration<U>> {
        match self {
            GenIteration::Instance {
                next_parameters,
                example_space,
            } => Ok((next_parameters, example_space)),
            GenIteration::Discard { next_parameters } => {
                Err(GenIteration::Discard { next_parameters })
            }
            GenIteration::Error { generator, message } => {
                Err(GenIteration::Error { generator, message })
            }
        }
    }

    /// Transform the space of an instance. Discards and errors pass through.
    pub fn map_space<U, F>(self, f: F) -> GenIteration<U>
    where
        F: FnOnce(ExampleSpace<T>) -> ExampleSpace<U>,
    {
        match self.split() {
            Ok((next_parameters, example_space)) => GenIteration::Instance {
                next_parameters,
                example_space: f(example_space),
            },
            Err(other) => other,
        }
    }

    fn map_next<F>(self, f: F) -> Self
    where
        F: FnOnce(GenParameters) -> GenParameters,
    {
        match self {
            GenIteration::Instance {
                next_parameters,
                example_space,
            } => GenIteration::Instance {
                next_parameters: f(next_parameters),
                example_space,
            },
            GenIteration::Discard { next_parameters } => GenIteration::Discard {
                next_parameters: f(next_parameters),
            },
            error => error,
        }
    }
}

/// A generator for test data of type `T`.
///
/// Generators are explicit, first-class values that can be composed using
/// combinator functions. Running a generator is a pure function of its
/// parameters: the same parameters always give the same outcome.
pub struct Gen<T> {
    name: Rc<str>,
    generator: Rc<dyn Fn(GenParameters) -> GenIteration<T>>,
}

impl<T> Clone for Gen<T> {
    fn clone(&self) -> Self {
        Gen {
            name: Rc::clone(&self.name),
            generator: Rc::clone(&self.generator),
        }
    }
}

impl<T> Gen<T> {
    /// Create a new generator from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(GenParameters) -> GenIteration<T> + 'static,
    {
        Gen {
            name: Rc::from("gen"),
            generator: Rc::new(f),
        }
    }

    /// Give the generator a name for error messages.
    ///
    /// Errors the generator reports under its previous name are reported
    /// under the new one; errors from generators nested inside it keep
    /// their own names.
    pub fn named(self, name: &str) -> Self
    where
        T: 'static,
    {
        let Gen {
            name: previous,
            generator: inner,
        } = self;
        let name: Rc<str> = Rc::from(name);
        let label = Rc::clone(&name);
        Gen {
            name,
            generator: Rc::new(move |parameters| match inner(parameters) {
                GenIteration::Error { generator, message } if *generator == *previous => {
                    GenIteration::Error {
                        generator: label.to_string(),
                        message,
                    }
                }
                other => other,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the generator once.
    pub fn generate(&self, parameters: GenParameters) -> GenIteration<T> {
        (self.generator)(parameters)
    }

    fn named_as<U>(self, other: &Gen<U>) -> Self {
        Gen {
            name: Rc::clone(&other.name),
            generator: self.generator,
        }
    }
}

impl<T> Gen<T>
where
    T: Clone + 'static,
{
    /// Create a generator that always produces the same value.
    ///
    /// Consumes no randomness and never shrinks.
    pub fn constant(value: T) -> Self {
        Gen::new(move |parameters| GenIteration::Instance {
            next_parameters: parameters,
            example_space: ExampleSpace::singleton(value.clone()),
        })
        .named("constant")
    }

    /// Create a generator from arbitrary construction logic.
    ///
    /// A panic inside `f` becomes an error outcome carrying the panic message.
    pub fn create<F>(f: F) -> Self
    where
        F: Fn(GenParameters) -> (T, GenParameters) + 'static,
    {
        Gen::new(move |parameters| {
            match panic::catch_unwind(AssertUnwindSafe(|| f(parameters))) {
                Ok((value, next_parameters)) => GenIteration::Instance {
                    next_parameters,
                    example_space: ExampleSpace::singleton(value),
                },
                Err(payload) => GenIteration::error("create", panic_message(&*payload)),
            }
        })
        .named("create")
    }

    /// Create a generator that always fails.
    pub fn fail(generator: &str, message: impl Into<String>) -> Self {
        let (name, message): (Rc<str>, String) = (Rc::from(generator), message.into());
        let label = Rc::clone(&name);
        Gen {
            name,
            generator: Rc::new(move |_| GenIteration::error(&label, message.clone())),
        }
    }

    /// Map a function over the generated values.
    pub fn map<U, F>(self, f: F) -> Gen<U>
    where
        F: Fn(&T) -> U + 'static,
        U: Clone + 'static,
    {
        let f = Rc::new(f);
        let source = self.clone();
        Gen::new(move |parameters| {
            let f = Rc::clone(&f);
            self.generate(parameters)
                .map_space(move |space| space.map(move |value| f(value)))
        })
        .named_as(&source)
    }

    /// Bind/flatmap for dependent generation.
    ///
    /// The right-hand generator runs with the parameters left over by this
    /// one. Shrinking tries the shrinks of this generator's value first,
    /// rebuilding the dependent value for each, then the dependent shrinks.
    pub fn bind<U, F>(self, f: F) -> Gen<U>
    where
        F: Fn(&T) -> Gen<U> + 'static,
        U: Clone + 'static,
    {
        let f = Rc::new(f);
        let source = self.clone();
        Gen::new(move |parameters| {
            let (left_next, left) = match self.generate(parameters).split() {
                Ok(instance) => instance,
                Err(other) => return other,
            };

            let (next_parameters, right) = match f(left.value()).generate(left_next).split() {
                Ok(instance) => instance,
                Err(other) => return other,
            };

            let f = Rc::clone(&f);
            let rebuild = move |value: &T| f(value).generate(left_next).into_candidate();
            GenIteration::Instance {
                next_parameters,
                example_space: left.bind(right, rebuild),
            }
        })
        .named_as(&source)
    }

    /// Filter generated values by a predicate.
    ///
    /// A rejected value becomes a discard; rejected shrinks are pruned.
    pub fn filter<F>(self, predicate: F) -> Gen<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        let predicate = Rc::new(predicate);
        let source = self.clone();
        Gen::new(move |parameters| match self.generate(parameters).split() {
            Ok((next_parameters, example_space)) => {
                let predicate = Rc::clone(&predicate);
                match example_space.filter(move |value| predicate(value)) {
                    Some(example_space) => GenIteration::Instance {
                        next_parameters,
                        example_space,
                    },
                    None => GenIteration::Discard { next_parameters },
                }
            }
            Err(other) => other,
        })
        .named_as(&source)
    }

    /// Convert generated values to another type.
    ///
    /// Shrinks that cannot be converted are pruned; a root value that cannot
    /// be converted is an error.
    pub fn cast<U>(self) -> Gen<U>
    where
        U: TryFrom<T> + Clone + 'static,
        T: Debug,
    {
        Gen::new(move |parameters| match self.generate(parameters).split() {
            Ok((next_parameters, example_space)) => {
                match example_space.filter_map(|value| U::try_from(value.clone()).ok()) {
                    Some(example_space) => GenIteration::Instance {
                        next_parameters,
                        example_space,
                    },
                    None => GenIteration::error(
                        "cast",
                        format!(
                            "value {:?} cannot be cast to {}",
                            example_space.value(),
                            std::any::type_name::<U>()
                        ),
                    ),
                }
            }
            Err(other) => other,
        })
        .named("cast")
    }

    /// Drop all shrinks.
    pub fn no_shrink(self) -> Gen<T> {
        let source = self.clone();
        Gen::new(move |parameters| {
            self.generate(parameters)
                .map_space(|space| ExampleSpace::singleton(space.into_value()))
        })
        .named_as(&source)
    }

    /// Replace the shrinks with a custom shrink policy.
    pub fn unfold<S>(self, shrink: S) -> Gen<T>
    where
        S: Fn(&T) -> Box<dyn Iterator<Item = T>> + 'static,
    {
        let shrink = Rc::new(shrink);
        let source = self.clone();
        Gen::new(move |parameters| {
            let shrink = Rc::clone(&shrink);
            self.generate(parameters).map_space(move |space| {
                ExampleSpace::unfold(space.into_value(), move |v| shrink(v), T::clone)
            })
        })
        .named_as(&source)
    }

    /// Run with a fixed size.
    pub fn resize(self, size: Size) -> Gen<T> {
        self.scale(move |_| size)
    }

    /// Run with a size derived from the current one.
    pub fn scale<F>(self, f: F) -> Gen<T>
    where
        F: Fn(Size) -> Size + 'static,
    {
        let source = self.clone();
        Gen::new(move |parameters| {
            let original = parameters.size;
            self.generate(parameters.with_size(f(original)))
                .map_next(|next| next.with_size(original))
        })
        .named_as(&source)
    }
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
