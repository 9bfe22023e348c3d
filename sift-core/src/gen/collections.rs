//! Collection generators with bounded lengths.

use super::{CharType, Gen, GenIteration};
use crate::scaling::Range;
use crate::space::{component_shrinks, ExampleSpace};
use std::iter;

/// Default cap on the maximum length a collection generator may request.
pub const DEFAULT_COUNT_LIMIT: usize = 1000;

/// Builder for list generators.
///
/// Lengths scale linearly with size by default. Asking for collections
/// longer than the count limit is an error unless the limit is explicitly
/// disabled.
#[derive(Clone)]
pub struct ListGen<T> {
    element: Gen<T>,
    count: Range<usize>,
    count_limit: Option<usize>,
}

impl<T: Clone + 'static> ListGen<T> {
    pub fn new(element: Gen<T>) -> Self {
        ListGen {
            element,
            count: Range::linear(0, 20),
            count_limit: Some(DEFAULT_COUNT_LIMIT),
        }
    }

    /// Generate between `min` and `max` elements, scaling with size.
    pub fn between(mut self, min: usize, max: usize) -> Self {
        self.count = Range::linear(min, max);
        self
    }

    /// Generate exactly `length` elements.
    pub fn of_length(mut self, length: usize) -> Self {
        self.count = Range::new(length, length);
        self
    }

    pub fn with_count(mut self, count: Range<usize>) -> Self {
        self.count = count;
        self
    }

    pub fn with_count_limit(mut self, limit: usize) -> Self {
        self.count_limit = Some(limit);
        self
    }

    /// Allow arbitrarily long collections.
    pub fn unsafe_disable_count_limit(mut self) -> Self {
        self.count_limit = None;
        self
    }

    pub fn build(self) -> Gen<Vec<T>> {
        let ListGen {
            element,
            count,
            count_limit,
        } = self;

        Gen::new(move |parameters| {
            if let Err(message) = count.validate() {
                return GenIteration::error("list", message);
            }
            if let Some(limit) = count_limit {
                if count.max > limit {
                    return GenIteration::error(
                        "list",
                        format!(
                            "maximum count {} exceeds the count limit of {limit}; \
                             call unsafe_disable_count_limit to allow it",
                            count.max
                        ),
                    );
                }
            }

            let (min, max) = count.bounds(parameters.size);
            let length = match parameters.rng.value(min, max) {
                Ok(length) => length,
                Err(e) => return GenIteration::error("list", e.to_string()),
            };

            let mut next = parameters.next();
            let mut elements = Vec::with_capacity(length);
            for _ in 0..length {
                let (element_next, space) = match element.generate(next).split() {
                    Ok(instance) => instance,
                    Err(other) => return other,
                };
                elements.push(space);
                next = element_next;
            }

            GenIteration::Instance {
                next_parameters: next,
                example_space: list_space(elements, count.min),
            }
        })
        .named("list")
    }
}

/// A space over element spaces that first removes elements, then shrinks
/// the survivors one at a time.
fn list_space<T: Clone + 'static>(
    elements: Vec<ExampleSpace<T>>,
    min_length: usize,
) -> ExampleSpace<Vec<T>> {
    let value = elements.iter().map(|space| space.value().clone()).collect();
    ExampleSpace::with_candidates(value, move || {
        let removed = removals(elements.clone(), min_length).map(Ok);
        Box::new(
            removed
                .chain(component_shrinks(elements.clone()))
                .map(move |shrunk| shrunk.map(|elements| list_space(elements, min_length))),
        )
    })
}

/// Remove contiguous chunks, largest first, never dropping below `min_length`.
fn removals<X: Clone + 'static>(items: Vec<X>, min_length: usize) -> impl Iterator<Item = Vec<X>> {
    let length = items.len();
    let removable = length.saturating_sub(min_length);
    iter::successors((removable > 0).then_some(removable), |&chunk| {
        (chunk > 1).then_some(chunk / 2)
    })
    .flat_map(move |chunk| {
        let items = items.clone();
        (0..=length - chunk).step_by(chunk).map(move |start| {
            let mut shrunk = items.clone();
            shrunk.drain(start..start + chunk);
            shrunk
        })
    })
}

/// Builder for string generators.
#[derive(Debug, Clone, Copy)]
pub struct StringGen {
    chars: CharType,
    length: Range<usize>,
    count_limit: Option<usize>,
}

impl StringGen {
    pub fn new() -> Self {
        StringGen {
            chars: CharType::ALL,
            length: Range::linear(0, 20),
            count_limit: Some(DEFAULT_COUNT_LIMIT),
        }
    }

    pub fn with_chars(mut self, chars: CharType) -> Self {
        self.chars = chars;
        self
    }

    pub fn between(mut self, min: usize, max: usize) -> Self {
        self.length = Range::linear(min, max);
        self
    }

    pub fn of_length(mut self, length: usize) -> Self {
        self.length = Range::new(length, length);
        self
    }

    pub fn with_count_limit(mut self, limit: usize) -> Self {
        self.count_limit = Some(limit);
        self
    }

    pub fn unsafe_disable_count_limit(mut self) -> Self {
        self.count_limit = None;
        self
    }

    pub fn build(self) -> Gen<String> {
        ListGen {
            element: Gen::char_of(self.chars),
            count: self.length,
            count_limit: self.count_limit,
        }
        .build()
        .map(|chars| chars.iter().collect())
        .named("string")
    }
}

impl Default for StringGen {
    fn default() -> Self {
        StringGen::new()
    }
}

impl<T: Clone + 'static> Gen<Vec<T>> {
    /// Start building a list generator.
    pub fn list(element: Gen<T>) -> ListGen<T> {
        ListGen::new(element)
    }

    /// Generate vectors with the default length range.
    pub fn vec_of(element: Gen<T>) -> Self {
        ListGen::new(element).build()
    }
}

impl Gen<String> {
    /// Start building a string generator.
    pub fn string() -> StringGen {
        StringGen::new()
    }

    /// Generate ASCII alphabetic strings.
    pub fn ascii_alpha() -> Self {
        StringGen::new()
            .with_chars(CharType::LOWERCASE | CharType::UPPERCASE)
            .build()
    }
}
