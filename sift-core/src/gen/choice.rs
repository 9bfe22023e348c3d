//! Choosing between generators and values.

use super::Gen;
use crate::error::Result;
use crate::sampler::{WeightedSample, WeightedSampler};
use crate::scaling::Range;
use std::rc::Rc;

/// A generator paired with its relative weight.
pub type WeightedChoice<T> = WeightedSample<Gen<T>>;

impl<T: Clone + 'static> Gen<T> {
    /// Choose a generator with probability proportional to its weight.
    ///
    /// Shrinks towards earlier choices.
    pub fn frequency(choices: Vec<WeightedChoice<T>>) -> Result<Self> {
        let sampler = Rc::new(WeightedSampler::build(choices)?);
        let last = sampler.total_weight() - 1;
        let index = Gen::<u64>::from_range(Range::new(0, last));
        Ok(index
            .bind(move |&i| match sampler.sample(i) {
                Ok(gen) => gen.clone(),
                Err(e) => Gen::fail("frequency", e.to_string()),
            })
            .named("frequency"))
    }

    /// Choose one of the generators uniformly.
    pub fn one_of(gens: Vec<Gen<T>>) -> Result<Self> {
        let choices = gens.into_iter().map(|g| WeightedChoice::new(1, g)).collect();
        Ok(Self::frequency(choices)?.named("one_of"))
    }

    /// Choose one of the values uniformly, shrinking towards the first.
    pub fn element(values: Vec<T>) -> Result<Self> {
        let gens = values.into_iter().map(Gen::constant).collect();
        Ok(Self::one_of(gens)?.named("element"))
    }
}

impl<T: Clone + 'static> Gen<Option<T>> {
    /// Generate `None` one time in five, shrinking `Some` to `None`.
    pub fn option(gen: Gen<T>) -> Self {
        let choices = vec![
            WeightedChoice::new(1, Gen::constant(None)),
            WeightedChoice::new(4, gen.map(|value| Some(value.clone()))),
        ];
        match Self::frequency(choices) {
            Ok(gen) => gen.named("option"),
            Err(e) => Gen::fail("option", e.to_string()),
        }
    }
}
