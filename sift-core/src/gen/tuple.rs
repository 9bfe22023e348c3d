//! Independent composition of generators.
//!
//! Each component runs on its own forked lineage, so adding, removing or
//! reordering components never changes the randomness seen by the others.

use super::{Gen, GenIteration};
use crate::data::GenParameters;
use crate::space::ExampleSpace;

impl<T: Clone + 'static> Gen<T> {
    /// Pair this generator with another.
    ///
    /// Either component shrinks while the other is held fixed.
    pub fn zip<U: Clone + 'static>(self, other: Gen<U>) -> Gen<(T, U)> {
        Gen::new(move |parameters: GenParameters| {
            let second = parameters.next();
            let next_parameters = second.next();

            let left = match self.generate(parameters.fork()).split() {
                Ok((_, space)) => space,
                Err(failed) => return advance(failed, next_parameters),
            };
            let right = match other.generate(second.fork()).split() {
                Ok((_, space)) => space,
                Err(failed) => return advance(failed, next_parameters),
            };

            GenIteration::Instance {
                next_parameters,
                example_space: left.zip(right),
            }
        })
        .named("zip")
    }

    /// Run every generator in turn, collecting their values.
    pub fn zip_many(gens: Vec<Gen<T>>) -> Gen<Vec<T>> {
        Gen::new(move |parameters: GenParameters| {
            let mut current = parameters;
            let mut spaces = Vec::with_capacity(gens.len());
            for gen in &gens {
                match gen.generate(current.fork()).split() {
                    Ok((_, space)) => spaces.push(space),
                    Err(failed) => {
                        let next_parameters = (0..gens.len()).fold(parameters, |p, _| p.next());
                        return advance(failed, next_parameters);
                    }
                }
                current = current.next();
            }

            GenIteration::Instance {
                next_parameters: current,
                example_space: ExampleSpace::zip_many(spaces),
            }
        })
        .named("zip_many")
    }
}

/// A discard from a forked component resumes on the outer lineage.
fn advance<T>(iteration: GenIteration<T>, next_parameters: GenParameters) -> GenIteration<T> {
    match iteration {
        GenIteration::Discard { .. } => GenIteration::Discard { next_parameters },
        other => other,
    }
}

impl<A, B> Gen<(A, B)>
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    pub fn tuple_of(first: Gen<A>, second: Gen<B>) -> Self {
        first.zip(second)
    }
}

impl<A, B, C> Gen<(A, B, C)>
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
{
    pub fn tuple_of(first: Gen<A>, second: Gen<B>, third: Gen<C>) -> Self {
        first
            .zip(second)
            .zip(third)
            .map(|((a, b), c)| (a.clone(), b.clone(), c.clone()))
            .named("zip")
    }
}

impl<A, B, C, D> Gen<(A, B, C, D)>
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
    D: Clone + 'static,
{
    pub fn tuple_of(first: Gen<A>, second: Gen<B>, third: Gen<C>, fourth: Gen<D>) -> Self {
        first
            .zip(second)
            .zip(third.zip(fourth))
            .map(|((a, b), (c, d))| (a.clone(), b.clone(), c.clone(), d.clone()))
            .named("zip")
    }
}
