//! Greedy shrink search over example spaces.

use crate::error::GenFault;
use crate::space::ExampleSpace;

/// The locally minimal node found by [`minimize`].
#[derive(Debug, Clone)]
pub struct Shrunk<T> {
    pub space: ExampleSpace<T>,
    /// Number of successful descents.
    pub shrinks: usize,
    /// Every failing value visited, starting with the original.
    pub trail: Vec<T>,
}

impl<T: Clone + 'static> Shrunk<T> {
    pub fn value(&self) -> &T {
        self.space.value()
    }

    /// Child indices leading from the original value to the minimal one.
    pub fn path(&self) -> &[usize] {
        self.space.id().path()
    }
}

/// Descend into the first failing child until no child fails.
///
/// Children are tried in the order the space produces them; siblings after
/// the first failing one are never evaluated and the search never
/// backtracks. Stops after `shrink_limit` descents.
///
/// A candidate whose generator failed ends the search with that failure.
pub fn minimize<T, F>(
    space: ExampleSpace<T>,
    mut fails: F,
    shrink_limit: usize,
) -> Result<Shrunk<T>, GenFault>
where
    T: Clone + 'static,
    F: FnMut(&T) -> bool,
{
    let mut trail = vec![space.value().clone()];
    let mut current = space;
    let mut shrinks = 0;

    while shrinks < shrink_limit {
        let failing = current.try_children().find_map(|candidate| match candidate {
            Ok(child) if !fails(child.value()) => None,
            other => Some(other),
        });
        match failing.transpose()? {
            Some(child) => {
                trail.push(child.value().clone());
                current = child;
                shrinks += 1;
            }
            None => break,
        }
    }

    Ok(Shrunk {
        space: current,
        shrinks,
        trail,
    })
}
