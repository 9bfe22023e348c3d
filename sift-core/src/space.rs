//! Lazy example spaces: a generated value and the tree of its shrinks.

use crate::error::GenFault;
use std::fmt;
use std::iter;
use std::rc::Rc;

pub mod render;

/// A lazily produced sequence of shrink candidates.
pub type Shrinks<T> = Box<dyn Iterator<Item = ExampleSpace<T>>>;

/// Shrink candidates, including generator failures met while rebuilding
/// them.
pub type Candidates<T> = Box<dyn Iterator<Item = Result<ExampleSpace<T>, GenFault>>>;

type ChildrenFn<T> = Rc<dyn Fn() -> Candidates<T>>;

/// Position of a node within an example space.
///
/// The root has the empty path; every other node is addressed by the child
/// indices leading to it. Because children are deterministic, a path is
/// enough to find the same node again after regenerating the space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ExampleId(Vec<usize>);

impl ExampleId {
    pub fn root() -> Self {
        ExampleId(Vec::new())
    }

    /// The id of this node's `index`-th child.
    pub fn child(&self, index: usize) -> Self {
        let mut path = Vec::with_capacity(self.0.len() + 1);
        path.extend_from_slice(&self.0);
        path.push(index);
        ExampleId(path)
    }

    pub fn path(&self) -> &[usize] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ExampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(usize::to_string).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

/// A generated value along with its possible shrinks.
///
/// Children are computed on demand, one at a time, so a space may be
/// infinitely deep or extremely wide. A node's children depend only on how
/// the space was built, never on the order in which it is traversed.
pub struct ExampleSpace<T> {
    id: ExampleId,
    value: T,
    children: ChildrenFn<T>,
}

impl<T: Clone> Clone for ExampleSpace<T> {
    fn clone(&self) -> Self {
        ExampleSpace {
            id: self.id.clone(),
            value: self.value.clone(),
            children: Rc::clone(&self.children),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ExampleSpace<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExampleSpace")
            .field("id", &self.id)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<T: Clone + 'static> ExampleSpace<T> {
    /// Create a space with the given value and no shrinks.
    pub fn singleton(value: T) -> Self {
        ExampleSpace::new(value, || Box::new(iter::empty()))
    }

    /// Create a space from a value and a producer of its children.
    pub fn new<F>(value: T, children: F) -> Self
    where
        F: Fn() -> Shrinks<T> + 'static,
    {
        ExampleSpace::with_candidates(value, move || Box::new(children().map(Ok)))
    }

    pub(crate) fn with_candidates<F>(value: T, candidates: F) -> Self
    where
        F: Fn() -> Candidates<T> + 'static,
    {
        ExampleSpace {
            id: ExampleId::root(),
            value,
            children: Rc::new(candidates),
        }
    }

    /// Build a space by repeatedly shrinking a seed.
    ///
    /// `shrink` yields the candidate seeds smaller than its input and `render`
    /// turns each seed into the value exposed by the node.
    pub fn unfold<S, Sh, R>(seed: S, shrink: Sh, render: R) -> Self
    where
        S: Clone + 'static,
        Sh: Fn(&S) -> Box<dyn Iterator<Item = S>> + 'static,
        R: Fn(&S) -> T + 'static,
    {
        unfold_rc(seed, Rc::new(shrink), Rc::new(render))
    }

    pub fn id(&self) -> &ExampleId {
        &self.id
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    /// The shrinks of this node, in order, with their ids assigned.
    ///
    /// Candidates whose generator failed are skipped; they keep their
    /// position, so ids match those of [`ExampleSpace::try_children`].
    pub fn children(&self) -> Shrinks<T> {
        Box::new(self.try_children().filter_map(Result::ok))
    }

    /// The shrinks of this node, in order, along with any generator failure
    /// met while producing them.
    pub fn try_children(&self) -> Candidates<T> {
        let id = self.id.clone();
        Box::new(
            (self.children)()
                .enumerate()
                .map(move |(index, child)| child.map(|child| child.with_id(id.child(index)))),
        )
    }

    fn with_id(mut self, id: ExampleId) -> Self {
        self.id = id;
        self
    }

    /// Check if the node has any shrinks. Forces at most one child.
    pub fn has_shrinks(&self) -> bool {
        (self.children)().next().is_some()
    }

    /// Transform every value, keeping the shape of the tree.
    pub fn map<U, F>(&self, f: F) -> ExampleSpace<U>
    where
        U: Clone + 'static,
        F: Fn(&T) -> U + 'static,
    {
        self.map_rc(Rc::new(f))
    }

    fn map_rc<U: Clone + 'static>(&self, f: Rc<dyn Fn(&T) -> U>) -> ExampleSpace<U> {
        let value = f(&self.value);
        let children = Rc::clone(&self.children);
        ExampleSpace::with_candidates(value, move || {
            let f = Rc::clone(&f);
            Box::new(
                children().map(move |child| child.map(|child| child.map_rc(Rc::clone(&f)))),
            )
        })
    }

    /// Keep only the nodes whose value satisfies the predicate.
    ///
    /// Returns `None` when the root itself is rejected. Rejected children are
    /// pruned together with their subtrees while their siblings are kept.
    pub fn filter<F>(&self, predicate: F) -> Option<Self>
    where
        F: Fn(&T) -> bool + 'static,
    {
        self.filter_map(move |value| predicate(value).then(|| value.clone()))
    }

    /// Transform values, pruning every node where `f` returns `None`.
    pub fn filter_map<U, F>(&self, f: F) -> Option<ExampleSpace<U>>
    where
        U: Clone + 'static,
        F: Fn(&T) -> Option<U> + 'static,
    {
        self.filter_map_rc(Rc::new(f))
    }

    fn filter_map_rc<U: Clone + 'static>(
        &self,
        f: Rc<dyn Fn(&T) -> Option<U>>,
    ) -> Option<ExampleSpace<U>> {
        let value = f(&self.value)?;
        let children = Rc::clone(&self.children);
        Some(ExampleSpace::with_candidates(value, move || {
            let f = Rc::clone(&f);
            Box::new(children().filter_map(move |child| match child {
                Ok(child) => child.filter_map_rc(Rc::clone(&f)).map(Ok),
                Err(fault) => Some(Err(fault)),
            }))
        }))
    }

    /// Compose this space with a dependent one.
    ///
    /// The result takes its value from `right`. Its shrinks first try every
    /// shrink of `self`, rebuilding the dependent side with `rebuild`, and
    /// then every shrink of `right` with `self` held fixed. `rebuild` may
    /// reject a candidate with `Ok(None)`, which prunes it, or fail, which
    /// surfaces the failure as a candidate.
    pub fn bind<U, F>(self, right: ExampleSpace<U>, rebuild: F) -> ExampleSpace<U>
    where
        U: Clone + 'static,
        F: Fn(&T) -> Result<Option<ExampleSpace<U>>, GenFault> + 'static,
    {
        bind_rc(self, right, Rc::new(rebuild))
    }

    /// Pair two spaces so that either side can shrink while the other holds.
    pub fn zip<U: Clone + 'static>(self, other: ExampleSpace<U>) -> ExampleSpace<(T, U)> {
        let value = (self.value.clone(), other.value.clone());
        ExampleSpace::with_candidates(value, move || {
            let (left, right) = (self.clone(), other.clone());
            let (left_fixed, right_fixed) = (self.clone(), other.clone());
            Box::new(
                (left.children)()
                    .map(move |l| l.map(|l| l.zip(right_fixed.clone())))
                    .chain(
                        (right.children)().map(move |r| r.map(|r| left_fixed.clone().zip(r))),
                    ),
            )
        })
    }

    /// Combine any number of spaces, shrinking one component at a time from
    /// the first to the last.
    pub fn zip_many(spaces: Vec<ExampleSpace<T>>) -> ExampleSpace<Vec<T>> {
        let value = spaces.iter().map(|space| space.value.clone()).collect();
        ExampleSpace::with_candidates(value, move || {
            Box::new(
                component_shrinks(spaces.clone())
                    .map(|shrunk| shrunk.map(ExampleSpace::zip_many)),
            )
        })
    }

    /// Visit every node depth-first, pre-order, lazily.
    pub fn traverse(&self) -> Traverse<T> {
        Traverse {
            pending: Some(self.clone()),
            stack: Vec::new(),
        }
    }

    /// Follow a path of child indices from this node.
    ///
    /// Returns `Ok(None)` when the path leaves the space, and the generator
    /// failure when a node on the path cannot be rebuilt.
    pub fn navigate(&self, path: &[usize]) -> Result<Option<Self>, GenFault> {
        let mut node = self.clone();
        for &index in path {
            match node.try_children().nth(index) {
                Some(child) => node = child?,
                None => return Ok(None),
            }
        }
        Ok(Some(node))
    }

    /// Values of the direct shrinks, forcing at most `limit` children.
    pub fn shrink_values(&self, limit: usize) -> Vec<T> {
        self.children().take(limit).map(|c| c.value).collect()
    }
}

/// Every way of replacing exactly one component with one of its shrinks.
pub(crate) fn component_shrinks<T: Clone + 'static>(
    spaces: Vec<ExampleSpace<T>>,
) -> impl Iterator<Item = Result<Vec<ExampleSpace<T>>, GenFault>> {
    (0..spaces.len()).flat_map(move |index| {
        let base = spaces.clone();
        let shrinks = (base[index].children)();
        shrinks.map(move |child| {
            let mut next = base.clone();
            next[index] = child?;
            Ok(next)
        })
    })
}

fn unfold_rc<S, T>(
    seed: S,
    shrink: Rc<dyn Fn(&S) -> Box<dyn Iterator<Item = S>>>,
    render: Rc<dyn Fn(&S) -> T>,
) -> ExampleSpace<T>
where
    S: Clone + 'static,
    T: Clone + 'static,
{
    let value = render(&seed);
    ExampleSpace::new(value, move || {
        let (shrink, render) = (Rc::clone(&shrink), Rc::clone(&render));
        Box::new(
            shrink(&seed).map(move |s| unfold_rc(s, Rc::clone(&shrink), Rc::clone(&render))),
        )
    })
}

fn bind_rc<T, U>(
    left: ExampleSpace<T>,
    right: ExampleSpace<U>,
    rebuild: Rc<dyn Fn(&T) -> Result<Option<ExampleSpace<U>>, GenFault>>,
) -> ExampleSpace<U>
where
    T: Clone + 'static,
    U: Clone + 'static,
{
    let value = right.value.clone();
    ExampleSpace::with_candidates(value, move || {
        let left_shrinks = {
            let rebuild = Rc::clone(&rebuild);
            (left.children)().filter_map(move |l| {
                let l = match l {
                    Ok(l) => l,
                    Err(fault) => return Some(Err(fault)),
                };
                match rebuild(&l.value) {
                    Ok(r) => r.map(|r| Ok(bind_rc(l, r, Rc::clone(&rebuild)))),
                    Err(fault) => Some(Err(fault)),
                }
            })
        };
        let right_shrinks = {
            let (rebuild, left) = (Rc::clone(&rebuild), left.clone());
            (right.children)()
                .map(move |r| r.map(|r| bind_rc(left.clone(), r, Rc::clone(&rebuild))))
        };
        Box::new(left_shrinks.chain(right_shrinks))
    })
}

/// Depth-first iterator over an example space.
pub struct Traverse<T> {
    pending: Option<ExampleSpace<T>>,
    stack: Vec<Shrinks<T>>,
}

impl<T: Clone + 'static> Iterator for Traverse<T> {
    type Item = ExampleSpace<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.pending.take() {
            self.stack.push(root.children());
            return Some(root);
        }

        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(node) => {
                    self.stack.push(node.children());
                    return Some(node);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl<T: Clone + 'static> From<T> for ExampleSpace<T> {
    fn from(value: T) -> Self {
        ExampleSpace::singleton(value)
    }
}
