//! Lazy, specification-agnostic filtering.
//!
//! The filter knows nothing about concrete leaves or combinators. It walks the
//! borrowed input once, asking the specification about each item only when
//! the consumer pulls the next match.

use std::iter::{Fuse, FusedIterator};

use tracing::{debug, trace};

use crate::error::{SpecError, SpecResult};
use crate::specification::Specification;

/// Applies a specification to a sequence of items.
pub trait Filter<T> {
    /// Produce the items satisfying `spec`, lazily and in input order.
    ///
    /// An absent specification is rejected with [`SpecError::InvalidArgument`]
    /// before any item is looked at.
    fn filter<'a, I, S>(
        &self,
        items: I,
        spec: Option<&'a S>,
    ) -> SpecResult<Matches<'a, I::IntoIter, S>>
    where
        T: 'a,
        I: IntoIterator<Item = &'a T>,
        S: Specification<T> + ?Sized;
}

/// The general-purpose filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecFilter;

impl SpecFilter {
    pub fn new() -> Self {
        SpecFilter
    }

    /// Infallible form of [`Filter::filter`] for a specification that is known
    /// to be present.
    pub fn matching<'a, T, I, S>(&self, items: I, spec: &'a S) -> Matches<'a, I::IntoIter, S>
    where
        T: 'a,
        I: IntoIterator<Item = &'a T>,
        S: Specification<T> + ?Sized,
    {
        debug!(
            item_type = std::any::type_name::<T>(),
            "Starting specification filter"
        );
        Matches::new(items.into_iter(), spec)
    }
}

impl<T> Filter<T> for SpecFilter {
    fn filter<'a, I, S>(
        &self,
        items: I,
        spec: Option<&'a S>,
    ) -> SpecResult<Matches<'a, I::IntoIter, S>>
    where
        T: 'a,
        I: IntoIterator<Item = &'a T>,
        S: Specification<T> + ?Sized,
    {
        let spec = spec.ok_or_else(|| {
            SpecError::InvalidArgument("filter requires a specification".to_string())
        })?;
        Ok(self.matching(items, spec))
    }
}

/// Lazy iterator over the items satisfying a specification.
///
/// Single pass: once exhausted it keeps returning `None`.
pub struct Matches<'a, I, S: ?Sized> {
    iter: Fuse<I>,
    spec: &'a S,
    evaluated: usize,
}

impl<'a, I, S: ?Sized> Matches<'a, I, S>
where
    I: Iterator,
{
    pub fn new(iter: I, spec: &'a S) -> Self {
        Self {
            iter: iter.fuse(),
            spec,
            evaluated: 0,
        }
    }

    /// Number of input items tested against the specification so far.
    pub fn evaluated(&self) -> usize {
        self.evaluated
    }
}

impl<'a, T, I, S> Iterator for Matches<'a, I, S>
where
    T: 'a,
    I: Iterator<Item = &'a T>,
    S: Specification<T> + ?Sized,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        for item in self.iter.by_ref() {
            self.evaluated += 1;
            let matched = self.spec.is_satisfied_by(item);
            trace!(position = self.evaluated - 1, matched, "Evaluated item");
            if matched {
                return Some(item);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

impl<'a, T, I, S> FusedIterator for Matches<'a, I, S>
where
    T: 'a,
    I: Iterator<Item = &'a T>,
    S: Specification<T> + ?Sized,
{
}

/// Extension for filtering any iterator of borrowed items by a specification.
pub trait SatisfyingExt<'a, T: 'a>: Iterator<Item = &'a T> + Sized {
    fn satisfying<S>(self, spec: &'a S) -> Matches<'a, Self, S>
    where
        S: Specification<T> + ?Sized,
    {
        Matches::new(self, spec)
    }
}

impl<'a, T: 'a, I> SatisfyingExt<'a, T> for I where I: Iterator<Item = &'a T> {}
