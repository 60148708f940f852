//! Core Specification trait and combinators.

use std::fmt;
use std::sync::Arc;

use crate::error::{SpecError, SpecResult};

/// Core specification trait for composable selection criteria.
///
/// A specification answers one question about one item: does it satisfy the
/// criterion? Implementations must be pure. Evaluating a specification never
/// mutates the item and always gives the same answer for the same item.
///
/// New criteria are added by implementing this trait. Neither the filter nor
/// the combinators need to change.
pub trait Specification<T>: Send + Sync {
    /// Check if the specification is satisfied by the given item.
    fn is_satisfied_by(&self, item: &T) -> bool;

    /// Combine this specification with another using AND logic.
    fn and<S: Specification<T>>(self, other: S) -> And<Self, S>
    where
        Self: Sized,
    {
        And::new(self, other)
    }

    /// Combine this specification with another using OR logic.
    fn or<S: Specification<T>>(self, other: S) -> Or<Self, S>
    where
        Self: Sized,
    {
        Or::new(self, other)
    }

    /// Negate this specification.
    fn not(self) -> Not<Self>
    where
        Self: Sized,
    {
        Not::new(self)
    }
}

/// A shared specification for dynamic dispatch.
///
/// Sub-trees held this way can appear under several combinators at once.
pub type BoxedSpec<T> = Arc<dyn Specification<T>>;

impl<T, S> Specification<T> for &S
where
    S: Specification<T> + ?Sized,
{
    fn is_satisfied_by(&self, item: &T) -> bool {
        (**self).is_satisfied_by(item)
    }
}

impl<T, S> Specification<T> for Box<S>
where
    S: Specification<T> + ?Sized,
{
    fn is_satisfied_by(&self, item: &T) -> bool {
        self.as_ref().is_satisfied_by(item)
    }
}

impl<T, S> Specification<T> for Arc<S>
where
    S: Specification<T> + ?Sized,
{
    fn is_satisfied_by(&self, item: &T) -> bool {
        self.as_ref().is_satisfied_by(item)
    }
}

// =============================================================================
// Binary combinators
// =============================================================================

/// AND combinator for specifications.
///
/// The right-hand side is only evaluated when the left-hand side holds.
#[derive(Debug, Clone, Copy)]
pub struct And<A, B>(A, B);

impl<A, B> And<A, B> {
    pub const fn new(left: A, right: B) -> Self {
        And(left, right)
    }

    pub fn left(&self) -> &A {
        &self.0
    }

    pub fn right(&self) -> &B {
        &self.1
    }
}

impl<T, A, B> Specification<T> for And<A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    fn is_satisfied_by(&self, item: &T) -> bool {
        self.0.is_satisfied_by(item) && self.1.is_satisfied_by(item)
    }
}

/// OR combinator for specifications.
///
/// The right-hand side is only evaluated when the left-hand side fails.
#[derive(Debug, Clone, Copy)]
pub struct Or<A, B>(A, B);

impl<A, B> Or<A, B> {
    pub const fn new(left: A, right: B) -> Self {
        Or(left, right)
    }

    pub fn left(&self) -> &A {
        &self.0
    }

    pub fn right(&self) -> &B {
        &self.1
    }
}

impl<T, A, B> Specification<T> for Or<A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    fn is_satisfied_by(&self, item: &T) -> bool {
        self.0.is_satisfied_by(item) || self.1.is_satisfied_by(item)
    }
}

/// NOT combinator for specifications.
#[derive(Debug, Clone, Copy)]
pub struct Not<A>(A);

impl<A> Not<A> {
    pub const fn new(inner: A) -> Self {
        Not(inner)
    }

    pub fn inner(&self) -> &A {
        &self.0
    }
}

impl<T> Not<BoxedSpec<T>> {
    /// Build a negation from a dynamic child list.
    ///
    /// Fails with [`SpecError::InvalidComposition`] unless exactly one child
    /// is given.
    pub fn from_children(mut specs: Vec<BoxedSpec<T>>) -> SpecResult<Self> {
        let count = specs.len();
        match (specs.pop(), specs.is_empty()) {
            (Some(inner), true) => Ok(Not(inner)),
            _ => Err(SpecError::InvalidComposition(format!(
                "Not requires exactly one child specification, got {}",
                count
            ))),
        }
    }
}

impl<T, A> Specification<T> for Not<A>
where
    A: Specification<T>,
{
    fn is_satisfied_by(&self, item: &T) -> bool {
        !self.0.is_satisfied_by(item)
    }
}

// =============================================================================
// Constant and closure specifications
// =============================================================================

/// A specification that always returns true.
#[derive(Debug, Clone, Copy)]
pub struct AlwaysTrue;

impl<T> Specification<T> for AlwaysTrue {
    fn is_satisfied_by(&self, _item: &T) -> bool {
        true
    }
}

/// A specification that always returns false.
#[derive(Debug, Clone, Copy)]
pub struct AlwaysFalse;

impl<T> Specification<T> for AlwaysFalse {
    fn is_satisfied_by(&self, _item: &T) -> bool {
        false
    }
}

/// A specification backed by a pure closure.
#[derive(Clone, Copy)]
pub struct Predicate<F>(F);

/// Wrap a closure as a specification.
///
/// The closure must be pure for the combinator and filter guarantees to hold.
pub fn from_fn<T, F>(f: F) -> Predicate<F>
where
    F: Fn(&T) -> bool + Send + Sync,
{
    Predicate(f)
}

impl<T, F> Specification<T> for Predicate<F>
where
    F: Fn(&T) -> bool + Send + Sync,
{
    fn is_satisfied_by(&self, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<F> fmt::Debug for Predicate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

// =============================================================================
// N-ary combinators
// =============================================================================

/// All specifications in the collection must be satisfied.
///
/// Children are evaluated in order and evaluation stops at the first failure.
pub struct AllOf<T> {
    specs: Vec<BoxedSpec<T>>,
}

impl<T> AllOf<T> {
    /// Fails with [`SpecError::InvalidComposition`] for an empty child list.
    pub fn new(specs: Vec<BoxedSpec<T>>) -> SpecResult<Self> {
        if specs.is_empty() {
            return Err(SpecError::InvalidComposition(
                "AllOf requires at least one child specification".to_string(),
            ));
        }
        Ok(AllOf { specs })
    }

    pub fn children(&self) -> &[BoxedSpec<T>] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl<T> Specification<T> for AllOf<T> {
    fn is_satisfied_by(&self, item: &T) -> bool {
        for spec in &self.specs {
            if !spec.is_satisfied_by(item) {
                return false;
            }
        }
        true
    }
}

impl<T> fmt::Debug for AllOf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllOf").field("children", &self.specs.len()).finish()
    }
}

/// Any specification in the collection must be satisfied.
///
/// Children are evaluated in order and evaluation stops at the first success.
pub struct AnyOf<T> {
    specs: Vec<BoxedSpec<T>>,
}

impl<T> AnyOf<T> {
    /// Fails with [`SpecError::InvalidComposition`] for an empty child list.
    pub fn new(specs: Vec<BoxedSpec<T>>) -> SpecResult<Self> {
        if specs.is_empty() {
            return Err(SpecError::InvalidComposition(
                "AnyOf requires at least one child specification".to_string(),
            ));
        }
        Ok(AnyOf { specs })
    }

    pub fn children(&self) -> &[BoxedSpec<T>] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl<T> Specification<T> for AnyOf<T> {
    fn is_satisfied_by(&self, item: &T) -> bool {
        for spec in &self.specs {
            if spec.is_satisfied_by(item) {
                return true;
            }
        }
        false
    }
}

impl<T> fmt::Debug for AnyOf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyOf").field("children", &self.specs.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed answer and counts how often it was asked.
    struct Counting {
        answer: bool,
        calls: AtomicUsize,
    }

    impl Counting {
        fn new(answer: bool) -> Self {
            Self {
                answer,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Specification<i32> for Counting {
        fn is_satisfied_by(&self, _item: &i32) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer
        }
    }

    fn boxed<S: Specification<i32> + 'static>(spec: S) -> BoxedSpec<i32> {
        Arc::new(spec)
    }

    #[test]
    fn test_and_truth_table() {
        for (a, b) in [(true, true), (true, false), (false, true), (false, false)] {
            let spec = And::new(Counting::new(a), Counting::new(b));
            assert_eq!(spec.is_satisfied_by(&0), a && b);
        }
    }

    #[test]
    fn test_and_short_circuits() {
        let right = Counting::new(true);
        let spec = And::new(AlwaysFalse, &right);
        assert!(!spec.is_satisfied_by(&1));
        assert_eq!(right.calls(), 0);

        let spec = And::new(AlwaysTrue, &right);
        assert!(spec.is_satisfied_by(&1));
        assert_eq!(right.calls(), 1);
    }

    #[test]
    fn test_or_short_circuits() {
        let right = Counting::new(false);
        let spec = Or::new(AlwaysTrue, &right);
        assert!(spec.is_satisfied_by(&1));
        assert_eq!(right.calls(), 0);

        let spec = Or::new(AlwaysFalse, &right);
        assert!(!spec.is_satisfied_by(&1));
        assert_eq!(right.calls(), 1);
    }

    #[test]
    fn test_not() {
        assert!(!Not::new(AlwaysTrue).is_satisfied_by(&0));
        assert!(Not::new(AlwaysFalse).is_satisfied_by(&0));
    }

    #[test]
    fn test_trait_combinator_methods() {
        let positive = from_fn(|x: &i32| *x > 0);
        let even = from_fn(|x: &i32| x % 2 == 0);

        let rule = positive.and(even.not());
        assert!(rule.is_satisfied_by(&3));
        assert!(!rule.is_satisfied_by(&4));
        assert!(!rule.is_satisfied_by(&-3));

        let rule = positive.or(even);
        assert!(rule.is_satisfied_by(&-2));
        assert!(!rule.is_satisfied_by(&-3));
    }

    #[test]
    fn test_all_of_stops_at_first_failure() {
        let first = Arc::new(Counting::new(true));
        let second = Arc::new(Counting::new(false));
        let third = Arc::new(Counting::new(true));
        let spec = AllOf::new(vec![
            first.clone() as BoxedSpec<i32>,
            second.clone() as BoxedSpec<i32>,
            third.clone() as BoxedSpec<i32>,
        ])
        .unwrap();

        assert!(!spec.is_satisfied_by(&0));
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
        assert_eq!(third.calls(), 0);
    }

    #[test]
    fn test_any_of_stops_at_first_success() {
        let first = Arc::new(Counting::new(false));
        let second = Arc::new(Counting::new(true));
        let third = Arc::new(Counting::new(true));
        let spec = AnyOf::new(vec![
            first.clone() as BoxedSpec<i32>,
            second.clone() as BoxedSpec<i32>,
            third.clone() as BoxedSpec<i32>,
        ])
        .unwrap();

        assert!(spec.is_satisfied_by(&0));
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
        assert_eq!(third.calls(), 0);
    }

    #[test]
    fn test_empty_composition_rejected() {
        let err = AllOf::<i32>::new(Vec::new()).unwrap_err();
        assert!(matches!(err, SpecError::InvalidComposition(_)));

        let err = AnyOf::<i32>::new(Vec::new()).unwrap_err();
        assert!(matches!(err, SpecError::InvalidComposition(_)));
    }

    #[test]
    fn test_not_arity() {
        let err = Not::from_children(vec![boxed(AlwaysTrue), boxed(AlwaysFalse)]).err().unwrap();
        assert!(matches!(err, SpecError::InvalidComposition(_)));

        let err = Not::<BoxedSpec<i32>>::from_children(Vec::new()).err().unwrap();
        assert!(matches!(err, SpecError::InvalidComposition(_)));

        let spec = Not::from_children(vec![boxed(AlwaysFalse)]).unwrap();
        assert!(spec.is_satisfied_by(&0));
    }

    #[test]
    fn test_shared_subtree() {
        let positive: BoxedSpec<i32> = Arc::new(from_fn(|x: &i32| *x > 0));
        let small: BoxedSpec<i32> = Arc::new(from_fn(|x: &i32| *x < 10));

        let both = AllOf::new(vec![positive.clone(), small]).unwrap();
        let either = AnyOf::new(vec![positive, boxed(AlwaysFalse)]).unwrap();

        assert!(both.is_satisfied_by(&5));
        assert!(!both.is_satisfied_by(&50));
        assert!(either.is_satisfied_by(&50));
        assert_eq!(both.len(), 2);
        assert_eq!(either.children().len(), 2);
    }

    #[test]
    fn test_nested_composition() {
        // (x > 0 AND (x even OR x == 7)) AND NOT x > 100
        let inner = AnyOf::new(vec![
            boxed(from_fn(|x: &i32| x % 2 == 0)),
            boxed(from_fn(|x: &i32| *x == 7)),
        ])
        .unwrap();
        let rule = from_fn(|x: &i32| *x > 0)
            .and(inner)
            .and(from_fn(|x: &i32| *x > 100).not());

        assert!(rule.is_satisfied_by(&7));
        assert!(rule.is_satisfied_by(&8));
        assert!(!rule.is_satisfied_by(&9));
        assert!(!rule.is_satisfied_by(&102));
    }

    #[test]
    fn test_spec_is_shareable_across_threads() {
        let rule: BoxedSpec<i32> = Arc::new(from_fn(|x: &i32| x % 3 == 0));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let rule = rule.clone();
                std::thread::spawn(move || rule.is_satisfied_by(&(i * 3)))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
