//! Operator overloading for specification combinators.
//!
//! This module provides implementations of `BitAnd` (&), `BitOr` (|), and `Not` (!)
//! for specifications, allowing intuitive syntax like:
//!
//! ```
//! use specfilter::prelude::*;
//!
//! let rule = Spec(ColorSpec::new(Color::Green)) & !Spec(SizeSpec::new(Size::Small));
//! let tree = Product::new("Tree", Color::Green, Size::Large);
//! assert!(rule.is_satisfied_by(&tree));
//! ```

use crate::specification::{And, Not, Or, Specification};
use std::ops::{BitAnd, BitOr, Not as StdNot};

/// Wrapper struct to enable operator overloading on specifications.
#[derive(Debug, Clone, Copy)]
pub struct Spec<S>(pub S);

impl<S> Spec<S> {
    /// Unwrap the composed specification.
    pub fn into_inner(self) -> S {
        self.0
    }
}

impl<A, B> BitAnd<Spec<B>> for Spec<A> {
    type Output = Spec<And<A, B>>;

    fn bitand(self, rhs: Spec<B>) -> Self::Output {
        Spec(And::new(self.0, rhs.0))
    }
}

impl<A, B> BitOr<Spec<B>> for Spec<A> {
    type Output = Spec<Or<A, B>>;

    fn bitor(self, rhs: Spec<B>) -> Self::Output {
        Spec(Or::new(self.0, rhs.0))
    }
}

impl<A> StdNot for Spec<A> {
    type Output = Spec<Not<A>>;

    fn not(self) -> Self::Output {
        Spec(Not::new(self.0))
    }
}

impl<T, S> Specification<T> for Spec<S>
where
    S: Specification<T>,
{
    fn is_satisfied_by(&self, item: &T) -> bool {
        self.0.is_satisfied_by(item)
    }
}
