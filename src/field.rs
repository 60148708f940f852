//! Generic leaf specifications over a single item field.
//!
//! A leaf captures an accessor for one field and the value to compare it
//! against. The accessor is any pure `Fn(&T) -> &V`, so a new leaf over an
//! existing field needs no new type:
//!
//! ```
//! use specfilter::prelude::*;
//!
//! let large_or_bigger = field_cmp(|p: &Product| &p.size, Cmp::Gte, Size::Large);
//! let house = Product::new("House", Color::Blue, Size::Large);
//! assert!(large_or_bigger.is_satisfied_by(&house));
//! ```

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::specification::Specification;

/// Comparison operator for a field leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cmp {
    /// Equal. The default.
    #[default]
    Eq,
    /// Not equal.
    Ne,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
}

impl Cmp {
    /// Evaluates the operator given the ordering of `actual` relative to the
    /// captured value. `None` (incomparable values) only satisfies `Ne`.
    pub fn eval_ordering(self, ordering: Option<Ordering>) -> bool {
        match (self, ordering) {
            (Cmp::Ne, None) => true,
            (_, None) => false,
            (Cmp::Eq, Some(o)) => o == Ordering::Equal,
            (Cmp::Ne, Some(o)) => o != Ordering::Equal,
            (Cmp::Lt, Some(o)) => o == Ordering::Less,
            (Cmp::Lte, Some(o)) => o != Ordering::Greater,
            (Cmp::Gt, Some(o)) => o == Ordering::Greater,
            (Cmp::Gte, Some(o)) => o != Ordering::Less,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Cmp::Eq => "eq",
            Cmp::Ne => "ne",
            Cmp::Lt => "lt",
            Cmp::Lte => "lte",
            Cmp::Gt => "gt",
            Cmp::Gte => "gte",
        }
    }
}

impl fmt::Display for Cmp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field equality leaf. Needs only `PartialEq` on the field type.
#[derive(Clone)]
pub struct FieldEq<F, V> {
    accessor: F,
    value: V,
}

/// Build a leaf satisfied when the accessed field equals `value`.
pub fn field_eq<T, V, F>(accessor: F, value: V) -> FieldEq<F, V>
where
    F: Fn(&T) -> &V + Send + Sync,
    V: PartialEq + Send + Sync,
{
    FieldEq { accessor, value }
}

impl<F, V> FieldEq<F, V> {
    pub fn value(&self) -> &V {
        &self.value
    }
}

impl<T, V, F> Specification<T> for FieldEq<F, V>
where
    F: Fn(&T) -> &V + Send + Sync,
    V: PartialEq + Send + Sync,
{
    fn is_satisfied_by(&self, item: &T) -> bool {
        (self.accessor)(item) == &self.value
    }
}

impl<F, V: fmt::Debug> fmt::Debug for FieldEq<F, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldEq").field("value", &self.value).finish()
    }
}

/// Field comparison leaf using the field type's ordering.
#[derive(Clone)]
pub struct FieldCmp<F, V> {
    accessor: F,
    op: Cmp,
    value: V,
}

/// Build a leaf satisfied when `field <op> value` holds.
pub fn field_cmp<T, V, F>(accessor: F, op: Cmp, value: V) -> FieldCmp<F, V>
where
    F: Fn(&T) -> &V + Send + Sync,
    V: PartialOrd + Send + Sync,
{
    FieldCmp {
        accessor,
        op,
        value,
    }
}

impl<F, V> FieldCmp<F, V> {
    pub fn op(&self) -> Cmp {
        self.op
    }

    pub fn value(&self) -> &V {
        &self.value
    }
}

impl<T, V, F> Specification<T> for FieldCmp<F, V>
where
    F: Fn(&T) -> &V + Send + Sync,
    V: PartialOrd + Send + Sync,
{
    fn is_satisfied_by(&self, item: &T) -> bool {
        let actual = (self.accessor)(item);
        self.op.eval_ordering(actual.partial_cmp(&self.value))
    }
}

impl<F, V: fmt::Debug> fmt::Debug for FieldCmp<F, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldCmp")
            .field("op", &self.op)
            .field("value", &self.value)
            .finish()
    }
}
