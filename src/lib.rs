//! Specfilter - composable specifications and a lazy, specification-agnostic filter.
//!
//! Selection criteria are first-class values implementing [`Specification`].
//! Leaves test one field of an item; combinators (`And`, `Or`, `Not`,
//! `AllOf`, `AnyOf`) build expression trees from other specifications. A
//! single [`SpecFilter`] applies any of them to a borrowed sequence and yields
//! matches lazily, in input order.
//!
//! # Example
//!
//! ```
//! use specfilter::prelude::*;
//!
//! let products = sample_catalogue();
//!
//! let large_blue = ColorSpec::new(Color::Blue).and(SizeSpec::new(Size::Large));
//! let names: Vec<&str> = SpecFilter
//!     .filter(&products, Some(&large_blue))?
//!     .map(|p| p.name.as_str())
//!     .collect();
//! assert_eq!(names, vec!["House"]);
//!
//! // Or with operators
//! let green_not_small = Spec(ColorSpec::new(Color::Green)) & !Spec(SizeSpec::new(Size::Small));
//! let names: Vec<&str> = products
//!     .iter()
//!     .satisfying(&green_not_small)
//!     .map(|p| p.name.as_str())
//!     .collect();
//! assert_eq!(names, vec!["Tree"]);
//! # Ok::<(), specfilter::SpecError>(())
//! ```
//!
//! New criteria are added by implementing [`Specification`] for a new type;
//! rule trees can also be loaded from JSON through [`registry::SpecRegistry`].

pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod filter;
pub mod operators;
pub mod product;
pub mod registry;
pub mod rule_config;
pub mod specification;

// Re-export commonly used types
pub use error::{SpecError, SpecResult};
pub use filter::{Filter, Matches, SpecFilter};
pub use specification::{BoxedSpec, Specification};

/// Prelude module - import everything you need with `use specfilter::prelude::*`
pub mod prelude {
    pub use crate::error::{SpecError, SpecResult};
    pub use crate::field::{Cmp, FieldCmp, FieldEq, field_cmp, field_eq};
    pub use crate::filter::{Filter, Matches, SatisfyingExt, SpecFilter};
    pub use crate::operators::Spec;
    pub use crate::product::{
        Color, ColorSpec, NameSpec, Product, Size, SizeAtLeast, SizeSpec, product_registry,
        sample_catalogue,
    };
    pub use crate::registry::SpecRegistry;
    pub use crate::rule_config::{NamedRuleConfig, RuleConfig};
    pub use crate::specification::{
        AllOf, AlwaysFalse, AlwaysTrue, And, AnyOf, BoxedSpec, Not, Or, Predicate, Specification,
        from_fn,
    };
}
