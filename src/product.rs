//! Product catalogue items and the leaf specifications that select them.
//!
//! These are the concrete item type and criteria used by the demo binary and
//! tests. Each leaf is a separate type implementing [`Specification`]; none of
//! them is known to the filter or the combinators.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::field::{Cmp, field_cmp};
use crate::registry::SpecRegistry;
use crate::specification::Specification;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Red,
    Green,
    Blue,
}

/// Product size. Variants are declared smallest first, so the derived
/// ordering is the size ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Size {
    Small,
    Medium,
    Large,
    Yuge,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub color: Color,
    pub size: Size,
}

impl Product {
    pub fn new(name: impl Into<String>, color: Color, size: Size) -> Self {
        Self {
            name: name.into(),
            color,
            size,
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?}, {:?})", self.name, self.color, self.size)
    }
}

/// The three-item catalogue: a small green apple, a large green tree and a
/// large blue house.
pub fn sample_catalogue() -> Vec<Product> {
    vec![
        Product::new("Apple", Color::Green, Size::Small),
        Product::new("Tree", Color::Green, Size::Large),
        Product::new("House", Color::Blue, Size::Large),
    ]
}

// =============================================================================
// Leaf specifications
// =============================================================================

/// Matches products of one color.
#[derive(Debug, Clone, Copy)]
pub struct ColorSpec {
    pub color: Color,
}

impl ColorSpec {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Specification<Product> for ColorSpec {
    fn is_satisfied_by(&self, item: &Product) -> bool {
        item.color == self.color
    }
}

/// Matches products of one size.
#[derive(Debug, Clone, Copy)]
pub struct SizeSpec {
    pub size: Size,
}

impl SizeSpec {
    pub fn new(size: Size) -> Self {
        Self { size }
    }
}

impl Specification<Product> for SizeSpec {
    fn is_satisfied_by(&self, item: &Product) -> bool {
        item.size == self.size
    }
}

/// Matches products at least as large as the given size.
#[derive(Debug, Clone, Copy)]
pub struct SizeAtLeast {
    pub size: Size,
}

impl SizeAtLeast {
    pub fn new(size: Size) -> Self {
        Self { size }
    }
}

impl Specification<Product> for SizeAtLeast {
    fn is_satisfied_by(&self, item: &Product) -> bool {
        item.size >= self.size
    }
}

/// Matches products by exact name.
#[derive(Debug, Clone)]
pub struct NameSpec {
    pub name: String,
}

impl NameSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Specification<Product> for NameSpec {
    fn is_satisfied_by(&self, item: &Product) -> bool {
        item.name == self.name
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Create a pre-configured registry for product rules.
///
/// | name            | params                                          |
/// |-----------------|-------------------------------------------------|
/// | `color`         | `value`: color                                  |
/// | `size`          | `value`: size, optional `op` (`eq`, `gte`, ...) |
/// | `size_at_least` | `value`: size                                   |
/// | `name`          | `value`: string                                 |
pub fn product_registry() -> SpecRegistry<Product> {
    let mut registry = SpecRegistry::new();

    registry.register("color", |params| {
        let color: Color = serde_json::from_value(params.get("value")?.clone()).ok()?;
        Some(Arc::new(ColorSpec::new(color)))
    });

    registry.register("size", |params| {
        let size: Size = serde_json::from_value(params.get("value")?.clone()).ok()?;
        let op = match params.get("op") {
            Some(op) => serde_json::from_value::<Cmp>(op.clone()).ok()?,
            None => Cmp::Eq,
        };
        if op == Cmp::Eq {
            return Some(Arc::new(SizeSpec::new(size)));
        }
        Some(Arc::new(field_cmp(|p: &Product| &p.size, op, size)))
    });

    registry.register("size_at_least", |params| {
        let size: Size = serde_json::from_value(params.get("value")?.clone()).ok()?;
        Some(Arc::new(SizeAtLeast::new(size)))
    });

    registry.register("name", |params| {
        let name = params.get("value")?.as_str()?;
        Some(Arc::new(NameSpec::new(name)))
    });

    registry
}
