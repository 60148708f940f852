//! SpecRegistry for dynamic rule building from JSON configuration.
//!
//! Leaf specifications are registered by name together with a factory that
//! reads their parameters. A [`RuleConfig`] tree is then turned into a live
//! specification without the caller naming any concrete leaf type.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{SpecError, SpecResult};
use crate::rule_config::RuleConfig;
use crate::specification::{AllOf, AnyOf, BoxedSpec, Not};

/// Factory function type for creating specifications from parameters.
pub type SpecFactory<T> = Arc<dyn Fn(&HashMap<String, Value>) -> Option<BoxedSpec<T>> + Send + Sync>;

/// Registry for dynamically building specifications from configuration.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use specfilter::prelude::*;
///
/// let mut registry = SpecRegistry::<u32>::new();
/// registry.register("even", |_| Some(Arc::new(from_fn(|x: &u32| x % 2 == 0))));
/// registry.register("above", |params| {
///     let min = params.get("value")?.as_u64()? as u32;
///     Some(Arc::new(from_fn(move |x: &u32| *x > min)))
/// });
///
/// let config = RuleConfig::and(vec![
///     RuleConfig::spec("even"),
///     RuleConfig::spec_with_value("above", 10),
/// ]);
/// let rule = registry.build(&config).unwrap();
///
/// let items = [4u32, 12, 15, 20];
/// let matched: Vec<&u32> = SpecFilter.matching(&items, rule.as_ref()).collect();
/// assert_eq!(matched, vec![&12, &20]);
/// ```
pub struct SpecRegistry<T: 'static> {
    factories: HashMap<String, SpecFactory<T>>,
}

impl<T: 'static> Default for SpecRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> SpecRegistry<T> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a specification factory.
    ///
    /// The factory receives the leaf's parameters and returns `None` if they
    /// are invalid. Registering an existing name replaces its factory.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&HashMap<String, Value>) -> Option<BoxedSpec<T>> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    /// Check if a specification is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// List all registered specification names, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Create a leaf specification by name with parameters.
    pub fn create(&self, name: &str, params: &HashMap<String, Value>) -> SpecResult<BoxedSpec<T>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| SpecError::UnknownSpecification(name.to_string()))?;

        factory(params).ok_or_else(|| {
            warn!(spec = %name, ?params, "Specification factory rejected parameters");
            SpecError::InvalidParameters {
                name: name.to_string(),
                reason: format!("rejected parameters {}", Value::from(params_as_map(params))),
            }
        })
    }

    /// Build a specification tree from a RuleConfig.
    ///
    /// Fails on the first unknown leaf, rejected parameter set, or empty
    /// `and`/`or` group.
    pub fn build(&self, config: &RuleConfig) -> SpecResult<BoxedSpec<T>> {
        let spec = self.build_node(config)?;
        debug!(leaves = config.leaf_count(), "Built specification tree from config");
        Ok(spec)
    }

    fn build_node(&self, config: &RuleConfig) -> SpecResult<BoxedSpec<T>> {
        match config {
            RuleConfig::Spec { name, params } => self.create(name, params),
            RuleConfig::And { rules } => {
                let specs = self.build_children(rules)?;
                Ok(Arc::new(AllOf::new(specs)?))
            }
            RuleConfig::Or { rules } => {
                let specs = self.build_children(rules)?;
                Ok(Arc::new(AnyOf::new(specs)?))
            }
            RuleConfig::Not { rule } => {
                let inner = self.build_node(rule)?;
                Ok(Arc::new(Not::new(inner)))
            }
        }
    }

    fn build_children(&self, rules: &[RuleConfig]) -> SpecResult<Vec<BoxedSpec<T>>> {
        rules.iter().map(|r| self.build_node(r)).collect()
    }

    /// Validate a RuleConfig without building it.
    ///
    /// Returns every problem found rather than stopping at the first.
    pub fn validate(&self, config: &RuleConfig) -> Vec<String> {
        let mut errors = Vec::new();
        self.validate_recursive(config, &mut errors);
        errors
    }

    fn validate_recursive(&self, config: &RuleConfig, errors: &mut Vec<String>) {
        match config {
            RuleConfig::Spec { name, params } => {
                if let Err(err) = self.create(name, params) {
                    errors.push(err.to_string());
                }
            }
            RuleConfig::And { rules } | RuleConfig::Or { rules } => {
                if rules.is_empty() {
                    errors.push("Empty AND/OR rule list".to_string());
                }
                for rule in rules {
                    self.validate_recursive(rule, errors);
                }
            }
            RuleConfig::Not { rule } => {
                self.validate_recursive(rule, errors);
            }
        }
    }
}

fn params_as_map(params: &HashMap<String, Value>) -> serde_json::Map<String, Value> {
    params
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specification::{Specification, from_fn};

    fn number_registry() -> SpecRegistry<i64> {
        let mut registry = SpecRegistry::new();

        registry.register("positive", |_| Some(Arc::new(from_fn(|x: &i64| *x > 0))));

        registry.register("divisible_by", |params| {
            let divisor = params.get("value")?.as_i64()?;
            if divisor == 0 {
                return None;
            }
            Some(Arc::new(from_fn(move |x: &i64| x % divisor == 0)))
        });

        registry
    }

    #[test]
    fn test_registry_basic() {
        let registry = number_registry();

        assert!(registry.contains("positive"));
        assert!(registry.contains("divisible_by"));
        assert!(!registry.contains("NonExistent"));
        assert_eq!(registry.list(), vec!["divisible_by", "positive"]);
    }

    #[test]
    fn test_registry_create() {
        let registry = number_registry();

        assert!(registry.create("positive", &HashMap::new()).is_ok());

        let mut params = HashMap::new();
        params.insert("value".to_string(), serde_json::json!(3));
        let spec = registry.create("divisible_by", &params).unwrap();
        assert!(spec.is_satisfied_by(&9));
        assert!(!spec.is_satisfied_by(&10));

        let mut bad_params = HashMap::new();
        bad_params.insert("value".to_string(), serde_json::json!(0));
        let err = registry.create("divisible_by", &bad_params).err().unwrap();
        assert!(matches!(err, SpecError::InvalidParameters { .. }));

        let err = registry.create("NonExistent", &HashMap::new()).err().unwrap();
        assert!(matches!(err, SpecError::UnknownSpecification(_)));
    }

    #[test]
    fn test_build_from_config() {
        let registry = number_registry();

        let config = RuleConfig::or(vec![
            RuleConfig::and(vec![
                RuleConfig::spec("positive"),
                RuleConfig::spec_with_value("divisible_by", 4),
            ]),
            RuleConfig::not(RuleConfig::spec("positive")),
        ]);

        let spec = registry.build(&config).unwrap();
        assert!(spec.is_satisfied_by(&8));
        assert!(spec.is_satisfied_by(&-3));
        assert!(!spec.is_satisfied_by(&6));
    }

    #[test]
    fn test_build_rejects_empty_group() {
        let registry = number_registry();

        let err = registry.build(&RuleConfig::and(Vec::new())).err().unwrap();
        assert!(matches!(err, SpecError::InvalidComposition(_)));

        let nested = RuleConfig::not(RuleConfig::or(Vec::new()));
        let err = registry.build(&nested).err().unwrap();
        assert!(matches!(err, SpecError::InvalidComposition(_)));
    }

    #[test]
    fn test_validate_config() {
        let registry = number_registry();

        let config = RuleConfig::and(vec![RuleConfig::spec("positive")]);
        assert!(registry.validate(&config).is_empty());

        let bad_config = RuleConfig::and(vec![
            RuleConfig::spec("UnknownSpec"),
            RuleConfig::spec("divisible_by"),
            RuleConfig::or(Vec::new()),
        ]);
        let errors = registry.validate(&bad_config);
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("Unknown specification"));
        assert!(errors[1].contains("divisible_by"));
        assert_eq!(errors[2], "Empty AND/OR rule list");
    }
}
