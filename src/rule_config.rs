//! JSON configuration for building specification trees at runtime.
//!
//! A rule tree is described as data and turned into a live specification by
//! [`SpecRegistry::build`](crate::registry::SpecRegistry::build).

use std::collections::HashMap;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::SpecResult;

/// JSON representation of a rule configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleConfig {
    /// A single leaf specification by registered name
    Spec {
        name: String,
        #[serde(default)]
        params: HashMap<String, serde_json::Value>,
    },
    /// AND combination of rules
    And { rules: Vec<RuleConfig> },
    /// OR combination of rules
    Or { rules: Vec<RuleConfig> },
    /// Negation of a rule
    Not { rule: Box<RuleConfig> },
}

impl RuleConfig {
    /// Create a new spec rule
    pub fn spec(name: impl Into<String>) -> Self {
        RuleConfig::Spec {
            name: name.into(),
            params: HashMap::new(),
        }
    }

    /// Create a new spec rule with parameters
    pub fn spec_with_params(
        name: impl Into<String>,
        params: HashMap<String, serde_json::Value>,
    ) -> Self {
        RuleConfig::Spec {
            name: name.into(),
            params,
        }
    }

    /// Create a spec rule with a single `value` parameter
    pub fn spec_with_value(name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        let mut params = HashMap::new();
        params.insert("value".to_string(), value.into());
        Self::spec_with_params(name, params)
    }

    /// Create an AND combination
    pub fn and(rules: Vec<RuleConfig>) -> Self {
        RuleConfig::And { rules }
    }

    /// Create an OR combination
    pub fn or(rules: Vec<RuleConfig>) -> Self {
        RuleConfig::Or { rules }
    }

    /// Create a NOT wrapper
    pub fn not(rule: RuleConfig) -> Self {
        RuleConfig::Not {
            rule: Box::new(rule),
        }
    }

    /// Parse a rule tree from a JSON string
    pub fn from_json(json: &str) -> SpecResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a rule tree from any reader, e.g. an open rule file
    pub fn from_reader<R: Read>(reader: R) -> SpecResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Serialize the rule tree to pretty-printed JSON
    pub fn to_json(&self) -> SpecResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of leaf specifications referenced by this tree
    pub fn leaf_count(&self) -> usize {
        match self {
            RuleConfig::Spec { .. } => 1,
            RuleConfig::And { rules } | RuleConfig::Or { rules } => {
                rules.iter().map(RuleConfig::leaf_count).sum()
            }
            RuleConfig::Not { rule } => rule.leaf_count(),
        }
    }
}

/// A named rule configuration for storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedRuleConfig {
    pub name: String,
    pub description: Option<String>,
    pub rule: RuleConfig,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl NamedRuleConfig {
    /// Parse a JSON array of named rules from a reader.
    pub fn load_all<R: Read>(reader: R) -> SpecResult<Vec<Self>> {
        Ok(serde_json::from_reader(reader)?)
    }
}
