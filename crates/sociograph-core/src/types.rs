//! Core domain types for the social graph.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ── Custom attribute ──────────────────────────────────────────────

/// The operator-chosen property name applied to every person
/// (e.g. "profession", "hobby").
///
/// The name is interpolated into Cypher text when building the schema index
/// and property accessors, so it is restricted to a plain identifier:
/// `[A-Za-z_][A-Za-z0-9_]*`. The attribute *value* is always passed as a
/// query parameter and needs no such restriction.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AttributeName(String);

impl AttributeName {
    pub fn new(name: &str) -> Result<Self, ConfigError> {
        let mut chars = name.chars();
        let valid = match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        };
        if valid {
            Ok(Self(name.to_string()))
        } else {
            Err(ConfigError::InvalidAttribute {
                name: name.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AttributeName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AttributeName {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl<'de> Deserialize<'de> for AttributeName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        AttributeName::new(&raw).map_err(serde::de::Error::custom)
    }
}

// ── Result records ────────────────────────────────────────────────

/// A person as returned from the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonRecord {
    /// Unique identity key.
    pub name: String,
    pub city: String,
    /// Value of the operator-configured custom attribute.
    pub custom: String,
}

/// Aggregate counts over the whole graph.
///
/// `friendships` counts each undirected edge exactly once, regardless of
/// which endpoint created it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GraphStats {
    pub persons: u64,
    pub friendships: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_name_accepts_identifiers() {
        for name in ["profession", "hobby", "_internal", "age2", "snake_case"] {
            assert!(AttributeName::new(name).is_ok(), "rejected {name}");
        }
    }

    #[test]
    fn attribute_name_rejects_non_identifiers() {
        for name in ["", "2fast", "with space", "p.city", "a-b", "p}) DETACH DELETE (q"] {
            assert!(AttributeName::new(name).is_err(), "accepted {name:?}");
        }
    }

    #[test]
    fn attribute_name_roundtrips_display() {
        let attr: AttributeName = "profession".parse().unwrap();
        assert_eq!(attr.to_string(), "profession");
        assert_eq!(attr.as_str(), "profession");
    }
}
