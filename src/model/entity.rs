//! Entities, references between them, and their save status.

use std::fmt;

use serde::{Deserialize, Serialize};
use super::{EntityValues, Value};

/// Pointer to an entity stored under `path` with identifier `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityReference {
    pub id: String,
    pub path: String,
}

impl EntityReference {
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self { id: id.into(), path: path.into() }
    }

    /// Full document path, e.g. `products/abc`.
    pub fn path_with_id(&self) -> String {
        format!("{}/{}", self.path, self.id)
    }
}

impl fmt::Display for EntityReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.path, self.id)
    }
}

/// Lifecycle status of the entity being saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityStatus {
    /// Never persisted.
    New,
    /// Already persisted, being updated.
    Existing,
    /// Duplicated from an existing entity, persisted as a new one.
    Copy,
}

/// An entity instance: its identity plus its values tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub path: String,
    pub values: EntityValues,
}

impl Entity {
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            values: EntityValues::new(),
        }
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_paths() {
        let r = EntityReference::new("abc", "products");
        assert_eq!(r.path_with_id(), "products/abc");
        assert_eq!(r.to_string(), "products/abc");
    }

    #[test]
    fn test_status_serde_names() {
        assert_eq!(serde_json::to_string(&EntityStatus::Existing).unwrap(), "\"existing\"");
        let s: EntityStatus = serde_json::from_str("\"copy\"").unwrap();
        assert_eq!(s, EntityStatus::Copy);
    }
}
