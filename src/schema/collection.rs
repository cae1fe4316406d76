//! Collection and site configuration.
//!
//! A site is a list of collections; each collection names the path its
//! entities are stored under and the properties of those entities. Both
//! are plain serde types loaded from JSON:
//!
//! ```json
//! {
//!   "name": "Test site",
//!   "collections": [{
//!     "path": "products",
//!     "name": "Products",
//!     "properties": { "name": { "dataType": "string", "validation": { "required": true } } },
//!     "subcollections": [{ "path": "locales", "name": "Locale", "properties": {} }]
//!   }]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::defaults::get_default_values_for;
use crate::model::EntityValues;
use crate::Result;
use super::property::{Properties, PropertyOrBuilder};
use super::resolve::{ResolvedProperties, resolve_properties};
use super::PropertyContext;

/// Schema of one collection of entities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityCollection {
    pub path: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default)]
    pub properties: Properties,
    /// Display order of the properties; keys not listed follow in declaration order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties_order: Option<Vec<String>>,
    #[serde(default)]
    pub text_search_enabled: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcollections: Vec<EntityCollection>,
}

impl EntityCollection {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_property(
        mut self,
        key: impl Into<String>,
        property: impl Into<PropertyOrBuilder>,
    ) -> Self {
        self.properties.insert(key.into(), property.into());
        self
    }

    pub fn with_subcollection(mut self, collection: EntityCollection) -> Self {
        self.subcollections.push(collection);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let collection: Self = serde_json::from_str(json)?;
        debug!(path = %collection.path, properties = collection.properties.len(), "loaded collection");
        Ok(collection)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Property keys in display order.
    pub fn ordered_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::with_capacity(self.properties.len());
        if let Some(order) = &self.properties_order {
            for key in order {
                if self.properties.contains_key(key) && !keys.contains(&key.as_str()) {
                    keys.push(key);
                }
            }
        }
        for key in self.properties.keys() {
            if !keys.contains(&key.as_str()) {
                keys.push(key);
            }
        }
        keys
    }

    /// Initial form state for a new entity of this collection.
    pub fn default_values(&self) -> EntityValues {
        get_default_values_for(&self.properties)
    }

    pub fn resolve_properties(&self, context: &PropertyContext<'_>) -> ResolvedProperties {
        resolve_properties(&self.properties, context)
    }
}

/// Top-level configuration: every collection the site manages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub name: String,
    #[serde(default)]
    pub collections: Vec<EntityCollection>,
}

impl SiteConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        debug!(name = %config.name, collections = config.collections.len(), "loaded site config");
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Find the collection serving `path`.
    ///
    /// Subcollections are addressed through their parent entity, so
    /// `products/abc/locales` resolves to the `locales` subcollection of
    /// `products`.
    pub fn find_collection(&self, path: &str) -> Option<&EntityCollection> {
        find_in(&self.collections, path.trim_matches('/'))
    }
}

fn find_in<'a>(collections: &'a [EntityCollection], path: &str) -> Option<&'a EntityCollection> {
    for collection in collections {
        let base = collection.path.trim_matches('/');
        if path == base {
            return Some(collection);
        }
        // "<base>/<entity id>/<subcollection path>"
        let nested = path
            .strip_prefix(base)
            .and_then(|rest| rest.strip_prefix('/'))
            .and_then(|rest| rest.split_once('/'))
            .and_then(|(_, sub)| find_in(&collection.subcollections, sub));
        if nested.is_some() {
            return nested;
        }
    }
    None
}
