//! EntityValues: the values tree of one entity instance.

use std::collections::HashMap;
use super::Value;

/// A map of field keys to values.
///
/// Mirrors the shape of the property schema it is paired with, but is not
/// self-describing: a traversal always needs the schema alongside it.
pub type EntityValues = HashMap<String, Value>;

/// Build an `EntityValues` from (key, value) pairs.
pub fn entity_values<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> EntityValues
where
    K: Into<String>,
    V: Into<Value>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}
