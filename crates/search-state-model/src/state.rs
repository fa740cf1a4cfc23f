//! The search state tree.
//!
//! A state is either flat (one bag of properties for a single index) or
//! partitioned, where the reserved `indices` key holds one flat partition per
//! targeted index next to the shared top-level properties.
//!
//! Values are held behind `Arc`, so cloning a state is shallow and every
//! entry a write does not touch stays shared with the previous version.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::keys::{FIRST_PAGE, INDICES_KEY, PAGE_KEY};
use crate::{IndexId, Refinement, Result, StateError};

/// A flat mapping from property key to value.
///
/// Object-valued entries double as namespaces: compound widgets such as
/// `range.price` keep their attribute inside the `range` object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatState {
    entries: BTreeMap<String, Arc<Value>>,
}

impl FlatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key).map(AsRef::as_ref)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), Arc::new(value));
    }

    /// Removes `key`. Returns whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Shallow merge: every key of `refinement` replaces the entry of the same
    /// name, all other entries are kept as they are.
    pub fn merge(&mut self, refinement: &Refinement) {
        for (key, value) in refinement.iter() {
            self.insert(key.clone(), value.clone());
        }
    }

    /// The namespace sub-object stored under `namespace`, if it is an object.
    pub fn namespace(&self, namespace: &str) -> Option<&Map<String, Value>> {
        self.get(namespace).and_then(Value::as_object)
    }

    pub fn namespace_contains(&self, namespace: &str, attribute: &str) -> bool {
        self.namespace(namespace)
            .is_some_and(|ns| ns.contains_key(attribute))
    }

    /// Shallow-merges `refinement` into the namespace object, creating it when
    /// absent. A non-object value under `namespace` is replaced.
    ///
    /// The namespace object is copied only when another state still shares it.
    pub fn merge_into_namespace(&mut self, namespace: &str, refinement: &Refinement) {
        let inner = self.namespace_mut(namespace);
        inner.extend(refinement.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// Drops `attribute` from the namespace object. The namespace object itself
    /// stays, even when left empty. Returns whether anything was removed.
    pub fn remove_from_namespace(&mut self, namespace: &str, attribute: &str) -> bool {
        if !self.namespace_contains(namespace, attribute) {
            return false;
        }
        self.namespace_mut(namespace).remove(attribute);
        true
    }

    fn namespace_mut(&mut self, namespace: &str) -> &mut Map<String, Value> {
        let entry = self
            .entries
            .entry(namespace.to_string())
            .or_insert_with(|| Arc::new(Value::Object(Map::new())));
        let value = Arc::make_mut(entry);
        if !value.is_object() {
            *value = Value::Object(Map::new());
        }
        match value {
            Value::Object(inner) => inner,
            _ => unreachable!("namespace entry was replaced by an object above"),
        }
    }

    pub fn page(&self) -> Option<&Value> {
        self.get(PAGE_KEY)
    }

    pub fn reset_page(&mut self) {
        self.insert(PAGE_KEY, Value::from(FIRST_PAGE));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when both states hold the very same allocation for `key`.
    pub fn shares_entry(&self, other: &Self, key: &str) -> bool {
        match (self.entries.get(key), other.entries.get(key)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn to_value(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    fn from_map(map: Map<String, Value>) -> Self {
        Self {
            entries: map.into_iter().map(|(k, v)| (k, Arc::new(v))).collect(),
        }
    }
}

impl Serialize for FlatState {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value.as_ref())?;
        }
        map.end()
    }
}

/// Per-index partitions of a multi-index state.
pub type Indices = BTreeMap<IndexId, Arc<FlatState>>;

/// Everything a user has configured, as one immutable tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    /// Single-index configuration.
    Flat(FlatState),
    /// Multi-index configuration. `shared` holds widgets rendered outside any
    /// index panel.
    Partitioned { shared: FlatState, indices: Indices },
}

impl Default for SearchState {
    fn default() -> Self {
        Self::Flat(FlatState::default())
    }
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_partitioned(&self) -> bool {
        matches!(self, Self::Partitioned { .. })
    }

    /// Top-level properties, outside any index partition.
    pub fn shared(&self) -> &FlatState {
        match self {
            Self::Flat(shared) | Self::Partitioned { shared, .. } => shared,
        }
    }

    pub fn shared_mut(&mut self) -> &mut FlatState {
        match self {
            Self::Flat(shared) | Self::Partitioned { shared, .. } => shared,
        }
    }

    pub fn indices(&self) -> Option<&Indices> {
        match self {
            Self::Flat(_) => None,
            Self::Partitioned { indices, .. } => Some(indices),
        }
    }

    pub fn index(&self, index_id: &IndexId) -> Option<&FlatState> {
        self.indices()
            .and_then(|indices| indices.get(index_id))
            .map(AsRef::as_ref)
    }

    /// Snapshot of the index keys currently present.
    pub fn index_ids(&self) -> Vec<IndexId> {
        self.indices()
            .map(|indices| indices.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Mutable access to the partition of `index_id`, creating it (and the
    /// `indices` tree) when absent. Other partitions stay shared.
    pub fn index_entry_mut(&mut self, index_id: &IndexId) -> &mut FlatState {
        if let Self::Flat(shared) = self {
            *self = Self::Partitioned {
                shared: std::mem::take(shared),
                indices: Indices::new(),
            };
        }
        match self {
            Self::Partitioned { indices, .. } => {
                Arc::make_mut(indices.entry(index_id.clone()).or_default())
            }
            Self::Flat(_) => unreachable!("state was converted to partitioned above"),
        }
    }

    /// Mutable access to an existing partition only.
    pub fn existing_index_mut(&mut self, index_id: &IndexId) -> Option<&mut FlatState> {
        match self {
            Self::Flat(_) => None,
            Self::Partitioned { indices, .. } => indices.get_mut(index_id).map(Arc::make_mut),
        }
    }

    /// True when both states hold the very same partition for `index_id`.
    pub fn shares_index(&self, other: &Self, index_id: &IndexId) -> bool {
        match (
            self.indices().and_then(|i| i.get(index_id)),
            other.indices().and_then(|i| i.get(index_id)),
        ) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(StateError::InvalidState(
                "search state must be an object".to_string(),
            ));
        };
        let Some(raw_indices) = map.remove(INDICES_KEY) else {
            return Ok(Self::Flat(FlatState::from_map(map)));
        };
        let Value::Object(raw_indices) = raw_indices else {
            return Err(StateError::InvalidState(format!(
                "`{INDICES_KEY}` must be an object"
            )));
        };
        let mut indices = Indices::new();
        for (index_id, partition) in raw_indices {
            let Value::Object(partition) = partition else {
                return Err(StateError::InvalidState(format!(
                    "partition `{index_id}` must be an object"
                )));
            };
            indices.insert(
                IndexId::new(index_id)?,
                Arc::new(FlatState::from_map(partition)),
            );
        }
        Ok(Self::Partitioned {
            shared: FlatState::from_map(map),
            indices,
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    pub fn to_value(&self) -> Value {
        let mut map: Map<String, Value> = self
            .shared()
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        if let Some(indices) = self.indices() {
            let partitions = indices
                .iter()
                .map(|(id, partition)| (id.to_string(), partition.to_value()))
                .collect();
            map.insert(INDICES_KEY.to_string(), Value::Object(partitions));
        }
        Value::Object(map)
    }
}

impl Serialize for SearchState {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let shared = self.shared();
        let len = shared.len() + usize::from(self.is_partitioned());
        let mut map = serializer.serialize_map(Some(len))?;
        for (key, value) in shared.iter() {
            map.serialize_entry(key, value)?;
        }
        if let Some(indices) = self.indices() {
            let partitions: BTreeMap<&str, &FlatState> = indices
                .iter()
                .map(|(id, partition)| (id.as_str(), partition.as_ref()))
                .collect();
            map.serialize_entry(INDICES_KEY, &partitions)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SearchState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn index(id: &str) -> IndexId {
        IndexId::new(id).unwrap()
    }

    #[test]
    fn indices_key_selects_partitioned_variant() {
        let state = SearchState::from_value(json!({"query": "a", "indices": {"A": {"q": "x"}}}))
            .unwrap();
        assert!(state.is_partitioned());
        assert_eq!(state.shared().get("query"), Some(&json!("a")));
        assert_eq!(state.index(&index("A")).unwrap().get("q"), Some(&json!("x")));
    }

    #[test]
    fn rejects_non_object_partitions() {
        assert!(SearchState::from_value(json!({"indices": []})).is_err());
        assert!(SearchState::from_value(json!({"indices": {"A": 1}})).is_err());
        assert!(SearchState::from_value(json!([1, 2])).is_err());
    }

    #[test]
    fn empty_indices_tree_is_still_partitioned() {
        let state = SearchState::from_value(json!({"indices": {}})).unwrap();
        assert!(state.is_partitioned());
        assert_eq!(state.to_value(), json!({"indices": {}}));
    }

    #[test]
    fn serialize_matches_to_value() {
        let source = json!({"page": 2, "range": {"price": "1:10"}, "indices": {"B": {"q": "y"}}});
        let state = SearchState::from_value(source.clone()).unwrap();
        assert_eq!(serde_json::to_value(&state).unwrap(), source);
        assert_eq!(state.to_value(), source);
    }

    #[test]
    fn index_entry_mut_converts_flat_state() {
        let mut state = SearchState::from_value(json!({"query": "a"})).unwrap();
        state.index_entry_mut(&index("A")).insert("q", json!("x"));
        assert_eq!(state.to_value(), json!({"query": "a", "indices": {"A": {"q": "x"}}}));
    }

    #[test]
    fn clones_share_untouched_partitions() {
        let state = SearchState::from_value(json!({"indices": {"A": {"q": "x"}, "B": {"q": "y"}}}))
            .unwrap();
        let mut next = state.clone();
        next.index_entry_mut(&index("B")).insert("q", json!("z"));
        assert!(next.shares_index(&state, &index("A")));
        assert!(!next.shares_index(&state, &index("B")));
    }

    #[test]
    fn namespace_merge_keeps_siblings() {
        let mut flat = FlatState::new();
        flat.insert("range", json!({"price": "1:2"}));
        flat.merge_into_namespace("range", &Refinement::new().with("rating", json!("3:5")));
        assert_eq!(flat.get("range"), Some(&json!({"price": "1:2", "rating": "3:5"})));
    }

    #[test]
    fn namespace_merge_shares_untouched_entries() {
        let mut before = FlatState::new();
        before.insert("range", json!({"price": "1:2"}));
        before.insert("menu", json!({"category": "phones"}));

        let mut after = before.clone();
        after.merge_into_namespace("range", &Refinement::new().with("rating", json!("3:5")));
        assert!(after.shares_entry(&before, "menu"));
        assert!(!after.shares_entry(&before, "range"));
        assert_eq!(before.get("range"), Some(&json!({"price": "1:2"})));
    }

    #[test]
    fn namespace_merge_replaces_scalar_value() {
        let mut flat = FlatState::new();
        flat.insert("range", json!(3));
        flat.merge_into_namespace("range", &Refinement::new().with("price", json!("1:2")));
        assert_eq!(flat.get("range"), Some(&json!({"price": "1:2"})));
    }

    #[test]
    fn removing_last_namespace_attribute_keeps_empty_object() {
        let mut flat = FlatState::new();
        flat.insert("range", json!({"price": "1:2"}));
        assert!(flat.remove_from_namespace("range", "price"));
        assert_eq!(flat.get("range"), Some(&json!({})));
        assert!(!flat.remove_from_namespace("range", "price"));
    }
}
