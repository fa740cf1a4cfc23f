//! Flattening a state into one row per widget-owned entry.

use search_state_model::{FlatState, IndexId, SearchState};
use serde::Serialize;
use serde_json::Value;

/// One widget-owned value and where it lives.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateEntry<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<&'a IndexId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<&'a str>,
    pub key: &'a str,
    pub value: &'a Value,
}

impl StateEntry<'_> {
    /// The widget id that reads this entry.
    pub fn widget_id(&self) -> String {
        match self.namespace {
            Some(namespace) => format!("{namespace}.{}", self.key),
            None => self.key.to_string(),
        }
    }
}

/// Every entry of `state`, shared ones first, then partition by partition.
/// Object values are expanded as namespaces.
pub fn widget_entries(state: &SearchState) -> Vec<StateEntry<'_>> {
    let mut entries = Vec::new();
    push_partition(&mut entries, None, state.shared());
    if let Some(indices) = state.indices() {
        for (index_id, partition) in indices {
            push_partition(&mut entries, Some(index_id), partition);
        }
    }
    entries
}

fn push_partition<'a>(
    entries: &mut Vec<StateEntry<'a>>,
    index: Option<&'a IndexId>,
    partition: &'a FlatState,
) {
    for (key, value) in partition.iter() {
        match value {
            Value::Object(inner) if !inner.is_empty() => {
                entries.extend(inner.iter().map(|(attribute, value)| StateEntry {
                    index,
                    namespace: Some(key),
                    key: attribute,
                    value,
                }));
            }
            _ => entries.push(StateEntry {
                index,
                namespace: None,
                key,
                value,
            }),
        }
    }
}
