//! Picking the results payload that belongs to a widget's index.

use search_state_model::{Context, HITS_KEY, Result, is_truthy};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::classify::resolve_index_id;

/// Results handed to connectors by the query layer.
///
/// `results` is either one payload carrying `hits`, or an object keyed by
/// index id when several indices are queried together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub results: Option<Value>,
}

impl SearchResults {
    pub fn single(payload: Value) -> Self {
        Self {
            results: Some(payload),
        }
    }

    fn is_keyed_by_index(&self) -> bool {
        self.results
            .as_ref()
            .is_some_and(|r| !r.get(HITS_KEY).is_some_and(is_truthy))
    }
}

/// The payload for the caller's index, if any.
pub fn get_results<'r>(
    search_results: &'r SearchResults,
    context: &Context,
) -> Result<Option<&'r Value>> {
    if search_results.is_keyed_by_index() {
        let index_id = resolve_index_id(context)?;
        return Ok(search_results
            .results
            .as_ref()
            .and_then(|r| r.get(index_id.as_str())));
    }
    Ok(search_results.results.as_ref())
}
