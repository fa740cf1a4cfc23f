//! Removing a widget's contribution when it unmounts.

use search_state_model::{Context, INDICES_KEY, Result, SearchState, WidgetPath};
use tracing::{debug, warn};

use crate::classify::{is_multi_index, resolve_index_id};

/// Returns a new state without the widget's own entry.
///
/// Sibling entries are kept at every level, and a namespace object stays in
/// place even when its last attribute goes. Cleaning an entry that does not
/// exist returns an equal state.
pub fn clean_up_value(state: &SearchState, context: &Context, id: &str) -> Result<SearchState> {
    let index_id = resolve_index_id(context)?;
    let path = WidgetPath::parse(id);
    let mut next = state.clone();

    if is_multi_index(context) && state.is_partitioned() {
        debug!(index_id = %index_id, widget = %path, "clean up multi-index");
        let Some(partition) = state.index(index_id) else {
            return Ok(next);
        };
        let removed = match path.namespace() {
            Some(namespace) if partition.namespace_contains(namespace, path.attribute()) => next
                .existing_index_mut(index_id)
                .is_some_and(|p| p.remove_from_namespace(namespace, path.attribute())),
            Some(_) => false,
            None if partition.contains_key(path.key()) => next
                .existing_index_mut(index_id)
                .is_some_and(|p| p.remove(path.key())),
            None => false,
        };
        debug!(removed, "multi-index clean up done");
        return Ok(next);
    }

    debug!(widget = %path, "clean up single-index");
    let shared = state.shared();
    match path.namespace() {
        Some(namespace) => {
            if shared.namespace_contains(namespace, path.attribute()) {
                next.shared_mut()
                    .remove_from_namespace(namespace, path.attribute());
            }
        }
        None if path.key() == INDICES_KEY => {
            warn!(widget = %path, "refusing to clean up reserved key");
        }
        None => {
            if shared.contains_key(path.key()) {
                next.shared_mut().remove(path.key());
            }
        }
    }
    Ok(next)
}
