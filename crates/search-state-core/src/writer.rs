//! Writing a widget's refinement into the state tree.

use search_state_model::{
    Context, INDICES_KEY, IndexId, Refinement, Result, SearchState,
};
use tracing::{debug, trace, warn};

use crate::classify::{is_multi_index, resolve_index_id};

/// Returns a new state with `refinement` merged into the location the context
/// and `namespace` resolve to. The input state is left untouched and every
/// partition the write does not reach stays shared with it.
///
/// An empty `namespace` is treated as no namespace.
pub fn refine_value(
    state: &SearchState,
    refinement: &Refinement,
    context: &Context,
    reset_page: bool,
    namespace: Option<&str>,
) -> Result<SearchState> {
    let namespace = namespace.filter(|ns| !ns.is_empty());

    if is_multi_index(context) {
        let index_id = resolve_index_id(context)?;
        return Ok(match namespace {
            Some(namespace) => refine_multi_index_with_namespace(
                state, refinement, index_id, reset_page, namespace,
            ),
            None => refine_multi_index(state, refinement, index_id, reset_page),
        });
    }

    // A shared widget on a multi-index page restarts pagination of every panel.
    let mut next = state.clone();
    if reset_page {
        let first_page = Refinement::first_page();
        for index_id in state.index_ids() {
            trace!(index_id = %index_id, namespace = ?namespace, "cascading page reset");
            next = match namespace {
                Some(namespace) => refine_multi_index_with_namespace(
                    &next,
                    &first_page,
                    &index_id,
                    true,
                    namespace,
                ),
                None => refine_multi_index(&next, &first_page, &index_id, true),
            };
        }
    }

    Ok(match namespace {
        Some(namespace) => {
            refine_single_index_with_namespace(next, refinement, reset_page, namespace)
        }
        None => refine_single_index(next, refinement, reset_page),
    })
}

fn refine_multi_index(
    state: &SearchState,
    refinement: &Refinement,
    index_id: &IndexId,
    reset_page: bool,
) -> SearchState {
    debug!(index_id = %index_id, reset_page, "refine multi-index");
    let mut next = state.clone();
    let partition = next.index_entry_mut(index_id);
    partition.merge(refinement);
    if reset_page {
        partition.reset_page();
    }
    next
}

fn refine_multi_index_with_namespace(
    state: &SearchState,
    refinement: &Refinement,
    index_id: &IndexId,
    reset_page: bool,
    namespace: &str,
) -> SearchState {
    let existed = state.index(index_id).is_some();
    debug!(index_id = %index_id, namespace, existed, reset_page, "refine multi-index namespace");
    let mut next = state.clone();
    let partition = next.index_entry_mut(index_id);
    partition.merge_into_namespace(namespace, refinement);
    // An existing partition always restarts pagination. A new one only gets a
    // page when asked for.
    if existed || reset_page {
        partition.reset_page();
    }
    next
}

fn refine_single_index(
    mut state: SearchState,
    refinement: &Refinement,
    reset_page: bool,
) -> SearchState {
    debug!(reset_page, "refine single-index");
    let shared = state.shared_mut();
    for (key, value) in refinement.iter() {
        if key == INDICES_KEY {
            warn!(key = %key, "ignoring refinement of reserved key");
            continue;
        }
        shared.insert(key.clone(), value.clone());
    }
    if reset_page {
        shared.reset_page();
    }
    state
}

fn refine_single_index_with_namespace(
    mut state: SearchState,
    refinement: &Refinement,
    reset_page: bool,
    namespace: &str,
) -> SearchState {
    debug!(namespace, reset_page, "refine single-index namespace");
    let shared = state.shared_mut();
    if namespace == INDICES_KEY {
        warn!(namespace, "ignoring refinement of reserved key");
    } else {
        shared.merge_into_namespace(namespace, refinement);
    }
    if reset_page {
        shared.reset_page();
    }
    state
}
