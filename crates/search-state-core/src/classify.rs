//! Context classification: single- versus multi-index mode.

use search_state_model::{Context, IndexId, Result, StateError};

/// True iff the caller is scoped to one index of a multi-index application.
pub fn is_multi_index(context: &Context) -> bool {
    context.multi_index_context.is_some()
}

/// The index the caller reads from and writes to.
///
/// Multi-index callers get their targeted index, everyone else the main index.
pub fn resolve_index_id(context: &Context) -> Result<&IndexId> {
    match (&context.multi_index_context, &context.main_targeted_index) {
        (Some(multi), _) => Ok(&multi.targeted_index),
        (None, Some(main)) => Ok(main),
        (None, None) => Err(StateError::InvalidContext),
    }
}
