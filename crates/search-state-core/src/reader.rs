//! Looking up a widget's current value.

use search_state_model::{
    Context, FlatState, IndexId, Result, SearchState, WidgetPath, WidgetProps,
};
use serde_json::Value;

use crate::classify::{is_multi_index, resolve_index_id};

/// Where a widget's value lives in the state tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location<'a> {
    /// `indices[index_id][namespace][attribute]`
    MultiIndexNamespace {
        index_id: &'a IndexId,
        namespace: &'a str,
        attribute: &'a str,
    },
    /// `indices[index_id][key]`
    MultiIndex { index_id: &'a IndexId, key: &'a str },
    /// `[namespace][attribute]`
    Namespace { namespace: &'a str, attribute: &'a str },
    /// `[key]`
    Shared { key: &'a str },
}

impl<'a> Location<'a> {
    pub fn resolve(path: &'a WidgetPath, index_id: &'a IndexId, multi_index: bool) -> Self {
        match (multi_index, path.namespace()) {
            (true, Some(namespace)) => Self::MultiIndexNamespace {
                index_id,
                namespace,
                attribute: path.attribute(),
            },
            (true, None) => Self::MultiIndex {
                index_id,
                key: path.key(),
            },
            (false, Some(namespace)) => Self::Namespace {
                namespace,
                attribute: path.attribute(),
            },
            (false, None) => Self::Shared { key: path.key() },
        }
    }
}

/// True iff the location holds an own entry for the widget, whatever its value.
pub fn has_refinements(state: &SearchState, location: Location<'_>) -> bool {
    get_refinements(state, location).is_some()
}

/// The value at `location`, if present.
pub fn get_refinements<'s>(state: &'s SearchState, location: Location<'_>) -> Option<&'s Value> {
    match location {
        Location::MultiIndexNamespace {
            index_id,
            namespace,
            attribute,
        } => state
            .index(index_id)
            .and_then(|partition| namespace_value(partition, namespace, attribute)),
        Location::MultiIndex { index_id, key } => {
            state.index(index_id).and_then(|partition| partition.get(key))
        }
        Location::Namespace {
            namespace,
            attribute,
        } => namespace_value(state.shared(), namespace, attribute),
        Location::Shared { key } => state.shared().get(key),
    }
}

fn namespace_value<'s>(partition: &'s FlatState, namespace: &str, attribute: &str) -> Option<&'s Value> {
    partition.namespace(namespace).and_then(|ns| ns.get(attribute))
}

/// The widget's current value: the live state entry when one exists (even a
/// falsy one), else the widget's declared default, else `default_value`.
pub fn get_current_refinement_value(
    props: &WidgetProps,
    state: &SearchState,
    context: &Context,
    id: &str,
    default_value: Value,
) -> Result<Value> {
    let index_id = resolve_index_id(context)?;
    let path = WidgetPath::parse(id);
    let location = Location::resolve(&path, index_id, is_multi_index(context));

    if let Some(value) = get_refinements(state, location) {
        return Ok(value.clone());
    }
    if let Some(value) = props.declared_default() {
        return Ok(value.clone());
    }
    Ok(default_value)
}
