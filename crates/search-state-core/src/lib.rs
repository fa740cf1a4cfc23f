//! Refinement bookkeeping for search widgets.
//!
//! Every function here is pure: it takes the current [`SearchState`] and
//! returns a new one (or a value read from it). Widgets are addressed by an id
//! of the form `namespace.attribute` and scoped by a [`Context`] that says
//! whether the application queries one index or several at once.

pub mod classify;
pub mod cleaner;
pub mod connector;
pub mod inspect;
pub mod path;
pub mod reader;
pub mod results;
pub mod writer;

pub use classify::{is_multi_index, resolve_index_id};
pub use cleaner::clean_up_value;
pub use connector::Connector;
pub use inspect::{StateEntry, widget_entries};
pub use path::split_widget_id;
pub use reader::{Location, get_current_refinement_value, get_refinements, has_refinements};
pub use results::{SearchResults, get_results};
pub use writer::refine_value;

pub use search_state_model::{
    Context, IndexId, Refinement, SearchState, StateError, WidgetPath, WidgetProps,
};
