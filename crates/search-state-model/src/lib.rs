pub mod context;
pub mod error;
pub mod ids;
pub mod keys;
pub mod refinement;
pub mod state;

pub use context::{Context, MultiIndexContext};
pub use error::{Result, StateError};
pub use ids::{IndexId, WidgetPath};
pub use keys::{FIRST_PAGE, HITS_KEY, INDICES_KEY, PAGE_KEY};
pub use refinement::{Refinement, WidgetProps, is_truthy};
pub use state::{FlatState, Indices, SearchState};
