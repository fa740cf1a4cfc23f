//! CLI library components for the search state tool.

pub mod input;
pub mod logging;
