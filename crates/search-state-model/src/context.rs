//! Caller scoping supplied by the application shell on every call.

use serde::{Deserialize, Serialize};

use crate::IndexId;

/// Scope of a widget rendered inside a per-index panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiIndexContext {
    /// Index the widget reads from and writes to.
    pub targeted_index: IndexId,
}

/// How the caller is scoped.
///
/// A context with `multi_index_context` operates in multi-index mode against
/// its targeted index. Otherwise the widget is in single-index mode and
/// `main_targeted_index` names the application's main index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    /// The application's default index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_targeted_index: Option<IndexId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_index_context: Option<MultiIndexContext>,
}

impl Context {
    /// Single-index context over `main_index`.
    pub fn single(main_index: IndexId) -> Self {
        Self {
            main_targeted_index: Some(main_index),
            multi_index_context: None,
        }
    }

    /// Multi-index context targeting `targeted_index`.
    pub fn multi(targeted_index: IndexId) -> Self {
        Self {
            main_targeted_index: None,
            multi_index_context: Some(MultiIndexContext { targeted_index }),
        }
    }

    #[must_use]
    pub fn with_main_index(mut self, main_index: IndexId) -> Self {
        self.main_targeted_index = Some(main_index);
        self
    }
}
