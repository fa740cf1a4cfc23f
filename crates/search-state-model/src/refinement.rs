use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::keys::{FIRST_PAGE, PAGE_KEY};
use crate::{Result, StateError};

/// A partial object shallow-merged into the location a widget resolves to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Refinement(Map<String, Value>);

impl Refinement {
    pub fn new() -> Self {
        Self::default()
    }

    /// A refinement resetting pagination to the first page.
    pub fn first_page() -> Self {
        Self::new().with(PAGE_KEY, Value::from(FIRST_PAGE))
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Refinement {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Refinement {
    type Error = StateError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(StateError::InvalidState(format!(
                "refinement must be an object, got {other}"
            ))),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Refinement {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Static properties a widget declares.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_refinement: Option<Value>,
}

impl WidgetProps {
    pub fn with_default_refinement(value: Value) -> Self {
        Self {
            default_refinement: Some(value),
        }
    }

    /// The static default, if one is declared.
    ///
    /// `null`, `false`, `0` and `""` count as not declared.
    pub fn declared_default(&self) -> Option<&Value> {
        self.default_refinement.as_ref().filter(|v| is_truthy(v))
    }
}

/// Whether a value counts as set in a widget declaration.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
