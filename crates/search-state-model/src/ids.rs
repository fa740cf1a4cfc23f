#![deny(unsafe_code)]

use std::fmt;

use crate::StateError;

/// Identifier of a search index targeted by a widget.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct IndexId(String);

impl IndexId {
    pub fn new(value: impl Into<String>) -> Result<Self, StateError> {
        let value = value.into();
        if value.is_empty() {
            return Err(StateError::InvalidIndexId(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for IndexId {
    type Error = StateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IndexId> for String {
    fn from(value: IndexId) -> Self {
        value.0
    }
}

impl fmt::Display for IndexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A widget identifier split into its namespace and attribute parts.
///
/// `"multiRange.price"` has namespace `multiRange` and attribute `price`.
/// Only the first dot separates the two, so `"range.a.b"` has attribute `a.b`.
/// An id without a dot has no namespace and its attribute is the whole id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetPath {
    id: String,
    namespace: Option<String>,
    attribute: String,
}

impl WidgetPath {
    pub fn parse(id: &str) -> Self {
        match id.split_once('.') {
            Some((namespace, attribute)) => Self {
                id: id.to_string(),
                namespace: Some(namespace.to_string()),
                attribute: attribute.to_string(),
            },
            None => Self {
                id: id.to_string(),
                namespace: None,
                attribute: id.to_string(),
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The namespace exactly as written, including an empty one (`".x"`).
    pub fn raw_namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The namespace to group under. Empty namespaces count as none.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref().filter(|ns| !ns.is_empty())
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Key the widget owns inside its location: the attribute when namespaced,
    /// the full id otherwise.
    pub fn key(&self) -> &str {
        if self.namespace().is_some() {
            &self.attribute
        } else {
            &self.id
        }
    }
}

impl fmt::Display for WidgetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_dot_only() {
        let path = WidgetPath::parse("range.price.min");
        assert_eq!(path.namespace(), Some("range"));
        assert_eq!(path.attribute(), "price.min");
        assert_eq!(path.key(), "price.min");
    }

    #[test]
    fn id_without_dot_has_no_namespace() {
        let path = WidgetPath::parse("query");
        assert_eq!(path.namespace(), None);
        assert_eq!(path.attribute(), "query");
        assert_eq!(path.key(), "query");
    }

    #[test]
    fn empty_namespace_is_kept_raw_but_ignored() {
        let path = WidgetPath::parse(".price");
        assert_eq!(path.raw_namespace(), Some(""));
        assert_eq!(path.namespace(), None);
        assert_eq!(path.attribute(), "price");
        assert_eq!(path.key(), ".price");
    }

    #[test]
    fn empty_id_is_total() {
        let path = WidgetPath::parse("");
        assert_eq!(path.namespace(), None);
        assert_eq!(path.attribute(), "");
    }

    #[test]
    fn index_id_rejects_empty() {
        assert!(IndexId::new("").is_err());
        assert_eq!(IndexId::new("products").unwrap().as_str(), "products");
    }

    #[test]
    fn index_id_deserialization_validates() {
        let ok: IndexId = serde_json::from_str("\"products\"").unwrap();
        assert_eq!(ok.to_string(), "products");
        assert!(serde_json::from_str::<IndexId>("\"\"").is_err());
    }
}
