//! Dotted access paths into serialized rows.

use std::fmt;

use serde_json::Value;
use ustr::Ustr;

use super::TableError;

/// Dotted path to one leaf field of a row, e.g. `address.street`.
///
/// Paths are interned with [`Ustr`] since they are compared and copied
/// on every frame while rendering and sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessPath(Ustr);

impl AccessPath {
    pub fn new(path: &str) -> Self {
        Self(Ustr::from(path))
    }

    /// Path to `key` below this one.
    pub fn child(&self, key: &str) -> Self {
        Self(Ustr::from(format!("{}.{key}", self.0).as_str()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.as_str().split('.')
    }

    /// Walks `value` one object key per segment.
    ///
    /// Only objects are traversed. A missing key, or a segment that lands on
    /// a non-object, is reported as [`TableError::UnknownPath`].
    pub fn resolve<'v>(&self, value: &'v Value) -> Result<&'v Value, TableError> {
        self.segments().try_fold(value, |current, segment| {
            current
                .as_object()
                .and_then(|object| object.get(segment))
                .ok_or_else(|| TableError::UnknownPath {
                    path: self.to_string(),
                })
        })
    }
}

impl fmt::Display for AccessPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for AccessPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_child_joins_with_dot() {
        let path = AccessPath::new("address").child("town");
        assert_eq!(path.as_str(), "address.town");
        assert_eq!(path.segments().collect::<Vec<_>>(), ["address", "town"]);
    }

    #[test]
    fn test_resolve_nested_value() {
        let row = json!({ "id": 1, "address": { "town": "Gießen" } });
        let value = AccessPath::new("address.town").resolve(&row);
        assert_eq!(value, Ok(&json!("Gießen")));
    }

    #[test]
    fn test_resolve_keeps_falsy_values() {
        let row = json!({ "count": 0, "flag": false, "name": "" });
        assert_eq!(AccessPath::new("count").resolve(&row), Ok(&json!(0)));
        assert_eq!(AccessPath::new("flag").resolve(&row), Ok(&json!(false)));
        assert_eq!(AccessPath::new("name").resolve(&row), Ok(&json!("")));
    }

    #[test]
    fn test_resolve_missing_key_is_an_error() {
        let row = json!({ "address": { "town": "Gießen" } });
        let err = AccessPath::new("address.street").resolve(&row).unwrap_err();
        assert_eq!(
            err,
            TableError::UnknownPath {
                path: "address.street".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_through_primitive_is_an_error() {
        let row = json!({ "name": "x" });
        assert!(AccessPath::new("name.first").resolve(&row).is_err());
    }
}
