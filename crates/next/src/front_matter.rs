//! Typed view over a document's front matter.

use mdxlayout_core::{FrontmatterExtraction, FrontmatterMap, PipelineError};
use serde_json::Value as JsonValue;

/// Reserved key holding the document's resource path.
pub const RESOURCE_PATH_KEY: &str = "__resourcePath";
/// Truthy value suppresses layout injection.
pub const NO_DEFAULT_LAYOUT_KEY: &str = "noDefaultLayout";
/// Names the layout to use instead of the default.
pub const LAYOUT_KEY: &str = "layout";

/// Front matter of one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    data: FrontmatterMap,
}

impl FrontMatter {
    /// Wraps an already parsed mapping.
    pub fn new(data: FrontmatterMap) -> Self {
        Self { data }
    }

    /// Takes the mapping out of an extraction result.
    pub fn from_extraction(extraction: FrontmatterExtraction) -> Self {
        Self::new(extraction.data)
    }

    /// Sets `__resourcePath`, replacing whatever the source declared.
    pub fn with_resource_path(mut self, resource_path: impl Into<String>) -> Self {
        self.data.insert(
            RESOURCE_PATH_KEY.to_string(),
            JsonValue::String(resource_path.into()),
        );
        self
    }

    /// Looks up a key.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.data.get(key)
    }

    /// The resource path, once set.
    pub fn resource_path(&self) -> Option<&str> {
        self.get(RESOURCE_PATH_KEY).and_then(JsonValue::as_str)
    }

    /// Whether layout injection is switched off for this document.
    pub fn no_default_layout(&self) -> bool {
        self.get(NO_DEFAULT_LAYOUT_KEY).is_some_and(is_truthy)
    }

    /// The layout name to resolve, falling back to `default` when unset or falsy.
    pub fn layout_name<'a>(&'a self, default: &'a str) -> Result<&'a str, PipelineError> {
        match self.get(LAYOUT_KEY) {
            Some(value) if is_truthy(value) => {
                value.as_str().ok_or_else(|| PipelineError::InvalidLayout {
                    value: value.to_string(),
                })
            }
            _ => Ok(default),
        }
    }

    /// The whole mapping as a JSON object.
    pub fn to_value(&self) -> JsonValue {
        JsonValue::Object(self.data.clone())
    }
}

/// JavaScript truthiness of a JSON value.
pub fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(value) => *value,
        JsonValue::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        JsonValue::String(value) => !value.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn front_matter(value: JsonValue) -> FrontMatter {
        match value {
            JsonValue::Object(map) => FrontMatter::new(map),
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn computed_resource_path_wins() {
        let fm = front_matter(json!({ "__resourcePath": "fake", "title": "T" }))
            .with_resource_path("docs/intro.mdx");
        assert_eq!(fm.resource_path(), Some("docs/intro.mdx"));
        assert_eq!(fm.get("title"), Some(&json!("T")));
    }

    #[test]
    fn truthiness_follows_javascript() {
        for value in [json!(true), json!(1), json!(-0.5), json!("no"), json!([]), json!({})] {
            assert!(is_truthy(&value), "{value} should be truthy");
        }
        for value in [json!(false), json!(0), json!(0.0), json!(""), json!(null)] {
            assert!(!is_truthy(&value), "{value} should be falsy");
        }
    }

    #[test]
    fn no_default_layout_reads_truthy_values() {
        assert!(front_matter(json!({ "noDefaultLayout": true })).no_default_layout());
        assert!(front_matter(json!({ "noDefaultLayout": "yes" })).no_default_layout());
        assert!(!front_matter(json!({ "noDefaultLayout": false })).no_default_layout());
        assert!(!FrontMatter::default().no_default_layout());
    }

    #[test]
    fn layout_name_falls_back_to_default() {
        assert_eq!(FrontMatter::default().layout_name("index").unwrap(), "index");
        assert_eq!(
            front_matter(json!({ "layout": "" })).layout_name("index").unwrap(),
            "index"
        );
        assert_eq!(
            front_matter(json!({ "layout": "docs" })).layout_name("index").unwrap(),
            "docs"
        );
    }

    #[test]
    fn non_string_layout_is_rejected() {
        let err = front_matter(json!({ "layout": 3 })).layout_name("index").unwrap_err();
        assert!(matches!(err, PipelineError::InvalidLayout { ref value } if value == "3"));
    }
}
