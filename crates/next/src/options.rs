//! Transform configuration.

use mdxlayout_core::MdxCompileOptions;
use serde::{Deserialize, Serialize};

/// Options for the front matter / layout transform.
///
/// Every field has a default, so hosts only spell out what they change:
///
/// ```
/// use mdxlayout_next::LayoutOptions;
///
/// let options = LayoutOptions::from_json(r#"{ "layoutsDir": "src/layouts" }"#).unwrap();
/// assert_eq!(options.layouts_dir, "src/layouts");
/// assert_eq!(options.default_layout, "index");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    /// Content root, relative to the working directory, that resource paths are taken from.
    pub pages_dir: String,
    /// Directory, relative to the working directory, holding layout modules.
    pub layouts_dir: String,
    /// Layout used when the front matter does not name one.
    pub default_layout: String,
    /// Extensions a layout module may have.
    pub layout_extensions: Vec<String>,
    /// Local binding the layout is imported as.
    pub layout_identifier: String,
    /// Name of the exported front matter constant.
    pub front_matter_export: String,
    /// JSX import source handed to the MDX compiler.
    pub jsx_import_source: Option<String>,
    /// Keep JSX in the compiled output instead of lowering it to calls.
    pub jsx: bool,
}

impl LayoutOptions {
    /// Parses options from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Options for the MDX compiler.
    pub fn compile_options(&self) -> MdxCompileOptions {
        MdxCompileOptions {
            jsx_import_source: self.jsx_import_source.clone(),
            jsx: self.jsx,
        }
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            pages_dir: "pages".to_string(),
            layouts_dir: "layouts".to_string(),
            default_layout: "index".to_string(),
            layout_extensions: ["js", "jsx", "ts", "tsx"]
                .into_iter()
                .map(String::from)
                .collect(),
            layout_identifier: "Layout".to_string(),
            front_matter_export: "frontMatter".to_string(),
            jsx_import_source: None,
            jsx: false,
        }
    }
}
