//! Program fragments appended to a document tree as MDX ESM nodes.
//!
//! Each fragment is a single top-level ESM statement. Fragments are built from
//! small typed pieces ([`Expr`], [`EsmFragment`]) and printed to JavaScript
//! source only when they become tree nodes, so tests can inspect the typed
//! form and the compiler sees ordinary MDX ESM.

use markdown::mdast::{MdxjsEsm, Node};
use serde_json::{Number, Value as JsonValue};
use std::fmt::Write as FmtWrite;

/// Converts a Rust string to a JavaScript string literal.
///
/// Uses JSON serialization to properly escape special characters.
///
/// # Examples
///
/// ```
/// use mdxlayout_core::codegen::js_string_literal;
///
/// assert_eq!(js_string_literal("hello"), "\"hello\"");
/// assert_eq!(js_string_literal("say \"hi\""), "\"say \\\"hi\\\"\"");
/// ```
pub fn js_string_literal(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// JavaScript expression forms used by generated fragments.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `undefined`
    Undefined,
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Numeric literal.
    Number(Number),
    /// String literal.
    String(String),
    /// Array literal.
    Array(Vec<Expr>),
    /// Object literal with string keys, in order.
    Object(Vec<(String, Expr)>),
    /// Reference to a binding in scope.
    Identifier(String),
}

impl Expr {
    /// Shorthand for an identifier expression.
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Prints the expression as JavaScript.
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        self.write_source(&mut out);
        out
    }

    fn write_source(&self, out: &mut String) {
        match self {
            Expr::Undefined => out.push_str("undefined"),
            Expr::Null => out.push_str("null"),
            Expr::Bool(value) => {
                let _ = write!(out, "{}", value);
            }
            Expr::Number(number) => {
                let _ = write!(out, "{}", number);
            }
            Expr::String(value) => out.push_str(&js_string_literal(value)),
            Expr::Identifier(name) => out.push_str(name),
            Expr::Array(items) => {
                out.push('[');
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    item.write_source(out);
                }
                out.push(']');
            }
            Expr::Object(entries) => {
                if entries.is_empty() {
                    out.push_str("{}");
                    return;
                }
                out.push_str("{ ");
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    // A plain `__proto__` key would set the prototype instead.
                    if key == "__proto__" {
                        let _ = write!(out, "[{}]: ", js_string_literal(key));
                    } else {
                        out.push_str(&js_string_literal(key));
                        out.push_str(": ");
                    }
                    value.write_source(out);
                }
                out.push_str(" }");
            }
        }
    }
}

/// Converts a JSON value into an equivalent literal expression, recursively.
pub fn value_to_expr(value: &JsonValue) -> Expr {
    match value {
        JsonValue::Null => Expr::Null,
        JsonValue::Bool(value) => Expr::Bool(*value),
        JsonValue::Number(number) => Expr::Number(number.clone()),
        JsonValue::String(value) => Expr::String(value.clone()),
        JsonValue::Array(items) => Expr::Array(items.iter().map(value_to_expr).collect()),
        JsonValue::Object(map) => Expr::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), value_to_expr(value)))
                .collect(),
        ),
    }
}

/// A single top-level ESM statement.
#[derive(Debug, Clone, PartialEq)]
pub enum EsmFragment {
    /// `import local from "source";`
    ImportDefault {
        /// Local binding name.
        local: String,
        /// Module specifier.
        source: String,
    },
    /// `export const name = init;`
    ExportConst {
        /// Exported binding name.
        name: String,
        /// Initializer expression.
        init: Expr,
    },
    /// `export default ({ children }) => <component ...attributes>{children}</component>;`
    ExportDefaultLayout {
        /// Component used as the wrapping element.
        component: String,
        /// Element attributes, each bound to an expression.
        attributes: Vec<(String, Expr)>,
    },
}

impl EsmFragment {
    /// Prints the fragment as one ESM statement.
    pub fn to_source(&self) -> String {
        let mut code = String::new();
        match self {
            EsmFragment::ImportDefault { local, source } => {
                let _ = write!(code, "import {} from {};", local, js_string_literal(source));
            }
            EsmFragment::ExportConst { name, init } => {
                let _ = write!(code, "export const {} = {};", name, init.to_source());
            }
            EsmFragment::ExportDefaultLayout {
                component,
                attributes,
            } => {
                let _ = write!(code, "export default ({{ children }}) => <{}", component);
                for (name, value) in attributes {
                    let _ = write!(code, " {}={{{}}}", name, value.to_source());
                }
                let _ = write!(code, ">{{children}}</{}>;", component);
            }
        }
        code
    }

    /// Wraps the fragment as an MDX ESM node. The node has no source position.
    pub fn into_node(self) -> Node {
        Node::MdxjsEsm(MdxjsEsm {
            value: self.to_source(),
            position: None,
            stops: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_print_as_literals() {
        assert_eq!(value_to_expr(&json!(null)).to_source(), "null");
        assert_eq!(value_to_expr(&json!(true)).to_source(), "true");
        assert_eq!(value_to_expr(&json!(42)).to_source(), "42");
        assert_eq!(value_to_expr(&json!(-1.5)).to_source(), "-1.5");
        assert_eq!(
            value_to_expr(&json!("line\n\"quoted\"")).to_source(),
            "\"line\\n\\\"quoted\\\"\""
        );
        assert_eq!(Expr::Undefined.to_source(), "undefined");
    }

    #[test]
    fn nested_values_convert_recursively() {
        let value = json!({ "title": "Intro", "meta": { "tags": ["a", 1, false] }, "empty": {} });
        assert_eq!(
            value_to_expr(&value).to_source(),
            r#"{ "title": "Intro", "meta": { "tags": ["a", 1, false] }, "empty": {} }"#
        );
    }

    #[test]
    fn proto_key_prints_as_computed_property() {
        let value = json!({ "__proto__": { "admin": true }, "title": "x" });
        assert_eq!(
            value_to_expr(&value).to_source(),
            r#"{ ["__proto__"]: { "admin": true }, "title": "x" }"#
        );
    }

    #[test]
    fn export_const_fragment() {
        let fragment = EsmFragment::ExportConst {
            name: "frontMatter".into(),
            init: value_to_expr(&json!({ "__resourcePath": "docs/intro.mdx" })),
        };
        assert_eq!(
            fragment.to_source(),
            r#"export const frontMatter = { "__resourcePath": "docs/intro.mdx" };"#
        );
    }

    #[test]
    fn import_default_fragment_escapes_source() {
        let fragment = EsmFragment::ImportDefault {
            local: "Layout".into(),
            source: "/site/layouts/index".into(),
        };
        assert_eq!(fragment.to_source(), r#"import Layout from "/site/layouts/index";"#);
    }

    #[test]
    fn export_default_layout_fragment() {
        let fragment = EsmFragment::ExportDefaultLayout {
            component: "Layout".into(),
            attributes: vec![("frontMatter".into(), Expr::ident("frontMatter"))],
        };
        assert_eq!(
            fragment.to_source(),
            "export default ({ children }) => <Layout frontMatter={frontMatter}>{children}</Layout>;"
        );
    }

    #[test]
    fn into_node_builds_unpositioned_esm() {
        let node = EsmFragment::ImportDefault {
            local: "Layout".into(),
            source: "./layout".into(),
        }
        .into_node();
        match node {
            Node::MdxjsEsm(esm) => {
                assert!(esm.position.is_none());
                assert_eq!(esm.value, r#"import Layout from "./layout";"#);
            }
            other => panic!("expected ESM node, got {other:?}"),
        }
    }
}
