//! Tree to static HTML
//!
//! Rendering is a pure walk: the input tree is only borrowed and the same
//! tree always produces the same bytes.

use crate::export::ExportConfig;
use crate::node::{Node, NodeKind, Style};
use regex::Regex;
use std::sync::OnceLock;

/// Render `nodes` (normally the root's children) as a complete HTML page
/// using the default export settings
pub fn generate_markup(nodes: &[Node]) -> String {
    generate_markup_with(nodes, &ExportConfig::default())
}

/// Render `nodes` inside the page boilerplate described by `config`
pub fn generate_markup_with(nodes: &[Node], config: &ExportConfig) -> String {
    let body = render_nodes(nodes);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="{stylesheet}"></script>
    <style>
       body {{ margin: 0; font-family: system-ui, -apple-system, sans-serif; }}
    </style>
</head>
<body>
{body}
</body>
</html>"#,
        title = escape_html(&config.title),
        stylesheet = escape_html(&config.stylesheet_href),
        body = body,
    )
}

/// Render sibling nodes, one per line
pub fn render_nodes(nodes: &[Node]) -> String {
    nodes.iter().map(render_node).collect::<Vec<_>>().join("\n")
}

/// Render a single node and its subtree
pub fn render_node(node: &Node) -> String {
    let style_attr = style_attribute(&node.style);

    let mut attrs: Vec<Attr> = Vec::new();
    let mut content: Option<String> = None;

    let tag = match node.kind {
        NodeKind::Container | NodeKind::Card | NodeKind::GridRow | NodeKind::GridCol => "div",
        NodeKind::Section => "section",
        NodeKind::Text => {
            content = prop_text(node, "content");
            "span"
        }
        NodeKind::Paragraph => {
            content = prop_text(node, "content");
            "p"
        }
        NodeKind::H1 | NodeKind::H2 | NodeKind::H3 | NodeKind::Blockquote | NodeKind::Label | NodeKind::Button => {
            content = prop_text(node, "content");
            text_tag(node.kind)
        }
        NodeKind::Link => {
            content = prop_text(node, "content");
            let href = prop_text(node, "href").filter(|h| !h.is_empty());
            attrs.push(Attr::value("href", href.unwrap_or_else(|| "#".to_string())));
            "a"
        }
        NodeKind::Badge => {
            content = prop_text(node, "content");
            "span"
        }
        NodeKind::Alert => {
            content = prop_text(node, "content");
            attrs.push(Attr::value("role", "alert"));
            "div"
        }
        NodeKind::Image => {
            attrs.push(Attr::value("src", prop_text(node, "src").unwrap_or_default()));
            attrs.push(Attr::value("alt", "Image"));
            "img"
        }
        NodeKind::Avatar => {
            attrs.push(Attr::value("src", prop_text(node, "src").unwrap_or_default()));
            attrs.push(Attr::value("alt", "Avatar"));
            "img"
        }
        NodeKind::Video => {
            let src = escape_html(&prop_text(node, "src").unwrap_or_default());
            return format!(
                r#"<div{style_attr}><iframe src="{src}" width="100%" height="100%" frameborder="0" allowfullscreen></iframe></div>"#
            );
        }
        NodeKind::Input | NodeKind::Textarea => {
            attrs.push(Attr::value(
                "placeholder",
                prop_text(node, "placeholder").unwrap_or_default(),
            ));
            if node.kind == NodeKind::Input {
                "input"
            } else {
                "textarea"
            }
        }
        NodeKind::Select => {
            content = Some(render_options(node));
            "select"
        }
        NodeKind::Checkbox | NodeKind::Radio => {
            let input_type = if node.kind == NodeKind::Checkbox { "checkbox" } else { "radio" };
            attrs.push(Attr::value("type", input_type));
            if node.prop_bool("checked") {
                attrs.push(Attr::flag("checked"));
            }
            "input"
        }
        NodeKind::Divider => "hr",
    };

    let attr_text: String = attrs.iter().map(Attr::render).collect();

    if is_void(tag) {
        return format!("<{tag}{attr_text}{style_attr} />");
    }

    let inner = match content.filter(|c| !c.is_empty()) {
        Some(text) if node.kind == NodeKind::Select => text,
        Some(text) => escape_html(&text),
        None => render_nodes(&node.children),
    };

    format!("<{tag}{attr_text}{style_attr}>{inner}</{tag}>")
}

fn text_tag(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::H1 => "h1",
        NodeKind::H2 => "h2",
        NodeKind::H3 => "h3",
        NodeKind::Blockquote => "blockquote",
        NodeKind::Label => "label",
        _ => "button",
    }
}

/// One `<option>` per entry of the `options` property
fn render_options(node: &Node) -> String {
    node.properties
        .get("options")
        .and_then(|v| v.as_array())
        .map(|options| {
            options
                .iter()
                .filter_map(json_text)
                .map(|o| format!("<option>{}</option>", escape_html(&o)))
                .collect()
        })
        .unwrap_or_default()
}

/// Inline `style="..."` attribute, empty when there is no style
pub fn style_attribute(style: &Style) -> String {
    if style.is_empty() {
        return String::new();
    }

    let declarations = style
        .iter()
        .map(|(key, value)| format!("{}: {}", css_property_name(key), value))
        .collect::<Vec<_>>()
        .join("; ");

    format!(" style=\"{}\"", escape_html(&declarations))
}

/// camelCase style key to its CSS property name (`backgroundColor` ->
/// `background-color`, `MozBoxSizing` -> `-moz-box-sizing`)
pub fn css_property_name(key: &str) -> String {
    static UPPER: OnceLock<Regex> = OnceLock::new();
    let upper = UPPER.get_or_init(|| Regex::new("[A-Z]").expect("static pattern"));
    upper.replace_all(key, "-$0").to_lowercase()
}

fn prop_text(node: &Node, key: &str) -> Option<String> {
    node.properties.get(key).and_then(json_text)
}

fn json_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

struct Attr {
    name: &'static str,
    value: Option<String>,
}

impl Attr {
    fn value(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: Some(value.into()),
        }
    }

    fn flag(name: &'static str) -> Self {
        Self { name, value: None }
    }

    fn render(&self) -> String {
        match &self.value {
            Some(value) => format!(" {}=\"{}\"", self.name, escape_html(value)),
            None => format!(" {}", self.name),
        }
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "img" | "input" | "hr" | "br")
}
