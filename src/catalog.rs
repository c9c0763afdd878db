//! Static element defaults and pre-composed block templates

use crate::node::{NodeKind, Properties, Style, StyleValue};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::OnceLock;

/// Partial node used as a stamp. Never inserted directly; see
/// [`crate::instantiate::instantiate`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeTemplate {
    pub kind: NodeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub children: Vec<NodeTemplate>,
}

impl NodeTemplate {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            name: None,
            properties: Properties::new(),
            style: Style::new(),
            children: Vec::new(),
        }
    }

    /// Template carrying the kind's default properties and style
    pub fn with_defaults(kind: NodeKind) -> Self {
        Self {
            properties: default_properties(kind),
            style: default_style(kind),
            ..Self::new(kind)
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn prop(mut self, key: &str, value: serde_json::Value) -> Self {
        self.properties.insert(key.to_string(), value);
        self
    }

    pub fn style(mut self, key: &str, value: impl Into<StyleValue>) -> Self {
        self.style.insert(key.to_string(), value.into());
        self
    }

    pub fn child(mut self, child: NodeTemplate) -> Self {
        self.children.push(child);
        self
    }
}

/// A reusable multi-node pattern offered by the palette
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlockTemplate {
    pub id: String,
    pub category: String,
    pub label: String,
    pub root: NodeTemplate,
}

impl BlockTemplate {
    fn new(id: &str, category: &str, label: &str, root: NodeTemplate) -> Self {
        Self {
            id: id.to_string(),
            category: category.to_string(),
            label: label.to_string(),
            root,
        }
    }
}

/// Default properties for a freshly added node of `kind`
pub fn default_properties(kind: NodeKind) -> Properties {
    let pairs: Vec<(&str, serde_json::Value)> = match kind {
        NodeKind::Text => vec![("content", json!("Double click to edit"))],
        NodeKind::H1 => vec![("content", json!("Heading 1"))],
        NodeKind::H2 => vec![("content", json!("Heading 2"))],
        NodeKind::H3 => vec![("content", json!("Heading 3"))],
        NodeKind::Paragraph => vec![(
            "content",
            json!("Lorem ipsum dolor sit amet, consectetur adipiscing elit."),
        )],
        NodeKind::Blockquote => vec![("content", json!("\u{201c}This is a quote.\u{201d}"))],
        NodeKind::Link => vec![("content", json!("Link Text")), ("href", json!("#"))],
        NodeKind::Label => vec![("content", json!("Label"))],
        NodeKind::Button => vec![("content", json!("Button"))],
        NodeKind::Badge => vec![("content", json!("Badge"))],
        NodeKind::Alert => vec![("content", json!("Alert Message"))],
        NodeKind::Image => vec![("src", json!("https://placehold.co/600x400"))],
        NodeKind::Video => vec![("src", json!("https://www.youtube.com/embed/dQw4w9WgXcQ"))],
        NodeKind::Avatar => vec![("src", json!("https://i.pravatar.cc/150"))],
        NodeKind::Input => vec![("placeholder", json!("Input..."))],
        NodeKind::Textarea => vec![("placeholder", json!("Textarea..."))],
        NodeKind::Select => vec![("options", json!(["Option 1", "Option 2"]))],
        NodeKind::Checkbox => vec![("checked", json!(false)), ("label", json!("Checkbox"))],
        NodeKind::Radio => vec![("checked", json!(false)), ("label", json!("Radio"))],
        NodeKind::Container
        | NodeKind::Section
        | NodeKind::GridRow
        | NodeKind::GridCol
        | NodeKind::Card
        | NodeKind::Divider => vec![],
    };

    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Default inline style for a freshly added node of `kind`
pub fn default_style(kind: NodeKind) -> Style {
    let pairs: &[(&str, &str)] = match kind {
        NodeKind::Button => &[
            ("padding", "10px 20px"),
            ("backgroundColor", "#000000"),
            ("color", "#ffffff"),
            ("borderRadius", "6px"),
            ("border", "none"),
            ("cursor", "pointer"),
        ],
        NodeKind::Container => &[
            ("padding", "20px"),
            ("border", "1px dashed #e2e8f0"),
            ("minHeight", "100px"),
            ("display", "flex"),
            ("flexDirection", "column"),
            ("gap", "10px"),
        ],
        NodeKind::Section => &[
            ("padding", "40px 20px"),
            ("width", "100%"),
            ("minHeight", "200px"),
            ("backgroundColor", "#f8fafc"),
        ],
        NodeKind::Card => &[
            ("padding", "20px"),
            ("borderRadius", "12px"),
            ("backgroundColor", "#ffffff"),
            ("boxShadow", "0 4px 6px -1px rgb(0 0 0 / 0.1)"),
            ("border", "1px solid #e2e8f0"),
            ("display", "flex"),
            ("flexDirection", "column"),
            ("gap", "10px"),
        ],
        NodeKind::GridRow => &[
            ("display", "grid"),
            ("gridTemplateColumns", "repeat(2, 1fr)"),
            ("gap", "20px"),
            ("width", "100%"),
        ],
        NodeKind::GridCol => &[
            ("display", "flex"),
            ("flexDirection", "column"),
            ("gap", "10px"),
            ("padding", "10px"),
            ("border", "1px dashed #cbd5e1"),
        ],
        NodeKind::H1 => &[("fontSize", "32px"), ("fontWeight", "bold"), ("margin", "0 0 10px 0")],
        NodeKind::H2 => &[("fontSize", "24px"), ("fontWeight", "bold"), ("margin", "0 0 10px 0")],
        NodeKind::H3 => &[("fontSize", "20px"), ("fontWeight", "bold"), ("margin", "0 0 10px 0")],
        NodeKind::Paragraph => &[("fontSize", "16px"), ("lineHeight", "1.5"), ("margin", "0 0 10px 0")],
        NodeKind::Link => &[("color", "#2563eb"), ("textDecoration", "underline")],
        NodeKind::Input => &[
            ("padding", "10px"),
            ("borderRadius", "6px"),
            ("border", "1px solid #cbd5e1"),
            ("width", "100%"),
        ],
        NodeKind::Textarea => &[
            ("padding", "10px"),
            ("borderRadius", "6px"),
            ("border", "1px solid #cbd5e1"),
            ("width", "100%"),
            ("minHeight", "100px"),
        ],
        NodeKind::Video => &[("width", "100%"), ("height", "315px"), ("borderRadius", "8px")],
        NodeKind::Avatar => &[
            ("width", "48px"),
            ("height", "48px"),
            ("borderRadius", "9999px"),
            ("objectFit", "cover"),
        ],
        NodeKind::Badge => &[
            ("padding", "4px 12px"),
            ("borderRadius", "9999px"),
            ("backgroundColor", "#e2e8f0"),
            ("fontSize", "12px"),
            ("fontWeight", "600"),
            ("width", "fit-content"),
        ],
        NodeKind::Alert => &[
            ("padding", "12px 16px"),
            ("borderRadius", "8px"),
            ("backgroundColor", "#fee2e2"),
            ("color", "#991b1b"),
            ("width", "100%"),
        ],
        NodeKind::Divider => &[
            ("width", "100%"),
            ("height", "1px"),
            ("backgroundColor", "#e2e8f0"),
            ("margin", "16px 0"),
        ],
        NodeKind::Text
        | NodeKind::Label
        | NodeKind::Blockquote
        | NodeKind::Select
        | NodeKind::Checkbox
        | NodeKind::Radio
        | NodeKind::Image => &[],
    };

    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), StyleValue::from(*v)))
        .collect()
}

/// Style of the document root ("Body")
pub fn root_style() -> Style {
    [
        ("minHeight", "100vh"),
        ("width", "100%"),
        ("backgroundColor", "#ffffff"),
        ("display", "flex"),
        ("flexDirection", "column"),
        ("padding", "20px"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), StyleValue::from(*v)))
    .collect()
}

/// The built-in block catalog
pub fn blocks() -> &'static [BlockTemplate] {
    static BLOCKS: OnceLock<Vec<BlockTemplate>> = OnceLock::new();
    BLOCKS.get_or_init(builtin_blocks)
}

/// Look up a block template by id
pub fn find_block(id: &str) -> Option<&'static BlockTemplate> {
    blocks().iter().find(|b| b.id == id)
}

fn text(kind: NodeKind, content: &str) -> NodeTemplate {
    NodeTemplate::with_defaults(kind).prop("content", json!(content))
}

fn builtin_blocks() -> Vec<BlockTemplate> {
    use NodeKind::*;

    vec![
        BlockTemplate::new(
            "hero",
            "Sections",
            "Hero",
            NodeTemplate::with_defaults(Section)
                .named("Hero")
                .style("alignItems", "center")
                .style("textAlign", "center")
                .child(text(H1, "Build something great"))
                .child(text(Paragraph, "A short pitch that explains what this page is about."))
                .child(text(Button, "Get started")),
        ),
        BlockTemplate::new(
            "feature-card",
            "Cards",
            "Feature Card",
            NodeTemplate::with_defaults(Card)
                .named("Feature")
                .child(text(H3, "Feature title"))
                .child(text(Paragraph, "Describe the feature in a sentence or two."))
                .child(text(Link, "Learn more").prop("href", json!("#"))),
        ),
        BlockTemplate::new(
            "profile",
            "Cards",
            "Profile Card",
            NodeTemplate::with_defaults(Card)
                .named("Profile")
                .style("alignItems", "center")
                .child(NodeTemplate::with_defaults(Avatar))
                .child(text(H3, "Jane Doe"))
                .child(text(Badge, "Designer")),
        ),
        BlockTemplate::new(
            "two-columns",
            "Layout",
            "Two Columns",
            NodeTemplate::with_defaults(GridRow)
                .child(NodeTemplate::with_defaults(GridCol).child(text(Paragraph, "Left column")))
                .child(NodeTemplate::with_defaults(GridCol).child(text(Paragraph, "Right column"))),
        ),
        BlockTemplate::new(
            "contact-form",
            "Forms",
            "Contact Form",
            NodeTemplate::with_defaults(Container)
                .named("Contact Form")
                .child(text(Label, "Email"))
                .child(NodeTemplate::with_defaults(Input).prop("placeholder", json!("you@example.com")))
                .child(text(Label, "Message"))
                .child(NodeTemplate::with_defaults(Textarea).prop("placeholder", json!("How can we help?")))
                .child(text(Button, "Send")),
        ),
        BlockTemplate::new(
            "alert-banner",
            "Feedback",
            "Alert Banner",
            text(Alert, "Something needs your attention."),
        ),
    ]
}
