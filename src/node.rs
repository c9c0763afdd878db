use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use ulid::Ulid;

/// Open property bag, interpreted per kind (see [`NodeKind::property_keys`])
pub type Properties = BTreeMap<String, serde_json::Value>;

/// Flat presentation-attribute bag keyed by camelCase style names
pub type Style = BTreeMap<String, StyleValue>;

/// Identifier of a node in the document tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Ulid);

impl NodeId {
    /// Fixed identifier of the document root
    pub const ROOT: NodeId = NodeId(Ulid::nil());

    /// Generate a fresh identifier (never equal to [`NodeId::ROOT`])
    pub fn generate() -> Self {
        loop {
            let id = Ulid::new();
            if !id.is_nil() {
                return NodeId(id);
            }
        }
    }

    pub fn is_root(&self) -> bool {
        *self == Self::ROOT
    }

    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl From<Ulid> for NodeId {
    fn from(id: Ulid) -> Self {
        NodeId(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("root")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// A style value: either a raw CSS string or a bare number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Text(s) => f.write_str(s),
            StyleValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Text(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Text(s)
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        StyleValue::Number(n)
    }
}

/// Element kind determines rendering and which properties are meaningful
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    // Layout
    Container,
    Section,
    GridRow,
    GridCol,
    Card,
    Divider,
    // Typography
    Text,
    H1,
    H2,
    H3,
    Paragraph,
    Blockquote,
    Link,
    Label,
    // Forms
    Button,
    Input,
    Textarea,
    Select,
    Checkbox,
    Radio,
    // Media
    Image,
    Video,
    Avatar,
    // UI
    Badge,
    Alert,
}

impl NodeKind {
    pub const ALL: [NodeKind; 25] = [
        NodeKind::Container,
        NodeKind::Section,
        NodeKind::GridRow,
        NodeKind::GridCol,
        NodeKind::Card,
        NodeKind::Divider,
        NodeKind::Text,
        NodeKind::H1,
        NodeKind::H2,
        NodeKind::H3,
        NodeKind::Paragraph,
        NodeKind::Blockquote,
        NodeKind::Link,
        NodeKind::Label,
        NodeKind::Button,
        NodeKind::Input,
        NodeKind::Textarea,
        NodeKind::Select,
        NodeKind::Checkbox,
        NodeKind::Radio,
        NodeKind::Image,
        NodeKind::Video,
        NodeKind::Avatar,
        NodeKind::Badge,
        NodeKind::Alert,
    ];

    /// Kebab-case name, as used in serialized documents
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Container => "container",
            NodeKind::Section => "section",
            NodeKind::GridRow => "grid-row",
            NodeKind::GridCol => "grid-col",
            NodeKind::Card => "card",
            NodeKind::Divider => "divider",
            NodeKind::Text => "text",
            NodeKind::H1 => "h1",
            NodeKind::H2 => "h2",
            NodeKind::H3 => "h3",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Blockquote => "blockquote",
            NodeKind::Link => "link",
            NodeKind::Label => "label",
            NodeKind::Button => "button",
            NodeKind::Input => "input",
            NodeKind::Textarea => "textarea",
            NodeKind::Select => "select",
            NodeKind::Checkbox => "checkbox",
            NodeKind::Radio => "radio",
            NodeKind::Image => "image",
            NodeKind::Video => "video",
            NodeKind::Avatar => "avatar",
            NodeKind::Badge => "badge",
            NodeKind::Alert => "alert",
        }
    }

    /// Parse a kebab-case kind name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == name)
    }

    /// Label given to new nodes: capitalized, dashes become spaces ("Grid row")
    pub fn default_name(&self) -> String {
        let name = self.as_str().replace('-', " ");
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Kinds that accept a dragged node as a new child
    pub fn is_drop_container(&self) -> bool {
        matches!(self, NodeKind::Container | NodeKind::Section | NodeKind::GridCol)
    }

    /// Kinds whose children are part of their rendered output
    pub fn is_layout(&self) -> bool {
        matches!(
            self,
            NodeKind::Container
                | NodeKind::Section
                | NodeKind::GridRow
                | NodeKind::GridCol
                | NodeKind::Card
        )
    }

    /// Kinds whose `content` property is rendered as inner text
    pub fn is_text_bearing(&self) -> bool {
        matches!(
            self,
            NodeKind::Text
                | NodeKind::H1
                | NodeKind::H2
                | NodeKind::H3
                | NodeKind::Paragraph
                | NodeKind::Blockquote
                | NodeKind::Link
                | NodeKind::Label
                | NodeKind::Button
                | NodeKind::Badge
                | NodeKind::Alert
        )
    }

    /// Property keys that carry meaning for this kind
    pub fn property_keys(&self) -> &'static [&'static str] {
        match self {
            NodeKind::Container
            | NodeKind::Section
            | NodeKind::GridRow
            | NodeKind::GridCol
            | NodeKind::Card
            | NodeKind::Divider => &[],
            NodeKind::Link => &["content", "href"],
            NodeKind::Text
            | NodeKind::H1
            | NodeKind::H2
            | NodeKind::H3
            | NodeKind::Paragraph
            | NodeKind::Blockquote
            | NodeKind::Label
            | NodeKind::Button
            | NodeKind::Badge
            | NodeKind::Alert => &["content"],
            NodeKind::Input | NodeKind::Textarea => &["placeholder"],
            NodeKind::Select => &["options"],
            NodeKind::Checkbox | NodeKind::Radio => &["checked", "label"],
            NodeKind::Image | NodeKind::Video | NodeKind::Avatar => &["src"],
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element of the document tree. Children are owned, so a node can only
/// ever sit in one parent's child list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    /// Unique identifier, immutable after creation
    pub id: NodeId,

    /// Element kind
    pub kind: NodeKind,

    /// Human-readable label
    pub name: String,

    /// Kind-specific values (content, href, src, options, ...)
    #[serde(default)]
    pub properties: Properties,

    /// Inline presentation attributes
    #[serde(default)]
    pub style: Style,

    /// Ordered children, rendered top-to-bottom
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    /// Create an empty node of the given kind with a fresh id
    pub fn new(kind: NodeKind) -> Self {
        Self::with_id(NodeId::generate(), kind)
    }

    /// Create an empty node with a specific ID (useful for testing)
    pub fn with_id(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            name: kind.default_name(),
            properties: Properties::new(),
            style: Style::new(),
            children: Vec::new(),
        }
    }

    /// String value of a property, if present and textual
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(|v| v.as_str())
    }

    /// Boolean value of a property; absent or non-boolean reads as false
    pub fn prop_bool(&self, key: &str) -> bool {
        self.properties
            .get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.properties.insert(key.into(), value);
    }

    pub fn set_style(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) {
        self.style.insert(key.into(), value.into());
    }

    /// Shallow-merge a style patch; keys not in the patch are kept
    pub fn merge_style(&mut self, patch: &Style) {
        for (key, value) in patch {
            self.style.insert(key.clone(), value.clone());
        }
    }

    /// Shallow-merge a property patch; keys not in the patch are kept
    pub fn merge_properties(&mut self, patch: &Properties) {
        for (key, value) in patch {
            self.properties.insert(key.clone(), value.clone());
        }
    }

    /// Find a node in this subtree (depth-first)
    pub fn find(&self, id: NodeId) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Find a node in this subtree for mutation (depth-first)
    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.find(id).is_some()
    }

    /// Detach the descendant with `id`, keeping sibling order. The node
    /// itself is never detached from its own subtree.
    pub fn remove_descendant(&mut self, id: NodeId) -> Option<Node> {
        if let Some(idx) = self.children.iter().position(|c| c.id == id) {
            return Some(self.children.remove(idx));
        }
        self.children
            .iter_mut()
            .find_map(|child| child.remove_descendant(id))
    }

    /// Id of the node whose child list holds `id`
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        if self.children.iter().any(|c| c.id == id) {
            return Some(self.id);
        }
        self.children.iter().find_map(|child| child.parent_of(id))
    }

    /// Pre-order iterator over this node and all descendants
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter { stack: vec![self] }
    }

    /// Number of nodes in this subtree, including this one
    pub fn subtree_size(&self) -> usize {
        self.iter().count()
    }

    /// All ids in this subtree, pre-order
    pub fn ids(&self) -> Vec<NodeId> {
        self.iter().map(|n| n.id).collect()
    }
}

/// Pre-order depth-first walk over a subtree
pub struct NodeIter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
