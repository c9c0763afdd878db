use crate::catalog;
use crate::error::EditError;
use crate::event::{ChangeKind, DocumentEvent, Subscribers};
use crate::instantiate::{instantiate_block, new_element, root_node};
use crate::node::{Node, NodeId, NodeIter, NodeKind, Properties, Style};
use crate::reparent::{self, DropTarget, Relocation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::mpsc::Receiver;
use tracing::debug;

/// Upper bound on the in-memory change log
pub const MAX_LOGGED_EVENTS: usize = 1024;

/// Device frame the canvas is previewed in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceMode {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl DeviceMode {
    /// CSS width of the canvas frame
    pub fn canvas_width(&self) -> &'static str {
        match self {
            DeviceMode::Desktop => "100%",
            DeviceMode::Tablet => "768px",
            DeviceMode::Mobile => "375px",
        }
    }
}

/// Partial update for [`Document::update_node`]. Only `Some` fields are
/// applied; `properties` and `style` are merged key by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: Option<NodeKind>,
    #[serde(default)]
    pub properties: Option<Properties>,
    #[serde(default)]
    pub style: Option<Style>,
    #[serde(default)]
    pub children: Option<Vec<Node>>,
}

impl NodePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn kind(mut self, kind: NodeKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties
            .get_or_insert_with(Properties::new)
            .insert(key.into(), value);
        self
    }

    pub fn style(mut self, key: impl Into<String>, value: impl Into<crate::StyleValue>) -> Self {
        self.style
            .get_or_insert_with(Style::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn children(mut self, children: Vec<Node>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.kind.is_none()
            && self.properties.is_none()
            && self.style.is_none()
            && self.children.is_none()
    }
}

/// The single document tree plus selection and view state. All writes go
/// through the methods below; each either applies fully or returns an error
/// with the tree untouched.
#[derive(Debug)]
pub struct Document {
    /// Root node ("Body"); everything else lives under it
    root: Node,

    /// Currently selected node, always present in the tree when set
    selection: Option<NodeId>,

    device: DeviceMode,

    preview: bool,

    /// Change log for observers and debugging
    events: Vec<DocumentEvent>,

    subscribers: Subscribers,
}

impl Document {
    /// Create a document holding only the root
    pub fn new() -> Self {
        Self {
            root: root_node(),
            selection: None,
            device: DeviceMode::default(),
            preview: false,
            events: Vec::new(),
            subscribers: Subscribers::new(),
        }
    }

    // ========== Structural Operations ==========

    /// Append a new element of `kind`, with catalog defaults, under `parent`
    pub fn add_node(&mut self, kind: NodeKind, parent: NodeId) -> Result<NodeId, EditError> {
        let parent_node = self
            .root
            .find_mut(parent)
            .ok_or(EditError::NodeNotFound(parent))?;

        let node = new_element(kind);
        let id = node.id;
        parent_node.children.push(node);

        self.record(ChangeKind::NodeAdded { id, parent, kind });
        Ok(id)
    }

    /// Instantiate catalog block `block_id` and append it under `parent`
    pub fn add_block(&mut self, block_id: &str, parent: NodeId) -> Result<NodeId, EditError> {
        let block = catalog::find_block(block_id)
            .ok_or_else(|| EditError::BlockNotFound(block_id.to_string()))?;
        let parent_node = self
            .root
            .find_mut(parent)
            .ok_or(EditError::NodeNotFound(parent))?;

        let subtree = instantiate_block(block);
        let id = subtree.id;
        let node_count = subtree.subtree_size();
        parent_node.children.push(subtree);

        self.record(ChangeKind::BlockAdded {
            block_id: block_id.to_string(),
            root: id,
            parent,
            node_count,
        });
        Ok(id)
    }

    /// Apply a partial update to a node
    pub fn update_node(&mut self, id: NodeId, patch: NodePatch) -> Result<(), EditError> {
        let node = self.root.find(id).ok_or(EditError::NodeNotFound(id))?;

        if id.is_root() && patch.kind.is_some_and(|kind| kind != NodeKind::Container) {
            return Err(EditError::RootImmutable);
        }
        if let Some(children) = &patch.children {
            self.check_replacement_children(node, children)?;
        }

        let removed: Vec<NodeId> = match &patch.children {
            Some(children) => {
                let kept: HashSet<NodeId> =
                    children.iter().flat_map(|c| c.iter()).map(|n| n.id).collect();
                node.iter()
                    .skip(1)
                    .map(|n| n.id)
                    .filter(|n| !kept.contains(n))
                    .collect()
            }
            None => Vec::new(),
        };

        let NodePatch {
            name,
            kind,
            properties,
            style,
            children,
        } = patch;

        let node = self
            .root
            .find_mut(id)
            .ok_or(EditError::NodeNotFound(id))?;
        if let Some(name) = name.filter(|name| !name.is_empty()) {
            node.name = name;
        }
        if let Some(kind) = kind {
            node.kind = kind;
        }
        if let Some(properties) = &properties {
            node.merge_properties(properties);
        }
        if let Some(style) = &style {
            node.merge_style(style);
        }
        let replaced = children.map(|children| {
            let count = children.len();
            node.children = children;
            count
        });

        self.record(ChangeKind::NodeUpdated { id });
        if let Some(child_count) = replaced {
            self.record(ChangeKind::ChildrenReplaced { id, child_count });
            self.clear_selection_if_in(&removed);
        }
        Ok(())
    }

    /// Shallow-merge `patch` into the node's style
    pub fn update_node_style(&mut self, id: NodeId, patch: &Style) -> Result<(), EditError> {
        let node = self
            .root
            .find_mut(id)
            .ok_or(EditError::NodeNotFound(id))?;
        node.merge_style(patch);

        self.record(ChangeKind::StyleChanged {
            id,
            keys: patch.keys().cloned().collect(),
        });
        Ok(())
    }

    /// Remove a node together with its whole subtree
    pub fn delete_node(&mut self, id: NodeId) -> Result<(), EditError> {
        if id.is_root() {
            return Err(EditError::RootImmutable);
        }

        let detached = self
            .root
            .remove_descendant(id)
            .ok_or(EditError::NodeNotFound(id))?;
        let removed = detached.ids();

        self.record(ChangeKind::NodeDeleted {
            id,
            removed: removed.clone(),
        });
        self.clear_selection_if_in(&removed);
        Ok(())
    }

    /// Relocate `active` (with its subtree) according to a drop over `over`
    pub fn move_node(
        &mut self,
        active: NodeId,
        over: impl Into<DropTarget>,
    ) -> Result<Relocation, EditError> {
        let relocation = reparent::relocate(&mut self.root, active, over.into())?;

        self.record(ChangeKind::NodeMoved {
            id: active,
            from: relocation.from,
            to: relocation.placement.parent(),
        });
        Ok(relocation)
    }

    // ========== View State ==========

    /// Select a node, or clear the selection with `None`
    pub fn select_node(&mut self, id: Option<NodeId>) -> Result<(), EditError> {
        if let Some(id) = id {
            if !self.root.contains(id) {
                return Err(EditError::NodeNotFound(id));
            }
        }
        self.set_selection(id);
        Ok(())
    }

    pub fn set_device_mode(&mut self, device: DeviceMode) {
        self.device = device;
        self.record(ChangeKind::DeviceChanged { device });
    }

    /// Toggle preview; entering preview drops the selection
    pub fn set_preview_active(&mut self, active: bool) {
        self.preview = active;
        self.record(ChangeKind::PreviewToggled { active });
        if active {
            self.set_selection(None);
        }
    }

    fn set_selection(&mut self, new: Option<NodeId>) {
        let old = self.selection;
        if old == new {
            return;
        }
        self.selection = new;
        self.record(ChangeKind::SelectionChanged { old, new });
    }

    fn clear_selection_if_in(&mut self, removed: &[NodeId]) {
        if let Some(selected) = self.selection {
            if removed.contains(&selected) {
                self.set_selection(None);
            }
        }
    }

    /// Replacement children must not duplicate ids, reuse the root id, or
    /// steal ids that live elsewhere in the tree.
    fn check_replacement_children(&self, node: &Node, children: &[Node]) -> Result<(), EditError> {
        let own_subtree: HashSet<NodeId> = node.iter().skip(1).map(|n| n.id).collect();
        let mut seen = HashSet::new();

        for candidate in children.iter().flat_map(|c| c.iter()) {
            if candidate.id.is_root() {
                return Err(EditError::RootImmutable);
            }
            let elsewhere = !own_subtree.contains(&candidate.id) && self.root.contains(candidate.id);
            if elsewhere || !seen.insert(candidate.id) {
                return Err(EditError::DuplicateId(candidate.id));
            }
        }
        Ok(())
    }

    // ========== Events ==========

    fn record(&mut self, change: ChangeKind) {
        debug!(?change, "document changed");
        let event = DocumentEvent::new(change);
        self.subscribers.publish(&event);
        self.events.push(event);
        if self.events.len() > MAX_LOGGED_EVENTS {
            let overflow = self.events.len() - MAX_LOGGED_EVENTS;
            self.events.drain(..overflow);
        }
    }

    /// Receive every change made after this call
    pub fn subscribe(&mut self) -> Receiver<DocumentEvent> {
        self.subscribers.subscribe()
    }

    /// Most recent events, oldest first. Only the last
    /// [`MAX_LOGGED_EVENTS`] are kept; subscribers see every change.
    pub fn events(&self) -> &[DocumentEvent] {
        &self.events
    }

    /// Take the logged events, leaving the log empty
    pub fn drain_events(&mut self) -> Vec<DocumentEvent> {
        std::mem::take(&mut self.events)
    }

    /// Clear event log
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    // ========== Queries ==========

    /// The document root
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Nodes that make up the exported page body (the root's children)
    pub fn export_nodes(&self) -> &[Node] {
        &self.root.children
    }

    /// Owned copy of the tree for readers
    pub fn snapshot(&self) -> Node {
        self.root.clone()
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.root.find(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.root.contains(id)
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.root.parent_of(id)
    }

    /// Ids from the root down to (excluding) `id`
    pub fn ancestors(&self, id: NodeId) -> Option<Vec<NodeId>> {
        fn walk(node: &Node, id: NodeId, path: &mut Vec<NodeId>) -> bool {
            if node.id == id {
                return true;
            }
            path.push(node.id);
            if node.children.iter().any(|c| walk(c, id, path)) {
                return true;
            }
            path.pop();
            false
        }

        let mut path = Vec::new();
        walk(&self.root, id, &mut path).then_some(path)
    }

    /// Pre-order walk over every node
    pub fn iter(&self) -> NodeIter<'_> {
        self.root.iter()
    }

    /// Count nodes, root included
    pub fn node_count(&self) -> usize {
        self.root.subtree_size()
    }

    pub fn selected_id(&self) -> Option<NodeId> {
        self.selection
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.selection.and_then(|id| self.root.find(id))
    }

    pub fn device_mode(&self) -> DeviceMode {
        self.device
    }

    pub fn is_preview_active(&self) -> bool {
        self.preview
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
