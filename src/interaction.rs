//! Inbound events from the editor surface (drag gestures, clicks, inspector
//! edits). The surface is expected to send well-formed requests, so refused
//! edits are logged and dropped here instead of being shown to the user.

use crate::document::Document;
use crate::error::EditError;
use crate::node::{NodeId, NodeKind, Style, StyleValue};
use crate::reparent::DropTarget;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// What the user started dragging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragSource {
    /// A single element from the palette
    Palette(NodeKind),
    /// A pre-built block from the palette
    Block(String),
    /// An existing node on the canvas
    Node(NodeId),
}

/// Result of dispatching an interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The document changed; carries the affected node
    Applied(NodeId),
    /// Nothing to do (no drop target, dropped on itself)
    Ignored,
    /// The edit was refused and absorbed
    Rejected,
}

/// Handle the end of a drag gesture. `over` is `None` when the pointer was
/// released outside every drop zone.
pub fn handle_drag_end(doc: &mut Document, source: &DragSource, over: Option<DropTarget>) -> Outcome {
    let Some(over) = over else {
        debug!(?source, "drag ended outside any drop zone");
        return Outcome::Ignored;
    };

    let result = match source {
        DragSource::Palette(kind) => doc.add_node(*kind, insertion_parent(over)),
        DragSource::Block(block_id) => doc.add_block(block_id, insertion_parent(over)),
        DragSource::Node(active) => {
            if over == DropTarget::Node(*active) {
                return Outcome::Ignored;
            }
            doc.move_node(*active, over).map(|relocation| relocation.moved)
        }
    };

    absorb("drag end", result)
}

/// Handle a click on a node, or on empty canvas (`None`)
pub fn handle_click(doc: &mut Document, target: Option<NodeId>) -> Outcome {
    match doc.select_node(target) {
        Ok(()) => target.map_or(Outcome::Ignored, Outcome::Applied),
        Err(err) => absorb("click", Err(err)),
    }
}

/// Handle a single style field edit from the inspector
pub fn handle_style_edit(doc: &mut Document, id: NodeId, key: &str, value: StyleValue) -> Outcome {
    let mut patch = Style::new();
    patch.insert(key.to_string(), value);
    absorb("style edit", doc.update_node_style(id, &patch).map(|()| id))
}

/// Handle a single property edit from the inspector
pub fn handle_property_edit(
    doc: &mut Document,
    id: NodeId,
    key: &str,
    value: serde_json::Value,
) -> Outcome {
    let patch = crate::NodePatch::new().property(key, value);
    absorb("property edit", doc.update_node(id, patch).map(|()| id))
}

/// Palette drops on the canvas background land under the root
fn insertion_parent(over: DropTarget) -> NodeId {
    match over {
        DropTarget::Node(id) => id,
        DropTarget::Canvas => NodeId::ROOT,
    }
}

fn absorb(action: &str, result: Result<NodeId, EditError>) -> Outcome {
    match result {
        Ok(id) => Outcome::Applied(id),
        Err(err) if err.is_lookup_miss() => {
            debug!(%err, action, "ignored edit for missing target");
            Outcome::Rejected
        }
        Err(err) => {
            warn!(%err, action, "rejected edit");
            Outcome::Rejected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_palette_drop_on_canvas_goes_to_root() {
        let mut doc = Document::new();
        let outcome = handle_drag_end(
            &mut doc,
            &DragSource::Palette(NodeKind::Button),
            Some(DropTarget::Canvas),
        );

        let Outcome::Applied(id) = outcome else {
            panic!("expected the button to be added, got {:?}", outcome);
        };
        assert_eq!(doc.parent_of(id), Some(NodeId::ROOT));
    }

    #[test]
    fn test_palette_drop_on_node() {
        let mut doc = Document::new();
        let section = doc.add_node(NodeKind::Section, NodeId::ROOT).unwrap();

        let outcome = handle_drag_end(
            &mut doc,
            &DragSource::Palette(NodeKind::Text),
            Some(section.into()),
        );

        let Outcome::Applied(id) = outcome else {
            panic!("expected the text to be added, got {:?}", outcome);
        };
        assert_eq!(doc.parent_of(id), Some(section));
    }

    #[test]
    fn test_block_drop() {
        let mut doc = Document::new();
        let outcome = handle_drag_end(
            &mut doc,
            &DragSource::Block("profile".to_string()),
            Some(DropTarget::Canvas),
        );
        assert!(matches!(outcome, Outcome::Applied(_)));
        assert_eq!(doc.node_count(), 5);

        let outcome = handle_drag_end(
            &mut doc,
            &DragSource::Block("missing".to_string()),
            Some(DropTarget::Canvas),
        );
        assert_eq!(outcome, Outcome::Rejected);
        assert_eq!(doc.node_count(), 5);
    }

    #[test]
    fn test_drop_outside_is_ignored() {
        let mut doc = Document::new();
        let outcome = handle_drag_end(&mut doc, &DragSource::Palette(NodeKind::Text), None);
        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(doc.node_count(), 1);
    }

    #[test]
    fn test_node_dropped_on_itself_is_ignored() {
        let mut doc = Document::new();
        let c = doc.add_node(NodeKind::Container, NodeId::ROOT).unwrap();
        doc.clear_events();

        let outcome = handle_drag_end(&mut doc, &DragSource::Node(c), Some(c.into()));
        assert_eq!(outcome, Outcome::Ignored);
        assert!(doc.events().is_empty());
    }

    #[test]
    fn test_node_move_and_rejections() {
        let mut doc = Document::new();
        let outer = doc.add_node(NodeKind::Container, NodeId::ROOT).unwrap();
        let inner = doc.add_node(NodeKind::GridCol, outer).unwrap();
        let text = doc.add_node(NodeKind::Text, NodeId::ROOT).unwrap();

        let outcome = handle_drag_end(&mut doc, &DragSource::Node(text), Some(inner.into()));
        assert_eq!(outcome, Outcome::Applied(text));
        assert_eq!(doc.parent_of(text), Some(inner));

        let outcome = handle_drag_end(&mut doc, &DragSource::Node(outer), Some(inner.into()));
        assert_eq!(outcome, Outcome::Rejected);
        assert_eq!(doc.parent_of(outer), Some(NodeId::ROOT));

        let outcome = handle_drag_end(
            &mut doc,
            &DragSource::Node(NodeId::ROOT),
            Some(DropTarget::Canvas),
        );
        assert_eq!(outcome, Outcome::Rejected);
    }

    #[test]
    fn test_click_selects_and_clears() {
        let mut doc = Document::new();
        let id = doc.add_node(NodeKind::Text, NodeId::ROOT).unwrap();

        assert_eq!(handle_click(&mut doc, Some(id)), Outcome::Applied(id));
        assert_eq!(doc.selected_id(), Some(id));

        assert_eq!(handle_click(&mut doc, None), Outcome::Ignored);
        assert_eq!(doc.selected_id(), None);

        assert_eq!(handle_click(&mut doc, Some(NodeId::generate())), Outcome::Rejected);
        assert_eq!(doc.selected_id(), None);
    }

    #[test]
    fn test_inspector_edits() {
        let mut doc = Document::new();
        let id = doc.add_node(NodeKind::Paragraph, NodeId::ROOT).unwrap();

        handle_style_edit(&mut doc, id, "fontSize", StyleValue::from("18px"));
        handle_property_edit(&mut doc, id, "content", json!("Edited"));

        let node = doc.get_node(id).unwrap();
        assert_eq!(node.style["fontSize"], StyleValue::from("18px"));
        assert_eq!(node.style["lineHeight"], StyleValue::from("1.5"));
        assert_eq!(node.prop_str("content"), Some("Edited"));

        assert_eq!(
            handle_style_edit(&mut doc, NodeId::generate(), "color", "red".into()),
            Outcome::Rejected
        );
    }
}
