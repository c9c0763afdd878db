// Helper functions to build test documents with various shapes

#![allow(dead_code)]

use block_canvas::{Document, Node, NodeId, NodeKind};
use std::collections::HashSet;

/// Root with a container `C` holding a section, which holds a text node
pub fn create_nested_document() -> (Document, NodeId, NodeId, NodeId) {
    let mut doc = Document::new();

    let container = doc.add_node(NodeKind::Container, NodeId::ROOT).unwrap();
    let section = doc.add_node(NodeKind::Section, container).unwrap();
    let text = doc.add_node(NodeKind::Text, section).unwrap();

    (doc, container, section, text)
}

/// One of every block in the catalog, dropped on the root
pub fn create_block_gallery() -> (Document, Vec<NodeId>) {
    let mut doc = Document::new();
    let ids = block_canvas::catalog::blocks()
        .iter()
        .map(|block| doc.add_block(&block.id, NodeId::ROOT).unwrap())
        .collect();
    (doc, ids)
}

/// Every id in the tree, pre-order
pub fn all_ids(doc: &Document) -> Vec<NodeId> {
    doc.iter().map(|n| n.id).collect()
}

/// True when no id appears twice
pub fn ids_unique(doc: &Document) -> bool {
    let ids = all_ids(doc);
    let set: HashSet<NodeId> = ids.iter().copied().collect();
    set.len() == ids.len()
}

/// Number of child lists `id` appears in
pub fn owner_count(root: &Node, id: NodeId) -> usize {
    root.iter()
        .map(|n| n.children.iter().filter(|c| c.id == id).count())
        .sum()
}
