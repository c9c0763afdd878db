//! Expands templates into freshly identified subtrees

use crate::catalog::{self, BlockTemplate, NodeTemplate};
use crate::node::{Node, NodeId, NodeKind};

/// Deep-clone a template into a new subtree. Every node gets a fresh id,
/// `properties` and `style` are copied by value, and children keep order.
pub fn instantiate(template: &NodeTemplate) -> Node {
    Node {
        id: NodeId::generate(),
        kind: template.kind,
        name: template
            .name
            .clone()
            .unwrap_or_else(|| template.kind.default_name()),
        properties: template.properties.clone(),
        style: template.style.clone(),
        children: template.children.iter().map(instantiate).collect(),
    }
}

/// Instantiate a catalog block
pub fn instantiate_block(block: &BlockTemplate) -> Node {
    instantiate(&block.root)
}

/// A single node of `kind` carrying the catalog defaults
pub fn new_element(kind: NodeKind) -> Node {
    instantiate(&NodeTemplate::with_defaults(kind))
}

/// Build the default document root ("Body")
pub fn root_node() -> Node {
    let mut root = Node::with_id(NodeId::ROOT, NodeKind::Container);
    root.name = "Body".to_string();
    root.style = catalog::root_style();
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_block;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_fresh_ids_for_every_node() {
        let block = find_block("two-columns").unwrap();
        let node = instantiate_block(block);

        assert_eq!(node.subtree_size(), 5);
        let ids: HashSet<NodeId> = node.ids().into_iter().collect();
        assert_eq!(ids.len(), 5);
        assert!(!ids.contains(&NodeId::ROOT));
    }

    #[test]
    fn test_instances_do_not_share_ids() {
        let block = find_block("hero").unwrap();
        let a = instantiate_block(block);
        let b = instantiate_block(block);

        let a_ids: HashSet<NodeId> = a.ids().into_iter().collect();
        assert!(b.ids().iter().all(|id| !a_ids.contains(id)));
    }

    #[test]
    fn test_structure_and_order_preserved() {
        let block = find_block("contact-form").unwrap();
        let node = instantiate_block(block);

        let kinds: Vec<NodeKind> = node.children.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Label,
                NodeKind::Input,
                NodeKind::Label,
                NodeKind::Textarea,
                NodeKind::Button
            ]
        );
        assert_eq!(node.name, "Contact Form");
        assert_eq!(node.children[0].prop_str("content"), Some("Email"));
    }

    #[test]
    fn test_name_defaults_from_kind() {
        let template = NodeTemplate::new(NodeKind::GridCol);
        assert_eq!(instantiate(&template).name, "Grid col");
    }

    #[test]
    fn test_instance_mutation_does_not_leak() {
        let template = NodeTemplate::with_defaults(NodeKind::Button);
        let mut first = instantiate(&template);
        first.set_style("color", "red");
        first.set_property("content", json!("Changed"));

        let second = instantiate(&template);
        assert_eq!(second.style["color"].to_string(), "#ffffff");
        assert_eq!(second.prop_str("content"), Some("Button"));
        assert_eq!(template.properties["content"], json!("Button"));
    }

    #[test]
    fn test_root_node() {
        let root = root_node();
        assert!(root.id.is_root());
        assert_eq!(root.kind, NodeKind::Container);
        assert_eq!(root.name, "Body");
        assert_eq!(root.style["minHeight"].to_string(), "100vh");
    }
}
