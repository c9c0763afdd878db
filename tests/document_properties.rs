#[path = "fixtures/sample_documents.rs"]
mod sample_documents;

use block_canvas::{
    catalog, ChangeKind, Document, DropTarget, EditError, NodeId, NodeKind, NodePatch, Placement,
    Style, StyleValue,
};
use proptest::prelude::*;
use sample_documents::{all_ids, create_nested_document, ids_unique, owner_count};

/// A random edit, with node references as indexes into the current id list
#[derive(Debug, Clone)]
enum Op {
    Add { kind: NodeKind, parent: usize },
    AddBlock { block: usize, parent: usize },
    Move { active: usize, over: Option<usize> },
    Delete { target: usize },
    Style { target: usize, value: u8 },
    Select { target: usize },
    Retype { target: usize, kind: NodeKind },
}

fn kind_strategy() -> impl Strategy<Value = NodeKind> {
    prop::sample::select(NodeKind::ALL.to_vec())
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (kind_strategy(), any::<usize>()).prop_map(|(kind, parent)| Op::Add { kind, parent }),
        1 => (any::<usize>(), any::<usize>()).prop_map(|(block, parent)| Op::AddBlock { block, parent }),
        3 => (any::<usize>(), prop::option::of(any::<usize>()))
            .prop_map(|(active, over)| Op::Move { active, over }),
        1 => any::<usize>().prop_map(|target| Op::Delete { target }),
        1 => (any::<usize>(), any::<u8>()).prop_map(|(target, value)| Op::Style { target, value }),
        1 => any::<usize>().prop_map(|target| Op::Select { target }),
        1 => (any::<usize>(), kind_strategy()).prop_map(|(target, kind)| Op::Retype { target, kind }),
    ]
}

fn pick(ids: &[NodeId], index: usize) -> NodeId {
    ids[index % ids.len()]
}

fn apply(doc: &mut Document, op: &Op) {
    let ids = all_ids(doc);
    let _ = match *op {
        Op::Add { kind, parent } => doc.add_node(kind, pick(&ids, parent)).map(|_| ()),
        Op::AddBlock { block, parent } => {
            let blocks = catalog::blocks();
            let block_id = &blocks[block % blocks.len()].id;
            doc.add_block(block_id, pick(&ids, parent)).map(|_| ())
        }
        Op::Move { active, over } => {
            let target = match over {
                Some(over) => DropTarget::Node(pick(&ids, over)),
                None => DropTarget::Canvas,
            };
            doc.move_node(pick(&ids, active), target).map(|_| ())
        }
        Op::Delete { target } => doc.delete_node(pick(&ids, target)),
        Op::Style { target, value } => {
            let mut patch = Style::new();
            patch.insert("zIndex".to_string(), StyleValue::Number(f64::from(value)));
            doc.update_node_style(pick(&ids, target), &patch)
        }
        Op::Select { target } => doc.select_node(Some(pick(&ids, target))),
        Op::Retype { target, kind } => doc.update_node(pick(&ids, target), NodePatch::new().kind(kind)),
    };
}

proptest! {
    #[test]
    fn prop_tree_invariants_hold(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut doc = Document::new();

        for op in &ops {
            apply(&mut doc, op);

            prop_assert!(doc.root().id.is_root());
            prop_assert_eq!(doc.root().kind, NodeKind::Container);
            prop_assert!(ids_unique(&doc));
            for id in all_ids(&doc).into_iter().filter(|id| !id.is_root()) {
                prop_assert_eq!(owner_count(doc.root(), id), 1);
            }
            if let Some(selected) = doc.selected_id() {
                prop_assert!(doc.contains(selected));
            }
        }
    }

    #[test]
    fn prop_move_conserves_subtree(
        setup in prop::collection::vec(op_strategy(), 1..25),
        active in any::<usize>(),
        over in prop::option::of(any::<usize>()),
    ) {
        let mut doc = Document::new();
        for op in &setup {
            apply(&mut doc, op);
        }

        let ids = all_ids(&doc);
        let active = pick(&ids, active);
        let target = match over {
            Some(over) => DropTarget::Node(pick(&ids, over)),
            None => DropTarget::Canvas,
        };
        let subtree_before = doc.get_node(active).unwrap().clone();
        let count_before = doc.node_count();

        match doc.move_node(active, target) {
            Ok(relocation) => {
                let moved = doc.get_node(active).unwrap();
                prop_assert_eq!(moved, &subtree_before);
                prop_assert_eq!(doc.parent_of(active), Some(relocation.placement.parent()));
                let parent_kind = doc.get_node(relocation.placement.parent()).unwrap().kind;
                prop_assert!(parent_kind.is_drop_container());
                if let DropTarget::Node(over) = target {
                    let over_is_container = doc.get_node(over).unwrap().kind.is_drop_container();
                    let expected = if over_is_container { over } else { NodeId::ROOT };
                    prop_assert_eq!(relocation.placement.parent(), expected);
                }
            }
            Err(EditError::RootImmutable) => prop_assert!(active.is_root()),
            Err(EditError::WouldCreateCycle { target: over, .. }) => {
                let over = subtree_before.find(over);
                prop_assert!(over.is_some_and(|node| node.kind.is_drop_container()));
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }

        prop_assert_eq!(doc.node_count(), count_before);
        prop_assert_eq!(owner_count(doc.root(), active), usize::from(!active.is_root()));
    }

    #[test]
    fn prop_style_merge_idempotent(key in "[a-z]{1,8}([A-Z][a-z]{1,6})?", value in "[a-z0-9#]{1,10}") {
        let mut doc = Document::new();
        let id = doc.add_node(NodeKind::Card, NodeId::ROOT).unwrap();
        let mut patch = Style::new();
        patch.insert(key, StyleValue::Text(value));

        doc.update_node_style(id, &patch).unwrap();
        let once = doc.get_node(id).unwrap().style.clone();
        doc.update_node_style(id, &patch).unwrap();

        prop_assert_eq!(&doc.get_node(id).unwrap().style, &once);
    }
}

#[test]
fn test_move_text_out_of_container() {
    let mut doc = Document::new();
    let c = doc.add_node(NodeKind::Container, NodeId::ROOT).unwrap();
    let t = doc.add_node(NodeKind::Text, c).unwrap();

    doc.move_node(t, NodeId::ROOT).unwrap();

    assert!(doc.get_node(c).unwrap().children.is_empty());
    let root_children: Vec<NodeId> = doc.root().children.iter().map(|n| n.id).collect();
    assert!(root_children.contains(&c));
    assert!(root_children.contains(&t));
}

#[test]
fn test_delete_container_with_descendants() {
    let (mut doc, container, section, text) = create_nested_document();
    doc.select_node(Some(section)).unwrap();

    doc.delete_node(container).unwrap();

    for id in [container, section, text] {
        assert!(!doc.contains(id));
    }
    assert_eq!(doc.selected_id(), None);
    assert!(matches!(
        doc.events().last().map(|e| &e.change),
        Some(ChangeKind::SelectionChanged { new: None, .. })
    ));
}

#[test]
fn test_root_survives_every_attempt() {
    let (mut doc, container, _, text) = create_nested_document();

    assert!(doc.move_node(NodeId::ROOT, container).is_err());
    assert!(doc.move_node(NodeId::ROOT, DropTarget::Canvas).is_err());
    assert!(doc.delete_node(NodeId::ROOT).is_err());

    assert!(doc.root().id.is_root());
    assert_eq!(doc.ancestors(text), Some(vec![NodeId::ROOT, container, doc.parent_of(text).unwrap()]));
}

#[test]
fn test_moving_into_descendant_leaves_tree_untouched() {
    let (mut doc, container, section, _) = create_nested_document();
    let before = doc.snapshot();

    assert!(matches!(
        doc.move_node(container, section),
        Err(EditError::WouldCreateCycle { .. })
    ));
    assert_eq!(doc.snapshot(), before);
}

#[test]
fn test_moving_onto_own_leaf_falls_back_to_root() {
    let (mut doc, container, section, text) = create_nested_document();
    let subtree = doc.get_node(container).unwrap().clone();

    let relocation = doc.move_node(container, text).unwrap();

    assert_eq!(relocation.placement, Placement::RootFallback);
    assert_eq!(doc.parent_of(container), Some(NodeId::ROOT));
    assert_eq!(doc.get_node(container), Some(&subtree));
    assert_eq!(doc.parent_of(text), Some(section));
    assert!(ids_unique(&doc));
}
