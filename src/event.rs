use crate::{DeviceMode, NodeId, NodeKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver, Sender};

/// A document change with timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEvent {
    pub timestamp: DateTime<Utc>,
    pub change: ChangeKind,
}

impl DocumentEvent {
    /// Create a new event with the current timestamp
    pub fn new(change: ChangeKind) -> Self {
        Self {
            timestamp: Utc::now(),
            change,
        }
    }

    /// Create a new event with a specific timestamp
    pub fn with_timestamp(timestamp: DateTime<Utc>, change: ChangeKind) -> Self {
        Self { timestamp, change }
    }

    /// Whether the change altered the tree (as opposed to view state)
    pub fn is_structural(&self) -> bool {
        matches!(
            self.change,
            ChangeKind::NodeAdded { .. }
                | ChangeKind::BlockAdded { .. }
                | ChangeKind::NodeMoved { .. }
                | ChangeKind::NodeDeleted { .. }
                | ChangeKind::ChildrenReplaced { .. }
        )
    }
}

/// Types of changes that can occur in a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChangeKind {
    NodeAdded {
        id: NodeId,
        parent: NodeId,
        kind: NodeKind,
    },

    BlockAdded {
        block_id: String,
        root: NodeId,
        parent: NodeId,
        node_count: usize,
    },

    NodeUpdated {
        id: NodeId,
    },

    ChildrenReplaced {
        id: NodeId,
        child_count: usize,
    },

    StyleChanged {
        id: NodeId,
        keys: Vec<String>,
    },

    NodeMoved {
        id: NodeId,
        from: NodeId,
        to: NodeId,
    },

    NodeDeleted {
        id: NodeId,
        removed: Vec<NodeId>,
    },

    SelectionChanged {
        old: Option<NodeId>,
        new: Option<NodeId>,
    },

    DeviceChanged {
        device: DeviceMode,
    },

    PreviewToggled {
        active: bool,
    },
}

/// Fan-out of events to subscribed readers
#[derive(Debug, Default)]
pub struct Subscribers {
    senders: Vec<Sender<DocumentEvent>>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reader; it receives every event published after this call
    pub fn subscribe(&mut self) -> Receiver<DocumentEvent> {
        let (tx, rx) = mpsc::channel();
        self.senders.push(tx);
        rx
    }

    /// Send to every live reader, dropping the ones that hung up
    pub fn publish(&mut self, event: &DocumentEvent) {
        self.senders.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}
