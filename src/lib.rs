// Block Canvas - document tree engine and HTML export

pub mod catalog;
pub mod document;
pub mod error;
pub mod event;
pub mod export;
pub mod instantiate;
pub mod interaction;
pub mod markup;
pub mod node;
pub mod reparent;
pub mod validation;

// Re-export main types for convenience
pub use catalog::{BlockTemplate, NodeTemplate};
pub use document::{DeviceMode, Document, NodePatch, MAX_LOGGED_EVENTS};
pub use error::EditError;
pub use event::{ChangeKind, DocumentEvent};
pub use export::{write_export, ExportConfig, EXPORT_FILE_NAME};
pub use interaction::{DragSource, Outcome};
pub use markup::{generate_markup, generate_markup_with};
pub use node::{Node, NodeId, NodeKind, Properties, Style, StyleValue};
pub use reparent::{DropTarget, Placement, Relocation};
pub use validation::{ValidatedDocument, ValidationIssue, ValidationResult, ValidationSeverity};
