use crate::{Document, Node, NodeId, NodeKind};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Validation severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationSeverity {
    Info,    // cosmetic, export still fine
    Warning, // probably not what the author meant
    Error,   // tree invariant broken
}

/// Validation issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: ValidationSeverity,
    pub message: String,
    pub affected_nodes: Vec<NodeId>,
    pub issue_type: ValidationIssueType,
}

/// Types of validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationIssueType {
    DuplicateId,
    InvalidRoot,
    UnknownProperty,
    MalformedProperty,
    MissingContent,
    IgnoredChildren,
}

/// Complete validation result
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create a new empty validation result
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Add an issue
    pub fn add_issue(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.severity == ValidationSeverity::Error)
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.severity == ValidationSeverity::Warning)
    }

    /// Get all issues at a severity
    pub fn with_severity(&self, severity: ValidationSeverity) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == severity)
            .collect()
    }

    /// Get all errors
    pub fn errors(&self) -> Vec<&ValidationIssue> {
        self.with_severity(ValidationSeverity::Error)
    }

    /// Get all warnings
    pub fn warnings(&self) -> Vec<&ValidationIssue> {
        self.with_severity(ValidationSeverity::Warning)
    }

    /// Get all info messages
    pub fn info(&self) -> Vec<&ValidationIssue> {
        self.with_severity(ValidationSeverity::Info)
    }

    /// Check if validation passed (no errors)
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }
}

/// Validator for document trees
pub struct Validator;

impl Validator {
    /// Run all validations on a document
    pub fn validate(document: &Document) -> ValidationResult {
        Self::validate_tree(document.root())
    }

    /// Run all validations on a tree rooted at `root`
    pub fn validate_tree(root: &Node) -> ValidationResult {
        let mut result = ValidationResult::new();

        if !root.id.is_root() || root.kind != NodeKind::Container {
            result.add_issue(ValidationIssue {
                severity: ValidationSeverity::Error,
                message: format!(
                    "Document root must be the fixed root container, found {} ({})",
                    root.id, root.kind
                ),
                affected_nodes: vec![root.id],
                issue_type: ValidationIssueType::InvalidRoot,
            });
        }

        let duplicates = Self::find_duplicate_ids(root);
        if !duplicates.is_empty() {
            result.add_issue(ValidationIssue {
                severity: ValidationSeverity::Error,
                message: format!(
                    "{} id(s) appear more than once in the tree",
                    duplicates.len()
                ),
                affected_nodes: duplicates,
                issue_type: ValidationIssueType::DuplicateId,
            });
        }

        for node in root.iter() {
            Self::check_properties(node, &mut result);
        }

        result
    }

    fn find_duplicate_ids(root: &Node) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();

        for node in root.iter() {
            if !seen.insert(node.id) && !duplicates.contains(&node.id) {
                duplicates.push(node.id);
            }
        }

        duplicates
    }

    /// Check a node's property bag against its kind's schema
    fn check_properties(node: &Node, result: &mut ValidationResult) {
        let allowed = node.kind.property_keys();

        let mut unknown: Vec<&str> = node
            .properties
            .keys()
            .map(String::as_str)
            .filter(|key| !allowed.contains(key))
            .collect();
        unknown.sort_unstable();
        if !unknown.is_empty() {
            result.add_issue(ValidationIssue {
                severity: ValidationSeverity::Warning,
                message: format!(
                    "Properties not used by {} elements: {}",
                    node.kind,
                    unknown.join(", ")
                ),
                affected_nodes: vec![node.id],
                issue_type: ValidationIssueType::UnknownProperty,
            });
        }

        if let Some(options) = node.properties.get("options") {
            let well_formed = options
                .as_array()
                .map(|items| items.iter().all(|o| o.is_string() || o.is_number()))
                .unwrap_or(false);
            if !well_formed {
                result.add_issue(ValidationIssue {
                    severity: ValidationSeverity::Warning,
                    message: "Select options must be a list of strings".to_string(),
                    affected_nodes: vec![node.id],
                    issue_type: ValidationIssueType::MalformedProperty,
                });
            }
        }

        if let Some(checked) = node.properties.get("checked") {
            if !checked.is_boolean() {
                result.add_issue(ValidationIssue {
                    severity: ValidationSeverity::Warning,
                    message: "The checked property must be true or false".to_string(),
                    affected_nodes: vec![node.id],
                    issue_type: ValidationIssueType::MalformedProperty,
                });
            }
        }

        if node.kind.is_text_bearing()
            && node.prop_str("content").map_or(true, str::is_empty)
            && node.children.is_empty()
        {
            result.add_issue(ValidationIssue {
                severity: ValidationSeverity::Info,
                message: format!("{} \"{}\" has no content and renders empty", node.kind, node.name),
                affected_nodes: vec![node.id],
                issue_type: ValidationIssueType::MissingContent,
            });
        }

        let children_ignored = !node.children.is_empty()
            && !node.kind.is_layout()
            && (!node.kind.is_text_bearing()
                || node.prop_str("content").is_some_and(|c| !c.is_empty()));
        if children_ignored {
            result.add_issue(ValidationIssue {
                severity: ValidationSeverity::Info,
                message: format!(
                    "{} child node(s) of {} \"{}\" are not exported",
                    node.children.len(),
                    node.kind,
                    node.name
                ),
                affected_nodes: node.children.iter().map(|c| c.id).collect(),
                issue_type: ValidationIssueType::IgnoredChildren,
            });
        }
    }
}

/// Extension trait for Document to add validation
pub trait ValidatedDocument {
    /// Validate the document
    fn validate(&self) -> ValidationResult;

    /// Get nodes with validation issues, keyed to their worst severity
    fn nodes_with_issues(&self, result: &ValidationResult) -> HashMap<NodeId, ValidationSeverity>;
}

impl ValidatedDocument for Document {
    fn validate(&self) -> ValidationResult {
        Validator::validate(self)
    }

    fn nodes_with_issues(&self, result: &ValidationResult) -> HashMap<NodeId, ValidationSeverity> {
        let mut nodes = HashMap::new();

        for issue in &result.issues {
            for node_id in &issue.affected_nodes {
                nodes
                    .entry(*node_id)
                    .and_modify(|severity| {
                        // Keep the highest severity
                        if issue.severity as u8 > *severity as u8 {
                            *severity = issue.severity;
                        }
                    })
                    .or_insert(issue.severity);
            }
        }

        nodes
    }
}
