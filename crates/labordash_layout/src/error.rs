//! Layout errors.

use crate::validate::ValidationIssue;
use labordash_core::CoreError;

/// Result type for page composition
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Failure while composing the page
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Snapshot lookup or metric failure
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A tab group was declared with no tabs
    #[error("Tab group {group} has no tabs")]
    EmptyTabGroup {
        /// Tab group id
        group: String,
    },

    /// The initially active tab is not one of the group's tabs
    #[error("Tab group {group} has no tab with id {active}")]
    UnknownActiveTab {
        /// Tab group id
        group: String,
        /// Requested active tab id
        active: String,
    },

    /// Two tabs in one group share an id
    #[error("Tab group {group} declares tab {tab} more than once")]
    DuplicateTab {
        /// Tab group id
        group: String,
        /// Repeated tab id
        tab: String,
    },

    /// The composed tree broke a structural invariant
    #[error("Page failed validation with {} issue(s): {}", .issues.len(), join_issues(.issues))]
    Invalid {
        /// Every issue found
        issues: Vec<ValidationIssue>,
    },
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
