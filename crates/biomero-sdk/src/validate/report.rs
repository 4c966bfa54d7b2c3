use crate::documents::WorkflowSchema;
use biomero_core::{IssueSeverity, ValidationIssue};

/// Outcome of one validation pass. `manifest` is present exactly when no
/// issue has `Error` severity.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub manifest: Option<WorkflowSchema>,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub(crate) fn from_issues(mut issues: Vec<ValidationIssue>) -> Self {
        ValidationIssue::sort_stable(&mut issues);
        Self {
            manifest: None,
            issues,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.manifest.is_some()
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Warning)
    }

    /// Drops warnings of a valid manifest.
    pub fn into_result(self) -> Result<WorkflowSchema, Vec<ValidationIssue>> {
        match self.manifest {
            Some(manifest) => Ok(manifest),
            None => Err(self.issues),
        }
    }
}
