use motorscout_core::IssueType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("invalid {field} pattern for rule {issue_type}: {source}")]
    InvalidPattern {
        issue_type: IssueType,
        field: &'static str,
        #[source]
        source: regex::Error,
    },
}
