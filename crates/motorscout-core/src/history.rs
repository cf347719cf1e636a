use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
    Alert,
}

impl CheckStatus {
    /// `true` for the statuses that report a problem with the vehicle.
    #[must_use]
    pub fn is_adverse(self) -> bool {
        matches!(self, CheckStatus::Fail | CheckStatus::Alert)
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "pass"),
            CheckStatus::Fail => write!(f, "fail"),
            CheckStatus::Alert => write!(f, "alert"),
        }
    }
}

/// One fact returned by a vehicle-history lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryCheck {
    pub description: String,
    pub status: CheckStatus,
}

impl HistoryCheck {
    #[must_use]
    pub fn new(description: impl Into<String>, status: CheckStatus) -> Self {
        Self {
            description: description.into(),
            status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueType {
    WriteOffContradiction,
    StolenContradiction,
    FinanceContradiction,
    MotInconsistency,
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueType::WriteOffContradiction => write!(f, "WRITE_OFF_CONTRADICTION"),
            IssueType::StolenContradiction => write!(f, "STOLEN_CONTRADICTION"),
            IssueType::FinanceContradiction => write!(f, "FINANCE_CONTRADICTION"),
            IssueType::MotInconsistency => write!(f, "MOT_INCONSISTENCY"),
        }
    }
}

/// A disagreement between history checks, flagged for a human to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub severity: Severity,
    pub description: String,
    /// The conflicting checks, in input order.
    pub details: Vec<HistoryCheck>,
    pub recommendation: String,
}

/// Load a JSON array of [`HistoryCheck`] from disk.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed.
pub fn load_checks(path: &Path) -> Result<Vec<HistoryCheck>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SnapshotIo {
        path: path.display().to_string(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| ConfigError::SnapshotParse {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_status_round_trips_lowercase() {
        let check: HistoryCheck = serde_json::from_value(serde_json::json!({
            "description": "Category D write-off",
            "status": "alert"
        }))
        .unwrap();
        assert_eq!(check.status, CheckStatus::Alert);
        assert!(check.status.is_adverse());
        assert!(!CheckStatus::Pass.is_adverse());
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result: Result<HistoryCheck, _> = serde_json::from_value(serde_json::json!({
            "description": "Never been written off",
            "status": "maybe"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn issue_serializes_type_and_severity() {
        let issue = ValidationIssue {
            issue_type: IssueType::MotInconsistency,
            severity: Severity::Medium,
            description: "MOT records disagree".to_string(),
            details: vec![],
            recommendation: "Check the MOT history".to_string(),
        };
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(value["type"], "MOT_INCONSISTENCY");
        assert_eq!(value["severity"], "medium");
    }

    #[test]
    fn severity_orders_low_to_high() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
    }

    #[test]
    fn issue_type_display_matches_wire_name() {
        assert_eq!(
            IssueType::WriteOffContradiction.to_string(),
            "WRITE_OFF_CONTRADICTION"
        );
    }
}
