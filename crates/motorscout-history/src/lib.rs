//! Vehicle-history data-quality validation.
//!
//! History lookups aggregate facts from several registries, and those facts
//! can disagree. The validator never picks a winner; it reports each
//! disagreement as a [`ValidationIssue`](motorscout_core::ValidationIssue).

pub mod error;
pub mod rules;
pub mod validator;

pub use error::HistoryError;
pub use rules::{Rule, RuleKind, DEFAULT_RULES};
pub use validator::{validate, HistoryValidator};
