use std::sync::LazyLock;

use motorscout_core::{CheckStatus, HistoryCheck, ValidationIssue};
use regex::Regex;

use crate::error::HistoryError;
use crate::rules::{Rule, RuleKind, DEFAULT_RULES};

static DEFAULT_VALIDATOR: LazyLock<HistoryValidator> = LazyLock::new(|| {
    HistoryValidator::new(DEFAULT_RULES).expect("default history rules compile")
});

/// Validate `checks` against [`DEFAULT_RULES`].
///
/// Issues come back in rule order; an empty input yields no issues.
#[must_use]
pub fn validate(checks: &[HistoryCheck]) -> Vec<ValidationIssue> {
    DEFAULT_VALIDATOR.validate(checks)
}

enum Matcher {
    NegatedClaim { claim: Regex, specific: Regex },
    MixedStatus,
}

struct CompiledRule {
    rule: Rule,
    topic: Regex,
    matcher: Matcher,
}

/// A compiled rule table.
pub struct HistoryValidator {
    rules: Vec<CompiledRule>,
}

impl HistoryValidator {
    /// Compile a rule table.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::InvalidPattern`] naming the first rule whose
    /// pattern fails to compile.
    pub fn new(rules: &[Rule]) -> Result<Self, HistoryError> {
        let rules = rules
            .iter()
            .map(|rule| -> Result<CompiledRule, HistoryError> {
                let compile = |field: &'static str, pattern: &str| {
                    Regex::new(pattern).map_err(|source| HistoryError::InvalidPattern {
                        issue_type: rule.issue_type,
                        field,
                        source,
                    })
                };
                let matcher = match rule.kind {
                    RuleKind::NegatedClaim { claim, specific } => Matcher::NegatedClaim {
                        claim: compile("claim", claim)?,
                        specific: compile("specific", specific)?,
                    },
                    RuleKind::MixedStatus => Matcher::MixedStatus,
                };
                Ok(CompiledRule {
                    rule: *rule,
                    topic: compile("topic", rule.topic)?,
                    matcher,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    /// Run every rule over `checks`, in table order.
    #[must_use]
    pub fn validate(&self, checks: &[HistoryCheck]) -> Vec<ValidationIssue> {
        let issues: Vec<ValidationIssue> = self
            .rules
            .iter()
            .filter_map(|compiled| compiled.evaluate(checks))
            .collect();

        tracing::debug!(
            checks = checks.len(),
            issues = issues.len(),
            "history validation complete"
        );
        issues
    }
}

impl CompiledRule {
    fn evaluate(&self, checks: &[HistoryCheck]) -> Option<ValidationIssue> {
        let on_topic: Vec<&HistoryCheck> = checks
            .iter()
            .filter(|c| self.topic.is_match(&c.description))
            .collect();

        let conflicting: Vec<&HistoryCheck> = match &self.matcher {
            Matcher::NegatedClaim { claim, specific } => {
                let is_claim = |c: &HistoryCheck| {
                    c.status == CheckStatus::Pass && claim.is_match(&c.description)
                };
                let is_negation = |c: &HistoryCheck| {
                    c.status.is_adverse()
                        && specific.is_match(&c.description)
                        && !claim.is_match(&c.description)
                };
                let claimed = on_topic.iter().any(|c| is_claim(c));
                let negated = on_topic.iter().any(|c| is_negation(c));
                if !claimed || !negated {
                    return None;
                }
                on_topic
                    .into_iter()
                    .filter(|c| is_claim(c) || is_negation(c))
                    .collect()
            }
            Matcher::MixedStatus => {
                let has = |status: CheckStatus| on_topic.iter().any(|c| c.status == status);
                if on_topic.len() < 2 || !has(CheckStatus::Pass) || !has(CheckStatus::Fail) {
                    return None;
                }
                on_topic
                    .into_iter()
                    .filter(|c| matches!(c.status, CheckStatus::Pass | CheckStatus::Fail))
                    .collect()
            }
        };

        tracing::debug!(
            issue = %self.rule.issue_type,
            conflicting = conflicting.len(),
            "history contradiction detected"
        );

        Some(ValidationIssue {
            issue_type: self.rule.issue_type,
            severity: self.rule.severity,
            description: describe(self.rule.description, &conflicting),
            details: conflicting.into_iter().cloned().collect(),
            recommendation: self.rule.recommendation.to_string(),
        })
    }
}

fn describe(base: &str, conflicting: &[&HistoryCheck]) -> String {
    let quoted: Vec<String> = conflicting
        .iter()
        .map(|c| format!("\"{}\" ({})", c.description, c.status))
        .collect();
    format!("{base}: {}", quoted.join(" vs "))
}

#[cfg(test)]
#[path = "validator_test.rs"]
mod tests;
