//! The contradiction rule table.
//!
//! Adding a contradiction type means adding a row here; the validator's
//! control flow does not change. Patterns are case-insensitive regexes
//! matched against `HistoryCheck::description`.

use motorscout_core::{IssueType, Severity};

#[derive(Debug, Clone, Copy)]
pub enum RuleKind {
    /// A `pass` check asserting the generic claim, contradicted by a
    /// `fail`/`alert` check matching `specific` that is not itself a claim.
    NegatedClaim {
        claim: &'static str,
        specific: &'static str,
    },
    /// Two or more checks on the topic with at least one `pass` and one `fail`.
    MixedStatus,
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub issue_type: IssueType,
    pub severity: Severity,
    /// Groups the checks this rule looks at.
    pub topic: &'static str,
    pub kind: RuleKind,
    pub description: &'static str,
    pub recommendation: &'static str,
}

/// Rules in reporting order.
pub const DEFAULT_RULES: &[Rule] = &[
    Rule {
        issue_type: IssueType::WriteOffContradiction,
        severity: Severity::High,
        topic: r"(?i)\b(write[- ]?offs?|written[- ]off|category|cat\s+[abcdns])\b",
        kind: RuleKind::NegatedClaim {
            claim: r"(?i)\b(never\s+(been\s+)?written[- ]off|not\s+(been\s+)?(recorded\s+as\s+)?(a\s+)?(written[- ]off|write[- ]?off)|no\s+(recorded\s+)?write[- ]?offs?)\b",
            specific: r"(?i)\b(category\s*:?\s*([abcdns]|unknown|not\s+known)|cat\s+[abcdns]|write[- ]?offs?|written[- ]off)\b",
        },
        description: "History checks disagree about whether the vehicle has been written off",
        recommendation: "Treat the vehicle as written off until proven otherwise. Category A, B, C, D, N and S vehicles are written off by definition, whatever a generic \"never been written off\" check says. Confirm the category with the insurer's record before purchase.",
    },
    Rule {
        issue_type: IssueType::StolenContradiction,
        severity: Severity::High,
        topic: r"(?i)\bstolen\b",
        kind: RuleKind::NegatedClaim {
            claim: r"(?i)\b(not\s+(been\s+)?(recorded|reported|registered|listed)\s+(as\s+)?stolen|never\s+(been\s+)?(reported\s+)?stolen|no\s+stolen\s+(markers?|records?))\b",
            specific: r"(?i)\bstolen\b",
        },
        description: "History checks disagree about whether the vehicle is recorded as stolen",
        recommendation: "Do not proceed until the police national computer record has been checked directly. A single stolen marker outweighs a generic clear result.",
    },
    Rule {
        issue_type: IssueType::FinanceContradiction,
        severity: Severity::Medium,
        topic: r"(?i)\bfinance\b",
        kind: RuleKind::NegatedClaim {
            claim: r"(?i)\b(no\s+(outstanding\s+)?finance|finance\s+(cleared|settled|repaid)|not\s+(subject\s+to|on)\s+(outstanding\s+)?finance)\b",
            specific: r"(?i)\bfinance\b",
        },
        description: "History checks disagree about outstanding finance on the vehicle",
        recommendation: "Ask the seller for a settlement letter from the finance company. A vehicle with outstanding finance still belongs to the lender.",
    },
    Rule {
        issue_type: IssueType::MotInconsistency,
        severity: Severity::Medium,
        topic: r"(?i)\bmot\b",
        kind: RuleKind::MixedStatus,
        description: "MOT checks report both a pass and a fail",
        recommendation: "Review the full MOT history on the DVSA service and ask the seller for the latest certificate.",
    },
];
