use serde::{Deserialize, Serialize};

/// Result of checking a single SPDX expression, one row of the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckedExpression {
    /// The expression as given on the command line or in the input file.
    pub input: String,
    pub verdict: Verdict,
    /// Canonical rendering; `None` when the expression did not parse.
    pub canonical: Option<String>,
    /// Normalized rendering, present with `--normalize`.
    pub normalized: Option<String>,
    /// Disjunctive normal form, present with `--dnf`.
    pub dnf: Option<String>,
    /// Atomic licenses, present with `--decompose`.
    pub licenses: Vec<String>,
    /// Parse error or policy note explaining a non-pass verdict.
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Verdict {
    Pass,
    Warn,
    Error,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Pass => write!(f, "pass"),
            Verdict::Warn => write!(f, "warn"),
            Verdict::Error => write!(f, "error"),
        }
    }
}
