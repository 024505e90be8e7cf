//! Diagnostics collected while parsing.
//!
//! Anomalies never stop parsing. They are returned next to a complete
//! [`Cst`](super::Cst) and the caller decides whether to fail, warn or skip.

use std::fmt::{self, Display};

use super::ast::Cst;

/// Reason reported for lines that could not be classified.
pub const UNKNOWN_LINE_TYPE: &str = "Unknown line type";

/// A problem found in a virtual CODEOWNERS file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anomaly {
    /// The line number where the problem occurred (1-based).
    pub line_no: usize,
    /// Description of the problem.
    pub reason: String,
    /// The offending line, as written.
    pub raw: String,
}

impl Anomaly {
    /// Creates a new anomaly.
    pub fn new(line_no: usize, reason: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            line_no,
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    /// Creates an anomaly for a line that could not be classified.
    pub fn unknown_line(line_no: usize, raw: impl Into<String>) -> Self {
        Self::new(line_no, UNKNOWN_LINE_TYPE, raw)
    }

    /// Creates an anomaly for an owner token that is neither `@name` nor an e-mail.
    pub fn invalid_owner(line_no: usize, owner: &str, raw: impl Into<String>) -> Self {
        Self::new(line_no, format!("Invalid user '{}'", owner), raw)
    }
}

impl Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {:>4}, {}: \"{}\"", self.line_no, self.reason, self.raw)
    }
}

/// Formats anomalies as a human readable report.
pub fn format_anomalies(anomalies: &[Anomaly]) -> String {
    let mut output = String::from("Syntax errors found in the input:\n");
    for anomaly in anomalies {
        output.push_str("  ");
        output.push_str(&anomaly.to_string());
        output.push('\n');
    }
    output
}

/// The result of parsing a virtual CODEOWNERS file.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// The concrete syntax tree, one line per input line.
    pub cst: Cst,
    /// Unknown lines and invalid owners found in the tree.
    pub anomalies: Vec<Anomaly>,
}

impl ParseResult {
    /// Creates a parse result from a tree and its anomalies.
    pub fn new(cst: Cst, anomalies: Vec<Anomaly>) -> Self {
        Self { cst, anomalies }
    }

    /// Returns true if parsing found no anomalies.
    pub fn is_ok(&self) -> bool {
        self.anomalies.is_empty()
    }

    /// Returns true if there were anomalies.
    pub fn has_anomalies(&self) -> bool {
        !self.anomalies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anomaly_display_pads_line_number() {
        let anomaly = Anomaly::unknown_line(42, "invalid line");
        assert_eq!(
            anomaly.to_string(),
            "Line   42, Unknown line type: \"invalid line\""
        );
    }

    #[test]
    fn invalid_owner_reason() {
        let anomaly = Anomaly::invalid_owner(3, "plain", "*.rs plain");
        assert_eq!(anomaly.reason, "Invalid user 'plain'");
        assert_eq!(anomaly.raw, "*.rs plain");
    }

    #[test]
    fn report_lists_every_anomaly() {
        let anomalies = vec![Anomaly::unknown_line(42, "invalid line")];
        assert_eq!(
            format_anomalies(&anomalies),
            "Syntax errors found in the input:\n  Line   42, Unknown line type: \"invalid line\"\n"
        );
    }

    #[test]
    fn parse_result_status() {
        let ok = ParseResult::new(Cst::default(), Vec::new());
        assert!(ok.is_ok());
        assert!(!ok.has_anomalies());

        let bad = ParseResult::new(Cst::default(), vec![Anomaly::unknown_line(1, "x")]);
        assert!(!bad.is_ok());
        assert!(bad.has_anomalies());
    }
}
