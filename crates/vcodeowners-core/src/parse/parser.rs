//! Line and file-level parsers for virtual CODEOWNERS files.
//!
//! This module combines the lexer grammars to classify complete lines and
//! threads the section state from one line to the next.

use super::anomaly::ParseResult;
use super::ast::{Cst, Line, Owner, Rule, SectionHeading};
use super::lexer::{
    SectionComponents, parse_owned_rule, parse_owned_section, parse_owner_list,
    parse_ownerless_rule, parse_ownerless_section,
};
use log::{debug, trace};

/// Section state carried from line to line.
///
/// Only section headings change it. A pattern without owners is a valid rule
/// only while the active section has at least one valid owner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseState {
    /// Name of the section the following rules belong to.
    pub current_section: String,
    /// True when the section heading listed at least one valid owner.
    pub section_has_valid_owners: bool,
}

impl ParseState {
    /// Creates the state that follows a section heading.
    pub fn in_section(name: impl Into<String>, section_has_valid_owners: bool) -> Self {
        Self {
            current_section: name.into(),
            section_has_valid_owners,
        }
    }
}

fn section_heading_from(components: &SectionComponents<'_>, owners: Vec<Owner>) -> SectionHeading {
    SectionHeading {
        optional: components.optional,
        name: components.name.to_string(),
        // Out of range counts are not worth an anomaly
        min_approvers: components
            .min_approvers
            .and_then(|digits| digits.parse().ok())
            .unwrap_or(0),
        spacing: components.spacing.to_string(),
        owners,
        inline_comment: components.comment.to_string(),
    }
}

/// Parses a line starting with `[` or `^[`.
fn parse_section_heading(raw: &str, line_no: usize, state: ParseState) -> (Line, ParseState) {
    if let Ok((_, components)) = parse_ownerless_section(raw) {
        let heading = section_heading_from(&components, Vec::new());
        let next = ParseState::in_section(components.name, false);
        return (Line::section_heading(line_no, raw, heading), next);
    }

    match parse_owned_section(raw) {
        Ok((_, components)) => {
            let owners = parse_owner_list(components.owners);
            let has_valid_owners = owners.iter().any(Owner::is_valid);
            let heading = section_heading_from(&components, owners);
            let next = ParseState::in_section(components.name, has_valid_owners);
            (Line::section_heading(line_no, raw, heading), next)
        }
        Err(_) => {
            trace!("Line {}: malformed section heading", line_no);
            let line = Line::unknown(line_no, raw, state.current_section.as_str());
            (line, state)
        }
    }
}

/// Parses a rule line; `trimmed` is `raw` without surrounding whitespace.
fn parse_rule(raw: &str, trimmed: &str, line_no: usize, state: &ParseState) -> Line {
    if state.section_has_valid_owners {
        if let Ok((_, components)) = parse_ownerless_rule(trimmed) {
            let rule = Rule {
                pattern: components.pattern.to_string(),
                section: state.current_section.clone(),
                spacing: components.spacing.to_string(),
                owners: Vec::new(),
                inline_comment: components.comment.to_string(),
            };
            return Line::rule(line_no, raw, rule);
        }
    }

    match parse_owned_rule(trimmed) {
        Ok((_, components)) => {
            let rule = Rule {
                pattern: components.pattern.to_string(),
                section: state.current_section.clone(),
                spacing: components.spacing.to_string(),
                owners: parse_owner_list(components.owners),
                inline_comment: components.comment.to_string(),
            };
            Line::rule(line_no, raw, rule)
        }
        Err(_) => {
            trace!("Line {}: not a rule", line_no);
            Line::unknown(line_no, raw, state.current_section.as_str())
        }
    }
}

/// Classifies a single line given the state left by the previous lines.
///
/// Returns the parsed line and the state for the next line. `raw` is kept
/// verbatim; whitespace is only trimmed for classification.
pub fn parse_line(raw: &str, line_no: usize, state: ParseState) -> (Line, ParseState) {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return (Line::empty(line_no, raw), state);
    }
    if trimmed.starts_with("#!") {
        return (Line::ignorable_comment(line_no, raw), state);
    }
    if trimmed.starts_with('#') {
        return (Line::comment(line_no, raw), state);
    }
    if trimmed.starts_with('[') || trimmed.starts_with("^[") {
        return parse_section_heading(raw, line_no, state);
    }

    let line = parse_rule(raw, trimmed, line_no, &state);
    (line, state)
}

/// Parses a virtual CODEOWNERS file.
///
/// Never fails: every `\n`-separated line yields exactly one [`Line`] (an
/// empty input yields one empty line), and anything that cannot be
/// classified is reported as an anomaly instead.
pub fn parse_codeowners(content: &str) -> ParseResult {
    debug!("Parsing virtual CODEOWNERS file ({} bytes)", content.len());

    let mut lines = Vec::new();
    let mut state = ParseState::default();

    for (line_idx, raw) in content.split('\n').enumerate() {
        let line_no = line_idx + 1; // 1-based line numbers
        let (line, next) = parse_line(raw, line_no, state);
        trace!("Line {}: {}", line_no, line.kind.as_str());
        lines.push(line);
        state = next;
    }

    let cst = Cst::new(lines);
    let anomalies = cst.anomalies();

    debug!(
        "Parsing complete: {} lines, {} anomalies",
        cst.lines.len(),
        anomalies.len()
    );
    ParseResult::new(cst, anomalies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{LineKind, OwnerKind};

    fn rule_of(line: &Line) -> &Rule {
        match &line.kind {
            LineKind::Rule(rule) => rule,
            other => panic!("Expected rule, got {:?}", other),
        }
    }

    fn heading_of(line: &Line) -> &SectionHeading {
        match &line.kind {
            LineKind::SectionHeading(heading) => heading,
            other => panic!("Expected section heading, got {:?}", other),
        }
    }

    #[test]
    fn parse_empty_content() {
        let result = parse_codeowners("");
        assert!(result.is_ok());
        assert_eq!(result.cst.lines, vec![Line::empty(1, "")]);
    }

    #[test]
    fn parse_blank_lines() {
        let result = parse_codeowners("\n   \n\t");
        assert_eq!(result.cst.lines.len(), 3);
        assert!(
            result
                .cst
                .lines
                .iter()
                .all(|line| line.kind == LineKind::Empty)
        );
        assert_eq!(result.cst.lines[1].raw, "   ");
    }

    #[test]
    fn parse_comments() {
        let result = parse_codeowners("# comment\n  #! ignorable");
        assert!(result.is_ok());
        assert_eq!(result.cst.lines[0], Line::comment(1, "# comment"));
        assert_eq!(result.cst.lines[1], Line::ignorable_comment(2, "  #! ignorable"));
    }

    #[test]
    fn parse_simple_rule() {
        let result = parse_codeowners("*.rs @rustacean");
        assert!(result.is_ok());
        let rule = rule_of(&result.cst.lines[0]);
        assert_eq!(rule.pattern, "*.rs");
        assert_eq!(rule.spacing, " ");
        assert_eq!(rule.section, "");
        assert_eq!(rule.owners, vec![Owner::team_or_user("@rustacean")]);
        assert_eq!(rule.inline_comment, "");
    }

    #[test]
    fn parse_rule_with_mixed_owners_and_comment() {
        let result = parse_codeowners("/src/   @dev dev@example.com nope # the source");
        let rule = rule_of(&result.cst.lines[0]);
        assert_eq!(rule.spacing, "   ");
        let kinds: Vec<_> = rule.owners.iter().map(|o| o.kind).collect();
        assert_eq!(
            kinds,
            vec![OwnerKind::TeamOrUser, OwnerKind::Email, OwnerKind::Invalid]
        );
        assert_eq!(rule.inline_comment, " the source");

        assert_eq!(result.anomalies.len(), 1);
        assert_eq!(result.anomalies[0].reason, "Invalid user 'nope'");
        assert_eq!(result.anomalies[0].line_no, 1);
    }

    #[test]
    fn parse_rule_keeps_raw_untrimmed() {
        let result = parse_codeowners("  *.md @docs  ");
        let line = &result.cst.lines[0];
        assert_eq!(line.raw, "  *.md @docs  ");
        assert_eq!(rule_of(line).pattern, "*.md");
    }

    #[test]
    fn ownerless_rule_outside_section_is_unknown() {
        let result = parse_codeowners("*.rs\n*.js @frontend");
        assert!(result.cst.lines[0].is_unknown());
        assert!(result.cst.lines[1].is_rule());
        assert_eq!(result.anomalies.len(), 1);
        assert_eq!(result.anomalies[0].reason, "Unknown line type");
    }

    #[test]
    fn ownerless_rule_inherits_owned_section() {
        let result = parse_codeowners("^[s] @a\n*");
        assert!(result.is_ok());
        let rule = rule_of(&result.cst.lines[1]);
        assert_eq!(rule.section, "s");
        assert_eq!(rule.pattern, "*");
        assert!(rule.owners.is_empty());
    }

    #[test]
    fn ownerless_rule_in_unowned_section_is_unknown() {
        let result = parse_codeowners("^[s]\n*");
        assert!(result.cst.lines[1].is_unknown());
        assert_eq!(result.anomalies.len(), 1);
        assert_eq!(result.anomalies[0].line_no, 2);
        assert_eq!(result.anomalies[0].raw, "*");
    }

    #[test]
    fn ownerless_rule_in_section_with_only_invalid_owners_is_unknown() {
        let result = parse_codeowners("[s] nobody\nsrc/");
        assert!(result.cst.lines[1].is_unknown());
        // invalid section owner + unknown rule line
        assert_eq!(result.anomalies.len(), 2);
    }

    #[test]
    fn unknown_rule_records_active_section() {
        let result = parse_codeowners("[s]\nsrc/");
        assert_eq!(
            result.cst.lines[1].kind,
            LineKind::Unknown {
                section: "s".to_string()
            }
        );
    }

    #[test]
    fn rules_record_their_section() {
        let result = parse_codeowners("*.md @docs\n[Backend] @backend\n*.go @gophers\n[Frontend]\n*.js @web");
        assert!(result.is_ok());
        let sections: Vec<_> = result.cst.rules().map(|r| r.section.as_str()).collect();
        assert_eq!(sections, vec!["", "Backend", "Frontend"]);
    }

    #[test]
    fn section_heading_without_owners() {
        let result = parse_codeowners("[section]");
        assert!(result.is_ok());
        let heading = heading_of(&result.cst.lines[0]);
        assert!(!heading.optional);
        assert_eq!(heading.name, "section");
        assert_eq!(heading.min_approvers, 0);
        assert!(heading.owners.is_empty());
    }

    #[test]
    fn section_heading_with_everything() {
        let result = parse_codeowners("^[Backend][2] @backend ops@example.com # backend");
        assert!(result.is_ok());
        let heading = heading_of(&result.cst.lines[0]);
        assert!(heading.optional);
        assert_eq!(heading.name, "Backend");
        assert_eq!(heading.min_approvers, 2);
        assert_eq!(heading.spacing, " ");
        assert_eq!(heading.owners.len(), 2);
        assert_eq!(heading.inline_comment, " backend");
    }

    #[test]
    fn section_min_approvers_overflow_defaults_to_zero() {
        let result = parse_codeowners("[s][99999999999999999999] @a");
        assert!(result.is_ok());
        assert_eq!(heading_of(&result.cst.lines[0]).min_approvers, 0);
    }

    #[test]
    fn malformed_section_heading_is_unknown() {
        let result = parse_codeowners("[s] @a\n[broken\n*.rs");
        assert!(result.cst.lines[1].is_unknown());
        // state survives the broken heading
        assert!(result.cst.lines[2].is_rule());
        assert_eq!(rule_of(&result.cst.lines[2]).section, "s");
    }

    #[test]
    fn indented_section_heading_is_unknown() {
        let result = parse_codeowners("  [s] @a");
        assert!(result.cst.lines[0].is_unknown());
    }

    #[test]
    fn carriage_returns_stay_in_raw() {
        let result = parse_codeowners("[s] @a\r\n*.rs @b\r\n");
        assert!(result.is_ok());
        assert_eq!(result.cst.lines.len(), 3);
        assert_eq!(result.cst.lines[0].raw, "[s] @a\r");
        assert_eq!(heading_of(&result.cst.lines[0]).owners.len(), 1);
        assert_eq!(result.cst.lines[1].raw, "*.rs @b\r");
        assert_eq!(rule_of(&result.cst.lines[1]).owners.len(), 1);
    }

    #[test]
    fn parse_line_threads_state() {
        let (line, state) = parse_line("[s] @a", 1, ParseState::default());
        assert!(line.is_section_heading());
        assert_eq!(state, ParseState::in_section("s", true));

        let (line, state) = parse_line("# comment", 2, state);
        assert_eq!(line.kind, LineKind::Comment);
        assert_eq!(state, ParseState::in_section("s", true));

        let (line, state) = parse_line("[t] nope", 3, state);
        assert_eq!(heading_of(&line).owners.len(), 1);
        assert_eq!(state, ParseState::in_section("t", false));
    }

    #[test]
    fn line_numbers_are_one_based() {
        let result = parse_codeowners("# a\n\n*.rs @b");
        let numbers: Vec<_> = result.cst.lines.iter().map(|l| l.line_no).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }
}
