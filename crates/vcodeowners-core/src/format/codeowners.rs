//! Canonical CODEOWNERS output.
//!
//! Rules and section headings with owners are re-derived from their fields.
//! Everything else is written back exactly as it was read, except for
//! ignorable comments, which are dropped.

use std::fmt::Write;

use crate::parse::{Cst, Line, LineKind, Owner, Rule, SectionHeading};

fn push_owners(output: &mut String, owners: &[Owner]) {
    for (idx, owner) in owners.iter().enumerate() {
        if idx > 0 {
            output.push(' ');
        }
        output.push_str(&owner.name);
    }
}

fn push_inline_comment(output: &mut String, comment: &str) {
    if !comment.is_empty() {
        output.push_str(" #");
        output.push_str(comment);
    }
}

fn push_rule(output: &mut String, rule: &Rule) {
    output.push_str(&rule.pattern);
    output.push_str(&rule.spacing);
    push_owners(output, &rule.owners);
    push_inline_comment(output, &rule.inline_comment);
}

fn push_section_heading(output: &mut String, heading: &SectionHeading) {
    if heading.optional {
        output.push('^');
    }
    output.push('[');
    output.push_str(&heading.name);
    output.push(']');
    if heading.min_approvers > 0 {
        // Writing to a String cannot fail
        let _ = write!(output, "[{}]", heading.min_approvers);
    }
    output.push_str(&heading.spacing);
    push_owners(output, &heading.owners);
    push_inline_comment(output, &heading.inline_comment);
}

/// Appends one line of CODEOWNERS output, including its line feed.
fn push_line(output: &mut String, line: &Line) {
    match &line.kind {
        LineKind::IgnorableComment => return,
        LineKind::Rule(rule) => push_rule(output, rule),
        LineKind::SectionHeading(heading) if !heading.owners.is_empty() => {
            push_section_heading(output, heading)
        }
        _ => output.push_str(&line.raw),
    }
    output.push('\n');
}

/// Renders a CST as a CODEOWNERS file, prefixed with `header` verbatim.
pub fn render_codeowners(cst: &Cst, header: &str) -> String {
    let mut output = String::with_capacity(header.len() + cst.lines.len() * 32);
    output.push_str(header);
    for line in &cst.lines {
        push_line(&mut output, line);
    }
    output
}
