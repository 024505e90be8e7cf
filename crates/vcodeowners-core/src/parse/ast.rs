//! Concrete syntax tree for virtual CODEOWNERS files.
//!
//! Every input line maps to exactly one [`Line`], blank lines included. The
//! original text is always kept in [`Line::raw`] so that lines whose
//! structure is not re-derived can be reproduced byte-for-byte.

use std::fmt::{self, Display};

use super::anomaly::Anomaly;

/// Classification of an owner token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerKind {
    /// Starts with `@` (e.g. `@john_doe`, `@the-a-team`, `@org/team`).
    TeamOrUser,
    /// Looks vaguely like an e-mail address (`something@something`).
    Email,
    /// Anything else.
    Invalid,
}

impl OwnerKind {
    /// Returns the wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerKind::TeamOrUser => "user-or-group",
            OwnerKind::Email => "e-mail",
            OwnerKind::Invalid => "invalid",
        }
    }

    /// Looks up a kind by its wire name.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "user-or-group" => Some(OwnerKind::TeamOrUser),
            "e-mail" => Some(OwnerKind::Email),
            "invalid" => Some(OwnerKind::Invalid),
            _ => None,
        }
    }
}

impl Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An owner of a rule or a section.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Owner {
    /// How the token was classified.
    pub kind: OwnerKind,
    /// The token exactly as written, including any leading `@`.
    pub name: String,
}

impl Owner {
    /// Creates a new owner.
    pub fn new(kind: OwnerKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Creates a team-or-user owner.
    pub fn team_or_user(name: impl Into<String>) -> Self {
        Self::new(OwnerKind::TeamOrUser, name)
    }

    /// Creates an e-mail owner.
    pub fn email(name: impl Into<String>) -> Self {
        Self::new(OwnerKind::Email, name)
    }

    /// Creates an invalid owner.
    pub fn invalid(name: impl Into<String>) -> Self {
        Self::new(OwnerKind::Invalid, name)
    }

    /// Returns true unless the owner was classified as invalid.
    pub fn is_valid(&self) -> bool {
        self.kind != OwnerKind::Invalid
    }
}

impl Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A section heading such as `^[Frontend][2] @web-team # comment`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SectionHeading {
    /// True when the heading is prefixed with `^`.
    pub optional: bool,
    /// The name between the brackets.
    pub name: String,
    /// Minimum number of approvers, 0 when absent or unparsable.
    pub min_approvers: u32,
    /// Whitespace between the heading and the owner list.
    pub spacing: String,
    /// Default owners of the section, empty when none were given.
    pub owners: Vec<Owner>,
    /// Text after the trailing `#`, empty if none.
    pub inline_comment: String,
}

/// An ownership rule such as `src/ @backend # comment`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rule {
    /// The file pattern, kept as an opaque token.
    pub pattern: String,
    /// Name of the enclosing section, empty outside of any section.
    pub section: String,
    /// Whitespace between the pattern and the owner list.
    pub spacing: String,
    /// Owners of the pattern; empty when inherited from the section.
    pub owners: Vec<Owner>,
    /// Text after the trailing `#`, empty if none.
    pub inline_comment: String,
}

/// What a line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Blank or whitespace-only.
    Empty,
    /// Starts with `#`.
    Comment,
    /// Starts with `#!`; never re-emitted in CODEOWNERS output.
    IgnorableComment,
    /// `[name]`, optionally with `^`, approver count and owners.
    SectionHeading(SectionHeading),
    /// Pattern followed by owners, or an ownerless pattern inside an owned section.
    Rule(Rule),
    /// Could not be classified.
    Unknown {
        /// The section active when the line was encountered.
        section: String,
    },
}

impl LineKind {
    /// Returns the wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineKind::Empty => "empty",
            LineKind::Comment => "comment",
            LineKind::IgnorableComment => "ignorable-comment",
            LineKind::SectionHeading(_) => "section-heading",
            LineKind::Rule(_) => "rule",
            LineKind::Unknown { .. } => "unknown",
        }
    }
}

/// A single line of a virtual CODEOWNERS file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number.
    pub line_no: usize,
    /// The original, unmodified text of the line.
    pub raw: String,
    /// The kind of line, carrying its structured fields.
    pub kind: LineKind,
}

impl Line {
    /// Creates a new line.
    pub fn new(line_no: usize, raw: impl Into<String>, kind: LineKind) -> Self {
        Self {
            line_no,
            raw: raw.into(),
            kind,
        }
    }

    pub fn empty(line_no: usize, raw: impl Into<String>) -> Self {
        Self::new(line_no, raw, LineKind::Empty)
    }

    pub fn comment(line_no: usize, raw: impl Into<String>) -> Self {
        Self::new(line_no, raw, LineKind::Comment)
    }

    pub fn ignorable_comment(line_no: usize, raw: impl Into<String>) -> Self {
        Self::new(line_no, raw, LineKind::IgnorableComment)
    }

    pub fn section_heading(line_no: usize, raw: impl Into<String>, heading: SectionHeading) -> Self {
        Self::new(line_no, raw, LineKind::SectionHeading(heading))
    }

    pub fn rule(line_no: usize, raw: impl Into<String>, rule: Rule) -> Self {
        Self::new(line_no, raw, LineKind::Rule(rule))
    }

    pub fn unknown(line_no: usize, raw: impl Into<String>, section: impl Into<String>) -> Self {
        Self::new(
            line_no,
            raw,
            LineKind::Unknown {
                section: section.into(),
            },
        )
    }

    /// Returns the owners of a rule or section heading, or an empty slice.
    pub fn owners(&self) -> &[Owner] {
        match &self.kind {
            LineKind::Rule(rule) => &rule.owners,
            LineKind::SectionHeading(heading) => &heading.owners,
            _ => &[],
        }
    }

    /// Returns true if this is a rule line.
    pub fn is_rule(&self) -> bool {
        matches!(self.kind, LineKind::Rule(_))
    }

    /// Returns true if this is a section heading.
    pub fn is_section_heading(&self) -> bool {
        matches!(self.kind, LineKind::SectionHeading(_))
    }

    /// Returns true if the line could not be classified.
    pub fn is_unknown(&self) -> bool {
        matches!(self.kind, LineKind::Unknown { .. })
    }
}

/// The complete concrete syntax tree of a virtual CODEOWNERS file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cst {
    /// All lines in the file, in order.
    pub lines: Vec<Line>,
}

impl Cst {
    /// Creates a new CST from the given lines.
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    /// Returns an iterator over all rules.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.lines.iter().filter_map(|line| match &line.kind {
            LineKind::Rule(rule) => Some(rule),
            _ => None,
        })
    }

    /// Returns an iterator over all section headings.
    pub fn section_headings(&self) -> impl Iterator<Item = &SectionHeading> {
        self.lines.iter().filter_map(|line| match &line.kind {
            LineKind::SectionHeading(heading) => Some(heading),
            _ => None,
        })
    }

    /// Returns an iterator over all lines that could not be classified.
    pub fn unknown_lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter().filter(|line| line.is_unknown())
    }

    /// Collects the anomalies of this tree.
    ///
    /// Unknown lines and invalid owners are reported in line order, and
    /// within a line in the order the owners were declared.
    pub fn anomalies(&self) -> Vec<Anomaly> {
        let mut anomalies = Vec::new();
        for line in &self.lines {
            if line.is_unknown() {
                anomalies.push(Anomaly::unknown_line(line.line_no, &line.raw));
            }
            for owner in line.owners().iter().filter(|owner| !owner.is_valid()) {
                anomalies.push(Anomaly::invalid_owner(line.line_no, &owner.name, &line.raw));
            }
        }
        anomalies
    }
}
