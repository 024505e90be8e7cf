//! Lexer and token parsers for virtual CODEOWNERS files.
//!
//! This module contains nom-based parsers for the four line grammars
//! (rules and section headings, each with and without owners) and the
//! owner classifier.

use nom::{
    IResult, Parser,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, digit1},
    combinator::{opt, rest},
    error::{Error, ErrorKind},
    sequence::{delimited, preceded},
};

use super::ast::{Owner, OwnerKind};

/// Characters separating a pattern, its owners and each owner from the next.
pub fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

/// Characters that can appear in an owner list (everything up to a comment).
fn is_owner_list_char(c: char) -> bool {
    c != '#'
}

fn spacing0(input: &str) -> IResult<&str, &str> {
    take_while(is_separator).parse(input)
}

fn spacing1(input: &str) -> IResult<&str, &str> {
    take_while1(is_separator).parse(input)
}

/// A file pattern: one run of non-separator characters.
fn pattern(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !is_separator(c)).parse(input)
}

fn owner_list(input: &str) -> IResult<&str, &str> {
    take_while1(is_owner_list_char).parse(input)
}

/// Parses an optional `#comment` that must run to the end of the line.
///
/// Returns the comment text without the `#`, or an empty string.
fn trailing_comment(input: &str) -> IResult<&str, &str> {
    let (remaining, comment) = opt(preceded(char('#'), rest)).parse(input)?;
    if !remaining.is_empty() {
        return Err(nom::Err::Error(Error::new(remaining, ErrorKind::Eof)));
    }
    Ok((remaining, comment.unwrap_or("")))
}

/// Components of a rule line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleComponents<'a> {
    /// The pattern text.
    pub pattern: &'a str,
    /// Whitespace after the pattern.
    pub spacing: &'a str,
    /// Raw owner list text (may carry trailing whitespace), empty if none.
    pub owners: &'a str,
    /// Inline comment without the `#`.
    pub comment: &'a str,
}

/// Parses a pattern with no owners, e.g. `src/ # inherits the section owners`.
///
/// Expects a line with surrounding whitespace already trimmed.
pub fn parse_ownerless_rule(input: &str) -> IResult<&str, RuleComponents<'_>> {
    (pattern, spacing0, trailing_comment)
        .map(|(pattern, spacing, comment)| RuleComponents {
            pattern,
            spacing,
            owners: "",
            comment,
        })
        .parse(input)
}

/// Parses a pattern followed by an owner list, e.g. `*.js @frontend # JS`.
///
/// Expects a line with surrounding whitespace already trimmed.
pub fn parse_owned_rule(input: &str) -> IResult<&str, RuleComponents<'_>> {
    (pattern, spacing1, owner_list, trailing_comment)
        .map(|(pattern, spacing, owners, comment)| RuleComponents {
            pattern,
            spacing,
            owners,
            comment,
        })
        .parse(input)
}

/// Components of a section heading line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionComponents<'a> {
    /// True when the heading starts with `^`.
    pub optional: bool,
    /// The section name.
    pub name: &'a str,
    /// Digits of the `[N]` approver count, if present.
    pub min_approvers: Option<&'a str>,
    /// Whitespace after the heading.
    pub spacing: &'a str,
    /// Raw owner list text, empty if none.
    pub owners: &'a str,
    /// Inline comment without the `#`.
    pub comment: &'a str,
}

/// Parses `^?[name]([N])?`.
fn section_prefix(input: &str) -> IResult<&str, (bool, &str, Option<&str>)> {
    (
        opt(char('^')),
        delimited(char('['), take_while1(|c: char| c != ']'), char(']')),
        opt(delimited(char('['), digit1, char(']'))),
    )
        .map(|(caret, name, min_approvers)| (caret.is_some(), name, min_approvers))
        .parse(input)
}

/// Parses a section heading without owners, e.g. `^[Docs][2] # optional`.
pub fn parse_ownerless_section(input: &str) -> IResult<&str, SectionComponents<'_>> {
    (section_prefix, spacing0, trailing_comment)
        .map(
            |((optional, name, min_approvers), spacing, comment)| SectionComponents {
                optional,
                name,
                min_approvers,
                spacing,
                owners: "",
                comment,
            },
        )
        .parse(input)
}

/// Parses a section heading with default owners, e.g. `[Backend] @backend-team`.
pub fn parse_owned_section(input: &str) -> IResult<&str, SectionComponents<'_>> {
    (section_prefix, spacing1, owner_list, trailing_comment)
        .map(
            |((optional, name, min_approvers), spacing, owners, comment)| SectionComponents {
                optional,
                name,
                min_approvers,
                spacing,
                owners,
                comment,
            },
        )
        .parse(input)
}

/// Returns true if the token has a non-empty part on both sides of its first `@`.
fn looks_like_email(token: &str) -> bool {
    match token.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
        None => false,
    }
}

/// Classifies an owner token.
///
/// Tokens starting with `@` are team or user references, `x@y` shaped tokens
/// are e-mail addresses and everything else is invalid. No real e-mail
/// validation is attempted.
pub fn classify_owner(token: &str) -> Owner {
    let kind = if token.starts_with('@') {
        OwnerKind::TeamOrUser
    } else if looks_like_email(token) {
        OwnerKind::Email
    } else {
        OwnerKind::Invalid
    };
    Owner::new(kind, token)
}

/// Splits an owner list on runs of whitespace and classifies each token.
pub fn parse_owner_list(text: &str) -> Vec<Owner> {
    text.split(is_separator)
        .filter(|token| !token.is_empty())
        .map(classify_owner)
        .collect()
}
