//! Virtual team maps and team substitution.
//!
//! A team map names groups of people that GitHub knows nothing about. Rules
//! and section headings referring to `@<team>` get the team replaced by its
//! members before the real CODEOWNERS file is written.
//!
//! # Example
//!
//! ```rust
//! use vcodeowners_core::parse::parse_codeowners;
//! use vcodeowners_core::teams::{apply_team_map, parse_team_map};
//!
//! let team_map = parse_team_map(r#"{"web": ["alice", "bob"]}"#).unwrap();
//! let parsed = parse_codeowners("*.js @web @carol");
//! let expanded = apply_team_map(&parsed.cst, &team_map);
//!
//! let owners: Vec<_> = expanded.lines[0].owners().iter().map(|o| o.name.as_str()).collect();
//! assert_eq!(owners, vec!["@alice", "@bob", "@carol"]);
//! ```

mod error;

use std::collections::BTreeMap;

use log::debug;

use crate::parse::{Cst, Line, LineKind, Owner, OwnerKind, classify_owner};

pub use error::TeamMapError;

/// Team names (without `@`) mapped to member names (without `@`).
///
/// Keys iterate in sorted order, which keeps every output derived from the
/// map deterministic.
pub type TeamMap = BTreeMap<String, Vec<String>>;

/// Decodes a team map from a JSON object of string arrays.
///
/// Fails on malformed JSON, on any other shape, and on member names that
/// start with `@`.
pub fn parse_team_map(json: &str) -> Result<TeamMap, TeamMapError> {
    let team_map: TeamMap = serde_json::from_str(json)?;

    for (team, members) in &team_map {
        if let Some((index, member)) = members
            .iter()
            .enumerate()
            .find(|(_, member)| member.starts_with('@'))
        {
            return Err(TeamMapError::prefixed_member(member.as_str(), team.as_str(), index));
        }
    }

    debug!("Loaded team map with {} team(s)", team_map.len());
    Ok(team_map)
}

/// Turns a team member name into an owner.
///
/// Plain names classify as invalid, so they get an `@` and become team or
/// user references. E-mail addresses keep their classification and name.
fn cook_member(member: &str) -> Owner {
    let owner = classify_owner(member);
    if owner.kind == OwnerKind::Invalid {
        Owner::team_or_user(format!("@{}", member))
    } else {
        owner
    }
}

/// Replaces team references by team members, then sorts and deduplicates.
///
/// Owners that do not name a team in the map pass through unchanged. The
/// result is sorted by name (byte-wise, case-sensitive) and holds every name
/// only once, whether or not anything was substituted.
pub fn expand_owners(owners: &[Owner], team_map: &TeamMap) -> Vec<Owner> {
    let mut expanded = Vec::with_capacity(owners.len());

    for owner in owners {
        let members = match owner.kind {
            OwnerKind::TeamOrUser => owner
                .name
                .strip_prefix('@')
                .and_then(|team| team_map.get(team)),
            _ => None,
        };
        match members {
            Some(members) => expanded.extend(members.iter().map(|member| cook_member(member))),
            None => expanded.push(owner.clone()),
        }
    }

    expanded.sort_by(|a, b| a.name.cmp(&b.name));
    expanded.dedup_by(|a, b| a.name == b.name);
    expanded
}

/// Applies a team map to every rule and section heading of a tree.
///
/// Returns a new tree; the input stays available for outputs that need the
/// original team references, such as the labeler file.
pub fn apply_team_map(cst: &Cst, team_map: &TeamMap) -> Cst {
    let lines = cst
        .lines
        .iter()
        .map(|line| {
            let kind = match &line.kind {
                LineKind::Rule(rule) => {
                    let mut rule = rule.clone();
                    rule.owners = expand_owners(&rule.owners, team_map);
                    LineKind::Rule(rule)
                }
                LineKind::SectionHeading(heading) => {
                    let mut heading = heading.clone();
                    heading.owners = expand_owners(&heading.owners, team_map);
                    LineKind::SectionHeading(heading)
                }
                other => other.clone(),
            };
            Line::new(line.line_no, line.raw.as_str(), kind)
        })
        .collect();

    Cst::new(lines)
}
