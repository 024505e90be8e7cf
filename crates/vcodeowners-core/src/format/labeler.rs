//! Pull-request labeler configuration output.
//!
//! Produces a `labeler.yml` with one label per virtual team, matching the
//! files that team owns. Must be fed the tree *before* team substitution,
//! since afterwards no team references are left to match.

use crate::parse::{Cst, Rule};
use crate::teams::TeamMap;

/// Rewrites a CODEOWNERS pattern into an equivalent labeler glob.
///
/// `*` matches everything in CODEOWNERS but only the root folder in a glob,
/// so it becomes `**`. Values starting with `*` are quoted for YAML.
/// Directory patterns (`src/`) match everything below them.
pub fn glob_for_labeler(pattern: &str) -> String {
    let mut glob = if pattern == "*" {
        "**".to_string()
    } else {
        pattern.to_string()
    };

    if glob.starts_with('*') {
        glob = format!("\"{}\"", glob);
    }
    if pattern.ends_with('/') {
        glob.push_str("**");
    }
    glob
}

fn owned_by(rule: &Rule, reference: &str) -> bool {
    rule.owners.iter().any(|owner| owner.name == reference)
}

/// Globs of every rule listing `@<team>` as an owner, in document order.
fn globs_for_team(cst: &Cst, team: &str) -> Vec<String> {
    let reference = format!("@{}", team);
    cst.rules()
        .filter(|rule| owned_by(rule, &reference))
        .map(|rule| glob_for_labeler(&rule.pattern))
        .collect()
}

/// Renders the labeler file, prefixed with `header` verbatim.
///
/// Teams come out in map order; teams that own nothing are left out.
pub fn render_labeler(cst: &Cst, team_map: &TeamMap, header: &str) -> String {
    let mut output = String::from(header);

    for team in team_map.keys() {
        let globs = globs_for_team(cst, team);
        if globs.is_empty() {
            continue;
        }
        output.push_str(team);
        output.push_str(":\n  - changed-files:\n");
        for glob in &globs {
            output.push_str("    - any-glob-to-any-file: ");
            output.push_str(glob);
            output.push('\n');
        }
        output.push('\n');
    }

    output
}
