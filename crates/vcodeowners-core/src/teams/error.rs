//! Error types for team map loading.

use thiserror::Error;

/// An error that occurred while loading a team map.
#[derive(Debug, Error)]
pub enum TeamMapError {
    /// The input is not valid JSON or not an object of string arrays.
    #[error("invalid team map: {0}")]
    Json(#[from] serde_json::Error),

    /// A member name starts with `@`; members must be plain names.
    #[error("don't start team member names with an '@'; '{member}' (team '{team}', member {index})")]
    PrefixedMember {
        /// The offending member name.
        member: String,
        /// The team the member belongs to.
        team: String,
        /// Position of the member in the team's list (0-based).
        index: usize,
    },
}

impl TeamMapError {
    /// Creates a prefixed member error.
    pub fn prefixed_member(member: impl Into<String>, team: impl Into<String>, index: usize) -> Self {
        Self::PrefixedMember {
            member: member.into(),
            team: team.into(),
            index,
        }
    }
}
