//! Error types for rendering and decoding CSTs.

use thiserror::Error;

/// An error that occurred while rendering or decoding a CST.
#[derive(Debug, Error)]
pub enum FormatError {
    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A JSON record carries a line type this crate does not know.
    #[error("line {line_no}: unknown line type '{kind}'")]
    UnknownLineType {
        /// The line number of the record.
        line_no: usize,
        /// The unrecognized type.
        kind: String,
    },

    /// A JSON owner carries an owner type this crate does not know.
    #[error("line {line_no}: unknown owner type '{kind}' for '{name}'")]
    UnknownOwnerType {
        /// The line number of the record.
        line_no: usize,
        /// The owner name.
        name: String,
        /// The unrecognized type.
        kind: String,
    },

    /// The labeler format was requested without a team map.
    #[error("the labeler format needs a team map")]
    MissingTeamMap,

    /// The requested output format does not exist.
    #[error("invalid format '{0}'; valid formats: codeowners, json, labeler")]
    UnknownFormat(String),
}
