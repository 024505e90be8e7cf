//! Virtual CODEOWNERS Core
//!
//! A library for compiling virtual CODEOWNERS files into real ones.
//!
//! A virtual CODEOWNERS file is a CODEOWNERS file that may refer to teams
//! the code hosting platform knows nothing about. A team map, kept next to
//! it, lists the members of those teams.
//!
//! # Features
//!
//! - **Parser**: Parse virtual CODEOWNERS files into a lossless concrete syntax tree
//! - **Anomalies**: Collect unknown lines and invalid owners instead of failing
//! - **Teams**: Replace virtual team references by their members
//! - **Renderers**: Write CODEOWNERS, JSON and `labeler.yml` output
//!
//! # Quick Start
//!
//! ```rust
//! use vcodeowners_core::format::render_codeowners;
//! use vcodeowners_core::parse::{format_anomalies, parse_codeowners};
//! use vcodeowners_core::teams::{apply_team_map, parse_team_map};
//!
//! let input = r#"
//! # VIRTUAL-CODEOWNERS.txt
//! *.rs @rustaceans
//! /docs/ @github/docs-team
//! "#;
//!
//! let parse_result = parse_codeowners(input);
//! if parse_result.has_anomalies() {
//!     eprint!("{}", format_anomalies(&parse_result.anomalies));
//! }
//!
//! let team_map = parse_team_map(r#"{"rustaceans": ["ferris", "corro"]}"#).unwrap();
//! let expanded = apply_team_map(&parse_result.cst, &team_map);
//! let codeowners = render_codeowners(&expanded, "");
//!
//! assert!(codeowners.contains("*.rs @corro @ferris\n"));
//! ```
//!
//! # Modules
//!
//! - [`parse`]: Parser for virtual CODEOWNERS files
//! - [`teams`]: Team maps and team substitution
//! - [`format`]: Renderers for the parsed tree

pub mod format;
pub mod parse;
pub mod teams;

#[cfg(feature = "generate")]
pub mod generate;

// Re-export commonly used types at the crate root
pub use format::{Format, FormatError, render};
pub use parse::{Cst, ParseResult, parse_codeowners};
pub use teams::{TeamMap, TeamMapError, apply_team_map, parse_team_map};
