//! Parser module for virtual CODEOWNERS files.
//!
//! This module turns a virtual CODEOWNERS file into a concrete syntax tree
//! with one [`Line`] per input line, plus the anomalies found along the way.
//!
//! # Example
//!
//! ```rust
//! use vcodeowners_core::parse::parse_codeowners;
//!
//! let input = r#"
//! # CODEOWNERS file
//! *.rs @rustacean
//! [Docs] @docs-team
//! docs/
//! "#;
//!
//! let result = parse_codeowners(input);
//! if result.is_ok() {
//!     for rule in result.cst.rules() {
//!         println!("{} ({:?})", rule.pattern, rule.owners);
//!     }
//! }
//! ```

mod anomaly;
mod ast;
mod lexer;
mod parser;

// Re-export public types
pub use anomaly::{Anomaly, ParseResult, UNKNOWN_LINE_TYPE, format_anomalies};
pub use ast::{Cst, Line, LineKind, Owner, OwnerKind, Rule, SectionHeading};
pub use parser::{ParseState, parse_codeowners, parse_line};

// Re-export lexer utilities that may be useful for custom parsing
pub use lexer::{classify_owner, is_separator, parse_owner_list};
