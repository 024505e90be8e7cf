//! Renderers for parsed virtual CODEOWNERS files.
//!
//! Three output formats are supported:
//!
//! - [`Format::Codeowners`]: a CODEOWNERS file GitHub and GitLab understand
//! - [`Format::Json`]: the tree itself, one flat record per line
//! - [`Format::Labeler`]: a `labeler.yml` labelling pull requests per team

mod codeowners;
mod error;
mod json;
mod labeler;

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::parse::Cst;
use crate::teams::TeamMap;

pub use codeowners::render_codeowners;
pub use error::FormatError;
pub use json::{JsonLine, JsonOwner, parse_json, render_json};
pub use labeler::{glob_for_labeler, render_labeler};

/// An output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Codeowners,
    Json,
    Labeler,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Codeowners => "codeowners",
            Format::Json => "json",
            Format::Labeler => "labeler",
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "codeowners" => Ok(Format::Codeowners),
            "json" => Ok(Format::Json),
            "labeler" => Ok(Format::Labeler),
            other => Err(FormatError::UnknownFormat(other.to_string())),
        }
    }
}

/// Renders a tree in the given format.
///
/// `header` is prepended verbatim to CODEOWNERS and labeler output and is
/// ignored for JSON. The labeler format needs the team map; the others
/// ignore it.
pub fn render(
    cst: &Cst,
    format: Format,
    header: &str,
    team_map: Option<&TeamMap>,
) -> Result<String, FormatError> {
    match format {
        Format::Codeowners => Ok(render_codeowners(cst, header)),
        Format::Json => render_json(cst),
        Format::Labeler => {
            let team_map = team_map.ok_or(FormatError::MissingTeamMap)?;
            Ok(render_labeler(cst, team_map, header))
        }
    }
}
