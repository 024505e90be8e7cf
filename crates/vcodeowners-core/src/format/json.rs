//! Structured JSON output.
//!
//! Every line becomes a flat record carrying every field, whatever its
//! kind, so the JSON form can be read back into an identical CST.

use serde::{Deserialize, Deserializer, Serialize};

use super::error::FormatError;
use crate::parse::{Cst, Line, LineKind, Owner, OwnerKind, Rule, SectionHeading};

/// An owner as it appears in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonOwner {
    /// `user-or-group`, `e-mail` or `invalid`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The owner name, verbatim.
    pub name: String,
}

impl From<&Owner> for JsonOwner {
    fn from(owner: &Owner) -> Self {
        Self {
            kind: owner.kind.as_str().to_string(),
            name: owner.name.clone(),
        }
    }
}

/// A line as it appears in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JsonLine {
    #[serde(rename = "type")]
    pub kind: String,
    pub line_no: usize,
    pub raw: String,

    pub rule_pattern: String,
    pub rule_section: String,

    pub section_optional: bool,
    pub section_name: String,
    pub section_min_approvers: u32,

    pub spaces: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub owners: Vec<JsonOwner>,
    pub inline_comment: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<JsonOwner>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<JsonOwner>>::deserialize(deserializer)?.unwrap_or_default())
}

fn json_owners(owners: &[Owner]) -> Vec<JsonOwner> {
    owners.iter().map(JsonOwner::from).collect()
}

impl From<&Line> for JsonLine {
    fn from(line: &Line) -> Self {
        let mut json = JsonLine {
            kind: line.kind.as_str().to_string(),
            line_no: line.line_no,
            raw: line.raw.clone(),
            ..Default::default()
        };

        match &line.kind {
            LineKind::Rule(rule) => {
                json.rule_pattern = rule.pattern.clone();
                json.rule_section = rule.section.clone();
                json.spaces = rule.spacing.clone();
                json.owners = json_owners(&rule.owners);
                json.inline_comment = rule.inline_comment.clone();
            }
            LineKind::SectionHeading(heading) => {
                json.section_optional = heading.optional;
                json.section_name = heading.name.clone();
                json.section_min_approvers = heading.min_approvers;
                json.spaces = heading.spacing.clone();
                json.owners = json_owners(&heading.owners);
                json.inline_comment = heading.inline_comment.clone();
            }
            LineKind::Unknown { section } => json.rule_section = section.clone(),
            LineKind::Empty | LineKind::Comment | LineKind::IgnorableComment => {}
        }
        json
    }
}

impl JsonLine {
    fn owners(&self) -> Result<Vec<Owner>, FormatError> {
        self.owners
            .iter()
            .map(|owner| match OwnerKind::from_wire(&owner.kind) {
                Some(kind) => Ok(Owner::new(kind, owner.name.as_str())),
                None => Err(FormatError::UnknownOwnerType {
                    line_no: self.line_no,
                    name: owner.name.clone(),
                    kind: owner.kind.clone(),
                }),
            })
            .collect()
    }

    /// Converts the record back into a [`Line`].
    pub fn into_line(self) -> Result<Line, FormatError> {
        let kind = match self.kind.as_str() {
            "empty" => LineKind::Empty,
            "comment" => LineKind::Comment,
            "ignorable-comment" => LineKind::IgnorableComment,
            "section-heading" => LineKind::SectionHeading(SectionHeading {
                optional: self.section_optional,
                name: self.section_name.clone(),
                min_approvers: self.section_min_approvers,
                spacing: self.spaces.clone(),
                owners: self.owners()?,
                inline_comment: self.inline_comment.clone(),
            }),
            "rule" => LineKind::Rule(Rule {
                pattern: self.rule_pattern.clone(),
                section: self.rule_section.clone(),
                spacing: self.spaces.clone(),
                owners: self.owners()?,
                inline_comment: self.inline_comment.clone(),
            }),
            "unknown" => LineKind::Unknown {
                section: self.rule_section.clone(),
            },
            other => {
                return Err(FormatError::UnknownLineType {
                    line_no: self.line_no,
                    kind: other.to_string(),
                });
            }
        };
        Ok(Line::new(self.line_no, self.raw, kind))
    }
}

/// Renders a CST as an indented JSON array.
pub fn render_json(cst: &Cst) -> Result<String, FormatError> {
    let lines: Vec<JsonLine> = cst.lines.iter().map(JsonLine::from).collect();
    Ok(serde_json::to_string_pretty(&lines)?)
}

/// Reads a CST back from its JSON form.
pub fn parse_json(json: &str) -> Result<Cst, FormatError> {
    let lines: Vec<JsonLine> = serde_json::from_str(json)?;
    let lines = lines
        .into_iter()
        .map(JsonLine::into_line)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Cst::new(lines))
}
