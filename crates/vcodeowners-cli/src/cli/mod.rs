//! CLI module for vcodeowners.
//!
//! This module provides command-line argument parsing using Clap with
//! environment variable support.

pub mod config;
pub mod headers;
pub mod output;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Virtual CODEOWNERS compiler - writes GitHub CODEOWNERS files from
/// virtual ones.
///
/// Reads a virtual CODEOWNERS file and a map of virtual teams, replaces the
/// teams by their members and writes the result as a CODEOWNERS file.
/// Optionally also writes a labeler.yml that labels pull requests per team.
#[derive(Parser, Debug)]
#[command(name = "vcodeowners")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the virtual CODEOWNERS file.
    #[arg(
        long,
        env = "VIRTUAL_CODE_OWNERS",
        default_value = ".github/VIRTUAL-CODEOWNERS.txt"
    )]
    pub virtual_code_owners: PathBuf,

    /// Path to the JSON file mapping virtual teams to their members.
    #[arg(long, env = "TEAM_MAP", default_value = ".github/virtual-teams.json")]
    pub team_map: PathBuf,

    /// Where to write the CODEOWNERS file.
    #[arg(long, env = "CODE_OWNERS", default_value = ".github/CODEOWNERS")]
    pub code_owners: PathBuf,

    /// What to do with syntax errors in the virtual CODEOWNERS file.
    /// 'fail' reports them and stops, 'warn' reports them and continues,
    /// 'skip' ignores them.
    #[arg(long, env = "VALIDATE", default_value = "fail")]
    pub validate: Validate,

    /// Only show what would be written.
    #[arg(long)]
    pub dry_run: bool,

    /// Also write a labeler.yml with a label per virtual team.
    #[arg(long)]
    pub emit_labeler: bool,

    /// Where to write the labeler.yml.
    #[arg(long, env = "LABELER_LOCATION", default_value = ".github/labeler.yml")]
    pub labeler_location: PathBuf,

    /// Print the expanded file as JSON on stdout instead of writing files.
    #[arg(long, short = 'j')]
    pub json: bool,

    /// Increase verbosity level (-v for info, -vv for debug, -vvv for trace).
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Handling of syntax errors in the virtual CODEOWNERS file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Validate {
    /// Report syntax errors and stop (exit code 3).
    #[default]
    Fail,
    /// Report syntax errors and carry on.
    Warn,
    /// Ignore syntax errors.
    Skip,
}

impl Validate {
    /// Returns true if anomalies should be shown to the user.
    pub fn reports(&self) -> bool {
        !matches!(self, Validate::Skip)
    }

    /// Returns true if anomalies should stop the run.
    pub fn stops(&self) -> bool {
        matches!(self, Validate::Fail)
    }
}
