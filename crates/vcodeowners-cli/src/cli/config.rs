//! Configuration handling for the CLI.
//!
//! This module checks the CLI arguments and loads the input files.

use crate::cli::{Args, Validate};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use vcodeowners_core::format::FormatError;
use vcodeowners_core::teams::{TeamMap, TeamMapError, parse_team_map};

/// Errors that can occur during configuration and file handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// Failed to read an input file.
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write an output file.
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The team map could not be loaded.
    #[error("team map '{path}': {source}")]
    TeamMap {
        path: PathBuf,
        #[source]
        source: TeamMapError,
    },

    /// Failed to write the result to stdout.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// Rendering the output failed.
    #[error("failed to render output: {0}")]
    Format(#[from] FormatError),
}

/// Application exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Files were written (or would have been, on a dry run).
    Success = 0,
    /// Application startup failed (wrong configuration, I/O or team map error).
    StartupFailure = 1,
    /// The virtual CODEOWNERS file has syntax errors and validation is 'fail'.
    ValidationFailed = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

/// Validated and processed configuration for a run.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Path to the virtual CODEOWNERS file.
    pub virtual_code_owners: PathBuf,
    /// Path to the team map.
    pub team_map: PathBuf,
    /// Path of the CODEOWNERS file to write.
    pub code_owners: PathBuf,
    /// Path of the labeler file to write, if one is wanted.
    pub labeler_location: Option<PathBuf>,
    /// How to treat syntax errors.
    pub validate: Validate,
    /// Whether to skip writing files.
    pub dry_run: bool,
    /// Whether to print JSON instead of writing files.
    pub json_output: bool,
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        if !args.virtual_code_owners.is_file() {
            return Err(ConfigError::Invalid(format!(
                "virtual CODEOWNERS file '{}' does not exist",
                args.virtual_code_owners.display()
            )));
        }

        let input = resolve(&args.virtual_code_owners);
        if resolve(&args.code_owners) == input {
            return Err(ConfigError::Invalid(format!(
                "'{}' is both the virtual CODEOWNERS file and the CODEOWNERS file to write",
                args.code_owners.display()
            )));
        }

        let labeler_location = args.emit_labeler.then(|| args.labeler_location.clone());
        if let Some(location) = labeler_location.as_ref().filter(|location| {
            let location = resolve(location);
            location == input || location == resolve(&args.code_owners)
        }) {
            return Err(ConfigError::Invalid(format!(
                "labeler location '{}' clashes with another file",
                location.display()
            )));
        }

        Ok(Self {
            virtual_code_owners: args.virtual_code_owners.clone(),
            team_map: args.team_map.clone(),
            code_owners: args.code_owners.clone(),
            labeler_location,
            validate: args.validate,
            dry_run: args.dry_run,
            json_output: args.json,
        })
    }
}

/// Resolves a path for comparison with other paths.
///
/// Existing files resolve to their canonical path. Files still to be written
/// resolve through their parent directory, which may not exist either; then
/// only `.` components are dropped.
fn resolve(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    match (parent.canonicalize(), path.file_name()) {
        (Ok(parent), Some(file_name)) => parent.join(file_name),
        _ => path
            .components()
            .filter(|component| !matches!(component, Component::CurDir))
            .collect(),
    }
}

/// Reads a text file.
pub fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and decodes a team map file.
pub fn load_team_map(path: &Path) -> Result<TeamMap, ConfigError> {
    let content = read_file(path)?;
    parse_team_map(&content).map_err(|source| ConfigError::TeamMap {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a text file, creating its parent directory when needed.
pub fn write_file(path: &Path, content: &str) -> Result<(), ConfigError> {
    let to_error = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }
    std::fs::write(path, content).map_err(to_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".github")).unwrap();
        fs::write(
            dir.path().join(".github/VIRTUAL-CODEOWNERS.txt"),
            "* @team\n",
        )
        .unwrap();
        fs::write(
            dir.path().join(".github/virtual-teams.json"),
            r#"{"team": ["owner"]}"#,
        )
        .unwrap();
        dir
    }

    fn args_for(dir: &TempDir, extra: &[&str]) -> Args {
        let github = dir.path().join(".github");
        let virtual_code_owners = github.join("VIRTUAL-CODEOWNERS.txt");
        let team_map = github.join("virtual-teams.json");
        let code_owners = github.join("CODEOWNERS");
        let labeler = github.join("labeler.yml");
        let mut argv = vec!["vcodeowners".to_string()];
        for (flag, path) in [
            ("--virtual-code-owners", virtual_code_owners),
            ("--team-map", team_map),
            ("--code-owners", code_owners),
            ("--labeler-location", labeler),
        ] {
            // clap rejects a flag given twice, so explicit values replace the defaults
            if !extra.contains(&flag) {
                argv.push(flag.to_string());
                argv.push(path.display().to_string());
            }
        }
        argv.extend(extra.iter().map(|s| s.to_string()));
        Args::parse_from(argv)
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::StartupFailure), 1);
        assert_eq!(i32::from(ExitCode::ValidationFailed), 3);
    }

    #[test]
    fn test_validated_config() {
        let dir = create_test_repo();
        let config = ValidatedConfig::from_args(&args_for(&dir, &[])).unwrap();
        assert!(config.code_owners.ends_with(".github/CODEOWNERS"));
        assert_eq!(config.labeler_location, None);
        assert_eq!(config.validate, Validate::Fail);
        assert!(!config.dry_run);
    }

    #[test]
    fn test_validated_config_with_labeler() {
        let dir = create_test_repo();
        let config = ValidatedConfig::from_args(&args_for(&dir, &["--emit-labeler"])).unwrap();
        assert!(
            config
                .labeler_location
                .is_some_and(|path| path.ends_with(".github/labeler.yml"))
        );
    }

    #[test]
    fn test_validated_config_missing_input() {
        let dir = TempDir::new().unwrap();
        let result = ValidatedConfig::from_args(&args_for(&dir, &[]));
        assert!(matches!(result, Err(ConfigError::Invalid(msg)) if msg.contains("does not exist")));
    }

    #[test]
    fn test_validated_config_refuses_to_overwrite_input() {
        let dir = create_test_repo();
        let input = dir.path().join(".github/VIRTUAL-CODEOWNERS.txt");
        let input = input.display().to_string();
        let args = args_for(&dir, &["--code-owners", &input]);
        assert!(matches!(
            ValidatedConfig::from_args(&args),
            Err(ConfigError::Invalid(msg)) if msg.contains("both the virtual CODEOWNERS file")
        ));

        let args = args_for(&dir, &["--emit-labeler", "--labeler-location", &input]);
        assert!(matches!(
            ValidatedConfig::from_args(&args),
            Err(ConfigError::Invalid(msg)) if msg.contains("clashes")
        ));
    }

    #[test]
    fn test_validated_config_sees_through_path_spelling() {
        let dir = create_test_repo();
        let dotted = dir.path().join(".github/./VIRTUAL-CODEOWNERS.txt");
        let dotted = dotted.display().to_string();
        let args = args_for(&dir, &["--code-owners", &dotted]);
        assert!(matches!(
            ValidatedConfig::from_args(&args),
            Err(ConfigError::Invalid(_))
        ));

        let roundabout = dir.path().join(".github/../.github/CODEOWNERS");
        let roundabout = roundabout.display().to_string();
        let args = args_for(
            &dir,
            &["--emit-labeler", "--labeler-location", &roundabout],
        );
        assert!(matches!(
            ValidatedConfig::from_args(&args),
            Err(ConfigError::Invalid(msg)) if msg.contains("clashes")
        ));
    }

    #[test]
    fn test_validated_config_accepts_new_output_directory() {
        let dir = create_test_repo();
        let output = dir.path().join("out/not/yet/CODEOWNERS");
        let output = output.display().to_string();
        let args = args_for(&dir, &["--code-owners", &output]);
        assert!(ValidatedConfig::from_args(&args).is_ok());
    }

    #[test]
    fn test_load_team_map() {
        let dir = create_test_repo();
        let team_map = load_team_map(&dir.path().join(".github/virtual-teams.json")).unwrap();
        assert_eq!(team_map["team"], vec!["owner".to_string()]);
    }

    #[test]
    fn test_load_team_map_errors() {
        let dir = create_test_repo();
        let missing = dir.path().join("nope.json");
        assert!(matches!(load_team_map(&missing), Err(ConfigError::Read { .. })));

        let prefixed = dir.path().join("prefixed.json");
        fs::write(&prefixed, r#"{"team": ["@owner"]}"#).unwrap();
        let error = load_team_map(&prefixed).unwrap_err();
        assert!(matches!(error, ConfigError::TeamMap { .. }));
        assert!(error.to_string().contains("don't start team member names with an '@'"));
    }

    #[test]
    fn test_write_file_creates_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/dir/CODEOWNERS");
        write_file(&path, "* @owner\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "* @owner\n");
    }
}
