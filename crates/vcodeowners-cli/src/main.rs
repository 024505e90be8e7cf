//! Virtual CODEOWNERS CLI
//!
//! A command-line tool that compiles virtual CODEOWNERS files into GitHub
//! CODEOWNERS files.

use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode as StdExitCode;
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Args;
use cli::config::{ConfigError, ExitCode, ValidatedConfig, load_team_map, read_file, write_file};
use cli::headers::{codeowners_header, labeler_header};
use cli::output::HumanOutput;
use vcodeowners_core::format::{Format, render};
use vcodeowners_core::parse::parse_codeowners;
use vcodeowners_core::teams::apply_team_map;

fn main() -> StdExitCode {
    let args = Args::parse();

    init_tracing(args.verbose);

    let use_colors = io::stderr().is_terminal();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    let exit_code = run(&args, &mut stdout, &mut stderr, use_colors);
    StdExitCode::from(i32::from(exit_code) as u8)
}

/// Initialize tracing based on verbosity level.
///
/// Logs go to stderr, so they never mix with `--json` output.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

/// Run vcodeowners with the given arguments.
fn run<O: Write, E: Write>(args: &Args, stdout: &mut O, stderr: &mut E, use_colors: bool) -> ExitCode {
    match compile(args, stdout, stderr, use_colors) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            error!("{}", e);
            let _ = HumanOutput::new(stderr, use_colors).write_error(&e.to_string());
            ExitCode::StartupFailure
        }
    }
}

fn compile<O: Write, E: Write>(
    args: &Args,
    stdout: &mut O,
    stderr: &mut E,
    use_colors: bool,
) -> Result<ExitCode, ConfigError> {
    let config = ValidatedConfig::from_args(args)?;
    debug!("Validated configuration: {:?}", config);
    info!("Virtual CODEOWNERS file: {}", config.virtual_code_owners.display());

    let content = read_file(&config.virtual_code_owners)?;
    let parsed = parse_codeowners(&content);
    let mut output = HumanOutput::new(stderr, use_colors);

    if parsed.has_anomalies() {
        warn!("Found {} anomalies", parsed.anomalies.len());
        if config.validate.reports() {
            write_or_log(output.write_anomalies(&parsed.anomalies, config.validate.stops()));
        }
        if config.validate.stops() {
            return Ok(ExitCode::ValidationFailed);
        }
    }

    info!("Team map: {}", config.team_map.display());
    let team_map = load_team_map(&config.team_map)?;
    let expanded = apply_team_map(&parsed.cst, &team_map);

    if config.json_output {
        let json = render(&expanded, Format::Json, "", None)?;
        writeln!(stdout, "{}", json)?;
        stdout.flush()?;
        return Ok(ExitCode::Success);
    }

    let mut outputs: Vec<(PathBuf, String)> = vec![(
        config.code_owners.clone(),
        render(
            &expanded,
            Format::Codeowners,
            &codeowners_header(&config.virtual_code_owners, &config.team_map),
            None,
        )?,
    )];

    if let Some(ref labeler_location) = config.labeler_location {
        // team references only survive in the unexpanded tree
        outputs.push((
            labeler_location.clone(),
            render(
                &parsed.cst,
                Format::Labeler,
                &labeler_header(&config.virtual_code_owners, &config.team_map),
                Some(&team_map),
            )?,
        ));
    }

    for (path, rendered) in &outputs {
        if config.dry_run {
            debug!("Dry run, not writing {} bytes to {}", rendered.len(), path.display());
        } else {
            write_file(path, rendered)?;
        }
        write_or_log(output.write_written(path, config.dry_run));
    }

    Ok(ExitCode::Success)
}

fn write_or_log(result: io::Result<()>) {
    if let Err(e) = result {
        warn!("Failed to write output: {}", e);
    }
}
