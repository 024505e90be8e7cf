//! Output formatting for the CLI.
//!
//! Everything meant for humans goes to stderr; stdout is reserved for
//! `--json` output.

use colored::Colorize;
use std::io::Write;
use std::path::Path;
use vcodeowners_core::parse::{Anomaly, format_anomalies};

/// Output formatter for human-readable console output.
pub struct HumanOutput<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> HumanOutput<W> {
    /// Creates a new human output formatter.
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    /// Writes the anomaly report.
    ///
    /// `fatal` picks the colour of the heading: red when the run stops,
    /// yellow when it carries on.
    pub fn write_anomalies(&mut self, anomalies: &[Anomaly], fatal: bool) -> std::io::Result<()> {
        if anomalies.is_empty() {
            return Ok(());
        }

        let report = format_anomalies(anomalies);
        if !self.use_colors {
            return write!(self.writer, "{}", report);
        }

        let (heading, body) = report.split_once('\n').unwrap_or((report.as_str(), ""));
        let heading = if fatal {
            heading.red().bold()
        } else {
            heading.yellow().bold()
        };
        writeln!(self.writer, "{}", heading)?;
        for line in body.lines() {
            writeln!(self.writer, "{}", line.dimmed())?;
        }
        Ok(())
    }

    /// Writes the line reporting an output file.
    pub fn write_written(&mut self, path: &Path, dry_run: bool) -> std::io::Result<()> {
        let message = format!("Wrote '{}'", path.display());
        let suffix = if dry_run { " (dry run)" } else { "" };
        if self.use_colors {
            writeln!(self.writer, "{}{}", message.green(), suffix.dimmed())
        } else {
            writeln!(self.writer, "{}{}", message, suffix)
        }
    }

    /// Writes a startup error.
    pub fn write_error(&mut self, message: &str) -> std::io::Result<()> {
        if self.use_colors {
            writeln!(self.writer, "{} {}", "Error:".red().bold(), message)?;
        } else {
            writeln!(self.writer, "Error: {}", message)?;
        }
        Ok(())
    }
}
