//! Generate virtual CODEOWNERS fixtures for benchmarking.
//!
//! Usage: cargo run --release --bin generate-fixtures --features generate -- [output_dir]
//!
//! Generates deterministic fixtures using the same presets as the Rust benchmarks.
//! Every fixture gets a `<name>.txt` virtual CODEOWNERS file and a
//! `<name>-teams.json` team map.

use std::{fs, io, path::Path, path::PathBuf, process::ExitCode};
use vcodeowners_core::generate::{GeneratorConfig, generate_fixture};

/// Type alias for fixture preset entries.
type PresetEntry = (&'static str, fn() -> GeneratorConfig);

/// Fixture presets - keep in sync with benches/fixtures.rs
const PRESETS: &[PresetEntry] = &[
    ("small", GeneratorConfig::small),
    ("medium", GeneratorConfig::medium),
    ("large", GeneratorConfig::large),
    ("xlarge", GeneratorConfig::xlarge),
];

fn main() -> ExitCode {
    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("benches/fixtures"));

    if let Err(e) = run(&output_dir) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(output_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(output_dir)?;

    for (name, config_fn) in PRESETS {
        let config = config_fn();
        let fixture = generate_fixture(&config);

        let path = output_dir.join(format!("{name}.txt"));
        fs::write(&path, &fixture.content)?;
        fs::write(
            output_dir.join(format!("{name}-teams.json")),
            fixture.team_map_json(),
        )?;

        println!(
            "Generated {} ({} bytes, {} rules, {} sections, {} teams)",
            path.display(),
            fixture.content.len(),
            config.num_rules,
            config.num_sections,
            fixture.team_map.len()
        );
    }

    Ok(())
}
