//! Stabil - stability analysis of a fixed third-order feedback loop.
//!
//! Prints the Routh, Hurwitz and characteristic-root analyses to stdout and
//! saves the Mikhailov and Nyquist curves as SVG files.
//!
//! # Usage
//!
//! ```bash
//! stabil --output-dir plots --report-json plots/report.json
//! ```

mod plot;

use anyhow::{Context, Result};
use clap::Parser;
use stabil_core::frequency::{mikhailov_curve, nyquist_curve, CurveSettings};
use stabil_core::report::{format_header, format_report};
use stabil_core::{analyze, AnalysisSettings, FeedbackSystem, PlantConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const MIKHAILOV_FILE: &str = "mikhailov.svg";
const NYQUIST_FILE: &str = "nyquist.svg";

/// Routh, Hurwitz, root, Mikhailov and Nyquist analysis of the built-in system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory receiving the plot files
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Skip rendering the Mikhailov and Nyquist plots
    #[arg(long)]
    no_plots: bool,

    /// Also write the full analysis as JSON to this path
    #[arg(long, value_name = "PATH")]
    report_json: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(tracing::level_filters::LevelFilter::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let system = FeedbackSystem::new(&PlantConfig::default())
        .context("Built-in plant constants are malformed.")?;

    println!("{}", format_header(&system));
    let report = analyze(&system, &AnalysisSettings::default());
    print!("{}", format_report(&report));

    if let Some(path) = &args.report_json {
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize stability report.")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote JSON report");
    }

    if args.no_plots {
        return Ok(());
    }

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!("Failed to create output directory {}", args.output_dir.display())
    })?;
    let curves = CurveSettings::default();

    println!();
    println!("=== MIKHAILOV CURVE ===");
    let mikhailov = mikhailov_curve(&system, &curves.mikhailov)?;
    let mikhailov_path = args.output_dir.join(MIKHAILOV_FILE);
    plot::render_mikhailov(&mikhailov, &mikhailov_path)?;

    println!();
    println!("=== NYQUIST CURVE ===");
    let nyquist = nyquist_curve(&system, &curves.nyquist)?;
    let nyquist_path = args.output_dir.join(NYQUIST_FILE);
    plot::render_nyquist(&nyquist, &nyquist_path)?;

    println!();
    println!(
        "Plots saved as '{}' and '{}'.",
        mikhailov_path.display(),
        nyquist_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{run, Args};
    use clap::Parser;

    #[test]
    fn args_default_to_current_directory() {
        let args = Args::parse_from(["stabil"]);
        assert_eq!(args.output_dir, std::path::PathBuf::from("."));
        assert!(!args.no_plots);
        assert!(args.report_json.is_none());
    }

    #[test]
    fn run_writes_json_report() {
        let dir = std::env::temp_dir().join(format!("stabil-run-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir should be writable");
        let report_path = dir.join("report.json");
        let args = Args::parse_from([
            "stabil",
            "--no-plots",
            "--report-json",
            report_path.to_str().expect("temp path is utf-8"),
        ]);

        run(&args).expect("run should succeed");

        let json = std::fs::read_to_string(&report_path).expect("report should exist");
        let value: serde_json::Value = serde_json::from_str(&json).expect("report is valid JSON");
        assert_eq!(value["routh"]["verdict"], "unstable");
        assert_eq!(value["hurwitz"]["verdict"], "unstable");
        assert_eq!(value["roots"]["verdict"], "unstable");
        assert_eq!(value["routh"]["sign_changes"], 2);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
