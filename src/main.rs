use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dass21_tracker::history::{filter_by_nim, transform_records};
use dass21_tracker::models::{Aspect, NormalizedResult};
use dass21_tracker::{report, severity, source, trend};

#[derive(Parser)]
#[command(name = "dass21-tracker")]
#[command(about = "DASS-21 test history and trend analysis for student counselling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single sub-scale score
    Classify {
        #[arg(long, allow_negative_numbers = true)]
        score: i32,
        #[arg(long, default_value = "stress")]
        aspect: String,
    },
    /// List a normalized test history
    History {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        nim: Option<String>,
    },
    /// Compare a test with the one before it
    Compare {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        nim: Option<String>,
        /// Position of the newer test in the newest-first history
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
    /// Generate a markdown report
    Report {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        nim: Option<String>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Convert a CSV export into a JSON history response
    Import {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dass21_tracker=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Classify { score, aspect } => {
            let level = severity::classify(score, &aspect);
            println!("{} ({})", level.level, level.color);
        }
        Commands::History { input, nim } => {
            let results = load_history(&input, nim.as_deref())?;

            if results.is_empty() {
                println!("No tests found.");
                return Ok(());
            }

            for result in results.iter() {
                let levels: Vec<String> = Aspect::ALL
                    .iter()
                    .map(|&aspect| {
                        format!(
                            "{} {} ({})",
                            aspect.label(),
                            result.score(aspect),
                            result.severity(aspect).level
                        )
                    })
                    .collect();
                println!(
                    "#{} {} {} ({}): {} | total {}",
                    result.test_number,
                    result.tanggal_tes,
                    result.nama,
                    result.nim,
                    levels.join(", "),
                    result.total
                );
            }
        }
        Commands::Compare { input, nim, offset } => {
            let results = load_history(&input, nim.as_deref())?;
            let comparison = trend::compare(results.get(offset), results.get(offset + 1));

            match comparison {
                None => println!("Not enough tests to compare."),
                Some(comparison) => println!("{}", serde_json::to_string_pretty(&comparison)?),
            }
        }
        Commands::Report { input, nim, out } => {
            let results = load_history(&input, nim.as_deref())?;
            let output = report::build_report(nim.as_deref(), &results);
            std::fs::write(&out, output)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Import { csv, out } => {
            let records = source::read_csv(&csv)?;
            let written = source::write_response(&out, records)?;
            println!("Converted {written} tests from {}.", csv.display());
        }
    }

    Ok(())
}

fn load_history(input: &Path, nim: Option<&str>) -> anyhow::Result<Vec<NormalizedResult>> {
    let response = source::load_response(input)?;
    let records = response.data.unwrap_or_default();
    let records = match nim {
        Some(nim) => filter_by_nim(&records, nim),
        None => records,
    };
    Ok(transform_records(&records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_accepts_negative_scores() {
        let cli = Cli::try_parse_from([
            "dass21-tracker",
            "classify",
            "--score",
            "-1",
            "--aspect",
            "depression",
        ])
        .unwrap();

        match cli.command {
            Commands::Classify { score, aspect } => {
                assert_eq!(score, -1);
                assert!(severity::classify(score, &aspect).is_unknown());
            }
            _ => panic!("expected classify"),
        }
    }
}
