use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use quiz_runner::config::{Overrides, QuizConfig};

mod commands;

#[derive(Parser)]
#[command(name = "quiz-runner")]
#[command(about = "Timed quiz over a CSV of question/answer pairs")]
#[command(version)]
struct Cli {
    /// A CSV file in 'question,answer' format (default: problems.csv)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Time limit for the whole quiz in seconds (default: 30)
    #[arg(long)]
    limit: Option<u64>,

    /// Shuffle the questions before starting (`--random=false` turns it off)
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    random: Option<bool>,

    /// Seed for a reproducible shuffle (only used with --random)
    #[arg(long)]
    seed: Option<u64>,

    /// Path to config file (default: ~/.config/quiz-runner/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout is the quiz itself
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            println!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<u8> {
    let cli = Cli::parse();

    let overrides = Overrides {
        csv: cli.csv,
        limit: cli.limit,
        random: cli.random,
        seed: cli.seed,
    };
    let config = QuizConfig::load(cli.config.as_deref(), overrides)?;

    commands::quiz::run(&config).await
}
