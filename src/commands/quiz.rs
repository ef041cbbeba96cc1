use std::io;

use quiz_runner::config::QuizConfig;
use quiz_runner::problems::load_problems;
use quiz_runner::session::{LineReader, Session};

/// Load problems, apply the configured order and run one session on stdin/stdout.
pub async fn run(config: &QuizConfig) -> anyhow::Result<u8> {
    let mut problems = load_problems(&config.csv_path)?;
    config.order().apply(&mut problems);

    let session = Session::new(problems, config.time_limit);
    let mut answers = LineReader::stdin()?;
    let mut stdout = io::stdout();
    session.run(&mut answers, &mut stdout).await?;

    // Timing out is a normal ending
    Ok(0)
}
