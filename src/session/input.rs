//! User answer sources

use std::future::Future;
use std::io::{BufRead, BufReader};
use std::thread;

use tokio::sync::mpsc;
use tracing::debug;

use crate::error::{QuizError, Result};

/// Producer of user answers, one line at a time.
///
/// `next_answer` must be cancel-safe. The session drops the pending future
/// whenever the deadline fires first, and a line must not be lost when
/// that happens.
pub trait AnswerSource {
    /// Next line of input, or `None` once input is exhausted.
    fn next_answer(&mut self) -> impl Future<Output = Option<String>>;
}

/// Lines read on a dedicated thread and handed over through a channel.
///
/// Blocking reads cannot be cancelled, so they stay off the runtime.
/// Dropping the `LineReader` closes the channel and the thread stops after
/// its current read returns.
pub struct LineReader {
    rx: mpsc::UnboundedReceiver<String>,
}

impl LineReader {
    /// Start reading lines from `reader`.
    pub fn spawn<R>(reader: R) -> Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();

        thread::Builder::new()
            .name("quiz-input".to_string())
            .spawn(move || {
                for line in reader.lines() {
                    match line {
                        Ok(line) => {
                            if tx.send(line).is_err() {
                                debug!("answer channel closed, input reader stopping");
                                break;
                            }
                        }
                        Err(e) => {
                            debug!(error = %e, "input read failed");
                            break;
                        }
                    }
                }
            })
            .map_err(QuizError::Input)?;

        Ok(Self { rx })
    }

    /// Read answers from standard input.
    pub fn stdin() -> Result<Self> {
        Self::spawn(BufReader::new(std::io::stdin()))
    }
}

impl AnswerSource for LineReader {
    async fn next_answer(&mut self) -> Option<String> {
        self.rx.recv().await
    }
}
