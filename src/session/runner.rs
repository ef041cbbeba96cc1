//! Timed session loop and score report

use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use super::input::AnswerSource;
use crate::problems::Problem;

/// Final tally of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub correct: usize,
    /// Problems answered before the deadline.
    pub attempted: usize,
    pub total: usize,
    pub timed_out: bool,
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.timed_out {
            write!(f, "Time Out: ")?;
        }
        write!(f, "You scored {} out of {}.", self.correct, self.total)
    }
}

/// A timed pass over an ordered set of problems.
///
/// One deadline covers the whole session. It is fixed once the user
/// confirms the ready prompt, and every answer races against it.
pub struct Session {
    problems: Vec<Problem>,
    time_limit: Duration,
}

impl Session {
    pub fn new(problems: Vec<Problem>, time_limit: Duration) -> Self {
        Self {
            problems,
            time_limit,
        }
    }

    /// Run the session, writing prompts and the final score to `out`.
    ///
    /// Exhausted input counts as an empty (wrong) answer. The pending read
    /// is dropped when the deadline wins, so `answers` must be cancel-safe.
    pub async fn run<A, W>(&self, answers: &mut A, out: &mut W) -> io::Result<SessionReport>
    where
        A: AnswerSource,
        W: Write,
    {
        write!(
            out,
            "Press enter when ready to start. Time limit is {} seconds",
            self.time_limit.as_secs()
        )?;
        out.flush()?;
        let _ = answers.next_answer().await;

        // `None` when the limit is past what the clock can represent
        let deadline = Instant::now().checked_add(self.time_limit);
        let total = self.problems.len();
        let mut correct = 0;
        let mut attempted = 0;

        for (i, problem) in self.problems.iter().enumerate() {
            writeln!(out, "Problem #{}: {} = ", i + 1, problem.question())?;
            out.flush()?;

            let response = if deadline.is_some_and(|d| Instant::now() >= d) {
                None
            } else {
                tokio::select! {
                    biased;
                    _ = expire(deadline) => None,
                    answer = answers.next_answer() => Some(answer.unwrap_or_default()),
                }
            };

            let Some(response) = response else {
                let report = SessionReport {
                    correct,
                    attempted,
                    total,
                    timed_out: true,
                };
                info!(correct, attempted, total, "session timed out");
                writeln!(out, "{report}")?;
                return Ok(report);
            };

            attempted += 1;
            let is_correct = problem.is_correct(&response);
            if is_correct {
                correct += 1;
            }
            debug!(problem = i + 1, is_correct, "answer received");
        }

        let report = SessionReport {
            correct,
            attempted,
            total,
            timed_out: false,
        };
        info!(correct, total, "session complete");
        writeln!(out, "{report}")?;
        Ok(report)
    }
}

async fn expire(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// What a scripted source does once its lines run out.
    enum Then {
        Stall,
        Close,
    }

    struct Scripted {
        lines: VecDeque<String>,
        delay: Duration,
        then: Then,
    }

    impl Scripted {
        fn new(lines: &[&str], then: Then) -> Self {
            Self {
                lines: lines.iter().map(|s| s.to_string()).collect(),
                delay: Duration::ZERO,
                then,
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    impl AnswerSource for Scripted {
        async fn next_answer(&mut self) -> Option<String> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            match self.lines.pop_front() {
                Some(line) => Some(line),
                None => match self.then {
                    Then::Stall => std::future::pending().await,
                    Then::Close => None,
                },
            }
        }
    }

    fn arithmetic() -> Vec<Problem> {
        vec![Problem::new("5+5", "10"), Problem::new("1+1", "2")]
    }

    async fn run_session(
        problems: Vec<Problem>,
        limit: Duration,
        answers: &mut Scripted,
    ) -> (SessionReport, String) {
        let session = Session::new(problems, limit);
        let mut out = Vec::new();
        let report = session.run(answers, &mut out).await.unwrap();
        (report, String::from_utf8(out).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_correct_before_timeout() {
        let mut answers = Scripted::new(&["", "10", "2"], Then::Stall);
        let (report, out) = run_session(arithmetic(), Duration::from_secs(30), &mut answers).await;

        assert_eq!(report.correct, 2);
        assert_eq!(report.attempted, 2);
        assert_eq!(report.total, 2);
        assert!(!report.timed_out);
        assert!(out.starts_with("Press enter when ready to start. Time limit is 30 seconds"));
        assert!(out.contains("Problem #1: 5+5 = \n"));
        assert!(out.contains("Problem #2: 1+1 = \n"));
        assert!(out.ends_with("You scored 2 out of 2.\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_answers_compared_case_insensitively() {
        let problems = vec![Problem::new("Capital of France", "Paris")];
        let mut answers = Scripted::new(&["", "  pARIS "], Then::Stall);
        let (report, _) = run_session(problems, Duration::from_secs(30), &mut answers).await;
        assert_eq!(report.correct, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrong_answer_not_counted() {
        let mut answers = Scripted::new(&["", "11", "2"], Then::Stall);
        let (report, out) = run_session(arithmetic(), Duration::from_secs(30), &mut answers).await;
        assert_eq!(report.correct, 1);
        assert_eq!(report.attempted, 2);
        assert!(out.ends_with("You scored 1 out of 2.\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_before_any_input() {
        let mut answers = Scripted::new(&[""], Then::Stall);
        let (report, out) = run_session(arithmetic(), Duration::from_secs(30), &mut answers).await;

        assert_eq!(report.correct, 0);
        assert_eq!(report.attempted, 0);
        assert!(report.timed_out);
        assert!(out.contains("Problem #1: 5+5 = \n"));
        assert!(!out.contains("Problem #2"));
        assert!(out.ends_with("Time Out: You scored 0 out of 2.\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_keeps_partial_score() {
        let mut answers = Scripted::new(&["", "10"], Then::Stall);
        let (report, out) = run_session(arithmetic(), Duration::from_secs(30), &mut answers).await;
        assert_eq!(report.correct, 1);
        assert_eq!(report.attempted, 1);
        assert!(report.timed_out);
        assert!(out.ends_with("Time Out: You scored 1 out of 2.\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_limit_times_out_immediately() {
        let mut answers = Scripted::new(&["", "10", "2"], Then::Stall);
        let (report, out) = run_session(arithmetic(), Duration::ZERO, &mut answers).await;
        assert_eq!(report.correct, 0);
        assert!(report.timed_out);
        assert!(out.ends_with("Time Out: You scored 0 out of 2.\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_limit_is_shared_across_problems() {
        // Each answer takes 10s; a 25s limit covers two of three problems.
        let problems = vec![
            Problem::new("5+5", "10"),
            Problem::new("1+1", "2"),
            Problem::new("3+3", "6"),
        ];
        let mut answers = Scripted::new(&["", "10", "2", "6"], Then::Stall)
            .with_delay(Duration::from_secs(10));
        let (report, out) = run_session(problems, Duration::from_secs(25), &mut answers).await;

        assert_eq!(report.correct, 2);
        assert_eq!(report.attempted, 2);
        assert!(report.timed_out);
        assert!(out.contains("Problem #3: 3+3 = \n"));
        assert!(out.ends_with("Time Out: You scored 2 out of 3.\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_input_counts_as_wrong() {
        let mut answers = Scripted::new(&["", "10"], Then::Close);
        let (report, out) = run_session(arithmetic(), Duration::from_secs(30), &mut answers).await;
        assert_eq!(report.correct, 1);
        assert_eq!(report.attempted, 2);
        assert!(!report.timed_out);
        assert!(out.ends_with("You scored 1 out of 2.\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_limit_does_not_overflow() {
        let mut answers = Scripted::new(&["", "10", "2"], Then::Stall);
        let (report, out) =
            run_session(arithmetic(), Duration::from_secs(u64::MAX), &mut answers).await;
        assert_eq!(report.correct, 2);
        assert!(!report.timed_out);
        assert!(out.contains("Time limit is 18446744073709551615 seconds"));
        assert!(out.ends_with("You scored 2 out of 2.\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_session() {
        let mut answers = Scripted::new(&[], Then::Close);
        let (report, out) = run_session(Vec::new(), Duration::from_secs(30), &mut answers).await;
        assert_eq!(report.total, 0);
        assert!(!report.timed_out);
        assert!(out.ends_with("You scored 0 out of 0.\n"));
    }

    #[test]
    fn test_report_display() {
        let report = SessionReport {
            correct: 3,
            attempted: 4,
            total: 5,
            timed_out: false,
        };
        assert_eq!(report.to_string(), "You scored 3 out of 5.");

        let timed_out = SessionReport {
            timed_out: true,
            ..report
        };
        assert_eq!(timed_out.to_string(), "Time Out: You scored 3 out of 5.");
    }
}
