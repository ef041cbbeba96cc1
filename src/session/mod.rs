//! Timed quiz sessions

mod input;
mod order;
mod runner;

pub use input::{AnswerSource, LineReader};
pub use order::{shuffle_problems, ProblemOrder};
pub use runner::{Session, SessionReport};
