//! quiz-runner library
//!
//! Timed quiz sessions over CSV question/answer pairs.

pub mod config;
pub mod error;
pub mod problems;
pub mod session;
