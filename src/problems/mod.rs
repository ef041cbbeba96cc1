//! Problem records and CSV loading

mod loader;
mod types;

pub use loader::{load_problems, parse_problems};
pub use types::Problem;
