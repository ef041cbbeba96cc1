//! Problem loader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

use super::types::Problem;
use crate::error::{QuizError, Result};

/// Load problems from a `question,answer` CSV file.
pub fn load_problems(path: &Path) -> Result<Vec<Problem>> {
    let file = File::open(path).map_err(|source| QuizError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let problems = parse_problems(file)?;
    info!(path = %path.display(), count = problems.len(), "loaded problems");
    Ok(problems)
}

/// Parse headerless CSV rows into problems.
///
/// Every row must have exactly two fields. Any other shape rejects the
/// whole input.
pub fn parse_problems<R: Read>(reader: R) -> Result<Vec<Problem>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut problems = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if record.len() != 2 {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            warn!(line, fields = record.len(), "malformed problem row");
            return Err(QuizError::MalformedRow {
                line,
                fields: record.len(),
            });
        }
        problems.push(Problem::new(&record[0], &record[1]));
    }

    Ok(problems)
}
