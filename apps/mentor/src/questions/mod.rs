//! Question Store: looks up a question's prompt and test cases in the reference CSV.
//!
//! The file is re-read on every lookup. Nothing is cached, so edits to the dataset take
//! effect on the next request.

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Question '{0}' not found")]
    NotFound(String),

    #[error("Failed to open question dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse question dataset: {0}")]
    Csv(#[from] csv::Error),
}

/// One row of the dataset. Columns beyond these three are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuestionRecord {
    pub question_command_id: String,
    pub question_content: String,
    pub question_test_cases: String,
}

impl fmt::Display for QuestionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Question: {}\nTest cases: {}",
            self.question_content, self.question_test_cases
        )
    }
}

#[derive(Debug, Clone)]
pub struct QuestionStore {
    path: PathBuf,
}

impl QuestionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the first row whose `question_command_id` equals `question_id` exactly.
    ///
    /// Later rows with the same id are ignored and reported as a data problem.
    pub fn lookup(&self, question_id: &str) -> Result<QuestionRecord, LookupError> {
        let file = std::fs::File::open(&self.path)?;
        let mut reader = csv::Reader::from_reader(file);

        let mut found: Option<QuestionRecord> = None;
        let mut duplicates = 0usize;

        for row in reader.deserialize::<QuestionRecord>() {
            let record = row?;
            if record.question_command_id != question_id {
                continue;
            }
            if found.is_none() {
                found = Some(record);
            } else {
                duplicates += 1;
            }
        }

        if duplicates > 0 {
            warn!(
                "Question id '{question_id}' appears {} times in {}; using the first row",
                duplicates + 1,
                self.path.display()
            );
        }

        found.ok_or_else(|| LookupError::NotFound(question_id.to_string()))
    }
}
