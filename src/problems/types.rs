//! Problem record

/// A question and the answer expected for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    question: String,
    answer: String,
}

impl Problem {
    /// Build a problem. The answer is trimmed and lower-cased.
    pub fn new(question: impl Into<String>, answer: &str) -> Self {
        Self {
            question: question.into(),
            answer: normalize(answer),
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    /// Normalized expected answer.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Check a user response, ignoring case and surrounding whitespace.
    pub fn is_correct(&self, response: &str) -> bool {
        normalize(response) == self.answer
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
