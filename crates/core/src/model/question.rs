use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of options a multiple-choice question must offer.
pub const MIN_OPTIONS: usize = 2;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt is empty")]
    EmptyPrompt,

    #[error("question needs at least {MIN_OPTIONS} options, got {len}")]
    TooFewOptions { len: usize },

    #[error("option {index} is empty")]
    EmptyOption { index: usize },

    #[error("correct option {index} is out of range for {len} options")]
    CorrectOutOfRange { index: usize, len: usize },
}

//
// ─── QUESTION TYPES ───────────────────────────────────────────────────────────
//

/// Unvalidated question as authored in the content catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct QuestionDraft {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct: usize,
    pub explanation: String,
}

impl QuestionDraft {
    #[must_use]
    pub fn new(
        prompt: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct: usize,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct,
            explanation: explanation.into(),
        }
    }

    /// Validate the draft into an immutable `Question`.
    ///
    /// Prompt and options are trimmed; the explanation may be empty.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt or an option is blank, fewer than
    /// two options are given, or the correct index is out of bounds.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let prompt = self.prompt.trim().to_owned();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        if self.options.len() < MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions {
                len: self.options.len(),
            });
        }

        let mut options = Vec::with_capacity(self.options.len());
        for (index, option) in self.options.into_iter().enumerate() {
            let option = option.trim().to_owned();
            if option.is_empty() {
                return Err(QuestionError::EmptyOption { index });
            }
            options.push(option);
        }

        if self.correct >= options.len() {
            return Err(QuestionError::CorrectOutOfRange {
                index: self.correct,
                len: options.len(),
            });
        }

        Ok(Question {
            prompt,
            options,
            correct: self.correct,
            explanation: self.explanation.trim().to_owned(),
        })
    }
}

/// A validated multiple-choice question.
///
/// Invariant: `correct < options.len()` and `options.len() >= 2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionDraft")]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct: usize,
    explanation: String,
}

impl TryFrom<QuestionDraft> for Question {
    type Error = QuestionError;

    fn try_from(draft: QuestionDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

impl Question {
    /// Shorthand for building and validating a draft.
    ///
    /// # Errors
    ///
    /// See [`QuestionDraft::validate`].
    pub fn new(
        prompt: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct: usize,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        QuestionDraft::new(prompt, options, correct, explanation).validate()
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct]
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_question_trims_text() {
        let q = Question::new(
            "  How do you say 'Hello'?  ",
            ["Adiós", " Hola "],
            1,
            "'Hola' is the usual greeting.",
        )
        .unwrap();

        assert_eq!(q.prompt(), "How do you say 'Hello'?");
        assert_eq!(q.correct_option(), "Hola");
        assert!(q.is_correct(1));
        assert!(!q.is_correct(0));
    }

    #[test]
    fn blank_prompt_is_rejected() {
        let err = Question::new("   ", ["a", "b"], 0, "").unwrap_err();
        assert_eq!(err, QuestionError::EmptyPrompt);
    }

    #[test]
    fn single_option_is_rejected() {
        let err = Question::new("Q", ["only"], 0, "").unwrap_err();
        assert_eq!(err, QuestionError::TooFewOptions { len: 1 });
    }

    #[test]
    fn blank_option_reports_its_index() {
        let err = Question::new("Q", ["a", " ", "c"], 0, "").unwrap_err();
        assert_eq!(err, QuestionError::EmptyOption { index: 1 });
    }

    #[test]
    fn correct_index_must_be_in_bounds() {
        let err = Question::new("Q", ["a", "b", "c"], 3, "").unwrap_err();
        assert_eq!(err, QuestionError::CorrectOutOfRange { index: 3, len: 3 });
    }

    #[test]
    fn deserializing_validates_like_new() {
        let q: Question = serde_json::from_str(
            r#"{"prompt":" Hola? ","options":["Hi","Bye"],"correct":0,"explanation":""}"#,
        )
        .unwrap();
        assert_eq!(q.prompt(), "Hola?");

        let out_of_range = serde_json::from_str::<Question>(
            r#"{"prompt":"Q","options":["a","b"],"correct":5,"explanation":""}"#,
        );
        assert!(out_of_range.is_err());
        let single = serde_json::from_str::<Question>(
            r#"{"prompt":"Q","options":["a"],"correct":0,"explanation":""}"#,
        );
        assert!(single.is_err());
    }
}
