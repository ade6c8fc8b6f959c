//! Wire types exchanged with the resume intelligence service.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

// -- Role --

/// Job role the resume is scored against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Backend,
    Frontend,
    Ml,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Backend, Role::Frontend, Role::Ml];

    /// Value sent in the `role` form field.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Backend => "backend",
            Role::Frontend => "frontend",
            Role::Ml => "ml",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Backend => "Backend Developer",
            Role::Frontend => "Frontend Developer",
            Role::Ml => "ML Engineer",
        }
    }

    /// Parse a wire value. Unknown values fall back to `Backend`, the same
    /// role the service scores against when it does not recognise one.
    pub fn from_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "frontend" => Role::Frontend,
            "ml" => Role::Ml,
            _ => Role::Backend,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// -- Analysis --

/// Matching result for one resume/role pair.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalysisResult {
    pub selected: bool,
    pub score: f64,
    pub skills_found: Vec<String>,
    pub missing_skills: Vec<String>,
    pub interview_questions: Vec<String>,
    pub resume_suggestions: Vec<String>,
}

impl AnalysisResult {
    /// The question answers are evaluated against. Always the first one.
    pub fn first_question(&self) -> Option<&str> {
        self.interview_questions.first().map(String::as_str)
    }
}

/// Body of a successful `/predict` call. The service reports unreadable
/// resumes with a 200 and an `error` field instead of a result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PredictResponse {
    Failure { error: String },
    Analysis(AnalysisResult),
}

// -- Evaluation --

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluateRequest {
    pub question: String,
    pub answer: String,
}

impl EvaluateRequest {
    /// Build the evaluation payload for the first interview question of `result`.
    pub fn for_result(result: &AnalysisResult, answer: &str) -> Result<Self, ClientError> {
        let question = result.first_question().ok_or(ClientError::NoQuestion)?;
        Ok(Self {
            question: question.to_string(),
            answer: answer.to_string(),
        })
    }
}

/// Grader feedback, which the service sends either as one string or a list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Feedback {
    Single(String),
    Many(Vec<String>),
}

impl Feedback {
    pub fn items(&self) -> Vec<String> {
        match self {
            Feedback::Single(text) => vec![text.clone()],
            Feedback::Many(items) => items.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Evaluation {
    pub score: f64,
    pub feedback: Feedback,
}

// -- History --

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct HistoryEntry {
    pub score: f64,
}

/// Render a score without a trailing `.0` (82.0 -> "82", 82.5 -> "82.5").
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 && score.is_finite() {
        format!("{}", score as i64)
    } else {
        let text = format!("{:.2}", score);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
