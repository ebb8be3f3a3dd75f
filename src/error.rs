// Error taxonomy for the analysis core.
//
// Three kinds of failure reach the caller: malformed options (validation),
// inputs that normalize down to nothing (insufficient data), and topic
// inference producing unusable numbers (computation). Every component either
// returns a complete result or one of these, never a partial result.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// A pipeline stage, used to tell the caller where something went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Frequency,
    Topics,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Frequency => write!(f, "frequency"),
            Self::Topics => write!(f, "topics"),
        }
    }
}

/// The option or input field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Documents,
    TopWords,
    NumTopics,
    AnalyzeThemes,
    Document,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Documents => write!(f, "documents"),
            Self::TopWords => write!(f, "top_words"),
            Self::NumTopics => write!(f, "num_topics"),
            Self::AnalyzeThemes => write!(f, "analyze_themes"),
            Self::Document => write!(f, "document"),
        }
    }
}

/// One violated field with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Field,
    pub reason: String,
}

/// All validation failures found at the boundary, in the order they were checked.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Error)]
#[error("{}", join_field_errors(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// A validation error with a single violated field.
    pub fn single(field: Field, reason: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field,
                reason: reason.into(),
            }],
        }
    }

    pub fn push(&mut self, field: Field, reason: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            reason: reason.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether any recorded failure refers to `field`.
    pub fn has_field(&self, field: Field) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// `Ok(())` when nothing was recorded, otherwise the collected errors.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AnalysisError::Validation(self))
        }
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid analysis options: {0}")]
    Validation(ValidationError),

    #[error("insufficient data at {stage} stage{}: {reason}", document_suffix(.document))]
    InsufficientData {
        stage: Stage,
        document: Option<String>,
        reason: String,
    },

    #[error("computation failed at {stage} stage: {reason} (try again with fewer topics)")]
    Computation { stage: Stage, reason: String },
}

impl AnalysisError {
    pub fn insufficient(stage: Stage, reason: impl Into<String>) -> Self {
        Self::InsufficientData {
            stage,
            document: None,
            reason: reason.into(),
        }
    }

    /// The validation payload, if this is a validation failure.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(v) => Some(v),
            _ => None,
        }
    }
}

impl From<ValidationError> for AnalysisError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

fn document_suffix(document: &Option<String>) -> String {
    match document {
        Some(id) => format!(" (document '{id}')"),
        None => String::new(),
    }
}
