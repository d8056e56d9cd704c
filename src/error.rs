//! Error types for the catalog and quiz engines

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while loading or querying the animal catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Malformed catalog: {0}")]
    Malformed(String),

    #[error("Animal not found: {0}")]
    NotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rejected quiz transitions. None of these leave the engine in a broken state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("Unknown quiz category: {0}")]
    UnknownCategory(String),

    #[error("No quiz in progress")]
    NotInProgress,

    #[error("Quiz is not completed yet")]
    NotCompleted,

    #[error("Question {0} is already answered")]
    AlreadyAnswered(usize),

    #[error("Option {option} does not exist (question has {available} options)")]
    InvalidOption { option: usize, available: usize },

    #[error("Please select an answer before continuing.")]
    MustAnswerFirst,

    #[error("Already at the first question")]
    AtFirstQuestion,
}
