//! Story Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoryError {
    #[error("Please enter at least one character to get started")]
    EmptyCharacters,

    #[error("Please enter your Gemini API key")]
    MissingApiKey,

    #[error("Unknown genre: {0}")]
    UnknownGenre(String),

    #[error("Unknown age group: {0}")]
    UnknownAgeGroup(String),

    #[error("Story text cannot be empty")]
    EmptyStory,
}
