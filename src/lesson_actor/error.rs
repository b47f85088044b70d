//! Error types for the Lesson actor.

use crate::model::LessonId;
use thiserror::Error;

/// Errors that can occur during lesson operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LessonError {
    /// The requested lesson was not found.
    #[error("Lesson not found: {0}")]
    NotFound(LessonId),

    /// The reservation would take more spaces than remain.
    #[error("Insufficient spaces on {lesson}: requested {requested}, available {available}")]
    InsufficientSpaces {
        lesson: LessonId,
        requested: u32,
        available: u32,
    },

    /// Zero-sized reservations and releases are rejected.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
