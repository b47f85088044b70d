//! Error types for the Order actor.

use crate::lesson_actor::LessonError;
use crate::model::LessonId;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// A line item references a lesson that does not exist.
    #[error("Lesson not found: {0}")]
    LessonNotFound(LessonId),

    /// A line item asks for more spaces than the lesson has left.
    #[error("Insufficient spaces on {lesson}: requested {requested}, available {available}")]
    InsufficientSpaces {
        lesson: LessonId,
        requested: u32,
        available: u32,
    },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<LessonError> for OrderError {
    fn from(e: LessonError) -> Self {
        match e {
            LessonError::NotFound(id) => OrderError::LessonNotFound(id),
            LessonError::InsufficientSpaces {
                lesson,
                requested,
                available,
            } => OrderError::InsufficientSpaces {
                lesson,
                requested,
                available,
            },
            LessonError::InvalidQuantity(q) => {
                OrderError::ValidationError(format!("quantity must be at least 1, got {q}"))
            }
            LessonError::ActorCommunicationError(msg) => OrderError::ActorCommunicationError(msg),
        }
    }
}
