//! Mapping domain failures onto HTTP responses.
//!
//! Every error body is `{"error": "<message>"}`. Infrastructure failures log
//! their detail server-side and answer with the endpoint's generic message.

use crate::lesson_actor::LessonError;
use crate::order_actor::OrderError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::any::Any;
use std::fmt::Display;
use tracing::error;

const PANIC_PAGE: &str = include_str!("../../public/500.html");
const NOT_FOUND_TEXT: &str = "You are not in the right place!!";

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Error returned by every JSON handler.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    /// A 500 whose body only carries `public`; `detail` goes to the log.
    pub fn internal(public: &'static str, detail: impl Display) -> Self {
        error!(error = %detail, "{public}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: public.to_string(),
        }
    }

    /// Maps a catalog failure; `context` is the 500 message for this endpoint.
    pub fn from_lesson(e: LessonError, context: &'static str) -> Self {
        match e {
            LessonError::NotFound(_) => Self::not_found("Lesson not found."),
            LessonError::InsufficientSpaces { .. } => Self::conflict(e.to_string()),
            LessonError::InvalidQuantity(_) => Self::validation(e.to_string()),
            LessonError::ActorCommunicationError(_) => Self::internal(context, e),
        }
    }

    pub fn from_order(e: OrderError) -> Self {
        match e {
            OrderError::ValidationError(_) => Self::validation(e.to_string()),
            OrderError::LessonNotFound(_) => Self::not_found(e.to_string()),
            OrderError::InsufficientSpaces { .. } => Self::conflict(e.to_string()),
            OrderError::ActorCommunicationError(_) => {
                Self::internal("An error occurred while processing the order.", e)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

/// Answer for any route, method or static file that does not exist.
pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, NOT_FOUND_TEXT)
}

/// Turns a handler panic into the static error page.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        PANIC_PAGE,
    )
        .into_response()
}
