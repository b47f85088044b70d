use super::error::ApiError;
use super::AppState;
use crate::model::{Lesson, LessonId, LessonUpdate};
use crate::search::TextQuery;
use actor_framework::ActorClient;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct UpdateLessonResponse {
    pub success: bool,
    pub message: &'static str,
    pub result: Lesson,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

fn parse_id(raw: &str) -> Result<LessonId, ApiError> {
    raw.parse().map_err(|e: crate::model::IdParseError| ApiError::validation(e.to_string()))
}

pub async fn list_lessons(State(state): State<AppState>) -> Result<Json<Vec<Lesson>>, ApiError> {
    state
        .lessons
        .list()
        .await
        .map(Json)
        .map_err(|e| ApiError::from_lesson(e, "An error occurred while fetching lessons."))
}

pub async fn get_lesson(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Lesson>, ApiError> {
    let id = parse_id(&id)?;
    match state.lessons.get(id).await {
        Ok(Some(lesson)) => Ok(Json(lesson)),
        Ok(None) => Err(ApiError::not_found("Lesson not found.")),
        Err(e) => Err(ApiError::from_lesson(
            e,
            "An error occurred while fetching the lesson.",
        )),
    }
}

/// Sets the lesson's remaining capacity to exactly the value sent.
pub async fn update_lesson(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<LessonUpdate>, JsonRejection>,
) -> Result<Json<UpdateLessonResponse>, ApiError> {
    let id = parse_id(&id)?;
    let Json(update) = payload?;
    let lesson = state
        .lessons
        .set_spaces(id, update.spaces)
        .await
        .map_err(|e| ApiError::from_lesson(e, "An error occurred while updating the lesson."))?;

    Ok(Json(UpdateLessonResponse {
        success: true,
        message: "Lesson updated successfully",
        result: lesson,
    }))
}

pub async fn search_lessons(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Lesson>>, ApiError> {
    let Query(params) = params?;
    let query = TextQuery::parse(params.q.as_deref().unwrap_or_default());
    state
        .lessons
        .search(query)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_lesson(e, "An error occurred during the search."))
}
