//! HTTP surface: router wiring, middleware and shared handler state.

pub mod error;
pub mod lessons;
pub mod orders;

use crate::clients::{LessonClient, OrderClient};
use crate::config::Config;
use axum::handler::HandlerWithoutStateExt;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use error::not_found;

/// Clients shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub lessons: LessonClient,
    pub orders: OrderClient,
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
            )
        })
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let images = ServeDir::new(&config.images_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found.into_service());

    // wrong methods on known paths get the same answer as unknown paths
    Router::new()
        .route("/lessons", get(lessons::list_lessons).fallback(not_found))
        .route(
            "/lessons/:id",
            get(lessons::get_lesson)
                .put(lessons::update_lesson)
                .fallback(not_found),
        )
        .route("/orders", get(orders::list_orders).fallback(not_found))
        .route("/order", post(orders::place_order).fallback(not_found))
        .route("/search", get(lessons::search_lessons).fallback(not_found))
        .nest_service("/images", images)
        .fallback(not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(cors)
        .layer(trace_layer)
}
