use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use lesson_booking::api::build_router;
use lesson_booking::config::Config;
use lesson_booking::lifecycle::BookingSystem;
use lesson_booking::model::{LessonCreate, LessonId};
use tempfile::TempDir;

pub const IMAGE_BYTES: &[u8] = b"\x89PNG fake image";

/// A router over a freshly seeded system, with a scratch images directory.
pub struct TestApp {
    pub router: Router,
    pub system: BookingSystem,
    pub ids: Vec<LessonId>,
    _images: TempDir,
}

pub async fn spawn_app(lessons: Vec<LessonCreate>) -> TestApp {
    let images = tempfile::tempdir().expect("tempdir");
    std::fs::write(images.path().join("maths.png"), IMAGE_BYTES).expect("image");

    let images_dir = images.path().to_string_lossy().into_owned();
    let config = Config::from_lookup(|key| match key {
        "DB_CONNECTION" => Some("memory://".to_string()),
        "IMAGES_DIR" => Some(images_dir.clone()),
        _ => None,
    })
    .expect("config");

    let system = BookingSystem::new();
    let ids = system.seed(lessons).await.expect("seed");
    let router = build_router(system.state(), &config);

    TestApp {
        router,
        system,
        ids,
        _images: images,
    }
}

pub fn catalog() -> Vec<LessonCreate> {
    vec![
        LessonCreate::new("Maths", "Hendon", 100.0, 5),
        LessonCreate::new("Art", "Barnet", 80.0, 4),
        LessonCreate::new("Creative Writing", "Golders Green", 90.0, 1),
    ]
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub async fn read_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body")
        .to_vec()
}

pub async fn read_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&read_bytes(response).await).expect("json")
}
