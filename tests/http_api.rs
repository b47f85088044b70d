mod common;

use axum::http::StatusCode;
use common::{catalog, empty_request, json_request, read_bytes, read_json, spawn_app, IMAGE_BYTES};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn lessons_are_listed_in_id_order() {
    let app = spawn_app(catalog()).await;

    let response = app
        .router
        .oneshot(empty_request("GET", "/lessons"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|lesson| lesson["_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["lesson_1", "lesson_2", "lesson_3"]);
    assert_eq!(body[0]["subject"], "Maths");
    assert_eq!(body[0]["spaces"], 5);
}

#[tokio::test]
async fn single_lesson_lookup() {
    let app = spawn_app(catalog()).await;

    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/lessons/lesson_2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["subject"], "Art");

    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/lessons/lesson_99"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await, json!({ "error": "Lesson not found." }));

    let response = app
        .router
        .oneshot(empty_request("GET", "/lessons/not-an-id"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(read_json(response).await["error"].is_string());
}

#[tokio::test]
async fn put_sets_spaces_absolutely() {
    let app = spawn_app(catalog()).await;

    for _ in 0..2 {
        let response = app
            .router
            .clone()
            .oneshot(json_request("PUT", "/lessons/lesson_1", json!({ "spaces": 10 })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Lesson updated successfully");
        assert_eq!(body["result"]["_id"], "lesson_1");
        assert_eq!(body["result"]["spaces"], 10);
    }
}

#[tokio::test]
async fn put_rejects_bad_input() {
    let app = spawn_app(catalog()).await;

    let negative = app
        .router
        .clone()
        .oneshot(json_request("PUT", "/lessons/lesson_1", json!({ "spaces": -1 })))
        .await
        .unwrap();
    assert_eq!(negative.status(), StatusCode::BAD_REQUEST);

    let unknown = app
        .router
        .clone()
        .oneshot(json_request("PUT", "/lessons/lesson_42", json!({ "spaces": 3 })))
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    let spaces = app.system.lesson_client.check_spaces(app.ids[0]).await.unwrap();
    assert_eq!(spaces, 5);
}

#[tokio::test]
async fn placing_an_order_takes_spaces() {
    let app = spawn_app(catalog()).await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/order",
            json!({
                "customerName": "Alice",
                "customerPhone": "07700900123",
                "items": [{ "id": "lesson_1", "quantity": 2 }]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({ "success": true, "message": "Order saved successfully", "orderId": "order_1" })
    );

    let orders = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/orders"))
        .await
        .unwrap();
    assert_eq!(
        read_json(orders).await,
        json!([{
            "_id": "order_1",
            "customerName": "Alice",
            "customerPhone": "07700900123",
            "items": [{ "id": "lesson_1", "quantity": 2 }]
        }])
    );

    let lesson = app
        .router
        .oneshot(empty_request("GET", "/lessons/lesson_1"))
        .await
        .unwrap();
    assert_eq!(read_json(lesson).await["spaces"], 3);
}

#[tokio::test]
async fn order_failures_map_to_statuses() {
    let app = spawn_app(catalog()).await;
    let cases = [
        (
            json!({ "customerName": "A", "items": [{ "id": "lesson_3", "quantity": 2 }] }),
            StatusCode::CONFLICT,
        ),
        (
            json!({ "customerName": "A", "items": [{ "id": "lesson_9", "quantity": 1 }] }),
            StatusCode::NOT_FOUND,
        ),
        (json!({ "customerName": "A", "items": [] }), StatusCode::BAD_REQUEST),
        (
            json!({ "customerName": "A", "items": [{ "id": "lesson_1", "quantity": 0 }] }),
            StatusCode::BAD_REQUEST,
        ),
        (
            json!({ "customerName": "A", "items": [{ "id": "42", "quantity": 1 }] }),
            StatusCode::BAD_REQUEST,
        ),
        (json!({ "customerName": "A" }), StatusCode::BAD_REQUEST),
    ];

    for (body, status) in cases {
        let response = app
            .router
            .clone()
            .oneshot(json_request("POST", "/order", body.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), status, "{body}");
        assert!(read_json(response).await["error"].is_string());
    }

    let orders = app.router.oneshot(empty_request("GET", "/orders")).await.unwrap();
    assert_eq!(read_json(orders).await, json!([]));
}

#[tokio::test]
async fn search_matches_indexed_fields() {
    let app = spawn_app(catalog()).await;

    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/search?q=maths"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let found = read_json(response).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["_id"], "lesson_1");

    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/search?q=barnet%20hendon"))
        .await
        .unwrap();
    assert_eq!(read_json(response).await.as_array().unwrap().len(), 2);

    for uri in ["/search?q=chess", "/search?q=", "/search"] {
        let response = app
            .router
            .clone()
            .oneshot(empty_request("GET", uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert_eq!(read_json(response).await, json!([]), "{uri}");
    }
}

#[tokio::test]
async fn undefined_routes_get_the_fixed_not_found() {
    let app = spawn_app(catalog()).await;
    let requests = [
        ("GET", "/nowhere"),
        ("POST", "/nowhere"),
        ("DELETE", "/lessons"),
        ("POST", "/lessons/lesson_1"),
        ("GET", "/order"),
        ("GET", "/images/missing.png"),
    ];

    for (method, uri) in requests {
        let response = app
            .router
            .clone()
            .oneshot(empty_request(method, uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(
            read_bytes(response).await,
            b"You are not in the right place!!",
            "{method} {uri}"
        );
    }
}

#[tokio::test]
async fn images_are_served() {
    let app = spawn_app(vec![]).await;

    let response = app
        .router
        .oneshot(empty_request("GET", "/images/maths.png"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_bytes(response).await, IMAGE_BYTES);
}

#[tokio::test]
async fn cors_allows_only_the_configured_origin() {
    let app = spawn_app(vec![]).await;

    let allowed = axum::http::Request::builder()
        .uri("/lessons")
        .header("origin", "https://mhdali818.github.io")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(allowed).await.unwrap();
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "https://mhdali818.github.io"
    );

    let foreign = axum::http::Request::builder()
        .uri("/lessons")
        .header("origin", "https://example.com")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.router.oneshot(foreign).await.unwrap();
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
