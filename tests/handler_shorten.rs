mod common;

use axum::http::{
    StatusCode,
    header::{COOKIE, SET_COOKIE},
};
use serde_json::json;

#[tokio::test]
async fn test_shorten_text_success() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.post("/").text("http://yandex.ru").await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.text(), common::short_url("obrnfe4"));
    assert_eq!(response.headers().get_all(SET_COOKIE).iter().count(), 2);
}

#[tokio::test]
async fn test_shorten_text_is_idempotent() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let first = server.post("/").text("http://yandex.ru").await;
    let second = server.post("/").text("http://yandex.ru").await;

    first.assert_status(StatusCode::CREATED);
    second.assert_status(StatusCode::CREATED);
    assert_eq!(first.text(), second.text());
}

#[tokio::test]
async fn test_shorten_text_rejects_invalid_input() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    server
        .post("/")
        .text("")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .post("/")
        .text("not a url")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let too_long = format!("https://example.com/{}", "a".repeat(2048));
    server
        .post("/")
        .text(too_long)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shorten_json_rejects_embedded_newline() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    server
        .post("/api/shorten")
        .json(&json!({ "url": "http://example.com/a\nb" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .post("/api/shorten")
        .json(&json!({ "url": " http://example.com " }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // Nothing was stored under the id the stripped URL would hash to.
    let id = link_shortener::utils::short_id::compute_id("http://example.com/ab");
    server
        .get(&format!("/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_shorten_json_success() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "http://maps.yandex.ru" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    response.assert_json(&json!({ "result": common::short_url("lbohctw") }));
}

#[tokio::test]
async fn test_shorten_json_validation_error() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_json_too_long() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let url = format!("https://example.com/{}", "a".repeat(2029));
    assert_eq!(url.chars().count(), 2049);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": url }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shorten_deleted_link_conflicts() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let created = server
        .post("/api/shorten")
        .json(&json!({ "url": "http://yandex.ru" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let cookie = common::identity_cookie(&created);

    server
        .delete("/api/user/urls")
        .add_header(COOKIE, cookie.clone())
        .json(&json!(["obrnfe4"]))
        .await
        .assert_status(StatusCode::ACCEPTED);

    let json_conflict = server
        .post("/api/shorten")
        .add_header(COOKIE, cookie.clone())
        .json(&json!({ "url": "http://yandex.ru" }))
        .await;
    json_conflict.assert_status(StatusCode::CONFLICT);
    json_conflict.assert_json(&json!({ "result": common::short_url("obrnfe4") }));

    let text_conflict = server
        .post("/")
        .add_header(COOKIE, cookie)
        .text("http://yandex.ru")
        .await;
    text_conflict.assert_status(StatusCode::CONFLICT);
    assert_eq!(text_conflict.text(), common::short_url("obrnfe4"));
}

#[tokio::test]
async fn test_shorten_batch_success() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/api/shorten/batch")
        .json(&json!([
            { "correlation_id": "1", "original_url": "http://yandex.ru" },
            { "correlation_id": "2", "original_url": "http://direct.yandex.ru" },
            { "correlation_id": "3", "original_url": "http://yandex.ru" }
        ]))
        .await;

    response.assert_status(StatusCode::CREATED);
    response.assert_json(&json!([
        { "correlation_id": "1", "short_url": common::short_url("obrnfe4") },
        { "correlation_id": "2", "short_url": common::short_url("jvbrdoy") },
        { "correlation_id": "3", "short_url": common::short_url("obrnfe4") }
    ]));
}

#[tokio::test]
async fn test_shorten_batch_rejects_empty_and_invalid() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    server
        .post("/api/shorten/batch")
        .json(&json!([]))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .post("/api/shorten/batch")
        .json(&json!([{ "correlation_id": "1", "original_url": "" }]))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_valid_identity_is_kept() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/")
        .add_header(COOKIE, common::cookie_for("person-1"))
        .text("http://yandex.ru")
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.headers().get_all(SET_COOKIE).iter().count(), 0);
}

#[tokio::test]
async fn test_forged_identity_is_replaced() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/")
        .add_header(
            COOKIE,
            axum::http::HeaderValue::from_static("person=person-1; token=0000000000000000"),
        )
        .text("http://yandex.ru")
        .await;

    response.assert_status(StatusCode::CREATED);
    let cookie = common::identity_cookie(&response);
    assert!(!cookie.to_str().unwrap().contains("person=person-1;"));
}
