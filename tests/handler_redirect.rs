mod common;

use axum::http::{StatusCode, header::LOCATION};

#[tokio::test]
async fn test_redirect_success() {
    let (state, _rx) = common::create_test_state();
    let short_id = state
        .links
        .shorten_or_reuse("person-1", "http://praktikum.yandex.ru")
        .await
        .unwrap();
    let server = common::test_server(state);

    let response = server.get(&format!("/{short_id}")).await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(LOCATION).unwrap(),
        "http://praktikum.yandex.ru"
    );
}

#[tokio::test]
async fn test_redirect_ignores_owner() {
    let (state, _rx) = common::create_test_state();
    state
        .links
        .shorten_or_reuse("person-1", "http://yandex.ru")
        .await
        .unwrap();
    let server = common::test_server(state);

    let response = server
        .get("/obrnfe4")
        .add_header(
            axum::http::header::COOKIE,
            common::cookie_for("person-2"),
        )
        .await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.get("/nonexistent").await;

    response.assert_status_not_found();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_redirect_deleted_link_is_gone() {
    let (state, _rx) = common::create_test_state();
    let short_id = state
        .links
        .shorten_or_reuse("person-1", "http://yandex.ru")
        .await
        .unwrap();
    state.links.soft_delete("person-1", &short_id).unwrap();
    let server = common::test_server(state);

    let response = server.get(&format!("/{short_id}")).await;

    response.assert_status(StatusCode::GONE);
}
