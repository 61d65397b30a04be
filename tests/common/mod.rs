#![allow(dead_code)]

use axum::http::{HeaderValue, header::SET_COOKIE};
use axum_test::{TestResponse, TestServer};
use link_shortener::application::services::{IdentityService, LinkService};
use link_shortener::domain::delete_event::DeleteEvent;
use link_shortener::domain::repositories::LinkBackend;
use link_shortener::infrastructure::persistence::MemoryBackend;
use link_shortener::routes::app_router;
use link_shortener::state::AppState;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const BASE_URL: &str = "http://localhost:8080";
pub const COOKIE_SECRET: &str = "test-cookie-secret";

pub fn create_test_state() -> (AppState, mpsc::Receiver<DeleteEvent>) {
    create_test_state_with(Arc::new(MemoryBackend::new()))
}

pub fn create_test_state_with(
    backend: Arc<dyn LinkBackend>,
) -> (AppState, mpsc::Receiver<DeleteEvent>) {
    let (tx, rx) = mpsc::channel(100);

    let links = Arc::new(LinkService::new(backend, tx));
    let identity = Arc::new(IdentityService::new(COOKIE_SECRET));

    (AppState::new(links, identity, BASE_URL), rx)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(app_router(state)).unwrap()
}

pub fn short_url(short_id: &str) -> String {
    format!("{BASE_URL}/{short_id}")
}

/// `Cookie` header value replaying the identity issued in `response`.
pub fn identity_cookie(response: &TestResponse) -> HeaderValue {
    let pairs: Vec<String> = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .map(str::to_string)
        .collect();

    assert_eq!(pairs.len(), 2, "expected person and token cookies");
    HeaderValue::from_str(&pairs.join("; ")).unwrap()
}

/// `Cookie` header value for a signed identity of `person`.
pub fn cookie_for(person: &str) -> HeaderValue {
    let token = IdentityService::new(COOKIE_SECRET).sign(person);
    HeaderValue::from_str(&format!("person={person}; token={token}")).unwrap()
}
