//! PostgreSQL backend tests.
//!
//! Run against the server in `DATABASE_URL`; `#[sqlx::test]` creates a fresh database per test.

use std::sync::Arc;

use link_shortener::application::services::LinkService;
use link_shortener::domain::entities::Link;
use link_shortener::domain::error::StorageError;
use link_shortener::domain::repositories::LinkBackend;
use link_shortener::infrastructure::persistence::PgBackend;
use sqlx::PgPool;
use tokio::sync::mpsc;

#[sqlx::test]
async fn test_persist_and_load(pool: PgPool) {
    let backend = PgBackend::new(pool);

    backend
        .persist("person-1", "obrnfe4", "http://yandex.ru")
        .await
        .unwrap();

    let snapshot = backend.load().await.unwrap();

    assert_eq!(
        snapshot.active,
        vec![Link::new("obrnfe4", "http://yandex.ru", "person-1")]
    );
    assert!(snapshot.deleted.is_empty());
}

#[sqlx::test]
async fn test_persist_duplicate_short_id(pool: PgPool) {
    let backend = PgBackend::new(pool);

    backend
        .persist("person-1", "obrnfe4", "http://yandex.ru")
        .await
        .unwrap();
    let result = backend
        .persist("person-2", "obrnfe4", "http://yandex.ru")
        .await;

    assert_eq!(result, Err(StorageError::duplicate("obrnfe4")));
}

#[sqlx::test]
async fn test_mark_deleted(pool: PgPool) {
    let backend = PgBackend::new(pool.clone());

    backend
        .persist("person-1", "obrnfe4", "http://yandex.ru")
        .await
        .unwrap();
    backend.mark_deleted("person-1", "obrnfe4").await.unwrap();

    let snapshot = backend.load().await.unwrap();
    assert!(snapshot.active.is_empty());
    assert_eq!(
        snapshot.deleted,
        vec![Link::new("obrnfe4", "http://yandex.ru", "person-1")]
    );

    let deleted: bool = sqlx::query_scalar("SELECT deleted FROM links WHERE short = $1")
        .bind("obrnfe4")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(deleted);
}

#[sqlx::test]
async fn test_mark_deleted_requires_owner(pool: PgPool) {
    let backend = PgBackend::new(pool);

    backend
        .persist("owner", "obrnfe4", "http://yandex.ru")
        .await
        .unwrap();
    backend.mark_deleted("intruder", "obrnfe4").await.unwrap();

    let snapshot = backend.load().await.unwrap();
    assert_eq!(snapshot.active.len(), 1);
    assert!(snapshot.deleted.is_empty());
}

#[sqlx::test]
async fn test_is_healthy(pool: PgPool) {
    let backend = PgBackend::new(pool);

    assert!(backend.is_healthy().await);
    assert_eq!(backend.name(), "postgres");
}

#[sqlx::test]
async fn test_concurrent_instances_single_row(pool: PgPool) {
    let backend = Arc::new(PgBackend::new(pool.clone()));
    let (tx, _rx) = mpsc::channel(16);
    let first = Arc::new(LinkService::new(backend.clone(), tx.clone()));
    let second = Arc::new(LinkService::new(backend, tx));

    let (a, b) = tokio::join!(
        first.shorten_or_reuse("person-1", "http://yandex.ru"),
        second.shorten_or_reuse("person-2", "http://yandex.ru"),
    );

    let outcomes = [a, b];
    let created = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(created, 1);
    assert!(
        outcomes
            .iter()
            .any(|r| *r == Err(StorageError::duplicate("obrnfe4")))
    );

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[sqlx::test]
async fn test_restart_restores_index(pool: PgPool) {
    let backend = Arc::new(PgBackend::new(pool.clone()));
    let (tx, _rx) = mpsc::channel(16);
    let service = LinkService::new(backend.clone(), tx);

    service
        .shorten_or_reuse("person-1", "http://yandex.ru")
        .await
        .unwrap();
    service
        .shorten_or_reuse("person-1", "http://maps.yandex.ru")
        .await
        .unwrap();
    backend.mark_deleted("person-1", "lbohctw").await.unwrap();

    let (tx, _rx) = mpsc::channel(16);
    let restored = LinkService::open(Arc::new(PgBackend::new(pool)), tx)
        .await
        .unwrap();

    assert_eq!(
        restored.resolve(None, "obrnfe4").unwrap(),
        "http://yandex.ru"
    );
    assert_eq!(
        restored.resolve(None, "lbohctw"),
        Err(StorageError::Gone("lbohctw".to_string()))
    );
}
