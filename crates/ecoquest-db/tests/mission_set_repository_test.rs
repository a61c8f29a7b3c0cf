//! Integration tests for the MissionSet and Session repositories using
//! in-memory SurrealDB.

use chrono::Utc;
use ecoquest_core::error::EcoQuestError;
use ecoquest_core::models::mission_set::DailyMissionSet;
use ecoquest_core::models::session::StoredSession;
use ecoquest_core::models::user::Role;
use ecoquest_core::repository::{MissionSetRepository, SessionRepository};
use ecoquest_db::repository::{SurrealMissionSetRepository, SurrealSessionRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    ecoquest_db::run_migrations(&db).await.unwrap();
    db
}

#[tokio::test]
async fn mission_set_round_trip() {
    let repo = SurrealMissionSetRepository::new(setup().await);

    let created = repo
        .create(DailyMissionSet {
            date_key: "2026-03-07".into(),
            mission_ids: vec![3, 11, 7, 22],
        })
        .await
        .unwrap();
    assert_eq!(created.mission_ids, vec![3, 11, 7, 22]);

    let fetched = repo.get_by_date("2026-03-07").await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn missing_date_is_not_found() {
    let repo = SurrealMissionSetRepository::new(setup().await);

    let err = repo.get_by_date("1999-01-01").await.unwrap_err();
    assert!(matches!(err, EcoQuestError::NotFound { .. }));
}

#[tokio::test]
async fn reset_marker_round_trip() {
    let repo = SurrealMissionSetRepository::new(setup().await);

    assert!(repo.last_reset_date().await.unwrap().is_none());

    repo.record_reset("2026-03-07").await.unwrap();
    assert_eq!(
        repo.last_reset_date().await.unwrap().as_deref(),
        Some("2026-03-07")
    );

    // A later reset replaces the marker.
    repo.record_reset("2026-03-08").await.unwrap();
    assert_eq!(
        repo.last_reset_date().await.unwrap().as_deref(),
        Some("2026-03-08")
    );
}

#[tokio::test]
async fn session_round_trip() {
    let repo = SurrealSessionRepository::new(setup().await);

    assert!(repo.get().await.unwrap().is_none());

    let session = StoredSession {
        username: "alice".into(),
        role: Role::User,
        logged_in_at: Utc::now(),
    };
    repo.set(session.clone()).await.unwrap();

    let stored = repo.get().await.unwrap().unwrap();
    assert_eq!(stored.username, "alice");
    assert_eq!(stored.role, Role::User);

    // Replacing the session keeps a single record.
    repo.set(StoredSession {
        username: "admin".into(),
        role: Role::Admin,
        logged_in_at: Utc::now(),
    })
    .await
    .unwrap();
    let stored = repo.get().await.unwrap().unwrap();
    assert_eq!(stored.username, "admin");
    assert_eq!(stored.role, Role::Admin);

    repo.clear().await.unwrap();
    assert!(repo.get().await.unwrap().is_none());
}
