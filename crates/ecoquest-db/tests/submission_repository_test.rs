//! Integration tests for the Submission repository using in-memory
//! SurrealDB.

use ecoquest_core::error::EcoQuestError;
use ecoquest_core::models::submission::{GeoPoint, SubmissionDraft, SubmissionStatus};
use ecoquest_core::repository::SubmissionRepository;
use ecoquest_db::repository::SurrealSubmissionRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

async fn setup() -> SurrealSubmissionRepository<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    ecoquest_db::run_migrations(&db).await.unwrap();
    SurrealSubmissionRepository::new(db)
}

fn draft(username: &str, mission_id: u32) -> SubmissionDraft {
    SubmissionDraft {
        username: username.into(),
        mission_id,
        location: Some(GeoPoint { lat: 1.0, lng: 2.0 }),
        proof_link: "http://example.com/post".into(),
        description: "rode my bike".into(),
        agreed_to_terms: true,
    }
}

#[tokio::test]
async fn create_and_get_submission() {
    let repo = setup().await;

    let submission = repo.create(draft("alice", 5)).await.unwrap();

    assert_eq!(submission.username, "alice");
    assert_eq!(submission.mission_id, 5);
    assert_eq!(submission.status, SubmissionStatus::Pending);
    assert_eq!(submission.location, Some(GeoPoint { lat: 1.0, lng: 2.0 }));

    let fetched = repo.get_by_id(&submission.id.to_string()).await.unwrap();
    assert_eq!(fetched.id, submission.id);
    assert_eq!(fetched.proof_link, "http://example.com/post");
}

#[tokio::test]
async fn submission_without_location_round_trips() {
    let repo = setup().await;

    let mut no_location = draft("alice", 5);
    no_location.location = None;
    let submission = repo.create(no_location).await.unwrap();

    let fetched = repo.get_by_id(&submission.id.to_string()).await.unwrap();
    assert!(fetched.location.is_none());
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let repo = setup().await;

    let err = repo
        .get_by_id("00000000-0000-0000-0000-000000000000")
        .await
        .unwrap_err();
    assert!(matches!(err, EcoQuestError::NotFound { .. }));

    // A non-UUID id is equally unknown.
    let err = repo.get_by_id("not-a-uuid").await.unwrap_err();
    assert!(matches!(err, EcoQuestError::NotFound { .. }));
}

#[tokio::test]
async fn review_transitions_once() {
    let repo = setup().await;
    let submission = repo.create(draft("alice", 5)).await.unwrap();
    let id = submission.id.to_string();

    let approved = repo
        .mark_reviewed(&id, SubmissionStatus::Approved)
        .await
        .unwrap();
    assert_eq!(approved.status, SubmissionStatus::Approved);

    // Terminal states cannot transition again.
    let err = repo
        .mark_reviewed(&id, SubmissionStatus::Rejected)
        .await
        .unwrap_err();
    assert!(matches!(err, EcoQuestError::InvalidState { .. }));

    let err = repo
        .mark_reviewed(&id, SubmissionStatus::Approved)
        .await
        .unwrap_err();
    assert!(matches!(err, EcoQuestError::InvalidState { .. }));
}

#[tokio::test]
async fn pending_is_not_a_review_outcome() {
    let repo = setup().await;
    let submission = repo.create(draft("alice", 5)).await.unwrap();

    let err = repo
        .mark_reviewed(&submission.id.to_string(), SubmissionStatus::Pending)
        .await
        .unwrap_err();
    assert!(matches!(err, EcoQuestError::InvalidState { .. }));
}

#[tokio::test]
async fn has_approved_tracks_outcomes() {
    let repo = setup().await;

    assert!(!repo.has_approved("alice", 5).await.unwrap());

    let submission = repo.create(draft("alice", 5)).await.unwrap();
    assert!(!repo.has_approved("alice", 5).await.unwrap());

    repo.mark_reviewed(&submission.id.to_string(), SubmissionStatus::Approved)
        .await
        .unwrap();
    assert!(repo.has_approved("alice", 5).await.unwrap());

    // Other pairs are unaffected.
    assert!(!repo.has_approved("alice", 6).await.unwrap());
    assert!(!repo.has_approved("bob", 5).await.unwrap());
}

#[tokio::test]
async fn list_by_status_filters() {
    let repo = setup().await;

    let first = repo.create(draft("alice", 1)).await.unwrap();
    let second = repo.create(draft("alice", 2)).await.unwrap();
    let third = repo.create(draft("bob", 3)).await.unwrap();

    repo.mark_reviewed(&first.id.to_string(), SubmissionStatus::Approved)
        .await
        .unwrap();
    repo.mark_reviewed(&second.id.to_string(), SubmissionStatus::Rejected)
        .await
        .unwrap();

    let pending = repo.list_by_status(SubmissionStatus::Pending).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, third.id);

    let approved = repo
        .list_by_status(SubmissionStatus::Approved)
        .await
        .unwrap();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].id, first.id);

    assert_eq!(repo.list().await.unwrap().len(), 3);
}
