//! Integration tests for the daily mission board and the leaderboard.

use chrono::{NaiveDate, NaiveDateTime};
use ecoquest_core::models::submission::{GeoPoint, SubmissionDraft, SubmissionStatus};
use ecoquest_core::models::user::{CreateUserAccount, Role};
use ecoquest_core::repository::{MissionSetRepository, SubmissionRepository, UserRepository};
use ecoquest_db::repository::{
    SurrealMissionSetRepository, SurrealSubmissionRepository, SurrealUserRepository,
};
use ecoquest_engine::leaderboard::{Leaderboard, StandingsFilter};
use ecoquest_engine::missions::DailyMissionBoard;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

type LocalDb = surrealdb::engine::local::Db;

async fn setup() -> Surreal<LocalDb> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    ecoquest_db::run_migrations(&db).await.unwrap();
    db
}

fn at(y: i32, m: u32, d: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

// -----------------------------------------------------------------------
// Daily mission board
// -----------------------------------------------------------------------

#[tokio::test]
async fn draws_four_distinct_missions() {
    let board = DailyMissionBoard::new(SurrealMissionSetRepository::new(setup().await));

    let missions = board.active_missions(at(2026, 3, 7, 10)).await.unwrap();

    assert_eq!(missions.len(), 4);
    let mut ids: Vec<u32> = missions.iter().map(|m| m.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 4, "drawn mission ids must be distinct");
}

#[tokio::test]
async fn same_day_calls_return_the_same_set() {
    let board = DailyMissionBoard::new(SurrealMissionSetRepository::new(setup().await));

    let morning = board.active_missions(at(2026, 3, 7, 10)).await.unwrap();
    let evening = board.active_missions(at(2026, 3, 7, 22)).await.unwrap();

    assert_eq!(morning, evening);
}

#[tokio::test]
async fn previous_set_is_served_before_the_reset_hour() {
    let repo = SurrealMissionSetRepository::new(setup().await);
    let board = DailyMissionBoard::new(repo.clone());

    let saturday = board.active_missions(at(2026, 3, 7, 10)).await.unwrap();

    // 01:00 the next day: still Saturday's missions.
    let late_night = board.active_missions(at(2026, 3, 8, 1)).await.unwrap();
    assert_eq!(saturday, late_night);

    // No set was created for Sunday yet.
    assert!(repo.get_by_date("2026-03-08").await.is_err());
    assert_eq!(
        repo.last_reset_date().await.unwrap().as_deref(),
        Some("2026-03-07")
    );
}

#[tokio::test]
async fn reset_fires_at_the_boundary() {
    let repo = SurrealMissionSetRepository::new(setup().await);
    let board = DailyMissionBoard::new(repo.clone());

    board.active_missions(at(2026, 3, 7, 10)).await.unwrap();

    // 03:00 the next day draws a fresh set and moves the marker.
    let sunday = board.active_missions(at(2026, 3, 8, 3)).await.unwrap();
    assert_eq!(sunday.len(), 4);
    assert_eq!(
        repo.last_reset_date().await.unwrap().as_deref(),
        Some("2026-03-08")
    );

    // The new set is now pinned for the rest of the day.
    let noon = board.active_missions(at(2026, 3, 8, 12)).await.unwrap();
    assert_eq!(sunday, noon);
}

#[tokio::test]
async fn fresh_store_before_three_bootstraps_a_set() {
    let repo = SurrealMissionSetRepository::new(setup().await);
    let board = DailyMissionBoard::new(repo.clone());

    let missions = board.active_missions(at(2026, 3, 7, 1)).await.unwrap();
    assert_eq!(missions.len(), 4);

    // The bootstrap is a real draw for the day.
    assert!(repo.get_by_date("2026-03-07").await.is_ok());
    let again = board.active_missions(at(2026, 3, 7, 1)).await.unwrap();
    assert_eq!(missions, again);
}

// -----------------------------------------------------------------------
// Leaderboard
// -----------------------------------------------------------------------

async fn seed_user(users: &SurrealUserRepository<LocalDb>, username: &str, points: u32) {
    users
        .create(CreateUserAccount {
            name: username.to_string(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "correct-horse-battery".into(),
            role: Role::User,
        })
        .await
        .unwrap();
    if points > 0 {
        users.add_pending_approval(username, 1).await.unwrap();
        users.credit(username, points, 1).await.unwrap();
    }
}

#[tokio::test]
async fn standings_rank_by_points() {
    let db = setup().await;
    let users = SurrealUserRepository::new(db.clone());
    seed_user(&users, "alice", 60).await;
    seed_user(&users, "bob", 100).await;
    seed_user(&users, "carol", 20).await;

    let leaderboard = Leaderboard::new(users, SurrealSubmissionRepository::new(db));
    let standings = leaderboard.standings(StandingsFilter::All).await.unwrap();

    let order: Vec<(&str, usize)> = standings
        .iter()
        .map(|r| (r.account.username.as_str(), r.rank))
        .collect();
    assert_eq!(order, vec![("bob", 1), ("alice", 2), ("carol", 3)]);

    let top = leaderboard
        .standings(StandingsFilter::Top(2))
        .await
        .unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].account.username, "bob");
}

#[tokio::test]
async fn monthly_filter_keeps_global_ranks() {
    let db = setup().await;
    let users = SurrealUserRepository::new(db.clone());
    seed_user(&users, "alice", 40).await;
    // bob outranks alice on points but has no recent completion.
    seed_user(&users, "bob", 100).await;
    users.clear_last_completed("bob").await.unwrap();

    let leaderboard = Leaderboard::new(users, SurrealSubmissionRepository::new(db));
    let monthly = leaderboard
        .standings(StandingsFilter::monthly(chrono::Utc::now()))
        .await
        .unwrap();

    // Only alice is active this month, but she keeps her global rank.
    assert_eq!(monthly.len(), 1);
    assert_eq!(monthly[0].account.username, "alice");
    assert_eq!(monthly[0].rank, 2);
}

#[tokio::test]
async fn recent_activity_lists_newest_approved_first() {
    let db = setup().await;
    let users = SurrealUserRepository::new(db.clone());
    seed_user(&users, "alice", 0).await;

    let submissions = SurrealSubmissionRepository::new(db.clone());
    let mut approved_ids = Vec::new();
    for mission_id in [1, 2, 3] {
        let submission = submissions
            .create(SubmissionDraft {
                username: "alice".into(),
                mission_id,
                location: Some(GeoPoint { lat: 1.0, lng: 2.0 }),
                proof_link: "http://x".into(),
                description: "done".into(),
                agreed_to_terms: true,
            })
            .await
            .unwrap();
        submissions
            .mark_reviewed(&submission.id.to_string(), SubmissionStatus::Approved)
            .await
            .unwrap();
        approved_ids.push(submission.id);
    }

    let leaderboard = Leaderboard::new(users, submissions);
    let recent = leaderboard.recent_activity(2).await.unwrap();

    assert_eq!(recent.len(), 2);
    // Newest first: the last approved submission leads the feed.
    assert_eq!(recent[0].id, approved_ids[2]);
    assert_eq!(recent[1].id, approved_ids[1]);
}
