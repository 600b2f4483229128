//! Goal validation over the in-memory store

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use nutrition_tracker_backend::error::ApiError;
use nutrition_tracker_backend::repositories::InMemoryStore;
use nutrition_tracker_backend::services::{CreateGoalInput, GoalValidator};
use nutrition_tracker_shared::{
    CreateGoalRequest, ExerciseEntry, GoalDirection, GoalSummaryResponse, Profile,
};
use rstest::rstest;
use uuid::Uuid;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

/// 170 cm, 25 years old, male, 80 kg, lightly active
async fn seeded_user(store: &InMemoryStore) -> Uuid {
    let user_id = Uuid::new_v4();
    store
        .put_profile(Profile {
            user_id,
            height_cm: Some(170.0),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 6, 1),
            gender: Some("male".to_string()),
        })
        .await;
    store
        .log_weight(user_id, 80.0, Utc.with_ymd_and_hms(2025, 6, 15, 7, 0, 0).unwrap())
        .await;
    for days_ago in [1, 4] {
        store
            .log_exercise(
                user_id,
                today() - Duration::days(days_ago),
                ExerciseEntry {
                    met: 7.0,
                    duration_min: 40,
                },
            )
            .await;
    }
    user_id
}

fn input(target: f64, direction: &str, rate: f64) -> CreateGoalInput {
    CreateGoalInput::from_request(&CreateGoalRequest {
        target_weight: target,
        unit: None,
        goal_direction: direction.to_string(),
        weekly_rate: rate,
        duration_weeks: 16,
        start_date: None,
    })
    .unwrap()
}

#[tokio::test]
async fn test_accepted_goal_is_appended() {
    let store = InMemoryStore::new();
    let user_id = seeded_user(&store).await;

    let (goal, plan) =
        GoalValidator::validate_and_create(&store, user_id, &input(72.0, "lose", 0.25), today())
            .await
            .unwrap();

    assert_eq!(goal.direction, GoalDirection::Lose);
    assert_eq!(goal.start_date, today());
    assert_eq!(plan.bmr, 1743);
    assert_eq!(plan.tdee, 2397);
    assert_eq!(plan.daily_adjustment, 275);
    assert_eq!(plan.target_calories, 2122);
    assert_eq!(plan.calorie_floor, 1918);
    assert_eq!(store.goal_count(user_id).await, 1);

    let summary = GoalSummaryResponse::new(&goal, plan);
    assert_eq!(summary.goal.goal_direction, "lose");
    assert_eq!(summary.goal.target_date, today() + Duration::weeks(16));
}

#[tokio::test]
async fn test_goals_are_append_only() {
    let store = InMemoryStore::new();
    let user_id = seeded_user(&store).await;

    GoalValidator::validate_and_create(&store, user_id, &input(72.0, "lose", 0.1), today())
        .await
        .unwrap();
    let (second, _) =
        GoalValidator::validate_and_create(&store, user_id, &input(85.0, "gain", 0.25), today())
            .await
            .unwrap();

    assert_eq!(store.goal_count(user_id).await, 2);
    let active = GoalValidator::active_goal(&store, user_id).await.unwrap();
    assert_eq!(active.id, second.id);
    assert_eq!(active.direction, GoalDirection::Gain);
}

#[rstest]
#[case(80.0, "lose", 0.25, "below current weight")]
#[case(85.0, "lose", 0.25, "below current weight")]
#[case(78.0, "gain", 0.25, "above current weight")]
#[case(60.0, "lose", 1.5, "too aggressive")]
#[case(60.0, "lose", 0.75, "safe minimum of 1918")]
#[tokio::test]
async fn test_rejected_goals_are_not_stored(
    #[case] target: f64,
    #[case] direction: &str,
    #[case] rate: f64,
    #[case] expected: &str,
) {
    let store = InMemoryStore::new();
    let user_id = seeded_user(&store).await;

    let err = GoalValidator::validate_and_create(
        &store,
        user_id,
        &input(target, direction, rate),
        today(),
    )
    .await
    .unwrap_err();

    assert!(
        matches!(&err, ApiError::Validation(msg) if msg.contains(expected)),
        "unexpected error: {:?}",
        err
    );
    assert_eq!(store.goal_count(user_id).await, 0);
}

#[tokio::test]
async fn test_goal_requires_logged_weight() {
    let store = InMemoryStore::new();
    let user_id = Uuid::new_v4();
    store
        .put_profile(Profile {
            user_id,
            height_cm: Some(170.0),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 6, 1),
            gender: None,
        })
        .await;

    let err =
        GoalValidator::validate_and_create(&store, user_id, &input(72.0, "lose", 0.25), today())
            .await
            .unwrap_err();

    assert!(matches!(err, ApiError::Validation(msg) if msg.contains("Log your current weight")));
}

#[tokio::test]
async fn test_goal_requires_profile() {
    let store = InMemoryStore::new();
    let user_id = Uuid::new_v4();
    store
        .log_weight(user_id, 80.0, Utc.with_ymd_and_hms(2025, 6, 15, 7, 0, 0).unwrap())
        .await;

    let err =
        GoalValidator::validate_and_create(&store, user_id, &input(72.0, "lose", 0.25), today())
            .await
            .unwrap_err();

    assert!(matches!(err, ApiError::Validation(msg) if msg == "missing height/DOB"));
}

#[tokio::test]
async fn test_no_active_goal_is_not_found() {
    let store = InMemoryStore::new();
    let err = GoalValidator::active_goal(&store, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}
