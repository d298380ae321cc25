use mh_core::{Meeting, MeetingKind, Permission, Role};
use mh_db::RoleRepository;

use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;

/// Inserts a stub user row for foreign key constraints
pub async fn create_test_user(pool: &SqlitePool, user_id: &str) {
    // Use sqlx::query (not query!) to avoid offline mode issues in tests
    sqlx::query("INSERT INTO users (id, name, profile_url) VALUES (?, ?, NULL)")
        .bind(user_id)
        .bind(format!("Test User {}", user_id))
        .execute(pool)
        .await
        .expect("Failed to create test user");
}

pub fn sample_role(name: &str) -> Role {
    Role::new(
        name.to_string(),
        "#336699".to_string(),
        vec![Permission::ViewMeetings, Permission::ManageMeetings],
    )
}

pub async fn create_test_role(pool: &SqlitePool, name: &str) -> Role {
    let role = sample_role(name);
    RoleRepository::new(pool.clone())
        .create(&role)
        .await
        .expect("Failed to create test role");
    role
}

/// A meeting starting `offset_minutes` from now (negative = in the past),
/// with times truncated to milliseconds so they round-trip the store.
pub fn sample_meeting(creator: &str, name: &str, offset_minutes: i64) -> Meeting {
    let start = Utc::now() + Duration::minutes(offset_minutes);
    let start = DateTime::from_timestamp_millis(start.timestamp_millis()).unwrap();

    Meeting::new(
        MeetingKind::Meeting,
        creator.to_string(),
        name.to_string(),
        start,
        start + Duration::hours(1),
        "Room 42".to_string(),
        None,
    )
}
