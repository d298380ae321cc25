//! Meeting repository.
//!
//! Meetings own their attendance list exclusively: entries live in a child
//! table keyed by (meeting_id, user_id) and are rewritten with the meeting.

use crate::{DbError, MeetingPredicate, Page, PageRequest, Result as DbErrorResult};

use mh_core::{AttendanceEntry, Meeting, MeetingKind, UserSummary};

use std::panic::Location;
use std::str::FromStr;

use chrono::DateTime;
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

const SELECT_POPULATED: &str = r#"
    SELECT m.id, m.kind, m.creator, m.name, m.start_time, m.end_time,
        m.location, m.description,
        u.name AS creator_name, u.profile_url AS creator_profile_url
    FROM meetings m
    JOIN users u ON u.id = m.creator
    WHERE 1=1
"#;

/// A meeting with its creator reference resolved for response shaping.
#[derive(Debug, Clone)]
pub struct PopulatedMeeting {
    pub meeting: Meeting,
    pub creator: UserSummary,
}

pub struct MeetingRepository {
    pool: SqlitePool,
}

impl MeetingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, meeting: &Meeting) -> DbErrorResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
                INSERT INTO meetings (
                    id, kind, creator, name, start_time, end_time, location, description
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(meeting.id.to_string())
        .bind(meeting.kind.as_str())
        .bind(&meeting.creator)
        .bind(&meeting.name)
        .bind(meeting.start_time.timestamp_millis())
        .bind(meeting.end_time.timestamp_millis())
        .bind(&meeting.location)
        .bind(&meeting.description)
        .execute(&mut *tx)
        .await?;

        insert_attendance(&mut tx, meeting.id, &meeting.attendance).await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<PopulatedMeeting>> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_POPULATED);
        builder.push(" AND m.id = ");
        builder.push_bind(id.to_string());

        let row = builder.build().fetch_optional(&self.pool).await?;
        let Some(row) = row else {
            return Ok(None);
        };

        let mut populated = populated_from_row(&row)?;
        populated.meeting.attendance = self.attendance_for(id).await?;

        Ok(Some(populated))
    }

    /// Persist the full record. Returns false when the meeting is absent.
    pub async fn update(&self, meeting: &Meeting) -> DbErrorResult<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
                UPDATE meetings SET
                    kind = ?, name = ?, start_time = ?, end_time = ?,
                    location = ?, description = ?
                WHERE id = ?
            "#,
        )
        .bind(meeting.kind.as_str())
        .bind(&meeting.name)
        .bind(meeting.start_time.timestamp_millis())
        .bind(meeting.end_time.timestamp_millis())
        .bind(&meeting.location)
        .bind(&meeting.description)
        .bind(meeting.id.to_string())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query("DELETE FROM meeting_attendance WHERE meeting_id = ?")
            .bind(meeting.id.to_string())
            .execute(&mut *tx)
            .await?;
        insert_attendance(&mut tx, meeting.id, &meeting.attendance).await?;

        tx.commit().await?;
        Ok(true)
    }

    pub async fn delete(&self, id: Uuid) -> DbErrorResult<bool> {
        // Attendance rows go with the meeting (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM meetings WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Run the compiled predicate list over the store and slice one page,
    /// sorted ascending by start time.
    pub async fn list(
        &self,
        predicates: &[MeetingPredicate],
        page: &PageRequest,
    ) -> DbErrorResult<Page<PopulatedMeeting>> {
        let mut count_builder =
            QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM meetings m WHERE 1=1");
        for predicate in predicates {
            predicate.push_onto(&mut count_builder);
        }
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_POPULATED);
        for predicate in predicates {
            predicate.push_onto(&mut builder);
        }
        builder.push(" ORDER BY m.start_time ASC LIMIT ");
        builder.push_bind(i64::from(page.limit));
        builder.push(" OFFSET ");
        builder.push_bind(page.offset());

        let rows = builder.build().fetch_all(&self.pool).await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut populated = populated_from_row(row)?;
            populated.meeting.attendance = self.attendance_for(populated.meeting.id).await?;
            items.push(populated);
        }

        Ok(Page {
            items,
            page: page.page,
            limit: page.limit,
            total: total as u64,
        })
    }

    pub async fn exists(&self, id: Uuid) -> DbErrorResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM meetings WHERE id = ?")
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    /// Replace the attendance list wholesale. Returns false when the meeting
    /// is absent.
    pub async fn replace_attendance(
        &self,
        id: Uuid,
        entries: &[AttendanceEntry],
    ) -> DbErrorResult<bool> {
        if !self.exists(id).await? {
            return Ok(false);
        }

        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM meeting_attendance WHERE meeting_id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;
        insert_attendance(&mut tx, id, entries).await?;
        tx.commit().await?;

        Ok(true)
    }

    /// Clear the attendance list, the only way entries disappear without
    /// their meeting. Returns false when the meeting is absent.
    pub async fn clear_attendance(&self, id: Uuid) -> DbErrorResult<bool> {
        if !self.exists(id).await? {
            return Ok(false);
        }

        sqlx::query("DELETE FROM meeting_attendance WHERE meeting_id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(true)
    }

    /// Insert or update one user's entry. Returns false when the meeting is
    /// absent.
    pub async fn upsert_attendance(
        &self,
        id: Uuid,
        entry: &AttendanceEntry,
    ) -> DbErrorResult<bool> {
        if !self.exists(id).await? {
            return Ok(false);
        }

        sqlx::query(
            r#"
                INSERT INTO meeting_attendance (
                    meeting_id, user_id, did_attend, notes, feedback_rating, feedback_description
                ) VALUES (?, ?, ?, ?, ?, ?)
                ON CONFLICT (meeting_id, user_id) DO UPDATE SET
                    did_attend = excluded.did_attend,
                    notes = excluded.notes,
                    feedback_rating = excluded.feedback_rating,
                    feedback_description = excluded.feedback_description
            "#,
        )
        .bind(id.to_string())
        .bind(&entry.user)
        .bind(entry.did_attend)
        .bind(&entry.notes)
        .bind(entry.feedback_rating)
        .bind(&entry.feedback_description)
        .execute(&self.pool)
        .await?;

        Ok(true)
    }

    async fn attendance_for(&self, id: Uuid) -> DbErrorResult<Vec<AttendanceEntry>> {
        let rows = sqlx::query(
            r#"
                SELECT user_id, did_attend, notes, feedback_rating, feedback_description
                FROM meeting_attendance
                WHERE meeting_id = ?
                ORDER BY user_id
            "#,
        )
        .bind(id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(AttendanceEntry {
                    user: row.try_get("user_id")?,
                    did_attend: row.try_get("did_attend")?,
                    notes: row.try_get("notes")?,
                    feedback_rating: row.try_get("feedback_rating")?,
                    feedback_description: row.try_get("feedback_description")?,
                })
            })
            .collect()
    }
}

async fn insert_attendance(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    meeting_id: Uuid,
    entries: &[AttendanceEntry],
) -> DbErrorResult<()> {
    for entry in entries {
        sqlx::query(
            r#"
                INSERT INTO meeting_attendance (
                    meeting_id, user_id, did_attend, notes, feedback_rating, feedback_description
                ) VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(meeting_id.to_string())
        .bind(&entry.user)
        .bind(entry.did_attend)
        .bind(&entry.notes)
        .bind(entry.feedback_rating)
        .bind(&entry.feedback_description)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

fn populated_from_row(row: &SqliteRow) -> DbErrorResult<PopulatedMeeting> {
    let id: String = row.try_get("id")?;
    let kind: String = row.try_get("kind")?;
    let start_time: i64 = row.try_get("start_time")?;
    let end_time: i64 = row.try_get("end_time")?;
    let creator_id: String = row.try_get("creator")?;

    let meeting = Meeting {
        id: Uuid::parse_str(&id).map_err(|e| DbError::Initialization {
            message: format!("Invalid UUID in meeting.id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        kind: MeetingKind::from_str(&kind).map_err(|e| DbError::Initialization {
            message: format!("Invalid kind in meeting.kind: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        creator: creator_id.clone(),
        name: row.try_get("name")?,
        start_time: DateTime::from_timestamp_millis(start_time).ok_or_else(|| {
            DbError::Initialization {
                message: "Invalid timestamp in meeting.start_time".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?,
        end_time: DateTime::from_timestamp_millis(end_time).ok_or_else(|| {
            DbError::Initialization {
                message: "Invalid timestamp in meeting.end_time".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?,
        location: row.try_get("location")?,
        description: row.try_get("description")?,
        attendance: Vec::new(),
    };

    let creator = UserSummary {
        id: creator_id,
        name: row.try_get("creator_name")?,
        profile_url: row.try_get("creator_profile_url")?,
    };

    Ok(PopulatedMeeting { meeting, creator })
}
