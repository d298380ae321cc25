//! Meeting REST API handlers
//!
//! List, CRUD, and the attendance/feedback operations over the embedded
//! attendance list.

use crate::{
    ApiError, ApiResult, AttendanceListResponse, AttendanceResponse, CreateMeetingRequest,
    CurrentUser, FeedbackListResponse, FeedbackRequest, FeedbackResponse, ListMeetingsQuery,
    MeetingDto, MeetingListResponse, MeetingResponse, UpdateAttendanceEntryRequest,
    UpdateAttendanceRequest, UpdateMeetingRequest,
};

use mh_core::{AttendanceEntry, Meeting, MeetingKind, Permission, UserSummary, validate_attendance};
use mh_db::{MeetingRepository, PageRequest, PopulatedMeeting};

use std::panic::Location;
use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use uuid::Uuid;

use crate::AppState;

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/meetings
///
/// List meetings through the predicate/page composer. Meetings whose time
/// has passed are excluded unless the caller sends passed=true.
pub async fn list_meetings(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<ListMeetingsQuery>,
) -> ApiResult<Json<MeetingListResponse>> {
    current.require(Permission::ViewMeetings)?;

    let predicates = query.to_predicates(Utc::now().timestamp_millis());
    let page = PageRequest::resolve(
        query.page.as_deref(),
        query.limit.as_deref(),
        state.pagination.default_limit,
        state.pagination.max_limit,
    );

    let result = MeetingRepository::new(state.pool.clone())
        .list(&predicates, &page)
        .await?;

    Ok(Json(MeetingListResponse {
        meetings: result.items.into_iter().map(MeetingDto::from).collect(),
        page: result.page,
        limit: result.limit,
        total: result.total,
    }))
}

/// POST /api/meetings
///
/// Create a meeting. The creator is the authenticated caller, never a
/// client-supplied field.
pub async fn create_meeting(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(req): Json<CreateMeetingRequest>,
) -> ApiResult<(StatusCode, Json<MeetingResponse>)> {
    current.require(Permission::ManageMeetings)?;

    let kind = MeetingKind::from_str(&req.kind)?;
    let mut meeting = Meeting::new(
        kind,
        current.user.id.clone(),
        req.name,
        instant_from_millis(req.start_time, "start_time")?,
        instant_from_millis(req.end_time, "end_time")?,
        req.location,
        req.description,
    );
    meeting.attendance = req.attendance.into_iter().map(Into::into).collect();
    meeting.validate()?;

    MeetingRepository::new(state.pool.clone())
        .create(&meeting)
        .await?;

    let populated = PopulatedMeeting {
        meeting,
        creator: UserSummary::from(current.user),
    };

    Ok((
        StatusCode::CREATED,
        Json(MeetingResponse {
            meeting: populated.into(),
        }),
    ))
}

/// GET /api/meetings/:meeting_id
pub async fn get_meeting(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(meeting_id): Path<String>,
) -> ApiResult<Json<MeetingResponse>> {
    current.require(Permission::ViewMeetings)?;

    let populated = find_meeting(&state, &meeting_id).await?;

    Ok(Json(MeetingResponse {
        meeting: populated.into(),
    }))
}

/// PATCH /api/meetings/:meeting_id
///
/// Partial update; fields left out of the body keep their stored values.
pub async fn update_meeting(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(meeting_id): Path<String>,
    Json(req): Json<UpdateMeetingRequest>,
) -> ApiResult<Json<MeetingResponse>> {
    current.require(Permission::ManageMeetings)?;

    let existing = find_meeting(&state, &meeting_id).await?;
    let mut meeting = existing.meeting;

    if let Some(ref kind) = req.kind {
        meeting.kind = MeetingKind::from_str(kind)?;
    }
    if let Some(name) = req.name {
        meeting.name = name;
    }
    if let Some(start_time) = req.start_time {
        meeting.start_time = instant_from_millis(start_time, "start_time")?;
    }
    if let Some(end_time) = req.end_time {
        meeting.end_time = instant_from_millis(end_time, "end_time")?;
    }
    if let Some(location) = req.location {
        meeting.location = location;
    }
    if let Some(description) = req.description {
        meeting.description = Some(description);
    }
    if let Some(attendance) = req.attendance {
        meeting.attendance = attendance.into_iter().map(Into::into).collect();
    }
    meeting.validate()?;

    if !MeetingRepository::new(state.pool.clone())
        .update(&meeting)
        .await?
    {
        return Err(not_found(&meeting_id));
    }

    Ok(Json(MeetingResponse {
        meeting: PopulatedMeeting {
            meeting,
            creator: existing.creator,
        }
        .into(),
    }))
}

/// DELETE /api/meetings/:meeting_id
pub async fn delete_meeting(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(meeting_id): Path<String>,
) -> ApiResult<StatusCode> {
    current.require(Permission::ManageMeetings)?;

    let id = Uuid::parse_str(&meeting_id)?;
    if !MeetingRepository::new(state.pool.clone()).delete(id).await? {
        return Err(not_found(&meeting_id));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/meetings/:meeting_id/end
///
/// Stamp the meeting as over now.
pub async fn end_meeting(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(meeting_id): Path<String>,
) -> ApiResult<Json<MeetingResponse>> {
    current.require(Permission::ManageMeetings)?;

    let existing = find_meeting(&state, &meeting_id).await?;
    let mut meeting = existing.meeting;

    let now = Utc::now().timestamp_millis();
    meeting.end_time = instant_from_millis(now, "end_time")?;
    if meeting.start_time > meeting.end_time {
        meeting.start_time = meeting.end_time;
    }

    if !MeetingRepository::new(state.pool.clone())
        .update(&meeting)
        .await?
    {
        return Err(not_found(&meeting_id));
    }

    Ok(Json(MeetingResponse {
        meeting: PopulatedMeeting {
            meeting,
            creator: existing.creator,
        }
        .into(),
    }))
}

/// GET /api/meetings/:meeting_id/attendances
///
/// The list may legitimately be empty; only a missing meeting is an error.
pub async fn get_attendance(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(meeting_id): Path<String>,
) -> ApiResult<Json<AttendanceListResponse>> {
    current.require(Permission::ViewMeetings)?;

    let populated = find_meeting(&state, &meeting_id).await?;

    Ok(Json(AttendanceListResponse {
        attendance: populated
            .meeting
            .attendance
            .into_iter()
            .map(Into::into)
            .collect(),
    }))
}

/// PATCH /api/meetings/:meeting_id/attendances
///
/// Replace the whole attendance list.
pub async fn replace_attendance(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(meeting_id): Path<String>,
    Json(req): Json<UpdateAttendanceRequest>,
) -> ApiResult<Json<AttendanceListResponse>> {
    current.require(Permission::ManageMeetings)?;

    let id = Uuid::parse_str(&meeting_id)?;
    let entries: Vec<AttendanceEntry> = req.attendance.into_iter().map(Into::into).collect();
    validate_attendance(&entries)?;

    if !MeetingRepository::new(state.pool.clone())
        .replace_attendance(id, &entries)
        .await?
    {
        return Err(not_found(&meeting_id));
    }

    Ok(Json(AttendanceListResponse {
        attendance: entries.into_iter().map(Into::into).collect(),
    }))
}

/// DELETE /api/meetings/:meeting_id/attendances
///
/// Clear the attendance list without touching the meeting.
pub async fn clear_attendance(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(meeting_id): Path<String>,
) -> ApiResult<StatusCode> {
    current.require(Permission::ManageMeetings)?;

    let id = Uuid::parse_str(&meeting_id)?;
    if !MeetingRepository::new(state.pool.clone())
        .clear_attendance(id)
        .await?
    {
        return Err(not_found(&meeting_id));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/meetings/:meeting_id/attendances/users/:user_id
pub async fn get_attendance_for_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path((meeting_id, user_id)): Path<(String, String)>,
) -> ApiResult<Json<AttendanceResponse>> {
    current.require(Permission::ViewMeetings)?;

    let populated = find_meeting(&state, &meeting_id).await?;
    let entry = populated.meeting.attendance_for(&user_id).cloned();

    Ok(Json(AttendanceResponse {
        attendance: entry.map(Into::into),
    }))
}

/// PATCH /api/meetings/:meeting_id/attendances/users/:user_id
///
/// Upsert one user's attendance entry.
pub async fn update_attendance_for_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path((meeting_id, user_id)): Path<(String, String)>,
    Json(req): Json<UpdateAttendanceEntryRequest>,
) -> ApiResult<Json<AttendanceResponse>> {
    current.require(Permission::ManageMeetings)?;

    let populated = find_meeting(&state, &meeting_id).await?;
    let mut entry = populated
        .meeting
        .attendance_for(&user_id)
        .cloned()
        .unwrap_or_else(|| AttendanceEntry::new(user_id.clone()));

    if let Some(did_attend) = req.did_attend {
        entry.did_attend = did_attend;
    }
    if let Some(notes) = req.notes {
        entry.notes = notes;
    }
    entry.validate()?;

    MeetingRepository::new(state.pool.clone())
        .upsert_attendance(populated.meeting.id, &entry)
        .await?;

    Ok(Json(AttendanceResponse {
        attendance: Some(entry.into()),
    }))
}

/// GET /api/meetings/:meeting_id/feedback
///
/// Every attendance entry that carries feedback.
pub async fn get_feedback(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(meeting_id): Path<String>,
) -> ApiResult<Json<FeedbackListResponse>> {
    current.require(Permission::ViewMeetings)?;

    let populated = find_meeting(&state, &meeting_id).await?;

    Ok(Json(FeedbackListResponse {
        feedback: populated
            .meeting
            .attendance
            .into_iter()
            .filter(has_feedback)
            .map(Into::into)
            .collect(),
    }))
}

/// POST|PATCH /api/meetings/:meeting_id/feedback/users/:user_id
///
/// Set one user's rating/description, creating the entry when needed.
pub async fn set_feedback_for_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path((meeting_id, user_id)): Path<(String, String)>,
    Json(req): Json<FeedbackRequest>,
) -> ApiResult<Json<FeedbackResponse>> {
    current.require(Permission::ManageMeetings)?;

    let populated = find_meeting(&state, &meeting_id).await?;
    let mut entry = populated
        .meeting
        .attendance_for(&user_id)
        .cloned()
        .unwrap_or_else(|| AttendanceEntry::new(user_id.clone()));

    entry.feedback_rating = req.feedback_rating;
    entry.feedback_description = req.feedback_description;
    entry.validate()?;

    MeetingRepository::new(state.pool.clone())
        .upsert_attendance(populated.meeting.id, &entry)
        .await?;

    Ok(Json(FeedbackResponse {
        feedback: Some(entry.into()),
    }))
}

/// GET /api/meetings/:meeting_id/feedback/users/:user_id
///
/// The user's feedback with identity/attendance fields stripped; null when
/// the user left none.
pub async fn get_feedback_for_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path((meeting_id, user_id)): Path<(String, String)>,
) -> ApiResult<Json<FeedbackResponse>> {
    current.require(Permission::ViewMeetings)?;

    let populated = find_meeting(&state, &meeting_id).await?;
    let entry = populated.meeting.attendance_for(&user_id).cloned();

    Ok(Json(FeedbackResponse {
        feedback: entry.map(Into::into),
    }))
}

// =============================================================================
// Helpers
// =============================================================================

async fn find_meeting(state: &AppState, meeting_id: &str) -> ApiResult<PopulatedMeeting> {
    let id = Uuid::parse_str(meeting_id)?;

    MeetingRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(meeting_id))
}

#[track_caller]
fn not_found(meeting_id: &str) -> ApiError {
    ApiError::NotFound {
        message: format!("There is no meeting with the id {}", meeting_id),
        location: ErrorLocation::from(Location::caller()),
    }
}

fn has_feedback(entry: &AttendanceEntry) -> bool {
    entry.feedback_rating.is_some() || entry.feedback_description.is_some()
}

#[track_caller]
fn instant_from_millis(millis: i64, field: &str) -> ApiResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| ApiError::Validation {
        message: format!("{} is not a valid millisecond timestamp", field),
        field: Some(field.to_string()),
        location: ErrorLocation::from(Location::caller()),
    })
}
