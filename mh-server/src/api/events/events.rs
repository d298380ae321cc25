//! Event REST API handlers
//!
//! Read-only projection of the meeting store onto kind = event. Events share
//! the meeting listing filters and pagination.

use crate::{
    ApiError, ApiResult, AppState, CurrentUser, ListMeetingsQuery, MeetingDto,
    MeetingListResponse, MeetingResponse,
};

use mh_core::{MeetingKind, Permission};
use mh_db::{MeetingPredicate, MeetingRepository, PageRequest};

use std::panic::Location;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use error_location::ErrorLocation;
use uuid::Uuid;

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<ListMeetingsQuery>,
) -> ApiResult<Json<MeetingListResponse>> {
    current.require(Permission::ViewMeetings)?;

    let mut predicates = query.to_predicates(Utc::now().timestamp_millis());
    predicates.push(MeetingPredicate::KindEq(
        MeetingKind::Event.as_str().to_string(),
    ));
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

/// GET /api/events/:event_id
pub async fn get_event(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(event_id): Path<String>,
) -> ApiResult<Json<MeetingResponse>> {
    current.require(Permission::ViewMeetings)?;

    let id = Uuid::parse_str(&event_id)?;
    let populated = MeetingRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .filter(|populated| populated.meeting.kind == MeetingKind::Event)
        .ok_or_else(|| ApiError::NotFound {
            message: format!("There is no event with the id {}", event_id),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(Json(MeetingResponse {
        meeting: populated.into(),
    }))
}
