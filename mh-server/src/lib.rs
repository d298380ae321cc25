pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    events::events::{get_event, list_events},
    extractors::current_user::CurrentUser,
    meetings::{
        attendance_dto::AttendanceDto,
        attendance_list_response::AttendanceListResponse,
        attendance_response::AttendanceResponse,
        create_meeting_request::CreateMeetingRequest,
        feedback_dto::FeedbackDto,
        feedback_list_response::FeedbackListResponse,
        feedback_request::FeedbackRequest,
        feedback_response::FeedbackResponse,
        list_meetings_query::ListMeetingsQuery,
        meeting_dto::{CreatorDto, MeetingDto},
        meeting_list_response::MeetingListResponse,
        meeting_response::MeetingResponse,
        update_attendance_entry_request::UpdateAttendanceEntryRequest,
        update_attendance_request::UpdateAttendanceRequest,
        update_meeting_request::UpdateMeetingRequest,
    },
    roles::{
        create_role_request::CreateRoleRequest,
        delete_role_response::DeleteRoleResponse,
        role_detail_response::RoleDetailResponse,
        role_dto::RoleDto,
        role_list_response::RoleListResponse,
        role_response::RoleResponse,
        update_role_request::UpdateRoleRequest,
    },
    users::{
        login_request::LoginRequest,
        login_response::LoginResponse,
        update_user_roles_request::UpdateUserRolesRequest,
        user_dto::UserDto,
        user_list_response::UserListResponse,
        user_response::UserResponse,
    },
};

pub use crate::routes::build_router;
pub use crate::state::AppState;
