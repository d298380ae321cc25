pub mod attendance_dto;
pub mod attendance_list_response;
pub mod attendance_response;
pub mod create_meeting_request;
pub mod feedback_dto;
pub mod feedback_list_response;
pub mod feedback_request;
pub mod feedback_response;
pub mod list_meetings_query;
pub mod meeting_dto;
pub mod meeting_list_response;
pub mod meeting_response;
pub mod meetings;
pub mod update_attendance_entry_request;
pub mod update_attendance_request;
pub mod update_meeting_request;
