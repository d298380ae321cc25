pub mod login_request;
pub mod login_response;
pub mod update_user_roles_request;
pub mod user_dto;
pub mod user_list_response;
pub mod user_response;
pub mod users;
