pub mod create_role_request;
pub mod delete_role_response;
pub mod role_detail_response;
pub mod role_dto;
pub mod role_list_response;
pub mod role_response;
pub mod roles;
pub mod update_role_request;
