//! Role REST API handlers
//!
//! The protected roles ("Default", "Admin") are excluded from the update and
//! delete target set at the query level, so hitting one reports NOT_FOUND
//! like a missing id.

use crate::{
    ApiError, ApiResult, AppState, CreateRoleRequest, CurrentUser, DeleteRoleResponse,
    RoleDetailResponse, RoleDto, RoleListResponse, RoleResponse, UpdateRoleRequest,
};

use mh_core::{Permission, Role};
use mh_db::RoleRepository;

use std::panic::Location;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use error_location::ErrorLocation;
use uuid::Uuid;

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/roles
pub async fn list_roles(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<RoleListResponse>> {
    current.require(Permission::ViewRoles)?;

    let roles = RoleRepository::new(state.pool.clone()).find_all().await?;

    Ok(Json(RoleListResponse {
        results: roles.len(),
        roles: roles.into_iter().map(RoleDto::from).collect(),
    }))
}

/// GET /api/roles/:role_id
pub async fn get_role(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(role_id): Path<String>,
) -> ApiResult<Json<RoleDetailResponse>> {
    current.require(Permission::ViewRoles)?;

    let id = Uuid::parse_str(&role_id)?;
    let repo = RoleRepository::new(state.pool.clone());

    let role = repo.find_by_id(id).await?.ok_or_else(|| ApiError::NotFound {
        message: format!("There is no role with the id {}", role_id),
        location: ErrorLocation::from(Location::caller()),
    })?;
    let user_count = repo.user_count(id).await?;

    Ok(Json(RoleDetailResponse {
        role: role.into(),
        user_count,
    }))
}

/// POST /api/roles
pub async fn create_role(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(req): Json<CreateRoleRequest>,
) -> ApiResult<(StatusCode, Json<RoleResponse>)> {
    current.require(Permission::ManageRoles)?;

    if req.name.trim().is_empty() {
        return Err(ApiError::Validation {
            message: "you must specify the role's name".to_string(),
            field: Some("name".to_string()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let role = Role::new(req.name, req.color, req.permissions);
    RoleRepository::new(state.pool.clone()).create(&role).await?;

    Ok((StatusCode::CREATED, Json(RoleResponse { role: role.into() })))
}

/// PATCH /api/roles/:role_id
///
/// Protected roles fall outside the update target set and report NOT_FOUND.
pub async fn update_role(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(role_id): Path<String>,
    Json(req): Json<UpdateRoleRequest>,
) -> ApiResult<Json<RoleResponse>> {
    current.require(Permission::ManageRoles)?;

    let id = Uuid::parse_str(&role_id)?;
    let repo = RoleRepository::new(state.pool.clone());

    let mut role = repo.find_by_id(id).await?.ok_or_else(|| invalid_role(&role_id))?;
    if let Some(name) = req.name {
        role.name = name;
    }
    if let Some(color) = req.color {
        role.color = color;
    }
    if let Some(permissions) = req.permissions {
        role.permissions = permissions;
    }

    if !repo.update_unprotected(&role).await? {
        return Err(invalid_role(&role_id));
    }

    Ok(Json(RoleResponse { role: role.into() }))
}

/// DELETE /api/roles/:role_id
///
/// Pulls the role from every user's list and deletes it in one transaction,
/// reporting how many users were touched.
pub async fn delete_role(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(role_id): Path<String>,
) -> ApiResult<Json<DeleteRoleResponse>> {
    current.require(Permission::ManageRoles)?;

    let id = Uuid::parse_str(&role_id)?;
    let modified = RoleRepository::new(state.pool.clone())
        .delete_cascading(id)
        .await?
        .ok_or_else(|| invalid_role(&role_id))?;

    Ok(Json(DeleteRoleResponse {
        modified_user_count: modified,
    }))
}

#[track_caller]
fn invalid_role(role_id: &str) -> ApiError {
    ApiError::NotFound {
        message: format!("There is no valid role with the id {}", role_id),
        location: ErrorLocation::from(Location::caller()),
    }
}
