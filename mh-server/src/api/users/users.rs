//! User REST API handlers
//!
//! Login is the only public route: it verifies the credential through the
//! identity-provider seam, creates the user lazily on first sight and issues
//! a bearer token carrying the user id only.

use crate::{
    ApiError, ApiResult, AppState, CurrentUser, LoginRequest, LoginResponse, UpdateUserRolesRequest,
    UserDto, UserListResponse, UserResponse,
};

use mh_core::{Permission, Role};
use mh_db::{RoleRepository, UserRepository};

use std::panic::Location;

use axum::{
    Json,
    extract::{Path, State},
};
use error_location::ErrorLocation;
use log::info;
use uuid::Uuid;

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/users/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let Some(credential) = req.credential.as_str() else {
        return Err(ApiError::BadRequest {
            message: format!(
                "The credential must be a string (got {})",
                json_type_name(&req.credential)
            ),
            location: ErrorLocation::from(Location::caller()),
        });
    };

    let identity = state.verifier.verify(credential).await?;

    // Outside the allowed hosted domain the identity is valid but refused
    if let Some(ref allowed) = state.allowed_domain
        && identity.hosted_domain.as_deref() != Some(allowed.as_str())
    {
        return Err(ApiError::Forbidden {
            message: format!("Logins are restricted to the {} domain", allowed),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let users = UserRepository::new(state.pool.clone());
    users
        .upsert_login(
            &identity.subject,
            &identity.name,
            identity.profile_url.as_deref(),
        )
        .await?;

    let resolved = users
        .find_with_roles(&identity.subject)
        .await?
        .ok_or_else(|| ApiError::Internal {
            message: "Login user vanished between write and read".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let token = state.tokens.issue(&identity.subject)?;

    let mut permissions: Vec<Permission> =
        Role::permission_union(&resolved.roles).into_iter().collect();
    permissions.sort_by(|a, b| a.as_str().cmp(b.as_str()));

    info!("User {} logged in", identity.subject);

    Ok(Json(LoginResponse {
        id: resolved.user.id,
        token,
        permissions,
    }))
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<UserListResponse>> {
    current.require(Permission::ViewUsers)?;

    let users = UserRepository::new(state.pool.clone()).find_all().await?;

    Ok(Json(UserListResponse {
        users: users.into_iter().map(UserDto::from).collect(),
    }))
}

/// GET /api/users/:user_id
pub async fn get_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(user_id): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    current.require(Permission::ViewUsers)?;

    let user = UserRepository::new(state.pool.clone())
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| user_not_found(&user_id))?;

    Ok(Json(UserResponse { user: user.into() }))
}

/// PATCH /api/users/:user_id/roles
///
/// Replace the user's ordered role list. Every referenced role must exist.
pub async fn set_user_roles(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(user_id): Path<String>,
    Json(req): Json<UpdateUserRolesRequest>,
) -> ApiResult<Json<UserResponse>> {
    current.require(Permission::ManageUsers)?;

    let mut role_ids = Vec::with_capacity(req.roles.len());
    for raw in &req.roles {
        role_ids.push(Uuid::parse_str(raw)?);
    }

    let roles = RoleRepository::new(state.pool.clone());
    for role_id in &role_ids {
        if roles.find_by_id(*role_id).await?.is_none() {
            return Err(ApiError::Validation {
                message: format!("There is no role with the id {}", role_id),
                field: Some("roles".to_string()),
                location: ErrorLocation::from(Location::caller()),
            });
        }
    }

    let users = UserRepository::new(state.pool.clone());
    if !users.set_roles(&user_id, &role_ids).await? {
        return Err(user_not_found(&user_id));
    }

    let user = users
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| user_not_found(&user_id))?;

    Ok(Json(UserResponse { user: user.into() }))
}

#[track_caller]
fn user_not_found(user_id: &str) -> ApiError {
    ApiError::NotFound {
        message: format!("There is no user with the id {}", user_id),
        location: ErrorLocation::from(Location::caller()),
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
