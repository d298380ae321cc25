//! Axum extractors for REST API authentication

use crate::{ApiError, AppState};

use mh_core::{Permission, Role, User};
use mh_db::UserRepository;

use std::collections::HashSet;
use std::future::Future;
use std::panic::Location;

use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use error_location::ErrorLocation;

/// The authenticated caller with its permission set resolved.
///
/// Extracting this performs the whole guard chain: bearer token validation,
/// user lookup and the permission union over the user's roles. Routes that
/// need authentication alone just take the extractor; permission-gated
/// handlers call [`CurrentUser::require`] on top.
///
/// Permissions are resolved from the store on every request; the token only
/// identifies the user.
pub struct CurrentUser {
    pub user: User,
    pub permissions: HashSet<Permission>,
}

impl CurrentUser {
    /// Check membership of the resolved permission set.
    #[track_caller]
    pub fn require(&self, permission: Permission) -> Result<(), ApiError> {
        if self.permissions.contains(&permission) {
            return Ok(());
        }

        Err(ApiError::Forbidden {
            message: format!(
                "You need the {} permission to do that",
                permission.as_str()
            ),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let header = parts.headers.get(AUTHORIZATION).ok_or_else(|| {
                ApiError::Unauthenticated {
                    message: "Missing authorization header".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

            let token = header
                .to_str()
                .ok()
                .and_then(|value| value.strip_prefix("Bearer "))
                .ok_or_else(|| ApiError::Unauthenticated {
                    message: "Invalid authorization scheme: expected 'Bearer'".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })?;

            let claims = state.tokens.validate(token)?;

            let resolved = UserRepository::new(state.pool.clone())
                .find_with_roles(&claims.sub)
                .await?
                .ok_or_else(|| ApiError::Unauthenticated {
                    message: "The token's user no longer exists".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })?;

            Ok(CurrentUser {
                permissions: Role::permission_union(&resolved.roles),
                user: resolved.user,
            })
        }
    }
}
