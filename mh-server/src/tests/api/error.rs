use crate::ApiError;

use std::panic::Location;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use error_location::ErrorLocation;

fn location() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

#[test]
fn test_error_variants_map_to_expected_status_codes() {
    let cases: Vec<(ApiError, StatusCode)> = vec![
        (
            ApiError::NotFound {
                message: "missing".into(),
                location: location(),
            },
            StatusCode::NOT_FOUND,
        ),
        (
            ApiError::Validation {
                message: "bad".into(),
                field: Some("name".into()),
                location: location(),
            },
            StatusCode::BAD_REQUEST,
        ),
        (
            ApiError::BadRequest {
                message: "bad".into(),
                location: location(),
            },
            StatusCode::BAD_REQUEST,
        ),
        (
            ApiError::Unauthenticated {
                message: "who are you".into(),
                location: location(),
            },
            StatusCode::UNAUTHORIZED,
        ),
        (
            ApiError::Forbidden {
                message: "not yours".into(),
                location: location(),
            },
            StatusCode::FORBIDDEN,
        ),
        (
            ApiError::Internal {
                message: "boom".into(),
                location: location(),
            },
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, expected) in cases {
        let response = error.into_response();
        assert_eq!(response.status(), expected);
    }
}

#[test]
fn test_db_constraint_errors_surface_as_validation() {
    let db_error = mh_db::DbError::Constraint {
        message: "UNIQUE constraint failed: roles.name".into(),
        location: location(),
    };

    let api_error: ApiError = db_error.into();

    assert!(matches!(api_error, ApiError::Validation { .. }));
}

#[test]
fn test_auth_token_errors_surface_as_unauthenticated() {
    let auth_error = mh_auth::AuthError::TokenExpired {
        location: location(),
    };

    let api_error: ApiError = auth_error.into();

    assert!(matches!(api_error, ApiError::Unauthenticated { .. }));
}

#[test]
fn test_malformed_credential_surfaces_as_bad_request() {
    let auth_error = mh_auth::AuthError::InvalidCredential {
        message: "expected JSON".into(),
        location: location(),
    };

    let api_error: ApiError = auth_error.into();

    assert!(matches!(api_error, ApiError::BadRequest { .. }));
}
