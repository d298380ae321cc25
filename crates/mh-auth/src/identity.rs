//! The seam between login and the external identity provider.
//!
//! Verifying a login credential against the provider is the collaborator's
//! job; this module only defines the boundary and the two shipped
//! implementations: the Google tokeninfo client and a development verifier
//! that accepts unsigned JSON credentials.

use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use async_trait::async_trait;
use error_location::ErrorLocation;
use serde::Deserialize;

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// The identity the provider vouched for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// Provider-stable subject; becomes the user id on first login.
    pub subject: String,
    pub name: String,
    pub profile_url: Option<String>,
    /// Hosted domain of the account, when the provider reports one.
    pub hosted_domain: Option<String>,
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, credential: &str) -> AuthErrorResult<VerifiedIdentity>;
}

/// Verifies Google id tokens through the tokeninfo endpoint and checks the
/// audience matches our OAuth client id.
pub struct GoogleVerifier {
    http: reqwest::Client,
    client_id: String,
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    sub: String,
    name: Option<String>,
    email: Option<String>,
    picture: Option<String>,
    hd: Option<String>,
}

impl GoogleVerifier {
    pub fn new(client_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id,
        }
    }
}

#[async_trait]
impl IdentityVerifier for GoogleVerifier {
    async fn verify(&self, credential: &str) -> AuthErrorResult<VerifiedIdentity> {
        let response = self
            .http
            .get(TOKENINFO_URL)
            .query(&[("id_token", credential)])
            .send()
            .await
            .map_err(|e| AuthError::IdentityProvider {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if !response.status().is_success() {
            return Err(AuthError::InvalidCredential {
                message: "the id token was rejected by the identity provider".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let info: TokenInfo =
            response
                .json()
                .await
                .map_err(|e| AuthError::IdentityProvider {
                    message: format!("malformed tokeninfo response: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;

        if info.aud != self.client_id {
            return Err(AuthError::InvalidCredential {
                message: "the id token was issued for a different client".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let name = info
            .name
            .or(info.email)
            .unwrap_or_else(|| info.sub.clone());

        Ok(VerifiedIdentity {
            subject: info.sub,
            name,
            profile_url: info.picture,
            hosted_domain: info.hd,
        })
    }
}

/// Development verifier: the credential is a plain JSON object
/// `{"id", "name", "profile_url"?, "domain"?}` and is trusted as-is.
pub struct DevVerifier;

#[derive(Debug, Deserialize)]
struct DevCredential {
    id: String,
    name: String,
    profile_url: Option<String>,
    domain: Option<String>,
}

#[async_trait]
impl IdentityVerifier for DevVerifier {
    async fn verify(&self, credential: &str) -> AuthErrorResult<VerifiedIdentity> {
        let parsed: DevCredential =
            serde_json::from_str(credential).map_err(|e| AuthError::InvalidCredential {
                message: format!("expected a JSON dev credential: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if parsed.id.is_empty() {
            return Err(AuthError::InvalidCredential {
                message: "the dev credential must carry a non-empty id".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(VerifiedIdentity {
            subject: parsed.id,
            name: parsed.name,
            profile_url: parsed.profile_url,
            hosted_domain: parsed.domain,
        })
    }
}
