use crate::{ConfigError, ConfigErrorResult, DEFAULT_TOKEN_VALIDITY_DAYS};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 secret for the bearer tokens issued at login.
    pub jwt_secret: Option<String>,
    /// How long issued tokens stay valid.
    pub token_validity_days: i64,
    /// When set, logins from identities outside this hosted domain are refused.
    pub allowed_domain: Option<String>,
    /// Accept unverified JSON credentials instead of a real identity provider.
    pub dev_login: bool,
    /// OAuth client id the identity provider's tokens must be issued for.
    pub client_id: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_validity_days: DEFAULT_TOKEN_VALIDITY_DAYS,
            allowed_domain: None,
            dev_login: false,
            client_id: None,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        match self.jwt_secret {
            None => {
                return Err(ConfigError::auth(
                    "auth.jwt_secret must be set to issue login tokens",
                ));
            }
            Some(ref secret) if secret.len() < 16 => {
                return Err(ConfigError::auth(
                    "auth.jwt_secret must be at least 16 bytes",
                ));
            }
            Some(_) => {}
        }

        if self.token_validity_days < 1 {
            return Err(ConfigError::auth(format!(
                "auth.token_validity_days must be >= 1, got {}",
                self.token_validity_days
            )));
        }

        if !self.dev_login && self.client_id.is_none() {
            return Err(ConfigError::auth(
                "auth.client_id must be set unless auth.dev_login is enabled",
            ));
        }

        Ok(())
    }
}
