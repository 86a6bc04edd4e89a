use std::time::Duration;

use error_stack::{Report, ResultExt};
use serde::Deserialize;
use tracing::info;

use crate::ArwLock;

pub type OAuthResult<T> = Result<T, Report<OAuthConfigErr>>;

#[derive(Debug, thiserror::Error)]
pub enum OAuthConfigErr {
    #[error("{0} oauth property not specified")]
    Missing(&'static str),
    #[error("{0} oauth property has an invalid value")]
    Invalid(&'static str),
}

/// Where signing keys come from and what a token has to claim to be accepted.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub jwks_url: String,
    /// Expected `iss` claim
    pub issuer_url: String,
    /// Dot separated path to the roles array in the JWT
    pub roles_claims_path: String,
    /// Expected `aud` claim
    pub audience: String,
    /// How often the signing keys are fetched again
    pub jwks_refresh: Duration,
}

const OAUTH_JWKS_URL: &str = "OAUTH_JWKS_URL";
const OAUTH_ISSUER_URL: &str = "OAUTH_ISSUER_URL";
const OAUTH_ROLES_JWT_PATH: &str = "OAUTH_ROLES_JWT_PATH";
const OAUTH_AUDIENCE: &str = "OAUTH_AUDIENCE";
const OAUTH_JWKS_REFRESH_SECS: &str = "OAUTH_JWKS_REFRESH_SECS";

const DEFAULT_AUDIENCE: &str = "content-api";
const DEFAULT_JWKS_REFRESH: Duration = Duration::from_secs(60 * 60);

fn required(key: &'static str) -> OAuthResult<String> {
    std::env::var(key).change_context(OAuthConfigErr::Missing(key))
}

impl OAuthConfig {
    pub fn from_env() -> OAuthResult<Self> {
        let audience = std::env::var(OAUTH_AUDIENCE).unwrap_or_else(|_| {
            info!("{OAUTH_AUDIENCE} not specified, going with default {DEFAULT_AUDIENCE}");
            DEFAULT_AUDIENCE.to_string()
        });

        let jwks_refresh = match std::env::var(OAUTH_JWKS_REFRESH_SECS) {
            Ok(secs) => secs
                .parse()
                .map(Duration::from_secs)
                .change_context(OAuthConfigErr::Invalid(OAUTH_JWKS_REFRESH_SECS))
                .attach_with(|| format!("'{secs}' is not a number of seconds"))?,
            Err(_) => DEFAULT_JWKS_REFRESH,
        };

        Ok(Self {
            jwks_url: required(OAUTH_JWKS_URL)?,
            issuer_url: required(OAUTH_ISSUER_URL)?,
            roles_claims_path: required(OAUTH_ROLES_JWT_PATH)?,
            audience,
            jwks_refresh,
        })
    }
}

/// The signing keys currently trusted. Clones share the same set.
#[derive(Debug, Clone)]
pub struct JwksState {
    keys: ArwLock<Vec<Jwk>>,
}

impl JwksState {
    pub fn new(keys: Vec<Jwk>) -> Self {
        Self {
            keys: ArwLock::new(keys),
        }
    }

    pub async fn find_key(&self, kid: &str) -> Option<Jwk> {
        self.keys
            .read()
            .await
            .iter()
            .find(|k| k.kid == kid)
            .cloned()
    }

    pub async fn replace(&self, keys: Vec<Jwk>) {
        *self.keys.write().await = keys;
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

/// An RSA public key as published in a JWKS document.
#[derive(Debug, Deserialize, Clone)]
pub struct Jwk {
    pub kid: String,
    // modulus
    pub n: String,
    // exponent
    pub e: String,
}
