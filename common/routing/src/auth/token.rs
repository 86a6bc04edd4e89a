use engine::auth::{AuthError, AuthPort, AuthResult, Credential, Identity};
use error_stack::{Report, ResultExt};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use crate::auth::{
    claims::Claims,
    oauth::{Jwk, Jwks, JwksState, OAuthConfig},
};

/*
 * Tokens are minted by an external authorization service.
 * Its public keys are fetched from the JWKS url when the verifier is created,
 * and the issuer and audience come in through the env.
 * Verification decodes the header to find the key id, checks the signature with that key,
 * then checks issuer, audience and expiry. The subject becomes the identity's uid.
 */

/// Verifies RS256 JWTs against a JWKS document.
#[derive(Debug, Clone)]
pub struct JwtVerifier {
    jwks: JwksState,
    oauth_config: OAuthConfig,
}

#[derive(Debug, thiserror::Error)]
#[error("failed to create jwt verifier")]
pub struct VerifierCreationErr;

impl JwtVerifier {
    pub async fn create() -> Result<Self, Report<VerifierCreationErr>> {
        let oauth_config = OAuthConfig::from_env().change_context(VerifierCreationErr)?;
        let jwks = fetch_jwks(&oauth_config.jwks_url)
            .await
            .change_context(VerifierCreationErr)?;
        Ok(Self::with_keys(oauth_config, jwks))
    }

    pub fn with_keys(oauth_config: OAuthConfig, keys: Vec<Jwk>) -> Self {
        Self {
            jwks: JwksState::new(keys),
            oauth_config,
        }
    }

    /// Re-fetches the signing keys, replacing the current set.
    #[instrument(skip(self))]
    pub async fn refresh_jwks(&self) -> Result<(), Report<RefreshJwksErr>> {
        let jwks = fetch_jwks(&self.oauth_config.jwks_url).await?;
        self.jwks.replace(jwks).await;
        Ok(())
    }

    /// Refreshes the signing keys every `jwks_refresh` until the runtime shuts down.
    /// A failed refresh keeps the previous keys.
    pub fn spawn_refresh(&self) -> JoinHandle<()> {
        let verifier = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(verifier.oauth_config.jwks_refresh);
            // the first tick is immediate, and the keys were fetched on creation
            interval.tick().await;
            loop {
                interval.tick().await;
                if let Err(e) = verifier.refresh_jwks().await {
                    warn!("keeping previous signing keys: {e:?}");
                }
            }
        })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to retrieve jwks data")]
pub struct RefreshJwksErr;

#[instrument]
async fn fetch_jwks(jwks_uri: &str) -> Result<Vec<Jwk>, Report<RefreshJwksErr>> {
    info!("fetching JWKS");

    let jwks: Jwks = reqwest::get(jwks_uri)
        .await
        .change_context(RefreshJwksErr)?
        .json()
        .await
        .change_context(RefreshJwksErr)?;

    if jwks.keys.is_empty() {
        error!("no jwks were found");
    } else {
        info!("found {} jwks", jwks.keys.len());
    }
    Ok(jwks.keys)
}

fn unauthorized(reason: &'static str) -> Report<AuthError> {
    error!("{reason}");
    Report::new(AuthError::Unauthorized).attach(reason)
}

impl AuthPort for JwtVerifier {
    #[instrument(skip_all, name = "jwt#verify")]
    async fn verify(&self, credential: &Credential) -> AuthResult<Identity> {
        let token = credential.token();

        let header = jsonwebtoken::decode_header(token)
            .map_err(|_| unauthorized("JWT token decoding (without verification) failed"))?;
        let kid = header
            .kid
            .ok_or_else(|| unauthorized("invalid token: kid missing"))?;

        let jwk = self
            .jwks
            .find_key(&kid)
            .await
            .ok_or_else(|| unauthorized("kid key not found"))?;

        let decoding_key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
            .map_err(|_| unauthorized("failed to create decoding key"))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.oauth_config.audience]);
        validation.set_issuer(&[&self.oauth_config.issuer_url]);

        let token_data = jsonwebtoken::decode::<Claims>(token, &decoding_key, &validation)
            .change_context(AuthError::Unauthorized)
            .attach("token validation failed")?;

        let identity = token_data
            .claims
            .into_identity(&self.oauth_config.roles_claims_path);

        debug!("token validated for uid '{}' with roles {}", identity.uid, identity.roles);
        Ok(identity)
    }
}
