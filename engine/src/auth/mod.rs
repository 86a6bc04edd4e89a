use std::convert::Infallible;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use error_stack::{Report, ResultExt};
use tracing::{debug, instrument, warn};

mod roles;
pub use roles::Roles;

pub type AuthResult<T> = Result<T, Report<AuthError>>;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("credential is missing or could not be verified")]
    Unauthorized,
}

/// A verified caller. Lives for one request and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub uid: Arc<str>,
    pub email: Option<Arc<str>>,
    pub roles: Roles,
}

impl Identity {
    pub fn new(uid: impl Into<Arc<str>>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            roles: Roles::NONE,
        }
    }

    pub fn with_roles(mut self, roles: Roles) -> Self {
        self.roles = roles;
        self
    }

    pub fn has_roles(&self, roles: Roles) -> bool {
        self.roles.contains(roles)
    }
}

/// Opaque bearer credential as supplied by the caller.
///
/// The raw value may or may not carry a `Bearer ` scheme; [`Credential::token`] strips it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

const BEARER_PREFIX: &str = "Bearer ";

impl Credential {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn missing() -> Self {
        Self(String::new())
    }

    pub fn token(&self) -> &str {
        self.0
            .strip_prefix(BEARER_PREFIX)
            .unwrap_or(&self.0)
            .trim()
    }

    pub fn is_blank(&self) -> bool {
        self.token().is_empty()
    }
}

// tokens don't belong in logs
impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_blank() {
            write!(f, "Credential(<missing>)")
        } else {
            write!(f, "Credential(<redacted>)")
        }
    }
}

impl From<&str> for Credential {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Reads the `Authorization` header. A missing or non-ascii header yields a blank
/// credential, which [`AuthGateway`] turns into [`AuthError::Unauthorized`].
impl<S> FromRequestParts<S> for Credential
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(Credential::new)
            .unwrap_or_else(Credential::missing))
    }
}

/// Resolves a credential to the identity it was issued for.
/// Token format and signing belong entirely to the implementor.
pub trait AuthPort {
    fn verify(&self, credential: &Credential) -> impl Future<Output = AuthResult<Identity>> + Send;
}

impl<T> AuthPort for Arc<T>
where
    T: AuthPort + Send + Sync,
{
    async fn verify(&self, credential: &Credential) -> AuthResult<Identity> {
        (**self).verify(credential).await
    }
}

/// Front door for every identity-scoped operation.
///
/// Blank credentials are rejected without reaching the port. Any port failure comes back as
/// [`AuthError::Unauthorized`], with the port's report kept underneath it. Nothing is cached
/// or retried.
#[derive(Debug, Clone)]
pub struct AuthGateway<A> {
    port: A,
}

impl<A> AuthGateway<A>
where
    A: AuthPort + Send + Sync,
{
    pub fn new(port: A) -> Self {
        Self { port }
    }

    #[instrument(skip_all, name = "auth#verify")]
    pub async fn verify(&self, credential: &Credential) -> AuthResult<Identity> {
        if credential.is_blank() {
            warn!("rejecting request without a credential");
            return Err(Report::new(AuthError::Unauthorized).attach("credential is empty"));
        }

        let identity = self
            .port
            .verify(credential)
            .await
            .change_context(AuthError::Unauthorized)?;

        debug!("credential resolved to uid '{}'", identity.uid);
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::automock;

    struct Port;

    #[automock]
    #[allow(unused_variables)]
    impl AuthPort for Port {
        async fn verify(&self, credential: &Credential) -> AuthResult<Identity> {
            unreachable!()
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("signature mismatch")]
    struct SignatureMismatch;

    #[test]
    fn bearer_prefix_is_stripped() {
        assert_eq!("abc", Credential::new("Bearer abc").token());
        assert_eq!("abc", Credential::new("abc").token());
        assert!(Credential::new("Bearer   ").is_blank());
    }

    #[test]
    fn debug_output_never_shows_the_token() {
        let debug = format!("{:?}", Credential::new("Bearer secret-token"));
        assert!(!debug.contains("secret-token"));
    }

    #[tokio::test]
    async fn blank_credential_never_reaches_port() {
        let mut port = MockPort::new();
        port.expect_verify().never();

        let gateway = AuthGateway::new(port);
        let err = gateway.verify(&Credential::missing()).await.unwrap_err();

        assert!(matches!(err.current_context(), AuthError::Unauthorized));
    }

    #[tokio::test]
    async fn port_failure_becomes_unauthorized() {
        let mut port = MockPort::new();
        port.expect_verify().once().returning(|_| {
            Err(Report::new(SignatureMismatch).change_context(AuthError::Unauthorized))
        });

        let gateway = AuthGateway::new(port);
        let err = gateway.verify(&"Bearer token".into()).await.unwrap_err();

        assert!(matches!(err.current_context(), AuthError::Unauthorized));
        assert!(err.contains::<SignatureMismatch>());
    }

    #[tokio::test]
    async fn verified_identity_is_returned_unchanged() {
        let mut port = MockPort::new();
        port.expect_verify()
            .withf(|c| c.token() == "token")
            .once()
            .returning(|_| Ok(Identity::new("abcdefghijkl")));

        let gateway = AuthGateway::new(port);
        let identity = gateway.verify(&"Bearer token".into()).await.unwrap();

        assert_eq!("abcdefghijkl", &*identity.uid);
    }
}
