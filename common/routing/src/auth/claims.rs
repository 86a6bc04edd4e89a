use engine::auth::{Identity, Roles};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: Option<String>,
    // can be a string or an array
    #[serde(default)]
    pub aud: Value,
    /// expiration
    pub exp: usize,
    /// issuer
    pub iss: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Claims {
    /// Builds the caller's identity, reading roles from the dot separated `roles_path`
    /// into the token's extra claims. A missing path means no roles.
    pub fn into_identity(self, roles_path: &str) -> Identity {
        let extra = Value::Object(self.extra);

        let roles = match roles_path
            .split('.')
            .try_fold(&extra, |value, part| value.get(part))
        {
            Some(Value::Array(roles)) => roles
                .iter()
                .filter_map(Value::as_str)
                .fold(Roles::NONE, |mut r, next| {
                    if let Ok(role) = next.parse::<Roles>() {
                        r.add(role);
                    }
                    r
                }),
            _ => Roles::NONE,
        };

        Identity {
            uid: self.sub.into(),
            email: self.email.map(Into::into),
            roles,
        }
    }
}
