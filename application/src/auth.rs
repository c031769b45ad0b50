//! Admin authentication definitions.

use axum::{async_trait, extract::FromRequestParts, RequestPartsExt as _};
use axum_extra::{
    headers::{authorization::Basic, Authorization},
    TypedHeader,
};
use secrecy::{ExposeSecret as _, SecretString};
use tracing as log;

use crate::{config, define_error, AsError as _, Error};

/// Expected admin credentials, injected into the [`axum::Router`] as an
/// [`Extension`].
///
/// [`Extension`]: axum::Extension
#[derive(Clone, Debug)]
pub struct AdminCredentials {
    /// Expected username.
    pub username: Option<String>,

    /// Expected password.
    pub password: Option<SecretString>,
}

impl From<config::Admin> for AdminCredentials {
    fn from(value: config::Admin) -> Self {
        let config::Admin { username, password } = value;
        Self { username, password }
    }
}

/// Extractor authenticating the request against the [`AdminCredentials`]
/// via [HTTP Basic] authentication.
///
/// Fails closed: a missing [`AdminCredentials`] configuration rejects every
/// request with a server error instead of allowing some well-known default.
///
/// [HTTP Basic]: https://datatracker.ietf.org/doc/html/rfc7617
#[derive(Clone, Copy, Debug)]
pub struct Admin;

#[async_trait]
impl<S> FromRequestParts<S> for Admin
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let credentials = parts
            .extensions
            .get::<AdminCredentials>()
            .cloned()
            .ok_or_else(|| {
                Error::internal(&"missing `AdminCredentials` extension")
            })?;
        let (Some(username), Some(password)) =
            (credentials.username, credentials.password)
        else {
            log::error!("rejecting admin request: credentials are not set");
            return Err(AuthError::NotConfigured.into());
        };

        match parts.extract::<TypedHeader<Authorization<Basic>>>().await {
            Ok(TypedHeader(Authorization(basic))) => {
                let username_matches = constant_time_eq(
                    basic.username().as_bytes(),
                    username.as_bytes(),
                );
                let password_matches = constant_time_eq(
                    basic.password().as_bytes(),
                    password.expose_secret().as_bytes(),
                );
                if username_matches & password_matches {
                    Ok(Self)
                } else {
                    log::warn!(
                        "failed admin authentication attempt for user `{}`",
                        basic.username(),
                    );
                    Err(AuthError::InvalidCredentials.into())
                }
            }
            Err(e) => {
                if e.is_missing() {
                    Err(AuthError::AuthenticationRequired.into())
                } else {
                    Err(e.into_error())
                }
            }
        }
    }
}

/// Compares the two byte strings in time depending only on their lengths,
/// never on their contents.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let mut diff = a.len() ^ b.len();
    for i in 0..a.len().max(b.len()) {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        diff |= usize::from(x ^ y);
    }
    diff == 0
}

define_error! {
    enum AuthError {
        #[code = "AUTHENTICATION_REQUIRED"]
        #[status = UNAUTHORIZED]
        #[message = "Authentication required"]
        AuthenticationRequired,
        #[code = "INVALID_CREDENTIALS"]
        #[status = UNAUTHORIZED]
        #[message = "Incorrect username or password"]
        InvalidCredentials,
        #[code = "ADMIN_NOT_CONFIGURED"]
        #[status = INTERNAL_SERVER_ERROR]
        #[message = "Server misconfiguration: admin credentials not set"]
        NotConfigured,
    }
}

#[cfg(test)]
mod spec {
    use super::constant_time_eq;

    #[test]
    fn equal_inputs_compare_equal() {
        assert!(constant_time_eq(b"", b""));
        assert!(constant_time_eq(b"admin", b"admin"));
    }

    #[test]
    fn different_inputs_compare_unequal() {
        assert!(!constant_time_eq(b"admin", b"Admin"));
        assert!(!constant_time_eq(b"admin", b"admin2"));
        assert!(!constant_time_eq(b"admin2", b"admin"));
        assert!(!constant_time_eq(b"", b"admin"));
    }
}
