use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use axum_extra::headers::{authorization::Basic, Authorization, Header};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    error::AppError,
    models::user::{User, UserRole},
    state::AppState,
    store::Repository,
};

pub const USERNAME_HEADER: &str = "username";
pub const PASSWORD_HEADER: &str = "password";

/// A username/password pair. Also the body of `POST /api/login`.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Reads the `username`/`password` header pair, falling back to an
    /// `Authorization: Basic` header when the pair is incomplete.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        if let (Some(username), Some(password)) = (
            header_text(headers, USERNAME_HEADER),
            header_text(headers, PASSWORD_HEADER),
        ) {
            return Some(Self::new(username, password));
        }

        let mut values = headers.get_all(AUTHORIZATION).iter();
        let basic = Authorization::<Basic>::decode(&mut values).ok()?;
        Some(Self::new(basic.username(), basic.password()))
    }
}

fn header_text<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Resolves a credential pair to its user. Comparison is exact and
/// case-sensitive.
pub fn authenticate(store: &dyn Repository, credentials: &Credentials) -> Result<User, AppError> {
    store
        .find_user_by_credentials(&credentials.username, &credentials.password)
        .ok_or_else(|| {
            warn!(username = %credentials.username, "rejected credentials");
            AppError::Unauthorized
        })
}

/// The authenticated caller. Every request carrying this extractor is
/// re-authenticated from its headers; there are no sessions.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(credentials) = Credentials::from_headers(&parts.headers) else {
            debug!(uri = %parts.uri, "request without credentials");
            return Err(AppError::Unauthorized);
        };
        authenticate(state.store.as_ref(), &credentials).map(Self)
    }
}

impl CurrentUser {
    pub fn user(&self) -> &User {
        &self.0
    }

    pub fn require_role(
        &self,
        allowed: &[UserRole],
        reason: &'static str,
    ) -> Result<&User, AppError> {
        self.0.require_role(allowed, reason)?;
        Ok(&self.0)
    }

    pub fn require_dispatcher(&self) -> Result<&User, AppError> {
        self.require_role(&[UserRole::Dispatcher], "dispatcher only")
    }
}
