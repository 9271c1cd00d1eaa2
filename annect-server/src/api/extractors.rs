//! Custom Axum extractors for caller identity and scheduler auth.
//!
//! Provides:
//! - `Identity` — resolves the caller from the trusted identity headers;
//!   never rejects, anonymous callers yield `None`.
//! - `RequireUser` — rejects anonymous callers with a sign-in condition.
//! - `RequireAdmin` — additionally requires the admin role.
//! - `CronAuth` — verifies the scheduler's shared bearer secret.
//!
//! The identity provider terminates authentication upstream and injects
//! the resolved identity as headers:
//!
//! ```text
//! Annect-User-Id:    <provider subject id>
//! Annect-User-Role:  USER | ADMIN
//! Annect-User-Email: <email>
//! Annect-User-Name:  <display name>
//! ```
//!
//! The role is an explicit attribute of the identity record, set at
//! provisioning time; nothing here compares email addresses.

use annect_core::entities::UserRole;
use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};

use crate::state::AppState;

pub const USER_ID_HEADER: &str = "annect-user-id";
pub const USER_ROLE_HEADER: &str = "annect-user-role";
pub const USER_EMAIL_HEADER: &str = "annect-user-email";
pub const USER_NAME_HEADER: &str = "annect-user-name";

/// The resolved caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: String,
    pub role: UserRole,
    pub email: String,
    pub display_name: String,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Parse a role header value. Unknown values resolve to the regular role
/// rather than rejecting the request.
fn parse_role(value: &str) -> UserRole {
    if value.eq_ignore_ascii_case("admin") {
        UserRole::Admin
    } else {
        UserRole::User
    }
}

fn caller_from_parts(parts: &Parts) -> Option<Caller> {
    let id = parts.headers.get(USER_ID_HEADER)?.to_str().ok()?;
    if id.is_empty() {
        return None;
    }
    let role = parts
        .headers
        .get(USER_ROLE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(parse_role)
        .unwrap_or(UserRole::User);
    let email = parts
        .headers
        .get(USER_EMAIL_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    let display_name = parts
        .headers
        .get(USER_NAME_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    Some(Caller {
        id: id.to_owned(),
        role,
        email,
        display_name,
    })
}

// ---------------------------------------------------------------------------
// Identity — optional caller, for public endpoints with annotations
// ---------------------------------------------------------------------------

/// Optional caller identity. Anonymous requests extract as `Identity(None)`.
pub struct Identity(pub Option<Caller>);

impl FromRequestParts<AppState> for Identity {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Identity(caller_from_parts(parts)))
    }
}

// ---------------------------------------------------------------------------
// RequireUser — signed-in caller
// ---------------------------------------------------------------------------

/// A signed-in caller. Anonymous requests are rejected with the sign-in
/// condition the UI turns into its redirect.
pub struct RequireUser(pub Caller);

/// Rejections for the identity extractors.
#[derive(Debug)]
pub enum AuthError {
    SignInRequired,
    AdminOnly,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::SignInRequired => {
                (StatusCode::UNAUTHORIZED, "sign-in required").into_response()
            }
            AuthError::AdminOnly => (StatusCode::FORBIDDEN, "admin role required").into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        caller_from_parts(parts)
            .map(RequireUser)
            .ok_or(AuthError::SignInRequired)
    }
}

// ---------------------------------------------------------------------------
// RequireAdmin — admin-only operations
// ---------------------------------------------------------------------------

/// A signed-in caller holding the admin role.
pub struct RequireAdmin(pub Caller);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let caller = caller_from_parts(parts).ok_or(AuthError::SignInRequired)?;
        if !caller.is_admin() {
            return Err(AuthError::AdminOnly);
        }
        Ok(RequireAdmin(caller))
    }
}

// ---------------------------------------------------------------------------
// CronAuth — scheduled-trigger authentication
// ---------------------------------------------------------------------------

/// Verifies `Authorization: Bearer <cron secret>` on scheduler-invoked
/// endpoints.
pub struct CronAuth;

/// Rejection for the [`CronAuth`] extractor.
#[derive(Debug)]
pub struct CronAuthError;

impl IntoResponse for CronAuthError {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, "invalid scheduler credentials").into_response()
    }
}

impl FromRequestParts<AppState> for CronAuth {
    type Rejection = CronAuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(CronAuthError)?;

        let token = header.strip_prefix("Bearer ").ok_or(CronAuthError)?;

        let cron = state.config.cron.read().await;
        if token != cron.secret {
            return Err(CronAuthError);
        }
        drop(cron);

        Ok(CronAuth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parsing_defaults_to_user() {
        assert_eq!(parse_role("ADMIN"), UserRole::Admin);
        assert_eq!(parse_role("admin"), UserRole::Admin);
        assert_eq!(parse_role("USER"), UserRole::User);
        assert_eq!(parse_role("something-else"), UserRole::User);
    }
}
