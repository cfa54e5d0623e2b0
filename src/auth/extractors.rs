use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use tracing::warn;

use crate::auth::jwt::JwtKeys;
use crate::error::ApiError;

/// The authenticated caller, extracted from the session cookie. Every
/// protected handler takes this explicitly; the acting account id is
/// never recovered ambiently mid-call.
#[derive(Debug)]
pub struct AuthAccount(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for AuthAccount
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);

        let cookie_header = parts
            .headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let prefix = format!("{}=", keys.cookie_name);
        let token = cookie_header
            .split(';')
            .find_map(|c| c.trim().strip_prefix(prefix.as_str()))
            .ok_or(ApiError::Unauthorized)?;

        let claims = keys.verify(token).map_err(|_| {
            warn!("invalid or expired session token");
            ApiError::Unauthorized
        })?;

        let account_id: i64 = claims.sub.parse().map_err(|_| {
            warn!(sub = %claims.sub, "non-numeric subject claim");
            ApiError::Unauthorized
        })?;

        Ok(AuthAccount(account_id))
    }
}
