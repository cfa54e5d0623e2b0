use axum::{
    extract::{FromRef, State},
    http::header,
    response::{AppendHeaders, IntoResponse},
    routing::post,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, RegisterRequest},
        jwt::JwtKeys,
        password::{hash_password, verify_password},
    },
    error::{is_unique_violation, ApiError},
    state::AppState,
    users::repo::Account,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload.email = payload.email.trim().to_lowercase();
    payload.username = payload.username.trim().to_string();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::InvalidInput("invalid email".into()));
    }
    if payload.username.is_empty() {
        return Err(ApiError::InvalidInput("username is required".into()));
    }
    if payload.password.chars().count() < state.config.password_min_len {
        warn!("password too short");
        return Err(ApiError::InvalidInput("password too short".into()));
    }

    // Pre-checks are a UX courtesy; the unique constraints below are the
    // real guard against racing registrations.
    if Account::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("email already registered".into()));
    }
    if Account::find_by_username(&state.db, &payload.username)
        .await?
        .is_some()
    {
        warn!(username = %payload.username, "username already taken");
        return Err(ApiError::Conflict("username already taken".into()));
    }

    let hash = hash_password(&payload.password)?;

    let account = match Account::create(&state.db, &payload.username, &payload.email, &hash).await {
        Ok(a) => a,
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %payload.email, "lost registration race");
            return Err(ApiError::Conflict("account already exists".into()));
        }
        Err(e) => return Err(e.into()),
    };

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(account.id)?;
    let cookie = keys.session_cookie(&token);

    info!(account_id = %account.id, email = %account.email, "account registered");
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(AuthResponse {
            access_token: token,
            account: account.into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    // "No such email" and "wrong password" must be indistinguishable.
    let account = Account::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| {
            warn!(email = %payload.email, "login unknown email");
            ApiError::InvalidCredentials
        })?;

    if !verify_password(&payload.password, &account.password_hash) {
        warn!(account_id = %account.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(account.id)?;
    let cookie = keys.session_cookie(&token);

    info!(account_id = %account.id, email = %account.email, "logged in");
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(AuthResponse {
            access_token: token,
            account: account.into(),
        }),
    ))
}

#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    // Tokens are stateless; logout just expires the cookie.
    let keys = JwtKeys::from_ref(&state);
    AppendHeaders([(header::SET_COOKIE, keys.clear_cookie())])
}

#[cfg(test)]
mod email_tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("alice@x.com"));
        assert!(is_valid_email("bob.smith+tag@mail.example.org"));
    }

    #[test]
    fn rejects_missing_at_or_domain() {
        assert!(!is_valid_email("alice"));
        assert!(!is_valid_email("alice@"));
        assert!(!is_valid_email("alice@host"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("a b@x.com"));
    }
}
