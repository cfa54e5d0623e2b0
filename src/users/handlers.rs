use axum::{
    extract::{FromRef, State},
    http::header,
    response::{AppendHeaders, IntoResponse},
    routing::{delete, get, patch, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        extractors::AuthAccount,
        handlers::is_valid_email,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        PublicAccount,
    },
    error::{is_unique_violation, ApiError},
    state::AppState,
    users::dto::{ChangePasswordRequest, UpdateProfileRequest},
    users::repo::Account,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/get", get(get_account))
        .route("/user/update", patch(update_profile))
        .route("/user/update/password", put(change_password))
        .route("/user/delete", delete(delete_account))
}

#[instrument(skip(state))]
pub async fn get_account(
    State(state): State<AppState>,
    AuthAccount(account_id): AuthAccount,
) -> Result<Json<PublicAccount>, ApiError> {
    // The token outlives the row for deleted accounts; lookups say so.
    let account = Account::find_by_id(&state.db, account_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("account not found".into()))?;
    Ok(Json(account.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthAccount(account_id): AuthAccount,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<PublicAccount>, ApiError> {
    let current = Account::find_by_id(&state.db, account_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("account not found".into()))?;

    let email = match payload.email {
        Some(e) => {
            let e = e.trim().to_lowercase();
            if !is_valid_email(&e) {
                warn!(email = %e, "invalid email");
                return Err(ApiError::InvalidInput("invalid email".into()));
            }
            if e != current.email
                && Account::find_by_email(&state.db, &e).await?.is_some()
            {
                return Err(ApiError::Conflict("email already registered".into()));
            }
            Some(e)
        }
        None => None,
    };

    let username = match payload.username {
        Some(u) => {
            let u = u.trim().to_string();
            if u.is_empty() {
                return Err(ApiError::InvalidInput("username is required".into()));
            }
            if u != current.username
                && Account::find_by_username(&state.db, &u).await?.is_some()
            {
                return Err(ApiError::Conflict("username already taken".into()));
            }
            Some(u)
        }
        None => None,
    };

    let updated = match Account::update_profile(
        &state.db,
        account_id,
        username.as_deref(),
        email.as_deref(),
    )
    .await
    {
        Ok(Some(a)) => a,
        Ok(None) => return Err(ApiError::NotFound("account not found".into())),
        Err(e) if is_unique_violation(&e) => {
            return Err(ApiError::Conflict("email or username already taken".into()))
        }
        Err(e) => return Err(e.into()),
    };

    info!(account_id = %updated.id, "profile updated");
    Ok(Json(updated.into()))
}

#[instrument(skip(state, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    AuthAccount(account_id): AuthAccount,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<PublicAccount>, ApiError> {
    if payload.new_password.chars().count() < state.config.password_min_len {
        warn!("new password too short");
        return Err(ApiError::InvalidInput("password too short".into()));
    }

    let account = Account::find_by_id(&state.db, account_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("account not found".into()))?;

    if !verify_password(&payload.password, &account.password_hash) {
        warn!(account_id = %account_id, "password change with wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    let hash = hash_password(&payload.new_password)?;
    let updated = Account::update_password(&state.db, account_id, &hash)
        .await?
        .ok_or_else(|| ApiError::NotFound("account not found".into()))?;

    info!(account_id = %account_id, "password changed");
    Ok(Json(updated.into()))
}

#[instrument(skip(state))]
pub async fn delete_account(
    State(state): State<AppState>,
    AuthAccount(account_id): AuthAccount,
) -> Result<impl IntoResponse, ApiError> {
    if !Account::delete(&state.db, account_id).await? {
        return Err(ApiError::NotFound("account not found".into()));
    }

    info!(account_id = %account_id, "account deleted");
    let keys = JwtKeys::from_ref(&state);
    Ok(AppendHeaders([(header::SET_COOKIE, keys.clear_cookie())]))
}
