use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::extractors::AuthAccount,
    error::ApiError,
    moods::dto::{
        score_in_range, DeleteMoodRequest, MoodResponse, NewMoodRequest, UpdateMoodRequest,
        SCORE_MAX, SCORE_MIN,
    },
    moods::repo::MoodEntry,
    state::AppState,
};

pub fn mood_routes() -> Router<AppState> {
    Router::new()
        .route("/moods/add", post(add_mood))
        .route("/moods/get", get(list_moods))
        .route("/moods/update", put(update_mood))
        .route("/moods/delete", delete(delete_mood))
}

fn check_score(score: i16) -> Result<(), ApiError> {
    if !score_in_range(score) {
        warn!(score, "score out of range");
        return Err(ApiError::InvalidInput(format!(
            "score must be between {} and {}",
            SCORE_MIN, SCORE_MAX
        )));
    }
    Ok(())
}

fn check_lengths(
    state: &AppState,
    description: Option<&str>,
    emotions: Option<&str>,
) -> Result<(), ApiError> {
    if let Some(d) = description {
        if d.chars().count() > state.config.mood_description_max {
            return Err(ApiError::InvalidInput("description too long".into()));
        }
    }
    if let Some(e) = emotions {
        if e.chars().count() > state.config.mood_emotions_max {
            return Err(ApiError::InvalidInput("emotions too long".into()));
        }
    }
    Ok(())
}

#[instrument(skip(state, payload))]
pub async fn add_mood(
    State(state): State<AppState>,
    AuthAccount(account_id): AuthAccount,
    Json(payload): Json<NewMoodRequest>,
) -> Result<(StatusCode, Json<MoodResponse>), ApiError> {
    check_score(payload.score)?;
    check_lengths(
        &state,
        Some(&payload.description),
        payload.emotions.as_deref(),
    )?;

    let entry = MoodEntry::insert(
        &state.db,
        account_id,
        payload.score,
        &payload.description,
        payload.emotions.as_deref(),
        payload.date,
    )
    .await?;

    info!(account_id = %account_id, mood_id = %entry.id, "mood added");
    Ok((StatusCode::CREATED, Json(entry.into())))
}

#[instrument(skip(state))]
pub async fn list_moods(
    State(state): State<AppState>,
    AuthAccount(account_id): AuthAccount,
) -> Result<Json<Vec<MoodResponse>>, ApiError> {
    // No entries is an empty list, not an error.
    let entries = MoodEntry::list_by_owner(&state.db, account_id).await?;
    Ok(Json(entries.into_iter().map(MoodResponse::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn update_mood(
    State(state): State<AppState>,
    AuthAccount(account_id): AuthAccount,
    Json(payload): Json<UpdateMoodRequest>,
) -> Result<Json<MoodResponse>, ApiError> {
    if let Some(score) = payload.score {
        check_score(score)?;
    }
    check_lengths(
        &state,
        payload.description.as_deref(),
        payload.emotions.as_deref(),
    )?;

    let entry = MoodEntry::update_owned(
        &state.db,
        account_id,
        payload.id,
        payload.score,
        payload.description.as_deref(),
        payload.emotions.as_deref(),
        payload.date,
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("mood entry not found".into()))?;

    info!(account_id = %account_id, mood_id = %entry.id, "mood updated");
    Ok(Json(entry.into()))
}

#[instrument(skip(state, payload))]
pub async fn delete_mood(
    State(state): State<AppState>,
    AuthAccount(account_id): AuthAccount,
    Json(payload): Json<DeleteMoodRequest>,
) -> Result<StatusCode, ApiError> {
    if !MoodEntry::delete_owned(&state.db, account_id, payload.id).await? {
        return Err(ApiError::NotFound("mood entry not found".into()));
    }

    info!(account_id = %account_id, mood_id = %payload.id, "mood deleted");
    Ok(StatusCode::OK)
}
