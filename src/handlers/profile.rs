use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use validator::Validate;

use crate::app::AppState;
use crate::error::{AppError, AppResult};
use crate::models::profile::{SetProfileRequest, UserProfile};
use crate::models::targets::DailyTargets;
use crate::services::targets;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub targets: DailyTargets,
    /// Temperature used for the water target, when the lookup succeeded.
    pub temperature_c: Option<f64>,
}

/// Full profile replacement. Recomputes and returns the daily targets so the
/// caller can show them right away.
pub async fn set_profile(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(body): Json<SetProfileRequest>,
) -> AppResult<Json<ProfileResponse>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let profile = body.into_profile(user_id);
    let temperature_c = state.temperature_for(&profile.city).await;
    let targets = targets::compute(&profile, temperature_c)?;

    state.store.put_profile(profile.clone()).await;
    tracing::info!(user_id, city = %profile.city, "profile saved");

    Ok(Json(ProfileResponse {
        profile,
        targets,
        temperature_c,
    }))
}

pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<UserProfile>> {
    let profile = load_profile(&state, user_id).await?;
    Ok(Json(profile))
}

pub async fn get_targets(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<ProfileResponse>> {
    let profile = load_profile(&state, user_id).await?;
    let temperature_c = state.temperature_for(&profile.city).await;
    let targets = targets::compute(&profile, temperature_c)?;
    Ok(Json(ProfileResponse {
        profile,
        targets,
        temperature_c,
    }))
}

/// Shared profile load with the set-up hint on a miss.
pub async fn load_profile(state: &AppState, user_id: i64) -> AppResult<UserProfile> {
    state
        .store
        .profile(user_id)
        .await
        .ok_or_else(|| AppError::ProfileMissing("Set up your profile first".into()))
}
