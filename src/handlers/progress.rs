use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::app::AppState;
use crate::error::AppResult;
use crate::handlers::profile::load_profile;
use crate::services::progress::{self, Progress};
use crate::services::targets;

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    #[serde(flatten)]
    pub progress: Progress,
    pub temperature_c: Option<f64>,
}

pub async fn get_progress(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<ProgressResponse>> {
    let (snapshot, temperature_c) = snapshot(&state, user_id).await?;
    Ok(Json(ProgressResponse {
        progress: snapshot,
        temperature_c,
    }))
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<String>,
}

pub async fn get_recommendations(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<RecommendationsResponse>> {
    let (snapshot, _) = snapshot(&state, user_id).await?;
    Ok(Json(RecommendationsResponse {
        recommendations: progress::recommend(&snapshot),
    }))
}

/// Today's consumed-vs-target snapshot against freshly computed targets.
async fn snapshot(state: &AppState, user_id: i64) -> AppResult<(Progress, Option<f64>)> {
    let profile = load_profile(state, user_id).await?;
    let temperature = state.temperature_for(&profile.city).await;
    let daily = targets::compute(&profile, temperature)?;
    let log = state.store.log(user_id, Utc::now().date_naive()).await;
    Ok((progress::progress(&log, &daily), temperature))
}
