use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::error::{AppError, AppResult};
use crate::handlers::profile::load_profile;
use crate::models::daily_log::{Activity, FoodEntry, WorkoutEntry};
use crate::services::{progress, targets};

#[derive(Debug, Deserialize)]
pub struct LogWaterRequest {
    pub amount_ml: u32,
}

#[derive(Debug, Serialize)]
pub struct LogWaterResponse {
    pub logged_ml: u32,
    pub water_target_ml: u32,
    pub water_remaining_ml: u32,
}

pub async fn log_water(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(body): Json<LogWaterRequest>,
) -> AppResult<Json<LogWaterResponse>> {
    let profile = load_profile(&state, user_id).await?;
    let today = Utc::now().date_naive();

    let logged_ml = state
        .store
        .update_log(user_id, today, |log| {
            progress::log_water(log, body.amount_ml)?;
            Ok(log.water_ml)
        })
        .await?;

    let temperature = state.temperature_for(&profile.city).await;
    let daily = targets::compute(&profile, temperature)?;

    Ok(Json(LogWaterResponse {
        logged_ml,
        water_target_ml: daily.water_ml,
        water_remaining_ml: daily.water_ml.saturating_sub(logged_ml),
    }))
}

#[derive(Debug, Deserialize)]
pub struct LogFoodRequest {
    pub name: String,
    pub quantity_g: f64,
    /// Manual calorie density; set when the user knows the value and wants to
    /// skip resolution (or resolution already failed once).
    pub calories_per_100g: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct LogFoodResponse {
    pub entry: FoodEntry,
    pub calories_consumed: f64,
    pub calorie_target: f64,
    pub calorie_balance: f64,
}

pub async fn log_food(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(body): Json<LogFoodRequest>,
) -> AppResult<Json<LogFoodResponse>> {
    let profile = load_profile(&state, user_id).await?;
    let today = Utc::now().date_naive();

    let (name, calories_per_100g) = match body.calories_per_100g {
        Some(kcal) => (body.name.clone(), kcal),
        None => {
            let resolved = state
                .resolver
                .resolve(&body.name)
                .await
                .ok_or_else(|| AppError::FoodNotFound(body.name.clone()))?;
            (resolved.name, resolved.calories_per_100g)
        }
    };

    let (entry, consumed) = state
        .store
        .update_log(user_id, today, |log| {
            let entry = progress::log_food(log, name, calories_per_100g, body.quantity_g)?;
            Ok((entry, log.calories_consumed))
        })
        .await?;

    let temperature = state.temperature_for(&profile.city).await;
    let daily = targets::compute(&profile, temperature)?;
    let log = state.store.log(user_id, today).await;

    Ok(Json(LogFoodResponse {
        entry,
        calories_consumed: consumed,
        calorie_target: daily.calorie_kcal,
        calorie_balance: daily.calorie_kcal - log.net_consumed(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct LogWorkoutRequest {
    pub activity: Activity,
    pub minutes: u32,
}

#[derive(Debug, Serialize)]
pub struct LogWorkoutResponse {
    pub entry: WorkoutEntry,
    pub calories_burned_today: f64,
    /// Suggested extra water for this workout, on top of the daily target.
    pub extra_water_ml: u32,
}

pub async fn log_workout(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(body): Json<LogWorkoutRequest>,
) -> AppResult<Json<LogWorkoutResponse>> {
    load_profile(&state, user_id).await?;
    let today = Utc::now().date_naive();

    let (entry, burned_today) = state
        .store
        .update_log(user_id, today, |log| {
            let entry = progress::log_workout(log, body.activity, body.minutes)?;
            Ok((entry, log.calories_burned))
        })
        .await?;

    Ok(Json(LogWorkoutResponse {
        entry,
        calories_burned_today: burned_today,
        extra_water_ml: progress::workout_extra_water_ml(body.minutes),
    }))
}
