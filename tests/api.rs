//! Router-level tests with fake remote collaborators.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use fitbalance::clients::{
    CalorieBasis, ClientError, NutritionLookup, RemoteFood, Translator, WeatherProvider,
};
use fitbalance::config::Config;
use fitbalance::services::dataset::FoodDataset;
use fitbalance::services::resolver::FoodResolver;
use fitbalance::store::MemoryStore;
use fitbalance::{build_router, AppState};

// ── fakes ────────────────────────────────────────────────────────────────────

struct FixedWeather(Option<f64>);

#[async_trait]
impl WeatherProvider for FixedWeather {
    async fn temperature(&self, _city: &str) -> Result<f64, ClientError> {
        self.0
            .ok_or_else(|| ClientError::BadResponse("weather down".into()))
    }
}

struct NoopTranslator;

#[async_trait]
impl Translator for NoopTranslator {
    async fn translate(&self, text: &str, _lang: &str) -> Result<String, ClientError> {
        Ok(text.to_string())
    }
}

struct StaticNutrition(Option<RemoteFood>);

#[async_trait]
impl NutritionLookup for StaticNutrition {
    async fn lookup(&self, _name: &str) -> Result<Option<RemoteFood>, ClientError> {
        Ok(self.0.clone())
    }
}

fn test_config() -> Config {
    // No env reads in tests; construct directly.
    Config {
        host: "127.0.0.1".into(),
        port: 0,
        openweather_api_key: None,
        usda_api_key: None,
        http_timeout_secs: 1,
        food_data_path: None,
    }
}

fn app_with(temperature: Option<f64>, remote: Option<RemoteFood>) -> Router {
    let dataset = FoodDataset::load(None).unwrap();
    let resolver = FoodResolver::new(
        dataset,
        Arc::new(NoopTranslator),
        Arc::new(StaticNutrition(remote)),
    );
    build_router(AppState {
        config: Arc::new(test_config()),
        store: Arc::new(MemoryStore::new()),
        weather: Arc::new(FixedWeather(temperature)),
        resolver: Arc::new(resolver),
    })
}

fn app() -> Router {
    app_with(Some(20.0), None)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json_body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json_body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn sample_profile() -> Value {
    json!({
        "weight_kg": 70.0,
        "height_cm": 175.0,
        "age": 30,
        "sex": "male",
        "activity_minutes": 60,
        "city": "Berlin"
    })
}

async fn set_up_profile(app: &Router) {
    let (status, _) = send(app, "PUT", "/api/users/1/profile", Some(sample_profile())).await;
    assert_eq!(status, StatusCode::OK);
}

// ── health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// ── profile & targets ────────────────────────────────────────────────────────

#[tokio::test]
async fn set_profile_returns_computed_targets() {
    let app = app();
    let (status, body) = send(&app, "PUT", "/api/users/1/profile", Some(sample_profile())).await;
    assert_eq!(status, StatusCode::OK);
    // 70 kg × 30 + two 30-min activity blocks, no heat bonus at 20°C.
    assert_eq!(body["targets"]["water_ml"], 3100);
    // Mifflin-St Jeor 1648.75 × 1.725 tier multiplier.
    let kcal = body["targets"]["calorie_kcal"].as_f64().unwrap();
    assert!((kcal - 2844.09375).abs() < 1e-6);
    assert_eq!(body["temperature_c"], 20.0);
}

#[tokio::test]
async fn hot_weather_raises_water_target() {
    let app = app_with(Some(31.0), None);
    let (_, body) = send(&app, "PUT", "/api/users/1/profile", Some(sample_profile())).await;
    assert_eq!(body["targets"]["water_ml"], 4100);
}

#[tokio::test]
async fn weather_outage_still_yields_targets() {
    let app = app_with(None, None);
    let (status, body) = send(&app, "PUT", "/api/users/1/profile", Some(sample_profile())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["targets"]["water_ml"], 3100);
    assert_eq!(body["temperature_c"], Value::Null);
}

#[tokio::test]
async fn invalid_profile_is_rejected() {
    let app = app();
    let mut profile = sample_profile();
    profile["weight_kg"] = json!(10.0);
    let (status, _) = send(&app, "PUT", "/api/users/1/profile", Some(profile)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn calorie_override_wins_over_formula() {
    let app = app();
    let mut profile = sample_profile();
    profile["calorie_goal_override"] = json!(2200.0);
    let (_, body) = send(&app, "PUT", "/api/users/1/profile", Some(profile)).await;
    assert_eq!(body["targets"]["calorie_kcal"], 2200.0);
}

#[tokio::test]
async fn profile_roundtrips() {
    let app = app();
    set_up_profile(&app).await;

    let (status, body) = send(&app, "GET", "/api/users/1/profile", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weight_kg"], 70.0);
    assert_eq!(body["sex"], "male");
    assert_eq!(body["city"], "Berlin");
}

#[tokio::test]
async fn targets_endpoint_recomputes_from_live_weather() {
    let app = app_with(Some(26.0), None);
    set_up_profile(&app).await;

    let (status, body) = send(&app, "GET", "/api/users/1/targets", None).await;
    assert_eq!(status, StatusCode::OK);
    // 2100 base + 1000 activity + 500 heat band (>25).
    assert_eq!(body["targets"]["water_ml"], 3600);
    assert_eq!(body["temperature_c"], 26.0);
}

#[tokio::test]
async fn missing_profile_is_404_with_hint() {
    let (status, body) = send(&app(), "GET", "/api/users/9/progress", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("profile"));
}

// ── water logging ────────────────────────────────────────────────────────────

#[tokio::test]
async fn water_log_reports_remaining() {
    let app = app();
    set_up_profile(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users/1/log/water",
        Some(json!({"amount_ml": 1500})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["logged_ml"], 1500);
    assert_eq!(body["water_remaining_ml"], 1600);
}

#[tokio::test]
async fn water_overshoot_clamps_remaining_to_zero() {
    let app = app();
    set_up_profile(&app).await;

    send(
        &app,
        "POST",
        "/api/users/1/log/water",
        Some(json!({"amount_ml": 3500})),
    )
    .await;
    let (_, body) = send(&app, "GET", "/api/users/1/progress", None).await;
    assert_eq!(body["water_remaining_ml"], 0);
    assert_eq!(body["water_over_ml"], 400);
}

#[tokio::test]
async fn zero_water_is_rejected() {
    let app = app();
    set_up_profile(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/users/1/log/water",
        Some(json!({"amount_ml": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

// ── food logging ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn food_from_local_dataset_is_logged() {
    let app = app();
    set_up_profile(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users/1/log/food",
        Some(json!({"name": "Apple", "quantity_g": 200.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entry"]["calories_per_100g"], 52.0);
    assert_eq!(body["entry"]["calories"], 104.0);
    assert_eq!(body["calories_consumed"], 104.0);
}

#[tokio::test]
async fn unknown_food_is_404() {
    let app = app();
    set_up_profile(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/users/1/log/food",
        Some(json!({"name": "plutonium sandwich", "quantity_g": 100.0})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn remote_hit_is_normalized_and_logged() {
    let app = app_with(
        Some(20.0),
        Some(RemoteFood {
            name: "Granola bar".into(),
            calories: 180.0,
            basis: CalorieBasis::PerServing { grams: 40.0 },
        }),
    );
    set_up_profile(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users/1/log/food",
        Some(json!({"name": "weird granola thing", "quantity_g": 100.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // 180 kcal per 40 g serving → 450 kcal per 100 g.
    assert_eq!(body["entry"]["calories_per_100g"], 450.0);
}

#[tokio::test]
async fn manual_calories_bypass_resolution() {
    // No remote source configured; the explicit value must be enough.
    let app = app();
    set_up_profile(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users/1/log/food",
        Some(json!({
            "name": "grandma's pie",
            "quantity_g": 150.0,
            "calories_per_100g": 320.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entry"]["calories"], 480.0);
}

// ── workout logging & net balance ────────────────────────────────────────────

#[tokio::test]
async fn workout_burn_and_extra_water() {
    let app = app();
    set_up_profile(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users/1/log/workout",
        Some(json!({"activity": "running", "minutes": 30})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entry"]["calories_burned"], 300.0);
    assert_eq!(body["extra_water_ml"], 200);
}

#[tokio::test]
async fn unknown_activity_is_rejected() {
    let app = app();
    set_up_profile(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/users/1/log/workout",
        Some(json!({"activity": "skydiving", "minutes": 30})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn progress_balance_offsets_burned_calories() {
    let app = app();
    set_up_profile(&app).await;

    // 800 kcal consumed, 300 kcal burned → net 500.
    send(
        &app,
        "POST",
        "/api/users/1/log/food",
        Some(json!({"name": "meal", "quantity_g": 200.0, "calories_per_100g": 400.0})),
    )
    .await;
    send(
        &app,
        "POST",
        "/api/users/1/log/workout",
        Some(json!({"activity": "walking", "minutes": 75})),
    )
    .await;

    let (_, body) = send(&app, "GET", "/api/users/1/progress", None).await;
    assert_eq!(body["net_consumed"], 500.0);
    let balance = body["calorie_balance"].as_f64().unwrap();
    assert!((balance - (2844.09375 - 500.0)).abs() < 1e-6);
}

#[tokio::test]
async fn progress_is_stable_between_reads() {
    let app = app();
    set_up_profile(&app).await;
    send(
        &app,
        "POST",
        "/api/users/1/log/water",
        Some(json!({"amount_ml": 700})),
    )
    .await;

    let (_, first) = send(&app, "GET", "/api/users/1/progress", None).await;
    let (_, second) = send(&app, "GET", "/api/users/1/progress", None).await;
    assert_eq!(first, second);
}

// ── recommendations ──────────────────────────────────────────────────────────

#[tokio::test]
async fn recommendations_cover_all_groups() {
    let app = app();
    set_up_profile(&app).await;

    let (status, body) = send(&app, "GET", "/api/users/1/recommendations", None).await;
    assert_eq!(status, StatusCode::OK);
    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 3);
    assert!(recs[0].as_str().unwrap().starts_with("Hydration:"));
    assert!(recs[1].as_str().unwrap().starts_with("Calories:"));
    assert!(recs[2].as_str().unwrap().starts_with("Activity:"));
}
