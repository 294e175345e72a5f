use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::clients::WeatherProvider;
use crate::config::Config;
use crate::handlers;
use crate::services::resolver::FoodResolver;
use crate::store::MemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<MemoryStore>,
    pub weather: Arc<dyn WeatherProvider>,
    pub resolver: Arc<FoodResolver>,
}

impl AppState {
    /// Current temperature for a city, or `None` when the weather service
    /// fails. Target computation degrades rather than erroring out.
    pub async fn temperature_for(&self, city: &str) -> Option<f64> {
        match self.weather.temperature(city).await {
            Ok(temp) => Some(temp),
            Err(e) => {
                tracing::warn!(error = %e, city, "weather lookup failed, skipping heat bonus");
                None
            }
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/users/:id/profile",
            put(handlers::profile::set_profile).get(handlers::profile::get_profile),
        )
        .route("/api/users/:id/targets", get(handlers::profile::get_targets))
        .route("/api/users/:id/log/water", post(handlers::logs::log_water))
        .route("/api/users/:id/log/food", post(handlers::logs::log_food))
        .route(
            "/api/users/:id/log/workout",
            post(handlers::logs::log_workout),
        )
        .route(
            "/api/users/:id/progress",
            get(handlers::progress::get_progress),
        )
        .route(
            "/api/users/:id/recommendations",
            get(handlers::progress::get_recommendations),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
