use std::sync::Arc;
use std::time::Duration;

use fitbalance::clients::{
    MyMemoryClient, NutritionChain, NutritionLookup, OpenFoodFactsClient, OpenWeatherClient,
    UsdaClient,
};
use fitbalance::config::Config;
use fitbalance::services::dataset::FoodDataset;
use fitbalance::services::resolver::FoodResolver;
use fitbalance::store::MemoryStore;
use fitbalance::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fitbalance=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());
    let timeout = Duration::from_secs(config.http_timeout_secs);

    let dataset = FoodDataset::load(config.food_data_path.as_deref())?;
    tracing::info!(foods = dataset.len(), "local food dataset loaded");

    if config.openweather_api_key.is_none() {
        tracing::warn!("OPENWEATHER_API_KEY not set; water targets will carry no heat bonus");
    }
    if config.usda_api_key.is_none() {
        tracing::warn!("USDA_API_KEY not set; remote food lookup limited to Open Food Facts");
    }

    let weather = Arc::new(OpenWeatherClient::new(
        config.openweather_api_key.clone(),
        timeout,
    )?);
    let translator = Arc::new(MyMemoryClient::new(timeout)?);
    let nutrition = Arc::new(NutritionChain::new(vec![
        Arc::new(UsdaClient::new(config.usda_api_key.clone(), timeout)?) as Arc<dyn NutritionLookup>,
        Arc::new(OpenFoodFactsClient::new(timeout)?) as Arc<dyn NutritionLookup>,
    ]));
    let resolver = Arc::new(FoodResolver::new(dataset, translator, nutrition));

    let state = AppState {
        config: config.clone(),
        store: Arc::new(MemoryStore::new()),
        weather,
        resolver,
    };

    let app = build_router(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
