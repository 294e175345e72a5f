use async_trait::async_trait;

pub mod nutrition;
pub mod translate;
pub mod weather;

pub use nutrition::{NutritionChain, OpenFoodFactsClient, UsdaClient};
pub use translate::MyMemoryClient;
pub use weather::OpenWeatherClient;

/// Failures at the remote-collaborator boundary. Always soft: callers degrade
/// rather than propagate these as hard errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("API key not configured")]
    MissingKey,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    BadResponse(String),
}

/// Boundary to a remote weather service. Unit is Celsius.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn temperature(&self, city: &str) -> Result<f64, ClientError>;
}

/// Boundary to a translation service.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, ClientError>;
}

/// The basis a remote nutrition source reported its calorie figure in.
///
/// Sources are required to say which one they used; a source that cannot is
/// treated as failed rather than assumed to mean per-100g.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalorieBasis {
    Per100g,
    PerServing { grams: f64 },
}

#[derive(Debug, Clone)]
pub struct RemoteFood {
    pub name: String,
    pub calories: f64,
    pub basis: CalorieBasis,
}

/// Boundary to a remote nutrition database.
///
/// `Ok(None)` means the source answered but had no matching item; `Err` means
/// the source itself failed.
#[async_trait]
pub trait NutritionLookup: Send + Sync {
    async fn lookup(&self, name: &str) -> Result<Option<RemoteFood>, ClientError>;
}
