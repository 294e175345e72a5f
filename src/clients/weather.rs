use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{ClientError, WeatherProvider};

const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// OpenWeatherMap current-conditions client.
pub struct OpenWeatherClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: WeatherMain,
}

#[derive(Debug, Deserialize)]
struct WeatherMain {
    temp: f64,
}

impl OpenWeatherClient {
    pub fn new(api_key: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_key })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn temperature(&self, city: &str) -> Result<f64, ClientError> {
        let key = self.api_key.as_deref().ok_or(ClientError::MissingKey)?;

        let response = self
            .client
            .get(OPENWEATHER_URL)
            .query(&[("q", city), ("appid", key), ("units", "metric")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::BadResponse(format!(
                "weather API returned {}",
                response.status()
            )));
        }

        let body: WeatherResponse = response.json().await?;
        Ok(body.main.temp)
    }
}
