use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,

    // Remote collaborators. Keys are optional: a missing key turns the
    // corresponding client into a permanent soft failure and the core
    // degrades (no heat bonus, no remote food lookup).
    pub openweather_api_key: Option<String>,
    pub usda_api_key: Option<String>,

    pub http_timeout_secs: u64,

    // Optional override for the bundled food dataset.
    pub food_data_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a number"),

            openweather_api_key: env::var("OPENWEATHER_API_KEY")
                .ok()
                .filter(|s| !s.is_empty()),
            usda_api_key: env::var("USDA_API_KEY").ok().filter(|s| !s.is_empty()),

            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .unwrap_or(10),

            food_data_path: env::var("FOOD_DATA_PATH").ok().filter(|s| !s.is_empty()),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
