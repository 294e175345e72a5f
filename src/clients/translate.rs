use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{ClientError, Translator};

const MYMEMORY_URL: &str = "https://api.mymemory.translated.net/get";

/// MyMemory translation client. Free tier, no API key.
pub struct MyMemoryClient {
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "responseData")]
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(rename = "translatedText")]
    translated: String,
}

impl MyMemoryClient {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Translator for MyMemoryClient {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, ClientError> {
        let langpair = format!("Autodetect|{target_lang}");
        let response = self
            .client
            .get(MYMEMORY_URL)
            .query(&[("q", text), ("langpair", &langpair)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::BadResponse(format!(
                "translation API returned {}",
                response.status()
            )));
        }

        let body: TranslateResponse = response.json().await?;
        let translated = body.data.translated.trim().to_string();
        if translated.is_empty() {
            return Err(ClientError::BadResponse("empty translation".into()));
        }
        Ok(translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_parses_translated_text() {
        let json = r#"{"responseData":{"translatedText":"banana","match":1.0},"responseStatus":200}"#;
        let parsed: TranslateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data.translated, "banana");
    }
}
