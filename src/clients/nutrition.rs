use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{CalorieBasis, ClientError, NutritionLookup, RemoteFood};

const USDA_SEARCH_URL: &str = "https://api.nal.usda.gov/fdc/v1/foods/search";
const OFF_SEARCH_URL: &str = "https://world.openfoodfacts.org/cgi/search.pl";

// ── USDA FoodData Central ────────────────────────────────────────────────────

/// USDA FoodData Central search client. SR Legacy entries report energy in
/// kcal per 100 g.
pub struct UsdaClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsdaSearchResponse {
    #[serde(default)]
    foods: Vec<UsdaFood>,
}

#[derive(Debug, Deserialize)]
struct UsdaFood {
    description: String,
    #[serde(rename = "foodNutrients", default)]
    nutrients: Vec<UsdaNutrient>,
}

#[derive(Debug, Deserialize)]
struct UsdaNutrient {
    #[serde(rename = "nutrientName", default)]
    name: String,
    #[serde(rename = "unitName", default)]
    unit: String,
    #[serde(default)]
    value: f64,
}

impl UsdaClient {
    pub fn new(api_key: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_key })
    }

    /// Prefer a raw ("apple, raw") entry over prepared dishes, matching the
    /// intent of a plain food-name query.
    fn pick_best(foods: &[UsdaFood]) -> Option<&UsdaFood> {
        foods
            .iter()
            .find(|f| f.description.to_lowercase().contains("raw"))
            .or_else(|| foods.first())
    }

    fn energy_kcal(food: &UsdaFood) -> Option<f64> {
        food.nutrients
            .iter()
            .find(|n| {
                n.name.to_lowercase().contains("energy") && n.unit.to_lowercase().contains("kcal")
            })
            .map(|n| n.value)
    }
}

#[async_trait]
impl NutritionLookup for UsdaClient {
    async fn lookup(&self, name: &str) -> Result<Option<RemoteFood>, ClientError> {
        let key = self.api_key.as_deref().ok_or(ClientError::MissingKey)?;

        let response = self
            .client
            .get(USDA_SEARCH_URL)
            .query(&[
                ("api_key", key),
                ("query", name),
                ("dataType", "SR Legacy"),
                ("pageSize", "5"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::BadResponse(format!(
                "USDA API returned {}",
                response.status()
            )));
        }

        let body: UsdaSearchResponse = response.json().await?;
        let Some(best) = Self::pick_best(&body.foods) else {
            return Ok(None);
        };
        let Some(kcal) = Self::energy_kcal(best) else {
            return Ok(None);
        };

        Ok(Some(RemoteFood {
            name: best.description.clone(),
            calories: kcal,
            basis: CalorieBasis::Per100g,
        }))
    }
}

// ── Open Food Facts ──────────────────────────────────────────────────────────

/// Open Food Facts search client. No API key required.
pub struct OpenFoodFactsClient {
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct OffSearchResponse {
    #[serde(default)]
    products: Vec<OffProduct>,
}

#[derive(Debug, Deserialize)]
struct OffProduct {
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    nutriments: OffNutriments,
}

#[derive(Debug, Default, Deserialize)]
struct OffNutriments {
    #[serde(rename = "energy-kcal_100g")]
    kcal_per_100g: Option<f64>,
    #[serde(rename = "energy-kcal_serving")]
    kcal_per_serving: Option<f64>,
    serving_quantity: Option<f64>,
}

impl OpenFoodFactsClient {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Map a product to a remote food, keeping the basis the source reported.
    /// Products with no usable energy field are skipped.
    fn to_remote(product: &OffProduct, fallback_name: &str) -> Option<RemoteFood> {
        let name = product
            .product_name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| fallback_name.to_string());

        if let Some(kcal) = product.nutriments.kcal_per_100g.filter(|v| *v > 0.0) {
            return Some(RemoteFood {
                name,
                calories: kcal,
                basis: CalorieBasis::Per100g,
            });
        }

        let kcal = product.nutriments.kcal_per_serving.filter(|v| *v > 0.0)?;
        let grams = product.nutriments.serving_quantity.filter(|v| *v > 0.0)?;
        Some(RemoteFood {
            name,
            calories: kcal,
            basis: CalorieBasis::PerServing { grams },
        })
    }
}

#[async_trait]
impl NutritionLookup for OpenFoodFactsClient {
    async fn lookup(&self, name: &str) -> Result<Option<RemoteFood>, ClientError> {
        let response = self
            .client
            .get(OFF_SEARCH_URL)
            .query(&[
                ("action", "process"),
                ("search_terms", name),
                ("json", "true"),
                ("page_size", "5"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::BadResponse(format!(
                "Open Food Facts returned {}",
                response.status()
            )));
        }

        let body: OffSearchResponse = response.json().await?;
        Ok(body
            .products
            .iter()
            .find_map(|p| Self::to_remote(p, name)))
    }
}

// ── Chain ────────────────────────────────────────────────────────────────────

/// Asks each source in order and returns the first hit, so the resolver only
/// ever sees a single remote boundary.
pub struct NutritionChain {
    sources: Vec<Arc<dyn NutritionLookup>>,
}

impl NutritionChain {
    pub fn new(sources: Vec<Arc<dyn NutritionLookup>>) -> Self {
        Self { sources }
    }
}

#[async_trait]
impl NutritionLookup for NutritionChain {
    async fn lookup(&self, name: &str) -> Result<Option<RemoteFood>, ClientError> {
        let mut failures = 0;
        let mut last_err: Option<ClientError> = None;

        for source in &self.sources {
            match source.lookup(name).await {
                Ok(Some(food)) => return Ok(Some(food)),
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!(error = %e, query = name, "nutrition source failed, trying next");
                    failures += 1;
                    last_err = Some(e);
                }
            }
        }

        // Only report failure when no source managed to answer at all;
        // a definitive "no match" from any source wins over earlier errors.
        match last_err {
            Some(e) if failures == self.sources.len() => Err(e),
            _ => Ok(None),
        }
    }
}
