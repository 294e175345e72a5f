//! Free-text food name → calories-per-100g resolution.
//!
//! Ordered fallback chain: local dataset, then remote lookup with a translated
//! query. Each stage either resolves or reports why it passed; the driver
//! advances on a pass and stops at the first hit. Externally only hit/miss is
//! visible; a caller must never substitute a default calorie value.

use std::sync::Arc;

use serde::Serialize;

use crate::clients::{CalorieBasis, NutritionLookup, Translator};
use crate::services::dataset::FoodDataset;

/// Language the local dataset's remote counterparts expect queries in.
const REMOTE_QUERY_LANG: &str = "en";

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedFood {
    pub name: String,
    pub calories_per_100g: f64,
}

/// Outcome of a single resolution stage. A pass carries the reason for the
/// diagnostic log only; it never surfaces to callers.
enum StageOutcome {
    Resolved(ResolvedFood),
    Pass(&'static str),
}

pub struct FoodResolver {
    dataset: FoodDataset,
    translator: Arc<dyn Translator>,
    nutrition: Arc<dyn NutritionLookup>,
}

impl FoodResolver {
    pub fn new(
        dataset: FoodDataset,
        translator: Arc<dyn Translator>,
        nutrition: Arc<dyn NutritionLookup>,
    ) -> Self {
        Self {
            dataset,
            translator,
            nutrition,
        }
    }

    /// Resolve a user-supplied food name. Pure query, no side effects.
    pub async fn resolve(&self, raw: &str) -> Option<ResolvedFood> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        #[derive(Clone, Copy)]
        enum Stage {
            Local,
            Remote,
        }

        for stage in [Stage::Local, Stage::Remote] {
            let outcome = match stage {
                Stage::Local => self.try_local(&normalized),
                Stage::Remote => self.try_remote(raw).await,
            };
            match outcome {
                StageOutcome::Resolved(food) => {
                    tracing::debug!(query = raw, name = %food.name, kcal = food.calories_per_100g, "food resolved");
                    return Some(food);
                }
                StageOutcome::Pass(reason) => {
                    tracing::debug!(query = raw, reason, "resolution stage passed");
                }
            }
        }

        tracing::info!(query = raw, "food resolution exhausted");
        None
    }

    /// Stage 1: the local dataset. Exact case-insensitive match, then a
    /// containment pass over the dataset keys.
    fn try_local(&self, normalized: &str) -> StageOutcome {
        if let Some(kcal) = self.dataset.get(normalized) {
            return StageOutcome::Resolved(ResolvedFood {
                name: capitalize(normalized),
                calories_per_100g: kcal,
            });
        }
        if let Some((key, kcal)) = self.dataset.get_substring(normalized) {
            return StageOutcome::Resolved(ResolvedFood {
                name: capitalize(key),
                calories_per_100g: kcal,
            });
        }
        StageOutcome::Pass("local-miss")
    }

    /// Stage 2: the remote lookup, queried with a translated name. Translation
    /// failure is non-fatal; the remote is then asked with the original text.
    async fn try_remote(&self, raw: &str) -> StageOutcome {
        let query = self.translate_query(raw).await;

        match self.nutrition.lookup(&query).await {
            Ok(Some(remote)) => match per_100g(remote.calories, remote.basis) {
                Some(kcal) => StageOutcome::Resolved(ResolvedFood {
                    name: remote.name,
                    calories_per_100g: kcal,
                }),
                None => StageOutcome::Pass("remote-bad-unit"),
            },
            Ok(None) => StageOutcome::Pass("remote-no-match"),
            Err(e) => {
                tracing::warn!(error = %e, query = %query, "remote nutrition lookup failed");
                StageOutcome::Pass("remote-failure")
            }
        }
    }

    /// ASCII input is assumed to already be English and skips the translator.
    async fn translate_query(&self, raw: &str) -> String {
        if raw.is_ascii() {
            return raw.to_string();
        }
        match self.translator.translate(raw, REMOTE_QUERY_LANG).await {
            Ok(translated) => {
                tracing::debug!(from = raw, to = %translated, "query translated");
                translated
            }
            Err(e) => {
                tracing::warn!(error = %e, query = raw, "translation failed, using original name");
                raw.to_string()
            }
        }
    }
}

/// Normalize a remote calorie figure to kcal per 100 g. A per-serving figure
/// without a positive serving size has no defensible conversion.
fn per_100g(calories: f64, basis: CalorieBasis) -> Option<f64> {
    if calories <= 0.0 {
        return None;
    }
    match basis {
        CalorieBasis::Per100g => Some(calories),
        CalorieBasis::PerServing { grams } if grams > 0.0 => Some(calories / grams * 100.0),
        CalorieBasis::PerServing { .. } => None,
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
