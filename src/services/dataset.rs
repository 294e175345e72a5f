use std::collections::HashMap;

use anyhow::Context;

/// Food names bundled with the binary; used when no override path is set.
const BUNDLED_FOOD_DATA: &str = include_str!("../../data/food_data.json");

/// Static food-name → kcal-per-100g mapping.
///
/// Loaded once at startup and read-only afterwards. Keys are stored lowercase
/// so lookups are case-insensitive by construction.
pub struct FoodDataset {
    entries: HashMap<String, f64>,
}

impl FoodDataset {
    /// Load the dataset, from `path` when given, otherwise the bundled copy.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let raw = match path {
            Some(p) => {
                std::fs::read_to_string(p).with_context(|| format!("reading food data at {p}"))?
            }
            None => BUNDLED_FOOD_DATA.to_string(),
        };
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let parsed: HashMap<String, f64> =
            serde_json::from_str(raw).context("parsing food data")?;
        let entries = parsed
            .into_iter()
            .map(|(name, kcal)| (name.trim().to_lowercase(), kcal))
            .collect();
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact lookup on a normalized (trimmed, lowercased) name.
    pub fn get(&self, normalized: &str) -> Option<f64> {
        self.entries.get(normalized).copied()
    }

    /// Containment pass: a dataset key contained in the query ("green apple")
    /// or the query contained in a key ("chicken" → "chicken breast").
    pub fn get_substring(&self, normalized: &str) -> Option<(&str, f64)> {
        self.entries
            .iter()
            .filter(|(key, _)| key.contains(normalized) || normalized.contains(key.as_str()))
            // Deterministic pick: shortest key wins, then lexicographic.
            .min_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
            .map(|(key, kcal)| (key.as_str(), *kcal))
    }
}
