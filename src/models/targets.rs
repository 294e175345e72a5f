use serde::{Deserialize, Serialize};

/// Daily goals derived from the profile and current conditions.
///
/// Never stored: recomputed on demand so a temperature change is picked up on
/// the next request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyTargets {
    pub water_ml: u32,
    pub calorie_kcal: f64,
}
