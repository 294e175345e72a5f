use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// A user's profile. Replaced wholesale on setup; there is no partial update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: i64,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    pub sex: Sex,
    /// Minutes of physical activity per day.
    pub activity_minutes: u32,
    /// City used for the weather lookup.
    pub city: String,
    /// Explicit calorie goal, replacing the computed target when set.
    pub calorie_goal_override: Option<f64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SetProfileRequest {
    #[validate(range(min = 20.0, max = 300.0, message = "weight_kg must be 20-300"))]
    pub weight_kg: f64,
    #[validate(range(min = 100.0, max = 250.0, message = "height_cm must be 100-250"))]
    pub height_cm: f64,
    #[validate(range(min = 10, max = 120, message = "age must be 10-120"))]
    pub age: u32,
    pub sex: Sex,
    #[validate(range(max = 480, message = "activity_minutes must be 0-480"))]
    pub activity_minutes: u32,
    #[validate(length(min = 1, message = "city must be non-empty"))]
    pub city: String,
    #[validate(range(
        min = 1000.0,
        max = 5000.0,
        message = "calorie_goal_override must be 1000-5000"
    ))]
    pub calorie_goal_override: Option<f64>,
}

impl SetProfileRequest {
    pub fn into_profile(self, user_id: i64) -> UserProfile {
        UserProfile {
            user_id,
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            age: self.age,
            sex: self.sex,
            activity_minutes: self.activity_minutes,
            city: self.city,
            calorie_goal_override: self.calorie_goal_override,
        }
    }
}
