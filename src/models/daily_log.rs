use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed set of supported workout types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    Running,
    Walking,
    Swimming,
    Cycling,
    Yoga,
    Strength,
    Cardio,
    Dancing,
    Soccer,
    Basketball,
    Tennis,
}

impl Activity {
    /// Calorie burn rate in kcal per minute. The single source of truth for
    /// workout energy expenditure.
    pub fn kcal_per_minute(self) -> f64 {
        match self {
            Activity::Running => 10.0,
            Activity::Walking => 4.0,
            Activity::Swimming => 8.0,
            Activity::Cycling => 7.0,
            Activity::Yoga => 3.0,
            Activity::Strength => 6.0,
            Activity::Cardio => 8.0,
            Activity::Dancing => 6.0,
            Activity::Soccer => 9.0,
            Activity::Basketball => 8.0,
            Activity::Tennis => 7.0,
        }
    }

    pub const ALL: [Activity; 11] = [
        Activity::Running,
        Activity::Walking,
        Activity::Swimming,
        Activity::Cycling,
        Activity::Yoga,
        Activity::Strength,
        Activity::Cardio,
        Activity::Dancing,
        Activity::Soccer,
        Activity::Basketball,
        Activity::Tennis,
    ];
}

/// A single resolved food item logged for the day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodEntry {
    pub name: String,
    pub calories_per_100g: f64,
    pub quantity_g: f64,
    /// kcal contributed by this entry: quantity_g × calories_per_100g / 100.
    pub calories: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub activity: Activity,
    pub minutes: u32,
    pub calories_burned: f64,
}

/// One user's intake and activity for a single day.
///
/// Owned by the (user_id, date) pair; day rollover is purely a matter of the
/// store key. All running sums only ever grow within a day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLog {
    pub user_id: i64,
    pub date: NaiveDate,
    pub water_ml: u32,
    pub calories_consumed: f64,
    pub calories_burned: f64,
    pub foods: Vec<FoodEntry>,
    pub workouts: Vec<WorkoutEntry>,
}

impl DailyLog {
    pub fn new(user_id: i64, date: NaiveDate) -> Self {
        Self {
            user_id,
            date,
            water_ml: 0,
            calories_consumed: 0.0,
            calories_burned: 0.0,
            foods: Vec::new(),
            workouts: Vec::new(),
        }
    }

    /// Calories consumed net of workout burn.
    pub fn net_consumed(&self) -> f64 {
        self.calories_consumed - self.calories_burned
    }
}
