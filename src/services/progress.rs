//! Running-total tracking against daily targets, and the recommendation rules.

use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::models::daily_log::{Activity, DailyLog, FoodEntry, WorkoutEntry};
use crate::models::targets::DailyTargets;

// Accepted input ranges for a single log entry.
const WATER_MAX_ML: u32 = 5000;
const FOOD_MAX_G: f64 = 5000.0;
const WORKOUT_MAX_MIN: u32 = 480;

/// Extra water suggested per full half hour of a workout. Advice only; the
/// stored water target is not changed.
const WORKOUT_WATER_BLOCK_MIN: u32 = 30;
const WORKOUT_WATER_BONUS_ML: u32 = 200;

// Recommendation thresholds.
const WATER_LOW_PCT: f64 = 30.0;
const WATER_MID_PCT: f64 = 60.0;
const CALORIE_OVER_FACTOR: f64 = 1.2;
const CALORIE_PLENTY_FACTOR: f64 = 0.4;
const BURN_LIGHT_KCAL: f64 = 200.0;

/// Add water to the day's running total. Either fully applies or rejects.
pub fn log_water(log: &mut DailyLog, amount_ml: u32) -> AppResult<()> {
    if amount_ml == 0 || amount_ml > WATER_MAX_ML {
        return Err(AppError::Validation(format!(
            "amount_ml must be 1-{WATER_MAX_ML}"
        )));
    }
    log.water_ml += amount_ml;
    Ok(())
}

/// Log a resolved food item and add its calories to the day's running total.
pub fn log_food(
    log: &mut DailyLog,
    name: String,
    calories_per_100g: f64,
    quantity_g: f64,
) -> AppResult<FoodEntry> {
    if !(1.0..=FOOD_MAX_G).contains(&quantity_g) {
        return Err(AppError::Validation(format!(
            "quantity_g must be 1-{FOOD_MAX_G}"
        )));
    }
    if calories_per_100g <= 0.0 {
        return Err(AppError::Validation(
            "calories_per_100g must be positive".into(),
        ));
    }

    let calories = quantity_g * calories_per_100g / 100.0;
    let entry = FoodEntry {
        name,
        calories_per_100g,
        quantity_g,
        calories,
    };
    log.calories_consumed += calories;
    log.foods.push(entry.clone());
    Ok(entry)
}

/// Log a workout; burned calories are burn-rate × minutes and offset consumed
/// calories in net progress.
pub fn log_workout(log: &mut DailyLog, activity: Activity, minutes: u32) -> AppResult<WorkoutEntry> {
    if minutes == 0 || minutes > WORKOUT_MAX_MIN {
        return Err(AppError::Validation(format!(
            "minutes must be 1-{WORKOUT_MAX_MIN}"
        )));
    }

    let calories_burned = activity.kcal_per_minute() * f64::from(minutes);
    let entry = WorkoutEntry {
        activity,
        minutes,
        calories_burned,
    };
    log.calories_burned += calories_burned;
    log.workouts.push(entry.clone());
    Ok(entry)
}

/// Water to drink on top of the target after a workout.
pub fn workout_extra_water_ml(minutes: u32) -> u32 {
    (minutes / WORKOUT_WATER_BLOCK_MIN) * WORKOUT_WATER_BONUS_ML
}

/// Consumed-vs-target snapshot for one day. Pure function of (log, targets):
/// recomputing without an intervening log change gives an identical result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progress {
    pub water_target_ml: u32,
    pub water_logged_ml: u32,
    /// Never negative; overshoot is reported in `water_over_ml`.
    pub water_remaining_ml: u32,
    pub water_over_ml: u32,
    /// Percent of the water target reached, capped at 100.
    pub water_pct: f64,

    pub calorie_target: f64,
    pub calories_consumed: f64,
    pub calories_burned: f64,
    /// consumed − burned.
    pub net_consumed: f64,
    /// target − net_consumed; positive means under target.
    pub calorie_balance: f64,
    /// Percent of the calorie target reached by net consumption, capped at 100.
    pub calorie_pct: f64,
}

pub fn progress(log: &DailyLog, targets: &DailyTargets) -> Progress {
    let water_remaining_ml = targets.water_ml.saturating_sub(log.water_ml);
    let water_over_ml = log.water_ml.saturating_sub(targets.water_ml);
    let water_pct = if targets.water_ml > 0 {
        (f64::from(log.water_ml) / f64::from(targets.water_ml) * 100.0).min(100.0)
    } else {
        0.0
    };

    let net_consumed = log.net_consumed();
    let calorie_pct = if targets.calorie_kcal > 0.0 {
        (net_consumed / targets.calorie_kcal * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    Progress {
        water_target_ml: targets.water_ml,
        water_logged_ml: log.water_ml,
        water_remaining_ml,
        water_over_ml,
        water_pct,
        calorie_target: targets.calorie_kcal,
        calories_consumed: log.calories_consumed,
        calories_burned: log.calories_burned,
        net_consumed,
        calorie_balance: targets.calorie_kcal - net_consumed,
        calorie_pct,
    }
}

/// Recommendations from fixed threshold rules.
///
/// Three rule groups (hydration, calories, activity) evaluated in that
/// order; within a group the first matching band wins, and every group emits
/// its line, so the output always has three entries in a stable order.
pub fn recommend(p: &Progress) -> Vec<String> {
    let mut recs = Vec::with_capacity(3);

    recs.push(if p.water_pct < WATER_LOW_PCT {
        format!(
            "Hydration: only {:.0}% of your target so far. Have a glass of water now.",
            p.water_pct
        )
    } else if p.water_pct < WATER_MID_PCT {
        "Hydration: decent progress, keep drinking regularly.".to_string()
    } else {
        "Hydration: great job, you are on track.".to_string()
    });

    recs.push(if p.net_consumed > p.calorie_target * CALORIE_OVER_FACTOR {
        "Calories: well over target. Consider a 30-minute walk (~120 kcal) and a light dinner."
            .to_string()
    } else if p.calorie_balance > p.calorie_target * CALORIE_PLENTY_FACTOR {
        "Calories: plenty of budget left. Good options: cottage cheese 150 g (~150 kcal), \
         two eggs (~140 kcal), chicken breast 150 g (~165 kcal)."
            .to_string()
    } else if p.calorie_balance > 0.0 {
        "Calories: a little room left. Light snacks: an apple (~50 kcal), a cucumber (~15 kcal), \
         yogurt 100 g (~60 kcal)."
            .to_string()
    } else {
        "Calories: daily target reached.".to_string()
    });

    recs.push(if p.calories_burned == 0.0 {
        "Activity: nothing logged today. Try a 20-minute walk (~80 kcal) or 15 minutes of yoga \
         (~45 kcal)."
            .to_string()
    } else if p.calories_burned < BURN_LIGHT_KCAL {
        "Activity: good start. 15 minutes of cardio (~120 kcal) would round the day off."
            .to_string()
    } else {
        "Activity: excellent work today.".to_string()
    });

    recs
}
