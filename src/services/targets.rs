//! Daily water and calorie target computation.

use crate::error::{AppError, AppResult};
use crate::models::profile::{Sex, UserProfile};
use crate::models::targets::DailyTargets;

/// Millilitres of water per kilogram of body mass.
const WATER_PER_KG_ML: f64 = 30.0;

/// Water bonus granted per full block of daily activity.
const ACTIVITY_BLOCK_MIN: u32 = 30;
const ACTIVITY_BLOCK_BONUS_ML: u32 = 500;

/// Heat bonus bands, hottest first; first match wins. Strictly-greater
/// comparison, so 25.0 and 30.0 land in the band below.
const HEAT_BONUS_ML: [(f64, u32); 2] = [(30.0, 1000), (25.0, 500)];

/// Activity multiplier tiers on daily activity minutes: (exclusive upper
/// bound, multiplier), evaluated top to bottom, first match wins.
const ACTIVITY_TIERS: [(u32, f64); 5] = [
    (15, 1.2),
    (30, 1.375),
    (60, 1.55),
    (90, 1.725),
    (u32::MAX, 1.9),
];

/// Mifflin–St Jeor sex offsets.
const MALE_OFFSET: f64 = 5.0;
const FEMALE_OFFSET: f64 = -161.0;

/// Daily water target in ml.
///
/// `temperature` is the current temperature in the user's city; `None` (the
/// weather service failed) simply skips the heat bonus; a water target is
/// never unavailable because of weather.
pub fn water_target(profile: &UserProfile, temperature: Option<f64>) -> u32 {
    let base = (profile.weight_kg * WATER_PER_KG_ML) as u32;
    let activity_bonus = (profile.activity_minutes / ACTIVITY_BLOCK_MIN) * ACTIVITY_BLOCK_BONUS_ML;
    let heat_bonus = temperature.map_or(0, |temp| {
        HEAT_BONUS_ML
            .iter()
            .find(|(threshold, _)| temp > *threshold)
            .map_or(0, |(_, bonus)| *bonus)
    });
    base + activity_bonus + heat_bonus
}

/// Mifflin–St Jeor basal metabolic rate.
pub fn bmr(profile: &UserProfile) -> f64 {
    let sex_offset = match profile.sex {
        Sex::Male => MALE_OFFSET,
        Sex::Female => FEMALE_OFFSET,
    };
    10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * f64::from(profile.age) + sex_offset
}

/// Daily calorie target: BMR scaled by the activity tier multiplier, never
/// below BMR itself.
pub fn calorie_target(profile: &UserProfile) -> f64 {
    let multiplier = ACTIVITY_TIERS
        .iter()
        .find(|(upper, _)| profile.activity_minutes < *upper)
        .map_or(1.2, |(_, m)| *m);
    let base = bmr(profile);
    (base * multiplier).max(base)
}

/// Compute both daily targets for a profile.
///
/// Rejects physiologically impossible profiles before any formula runs. When
/// the profile carries an explicit calorie goal, it replaces the computed one.
pub fn compute(profile: &UserProfile, temperature: Option<f64>) -> AppResult<DailyTargets> {
    if profile.weight_kg <= 0.0 {
        return Err(AppError::Validation("weight_kg must be positive".into()));
    }
    if profile.height_cm <= 0.0 {
        return Err(AppError::Validation("height_cm must be positive".into()));
    }
    if profile.age == 0 {
        return Err(AppError::Validation("age must be positive".into()));
    }

    let calorie_kcal = profile
        .calorie_goal_override
        .unwrap_or_else(|| calorie_target(profile));

    Ok(DailyTargets {
        water_ml: water_target(profile, temperature),
        calorie_kcal,
    })
}
