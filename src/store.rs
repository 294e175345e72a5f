//! In-memory key-value store standing at the persistence boundary.
//!
//! Profiles are keyed by user id, logs by (user id, date); day rollover is
//! nothing more than a new key. The write lock serializes mutation per call,
//! and log updates are applied to a copy and written back only on success, so
//! a rejected entry leaves no partial state behind.

use std::collections::HashMap;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::error::AppResult;
use crate::models::daily_log::DailyLog;
use crate::models::profile::UserProfile;

#[derive(Default)]
pub struct MemoryStore {
    profiles: RwLock<HashMap<i64, UserProfile>>,
    logs: RwLock<HashMap<(i64, NaiveDate), DailyLog>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn profile(&self, user_id: i64) -> Option<UserProfile> {
        self.profiles.read().await.get(&user_id).cloned()
    }

    /// Full replacement; profiles have no partial update.
    pub async fn put_profile(&self, profile: UserProfile) {
        self.profiles
            .write()
            .await
            .insert(profile.user_id, profile);
    }

    pub async fn log(&self, user_id: i64, date: NaiveDate) -> DailyLog {
        self.logs
            .read()
            .await
            .get(&(user_id, date))
            .cloned()
            .unwrap_or_else(|| DailyLog::new(user_id, date))
    }

    /// Apply `mutate` to the day's log, persisting only when it succeeds.
    pub async fn update_log<T>(
        &self,
        user_id: i64,
        date: NaiveDate,
        mutate: impl FnOnce(&mut DailyLog) -> AppResult<T>,
    ) -> AppResult<T> {
        let mut logs = self.logs.write().await;
        let mut log = logs
            .get(&(user_id, date))
            .cloned()
            .unwrap_or_else(|| DailyLog::new(user_id, date));
        let result = mutate(&mut log)?;
        logs.insert((user_id, date), log);
        Ok(result)
    }
}
