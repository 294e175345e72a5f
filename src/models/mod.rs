pub mod daily_log;
pub mod profile;
pub mod targets;
