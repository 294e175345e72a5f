pub mod health;
pub mod logs;
pub mod profile;
pub mod progress;
