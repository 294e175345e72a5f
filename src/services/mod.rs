pub mod dataset;
pub mod progress;
pub mod resolver;
pub mod targets;
