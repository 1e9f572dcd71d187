pub mod analytics;
pub mod sessions;
pub mod texts;
