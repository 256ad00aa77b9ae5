//! Configuration for postlist

pub mod defaults;
pub mod settings;

pub use settings::AppConfig;
