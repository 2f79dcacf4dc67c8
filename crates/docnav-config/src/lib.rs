pub mod config;
pub mod error;
pub mod templates;

pub use config::{Config, NavigationSettings, TocSettings};
pub use error::ConfigError;
