pub mod load;
pub mod types;

pub use types::{Config, DEFAULT_SETTINGS_FILE, UserSettings};
