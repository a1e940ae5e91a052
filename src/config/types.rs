use crate::component::chapter_thumbnailer::DEFAULT_THUMBNAIL_FORMAT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings file looked up in the working directory when `--config` is absent
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Thumbnail extension, also selects the image encoder
    pub thumbnail_format: String,
    pub ffmpeg_path: PathBuf,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            thumbnail_format: DEFAULT_THUMBNAIL_FORMAT.to_string(),
            ffmpeg_path: PathBuf::from("ffmpeg"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub settings: UserSettings,
}
