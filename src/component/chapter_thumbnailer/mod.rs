//! Chapter thumbnail generation
//!
//! ffmetadata → chapters → one frame per chapter

mod main;
mod thumbnail_extractor;

pub use main::{ChapterThumbnailer, RunSummary};
pub use thumbnail_extractor::{
    DEFAULT_THUMBNAIL_FORMAT, ThumbnailTask, create_chapter_tasks, extract_chapter_thumbnails,
    extract_thumbnails_parallel,
};
