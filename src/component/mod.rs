pub mod chapter_thumbnailer;

pub use chapter_thumbnailer::ChapterThumbnailer;
