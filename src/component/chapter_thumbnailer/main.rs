use super::thumbnail_extractor::extract_chapter_thumbnails;
use crate::error::Result;
use crate::tools::{Chapter, Transcoder, ensure_directory_exists, parse_chapters};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// Outcome of a successful run
#[derive(Debug)]
pub struct RunSummary {
    pub chapters: Vec<Chapter>,
    pub thumbnails: Vec<PathBuf>,
}

/// Chapter thumbnail generator
///
/// 1. read ffmetadata from the video
/// 2. parse the `[CHAPTER]` sections
/// 3. create the output directory
/// 4. extract one frame per chapter in parallel
pub struct ChapterThumbnailer<T> {
    transcoder: T,
    format: String,
    shutdown_signal: Arc<AtomicBool>,
}

impl<T: Transcoder> ChapterThumbnailer<T> {
    pub fn new(transcoder: T, format: impl Into<String>, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            transcoder,
            format: format.into(),
            shutdown_signal,
        }
    }

    pub fn run(&self, video_path: &Path, output_dir: &Path) -> Result<RunSummary> {
        let metadata = self.transcoder.extract_metadata(video_path)?;
        let chapters = parse_chapters(&metadata)?;
        info!(
            "found {} chapters in {}",
            chapters.len(),
            video_path.display()
        );
        for chapter in &chapters {
            debug!(
                "chapter {:?}: {:.3}s - {:.3}s",
                chapter.title,
                chapter.start.as_secs_f64(),
                chapter.end.as_secs_f64()
            );
        }

        ensure_directory_exists(output_dir)?;

        let thumbnails = extract_chapter_thumbnails(
            &self.transcoder,
            video_path,
            output_dir,
            &self.format,
            &chapters,
            &self.shutdown_signal,
        )?;
        info!(
            "wrote {} thumbnails to {}",
            thumbnails.len(),
            output_dir.display()
        );

        Ok(RunSummary {
            chapters,
            thumbnails,
        })
    }
}
