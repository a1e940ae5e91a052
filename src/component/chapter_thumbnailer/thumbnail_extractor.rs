use crate::error::{ChapterError, Result};
use crate::tools::{Chapter, Transcoder};
use log::{debug, error};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

pub const DEFAULT_THUMBNAIL_FORMAT: &str = "png";

/// One chapter thumbnail to extract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailTask {
    pub title: String,
    pub timestamp: Duration,
    pub output_path: PathBuf,
    pub index: usize,
}

/// Builds one task per chapter writing to `<output_dir>/<title>.<format>`.
///
/// Titles are used as-is: an empty title gives `.<format>` and path
/// separators in a title are kept.
#[must_use]
pub fn create_chapter_tasks(
    chapters: &[Chapter],
    output_dir: &Path,
    format: &str,
) -> Vec<ThumbnailTask> {
    chapters
        .iter()
        .enumerate()
        .map(|(index, chapter)| ThumbnailTask {
            title: chapter.title.clone(),
            timestamp: chapter.start,
            output_path: output_dir.join(format!("{}.{format}", chapter.title)),
            index,
        })
        .collect()
}

/// First failure reported by any worker; later ones are dropped.
#[derive(Debug, Default)]
struct FirstError(Mutex<Option<ChapterError>>);

impl FirstError {
    fn record(&self, e: ChapterError) {
        let mut slot = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = Some(e);
        }
    }

    #[cfg(test)]
    fn is_set(&self) -> bool {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    fn into_inner(self) -> Option<ChapterError> {
        self.0.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Runs every task at once, one worker per task.
///
/// Failures are logged as they happen and do not stop the other workers.
/// Returns once all workers have returned: the output paths in task order,
/// or the first error to have been observed.
///
/// The shutdown flag is checked before the pool is built and again as each
/// worker starts. Workers start right away, so a flag raised later than that
/// only affects workers still waiting for a thread; running extractions are
/// never interrupted.
pub fn extract_thumbnails_parallel<T>(
    transcoder: &T,
    video_path: &Path,
    tasks: &[ThumbnailTask],
    shutdown_signal: &AtomicBool,
) -> Result<Vec<PathBuf>>
where
    T: Transcoder + ?Sized,
{
    if tasks.is_empty() {
        return Ok(Vec::new());
    }
    if shutdown_signal.load(Ordering::SeqCst) {
        return Err(ChapterError::Cancelled);
    }

    let first_error = FirstError::default();
    fan_out(transcoder, video_path, tasks, shutdown_signal, &first_error)?;

    match first_error.into_inner() {
        Some(e) => Err(e),
        None => Ok(tasks.iter().map(|t| t.output_path.clone()).collect()),
    }
}

fn fan_out<T>(
    transcoder: &T,
    video_path: &Path,
    tasks: &[ThumbnailTask],
    shutdown_signal: &AtomicBool,
    first_error: &FirstError,
) -> Result<()>
where
    T: Transcoder + ?Sized,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(tasks.len())
        .thread_name(|i| format!("thumbnail-{i}"))
        .build()?;

    pool.scope(|scope| {
        for task in tasks {
            scope.spawn(move |_| {
                let Err(e) = extract_one(transcoder, video_path, task, shutdown_signal) else {
                    return;
                };
                error!("thumbnail [{}] {:?} failed: {e}", task.index, task.title);
                first_error.record(e);
            });
        }
    });

    Ok(())
}

fn extract_one<T>(
    transcoder: &T,
    video_path: &Path,
    task: &ThumbnailTask,
    shutdown_signal: &AtomicBool,
) -> Result<()>
where
    T: Transcoder + ?Sized,
{
    if shutdown_signal.load(Ordering::SeqCst) {
        return Err(ChapterError::Cancelled);
    }

    debug!(
        "thumbnail [{}] at {:.3}s -> {}",
        task.index,
        task.timestamp.as_secs_f64(),
        task.output_path.display()
    );
    transcoder.extract_frame(video_path, task.timestamp, &task.output_path)
}

/// Writes one thumbnail per chapter into `output_dir`, which must exist.
pub fn extract_chapter_thumbnails<T>(
    transcoder: &T,
    video_path: &Path,
    output_dir: &Path,
    format: &str,
    chapters: &[Chapter],
    shutdown_signal: &AtomicBool,
) -> Result<Vec<PathBuf>>
where
    T: Transcoder + ?Sized,
{
    let tasks = create_chapter_tasks(chapters, output_dir, format);
    extract_thumbnails_parallel(transcoder, video_path, &tasks, shutdown_signal)
}
