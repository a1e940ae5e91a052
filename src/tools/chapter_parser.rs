use crate::error::{ChapterError, Result};
use std::io::Read;
use std::time::Duration;

/// ffmetadata section header that opens a chapter
pub const CHAPTER_MARKER: &str = "[CHAPTER]";

/// Rational multiplier converting ticks into seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Timebase {
    numerator: i64,
    denominator: i64,
}

impl Timebase {
    const fn is_known(self) -> bool {
        self.numerator != 0 && self.denominator != 0
    }

    /// `ticks * numerator / denominator` as a duration, `None` when the
    /// result is negative or not finite.
    fn to_duration(self, ticks: i64) -> Option<Duration> {
        let seconds = ticks as f64 * (self.numerator as f64 / self.denominator as f64);
        Duration::try_from_secs_f64(seconds).ok()
    }
}

/// One chapter marker read from an ffmetadata document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chapter {
    pub title: String,
    pub start: Duration,
    pub end: Duration,
    raw_start: i64,
    raw_end: i64,
    timebase: Timebase,
}

impl Chapter {
    #[must_use]
    pub fn new(title: impl Into<String>, start: Duration) -> Self {
        Self {
            title: title.into(),
            start,
            ..Self::default()
        }
    }

    /// Converts the raw tick fields into durations.
    ///
    /// A field is only computed while it is still zero, and only once the
    /// timebase and its tick count are both non-zero. A later `START=0` or a
    /// repeated `TIMEBASE` therefore never moves an already resolved start.
    fn resolve(&mut self) {
        if !self.timebase.is_known() {
            return;
        }
        if self.start.is_zero() && self.raw_start != 0 {
            if let Some(start) = self.timebase.to_duration(self.raw_start) {
                self.start = start;
            }
        }
        if self.end.is_zero() && self.raw_end != 0 {
            if let Some(end) = self.timebase.to_duration(self.raw_end) {
                self.end = end;
            }
        }
    }
}

/// Parses the `[CHAPTER]` sections of an ffmetadata document.
///
/// Lines before the first marker are ignored, as are `key=value` lines with
/// zero or several `=` and keys other than `TITLE`, `START`, `END` and
/// `TIMEBASE`. Only `[CHAPTER]` starts a section; every other line belongs
/// to the last chapter. A malformed number aborts the whole parse.
pub fn parse_chapters(text: &str) -> Result<Vec<Chapter>> {
    let mut chapters: Vec<Chapter> = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line == CHAPTER_MARKER {
            chapters.push(Chapter::default());
            continue;
        }
        let Some(chapter) = chapters.last_mut() else {
            continue;
        };

        let mut parts = line.split('=');
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            continue;
        };

        let malformed = || ChapterError::MalformedField {
            line_number: index + 1,
            line: line.to_string(),
        };

        match key.to_ascii_lowercase().as_str() {
            "title" => chapter.title = value.to_string(),
            "start" => chapter.raw_start = value.parse().map_err(|_| malformed())?,
            "end" => chapter.raw_end = value.parse().map_err(|_| malformed())?,
            "timebase" => chapter.timebase = parse_timebase(value).ok_or_else(malformed)?,
            _ => {}
        }
        chapter.resolve();
    }

    Ok(chapters)
}

/// Reads a whole ffmetadata document and parses it.
pub fn parse_chapters_from_reader(mut reader: impl Read) -> Result<Vec<Chapter>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_chapters(&text)
}

/// Parses `"N/D"`
fn parse_timebase(value: &str) -> Option<Timebase> {
    let (numerator, denominator) = value.split_once('/')?;
    if denominator.contains('/') {
        return None;
    }
    Some(Timebase {
        numerator: numerator.parse().ok()?,
        denominator: denominator.parse().ok()?,
    })
}
