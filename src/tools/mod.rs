mod chapter_parser;
mod ffmpeg_command;
mod path_validator;

pub use chapter_parser::{CHAPTER_MARKER, Chapter, parse_chapters, parse_chapters_from_reader};
pub use ffmpeg_command::{Ffmpeg, FfmpegCommand, Transcoder};
pub use path_validator::ensure_directory_exists;
