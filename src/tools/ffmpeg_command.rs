use crate::error::{ChapterError, Result};
use log::debug;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::Duration;

/// External transcoding tool used by the pipeline.
///
/// Kept narrow so parsing and the fan-out can be exercised without a real
/// ffmpeg binary.
pub trait Transcoder: Sync {
    /// Returns the ffmetadata document of `video`.
    fn extract_metadata(&self, video: &Path) -> Result<String>;

    /// Writes the single frame at `offset` to `destination`, overwriting it.
    fn extract_frame(&self, video: &Path, offset: Duration, destination: &Path) -> Result<()>;
}

/// One ffmpeg invocation, kept as plain arguments so the command line can be
/// reported on failure.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl FfmpegCommand {
    fn base(program: &Path) -> Self {
        Self {
            program: program.to_path_buf(),
            args: vec!["-hide_banner".into(), "-nostdin".into()],
        }
    }

    fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// `ffmpeg -i <video> -f ffmetadata pipe:1`
    #[must_use]
    pub fn metadata(program: &Path, video: &Path) -> Self {
        Self::base(program)
            .arg("-i")
            .arg(video)
            .arg("-f")
            .arg("ffmetadata")
            .arg("pipe:1")
    }

    /// `ffmpeg -ss <offset> -i <video> -y -frames:v 1 <destination>`
    #[must_use]
    pub fn frame(program: &Path, video: &Path, offset: Duration, destination: &Path) -> Self {
        Self::base(program)
            .arg("-ss")
            .arg(format!("{:.6}", offset.as_secs_f64()))
            .arg("-i")
            .arg(video)
            .arg("-y")
            .arg("-frames:v")
            .arg("1")
            .arg(destination)
    }

    #[must_use]
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Space separated command line, for error messages.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(|part| part.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[must_use]
    pub fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }

    /// Runs the command to completion, failing on spawn errors and on a
    /// non-zero exit status.
    pub fn run(&self) -> Result<Output> {
        debug!("running {}", self.command_line());

        let output = self
            .build_command()
            .output()
            .map_err(|source| ChapterError::Spawn {
                command: self.command_line(),
                source,
            })?;

        if !output.status.success() {
            return Err(ChapterError::CollaboratorFailure {
                command: self.command_line(),
                output: diagnostics(&output),
            });
        }

        Ok(output)
    }
}

/// Captured stdout followed by stderr, then the exit status.
fn diagnostics(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    format!("{}: {}", text.trim_end(), output.status)
}

/// `Transcoder` backed by an ffmpeg binary.
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    program: PathBuf,
}

impl Ffmpeg {
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl Transcoder for Ffmpeg {
    fn extract_metadata(&self, video: &Path) -> Result<String> {
        let command = FfmpegCommand::metadata(&self.program, video);
        let output = command.run()?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn extract_frame(&self, video: &Path, offset: Duration, destination: &Path) -> Result<()> {
        FfmpegCommand::frame(&self.program, video, offset, destination)
            .run()
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_of(command: &FfmpegCommand) -> Vec<String> {
        command
            .args()
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_metadata_command_writes_to_stdout() {
        let cmd = FfmpegCommand::metadata(Path::new("ffmpeg"), Path::new("/videos/a.mkv"));
        assert_eq!(
            args_of(&cmd),
            vec![
                "-hide_banner",
                "-nostdin",
                "-i",
                "/videos/a.mkv",
                "-f",
                "ffmetadata",
                "pipe:1"
            ]
        );
    }

    #[test]
    fn test_frame_command_seeks_before_input() {
        let cmd = FfmpegCommand::frame(
            Path::new("ffmpeg"),
            Path::new("/videos/a.mkv"),
            Duration::from_millis(2230),
            Path::new("/out/1.png"),
        );
        assert_eq!(
            args_of(&cmd),
            vec![
                "-hide_banner",
                "-nostdin",
                "-ss",
                "2.230000",
                "-i",
                "/videos/a.mkv",
                "-y",
                "-frames:v",
                "1",
                "/out/1.png"
            ]
        );
    }

    #[test]
    fn test_command_line_includes_program() {
        let cmd = FfmpegCommand::metadata(Path::new("/opt/ffmpeg"), Path::new("in.mp4"));
        assert_eq!(
            cmd.command_line(),
            "/opt/ffmpeg -hide_banner -nostdin -i in.mp4 -f ffmetadata pipe:1"
        );
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let ffmpeg = Ffmpeg::new("/nonexistent/definitely-not-ffmpeg");
        let err = ffmpeg.extract_metadata(Path::new("in.mp4")).unwrap_err();

        match err {
            ChapterError::Spawn { command, .. } => {
                assert!(command.starts_with("/nonexistent/definitely-not-ffmpeg "));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_binary_reports_command_and_output() {
        // `false` exits 1 and ignores its arguments
        let ffmpeg = Ffmpeg::new("false");
        let err = ffmpeg
            .extract_frame(Path::new("in.mp4"), Duration::ZERO, Path::new("out.png"))
            .unwrap_err();

        match err {
            ChapterError::CollaboratorFailure { command, output } => {
                assert!(command.contains("-frames:v 1 out.png"));
                assert!(output.contains("exit status: 1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
