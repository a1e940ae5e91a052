use anyhow::Result;
use chapter_thumbnails::component::ChapterThumbnailer;
use chapter_thumbnails::config::Config;
use chapter_thumbnails::init;
use chapter_thumbnails::signal::setup_shutdown_signal;
use chapter_thumbnails::tools::Ffmpeg;
use clap::Parser;
use console::style;
use log::{debug, info};
use std::path::PathBuf;
use std::process::ExitCode;

/// Writes one thumbnail per chapter of a video.
#[derive(Parser, Debug)]
#[command(name = "chapter-thumbnails", version)]
struct Cli {
    /// Thumbnail format [default: png]
    #[arg(short = 'f', value_name = "FORMAT")]
    format: Option<String>,

    /// Settings file [default: ./settings.json when present]
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Source video
    video: PathBuf,

    /// Output directory, created when missing
    out_dir: PathBuf,
}

fn main() -> ExitCode {
    // exits with status 2 on usage errors
    let cli = Cli::parse();
    init::init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("Program error: {e:?}");
            eprintln!("{} {:#}", style("error:").for_stderr().red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::new()?,
    };
    let format = cli
        .format
        .unwrap_or_else(|| config.settings.thumbnail_format.clone());

    let shutdown_signal = setup_shutdown_signal()?;
    let thumbnailer = ChapterThumbnailer::new(
        Ffmpeg::new(config.settings.ffmpeg_path.clone()),
        format,
        shutdown_signal,
    );

    let summary = thumbnailer.run(&cli.video, &cli.out_dir)?;
    info!(
        "done: {} chapters, {} thumbnails",
        summary.chapters.len(),
        summary.thumbnails.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_format_flag() {
        let cli = Cli::try_parse_from(["chapter-thumbnails", "-f", "jpg", "in.mkv", "out"]).unwrap();
        assert_eq!(cli.format.as_deref(), Some("jpg"));
        assert_eq!(cli.video, PathBuf::from("in.mkv"));
        assert_eq!(cli.out_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_wrong_positional_count_is_usage_error() {
        for args in [
            vec!["chapter-thumbnails"],
            vec!["chapter-thumbnails", "in.mkv"],
            vec!["chapter-thumbnails", "in.mkv", "out", "extra"],
        ] {
            let err = Cli::try_parse_from(args).unwrap_err();
            assert_ne!(err.kind(), ErrorKind::DisplayHelp);
            assert_eq!(err.exit_code(), 2);
        }
    }
}
