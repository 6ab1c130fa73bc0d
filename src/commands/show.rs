//! Show handler: load a file, render every frame, play it.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use termimage::cli::Cli;
use termimage::palette::{write_palette_image, PALETTE_FILE_NAME};
use termimage::player::{PlayError, Player, Repeat, ThreadPacer};
use termimage::{
    Config, LoadError, Loader, NullStatus, Palette, RenderSettings, Sequencer, StderrStatus,
    TermSize,
};

/// How playback ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Finished,
    Interrupted,
}

/// Display `cli.path` in the terminal.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(cli: &Cli) -> Result<Outcome> {
    let config = Config::load(cli.config.as_deref())?;

    // Installed before loading: rendering and ffmpeg runs stop on the
    // flag and unwind through the temporary file cleanup
    let stop = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&stop);
    ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst))
        .context("Failed to install Ctrl-C handler")?;

    let palette = Palette::standard();
    let palette_path = palette_image_path(cli, &config)?;
    write_palette_image(&palette, &palette_path)?;

    let mut settings = RenderSettings::new(TermSize::detect());
    settings.margin = cli.margin.unwrap_or(config.render.margin);
    settings.options.run_length = config.render.run_length;

    let sequencer = Sequencer::new(palette, settings)
        .with_default_duration(config.playback.default_frame_duration())
        .with_stop_flag(Arc::clone(&stop));
    let transcoder = config.video.transcoder();
    let loader = Loader {
        sequencer: &sequencer,
        transcoder: &transcoder,
        palette_image: &palette_path,
    };

    let loaded = if cli.quiet {
        loader.load(&cli.path, &mut NullStatus)
    } else {
        loader.load(&cli.path, &mut StderrStatus)
    };
    let image = match loaded {
        Err(LoadError::Interrupted(_)) => return Ok(Outcome::Interrupted),
        other => other.with_context(|| format!("Failed to display {}", cli.path.display()))?,
    };
    tracing::info!(
        frames = image.len(),
        chars = image.char_count(),
        "rendered {}",
        cli.path.display()
    );

    let repeat = Repeat::from_count(cli.repeat.unwrap_or(config.playback.repeat));
    let mut player = Player::new(io::stdout().lock(), ThreadPacer).with_stop_flag(stop);
    let result = if cli.still {
        player.show(&image, false, repeat)
    } else {
        player.play(&image, repeat)
    };

    match result {
        Ok(()) => Ok(Outcome::Finished),
        Err(PlayError::Interrupted) => Ok(Outcome::Interrupted),
        Err(e) => Err(e.into()),
    }
}

/// Palette image location: CLI flag, then config, then next to the executable.
fn palette_image_path(cli: &Cli, config: &Config) -> Result<PathBuf> {
    if let Some(path) = cli.palette.as_ref().or(config.video.palette_path.as_ref()) {
        return Ok(path.clone());
    }
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(PALETTE_FILE_NAME))
}
