//! Video to animated GIF conversion through an external transcoder.
//!
//! Inputs the image decoders reject are handed to ffmpeg, which applies the
//! terminal palette (`paletteuse`) and writes a 10 fps GIF next to the input
//! as `<input>.temp.gif`. The temporary file is owned by a [`TempFile`]
//! guard and removed when the guard drops, whether or not transcoding
//! succeeded.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Suffix appended to the input path for the transcoded GIF.
pub const TEMP_SUFFIX: &str = ".temp.gif";

/// Errors from the transcoding step.
#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} error: exit with {}", exit_label(.code))]
    Failed { program: String, code: Option<i32> },

    #[error("Transcoding I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A tool that converts a video into an animated image file.
pub trait Transcoder {
    /// Human-readable name for logs and errors.
    fn name(&self) -> &str;

    /// Convert `input` into a GIF at `output`, mapped onto `palette_image`.
    fn transcode(&self, input: &Path, palette_image: &Path, output: &Path)
        -> Result<(), TranscodeError>;
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "signal".to_string(),
    }
}

/// The ffmpeg command-line transcoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ffmpeg {
    program: String,
    fps: u32,
}

impl Ffmpeg {
    pub const DEFAULT_FPS: u32 = 10;

    pub fn new(program: impl Into<String>, fps: u32) -> Self {
        Self {
            program: program.into(),
            fps,
        }
    }

    /// Build the ffmpeg invocation without running it.
    pub fn command(&self, input: &Path, palette_image: &Path, output: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("-i")
            .arg(input)
            .arg("-i")
            .arg(palette_image)
            .args(["-lavfi", "paletteuse", "-y", "-r"])
            .arg(self.fps.to_string())
            .arg("-hide_banner")
            .arg(output)
            .stdin(Stdio::null());
        command
    }
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self::new("ffmpeg", Self::DEFAULT_FPS)
    }
}

impl Transcoder for Ffmpeg {
    fn name(&self) -> &str {
        &self.program
    }

    fn transcode(
        &self,
        input: &Path,
        palette_image: &Path,
        output: &Path,
    ) -> Result<(), TranscodeError> {
        let mut child = self
            .command(input, palette_image, output)
            .spawn()
            .map_err(|source| TranscodeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let status = child.wait().map_err(|source| TranscodeError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(TranscodeError::Failed {
                program: self.program.clone(),
                code: status.code(),
            })
        }
    }
}

/// A file path that is deleted when the guard drops.
#[derive(Debug)]
pub struct TempFile {
    path: PathBuf,
}

impl TempFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "removed temporary file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "failed to remove temporary file: {}", e)
            }
        }
    }
}

fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Absolute `<input>.temp.gif` path for `input`.
pub fn temp_output_path(input: &Path) -> io::Result<PathBuf> {
    let mut name = OsString::from(absolute(input)?);
    name.push(TEMP_SUFFIX);
    Ok(PathBuf::from(name))
}

/// Transcode `input` into a temporary GIF.
///
/// On success the returned guard owns the GIF; on failure the partial output
/// is already gone.
pub fn transcode_to_image_sequence(
    input: &Path,
    palette_image: &Path,
    transcoder: &dyn Transcoder,
) -> Result<TempFile, TranscodeError> {
    let input = absolute(input)?;
    let output = TempFile::new(temp_output_path(&input)?);

    tracing::info!(
        transcoder = transcoder.name(),
        input = %input.display(),
        output = %output.path().display(),
        "converting video"
    );
    transcoder.transcode(&input, palette_image, output.path())?;
    Ok(output)
}
