//! Path to terminal image: decode directly, or transcode and decode.
//!
//! Resolution is a two-step policy. The input is first decoded as a still
//! or animated image. Only if that fails is it treated as a video and
//! converted to a temporary GIF, which is decoded and then removed.

use std::path::{Path, PathBuf};

use crate::decode::{try_decode_image, DecodeError};
use crate::sequence::{Interrupted, Sequencer, StatusSink, TerminalImage};
use crate::video::{transcode_to_image_sequence, TranscodeError, Transcoder};

/// Errors from loading a terminal image.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to convert {path} as a video: {source}")]
    Transcode {
        path: PathBuf,
        #[source]
        source: TranscodeError,
    },

    #[error("Failed to decode transcoded {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error(transparent)]
    Interrupted(#[from] Interrupted),
}

/// Status notice shown before a video is handed to the transcoder.
pub const TRANSCODE_NOTICE: &str = "Start converting video into gif";

/// Everything needed to turn a path into a terminal image.
pub struct Loader<'a> {
    pub sequencer: &'a Sequencer,
    pub transcoder: &'a dyn Transcoder,
    /// Palette image handed to the transcoder
    pub palette_image: &'a Path,
}

impl Loader<'_> {
    /// Load and render `path`.
    pub fn load(&self, path: &Path, status: &mut dyn StatusSink) -> Result<TerminalImage, LoadError> {
        let decoded = match try_decode_image(path) {
            Ok(decoded) => decoded,
            Err(err) => {
                tracing::info!(path = %path.display(), "not an image ({}), trying video", err);
                return self.load_video(path, status);
            }
        };
        Ok(self.sequencer.sequence(&decoded, status)?)
    }

    /// The temporary GIF is removed when `temp` drops, on every path out.
    ///
    /// A transcoder failure after the stop flag was raised is reported as
    /// [`LoadError::Interrupted`].
    fn load_video(&self, path: &Path, status: &mut dyn StatusSink) -> Result<TerminalImage, LoadError> {
        if self.sequencer.is_stopped() {
            return Err(Interrupted.into());
        }
        status.notice(TRANSCODE_NOTICE);

        let temp = match transcode_to_image_sequence(path, self.palette_image, self.transcoder) {
            Ok(temp) => temp,
            Err(_) if self.sequencer.is_stopped() => return Err(Interrupted.into()),
            Err(source) => {
                return Err(LoadError::Transcode {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let decoded = try_decode_image(temp.path()).map_err(|source| LoadError::Decode {
            path: temp.path().to_path_buf(),
            source,
        })?;
        Ok(self.sequencer.sequence(&decoded, status)?)
    }
}
