//! Configuration file handling.
//!
//! Settings live in `<config dir>/termimage/config.toml`. Every field is
//! optional; a missing file means all defaults. Command-line flags override
//! whatever is loaded here.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::render::RenderSettings;
use crate::video::Ffmpeg;

/// Errors from loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderConfig,
    pub playback: PlaybackConfig,
    pub video: VideoConfig,
}

/// Output sizing and string generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Columns and rows left free at the terminal edge
    pub margin: u16,
    /// Skip repeated color codes for runs of one color
    pub run_length: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            margin: RenderSettings::DEFAULT_MARGIN,
            run_length: true,
        }
    }
}

/// Animation playback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Extra passes over an animation; negative loops forever
    pub repeat: i64,
    /// Duration of frames that carry no timing, in milliseconds
    pub default_frame_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            repeat: -1,
            default_frame_ms: 200,
        }
    }
}

impl PlaybackConfig {
    pub fn default_frame_duration(&self) -> Duration {
        Duration::from_millis(self.default_frame_ms)
    }
}

/// Video conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Transcoder executable
    pub ffmpeg: String,
    /// Output frame rate of the converted GIF
    pub fps: u32,
    /// Where to write the palette image (defaults to next to the executable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette_path: Option<PathBuf>,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            fps: Ffmpeg::DEFAULT_FPS,
            palette_path: None,
        }
    }
}

impl VideoConfig {
    pub fn transcoder(&self) -> Ffmpeg {
        Ffmpeg::new(self.ffmpeg.clone(), self.fps)
    }
}

impl Config {
    /// Default config file location, if the platform has a config directory.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("termimage").join("config.toml"))
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing file yields the defaults; an explicitly given path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::config_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Load from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
