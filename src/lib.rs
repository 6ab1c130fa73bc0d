//! termimage - images, animations and videos as colored terminal blocks
//!
//! Pixels are mapped onto a small fixed palette of ANSI colors and drawn as
//! full block characters sized to the terminal.
//!
//! # Pipeline
//!
//! 1. [`decode`] reads still or animated images; [`video`] converts anything
//!    else through ffmpeg first
//! 2. [`quantize`] maps every pixel to a [`Palette`] index via a
//!    precomputed lookup cube
//! 3. [`render`] resizes the index grid to the terminal and produces the
//!    styled string
//! 4. [`sequence`] does this for every frame and records frame timing
//! 5. [`player`] prints the frames over time
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use termimage::{Ffmpeg, Loader, NullStatus, Palette, RenderSettings, Sequencer, TermSize};
//! use termimage::player::{Player, Repeat, ThreadPacer};
//!
//! # fn main() -> anyhow::Result<()> {
//! let sequencer = Sequencer::new(Palette::standard(), RenderSettings::new(TermSize::detect()));
//! let loader = Loader {
//!     sequencer: &sequencer,
//!     transcoder: &Ffmpeg::default(),
//!     palette_image: Path::new("palette.png"),
//! };
//! let image = loader.load(Path::new("cat.gif"), &mut NullStatus)?;
//! Player::new(std::io::stdout().lock(), ThreadPacer).play(&image, Repeat::Times(0))?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod decode;
pub mod load;
pub mod palette;
pub mod player;
pub mod quantize;
pub mod render;
pub mod sequence;
pub mod video;

pub use config::Config;
pub use decode::{try_decode_image, DecodeError, DecodedFrame, DecodedImage};
pub use load::{LoadError, Loader};
pub use palette::{Palette, PaletteEntry};
pub use quantize::{IndexGrid, Quantizer};
pub use render::{RenderOptions, RenderSettings, TermSize};
pub use sequence::{
    Interrupted, NullStatus, RenderedFrame, Sequencer, StatusSink, StderrStatus, TerminalImage,
};
pub use video::{Ffmpeg, TranscodeError, Transcoder};
