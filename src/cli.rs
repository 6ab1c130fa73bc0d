//! Command-line interface definition.
//!
//! Lives in the library so the man page generator in `xtask` can reuse it.

use std::path::PathBuf;

use clap::Parser;

/// Version string with build metadata.
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("TERMIMAGE_BUILD_DATE"),
    ")"
);

/// Version string with build metadata.
#[cfg(feature = "release")]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("TERMIMAGE_BUILD_DATE"),
    ")"
);

/// Render an image, animated GIF or video as colored blocks in the terminal.
#[derive(Debug, Parser)]
#[command(name = "termimage", version = VERSION, about)]
pub struct Cli {
    /// Image or video file to display
    pub path: PathBuf,

    /// Extra passes over an animation; -1 loops until Ctrl-C
    #[arg(short, long, allow_negative_numbers = true, value_name = "N")]
    pub repeat: Option<i64>,

    /// Show only the first frame, even for animations
    #[arg(long)]
    pub still: bool,

    /// Cells to leave free at the right and bottom edge
    #[arg(long, value_name = "CELLS")]
    pub margin: Option<u16>,

    /// Write the palette image here instead of next to the executable
    #[arg(long, value_name = "FILE")]
    pub palette: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Don't print per-frame progress while rendering
    #[arg(short, long)]
    pub quiet: bool,
}
