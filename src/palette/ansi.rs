//! ANSI escape code conversion utilities.
//!
//! Converts palette display codes to the escape sequences written in front
//! of every styled block glyph.

/// Sequence that resets all styling back to the terminal default.
pub const RESET: &str = "\x1b[0m";

/// The eight basic ANSI foreground colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

/// Text intensity applied on top of the foreground color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intensity {
    Dim,
    Normal,
    Bright,
}

/// A terminal styling token: foreground color plus intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayCode {
    pub color: AnsiColor,
    pub intensity: Intensity,
}

impl DisplayCode {
    pub const fn new(color: AnsiColor, intensity: Intensity) -> Self {
        Self { color, intensity }
    }

    /// Append the full styling prefix (foreground, then intensity) to `buf`.
    pub fn push_prefix(&self, buf: &mut String) {
        push_fg(self.color, buf);
        push_intensity(self.intensity, buf);
    }

    /// The styling prefix as an owned string.
    pub fn prefix(&self) -> String {
        let mut buf = String::with_capacity(10);
        self.push_prefix(&mut buf);
        buf
    }
}

/// Append the foreground color escape code to the buffer.
pub fn push_fg(color: AnsiColor, buf: &mut String) {
    buf.push_str(match color {
        AnsiColor::Black => "\x1b[30m",
        AnsiColor::Red => "\x1b[31m",
        AnsiColor::Green => "\x1b[32m",
        AnsiColor::Yellow => "\x1b[33m",
        AnsiColor::Blue => "\x1b[34m",
        AnsiColor::Magenta => "\x1b[35m",
        AnsiColor::Cyan => "\x1b[36m",
        AnsiColor::White => "\x1b[37m",
    });
}

/// Append the intensity escape code to the buffer.
///
/// `Normal` is emitted explicitly (`ESC[22m`) so a previous dim or bright
/// glyph never leaks into the next one.
pub fn push_intensity(intensity: Intensity, buf: &mut String) {
    buf.push_str(match intensity {
        Intensity::Dim => "\x1b[2m",
        Intensity::Normal => "\x1b[22m",
        Intensity::Bright => "\x1b[1m",
    });
}
