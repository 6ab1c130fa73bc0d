//! Terminal dimensions and the drawable area derived from them.

/// Columns and rows used when the terminal size cannot be queried.
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Terminal size in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSize {
    pub cols: u16,
    pub rows: u16,
}

impl TermSize {
    /// Create a size, rejecting zero dimensions.
    pub fn new(cols: u16, rows: u16) -> Option<Self> {
        if cols == 0 || rows == 0 {
            return None;
        }
        Some(Self { cols, rows })
    }

    /// Query the controlling terminal, falling back to 80x24.
    pub fn detect() -> Self {
        match terminal_size::terminal_size() {
            Some((terminal_size::Width(cols), terminal_size::Height(rows))) => {
                Self::new(cols, rows).unwrap_or_else(Self::fallback)
            }
            None => {
                tracing::debug!("terminal size unavailable, using {:?}", FALLBACK_SIZE);
                Self::fallback()
            }
        }
    }

    fn fallback() -> Self {
        Self {
            cols: FALLBACK_SIZE.0,
            rows: FALLBACK_SIZE.1,
        }
    }

    /// Drawable area after removing `margin` cells from each dimension.
    ///
    /// The margin keeps the last column and row free so terminals do not
    /// wrap or scroll. Each dimension is clamped to at least one cell.
    pub fn drawable(&self, margin: u16) -> (u32, u32) {
        (
            self.cols.saturating_sub(margin).max(1) as u32,
            self.rows.saturating_sub(margin).max(1) as u32,
        )
    }
}

impl Default for TermSize {
    fn default() -> Self {
        Self::fallback()
    }
}
