use crate::seven_seg::HighScoreDisplay;
use crate::{Buttons, FrameBuffer, Switches};
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("device I/O failed")]
    Io(#[from] io::Error),

    #[error("display too small: {cols}x{rows} cells, need at least {min_cols}x{min_rows}")]
    TooSmall {
        cols: u16,
        rows: u16,
        min_cols: u16,
        min_rows: u16,
    },
}

/// The hardware behind the game: button and switch banks, the visible
/// framebuffer and the seven-segment displays.
pub trait Device {
    /// Sample both input banks once for the coming tick.
    fn poll(&mut self) -> Result<(Buttons, Switches), DeviceError>;

    /// Show a fully composed frame.
    fn present(&mut self, frame: &FrameBuffer) -> Result<(), DeviceError>;

    fn show_high_scores(&mut self, display: HighScoreDisplay) -> Result<(), DeviceError>;
}
