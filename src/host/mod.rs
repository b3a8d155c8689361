// Host interfaces - displays, overlay rendering, OS pointer primitives and
// user feedback. The grid core never talks to the OS directly.

pub mod recording;
#[cfg(windows)]
pub mod windows;

use crate::errors::GridResult;
use crate::geometry::Rect;
use crate::grid::Cell;
use crate::pointer::{Modifier, MouseButton, PointerState};
use log::{debug, warn};

pub use recording::{PointerAction, RecordingPointer};

/// Source of the usable area of each physical screen
pub trait DisplaySource {
    /// Displays in host order; the order decides label assignment
    fn enumerate_displays(&self) -> GridResult<Vec<Rect>>;
}

/// Draws the grid overlay
pub trait OverlayRenderer {
    /// Called once when a session starts, before the first redraw
    fn open(&mut self, _displays: &[Rect]) -> GridResult<()> {
        Ok(())
    }

    /// Repaint with the current cells; an empty slice clears the overlay
    fn request_redraw(&mut self, cells: &[Cell], pointer: PointerState) -> GridResult<()>;

    /// Called when the session exits
    fn close(&mut self) {}
}

/// OS pointer and keyboard primitives
pub trait PointerBackend {
    fn move_pointer(&mut self, x: f64, y: f64) -> GridResult<()>;
    fn click(&mut self, button: MouseButton) -> GridResult<()>;
    /// Press the primary button and keep it held
    fn start_drag(&mut self) -> GridResult<()>;
    fn release_button(&mut self, button: MouseButton) -> GridResult<()>;
    fn key_down(&mut self, modifier: Modifier) -> GridResult<()>;
    fn key_up(&mut self, modifier: Modifier) -> GridResult<()>;
}

/// User-facing cue for rejected input
pub trait Feedback {
    fn signal_invalid(&mut self);
}

/// Fixed list of displays
#[derive(Debug, Clone, Default)]
pub struct StaticDisplays {
    displays: Vec<Rect>,
}

impl StaticDisplays {
    pub fn new(displays: Vec<Rect>) -> Self {
        Self { displays }
    }
}

impl DisplaySource for StaticDisplays {
    fn enumerate_displays(&self) -> GridResult<Vec<Rect>> {
        Ok(self.displays.clone())
    }
}

/// Renderer that only logs
#[derive(Debug, Default)]
pub struct NoopRenderer;

impl OverlayRenderer for NoopRenderer {
    fn request_redraw(&mut self, cells: &[Cell], pointer: PointerState) -> GridResult<()> {
        debug!("Redraw requested: {} cells, pointer {:?}", cells.len(), pointer);
        Ok(())
    }
}

/// Feedback that writes a warning to the log
#[derive(Debug, Default)]
pub struct LogFeedback;

impl Feedback for LogFeedback {
    fn signal_invalid(&mut self) {
        warn!("⚠️ Invalid grid key");
    }
}
