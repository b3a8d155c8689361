// Keyboard-driven pointer targeting: label the screen with a grid of cells,
// narrow by typing label prefixes, refine inside the chosen cell and move or
// click the pointer there.

pub mod config;
pub mod errors;
pub mod geometry;
pub mod grid;
pub mod host;
pub mod labels;
pub mod overlay;
pub mod pointer;
pub mod session;

pub use config::{GridConfig, MouseGridConfig, OverlayConfig, PointerConfig, RefineConfig};
pub use errors::{GridError, GridResult};
pub use geometry::{bounding_box, partition_range, Point, Rect};
pub use grid::{build_grid, narrow, Cell, GridSession, NarrowResult, QuadrantRefiner};
pub use labels::{generate_labels, Alphabet};
pub use pointer::{Modifier, MouseButton, PointerController, PointerOutcome, PointerState};
pub use session::{KeyOutcome, SessionController, SessionState};

// Target cell size in pixels
pub const CELL_WIDTH: f64 = 50.0;
pub const CELL_HEIGHT: f64 = 40.0;

// Smallest accepted target cell size
pub const MIN_CELL_SIZE: f64 = 1.0;

// Refinement never zooms below this size
pub const MIN_REFINE_WIDTH: f64 = 10.0;
pub const MIN_REFINE_HEIGHT: f64 = 10.0;

// Ordered for strong finger presses (index first, pinky last, alternating hands)
pub const VALID_KEYS: &str = "fjruvndkeicmslwoxaqpzghtyb";

// Top-left, top-right, bottom-left, bottom-right
pub const QUADRANT_KEYS: &str = "wesd";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cell_size() {
        assert_eq!(CELL_WIDTH, 50.0);
        assert_eq!(CELL_HEIGHT, 40.0);
    }

    #[test]
    fn test_full_hd_needs_three_key_labels() {
        // 39 x 27 cells on a 1920x1080 screen
        let display = Rect::new(0.0, 0.0, 1920.0, 1080.0);
        let session = build_grid(&[display], CELL_WIDTH, CELL_HEIGHT, &Alphabet::primary()).unwrap();
        assert_eq!(session.len(), 39 * 27);
        assert_eq!(session.depth(), 3);
    }
}
