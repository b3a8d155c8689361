// Quadrant refinement - recursive 2x2 drill-down after a cell resolves
//
// Every valid key resolves to exactly one quadrant, which immediately becomes
// the seed of the next refinement. Bounds never drop below the minimum size;
// once at the floor each key only nudges the center toward its quadrant.

use crate::errors::{GridError, GridResult};
use crate::geometry::{partition_range, Rect};
use crate::grid::cell::{Cell, GridSession};
use crate::grid::narrowing::{narrow, NarrowResult};
use crate::labels::Alphabet;
use log::debug;

pub const QUADRANT_COUNT: usize = 4;

/// A four-cell session quadrant-partitioning `bounds`
#[derive(Debug, Clone, PartialEq)]
pub struct RefinementSession {
    session: GridSession,
    bounds: Rect,
}

impl RefinementSession {
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn cells(&self) -> &[Cell] {
        self.session.cells()
    }

    pub fn session(&self) -> &GridSession {
        &self.session
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RefineOutcome {
    Rejected,
    /// Re-entered on the chosen quadrant; carries the new bounds
    Refined(Rect),
}

#[derive(Debug, Clone)]
pub struct QuadrantRefiner {
    alphabet: Alphabet,
    min_width: f64,
    min_height: f64,
}

impl QuadrantRefiner {
    /// `alphabet` labels the quadrants top-left, top-right, bottom-left,
    /// bottom-right; pick keys forming a square on the keyboard.
    pub fn new(alphabet: Alphabet, min_width: f64, min_height: f64) -> GridResult<Self> {
        if alphabet.len() != QUADRANT_COUNT {
            return Err(GridError::Config(format!(
                "Refinement alphabet needs exactly {} symbols, got {}",
                QUADRANT_COUNT,
                alphabet.len()
            )));
        }
        if !(min_width > 0.0 && min_height > 0.0) {
            return Err(GridError::Config(format!(
                "Minimum refinement size must be positive, got {}x{}",
                min_width, min_height
            )));
        }
        Ok(Self {
            alphabet,
            min_width,
            min_height,
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn min_size(&self) -> (f64, f64) {
        (self.min_width, self.min_height)
    }

    pub fn enter(&self, seed: Rect) -> RefinementSession {
        let bounds = seed.expand_to_min(self.min_width, self.min_height);

        // Rows outer so the labels read row-major
        let mut cells = Vec::with_capacity(QUADRANT_COUNT);
        let mut symbols = self.alphabet.symbols().iter();
        for (y, cell_height) in partition_range(bounds.y, bounds.bottom(), 2) {
            for (x, cell_width) in partition_range(bounds.x, bounds.right(), 2) {
                if let Some(symbol) = symbols.next() {
                    cells.push(Cell::new(
                        Rect::new(x, y, cell_width, cell_height),
                        symbol.to_string(),
                    ));
                }
            }
        }

        debug!(
            "Refining {:.1}x{:.1} at ({:.1}, {:.1})",
            bounds.width, bounds.height, bounds.x, bounds.y
        );
        RefinementSession {
            session: GridSession::new(cells, self.alphabet.clone(), 1),
            bounds,
        }
    }

    /// Narrow by one key and, on a match, re-enter on the chosen quadrant.
    pub fn refine(&self, session: &mut RefinementSession, key: char) -> RefineOutcome {
        match narrow(session.cells(), key) {
            NarrowResult::Resolved(cell) => {
                *session = self.enter(cell.rect());
                RefineOutcome::Refined(session.bounds)
            }
            NarrowResult::Active(_) | NarrowResult::Rejected => RefineOutcome::Rejected,
        }
    }
}
