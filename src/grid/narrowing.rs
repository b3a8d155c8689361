// Prefix narrowing - the state machine shared by the primary grid and the
// quadrant refinement grid

use crate::grid::cell::{Cell, GridSession};
use log::debug;

/// Result of applying one key to a set of cells
#[derive(Debug, Clone, PartialEq)]
pub enum NarrowResult {
    /// No cell label starts with the key
    Rejected,
    /// Several cells survive, each with the key stripped from its label
    Active(Vec<Cell>),
    /// Exactly one cell survives
    Resolved(Cell),
}

/// What a session did with a key
#[derive(Debug, Clone, PartialEq)]
pub enum NarrowOutcome {
    Rejected,
    Narrowed { remaining: usize },
    Resolved(Cell),
}

/// Keep the cells whose (trimmed) label starts with `key`, stripping it.
pub fn narrow(cells: &[Cell], key: char) -> NarrowResult {
    let mut keep: Vec<Cell> = cells
        .iter()
        .filter_map(|cell| {
            let stripped = cell.label.trim();
            stripped
                .strip_prefix(key)
                .map(|rest| Cell::new(cell.rect(), rest))
        })
        .collect();

    match keep.len() {
        0 => NarrowResult::Rejected,
        1 => NarrowResult::Resolved(keep.remove(0)),
        _ => NarrowResult::Active(keep),
    }
}

impl GridSession {
    /// Apply one key. A rejected key leaves the session as it was; an
    /// accepted key replaces the active cells with the survivors.
    pub fn narrow(&mut self, key: char) -> NarrowOutcome {
        match narrow(&self.cells, key) {
            NarrowResult::Rejected => {
                debug!("Key '{}' matches no cell, keeping {} cells", key, self.cells.len());
                NarrowOutcome::Rejected
            }
            NarrowResult::Active(survivors) => {
                debug!(
                    "Key '{}' narrowed {} cells to {}",
                    key,
                    self.cells.len(),
                    survivors.len()
                );
                self.cells = survivors;
                self.depth = self.depth.saturating_sub(1);
                NarrowOutcome::Narrowed {
                    remaining: self.cells.len(),
                }
            }
            NarrowResult::Resolved(cell) => {
                self.cells = vec![cell.clone()];
                self.depth = self.depth.saturating_sub(1);
                NarrowOutcome::Resolved(cell)
            }
        }
    }
}
