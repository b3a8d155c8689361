// Grid configuration - target cell size and label alphabets
use crate::errors::{GridError, GridResult};
use crate::labels::Alphabet;
use serde::{Deserialize, Serialize};

/// Primary grid layout
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Target cell width in pixels; actual cells stretch to fit the display
    pub cell_width: f64,
    pub cell_height: f64,
    pub alphabet: Alphabet,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_width: crate::CELL_WIDTH,
            cell_height: crate::CELL_HEIGHT,
            alphabet: Alphabet::primary(),
        }
    }
}

impl GridConfig {
    pub fn new(cell_width: f64, cell_height: f64, alphabet: Alphabet) -> Self {
        Self {
            cell_width,
            cell_height,
            alphabet,
        }
    }

    pub fn validate(&self) -> GridResult<()> {
        // Anything smaller than a pixel explodes the cell count
        if !(self.cell_width >= crate::MIN_CELL_SIZE && self.cell_height >= crate::MIN_CELL_SIZE) {
            return Err(GridError::Config(format!(
                "Cell size must be at least {}x{}, got {}x{}",
                crate::MIN_CELL_SIZE,
                crate::MIN_CELL_SIZE,
                self.cell_width,
                self.cell_height
            )));
        }
        if self.alphabet.len() < 2 {
            return Err(GridError::AlphabetTooSmall {
                symbols: self.alphabet.len(),
                required: 2,
            });
        }
        Ok(())
    }
}

/// Quadrant refinement grid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefineConfig {
    /// Top-left, top-right, bottom-left, bottom-right
    pub alphabet: Alphabet,
    pub min_width: f64,
    pub min_height: f64,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::quadrants(),
            min_width: crate::MIN_REFINE_WIDTH,
            min_height: crate::MIN_REFINE_HEIGHT,
        }
    }
}
