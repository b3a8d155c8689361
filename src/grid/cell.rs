use crate::geometry::{bounding_box, Rect};
use crate::errors::GridResult;
use crate::labels::Alphabet;

/// A labeled, selectable region of the targeting surface
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    rect: Rect,
    pub label: String,
}

impl Cell {
    pub fn new(rect: Rect, label: impl Into<String>) -> Self {
        Self {
            rect,
            label: label.into(),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }
}

/// The currently addressable cells plus the alphabet that labeled them
#[derive(Debug, Clone, PartialEq)]
pub struct GridSession {
    pub(crate) cells: Vec<Cell>,
    alphabet: Alphabet,
    pub(crate) depth: usize,
}

impl GridSession {
    pub fn new(cells: Vec<Cell>, alphabet: Alphabet, depth: usize) -> Self {
        Self {
            cells,
            alphabet,
            depth,
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Characters still to be typed before a cell resolves
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn bounds(&self) -> GridResult<Rect> {
        bounding_box(self.cells.iter().map(|cell| &cell.rect))
    }

    /// Cell currently carrying `label` (after trimming)
    pub fn find(&self, label: &str) -> Option<&Cell> {
        self.cells.iter().find(|cell| cell.label.trim() == label)
    }
}
