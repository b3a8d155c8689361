// Grid partitioner - tiles each display into cells and labels them

use crate::errors::{GridError, GridResult};
use crate::geometry::{snapped_edges, Rect};
use crate::grid::cell::{Cell, GridSession};
use crate::labels::{generate_labels, label_depth, Alphabet};
use log::debug;

/// Tile one display into whole-pixel cells close to the target size.
///
/// Cells are returned column by column, top to bottom within a column. The
/// actual cell size is stretched so the display divides evenly.
pub fn display_cells(display: &Rect, cell_width: f64, cell_height: f64) -> Vec<Rect> {
    if display.is_empty() {
        return Vec::new();
    }

    let cols = (display.width / cell_width).ceil() as usize;
    let rows = (display.height / cell_height).ceil() as usize;

    let xs = snapped_edges(display.x, display.right(), cols);
    let ys = snapped_edges(display.y, display.bottom(), rows);

    let mut cells = Vec::with_capacity(cols * rows);
    for x in xs.windows(2) {
        for y in ys.windows(2) {
            cells.push(Rect::from_edges(x[0], y[0], x[1], y[1]));
        }
    }
    cells
}

/// Build a labeled grid session over all displays, in host order
pub fn build_grid(
    displays: &[Rect],
    cell_width: f64,
    cell_height: f64,
    alphabet: &Alphabet,
) -> GridResult<GridSession> {
    if !(cell_width >= crate::MIN_CELL_SIZE && cell_height >= crate::MIN_CELL_SIZE) {
        return Err(GridError::Config(format!(
            "Cell size must be at least {}x{}, got {}x{}",
            crate::MIN_CELL_SIZE,
            crate::MIN_CELL_SIZE,
            cell_width,
            cell_height
        )));
    }

    let mut rects = Vec::new();
    for (index, display) in displays.iter().enumerate() {
        let cells = display_cells(display, cell_width, cell_height);
        debug!(
            "Display {} ({}x{} at {},{}) -> {} cells",
            index,
            display.width,
            display.height,
            display.x,
            display.y,
            cells.len()
        );
        rects.extend(cells);
    }

    let labels = generate_labels(alphabet, rects.len())?;
    let depth = label_depth(alphabet.len(), rects.len())?;
    let cells = rects
        .into_iter()
        .zip(labels)
        .map(|(rect, label)| Cell::new(rect, label))
        .collect();

    Ok(GridSession::new(cells, alphabet.clone(), depth))
}
