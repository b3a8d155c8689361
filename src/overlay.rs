// Overlay layout - what a renderer needs to paint one canvas
//
// Everything outside the active cells' bounding box is shaded, and only cells
// large enough to hold a readable label get one.

use crate::config::OverlayConfig;
use crate::geometry::{bounding_box, Rect};
use crate::grid::Cell;
use crate::pointer::PointerState;

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayout {
    pub canvas: Rect,
    /// Cells intersecting the canvas
    pub cells: Vec<Cell>,
    /// Subset of `cells` that should show their label
    pub labelled: Vec<Cell>,
    /// Areas of the canvas outside the active region
    pub shade: Vec<Rect>,
    /// Tint the shade while a drag is held
    pub dragging: bool,
    pub drop_shadow: bool,
}

impl OverlayLayout {
    pub fn build(
        canvas: Rect,
        cells: &[Cell],
        pointer: PointerState,
        config: &OverlayConfig,
    ) -> Self {
        let visible: Vec<Cell> = cells
            .iter()
            .filter(|cell| cell.rect().intersection(&canvas).is_some())
            .cloned()
            .collect();

        Self {
            canvas,
            labelled: labelled_cells(&visible, config),
            shade: shade_regions(&canvas, cells),
            cells: visible,
            dragging: pointer == PointerState::Dragging,
            drop_shadow: config.drop_shadow,
        }
    }
}

pub fn labelled_cells(cells: &[Cell], config: &OverlayConfig) -> Vec<Cell> {
    cells
        .iter()
        .filter(|cell| {
            let rect = cell.rect();
            rect.width >= config.min_label_width && rect.height >= config.min_label_height
        })
        .cloned()
        .collect()
}

/// Strips of `canvas` outside the bounding box of `cells`: full-height left
/// and right strips, then top and bottom strips between them.
pub fn shade_regions(canvas: &Rect, cells: &[Cell]) -> Vec<Rect> {
    let rects: Vec<Rect> = cells.iter().map(|cell| cell.rect()).collect();
    let bounds = match bounding_box(&rects) {
        Ok(bounds) => bounds,
        Err(_) => return Vec::new(),
    };
    let active = match bounds.intersection(canvas) {
        Some(active) => active,
        None => return vec![*canvas],
    };

    let mut regions = Vec::with_capacity(4);
    if active.x > canvas.x {
        regions.push(Rect::from_edges(canvas.x, canvas.y, active.x, canvas.bottom()));
    }
    if active.right() < canvas.right() {
        regions.push(Rect::from_edges(
            active.right(),
            canvas.y,
            canvas.right(),
            canvas.bottom(),
        ));
    }
    if active.y > canvas.y {
        regions.push(Rect::from_edges(active.x, canvas.y, active.right(), active.y));
    }
    if active.bottom() < canvas.bottom() {
        regions.push(Rect::from_edges(
            active.x,
            active.bottom(),
            active.right(),
            canvas.bottom(),
        ));
    }
    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(x: f64, y: f64, w: f64, h: f64) -> Cell {
        Cell::new(Rect::new(x, y, w, h), "ab")
    }

    #[test]
    fn test_shade_surrounds_active_region() {
        let canvas = Rect::new(0.0, 0.0, 100.0, 100.0);
        let cells = [cell(40.0, 40.0, 20.0, 20.0)];
        let shade = shade_regions(&canvas, &cells);
        assert_eq!(shade.len(), 4);
        let shaded: f64 = shade.iter().map(|r| r.area()).sum();
        assert_eq!(shaded, 100.0 * 100.0 - 20.0 * 20.0);
    }

    #[test]
    fn test_full_canvas_cells_need_no_shade() {
        let canvas = Rect::new(0.0, 0.0, 100.0, 100.0);
        let cells = [cell(0.0, 0.0, 50.0, 100.0), cell(50.0, 0.0, 50.0, 100.0)];
        assert!(shade_regions(&canvas, &cells).is_empty());
        assert!(shade_regions(&canvas, &[]).is_empty());
    }

    #[test]
    fn test_other_display_fully_shaded() {
        let canvas = Rect::new(1920.0, 0.0, 1280.0, 1024.0);
        let cells = [cell(0.0, 0.0, 50.0, 40.0)];
        assert_eq!(shade_regions(&canvas, &cells), vec![canvas]);
    }

    #[test]
    fn test_small_cells_unlabelled() {
        let config = OverlayConfig::default();
        let cells = [cell(0.0, 0.0, 50.0, 40.0), cell(50.0, 0.0, 10.0, 10.0)];
        let layout = OverlayLayout::build(
            Rect::new(0.0, 0.0, 200.0, 200.0),
            &cells,
            PointerState::Dragging,
            &config,
        );
        assert_eq!(layout.cells.len(), 2);
        assert_eq!(layout.labelled.len(), 1);
        assert!(layout.dragging);
    }
}
