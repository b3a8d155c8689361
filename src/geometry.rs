// Rectangle model and exact tiling arithmetic
// All coordinates are screen pixels; tiled cells are snapped to whole pixels,
// refinement quadrants stay fractional.

use crate::errors::{GridError, GridResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from edges (left, top, right, bottom)
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if left < right && top < bottom {
            Some(Rect::from_edges(left, top, right, bottom))
        } else {
            None
        }
    }

    /// Grow to at least `min_width` x `min_height`, keeping the center fixed.
    /// Dimensions already above the minimum are left alone.
    pub fn expand_to_min(&self, min_width: f64, min_height: f64) -> Rect {
        let center = self.center();
        let width = self.width.max(min_width);
        let height = self.height.max(min_height);
        Rect::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }
}

/// Smallest rectangle containing every input
pub fn bounding_box<'a, I>(rects: I) -> GridResult<Rect>
where
    I: IntoIterator<Item = &'a Rect>,
{
    let mut iter = rects.into_iter();
    let first = iter.next().ok_or(GridError::EmptyInput)?;

    let (mut left, mut top, mut right, mut bottom) =
        (first.x, first.y, first.right(), first.bottom());
    for rect in iter {
        left = left.min(rect.x);
        top = top.min(rect.y);
        right = right.max(rect.right());
        bottom = bottom.max(rect.bottom());
    }

    Ok(Rect::from_edges(left, top, right, bottom))
}

/// Split `[start, end)` into `n` contiguous slices of equal size.
/// Returns `(offset, size)` pairs; `n == 0` yields nothing.
pub fn partition_range(start: f64, end: f64, n: usize) -> Vec<(f64, f64)> {
    if n == 0 {
        return Vec::new();
    }
    let jump = (end - start) / n as f64;
    (0..n).map(|i| (start + i as f64 * jump, jump)).collect()
}

/// The `n + 1` whole-pixel edges of `n` equal slices of `[start, end)`.
///
/// Each edge is rounded exactly once and shared by both neighbouring slices,
/// so slice widths always add up to `end - start`. The outer edges are kept
/// as given.
pub fn snapped_edges(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let span = end - start;
    let mut edges: Vec<f64> = (0..=n)
        .map(|k| (start + span * k as f64 / n as f64).round())
        .collect();
    edges[0] = start;
    edges[n] = end;
    edges
}
