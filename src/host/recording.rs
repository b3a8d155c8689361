use crate::errors::{GridError, GridResult};
use crate::geometry::Point;
use crate::host::PointerBackend;
use crate::pointer::{Modifier, MouseButton};
use std::sync::{Arc, Mutex};

/// A pointer primitive as requested by the controller
#[derive(Debug, Clone, PartialEq)]
pub enum PointerAction {
    Move(Point),
    Click(MouseButton),
    StartDrag,
    Release(MouseButton),
    KeyDown(Modifier),
    KeyUp(Modifier),
}

/// Virtual pointer that records every primitive into a shared log.
///
/// Clones share the same log, so one handle can be given to the controller
/// while another is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingPointer {
    actions: Arc<Mutex<Vec<PointerAction>>>,
    fail_clicks: bool,
}

impl RecordingPointer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every click, drag start and release fails after being recorded
    pub fn with_failing_clicks() -> Self {
        Self {
            actions: Arc::new(Mutex::new(Vec::new())),
            fail_clicks: true,
        }
    }

    pub fn actions(&self) -> Vec<PointerAction> {
        self.actions
            .lock()
            .map(|actions| actions.clone())
            .unwrap_or_default()
    }

    /// Last position the pointer was moved to
    pub fn position(&self) -> Option<Point> {
        self.actions().iter().rev().find_map(|action| match action {
            PointerAction::Move(point) => Some(*point),
            _ => None,
        })
    }

    pub fn clear(&self) {
        if let Ok(mut actions) = self.actions.lock() {
            actions.clear();
        }
    }

    fn record(&self, action: PointerAction) -> GridResult<()> {
        let is_button = matches!(
            action,
            PointerAction::Click(_) | PointerAction::StartDrag | PointerAction::Release(_)
        );
        self.actions
            .lock()
            .map_err(|_| GridError::Pointer("Recording log poisoned".to_string()))?
            .push(action);
        if is_button && self.fail_clicks {
            return Err(GridError::Pointer("Simulated button failure".to_string()));
        }
        Ok(())
    }
}

impl PointerBackend for RecordingPointer {
    fn move_pointer(&mut self, x: f64, y: f64) -> GridResult<()> {
        self.record(PointerAction::Move(Point::new(x, y)))
    }

    fn click(&mut self, button: MouseButton) -> GridResult<()> {
        self.record(PointerAction::Click(button))
    }

    fn start_drag(&mut self) -> GridResult<()> {
        self.record(PointerAction::StartDrag)
    }

    fn release_button(&mut self, button: MouseButton) -> GridResult<()> {
        self.record(PointerAction::Release(button))
    }

    fn key_down(&mut self, modifier: Modifier) -> GridResult<()> {
        self.record(PointerAction::KeyDown(modifier))
    }

    fn key_up(&mut self, modifier: Modifier) -> GridResult<()> {
        self.record(PointerAction::KeyUp(modifier))
    }
}
