// Session controller - the single owner of grid state
// Hosts drive it with start, narrow, resolve, click and exit, delivered one at
// a time. A failed command leaves the previous state in place, except that
// start has already closed the old overlay when the renderer fails.

use crate::config::MouseGridConfig;
use crate::errors::GridResult;
use crate::geometry::{Point, Rect};
use crate::grid::{
    build_grid, Cell, GridSession, NarrowOutcome, QuadrantRefiner, RefineOutcome,
    RefinementSession,
};
use crate::host::{DisplaySource, Feedback, OverlayRenderer};
use crate::pointer::{Modifier, MouseButton, PointerController, PointerOutcome, PointerState};
use log::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Inactive,
    GridActive(GridSession),
    RefinementActive(RefinementSession),
}

impl SessionState {
    pub fn cells(&self) -> &[Cell] {
        match self {
            SessionState::Inactive => &[],
            SessionState::GridActive(session) => session.cells(),
            SessionState::RefinementActive(session) => session.cells(),
        }
    }

    pub fn bounds(&self) -> Option<Rect> {
        match self {
            SessionState::Inactive => None,
            SessionState::GridActive(session) => session.bounds().ok(),
            SessionState::RefinementActive(session) => Some(session.bounds()),
        }
    }
}

/// Result of feeding one key to the controller
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    /// No session is active
    Ignored,
    /// The key matched nothing; state unchanged
    Rejected,
    /// Several cells remain
    Narrowed { remaining: usize },
    /// Now refining inside these bounds
    Refining(Rect),
}

pub struct SessionController {
    config: MouseGridConfig,
    refiner: QuadrantRefiner,
    state: SessionState,
    pointer: PointerController,
    displays: Box<dyn DisplaySource>,
    renderer: Box<dyn OverlayRenderer>,
    feedback: Box<dyn Feedback>,
}

impl SessionController {
    /// Fails on invalid configuration, e.g. an alphabet too small to label
    /// anything
    pub fn new(
        config: MouseGridConfig,
        displays: Box<dyn DisplaySource>,
        renderer: Box<dyn OverlayRenderer>,
        pointer: PointerController,
        feedback: Box<dyn Feedback>,
    ) -> GridResult<Self> {
        config.validate()?;
        let refiner = QuadrantRefiner::new(
            config.refine.alphabet.clone(),
            config.refine.min_width,
            config.refine.min_height,
        )?;

        Ok(Self {
            config,
            refiner,
            state: SessionState::Inactive,
            pointer,
            displays,
            renderer,
            feedback,
        })
    }

    pub fn config(&self) -> &MouseGridConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != SessionState::Inactive
    }

    pub fn active_cells(&self) -> &[Cell] {
        self.state.cells()
    }

    pub fn pointer_state(&self) -> PointerState {
        self.pointer.state()
    }

    /// Build a fresh grid over every display, replacing any prior session.
    /// Returns the number of cells.
    ///
    /// If enumerating displays or building the grid fails, the prior session
    /// is kept. The prior session is closed before the overlay is opened, so
    /// a renderer failure after that point leaves the controller inactive.
    pub fn start(&mut self) -> GridResult<usize> {
        let displays = self.displays.enumerate_displays()?;
        let grid = &self.config.grid;
        let session = build_grid(&displays, grid.cell_width, grid.cell_height, &grid.alphabet)?;

        self.exit();

        self.renderer.open(&displays)?;
        if let Err(e) = self.renderer.request_redraw(session.cells(), self.pointer.state()) {
            self.renderer.close();
            return Err(e);
        }

        let count = session.len();
        info!(
            "🎯 Grid started: {} cells over {} display(s), {} key(s) per label",
            count,
            displays.len(),
            session.depth()
        );
        self.state = SessionState::GridActive(session);
        Ok(count)
    }

    /// Feed one label key
    pub fn narrow(&mut self, key: char) -> GridResult<KeyOutcome> {
        let (next, outcome) = match &self.state {
            SessionState::Inactive => return Ok(KeyOutcome::Ignored),
            SessionState::GridActive(session) => {
                let mut next = session.clone();
                match next.narrow(key) {
                    NarrowOutcome::Rejected => (None, KeyOutcome::Rejected),
                    NarrowOutcome::Narrowed { remaining } => (
                        Some(SessionState::GridActive(next)),
                        KeyOutcome::Narrowed { remaining },
                    ),
                    NarrowOutcome::Resolved(cell) => {
                        // The crosshair quadrants stay up in case the user
                        // wants a more precise target
                        let refinement = self.refiner.enter(cell.rect());
                        let bounds = refinement.bounds();
                        (
                            Some(SessionState::RefinementActive(refinement)),
                            KeyOutcome::Refining(bounds),
                        )
                    }
                }
            }
            SessionState::RefinementActive(session) => {
                let mut next = session.clone();
                match self.refiner.refine(&mut next, key) {
                    RefineOutcome::Rejected => (None, KeyOutcome::Rejected),
                    RefineOutcome::Refined(bounds) => (
                        Some(SessionState::RefinementActive(next)),
                        KeyOutcome::Refining(bounds),
                    ),
                }
            }
        };

        match next {
            None => {
                debug!("Rejected key '{}'", key);
                self.feedback.signal_invalid();
            }
            Some(next) => {
                self.renderer
                    .request_redraw(next.cells(), self.pointer.state())?;
                self.state = next;
            }
        }
        Ok(outcome)
    }

    /// Move the pointer to the center of the active cells and end the
    /// session. `None` when there is nothing to move to.
    pub fn resolve(&mut self) -> GridResult<Option<Point>> {
        let bounds = match self.state.bounds() {
            Some(bounds) => bounds,
            None => return Ok(None),
        };
        let point = self.pointer.move_to(&bounds)?;
        self.exit();
        Ok(Some(point))
    }

    /// Move to the active cells and click, start a drag, or finish the drag
    /// in progress, then end the session. `None` when there is nothing to
    /// act on.
    pub fn click(
        &mut self,
        button: MouseButton,
        modifier: Option<Modifier>,
        drag: bool,
    ) -> GridResult<Option<PointerOutcome>> {
        let bounds = match self.state.bounds() {
            Some(bounds) => bounds,
            None => return Ok(None),
        };
        let outcome = self
            .pointer
            .resolve_and_act(&bounds, button, modifier, drag)?;
        self.exit();
        Ok(Some(outcome))
    }

    /// Close the overlay and drop the session. Safe to call when inactive.
    pub fn exit(&mut self) {
        if self.state == SessionState::Inactive {
            return;
        }
        self.state = SessionState::Inactive;
        if let Err(e) = self.renderer.request_redraw(&[], self.pointer.state()) {
            warn!("⚠️ Failed to clear overlay: {}", e);
        }
        self.renderer.close();
        debug!("Grid session closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PointerConfig;
    use crate::errors::GridError;
    use crate::host::{LogFeedback, NoopRenderer, RecordingPointer, StaticDisplays};
    use crate::labels::Alphabet;

    fn controller(config: MouseGridConfig) -> SessionController {
        let displays = StaticDisplays::new(vec![Rect::new(0.0, 0.0, 200.0, 80.0)]);
        let pointer = PointerController::with_seed(
            Box::new(RecordingPointer::new()),
            PointerConfig::instant(),
            3,
        );
        SessionController::new(
            config,
            Box::new(displays),
            Box::new(NoopRenderer),
            pointer,
            Box::new(LogFeedback),
        )
        .unwrap()
    }

    fn small_config() -> MouseGridConfig {
        let mut config = MouseGridConfig::default();
        config.grid.alphabet = Alphabet::new("ab").unwrap();
        config.pointer = PointerConfig::instant();
        config
    }

    #[test]
    fn test_start_builds_grid() {
        let mut controller = controller(small_config());
        assert_eq!(controller.start().unwrap(), 8);
        assert!(matches!(controller.state(), SessionState::GridActive(_)));
        assert_eq!(controller.active_cells()[0].label, "aaa");
    }

    #[test]
    fn test_narrow_to_refinement() {
        let mut controller = controller(small_config());
        controller.start().unwrap();
        assert_eq!(
            controller.narrow('a').unwrap(),
            KeyOutcome::Narrowed { remaining: 4 }
        );
        assert_eq!(
            controller.narrow('a').unwrap(),
            KeyOutcome::Narrowed { remaining: 2 }
        );
        // "aaa" is the top-left cell
        assert_eq!(
            controller.narrow('a').unwrap(),
            KeyOutcome::Refining(Rect::new(0.0, 0.0, 50.0, 40.0))
        );
        assert_eq!(controller.active_cells().len(), 4);
    }

    #[test]
    fn test_rejected_key_keeps_session() {
        let mut controller = controller(small_config());
        controller.start().unwrap();
        let before = controller.state().clone();
        assert_eq!(controller.narrow('z').unwrap(), KeyOutcome::Rejected);
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn test_inactive_commands_are_noops() {
        let mut controller = controller(small_config());
        assert_eq!(controller.narrow('a').unwrap(), KeyOutcome::Ignored);
        assert_eq!(controller.resolve().unwrap(), None);
        assert_eq!(
            controller.click(MouseButton::Primary, None, false).unwrap(),
            None
        );
        controller.exit();
        assert!(!controller.is_active());
    }

    #[test]
    fn test_resolve_moves_to_center_and_exits() {
        let mut controller = controller(small_config());
        controller.start().unwrap();
        let point = controller.resolve().unwrap();
        assert_eq!(point, Some(Point::new(100.0, 40.0)));
        assert!(!controller.is_active());
    }

    #[test]
    fn test_invalid_drag_leaves_session_active() {
        let mut controller = controller(small_config());
        controller.start().unwrap();
        let result = controller.click(MouseButton::Middle, None, true);
        assert!(matches!(result, Err(GridError::InvalidDragButton(_))));
        assert!(controller.is_active());
    }

    #[test]
    fn test_rejects_bad_config() {
        let mut config = small_config();
        config.refine.min_width = -1.0;
        let pointer =
            PointerController::new(Box::new(RecordingPointer::new()), PointerConfig::instant());
        let result = SessionController::new(
            config,
            Box::new(StaticDisplays::default()),
            Box::new(NoopRenderer),
            pointer,
            Box::new(LogFeedback),
        );
        assert!(result.is_err());
    }
}
