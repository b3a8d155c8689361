// Pointer interaction - click vs. drag-hold around the resolved location

pub mod shake;

use crate::config::PointerConfig;
use crate::errors::{GridError, GridResult};
use crate::geometry::{Point, Rect};
use crate::host::PointerBackend;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
}

impl MouseButton {
    /// Host button numbering: 0 primary, 1 secondary, 2 middle
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(MouseButton::Primary),
            1 => Some(MouseButton::Secondary),
            2 => Some(MouseButton::Middle),
            _ => None,
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            MouseButton::Primary => 0,
            MouseButton::Secondary => 1,
            MouseButton::Middle => 2,
        }
    }
}

/// Modifier key held around a pointer action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    Ctrl,
    Shift,
    Alt,
    Super,
}

impl FromStr for Modifier {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ctrl" | "control" => Ok(Modifier::Ctrl),
            "shift" => Ok(Modifier::Shift),
            "alt" | "option" => Ok(Modifier::Alt),
            "super" | "cmd" | "win" | "meta" => Ok(Modifier::Super),
            other => Err(GridError::Config(format!("Unknown modifier '{}'", other))),
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Modifier::Ctrl => "ctrl",
            Modifier::Shift => "shift",
            Modifier::Alt => "alt",
            Modifier::Super => "super",
        };
        write!(f, "{}", name)
    }
}

/// Whether the controller is holding the primary button down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointerState {
    #[default]
    Idle,
    Dragging,
}

/// What `resolve_and_act` ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    Clicked(MouseButton),
    DragStarted,
    DragEnded,
}

/// Owns the process-wide drag state; outlives every grid session.
pub struct PointerController {
    backend: Box<dyn PointerBackend>,
    config: PointerConfig,
    state: PointerState,
    rng: StdRng,
}

impl PointerController {
    pub fn new(backend: Box<dyn PointerBackend>, config: PointerConfig) -> Self {
        Self {
            backend,
            config,
            state: PointerState::Idle,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic jitter, for tests and replays
    pub fn with_seed(backend: Box<dyn PointerBackend>, config: PointerConfig, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ..Self::new(backend, config)
        }
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == PointerState::Dragging
    }

    /// Move the pointer to the center of `bounds` without clicking
    pub fn move_to(&mut self, bounds: &Rect) -> GridResult<Point> {
        let center = bounds.center();
        self.backend.move_pointer(center.x, center.y)?;
        debug!("🖱️ Pointer moved to ({:.1}, {:.1})", center.x, center.y);
        Ok(center)
    }

    /// Move to the center of `bounds`, then click, start a drag or end the
    /// drag in progress. An active drag is always released first, whatever
    /// `button` and `drag` say.
    pub fn resolve_and_act(
        &mut self,
        bounds: &Rect,
        button: MouseButton,
        modifier: Option<Modifier>,
        drag: bool,
    ) -> GridResult<PointerOutcome> {
        if self.state == PointerState::Idle && drag && button != MouseButton::Primary {
            return Err(GridError::InvalidDragButton(button));
        }

        if let Some(modifier) = modifier {
            self.backend.key_down(modifier)?;
            std::thread::sleep(self.config.modifier_settle());
        }

        let result = self.act(bounds, button, drag);

        if let Some(modifier) = modifier {
            std::thread::sleep(self.config.modifier_settle());
            if let Err(e) = self.backend.key_up(modifier) {
                warn!("⚠️ Failed to release {}: {}", modifier, e);
                if result.is_ok() {
                    return Err(e);
                }
            }
        }

        result
    }

    fn act(&mut self, bounds: &Rect, button: MouseButton, drag: bool) -> GridResult<PointerOutcome> {
        let center = self.move_to(bounds)?;

        match self.state {
            PointerState::Dragging => {
                // Some applications only notice a drag if the pointer moves
                // while the button is held
                self.shake(center)?;
                self.backend.release_button(MouseButton::Primary)?;
                self.state = PointerState::Idle;
                info!("🖱️ Drag released at ({:.1}, {:.1})", center.x, center.y);
                Ok(PointerOutcome::DragEnded)
            }
            PointerState::Idle if drag => {
                self.shake(center)?;
                self.backend.start_drag()?;
                self.state = PointerState::Dragging;
                info!("🖱️ Drag started at ({:.1}, {:.1})", center.x, center.y);
                Ok(PointerOutcome::DragStarted)
            }
            PointerState::Idle => {
                self.backend.click(button)?;
                info!(
                    "🖱️ {:?} click at ({:.1}, {:.1})",
                    button, center.x, center.y
                );
                Ok(PointerOutcome::Clicked(button))
            }
        }
    }

    fn shake(&mut self, origin: Point) -> GridResult<()> {
        shake::jitter(self.backend.as_mut(), &mut self.rng, origin, &self.config)
    }
}
