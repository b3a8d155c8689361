use crate::config::{GridConfig, RefineConfig};
use crate::errors::{GridError, GridResult};
use crate::labels::Alphabet;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Complete configuration for a mouse grid controller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseGridConfig {
    pub grid: GridConfig,
    pub refine: RefineConfig,
    pub pointer: PointerConfig,
    pub overlay: OverlayConfig,
}

/// Pointer action timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Pause after pressing and before releasing a modifier (ms)
    pub modifier_settle_ms: u64,
    /// Total length of the jitter pulse around drags (ms)
    pub shake_duration_ms: u64,
    /// Pause between jitter moves (ms)
    pub shake_frame_ms: u64,
    /// Maximum jitter offset on each axis (px)
    pub shake_pixel_range: u16,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            modifier_settle_ms: 200,
            shake_duration_ms: 100,
            shake_frame_ms: 16,
            shake_pixel_range: 5,
        }
    }
}

impl PointerConfig {
    /// No pauses at all; jitter still moves the pointer once
    pub fn instant() -> Self {
        Self {
            modifier_settle_ms: 0,
            shake_duration_ms: 0,
            shake_frame_ms: 16,
            shake_pixel_range: 5,
        }
    }

    pub fn modifier_settle(&self) -> Duration {
        Duration::from_millis(self.modifier_settle_ms)
    }

    pub fn shake_frame(&self) -> Duration {
        Duration::from_millis(self.shake_frame_ms)
    }

    /// Number of jitter moves, never less than one
    pub fn shake_moves(&self) -> u64 {
        if self.shake_frame_ms == 0 {
            return 1;
        }
        (self.shake_duration_ms / self.shake_frame_ms).max(1)
    }
}

/// Hints for renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Cells smaller than this are drawn without a label
    pub min_label_width: f64,
    pub min_label_height: f64,
    pub drop_shadow: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            min_label_width: 30.0,
            min_label_height: 20.0,
            drop_shadow: true,
        }
    }
}

impl MouseGridConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: impl AsRef<Path>) -> GridResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: MouseGridConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> GridResult<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Defaults overridden by `MOUSE_GRID_*` environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(width) = env_parse::<f64>("MOUSE_GRID_CELL_WIDTH") {
            config.grid.cell_width = width;
        }
        if let Some(height) = env_parse::<f64>("MOUSE_GRID_CELL_HEIGHT") {
            config.grid.cell_height = height;
        }
        if let Some(alphabet) = env_alphabet("MOUSE_GRID_KEYS") {
            config.grid.alphabet = alphabet;
        }
        if let Some(alphabet) = env_alphabet("MOUSE_GRID_REFINE_KEYS") {
            config.refine.alphabet = alphabet;
        }
        if let Some(size) = env_parse::<f64>("MOUSE_GRID_MIN_REFINE_SIZE") {
            config.refine.min_width = size;
            config.refine.min_height = size;
        }

        config
    }

    pub fn validate(&self) -> GridResult<()> {
        self.grid.validate()?;

        if self.refine.alphabet.len() != crate::grid::refine::QUADRANT_COUNT {
            return Err(GridError::Config(format!(
                "Refinement alphabet must have 4 symbols, got \"{}\"",
                String::from(self.refine.alphabet.clone())
            )));
        }
        if !(self.refine.min_width > 0.0 && self.refine.min_height > 0.0) {
            return Err(GridError::Config(
                "Minimum refinement size must be positive".to_string(),
            ));
        }
        if self.pointer.shake_frame_ms == 0 {
            return Err(GridError::Config(
                "Jitter frame length must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let value = std::env::var(name).ok()?;
    match value.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("⚠️ Ignoring {}={:?}: not a number", name, value);
            None
        }
    }
}

fn env_alphabet(name: &str) -> Option<Alphabet> {
    let value = std::env::var(name).ok()?;
    match Alphabet::new(&value) {
        Ok(alphabet) => Some(alphabet),
        Err(e) => {
            warn!("⚠️ Ignoring {}={:?}: {}", name, value, e);
            None
        }
    }
}
