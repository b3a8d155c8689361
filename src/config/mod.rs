// Configuration module
pub mod grid_config;
pub mod mouse_grid_config;

pub use grid_config::{GridConfig, RefineConfig};
pub use mouse_grid_config::{MouseGridConfig, OverlayConfig, PointerConfig};
