use std::fmt;

use crate::pointer::MouseButton;

/// Errors raised by the grid core and its host collaborators
#[derive(Debug)]
pub enum GridError {
    /// A bounding box was requested over an empty set of rectangles
    EmptyInput,
    /// The label alphabet cannot produce enough unique labels
    AlphabetTooSmall { symbols: usize, required: usize },
    /// Only the primary button may start a drag
    InvalidDragButton(MouseButton),
    /// Invalid configuration values, unreadable config files
    Config(String),
    /// Display enumeration failed
    Display(String),
    /// An OS pointer or keyboard primitive failed
    Pointer(String),
    /// The overlay renderer failed
    Render(String),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::EmptyInput => write!(f, "Bounding box requested for an empty set of cells"),
            GridError::AlphabetTooSmall { symbols, required } => write!(
                f,
                "Alphabet of {} symbol(s) cannot label {} cells",
                symbols, required
            ),
            GridError::InvalidDragButton(button) => write!(
                f,
                "Can only drag with the primary button, not {:?}",
                button
            ),
            GridError::Config(msg) => write!(f, "Configuration error: {}", msg),
            GridError::Display(msg) => write!(f, "Display enumeration failed: {}", msg),
            GridError::Pointer(msg) => write!(f, "Pointer primitive failed: {}", msg),
            GridError::Render(msg) => write!(f, "Overlay render failed: {}", msg),
        }
    }
}

impl std::error::Error for GridError {}

impl From<std::io::Error> for GridError {
    fn from(err: std::io::Error) -> Self {
        GridError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        GridError::Config(err.to_string())
    }
}

/// Result type for grid operations
pub type GridResult<T> = Result<T, GridError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_error_message() {
        let err = GridError::AlphabetTooSmall {
            symbols: 0,
            required: 12,
        };
        assert_eq!(err.to_string(), "Alphabet of 0 symbol(s) cannot label 12 cells");
    }

    #[test]
    fn test_json_error_maps_to_config() {
        let err: GridError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, GridError::Config(_)));
    }
}
