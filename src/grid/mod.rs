// Grid module - cell partitioning, prefix narrowing and quadrant refinement

pub mod cell;
pub mod narrowing;
pub mod partition;
pub mod refine;

pub use cell::{Cell, GridSession};
pub use narrowing::{narrow, NarrowOutcome, NarrowResult};
pub use partition::{build_grid, display_cells};
pub use refine::{QuadrantRefiner, RefineOutcome, RefinementSession};
