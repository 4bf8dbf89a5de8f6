//! Board representation and movement.
//!
//! Contains the grid type, the four move directions, the line collapse
//! primitive, and random tile spawning.

pub mod collapse;
pub mod direction;
pub mod spawn;
pub mod state;

pub use collapse::{collapse_line, MoveOutcome};
pub use direction::{Direction, Geometry, Line, ALL_DIRECTIONS};
pub use state::{Board, CELL_COUNT, SIDE};
