//! Precondition failures for grid construction and queries

use std::fmt;

/// Programmer errors: bad dimensions, a coordinate outside the grid, or
/// decoded grid data that breaks the wall invariants.
///
/// Budget exhaustion during path counting or repair is not an error; see
/// [`super::PathSearch`] and [`super::RepairOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeError {
    /// `cols` or `rows` was zero
    InvalidDimensions { cols: u32, rows: u32 },
    /// Coordinate does not address a cell of a `cols x rows` grid
    OutOfBounds { x: u32, y: u32, cols: u32, rows: u32 },
    /// Decoded grid data that no sequence of paired wall openings produces
    MalformedGrid { reason: &'static str },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::InvalidDimensions { cols, rows } => write!(
                f,
                "invalid maze dimensions {cols}x{rows}: both must be at least 1"
            ),
            MazeError::OutOfBounds { x, y, cols, rows } => write!(
                f,
                "cell ({x}, {y}) is outside the {cols}x{rows} maze"
            ),
            MazeError::MalformedGrid { reason } => write!(f, "malformed maze grid: {reason}"),
        }
    }
}

impl std::error::Error for MazeError {}
