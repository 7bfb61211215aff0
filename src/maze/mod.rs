//! Maze generation with a path-diversity guarantee
//!
//! Everything here runs synchronously before the race starts, on the same
//! thread that will drive rendering, so every search and retry loop carries
//! a small explicit ceiling:
//! - Seeded RNG only (see [`MazeRng`])
//! - Wall pairs change together, through [`Grid::open_wall_pair`] only
//! - No rendering or platform dependencies

pub mod ascii;
pub mod carve;
pub mod direction;
pub mod error;
pub mod generator;
pub mod grid;
pub mod paths;
pub mod repair;
pub mod rng;

pub use carve::{carve, loosen};
pub use direction::Direction;
pub use error::MazeError;
pub use generator::{Maze, MazeConfig, MazeVariant, Neighbor, generate};
pub use grid::{Cell, Coord, Grid, Walls};
pub use paths::{PathBudget, PathSearch, count_distinct_paths, search_paths};
pub use repair::{RepairBudget, RepairOutcome, RepairReport, ensure_minimum_paths};
pub use rng::{MazeRng, RngState};
