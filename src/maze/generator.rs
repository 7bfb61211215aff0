//! Full generation pipeline and the frozen maze handed to gameplay
//!
//! create -> carve -> loosen -> repair, then the grid is wrapped in a
//! [`Maze`] that only exposes read-only queries.

use serde::{Deserialize, Serialize};

use super::carve::{carve, loosen};
use super::direction::Direction;
use super::error::MazeError;
use super::grid::{Cell, Coord, Grid};
use super::paths::PathBudget;
use super::repair::{RepairBudget, RepairReport, ensure_minimum_paths};
use super::rng::MazeRng;
use crate::consts::{DEFAULT_MIN_PATHS, LOOSE_OPEN_PROBABILITY, STRICT_OPEN_PROBABILITY};

/// Tuning family for generation and repair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MazeVariant {
    /// Few extra openings, small repair budget
    #[default]
    Strict,
    /// Many extra openings, large repair budget
    Loose,
}

impl MazeVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            MazeVariant::Strict => "Strict",
            MazeVariant::Loose => "Loose",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "strict" | "tight" => Some(MazeVariant::Strict),
            "loose" | "open" => Some(MazeVariant::Loose),
            _ => None,
        }
    }

    /// Chance that the loosening pass opens a remaining wall
    pub fn open_probability(&self) -> f64 {
        match self {
            MazeVariant::Strict => STRICT_OPEN_PROBABILITY,
            MazeVariant::Loose => LOOSE_OPEN_PROBABILITY,
        }
    }

    /// Repair budget for a grid of this size
    pub fn repair_budget(&self, cols: u32, rows: u32) -> RepairBudget {
        match self {
            MazeVariant::Strict => RepairBudget::strict(cols, rows),
            MazeVariant::Loose => RepairBudget::loose(cols, rows),
        }
    }
}

/// Generation parameters for one round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MazeConfig {
    pub variant: MazeVariant,
    /// Loosening probability in `[0, 1]`
    pub open_probability: f64,
    /// Path-diversity target
    pub min_paths: usize,
    /// Ceilings for each path count during repair
    pub path_budget: PathBudget,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self::from_variant(MazeVariant::default())
    }
}

impl MazeConfig {
    pub fn from_variant(variant: MazeVariant) -> Self {
        Self {
            variant,
            open_probability: variant.open_probability(),
            min_paths: DEFAULT_MIN_PATHS,
            path_budget: PathBudget::default(),
        }
    }
}

/// An open side of a cell and the cell behind it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbor {
    pub coord: Coord,
    pub direction: Direction,
}

/// A finished maze. Walls can no longer change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    grid: Grid,
    repair: RepairReport,
}

impl Maze {
    pub fn cols(&self) -> u32 {
        self.grid.cols()
    }

    pub fn rows(&self) -> u32 {
        self.grid.rows()
    }

    pub fn start(&self) -> Coord {
        self.grid.start()
    }

    pub fn goal(&self) -> Coord {
        self.grid.goal()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.grid.contains(coord)
    }

    pub fn cell(&self, coord: Coord) -> Result<&Cell, MazeError> {
        self.grid.cell(coord)
    }

    pub fn is_open(&self, coord: Coord, dir: Direction) -> Result<bool, MazeError> {
        self.grid.is_open(coord, dir)
    }

    /// Cells one legal step away from `coord`
    pub fn neighbors_of(&self, coord: Coord) -> Result<Vec<Neighbor>, MazeError> {
        Ok(self
            .grid
            .open_neighbors(coord)?
            .into_iter()
            .map(|(coord, direction)| Neighbor { coord, direction })
            .collect())
    }

    /// Read-only view of the underlying grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn repair_report(&self) -> &RepairReport {
        &self.repair
    }
}

/// Build a maze: carve a spanning tree, loosen it, then repair path diversity
pub fn generate<R: MazeRng>(
    cols: u32,
    rows: u32,
    config: &MazeConfig,
    rng: &mut R,
) -> Result<Maze, MazeError> {
    let mut grid = Grid::new(cols, rows)?;

    carve(&mut grid, rng);
    log::debug!(
        "carved {}x{} maze: {} open pairs",
        cols,
        rows,
        grid.open_pair_count()
    );

    let loosened = loosen(&mut grid, config.open_probability, rng);
    log::debug!(
        "loosened {} walls (p = {:.2})",
        loosened,
        config.open_probability
    );

    let budget = config
        .variant
        .repair_budget(cols, rows)
        .with_min_paths(config.min_paths);
    let repair = ensure_minimum_paths(&mut grid, &budget, &config.path_budget, rng);

    if repair.is_satisfied() {
        log::info!(
            "{} maze {}x{} ready: {} paths after {} repair attempts",
            config.variant.as_str(),
            cols,
            rows,
            repair.paths_after,
            repair.attempts
        );
    } else {
        log::warn!(
            "{} maze {}x{} under target: {}/{} paths ({:?} after {} attempts)",
            config.variant.as_str(),
            cols,
            rows,
            repair.paths_after,
            config.min_paths,
            repair.outcome,
            repair.attempts
        );
    }

    Ok(Maze { grid, repair })
}
