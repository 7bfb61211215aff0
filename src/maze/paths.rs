//! Bounded enumeration of simple start-to-goal paths
//!
//! A loose grid can hold exponentially many simple paths, so the search
//! carries three independent ceilings (path limit, depth, operation count)
//! and reports whatever it found when any of them trips.

use serde::{Deserialize, Serialize};

use super::error::MazeError;
use super::grid::{Coord, Grid};
use crate::consts::{DEFAULT_PATH_LIMIT, MAX_PATH_DEPTH, MAX_PATH_OPERATIONS};

/// Ceilings for one path search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathBudget {
    /// Stop once this many paths are found
    pub limit: usize,
    /// Longest path explored, in steps from the start cell
    pub max_depth: usize,
    /// Total cell visits (recursive calls) allowed
    pub max_operations: usize,
}

impl Default for PathBudget {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PATH_LIMIT,
            max_depth: MAX_PATH_DEPTH,
            max_operations: MAX_PATH_OPERATIONS,
        }
    }
}

impl PathBudget {
    /// Same depth/operation ceilings with a different path limit
    pub fn with_limit(self, limit: usize) -> Self {
        Self { limit, ..self }
    }
}

/// Outcome of a bounded path search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSearch {
    /// Distinct simple paths found (never more than the limit)
    pub paths: usize,
    /// Cell visits spent, never more than `max_operations`
    pub operations: usize,
    /// Branches abandoned for exceeding `max_depth`
    pub depth_cutoffs: usize,
    /// The operation ceiling stopped the search
    pub operations_exhausted: bool,
}

impl PathSearch {
    /// True when the count may be lower than the real number of paths
    pub fn is_truncated(&self) -> bool {
        self.operations_exhausted || self.depth_cutoffs > 0
    }
}

/// Count simple paths from `start` to `goal`, stopping at `budget.limit`
pub fn count_distinct_paths(
    grid: &Grid,
    start: Coord,
    goal: Coord,
    budget: &PathBudget,
) -> Result<usize, MazeError> {
    Ok(search_paths(grid, start, goal, budget)?.paths)
}

/// [`count_distinct_paths`] with the work accounting
pub fn search_paths(
    grid: &Grid,
    start: Coord,
    goal: Coord,
    budget: &PathBudget,
) -> Result<PathSearch, MazeError> {
    grid.cell(start)?;
    grid.cell(goal)?;
    Ok(search_between(grid, grid.index(start), grid.index(goal), budget))
}

/// Search between two arena indices already known to be in bounds
pub(crate) fn search_between(grid: &Grid, start: usize, goal: usize, budget: &PathBudget) -> PathSearch {
    let mut walker = PathWalker {
        grid,
        goal,
        budget,
        on_path: vec![false; grid.len()],
        result: PathSearch {
            paths: 0,
            operations: 0,
            depth_cutoffs: 0,
            operations_exhausted: false,
        },
    };
    walker.walk(start, 0);

    walker.result
}

struct PathWalker<'a> {
    grid: &'a Grid,
    goal: usize,
    budget: &'a PathBudget,
    /// Cells on the current path only; cleared on backtrack
    on_path: Vec<bool>,
    result: PathSearch,
}

impl PathWalker<'_> {
    fn done(&self) -> bool {
        self.result.paths >= self.budget.limit || self.result.operations_exhausted
    }

    fn walk(&mut self, idx: usize, depth: usize) {
        if self.done() {
            return;
        }
        if self.result.operations >= self.budget.max_operations {
            self.result.operations_exhausted = true;
            return;
        }
        self.result.operations += 1;

        if depth > self.budget.max_depth {
            self.result.depth_cutoffs += 1;
            return;
        }
        if idx == self.goal {
            self.result.paths += 1;
            return;
        }

        let grid = self.grid;
        self.on_path[idx] = true;
        for next in grid.open_neighbor_indices(idx) {
            if self.done() {
                break;
            }
            if !self.on_path[next] {
                self.walk(next, depth + 1);
            }
        }
        self.on_path[idx] = false;
    }
}
