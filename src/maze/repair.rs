//! Path-diversity repair
//!
//! Knocks out random walls in batches until the start-to-goal path count
//! reaches the target, the attempt budget runs out, or several recounts in a
//! row fail to improve on the best count seen. Falling short is not an
//! error: the grid is still connected and the round can start.

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::paths::{PathBudget, search_between};
use super::rng::MazeRng;
use crate::consts::{
    DEFAULT_MIN_PATHS, LOOSE_ATTEMPTS_PER_CELL, MAX_CHECKS_WITHOUT_PROGRESS,
    REPAIR_BATCH_SIZE, STRICT_ATTEMPT_CAP, STRICT_ATTEMPTS_PER_CELL,
};

/// Limits for one repair run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairBudget {
    /// Distinct start-to-goal paths wanted
    pub min_paths: usize,
    /// Random cell picks allowed in total
    pub max_total_attempts: usize,
    /// Consecutive recounts without a new best before giving up
    pub max_checks_without_progress: usize,
    /// Picks between recounts
    pub batch_size: usize,
}

impl RepairBudget {
    /// Tight budget: `min(cells * 2, 50)` attempts
    pub fn strict(cols: u32, rows: u32) -> Self {
        let cells = cols as usize * rows as usize;
        Self {
            min_paths: DEFAULT_MIN_PATHS,
            max_total_attempts: (cells * STRICT_ATTEMPTS_PER_CELL).min(STRICT_ATTEMPT_CAP),
            max_checks_without_progress: MAX_CHECKS_WITHOUT_PROGRESS,
            batch_size: REPAIR_BATCH_SIZE,
        }
    }

    /// Generous budget: `cells * 8` attempts
    pub fn loose(cols: u32, rows: u32) -> Self {
        let cells = cols as usize * rows as usize;
        Self {
            max_total_attempts: cells * LOOSE_ATTEMPTS_PER_CELL,
            ..Self::strict(cols, rows)
        }
    }

    pub fn with_min_paths(self, min_paths: usize) -> Self {
        Self { min_paths, ..self }
    }
}

/// Why the repair loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepairOutcome {
    /// Path target reached
    Satisfied,
    /// `max_total_attempts` spent before reaching the target
    AttemptsExhausted,
    /// Recounts stopped improving, or no closed interior wall is left
    Stalled,
}

/// Summary of a repair run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairReport {
    pub outcome: RepairOutcome,
    /// Cell picks spent
    pub attempts: usize,
    /// Removal batches run
    pub rounds: usize,
    pub walls_opened: usize,
    pub paths_before: usize,
    pub paths_after: usize,
}

impl RepairReport {
    pub fn is_satisfied(&self) -> bool {
        self.outcome == RepairOutcome::Satisfied
    }
}

/// Open random walls until at least `budget.min_paths` simple paths join
/// start and goal, or a budget runs out.
///
/// Path counts use `paths` with its limit replaced by `budget.min_paths`.
pub fn ensure_minimum_paths<R: MazeRng>(
    grid: &mut Grid,
    budget: &RepairBudget,
    paths: &PathBudget,
    rng: &mut R,
) -> RepairReport {
    let path_budget = paths.with_limit(budget.min_paths);
    let start = grid.index(grid.start());
    let goal = grid.index(grid.goal());

    let paths_before = search_between(grid, start, goal, &path_budget).paths;
    let mut current = paths_before;
    let mut best = paths_before;
    let mut attempts = 0;
    let mut rounds = 0;
    let mut walls_opened = 0;
    let mut checks_without_progress = 0;

    let outcome = loop {
        if current >= budget.min_paths {
            break RepairOutcome::Satisfied;
        }
        if grid.open_pair_count() == grid.interior_pair_count() {
            break RepairOutcome::Stalled;
        }
        if checks_without_progress >= budget.max_checks_without_progress {
            break RepairOutcome::Stalled;
        }
        if attempts >= budget.max_total_attempts {
            break RepairOutcome::AttemptsExhausted;
        }

        rounds += 1;
        for _ in 0..budget.batch_size {
            if attempts >= budget.max_total_attempts {
                break;
            }
            attempts += 1;

            let idx = rng.index(grid.len());
            let closed = grid.closed_walls_at(idx);
            if let Some(&dir) = rng.pick(&closed) {
                grid.open_pair_at(idx, dir);
                walls_opened += 1;
            }
        }

        current = search_between(grid, start, goal, &path_budget).paths;
        if current > best {
            best = current;
            checks_without_progress = 0;
        } else {
            checks_without_progress += 1;
        }
        log::debug!(
            "repair round {}: {} paths, {} attempts, {} walls opened",
            rounds,
            current,
            attempts,
            walls_opened
        );
    };

    RepairReport {
        outcome,
        attempts,
        rounds,
        walls_opened,
        paths_before,
        paths_after: current,
    }
}
