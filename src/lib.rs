//! Maze Rally - the Maze Race mini-game of the chance arcade
//!
//! Core modules:
//! - `maze`: Seeded maze generation (carve, loosen, path-diversity repair)
//! - `race`: Deterministic racer simulation over a finished maze
//! - `layout`: Fitting the grid into the screen area
//! - `platform`: Logging and the browser boundary
//! - `settings`: Persisted tuning preferences

pub mod layout;
pub mod maze;
pub mod platform;
pub mod race;
pub mod settings;

pub use layout::MazeLayout;
pub use maze::{Maze, MazeConfig, MazeError, MazeVariant, generate};
pub use race::{RacePhase, RaceSummary, run_race};
pub use settings::MazeSettings;

/// Game configuration constants
pub mod consts {
    /// Loosening probability, strict variant
    pub const STRICT_OPEN_PROBABILITY: f64 = 0.12;
    /// Loosening probability, loose variant
    pub const LOOSE_OPEN_PROBABILITY: f64 = 0.35;

    /// Distinct start-to-goal paths the repair aims for
    pub const DEFAULT_MIN_PATHS: usize = 3;
    /// Path search: stop after this many paths
    pub const DEFAULT_PATH_LIMIT: usize = 3;
    /// Path search: longest path in steps
    pub const MAX_PATH_DEPTH: usize = 100;
    /// Path search: hard ceiling on cell visits
    pub const MAX_PATH_OPERATIONS: usize = 1000;

    /// Repair: cell picks between recounts
    pub const REPAIR_BATCH_SIZE: usize = 10;
    /// Repair: recounts without a new best before giving up
    pub const MAX_CHECKS_WITHOUT_PROGRESS: usize = 5;
    /// Strict repair budget: attempts per cell, capped
    pub const STRICT_ATTEMPTS_PER_CELL: usize = 2;
    pub const STRICT_ATTEMPT_CAP: usize = 50;
    /// Loose repair budget: attempts per cell, uncapped
    pub const LOOSE_ATTEMPTS_PER_CELL: usize = 8;

    /// Layout: largest cell side (px)
    pub const MAX_CELL_SIZE: f32 = 40.0;
    pub const MIN_MAZE_COLS: u32 = 7;
    pub const MIN_MAZE_ROWS: u32 = 6;
    /// Layout: maze area offset from the scene's top-left corner (px)
    pub const MAZE_AREA_INSET: f32 = 90.0;
    /// Layout: total horizontal space reserved around the maze (px)
    pub const MAZE_AREA_MARGIN_X: f32 = 180.0;
    /// Layout: total vertical space reserved for title, maze margin and footer (px)
    pub const MAZE_AREA_MARGIN_Y: f32 = 210.0;

    /// Race: at most this many racers
    pub const MAX_RACERS: usize = 5;
    /// Race: cells a racer remembers leaving
    pub const RACER_MEMORY: usize = 4;
    /// Race: pause between a racer's moves (ms, inclusive)
    pub const MOVE_DELAY_MIN_MS: u32 = 100;
    pub const MOVE_DELAY_MAX_MS: u32 = 200;
    /// Race: hard stop for the simulation
    pub const DEFAULT_MAX_RACE_MOVES: u32 = 20_000;
    /// Race: chance to take the best-weighted step when something is unexplored
    pub const GREEDY_STEP_CHANCE: f64 = 0.6;
    pub const AWAY_FROM_GOAL_WEIGHT: f64 = 0.55;
    pub const UNVISITED_WEIGHT: f64 = 2.4;
    pub const VISITED_WEIGHT: f64 = 0.5;
    pub const SAME_HEADING_WEIGHT: f64 = 1.15;
    pub const RECENT_CELL_WEIGHT: f64 = 0.15;
}
