//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logging (console on web, env_logger on native)
//! - Round seeds
//! - The JS boundary: the scene asks for a round, gets JSON back

use serde::Serialize;

use crate::consts::DEFAULT_MAX_RACE_MOVES;
use crate::layout::MazeLayout;
use crate::maze::{Maze, MazeError, RngState, generate};
use crate::race::{RaceSummary, run_race};
use crate::settings::MazeSettings;

/// Install the logger for this platform. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Install the logger for this platform. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::try_init();
}

/// Seed for a new round: the pinned one from settings, else a fresh draw
pub fn round_seed(settings: &MazeSettings) -> u64 {
    settings.seed.unwrap_or_else(rand::random)
}

/// Everything the scene needs to draw a round before racing starts
#[derive(Debug, Clone, Serialize)]
pub struct RoundPlan {
    pub seed: u64,
    pub layout: MazeLayout,
    pub maze: Maze,
}

/// A planned round plus its race
#[derive(Debug, Clone, Serialize)]
pub struct RoundResult {
    #[serde(flatten)]
    pub plan: RoundPlan,
    pub race: RaceSummary,
}

/// Fit the grid to a `width x height` scene and generate its maze
pub fn plan_round(
    seed: u64,
    width: f32,
    height: f32,
    settings: &MazeSettings,
) -> Result<RoundPlan, MazeError> {
    let layout = MazeLayout::for_screen(width, height);
    let mut rng = RngState::new(seed).to_rng();
    let maze = generate(layout.cols, layout.rows, &settings.maze_config(), &mut rng)?;

    Ok(RoundPlan { seed, layout, maze })
}

/// Plan a round and race `names` through it
pub fn play_round(
    seed: u64,
    width: f32,
    height: f32,
    names: &[String],
    settings: &MazeSettings,
) -> Result<RoundResult, MazeError> {
    let plan = plan_round(seed, width, height, settings)?;

    // Race randomness is a separate stream so the maze stays the same
    // whatever the racers do
    let mut rng = RngState::new(seed.wrapping_add(1)).to_rng();
    let racers = &names[..names.len().min(settings.effective_racer_count())];
    let race = run_race(&plan.maze, racers, DEFAULT_MAX_RACE_MOVES, &mut rng)?;

    Ok(RoundResult { plan, race })
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    use crate::settings::MazeSettings;

    fn seed_or_settings(seed: Option<u32>, settings: &MazeSettings) -> u64 {
        seed.map(u64::from)
            .unwrap_or_else(|| super::round_seed(settings))
    }

    fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    /// Generate the maze for a `width x height` scene as JSON
    #[wasm_bindgen]
    pub fn generate_maze_json(seed: Option<u32>, width: f32, height: f32) -> Result<String, JsValue> {
        super::init_logging();
        let settings = MazeSettings::load();
        let seed = seed_or_settings(seed, &settings);
        let plan = super::plan_round(seed, width, height, &settings).map_err(to_js)?;
        serde_json::to_string(&plan).map_err(to_js)
    }

    /// Generate the maze and run the full race; the scene replays the moves
    #[wasm_bindgen]
    pub fn simulate_race_json(
        seed: Option<u32>,
        width: f32,
        height: f32,
        names: Vec<String>,
    ) -> Result<String, JsValue> {
        super::init_logging();
        let settings = MazeSettings::load();
        let seed = seed_or_settings(seed, &settings);
        let round = super::play_round(seed, width, height, &names, &settings).map_err(to_js)?;
        serde_json::to_string(&round).map_err(to_js)
    }

    /// Current Maze Race settings as JSON, for the config form
    #[wasm_bindgen]
    pub fn load_settings_json() -> Result<String, JsValue> {
        serde_json::to_string(&MazeSettings::load()).map_err(to_js)
    }

    /// Store settings coming back from the config form
    #[wasm_bindgen]
    pub fn save_settings_json(json: &str) -> Result<(), JsValue> {
        let settings = MazeSettings::from_json(json).map_err(to_js)?;
        settings.save();
        Ok(())
    }
}
