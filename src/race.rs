//! Maze Race simulation
//!
//! Racers leave the start cell together and wander toward the goal with a
//! biased random walk; the first one to step onto the goal wins. Each racer
//! moves on its own timer, so the simulation is event driven: the racer with
//! the earliest pending move always goes next (ties by id). The maze is only
//! ever read through its query interface.

use std::collections::{HashSet, VecDeque};

use serde::Serialize;

use crate::consts::*;
use crate::maze::{Coord, Direction, Maze, MazeError, MazeRng, Neighbor};

/// One contestant
#[derive(Debug, Clone, Serialize)]
pub struct Racer {
    pub id: u32,
    pub name: String,
    pub cell: Coord,
    pub last_direction: Option<Direction>,
    /// Time of the next move (ms since race start)
    pub next_move_ms: u32,
    /// Most recent cells left behind, oldest first
    #[serde(skip)]
    memory: VecDeque<Coord>,
    #[serde(skip)]
    visited: HashSet<Coord>,
}

impl Racer {
    fn new(id: u32, name: String, start: Coord, first_move_ms: u32) -> Self {
        Self {
            id,
            name,
            cell: start,
            last_direction: None,
            next_move_ms: first_move_ms,
            memory: VecDeque::with_capacity(RACER_MEMORY + 1),
            visited: HashSet::from([start]),
        }
    }

    pub fn has_visited(&self, coord: Coord) -> bool {
        self.visited.contains(&coord)
    }

    pub fn remembers(&self, coord: Coord) -> bool {
        self.memory.contains(&coord)
    }

    fn advance(&mut self, step: Neighbor) {
        self.memory.push_back(self.cell);
        if self.memory.len() > RACER_MEMORY {
            self.memory.pop_front();
        }
        self.visited.insert(step.coord);
        self.cell = step.coord;
        self.last_direction = Some(step.direction);
    }
}

/// A single racer step, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RaceMove {
    pub racer: u32,
    pub at_ms: u32,
    pub from: Coord,
    pub to: Coord,
    pub direction: Direction,
}

/// Current phase of a race
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RacePhase {
    Running,
    /// Someone reached the goal
    Finished { winner: u32 },
    /// Nobody to race
    NoRacers,
    /// Move cap hit before anyone arrived
    TimedOut,
}

/// Complete race state (deterministic for a given maze and seed)
#[derive(Debug, Clone, Serialize)]
pub struct RaceState {
    pub racers: Vec<Racer>,
    pub phase: RacePhase,
    /// Moves made so far
    pub move_count: u32,
}

impl RaceState {
    /// Line up at most [`MAX_RACERS`] racers on the start cell.
    ///
    /// Every move waits a fresh delay, the first one included.
    pub fn new<R: MazeRng>(maze: &Maze, names: &[String], rng: &mut R) -> Self {
        let racers: Vec<Racer> = names
            .iter()
            .take(MAX_RACERS)
            .enumerate()
            .map(|(i, name)| Racer::new(i as u32, name.clone(), maze.start(), move_delay(rng)))
            .collect();

        let phase = match racers.first() {
            None => RacePhase::NoRacers,
            // Degenerate one-cell maze: everyone starts on the goal
            Some(first) if maze.start() == maze.goal() => RacePhase::Finished { winner: first.id },
            Some(_) => RacePhase::Running,
        };

        Self {
            racers,
            phase,
            move_count: 0,
        }
    }

    pub fn winner(&self) -> Option<&Racer> {
        match self.phase {
            RacePhase::Finished { winner } => self.racers.iter().find(|r| r.id == winner),
            _ => None,
        }
    }

    /// Racer whose move is due first
    fn next_racer(&self) -> Option<usize> {
        self.racers
            .iter()
            .enumerate()
            .min_by_key(|(_, r)| (r.next_move_ms, r.id))
            .map(|(i, _)| i)
    }
}

/// Pick the next cell for `racer`, `None` if it is boxed in
pub fn choose_step<R: MazeRng>(
    maze: &Maze,
    racer: &Racer,
    rng: &mut R,
) -> Result<Option<Neighbor>, MazeError> {
    let neighbors = maze.neighbors_of(racer.cell)?;
    if neighbors.is_empty() {
        return Ok(None);
    }

    let goal = maze.goal();
    let current_distance = racer.cell.manhattan(goal);
    let weights: Vec<f64> = neighbors
        .iter()
        .map(|n| {
            let distance = n.coord.manhattan(goal);
            let mut weight = 1.0 / (distance as f64 + 1.0);
            if distance > current_distance {
                weight *= AWAY_FROM_GOAL_WEIGHT;
            }
            weight *= if racer.has_visited(n.coord) {
                VISITED_WEIGHT
            } else {
                UNVISITED_WEIGHT
            };
            if racer.last_direction == Some(n.direction) {
                weight *= SAME_HEADING_WEIGHT;
            }
            if neighbors.len() > 1 && racer.remembers(n.coord) {
                weight *= RECENT_CELL_WEIGHT;
            }
            weight
        })
        .collect();

    let has_unvisited = neighbors.iter().any(|n| !racer.has_visited(n.coord));
    let idx = if has_unvisited && rng.chance(GREEDY_STEP_CHANCE) {
        // First maximum wins ties
        weights
            .iter()
            .enumerate()
            .fold(0, |best, (i, &w)| if w > weights[best] { i } else { best })
    } else {
        pick_weighted(&weights, rng)
    };

    Ok(Some(neighbors[idx]))
}

/// Roulette-wheel pick proportional to `weights` (non-empty)
fn pick_weighted<R: MazeRng>(weights: &[f64], rng: &mut R) -> usize {
    let total: f64 = weights.iter().sum();
    let mut threshold = rng.unit_f64() * total;
    for (i, &w) in weights.iter().enumerate() {
        threshold -= w;
        if threshold <= 0.0 {
            return i;
        }
    }
    weights.len() - 1
}

/// Advance the race by one racer move
pub fn step<R: MazeRng>(
    state: &mut RaceState,
    maze: &Maze,
    rng: &mut R,
) -> Result<Option<RaceMove>, MazeError> {
    if state.phase != RacePhase::Running {
        return Ok(None);
    }
    let Some(idx) = state.next_racer() else {
        return Ok(None);
    };

    let delay = move_delay(rng);
    let racer = &mut state.racers[idx];
    let at_ms = racer.next_move_ms;
    racer.next_move_ms = at_ms + delay;

    let Some(next) = choose_step(maze, racer, rng)? else {
        return Ok(None);
    };
    let from = racer.cell;
    racer.advance(next);
    state.move_count += 1;

    if next.coord == maze.goal() {
        state.phase = RacePhase::Finished { winner: racer.id };
        log::info!("{} escapes first after {} ms", racer.name, at_ms);
    }

    Ok(Some(RaceMove {
        racer: racer.id,
        at_ms,
        from,
        to: next.coord,
        direction: next.direction,
    }))
}

/// Pause before a racer's next move, in ms
fn move_delay<R: MazeRng>(rng: &mut R) -> u32 {
    let spread = (MOVE_DELAY_MAX_MS - MOVE_DELAY_MIN_MS + 1) as usize;
    MOVE_DELAY_MIN_MS + rng.index(spread) as u32
}

/// Full race result
#[derive(Debug, Clone, Serialize)]
pub struct RaceSummary {
    pub phase: RacePhase,
    pub winner: Option<String>,
    pub moves: Vec<RaceMove>,
}

/// Run a race to completion, or until `max_moves` moves have been made
pub fn run_race<R: MazeRng>(
    maze: &Maze,
    names: &[String],
    max_moves: u32,
    rng: &mut R,
) -> Result<RaceSummary, MazeError> {
    let mut state = RaceState::new(maze, names, rng);
    let mut moves = Vec::new();
    let mut idle = 0;

    while state.phase == RacePhase::Running {
        if state.move_count >= max_moves || idle > state.racers.len() {
            state.phase = RacePhase::TimedOut;
            log::warn!("race stopped after {} moves without a winner", state.move_count);
            break;
        }
        match step(&mut state, maze, rng)? {
            Some(mv) => {
                idle = 0;
                moves.push(mv);
            }
            None => idle += 1,
        }
    }

    Ok(RaceSummary {
        phase: state.phase,
        winner: state.winner().map(|r| r.name.clone()),
        moves,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{MazeConfig, MazeVariant, RngState, generate};

    fn names(n: usize) -> Vec<String> {
        ["Australia", "Norway", "Egypt", "Mongolia", "Japan", "Peru", "Jamaica"]
            .iter()
            .take(n)
            .map(|s| s.to_string())
            .collect()
    }

    fn maze(cols: u32, rows: u32, seed: u64) -> Maze {
        let config = MazeConfig::from_variant(MazeVariant::Loose);
        generate(cols, rows, &config, &mut RngState::new(seed).to_rng()).unwrap()
    }

    #[test]
    fn test_new_race_caps_racers() {
        let maze = maze(7, 6, 1);
        let state = RaceState::new(&maze, &names(7), &mut RngState::new(1).to_rng());
        assert_eq!(state.racers.len(), MAX_RACERS);
        assert_eq!(state.phase, RacePhase::Running);
        assert!(state.racers.iter().all(|r| r.cell == maze.start()));
    }

    #[test]
    fn test_no_racers() {
        let maze = maze(7, 6, 1);
        let summary = run_race(&maze, &[], 100, &mut RngState::new(1).to_rng()).unwrap();
        assert_eq!(summary.phase, RacePhase::NoRacers);
        assert!(summary.winner.is_none());
        assert!(summary.moves.is_empty());
    }

    #[test]
    fn test_single_cell_maze_first_racer_wins() {
        let maze = maze(1, 1, 1);
        let summary = run_race(&maze, &names(3), 100, &mut RngState::new(1).to_rng()).unwrap();
        assert_eq!(summary.winner.as_deref(), Some("Australia"));
        assert!(summary.moves.is_empty());
    }

    #[test]
    fn test_corridor_race_only_moves_horizontally() {
        let maze = maze(6, 1, 2);
        let summary = run_race(&maze, &names(1), 100, &mut RngState::new(2).to_rng()).unwrap();
        assert_eq!(summary.phase, RacePhase::Finished { winner: 0 });
        let right = summary.moves.iter().filter(|m| m.direction == Direction::Right).count();
        let left = summary.moves.iter().filter(|m| m.direction == Direction::Left).count();
        assert_eq!(right + left, summary.moves.len());
        assert_eq!(right - left, 5);
    }

    #[test]
    fn test_race_moves_are_legal_and_ordered() {
        let maze = maze(9, 7, 3);
        let summary =
            run_race(&maze, &names(5), DEFAULT_MAX_RACE_MOVES, &mut RngState::new(3).to_rng())
                .unwrap();

        let RacePhase::Finished { winner } = summary.phase else {
            panic!("race did not finish: {:?}", summary.phase);
        };
        let last = summary.moves.last().unwrap();
        assert_eq!(last.racer, winner);
        assert_eq!(last.to, maze.goal());

        for pair in summary.moves.windows(2) {
            assert!(pair[0].at_ms <= pair[1].at_ms);
        }
        for mv in &summary.moves {
            assert!(maze.is_open(mv.from, mv.direction).unwrap());
            assert_eq!(maze.grid().neighbor(mv.from, mv.direction), Some(mv.to));
        }
    }

    #[test]
    fn test_first_moves_wait_a_delay() {
        let maze = maze(9, 7, 3);
        let summary =
            run_race(&maze, &names(3), DEFAULT_MAX_RACE_MOVES, &mut RngState::new(8).to_rng())
                .unwrap();

        for id in 0..3 {
            let first = summary.moves.iter().find(|m| m.racer == id).unwrap();
            assert!(first.at_ms >= MOVE_DELAY_MIN_MS);
            assert!(first.at_ms <= MOVE_DELAY_MAX_MS);
        }
        for (a, b) in summary.moves.iter().zip(summary.moves.iter().skip(1)) {
            if a.racer == b.racer {
                assert!(b.at_ms - a.at_ms >= MOVE_DELAY_MIN_MS);
            }
        }
    }

    #[test]
    fn test_race_is_deterministic() {
        let maze = maze(8, 6, 4);
        let a = run_race(&maze, &names(4), 5_000, &mut RngState::new(10).to_rng()).unwrap();
        let b = run_race(&maze, &names(4), 5_000, &mut RngState::new(10).to_rng()).unwrap();
        assert_eq!(a.moves, b.moves);
        assert_eq!(a.winner, b.winner);
    }

    #[test]
    fn test_move_cap_times_out() {
        let maze = maze(20, 20, 5);
        let summary = run_race(&maze, &names(2), 3, &mut RngState::new(5).to_rng()).unwrap();
        assert_eq!(summary.phase, RacePhase::TimedOut);
        assert_eq!(summary.moves.len(), 3);
        assert!(summary.winner.is_none());
    }

    #[test]
    fn test_memory_is_bounded() {
        let maze = maze(6, 1, 6);
        let mut racer = Racer::new(0, "x".into(), maze.start(), 0);
        for x in 1..6 {
            racer.advance(Neighbor {
                coord: Coord::new(x, 0),
                direction: Direction::Right,
            });
        }
        assert_eq!(racer.memory.len(), RACER_MEMORY);
        assert!(!racer.remembers(Coord::new(0, 0)));
        assert!(racer.remembers(Coord::new(4, 0)));
        assert!(racer.has_visited(Coord::new(5, 0)));
    }

    #[test]
    fn test_pick_weighted_follows_threshold() {
        struct Fixed(f64);
        impl MazeRng for Fixed {
            fn unit_f64(&mut self) -> f64 {
                self.0
            }
            fn index(&mut self, _len: usize) -> usize {
                0
            }
        }

        let weights = [1.0, 2.0, 1.0];
        assert_eq!(pick_weighted(&weights, &mut Fixed(0.0)), 0);
        assert_eq!(pick_weighted(&weights, &mut Fixed(0.5)), 1);
        assert_eq!(pick_weighted(&weights, &mut Fixed(0.99)), 2);
    }
}
