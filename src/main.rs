//! Maze Rally entry point
//!
//! The browser build is driven from JS through `platform`'s exports. The
//! native binary plays one round in the terminal:
//!
//! ```text
//! maze-rally [seed] [width height]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use maze_rally::maze::ascii;
    use maze_rally::platform::{init_logging, play_round, round_seed};
    use maze_rally::settings::MazeSettings;

    init_logging();
    log::info!("Maze Rally (native) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = MazeSettings::load();
    let seed = match args.first().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            eprintln!("invalid seed {:?}: {}", args[0], e);
            std::process::exit(2);
        }
        None => round_seed(&settings),
    };
    let (width, height) = match (args.get(1), args.get(2)) {
        (Some(w), Some(h)) => match (w.parse::<f32>(), h.parse::<f32>()) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                eprintln!("invalid scene size {} x {}", w, h);
                std::process::exit(2);
            }
        },
        _ => (1280.0, 720.0),
    };

    let names: Vec<String> = DEMO_RACERS.iter().map(|s| s.to_string()).collect();
    let round = match play_round(seed, width, height, &names, &settings) {
        Ok(round) => round,
        Err(e) => {
            log::error!("Could not set up the round: {}", e);
            std::process::exit(1);
        }
    };

    let maze = &round.plan.maze;
    let report = maze.repair_report();
    println!(
        "Seed {} | {}x{} maze | {} paths ({:?}, {} repair attempts)",
        seed,
        maze.cols(),
        maze.rows(),
        report.paths_after,
        report.outcome,
        report.attempts
    );
    println!("{}", ascii::render(maze));

    match &round.race.winner {
        Some(name) => println!(
            "{} escapes first! ({} moves in total)",
            name,
            round.race.moves.len()
        ),
        None => println!("No winner ({:?})", round.race.phase),
    }
}

#[cfg(not(target_arch = "wasm32"))]
const DEMO_RACERS: [&str; 5] = ["Australia", "Norway", "Egypt", "Mongolia", "Japan"];

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry points live in `platform`, this is just to satisfy the compiler
}
