//! Run an A* search over a grid file and print its recorded history.
//!
//! Run: cargo run --bin trace -- maze.json5 --start 38,6 --goal 30,52

use std::error::Error;

use clap::{Parser, ValueEnum};
use gridtrace_core::Cell;
use gridtrace_demos::{load_grid, parse_cell, render_snapshot};
use gridtrace_paths::{PathFinder, SearchConfig, SearchState};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// One text frame per snapshot.
    Text,
    /// The full history as JSON.
    Json,
    /// Only the summary line.
    Summary,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Trace an A* grid search step by step", long_about = None)]
struct Args {
    /// JSON5 file holding the grid as rows of 0 (open) and 1 (wall).
    grid: std::path::PathBuf,
    /// Start cell as ROW,COL.
    #[arg(long, value_parser = parse_cell)]
    start: Cell,
    /// Goal cell as ROW,COL.
    #[arg(long, value_parser = parse_cell)]
    goal: Cell,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Stop after this many expansions.
    #[arg(long)]
    max_expansions: Option<usize>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let grid = load_grid(&args.grid)?;
    log::info!("loaded {}x{} grid from {}", grid.rows(), grid.cols(), args.grid.display());

    let config = SearchConfig {
        max_expansions: args.max_expansions,
    };
    let outcome = PathFinder::with_config(&grid, config).find(args.start, args.goal)?;

    match args.format {
        Format::Text => {
            for (i, snap) in outcome.history.iter().enumerate() {
                println!("-- step {i} current {}", snap.current);
                println!("{}", render_snapshot(&grid, snap, args.start, args.goal));
            }
        }
        Format::Json => println!("{}", serde_json::to_string(&outcome.history)?),
        Format::Summary => {}
    }

    match outcome.state {
        SearchState::GoalFound => eprintln!(
            "path of {} moves, {} expansions",
            outcome.cost().unwrap_or_default(),
            outcome.expansions
        ),
        SearchState::Exhausted => eprintln!("no path, {} expansions", outcome.expansions),
        SearchState::Halted => eprintln!("halted after {} expansions", outcome.expansions),
        SearchState::Running => {}
    }
    Ok(())
}
