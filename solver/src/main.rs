use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use pipemania::{Grid, Solver, SolverConfig, SolverFailure};

#[derive(Parser, Debug)]
#[command(name = "solver")]
#[command(about = "Rotate the pieces of a pipe puzzle until they form one network")]
#[command(version)]
struct Cli {
    /// Puzzle file; read from standard input when omitted
    input: Option<PathBuf>,

    /// Give up after taking this many states off the search frontier (0 for no limit)
    #[arg(short, long, default_value = "0")]
    max_dequeues: usize,
}

fn read_puzzle(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).context("reading standard input")?;
            Ok(text)
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let grid: Grid = read_puzzle(cli.input.as_ref())?.parse()?;
    info!("read a {}x{} puzzle", grid.dims().0, grid.dims().1);

    let config = SolverConfig::new().with_dequeue_limit(cli.max_dequeues);
    match Solver::with_config(grid, config).solve() {
        Ok(solution) => {
            info!("{:?}", solution.stats);
            println!("{}", solution.grid);
        }
        Err(SolverFailure::Exhausted) => println!("No solution found."),
        Err(failure) => return Err(failure.into()),
    }

    Ok(())
}
