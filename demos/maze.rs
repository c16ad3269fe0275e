//! Solve a maze file from the command line.
//!
//! Run: cargo run --bin maze -- path/to/maze.txt [--order dfs] [--cap 5] [--distances]

use clap::Parser;
use maze_demos::{Cli, run};

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    match run(&cli) {
        Ok(report) => print!("{report}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
