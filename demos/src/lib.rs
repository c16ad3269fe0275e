//! Shared pieces of the `maze` command-line solver: argument parsing,
//! configuration loading and the report it prints.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use maze_core::MazeError;
use maze_paths::{FillOrder, LogObserver, Solver, SolverConfig};
use maze_text::{MazeFile, ParseError, render, render_distances};

/// Find a path through a maze file and draw it.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Maze file: "rows cols", the 0/1 grid, then entry and exit lines
    pub file: PathBuf,

    /// JSON solver configuration, e.g. {"visit_cap": 5, "order": "depth-first"}
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Times a single cell may be advanced into (overrides --config)
    #[arg(long)]
    pub cap: Option<u32>,

    /// Fill traversal order (overrides --config)
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,

    /// Also print the distance label of every cell
    #[arg(long)]
    pub distances: bool,

    /// Raise log verbosity (-v debug, -vv trace of every fill step)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// `--order` values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Breadth-first: exact shortest distances
    Bfs,
    /// Depth-first walk with bounded revisits, then tightened labels
    Dfs,
}

impl From<OrderArg> for FillOrder {
    fn from(o: OrderArg) -> Self {
        match o {
            OrderArg::Bfs => FillOrder::BreadthFirst,
            OrderArg::Dfs => FillOrder::DepthFirst,
        }
    }
}

impl Cli {
    /// Default `env_logger` filter for the chosen verbosity. `RUST_LOG`
    /// still wins when set.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Start from the config file (if any), then apply flag overrides.
    pub fn solver_config(&self) -> Result<SolverConfig, CliError> {
        let mut cfg = match &self.config {
            Some(path) => {
                let text = read(path)?;
                serde_json::from_str(&text).map_err(|source| CliError::Config {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            None => SolverConfig::default(),
        };
        if let Some(cap) = self.cap {
            cfg.visit_cap = cap;
        }
        if let Some(order) = self.order {
            cfg.order = order.into();
        }
        Ok(cfg)
    }
}

/// Load, solve and render according to `cli`.
pub fn run(cli: &Cli) -> Result<String, CliError> {
    let config = cli.solver_config()?;
    log::debug!(
        "solving {} with cap {} ({:?})",
        cli.file.display(),
        config.visit_cap,
        config.order
    );
    let text = read(&cli.file)?;
    solve_text(&text, config, cli.distances, cli.verbose >= 2)
}

/// Solve a maze given in the text format and build the report.
pub fn solve_text(
    text: &str,
    config: SolverConfig,
    show_distances: bool,
    trace: bool,
) -> Result<String, CliError> {
    let mut maze = text.parse::<MazeFile>()?.into_maze()?;
    let mut solver = Solver::new(config);
    let found = if trace {
        maze.search_observed(&mut solver, &mut LogObserver)?
    } else {
        maze.search_with(&mut solver)?
    };

    let summary = if found {
        format!("Path found: {} steps.\n", maze.path().len() - 1)
    } else {
        "No path found.\n".to_string()
    };

    let mut report = render(&maze);
    report.push_str(&summary);
    if show_distances {
        report.push('\n');
        report.push_str(&render_distances(&maze));
    }
    Ok(report)
}

fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// Everything that can stop the `maze` binary.
#[derive(Debug)]
pub enum CliError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
    Parse(ParseError),
    Maze(MazeError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Config { path, source } => {
                write!(f, "bad solver config in {}: {source}", path.display())
            }
            Self::Parse(e) => write!(f, "{e}"),
            Self::Maze(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Config { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
            Self::Maze(e) => Some(e),
        }
    }
}

impl From<ParseError> for CliError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<MazeError> for CliError {
    fn from(e: MazeError) -> Self {
        Self::Maze(e)
    }
}
