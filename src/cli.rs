use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "depgraph")]
#[command(about = "Query and transform package/class/feature dependency graphs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the transitive closure around nodes matching a pattern
    Closure {
        /// Dependency graph XML file
        path: PathBuf,

        /// Start from nodes matching this pattern
        #[arg(short, long)]
        start: String,

        /// Stop expanding at nodes matching this pattern
        #[arg(long)]
        stop: Option<String>,

        /// Follow inbound edges up to this many hops
        #[arg(long = "inbound-depth")]
        inbound_depth: Option<usize>,

        /// Follow outbound edges up to this many hops
        #[arg(long = "outbound-depth")]
        outbound_depth: Option<usize>,

        /// Follow both directions without bound
        #[arg(long, conflicts_with_all = ["inbound_depth", "outbound_depth"])]
        unbounded: bool,
    },

    /// Count nodes and edges per granularity
    Metrics {
        /// Dependency graph XML file
        path: PathBuf,
    },

    /// LCOM4 cohesion per class
    Cohesion {
        /// Dependency graph XML file
        path: PathBuf,

        /// Only report classes matching this pattern
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// List dependency cycles
    Cycles {
        /// Dependency graph XML file
        path: PathBuf,

        /// Ignore cycles longer than this
        #[arg(long = "max-length")]
        max_length: Option<usize>,
    },

    /// Remove edges made redundant by finer-grained ones
    Minimize {
        /// Dependency graph XML file
        path: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
