use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use graphlab::graph::StorageKind;

/// graphlab - run, replay and benchmark classic graph algorithms
#[derive(Debug, Parser)]
#[command(name = "graphlab", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// How the graph an algorithm runs on is built.
#[derive(Debug, Clone, Args)]
pub struct GraphOptions {
    /// Number of vertices of a generated graph.
    #[arg(short = 'n', long, default_value_t = 8)]
    pub vertices: usize,

    /// Probability that a pair of vertices is connected in a generated graph.
    #[arg(short, long, default_value_t = 0.4)]
    pub probability: f64,

    /// Largest generated edge weight; weights are drawn from 1..=MAX.
    #[arg(long, value_name = "MAX", default_value_t = 10)]
    pub max_weight: i64,

    /// Build a directed graph.
    #[arg(short, long)]
    pub directed: bool,

    /// Graph encoding: adjacency-list or adjacency-matrix.
    #[arg(long, default_value = "adjacency-list")]
    pub storage: StorageKind,

    /// Seed for the random generator; omit for a fresh graph every time.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Explicit edge instead of a generated graph (repeatable).
    #[arg(short, long = "edge", value_name = "FROM:TO[:WEIGHT]")]
    pub edges: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the available algorithms with their requirements and settings.
    List,

    /// Run one algorithm on a graph and print its result.
    Run {
        /// Algorithm name, as shown by `list` (e.g. dijkstra-lazy).
        #[arg(value_name = "ALGORITHM")]
        algorithm: String,

        #[command(flatten)]
        graph: GraphOptions,

        /// Algorithm setting (repeatable), e.g. --set start=2.
        #[arg(short, long = "set", value_name = "NAME=VALUE")]
        settings: Vec<String>,

        /// Vertex layout file to update with positions for the graph's vertices.
        #[arg(long, value_name = "FILE")]
        layout: Option<PathBuf>,
    },

    /// Run one algorithm and replay its reveal steps on a timer.
    Replay {
        /// Algorithm name, as shown by `list`.
        #[arg(value_name = "ALGORITHM")]
        algorithm: String,

        #[command(flatten)]
        graph: GraphOptions,

        /// Algorithm setting (repeatable).
        #[arg(short, long = "set", value_name = "NAME=VALUE")]
        settings: Vec<String>,

        /// Milliseconds between two reveal steps.
        #[arg(long, value_name = "MS", default_value_t = 250)]
        interval: u64,
    },

    /// Measure how an algorithm's running time grows with the graph.
    Bench {
        /// Algorithm name, as shown by `list`.
        #[arg(value_name = "ALGORITHM")]
        algorithm: String,

        /// Number of grow-and-measure iterations.
        #[arg(short, long, default_value_t = 1000)]
        iterations: usize,

        /// Complexity function for the x axis: 1, v, e, v+e or v2.
        #[arg(short, long, default_value = "v+e")]
        complexity: String,

        /// Seed for the random generator.
        #[arg(long)]
        seed: Option<u64>,

        /// Graph encoding: adjacency-list or adjacency-matrix.
        #[arg(long, default_value = "adjacency-list")]
        storage: StorageKind,

        /// Grow a directed graph.
        #[arg(short, long)]
        directed: bool,

        /// Vertices added per iteration.
        #[arg(long, default_value_t = 1)]
        vertices_per_iteration: usize,

        /// Multiplier for the edges added per iteration.
        #[arg(long, default_value_t = 1)]
        edge_factor: usize,

        /// Largest generated edge weight.
        #[arg(long, value_name = "MAX", default_value_t = 10)]
        max_weight: i64,

        /// Algorithm setting (repeatable).
        #[arg(short, long = "set", value_name = "NAME=VALUE")]
        settings: Vec<String>,

        /// Drop spikes deviating more than this share from their local median.
        #[arg(long, value_name = "THRESHOLD")]
        filter: Option<f64>,

        /// Save the measured series as JSON.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Remove spikes from a saved series.
    Filter {
        /// Series file written by `bench --output`.
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Where to write the filtered series (defaults to overwriting FILE).
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Largest tolerated relative deviation from the local median.
        #[arg(short, long, default_value_t = 0.5)]
        threshold: f64,
    },
}
