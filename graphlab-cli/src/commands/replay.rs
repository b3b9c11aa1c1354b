use std::{
    thread,
    time::{Duration, Instant},
};

use anyhow::Context;
use graphlab::{
    algorithms::RevealUnit,
    utils::StopFlag,
    visualizer::{ReplayConfig, Visualizer},
};
use serde::Serialize;

use crate::{
    app::{GlobalOptions, GraphOptions},
    commands::common::{build_graph, create_algorithm, describe_graph},
    output::format_set,
};

/// Longest sleep between two polls, so Ctrl+C is noticed promptly.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Serialize)]
struct ReplaySummary {
    algorithm: String,
    revealed: Vec<RevealUnit>,
    total: usize,
    visited_vertices: usize,
    visited_edges: usize,
    cancelled: bool,
}

pub fn run(
    name: &str,
    graph_options: &GraphOptions,
    settings: &[String],
    interval_ms: u64,
    cancel: &StopFlag,
    opts: &GlobalOptions,
) -> anyhow::Result<()> {
    let graph = build_graph(graph_options)?;
    let mut algorithm = create_algorithm(name, settings)?;
    let info = algorithm.describe();
    algorithm
        .run(&graph)
        .with_context(|| format!("{info} cannot run on this graph"))?;

    let units = algorithm.reveal_units();
    let total = units.len();
    if !opts.json {
        println!("{info} on {}", describe_graph(&graph));
        println!("Replaying {total} steps, one every {interval_ms} ms");
    }

    let interval = Duration::from_millis(interval_ms);
    let mut visualizer = Visualizer::new(ReplayConfig { interval });
    visualizer.start(units, Instant::now());

    let mut revealed = Vec::with_capacity(total);
    let mut cancelled = false;
    while visualizer.is_running() {
        if cancel.is_requested() {
            cancelled = true;
            break;
        }
        for unit in visualizer.poll(Instant::now()) {
            if !opts.json {
                println!("  [{}/{total}] {}", revealed.len() + 1, describe_unit(&unit));
            }
            revealed.push(unit);
        }
        thread::sleep(interval.min(POLL_INTERVAL));
    }

    let state = visualizer.state();
    let summary = ReplaySummary {
        algorithm: info,
        revealed,
        total,
        visited_vertices: state.vertex_count(),
        visited_edges: state.visited_edges().len(),
        cancelled,
    };

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        if summary.cancelled {
            println!("Cancelled after {} of {total} steps.", summary.revealed.len());
        }
        println!(
            "Visited {} vertices and {} edges.",
            summary.visited_vertices, summary.visited_edges
        );
    }
    Ok(())
}

fn describe_unit(unit: &RevealUnit) -> String {
    match unit {
        RevealUnit::Edge { from, to } => format!("edge {from} -> {to}"),
        RevealUnit::Vertex { vertex } => format!("vertex {vertex}"),
        RevealUnit::Batch { vertices, edges } => {
            format!("group {{{}}} with {} edges", format_set(vertices), edges.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphlab::graph::VertexId;

    #[test]
    fn test_describe_unit() {
        let (a, b) = (VertexId::new(1), VertexId::new(4));
        assert_eq!(describe_unit(&RevealUnit::edge(a, b)), "edge 1 -> 4");
        assert_eq!(describe_unit(&RevealUnit::Vertex { vertex: b }), "vertex 4");
        assert_eq!(
            describe_unit(&RevealUnit::Batch {
                vertices: vec![a, b],
                edges: vec![(a, b)],
            }),
            "group {1, 4} with 1 edges"
        );
    }
}
