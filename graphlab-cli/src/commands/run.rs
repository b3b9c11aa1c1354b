use std::{path::Path, time::Instant};

use anyhow::Context;
use graphlab::{
    algorithms::Outcome,
    graph::Graph,
    persistence::Layout,
};
use serde::Serialize;

use crate::{
    app::{GlobalOptions, GraphOptions},
    commands::common::{build_graph, create_algorithm, describe_graph},
    output::{format_sequence, format_set, print_output, Align, TabWriter},
};

/// Radius of the circle new vertices are placed on.
const LAYOUT_RADIUS: f64 = 200.0;

#[derive(Serialize)]
struct RunReport {
    algorithm: String,
    graph: String,
    micros: u128,
    reveal_units: usize,
    outcome: Outcome,
}

pub fn run(
    name: &str,
    graph_options: &GraphOptions,
    settings: &[String],
    layout: Option<&Path>,
    opts: &GlobalOptions,
) -> anyhow::Result<()> {
    let graph = build_graph(graph_options)?;
    let mut algorithm = create_algorithm(name, settings)?;
    let info = algorithm.describe();

    let started = Instant::now();
    algorithm
        .run(&graph)
        .with_context(|| format!("{info} cannot run on this graph"))?;
    let micros = started.elapsed().as_micros();

    if let Some(path) = layout {
        update_layout(path, &graph)?;
    }

    let report = RunReport {
        algorithm: info,
        graph: describe_graph(&graph),
        micros,
        reveal_units: algorithm.reveal_units().len(),
        outcome: algorithm.outcome(),
    };

    print_output(&report, opts, |report| {
        println!("{}", report.algorithm);
        println!("  Graph: {}", report.graph);
        println!(
            "  Took {} us, {} reveal steps",
            report.micros, report.reveal_units
        );
        println!();
        print_outcome(&report.outcome);
    })
}

/// Load `path` if it exists, place every vertex that has no position yet, and save.
fn update_layout(path: &Path, graph: &Graph) -> anyhow::Result<()> {
    let mut layout = if path.exists() {
        Layout::load(path).with_context(|| format!("failed to load layout {}", path.display()))?
    } else {
        Layout::new()
    };
    layout.retain_graph(graph);

    let circle = Layout::circular(graph.vertex_count(), LAYOUT_RADIUS);
    let unplaced = layout.unplaced(graph);
    for vertex in &unplaced {
        if let Some(position) = circle.get(*vertex) {
            layout.set(*vertex, position);
        }
    }

    layout
        .save(path)
        .with_context(|| format!("failed to save layout {}", path.display()))?;
    log::info!(
        "Placed {} new vertices in {}",
        unplaced.len(),
        path.display()
    );
    Ok(())
}

fn distance_text(distance: Option<i64>) -> String {
    distance.map_or_else(|| "unreachable".to_string(), |d| d.to_string())
}

fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Pending => println!("No result."),
        Outcome::Traversal { edges } => {
            let edges: Vec<String> = edges.iter().map(|(u, v)| format!("{u}-{v}")).collect();
            println!("Discovery edges ({}): {}", edges.len(), edges.join(", "));
        }
        Outcome::ShortestPaths {
            distances,
            path,
            negative_cycle,
        } => {
            if *negative_cycle {
                println!("Negative cycle detected, distances are not reliable.");
            }
            let mut table = TabWriter::new(&[("VERTEX", Align::Right), ("DISTANCE", Align::Right)]);
            for (vertex, distance) in distances.iter().enumerate() {
                table.row(vec![vertex.to_string(), distance_text(*distance)]);
            }
            table.print();
            if let Some(path) = path {
                println!();
                println!("Path: {}", format_sequence(path));
            }
        }
        Outcome::AllPairs { distances } => {
            let headers: Vec<String> = (0..distances.len()).map(|j| j.to_string()).collect();
            let mut columns = vec![("FROM", Align::Right)];
            columns.extend(headers.iter().map(|header| (header.as_str(), Align::Right)));
            let mut table = TabWriter::new(&columns);
            for (i, row) in distances.iter().enumerate() {
                let mut cells = vec![i.to_string()];
                cells.extend(row.iter().map(|d| d.map_or_else(|| "-".to_string(), |d| d.to_string())));
                table.row(cells);
            }
            table.print();
        }
        Outcome::Order { order } => println!("Order: {}", format_sequence(order)),
        Outcome::Components { components } => {
            println!("{} components:", components.len());
            for (i, component) in components.iter().enumerate() {
                println!("  #{i}: {}", format_set(component));
            }
        }
        Outcome::Tour { cost, tour } => match cost {
            Some(cost) => println!("Tour (cost {cost}): {}", format_sequence(tour)),
            None => println!("No Hamiltonian cycle exists."),
        },
        Outcome::Trail { trail } => println!("Trail: {}", format_sequence(trail)),
        Outcome::SpanningTree { edges, total } => {
            let mut table = TabWriter::new(&[
                ("FROM", Align::Right),
                ("TO", Align::Right),
                ("WEIGHT", Align::Right),
            ]);
            for edge in edges {
                table.row(vec![
                    edge.from.to_string(),
                    edge.to.to_string(),
                    edge.weight.to_string(),
                ]);
            }
            table.print();
            println!("Total weight: {total}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphlab::{
        graph::{StorageKind, VertexId},
        persistence::Position,
    };

    #[test]
    fn test_layout_places_only_new_vertices() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");

        let small = Graph::with_vertices(2, false, StorageKind::AdjacencyList);
        update_layout(&path, &small).unwrap();

        let mut moved = Layout::load(&path).unwrap();
        moved.set(
            VertexId::new(0),
            Position { x: 1.0, y: 1.0 },
        );
        moved.save(&path).unwrap();

        let larger = Graph::with_vertices(3, false, StorageKind::AdjacencyList);
        update_layout(&path, &larger).unwrap();

        let layout = Layout::load(&path).unwrap();
        assert_eq!(layout.len(), 3);
        assert_eq!(layout.get(VertexId::new(0)).unwrap().x, 1.0);
    }

    #[test]
    fn test_distance_text() {
        assert_eq!(distance_text(None), "unreachable");
        assert_eq!(distance_text(Some(-2)), "-2");
    }
}
