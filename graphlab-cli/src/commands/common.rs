use anyhow::{bail, Context};
use graphlab::{
    algorithms::{schema::find_setting, AlgorithmRegistry, GraphAlgorithm, SettingValue},
    graph::{Graph, VertexId, Weight},
};
use rand::{rngs::StdRng, SeedableRng};

use crate::app::GraphOptions;

/// Largest vertex id accepted in an explicit `--edge`.
pub const MAX_EDGE_VERTEX: usize = 100_000;

/// Create the algorithm called `name` and apply `NAME=VALUE` settings to it.
pub fn create_algorithm(name: &str, settings: &[String]) -> anyhow::Result<Box<dyn GraphAlgorithm>> {
    let registry = AlgorithmRegistry::with_defaults();
    let mut algorithm = registry
        .create_by_name(name)
        .with_context(|| format!("unknown algorithm '{name}', see `graphlab list`"))?;

    for setting in settings {
        let Some((key, value)) = setting.split_once('=') else {
            bail!("setting '{setting}' is not of the form NAME=VALUE");
        };
        let spec = find_setting(algorithm.settings(), key.trim())
            .with_context(|| format!("{} has no setting '{}'", algorithm.kind(), key.trim()))?;
        let value = SettingValue::parse(spec, value)?;
        algorithm.set_setting(spec.name, value)?;
    }

    Ok(algorithm)
}

/// Build the graph described by the command-line options.
pub fn build_graph(options: &GraphOptions) -> anyhow::Result<Graph> {
    if !options.edges.is_empty() {
        let edges = options
            .edges
            .iter()
            .map(|text| parse_edge(text))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let mut graph = Graph::with_vertices(options.vertices, options.directed, options.storage);
        for (from, to, weight) in edges {
            graph.add_edge(VertexId::new(from), VertexId::new(to), weight);
        }
        return Ok(graph);
    }

    if !(0.0..=1.0).contains(&options.probability) {
        bail!("edge probability must be within 0..=1, got {}", options.probability);
    }

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut graph = Graph::with_vertices(options.vertices, options.directed, options.storage);
    graph.generate_random_weighted_edges(
        options.probability,
        1..=options.max_weight.max(1),
        &mut rng,
    );
    Ok(graph)
}

/// Parse `FROM:TO` or `FROM:TO:WEIGHT`; the weight defaults to 1.
pub fn parse_edge(text: &str) -> anyhow::Result<(usize, usize, Weight)> {
    let parts: Vec<&str> = text.split(':').map(str::trim).collect();
    let (from, to, weight) = match parts.as_slice() {
        [from, to] => (*from, *to, "1"),
        [from, to, weight] => (*from, *to, *weight),
        _ => bail!("edge '{text}' is not of the form FROM:TO[:WEIGHT]"),
    };

    let from = parse_vertex(from).with_context(|| format!("invalid source vertex in edge '{text}'"))?;
    let to = parse_vertex(to).with_context(|| format!("invalid target vertex in edge '{text}'"))?;
    let weight = weight
        .parse()
        .with_context(|| format!("invalid weight in edge '{text}'"))?;
    Ok((from, to, weight))
}

fn parse_vertex(text: &str) -> anyhow::Result<usize> {
    let vertex: usize = text.parse()?;
    if vertex > MAX_EDGE_VERTEX {
        bail!("vertex {vertex} exceeds the limit of {MAX_EDGE_VERTEX}");
    }
    Ok(vertex)
}

/// One-line summary of a graph's shape.
pub fn describe_graph(graph: &Graph) -> String {
    format!(
        "{} vertices, {} edges ({}, {})",
        graph.vertex_count(),
        graph.edge_count(),
        if graph.is_directed() {
            "directed"
        } else {
            "undirected"
        },
        graph.storage_kind()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphlab::{algorithms::AlgorithmKind, graph::StorageKind};

    fn options() -> GraphOptions {
        GraphOptions {
            vertices: 6,
            probability: 0.5,
            max_weight: 4,
            directed: false,
            storage: StorageKind::AdjacencyList,
            seed: Some(7),
            edges: Vec::new(),
        }
    }

    #[test]
    fn test_parse_edge() {
        assert_eq!(parse_edge("0:1").unwrap(), (0, 1, 1));
        assert_eq!(parse_edge(" 2 : 5 : -3 ").unwrap(), (2, 5, -3));
        assert!(parse_edge("0").is_err());
        assert!(parse_edge("a:1").is_err());
        assert!(parse_edge("0:1:2:3").is_err());
    }

    #[test]
    fn test_parse_edge_bounds_vertex_ids() {
        assert_eq!(
            parse_edge(&format!("{MAX_EDGE_VERTEX}:0")).unwrap(),
            (MAX_EDGE_VERTEX, 0, 1)
        );
        assert!(parse_edge(&format!("0:{}", MAX_EDGE_VERTEX + 1)).is_err());
        assert!(parse_edge("18446744073709551615:0").is_err());
    }

    #[test]
    fn test_explicit_edges_grow_the_graph() {
        let graph = build_graph(&GraphOptions {
            vertices: 2,
            edges: vec!["0:1:3".into(), "1:4".into()],
            ..options()
        })
        .unwrap();
        assert_eq!(graph.vertex_count(), 5);
        assert_eq!(graph.edge_weight(VertexId::new(4), VertexId::new(1)), Some(1));
    }

    #[test]
    fn test_seeded_graphs_repeat() {
        let first = build_graph(&options()).unwrap();
        let second = build_graph(&options()).unwrap();
        assert_eq!(first.edges().collect::<Vec<_>>(), second.edges().collect::<Vec<_>>());
        assert!(first.edges().all(|edge| (1..=4).contains(&edge.weight)));
    }

    #[test]
    fn test_bad_probability() {
        assert!(build_graph(&GraphOptions {
            probability: 1.5,
            ..options()
        })
        .is_err());
    }

    #[test]
    fn test_create_with_settings() {
        let algorithm = create_algorithm("Dijkstra-Eager", &["start=2".into(), "end=none".into()]).unwrap();
        assert_eq!(algorithm.kind(), AlgorithmKind::DijkstraEager);
        assert_eq!(
            algorithm.get_setting("start").unwrap(),
            SettingValue::Vertex(VertexId::new(2))
        );

        assert!(create_algorithm("nope", &[]).is_err());
        assert!(create_algorithm("bfs", &["start".into()]).is_err());
        assert!(create_algorithm("bfs", &["depth=3".into()]).is_err());
        assert!(create_algorithm("bfs", &["start=x".into()]).is_err());
    }
}
