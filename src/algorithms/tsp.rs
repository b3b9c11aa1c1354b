//! Travelling salesman by Held-Karp dynamic programming.
//!
//! The state is `(current vertex, set of visited vertices)` and its value is the
//! cheapest walk that starts at vertex 0, visits exactly that set and ends at the
//! current vertex. The optimal tour closes the cheapest full-set state back to 0.
//! Arcs are taken as directed, so asymmetric weights are handled; the lightest of
//! parallel arcs is used.
//!
//! Two memo layouts are provided and always agree on the optimal cost:
//!
//! - [`TspMemo::Hashed`] keys a hash map by `(vertex, BitSet)`. Flexible, but every
//!   key owns a heap allocation, so it is capped at [`HASHED_LIMIT`] vertices.
//! - [`TspMemo::Bitmask`] indexes a dense table by an integer bitmask of the vertices
//!   other than 0. The table has `2^(V-1) * (V-1)` entries of 16 bytes plus a byte
//!   of parent each, so it is capped at [`BITMASK_LIMIT`] vertices (about 160 MiB at
//!   the cap).

use rustc_hash::FxHashMap;

use crate::{
    algorithms::{
        require_at_most, require_vertices, AlgorithmKind, GraphAlgorithm, Outcome,
        Requirements, RevealUnit,
    },
    graph::{Graph, VertexId, Weight},
    utils::BitSet,
    Precondition,
};

/// Largest vertex count accepted by [`TspMemo::Hashed`].
pub const HASHED_LIMIT: usize = 16;

/// Largest vertex count accepted by [`TspMemo::Bitmask`].
pub const BITMASK_LIMIT: usize = 20;

/// Memo layout of [`Tsp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TspMemo {
    /// Hash map keyed by `(vertex, BitSet)`
    Hashed,
    /// Dense table indexed by `(bitmask, vertex)`
    #[default]
    Bitmask,
}

impl TspMemo {
    /// Returns the largest vertex count this layout accepts.
    #[must_use]
    pub fn limit(self) -> usize {
        match self {
            TspMemo::Hashed => HASHED_LIMIT,
            TspMemo::Bitmask => BITMASK_LIMIT,
        }
    }
}

/// Minimum-cost Hamiltonian cycle through vertex 0.
#[derive(Debug, Clone, Default)]
pub struct Tsp {
    memo: TspMemo,
    cost: Option<Weight>,
    tour: Vec<VertexId>,
    executed: bool,
}

/// Lightest arc weight for every ordered pair.
fn weight_table(graph: &Graph) -> Vec<Vec<Option<Weight>>> {
    let n = graph.vertex_count();
    let mut table = vec![vec![None; n]; n];
    for from in graph.vertices() {
        for (to, weight) in graph.neighbors(from) {
            let cell: &mut Option<Weight> = &mut table[from.index()][to.index()];
            if cell.map_or(true, |current| weight < current) {
                *cell = Some(weight);
            }
        }
    }
    table
}

/// Dense-table Held-Karp. Bit `i` of a mask stands for vertex `i + 1`.
fn solve_bitmask(weights: &[Vec<Option<Weight>>]) -> Option<(Weight, Vec<VertexId>)> {
    let n = weights.len();
    let m = n - 1;
    let full: usize = (1 << m) - 1;
    let slot = |mask: usize, last: usize| mask * m + last;

    let mut cost: Vec<Option<Weight>> = vec![None; (1 << m) * m];
    let mut parent: Vec<u8> = vec![u8::MAX; (1 << m) * m];

    for last in 0..m {
        cost[slot(1 << last, last)] = weights[0][last + 1];
    }

    for mask in 1..=full {
        for last in (0..m).filter(|&last| mask & (1 << last) != 0) {
            let Some(base) = cost[slot(mask, last)] else {
                continue;
            };
            for next in (0..m).filter(|&next| mask & (1 << next) == 0) {
                let Some(weight) = weights[last + 1][next + 1] else {
                    continue;
                };
                let candidate = base.saturating_add(weight);
                let target = slot(mask | (1 << next), next);
                if cost[target].map_or(true, |current| candidate < current) {
                    cost[target] = Some(candidate);
                    // last < BITMASK_LIMIT, so it fits
                    parent[target] = last as u8;
                }
            }
        }
    }

    let (best, mut last) = (0..m)
        .filter_map(|last| {
            let walk = cost[slot(full, last)]?;
            let back = weights[last + 1][0]?;
            Some((walk.saturating_add(back), last))
        })
        .min()?;

    let mut tour = vec![VertexId::new(0)];
    let mut mask = full;
    loop {
        tour.push(VertexId::new(last + 1));
        let previous = parent[slot(mask, last)];
        mask &= !(1 << last);
        if mask == 0 {
            break;
        }
        last = usize::from(previous);
    }
    tour.push(VertexId::new(0));
    tour.reverse();
    Some((best, tour))
}

/// Layered Held-Karp over hashed `(vertex, visited set)` keys.
fn solve_hashed(weights: &[Vec<Option<Weight>>]) -> Option<(Weight, Vec<VertexId>)> {
    type Layer = FxHashMap<(usize, BitSet), (Weight, usize)>;

    let n = weights.len();
    let origin = BitSet::new(n).with(0);

    // layers[k] holds the states that visited k + 1 vertices besides 0
    let mut layers: Vec<Layer> = Vec::with_capacity(n - 1);
    let mut first = Layer::default();
    for next in 1..n {
        if let Some(weight) = weights[0][next] {
            first.insert((next, origin.with(next)), (weight, 0));
        }
    }
    layers.push(first);

    for _ in 2..n {
        let mut layer = Layer::default();
        let previous = layers.last()?;
        for ((last, visited), &(base, _)) in previous {
            for next in (1..n).filter(|&next| !visited.contains(next)) {
                let Some(weight) = weights[*last][next] else {
                    continue;
                };
                let candidate = base.saturating_add(weight);
                let key = (next, visited.with(next));
                let better = layer
                    .get(&key)
                    .map_or(true, |&(current, from)| (candidate, *last) < (current, from));
                if better {
                    layer.insert(key, (candidate, *last));
                }
            }
        }
        layers.push(layer);
    }

    let last_layer = layers.last()?;
    let ((mut last, mut visited), best) = last_layer
        .iter()
        .filter_map(|((last, visited), &(walk, _))| {
            let back = weights[*last][0]?;
            Some(((*last, visited.clone()), walk.saturating_add(back)))
        })
        .min_by_key(|&((last, _), cost)| (cost, last))?;

    let mut tour = vec![VertexId::new(0)];
    for layer in layers.iter().rev() {
        tour.push(VertexId::new(last));
        let &(_, previous) = layer.get(&(last, visited.clone()))?;
        visited.remove(last);
        last = previous;
    }
    tour.push(VertexId::new(0));
    tour.reverse();
    Some((best, tour))
}

impl Tsp {
    /// Creates a solver with the given memo layout.
    #[must_use]
    pub fn new(memo: TspMemo) -> Self {
        Tsp {
            memo,
            ..Self::default()
        }
    }

    /// Returns the memo layout.
    #[must_use]
    pub fn memo(&self) -> TspMemo {
        self.memo
    }

    /// Returns the optimal tour cost, or `None` if no Hamiltonian cycle exists.
    #[must_use]
    pub fn cost(&self) -> Option<Weight> {
        self.cost
    }

    /// Returns the optimal tour as a closed vertex sequence `0, ..., 0`.
    ///
    /// Empty if no tour exists. A single-vertex graph has the tour `[0]`.
    #[must_use]
    pub fn tour(&self) -> &[VertexId] {
        &self.tour
    }
}

impl GraphAlgorithm for Tsp {
    fn kind(&self) -> AlgorithmKind {
        match self.memo {
            TspMemo::Hashed => AlgorithmKind::TspHashed,
            TspMemo::Bitmask => AlgorithmKind::TspBitmask,
        }
    }

    fn check(&self, graph: &Graph) -> std::result::Result<(), Precondition> {
        require_vertices(graph)?;
        require_at_most(graph, self.memo.limit())
    }

    fn execute(&mut self, graph: &Graph) {
        self.clear();
        let n = graph.vertex_count();
        if n == 0 || n > self.memo.limit() {
            return;
        }
        self.executed = true;

        if n == 1 {
            self.cost = Some(0);
            self.tour = vec![VertexId::new(0)];
            return;
        }

        let weights = weight_table(graph);
        let solved = match self.memo {
            TspMemo::Hashed => solve_hashed(&weights),
            TspMemo::Bitmask => solve_bitmask(&weights),
        };
        if let Some((cost, tour)) = solved {
            self.cost = Some(cost);
            self.tour = tour;
        }
    }

    fn clear(&mut self) {
        self.cost = None;
        self.tour.clear();
        self.executed = false;
    }

    fn outcome(&self) -> Outcome {
        if !self.executed {
            return Outcome::Pending;
        }
        Outcome::Tour {
            cost: self.cost,
            tour: self.tour.clone(),
        }
    }

    /// The whole tour is revealed at once.
    fn reveal_units(&self) -> Vec<RevealUnit> {
        if self.tour.is_empty() {
            return Vec::new();
        }
        let mut vertices = self.tour.clone();
        if vertices.len() > 1 {
            vertices.pop();
        }
        vec![RevealUnit::Batch {
            vertices,
            edges: self.tour.windows(2).map(|pair| (pair[0], pair[1])).collect(),
        }]
    }

    fn requirements(&self) -> Requirements {
        Requirements {
            max_vertices: Some(self.memo.limit()),
            ..Requirements::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::graph::StorageKind;

    fn v(index: usize) -> VertexId {
        VertexId::new(index)
    }

    /// Exhaustive search over all orders of `1..n`.
    fn brute_force(graph: &Graph) -> Option<Weight> {
        fn permute(
            graph: &Graph,
            rest: &mut Vec<usize>,
            last: usize,
            cost: Weight,
            best: &mut Option<Weight>,
        ) {
            if rest.is_empty() {
                if let Some(back) = graph.edge_weight(v(last), v(0)) {
                    let total = cost + back;
                    *best = Some(best.map_or(total, |b| b.min(total)));
                }
                return;
            }
            for i in 0..rest.len() {
                let next = rest.remove(i);
                if let Some(weight) = graph.edge_weight(v(last), v(next)) {
                    permute(graph, rest, next, cost + weight, best);
                }
                rest.insert(i, next);
            }
        }

        let mut rest: Vec<usize> = (1..graph.vertex_count()).collect();
        let mut best = None;
        permute(graph, &mut rest, 0, 0, &mut best);
        best
    }

    fn tour_cost(graph: &Graph, tour: &[VertexId]) -> Weight {
        tour.windows(2)
            .map(|pair| graph.edge_weight(pair[0], pair[1]).unwrap())
            .sum()
    }

    fn asymmetric_complete(n: usize, rng: &mut StdRng) -> Graph {
        let mut graph = Graph::with_vertices(n, true, StorageKind::AdjacencyMatrix);
        for from in 0..n {
            for to in 0..n {
                if from != to {
                    graph.add_edge(v(from), v(to), rng.gen_range(1..=50));
                }
            }
        }
        graph
    }

    #[test]
    fn test_bitmask_table_size_at_cap() {
        let others = BITMASK_LIMIT - 1;
        let cells = (1usize << others) * others;
        let bytes = cells * (std::mem::size_of::<Option<Weight>>() + std::mem::size_of::<u8>());
        let mib = bytes / (1024 * 1024);
        assert!((150..=170).contains(&mib), "{mib} MiB");
    }

    #[test]
    fn test_hashed_and_bitmask_agree_on_asymmetric_k5() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..10 {
            let graph = asymmetric_complete(5, &mut rng);

            let mut hashed = Tsp::new(TspMemo::Hashed);
            let mut bitmask = Tsp::new(TspMemo::Bitmask);
            hashed.run(&graph).unwrap();
            bitmask.run(&graph).unwrap();

            let expected = brute_force(&graph);
            assert!(expected.is_some());
            assert_eq!(hashed.cost(), expected);
            assert_eq!(bitmask.cost(), expected);
            assert_eq!(tour_cost(&graph, hashed.tour()), expected.unwrap());
            assert_eq!(tour_cost(&graph, bitmask.tour()), expected.unwrap());
        }
    }

    #[test]
    fn test_tour_is_hamiltonian_cycle() {
        let mut rng = StdRng::seed_from_u64(8);
        let graph = asymmetric_complete(7, &mut rng);
        let mut tsp = Tsp::new(TspMemo::Bitmask);
        tsp.run(&graph).unwrap();

        let tour = tsp.tour();
        assert_eq!(tour.len(), 8);
        assert_eq!(tour.first(), Some(&v(0)));
        assert_eq!(tour.last(), Some(&v(0)));
        let mut inner: Vec<usize> = tour[1..7].iter().map(|v| v.index()).collect();
        inner.sort_unstable();
        assert_eq!(inner, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_known_square() {
        // Perimeter 4, diagonals 10
        let graph = Graph::from_edges(
            false,
            StorageKind::AdjacencyList,
            [(0, 1, 1), (1, 2, 1), (2, 3, 1), (3, 0, 1), (0, 2, 10), (1, 3, 10)],
        );
        for memo in [TspMemo::Hashed, TspMemo::Bitmask] {
            let mut tsp = Tsp::new(memo);
            tsp.run(&graph).unwrap();
            assert_eq!(tsp.cost(), Some(4));
        }
    }

    #[test]
    fn test_no_tour_on_a_path() {
        let graph = Graph::from_edges(false, StorageKind::AdjacencyList, [(0, 1, 1), (1, 2, 1)]);
        for memo in [TspMemo::Hashed, TspMemo::Bitmask] {
            let mut tsp = Tsp::new(memo);
            tsp.run(&graph).unwrap();
            assert_eq!(tsp.cost(), None);
            assert!(tsp.tour().is_empty());
            assert!(tsp.reveal_units().is_empty());
            assert_eq!(
                tsp.outcome(),
                Outcome::Tour {
                    cost: None,
                    tour: vec![]
                }
            );
        }
    }

    #[test]
    fn test_tiny_graphs() {
        let single = Graph::with_vertices(1, false, StorageKind::AdjacencyList);
        let mut tsp = Tsp::new(TspMemo::Hashed);
        tsp.run(&single).unwrap();
        assert_eq!(tsp.cost(), Some(0));
        assert_eq!(tsp.tour(), &[v(0)]);

        let pair = Graph::from_edges(true, StorageKind::AdjacencyList, [(0, 1, 2), (1, 0, 3)]);
        for memo in [TspMemo::Hashed, TspMemo::Bitmask] {
            let mut tsp = Tsp::new(memo);
            tsp.run(&pair).unwrap();
            assert_eq!(tsp.cost(), Some(5));
            assert_eq!(tsp.tour(), &[v(0), v(1), v(0)]);
        }
    }

    #[test]
    fn test_vertex_caps() {
        let graph = Graph::with_vertices(BITMASK_LIMIT + 1, false, StorageKind::AdjacencyList);
        assert_eq!(
            Tsp::new(TspMemo::Bitmask).check(&graph),
            Err(Precondition::TooManyVertices {
                count: BITMASK_LIMIT + 1,
                limit: BITMASK_LIMIT
            })
        );

        let graph = Graph::with_vertices(HASHED_LIMIT + 1, false, StorageKind::AdjacencyList);
        assert!(Tsp::new(TspMemo::Hashed).check(&graph).is_err());
        assert!(Tsp::new(TspMemo::Bitmask).check(&graph).is_ok());
        assert_eq!(
            Tsp::new(TspMemo::Hashed).requirements().max_vertices,
            Some(HASHED_LIMIT)
        );
    }

    #[test]
    fn test_reveal_single_batch() {
        let graph = Graph::complete(3, false, StorageKind::AdjacencyList, 1);
        let mut tsp = Tsp::new(TspMemo::Bitmask);
        tsp.run(&graph).unwrap();

        let units = tsp.reveal_units();
        assert_eq!(units.len(), 1);
        let RevealUnit::Batch { vertices, edges } = &units[0] else {
            panic!("batch expected");
        };
        assert_eq!(vertices.len(), 3);
        assert_eq!(edges.len(), 3);
    }
}
