//! Explicit algorithm construction table.
//!
//! The [`AlgorithmRegistry`] maps each [`AlgorithmKind`] to a plain constructor
//! function. It is an ordinary value: whoever assembles a front end builds one, may
//! register replacements or extra entries, and passes it to whatever needs to create
//! algorithms by name. There is no process-wide table.

use std::str::FromStr;

use rustc_hash::FxHashMap;

use crate::{
    algorithms::{
        AlgorithmKind, BellmanFord, Bfs, Dfs, Dijkstra, Euler, FloydWarshall, GraphAlgorithm,
        Prim, QueueStrategy, RecursiveDfs, SortStrategy, Tarjan, TopologicalSort, Tsp, TspMemo,
    },
    Error, Result,
};

/// Creates a fresh algorithm with default settings.
pub type Constructor = fn() -> Box<dyn GraphAlgorithm>;

/// Mapping from [`AlgorithmKind`] to [`Constructor`].
///
/// # Examples
///
/// ```rust
/// use graphlab::algorithms::{AlgorithmKind, AlgorithmRegistry};
///
/// let registry = AlgorithmRegistry::with_defaults();
/// let tarjan = registry.create_by_name("tarjan")?;
/// assert_eq!(tarjan.kind(), AlgorithmKind::Tarjan);
/// # Ok::<(), graphlab::Error>(())
/// ```
#[derive(Clone)]
pub struct AlgorithmRegistry {
    constructors: FxHashMap<AlgorithmKind, Constructor>,
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl AlgorithmRegistry {
    /// Creates a registry with no entries.
    #[must_use]
    pub fn new() -> Self {
        AlgorithmRegistry {
            constructors: FxHashMap::default(),
        }
    }

    /// Creates a registry with every built-in algorithm.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(AlgorithmKind::Bfs, || Box::new(Bfs::new()));
        registry.register(AlgorithmKind::Dfs, || Box::new(Dfs::new()));
        registry.register(AlgorithmKind::RecursiveDfs, || Box::new(RecursiveDfs::new()));
        registry.register(AlgorithmKind::DijkstraLazy, || {
            Box::new(Dijkstra::new(QueueStrategy::Lazy))
        });
        registry.register(AlgorithmKind::DijkstraEager, || {
            Box::new(Dijkstra::new(QueueStrategy::Eager))
        });
        registry.register(AlgorithmKind::BellmanFord, || Box::new(BellmanFord::new()));
        registry.register(AlgorithmKind::FloydWarshall, || Box::new(FloydWarshall::new()));
        registry.register(AlgorithmKind::TopologicalKahn, || {
            Box::new(TopologicalSort::new(SortStrategy::Kahn))
        });
        registry.register(AlgorithmKind::TopologicalDfs, || {
            Box::new(TopologicalSort::new(SortStrategy::Dfs))
        });
        registry.register(AlgorithmKind::Tarjan, || Box::new(Tarjan::new()));
        registry.register(AlgorithmKind::TspHashed, || Box::new(Tsp::new(TspMemo::Hashed)));
        registry.register(AlgorithmKind::TspBitmask, || Box::new(Tsp::new(TspMemo::Bitmask)));
        registry.register(AlgorithmKind::Euler, || Box::new(Euler::new()));
        registry.register(AlgorithmKind::PrimLazy, || Box::new(Prim::new(QueueStrategy::Lazy)));
        registry.register(AlgorithmKind::PrimEager, || {
            Box::new(Prim::new(QueueStrategy::Eager))
        });
        registry
    }

    /// Registers `constructor` for `kind`, replacing any previous entry.
    pub fn register(&mut self, kind: AlgorithmKind, constructor: Constructor) {
        self.constructors.insert(kind, constructor);
    }

    /// Creates an algorithm of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAlgorithm`] if nothing is registered for `kind`.
    pub fn create(&self, kind: AlgorithmKind) -> Result<Box<dyn GraphAlgorithm>> {
        self.constructors
            .get(&kind)
            .map(|constructor| constructor())
            .ok_or_else(|| Error::UnknownAlgorithm(kind.to_string()))
    }

    /// Creates an algorithm from its kebab-case name, e.g. `dijkstra-eager`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAlgorithm`] if the name is not a known kind or nothing is
    /// registered for it.
    pub fn create_by_name(&self, name: &str) -> Result<Box<dyn GraphAlgorithm>> {
        let kind = AlgorithmKind::from_str(name)
            .map_err(|_| Error::UnknownAlgorithm(name.to_string()))?;
        self.create(kind)
    }

    /// Returns the registered kinds in declaration order.
    #[must_use]
    pub fn kinds(&self) -> Vec<AlgorithmKind> {
        let mut kinds: Vec<AlgorithmKind> = self.constructors.keys().copied().collect();
        kinds.sort_by_key(|kind| *kind as u8);
        kinds
    }

    /// Returns the number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl std::fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgorithmRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
