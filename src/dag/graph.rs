// src/dag/graph.rs

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::dag::error::DagError;

/// Node -> set of related nodes. Entries are never left holding an empty set.
type DependencyMap<N> = HashMap<N, HashSet<N>>;

/// In-memory directed acyclic graph of "depends-on" relationships.
///
/// Two adjacency indexes are kept as exact transposes of each other:
/// - `dependencies`: child -> parents it depends on
/// - `dependents`: parent -> children that depend on it
///
/// Acyclicity is enforced on every [`Graph::depend_on`] call, so any
/// `Graph` value is a DAG at all times.
///
/// The graph has no internal locking. Callers sharing one across threads
/// must serialise writers themselves (e.g. wrap it in a `Mutex`).
#[derive(Debug, Clone)]
pub struct Graph<N = String> {
    nodes: HashSet<N>,
    dependencies: DependencyMap<N>,
    dependents: DependencyMap<N>,
}

impl<N> Graph<N> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashSet::new(),
            dependencies: HashMap::new(),
            dependents: HashMap::new(),
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All known nodes, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter()
    }

    /// All edges as `(child, parent)` pairs, in no particular order.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> {
        self.dependencies
            .iter()
            .flat_map(|(child, parents)| parents.iter().map(move |parent| (child, parent)))
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.dependencies.values().map(HashSet::len).sum()
    }
}

impl<N> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Eq + Hash> PartialEq for Graph<N> {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
            && self.dependencies == other.dependencies
            && self.dependents == other.dependents
    }
}

impl<N: Eq + Hash> Eq for Graph<N> {}

impl<N> Graph<N>
where
    N: Eq + Hash + Clone + Debug,
{
    /// Whether `node` has been declared to the graph.
    pub fn contains(&self, node: &N) -> bool {
        self.nodes.contains(node)
    }

    /// Declare a node with no edges. Returns `true` if it was not known yet.
    ///
    /// Nodes referenced by [`Graph::depend_on`] are created implicitly; this
    /// is only needed for nodes that take part in no edge.
    pub fn add_node(&mut self, node: N) -> bool {
        self.nodes.insert(node)
    }

    /// Declare that `child` depends on `parent`.
    ///
    /// Both nodes are created if unknown. Re-declaring an existing edge is a
    /// no-op. All validation happens before anything is mutated, so a
    /// rejected call leaves the graph unchanged.
    pub fn depend_on(&mut self, child: N, parent: N) -> Result<(), DagError<N>> {
        if child == parent {
            debug!(node = ?child, "rejecting self-dependency");
            return Err(DagError::InvalidEdge(child));
        }

        if self.depends_on(&parent, &child) {
            debug!(?child, ?parent, "rejecting edge that would close a cycle");
            return Err(DagError::CycleDetected { child, parent });
        }

        self.nodes.insert(child.clone());
        self.nodes.insert(parent.clone());
        add_edge(&mut self.dependencies, child.clone(), parent.clone());
        add_edge(&mut self.dependents, parent, child);

        Ok(())
    }

    /// Whether `child` depends on `parent`, directly or transitively.
    pub fn depends_on(&self, child: &N, parent: &N) -> bool {
        closure(&self.dependencies, child).contains(parent)
    }

    /// Whether `parent` is depended on by `child`, directly or transitively.
    ///
    /// Answers the same question as [`Graph::depends_on`] with the arguments
    /// swapped, but walks the `dependents` index.
    pub fn depended_on_by(&self, parent: &N, child: &N) -> bool {
        closure(&self.dependents, parent).contains(child)
    }

    /// Everything `node` depends on, directly or transitively.
    pub fn dependencies(&self, node: &N) -> Result<HashSet<N>, DagError<N>> {
        self.ensure_known(node)?;
        Ok(closure(&self.dependencies, node))
    }

    /// Everything that depends on `node`, directly or transitively.
    pub fn dependents(&self, node: &N) -> Result<HashSet<N>, DagError<N>> {
        self.ensure_known(node)?;
        Ok(closure(&self.dependents, node))
    }

    /// Direct dependencies of `node` only.
    pub fn immediate_dependencies(&self, node: &N) -> Result<HashSet<N>, DagError<N>> {
        self.ensure_known(node)?;
        Ok(self.dependencies.get(node).cloned().unwrap_or_default())
    }

    /// Direct dependents of `node` only.
    pub fn immediate_dependents(&self, node: &N) -> Result<HashSet<N>, DagError<N>> {
        self.ensure_known(node)?;
        Ok(self.dependents.get(node).cloned().unwrap_or_default())
    }

    /// Nodes that depend on nothing.
    pub fn leaves(&self) -> HashSet<N> {
        self.nodes
            .iter()
            .filter(|node| self.dependencies.get(*node).is_none_or(HashSet::is_empty))
            .cloned()
            .collect()
    }

    /// Remove `node` and every edge touching it. Unknown nodes are ignored.
    ///
    /// Must not be interleaved with an in-flight [`Graph::topo_sorted_layers`]
    /// on the same instance.
    pub fn remove(&mut self, node: &N) {
        if !self.nodes.remove(node) {
            trace!(?node, "remove: unknown node; nothing to do");
            return;
        }

        if let Some(children) = self.dependents.remove(node) {
            for child in &children {
                remove_edge(&mut self.dependencies, child, node);
            }
        }

        if let Some(parents) = self.dependencies.remove(node) {
            for parent in &parents {
                remove_edge(&mut self.dependents, parent, node);
            }
        }

        trace!(?node, "removed node and its edges");
    }

    /// Group nodes into layers that can be processed in order.
    ///
    /// Every node in layer `i` depends only on nodes in layers `0..i`, and
    /// nodes within a layer are independent of each other. The graph itself
    /// is left untouched: leaves are peeled off a private clone until it is
    /// empty. An empty graph yields no layers.
    pub fn topo_sorted_layers(&self) -> Vec<HashSet<N>> {
        let mut work = self.clone();
        let mut layers = Vec::new();

        loop {
            let leaves = work.leaves();
            if leaves.is_empty() {
                break;
            }

            for leaf in &leaves {
                work.remove(leaf);
            }

            trace!(layer = layers.len(), size = leaves.len(), "peeled layer");
            layers.push(leaves);
        }

        debug_assert!(work.is_empty(), "leaf peeling stalled on a non-empty graph");
        debug!(
            nodes = self.len(),
            layers = layers.len(),
            "computed topological layers"
        );

        layers
    }

    /// A flat topological order: [`Graph::topo_sorted_layers`] concatenated.
    ///
    /// Order within a layer is unspecified.
    pub fn topo_sorted(&self) -> Vec<N> {
        self.topo_sorted_layers().into_iter().flatten().collect()
    }

    fn ensure_known(&self, node: &N) -> Result<(), DagError<N>> {
        if self.nodes.contains(node) {
            Ok(())
        } else {
            Err(DagError::NotFound(node.clone()))
        }
    }
}

fn add_edge<N: Eq + Hash>(map: &mut DependencyMap<N>, from: N, to: N) {
    map.entry(from).or_default().insert(to);
}

/// Remove `to` from `map[from]`, dropping the entry once it is empty.
fn remove_edge<N: Eq + Hash>(map: &mut DependencyMap<N>, from: &N, to: &N) {
    if let Some(set) = map.get_mut(from) {
        set.remove(to);
        if set.is_empty() {
            map.remove(from);
        }
    }
}

/// Breadth-first transitive closure of `start` over `map`, excluding `start`
/// itself (which can never be reached in a DAG).
fn closure<N: Eq + Hash + Clone>(map: &DependencyMap<N>, start: &N) -> HashSet<N> {
    let mut visited: HashSet<N> = HashSet::new();
    let mut frontier: VecDeque<&N> = VecDeque::new();
    frontier.push_back(start);

    while let Some(current) = frontier.pop_front() {
        let Some(next) = map.get(current) else {
            continue;
        };
        for node in next {
            if visited.insert(node.clone()) {
                frontier.push_back(node);
            }
        }
    }

    visited
}
