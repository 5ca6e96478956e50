use std::hash::Hash;
use std::ops::Index;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use super::tarjan;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

#[derive(PartialEq, PartialOrd, Ord, Clone, Copy, Hash, Eq, Debug)]
pub struct NodeIndex(pub usize);

/// A directed graph over labels of type `K`, keeping nodes in insertion order.
#[derive(Clone, Debug)]
pub struct Digraph<K> {
    nodes: FxIndexMap<K, Vec<NodeIndex>>,
    n_edges: usize,
}

impl<K: Eq + Hash> Default for Digraph<K> {
    fn default() -> Self {
        Digraph::new()
    }
}

impl<K: Eq + Hash> Digraph<K> {
    pub fn new() -> Digraph<K> {
        Digraph::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Digraph<K> {
        Digraph {
            nodes: IndexMap::with_capacity_and_hasher(capacity, FxBuildHasher),
            n_edges: 0,
        }
    }

    /// Returns the index of `label`, inserting it as an isolated node if needed.
    pub fn add_node(&mut self, label: K) -> NodeIndex {
        let entry = self.nodes.entry(label);
        let node_index = NodeIndex(entry.index());
        entry.or_default();
        node_index
    }

    /// Adds the edge `from -> to`, creating either endpoint if it is new.
    /// Parallel edges are kept.
    pub fn add_edge(&mut self, from: K, to: K) {
        let from = self.add_node(from);
        let to = self.add_node(to);
        self.add_edge_by_index(from, to);
    }

    pub fn add_edge_by_index(&mut self, from: NodeIndex, to: NodeIndex) {
        assert!(from.0 < self.len(), "Tried to add an edge from a node that does not exist");
        assert!(to.0 < self.len(), "Tried to add an edge to a node that does not exist");
        self.nodes[from.0].push(to);
        self.n_edges += 1;
    }

    pub fn get_index_of(&self, label: &K) -> Option<NodeIndex> {
        self.nodes.get_index_of(label).map(NodeIndex)
    }

    pub fn label(&self, node_index: NodeIndex) -> &K {
        &self[node_index]
    }

    pub fn successors(&self, node_index: NodeIndex) -> &[NodeIndex] {
        &self.nodes[node_index.0]
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.nodes.len()).map(NodeIndex)
    }

    pub fn labels(&self) -> impl Iterator<Item = &K> {
        self.nodes.keys()
    }

    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.nodes
            .values()
            .enumerate()
            .flat_map(|(from, targets)| targets.iter().map(move |&to| (NodeIndex(from), to)))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.n_edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn has_self_loop(&self, node_index: NodeIndex) -> bool {
        self.successors(node_index).contains(&node_index)
    }

    /// Strongly connected components as node indices, every node used as a root
    /// in insertion order.
    pub fn strongly_connected_component_indices(&self) -> Vec<Vec<NodeIndex>> {
        tarjan::strongly_connected_components(
            self.node_indices(),
            |&node_index| node_index,
            |&node_index| self.successors(node_index).iter().copied(),
        )
    }

    pub fn strongly_connected_components(&self) -> Vec<Vec<K>>
    where
        K: Clone,
    {
        self.to_labels(self.strongly_connected_component_indices())
    }

    /// Components that contain a cycle: more than one node, or a node with a self loop.
    pub fn cycles(&self) -> Vec<Vec<K>>
    where
        K: Clone,
    {
        let cyclic = self
            .strongly_connected_component_indices()
            .into_iter()
            .filter(|component| component.len() > 1 || self.has_self_loop(component[0]))
            .collect();
        self.to_labels(cyclic)
    }

    pub fn is_acyclic(&self) -> bool {
        self.strongly_connected_component_indices()
            .iter()
            .all(|component| component.len() == 1 && !self.has_self_loop(component[0]))
    }

    fn to_labels(&self, components: Vec<Vec<NodeIndex>>) -> Vec<Vec<K>>
    where
        K: Clone,
    {
        components
            .into_iter()
            .map(|component| component.into_iter().map(|i| self[i].clone()).collect())
            .collect()
    }
}

impl<K> Index<NodeIndex> for Digraph<K> {
    type Output = K;
    fn index(&self, index: NodeIndex) -> &Self::Output {
        self.nodes.get_index(index.0).map(|(label, _)| label).expect("node index out of range")
    }
}

impl<K: Eq + Hash> FromIterator<(K, K)> for Digraph<K> {
    fn from_iter<T: IntoIterator<Item = (K, K)>>(iter: T) -> Self {
        let mut graph = Digraph::new();
        for (from, to) in iter {
            graph.add_edge(from, to);
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Digraph<&'static str> {
        // a -> b <-> c -> d, e isolated
        let mut graph: Digraph<&str> = [("a", "b"), ("b", "c"), ("c", "b"), ("c", "d")].into_iter().collect();
        graph.add_node("e");
        graph
    }

    #[test]
    fn test_add_node_is_idempotent() {
        let mut graph = sample();
        assert_eq!(graph.add_node("c"), NodeIndex(2));
        assert_eq!(graph.len(), 5);
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn test_edges_in_insertion_order() {
        let graph = sample();
        let edges: Vec<_> = graph.edges().map(|(u, v)| (graph[u], graph[v])).collect();
        assert_eq!(edges, vec![("a", "b"), ("b", "c"), ("c", "b"), ("c", "d")]);
    }

    #[test]
    fn test_strongly_connected_components() {
        let graph = sample();
        assert_eq!(
            graph.strongly_connected_components(),
            vec![vec!["d"], vec!["c", "b"], vec!["a"], vec!["e"]]
        );
    }

    #[test]
    fn test_cycles() {
        let mut graph = sample();
        assert_eq!(graph.cycles(), vec![vec!["c", "b"]]);
        assert!(!graph.is_acyclic());

        graph.add_edge("e", "e");
        assert_eq!(graph.cycles(), vec![vec!["c", "b"], vec!["e"]]);
    }

    #[test]
    #[should_panic(expected = "Tried to add an edge to a node that does not exist")]
    fn test_edge_to_missing_node_panics() {
        let mut graph = sample();
        graph.add_edge_by_index(NodeIndex(0), NodeIndex(5));
    }

    #[test]
    fn test_dag_is_acyclic() {
        let graph: Digraph<u8> = [(1, 2), (1, 3), (2, 3)].into_iter().collect();
        assert!(graph.is_acyclic());
        assert!(graph.cycles().is_empty());
    }
}
