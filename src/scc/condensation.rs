use std::hash::Hash;
use std::ops::Index;

use itertools::Itertools;

use super::digraph::{Digraph, NodeIndex};

#[derive(PartialEq, PartialOrd, Ord, Clone, Copy, Hash, Eq, Debug)]
pub struct ComponentIndex(pub usize);

/// The DAG obtained by contracting every strongly connected component of a
/// [`Digraph`] into a single vertex.
///
/// Components are numbered in emission order, so every edge of the condensation
/// goes from a higher [`ComponentIndex`] to a lower one.
#[derive(Clone, Debug)]
pub struct Condensation {
    components: Vec<Vec<NodeIndex>>,
    component_of: Vec<ComponentIndex>,
    successors: Vec<Vec<ComponentIndex>>,
}

impl Condensation {
    pub fn new<K: Eq + Hash>(graph: &Digraph<K>) -> Condensation {
        let components = graph.strongly_connected_component_indices();

        let mut component_of = vec![ComponentIndex(0); graph.len()];
        for (i, component) in components.iter().enumerate() {
            for &node_index in component {
                component_of[node_index.0] = ComponentIndex(i);
            }
        }

        let successors = components
            .iter()
            .enumerate()
            .map(|(i, component)| {
                component
                    .iter()
                    .flat_map(|&node_index| graph.successors(node_index))
                    .map(|target| component_of[target.0])
                    .filter(|&target| target.0 != i)
                    .sorted()
                    .dedup()
                    .collect_vec()
            })
            .collect();

        Condensation { components, component_of, successors }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn components(&self) -> impl Iterator<Item = &[NodeIndex]> {
        self.components.iter().map(|c| c.as_slice())
    }

    pub fn component_of(&self, node_index: NodeIndex) -> ComponentIndex {
        self.component_of[node_index.0]
    }

    /// Components reachable over a single edge, without duplicates or `component` itself.
    pub fn successors(&self, component: ComponentIndex) -> &[ComponentIndex] {
        &self.successors[component.0]
    }

    /// Dependents before their dependencies: the reverse of emission order.
    pub fn topological_order(&self) -> impl Iterator<Item = ComponentIndex> {
        (0..self.components.len()).rev().map(ComponentIndex)
    }
}

impl Index<ComponentIndex> for Condensation {
    type Output = [NodeIndex];
    fn index(&self, index: ComponentIndex) -> &Self::Output {
        &self.components[index.0]
    }
}
