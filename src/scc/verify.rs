use std::hash::Hash;

use thiserror::Error;

use super::digraph::{Digraph, NodeIndex};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("component {0} is empty")]
    Empty(usize),
    #[error("component {component} contains a node that is not in the graph")]
    Unknown { component: usize },
    #[error("node {0:?} appears more than once")]
    Duplicate(NodeIndex),
    #[error("node {0:?} is missing from every component")]
    Missing(NodeIndex),
    #[error("edge {from:?} -> {to:?} leads from component {from_component} to later component {to_component}")]
    OutOfOrder {
        from: NodeIndex,
        to: NodeIndex,
        from_component: usize,
        to_component: usize,
    },
    #[error("component {0} is not strongly connected")]
    NotStronglyConnected(usize),
}

/// Checks that `components` are exactly the strongly connected components of
/// `graph`, listed in reverse topological order.
///
/// Every cross-component edge pointing backwards in the list rules out cycles
/// between components, so together with internal strong connectivity this also
/// proves each component is maximal.
pub fn verify<K: Eq + Hash>(graph: &Digraph<K>, components: &[Vec<K>]) -> Result<(), Violation> {
    let components = components
        .iter()
        .enumerate()
        .map(|(c, component)| {
            component
                .iter()
                .map(|label| graph.get_index_of(label).ok_or(Violation::Unknown { component: c }))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;
    verify_indices(graph, &components)
}

pub fn verify_indices<K: Eq + Hash>(graph: &Digraph<K>, components: &[Vec<NodeIndex>]) -> Result<(), Violation> {
    let mut slots: Vec<Option<usize>> = vec![None; graph.len()];
    for (c, component) in components.iter().enumerate() {
        if component.is_empty() {
            return Err(Violation::Empty(c));
        }
        for &node_index in component {
            let slot = slots.get_mut(node_index.0).ok_or(Violation::Unknown { component: c })?;
            if slot.is_some() {
                return Err(Violation::Duplicate(node_index));
            }
            *slot = Some(c);
        }
    }

    let component_of = slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| slot.ok_or(Violation::Missing(NodeIndex(i))))
        .collect::<Result<Vec<_>, _>>()?;

    let mut reverse = vec![vec![]; graph.len()];
    for (from, to) in graph.edges() {
        let (from_component, to_component) = (component_of[from.0], component_of[to.0]);
        if to_component > from_component {
            return Err(Violation::OutOfOrder { from, to, from_component, to_component });
        }
        reverse[to.0].push(from);
    }

    let forward: Vec<&[NodeIndex]> = graph.node_indices().map(|i| graph.successors(i)).collect();
    for (c, component) in components.iter().enumerate() {
        let start = component[0];
        if reach_within(start, c, &component_of, &forward) != component.len()
            || reach_within(start, c, &component_of, &reverse) != component.len()
        {
            return Err(Violation::NotStronglyConnected(c));
        }
    }

    Ok(())
}

/// Number of nodes of component `c` reachable from `start` without leaving it.
fn reach_within<A: AsRef<[NodeIndex]>>(start: NodeIndex, c: usize, component_of: &[usize], adjacency: &[A]) -> usize {
    let mut seen = vec![false; component_of.len()];
    let mut stack = vec![start];
    seen[start.0] = true;
    let mut count = 0;
    while let Some(v) = stack.pop() {
        count += 1;
        for &w in adjacency[v.0].as_ref() {
            if component_of[w.0] == c && !seen[w.0] {
                seen[w.0] = true;
                stack.push(w);
            }
        }
    }
    count
}
