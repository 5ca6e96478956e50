use std::hash::Hash;

use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};

/// Per-invocation bookkeeping for Tarjan's algorithm.
///
/// Shared by the explicit-stack traversal below and by
/// [`super::recursive::strongly_connected_components`], so both produce the same
/// components in the same order.
pub(super) struct TarjanState<K, V> {
    index: usize,
    stack: Vec<(K, V)>,
    on_stack: FxHashSet<K>,
    index_of: FxHashMap<K, usize>,
    lowlink_of: FxHashMap<K, usize>,
    components: Vec<Vec<V>>,
}

impl<K, V> TarjanState<K, V>
where
    K: Eq + Hash + Clone,
{
    pub(super) fn new() -> TarjanState<K, V> {
        TarjanState {
            index: 0,
            stack: Vec::new(),
            on_stack: FxHashSet::default(),
            index_of: FxHashMap::default(),
            lowlink_of: FxHashMap::default(),
            components: Vec::new(),
        }
    }

    pub(super) fn index_of(&self, key: &K) -> Option<usize> {
        self.index_of.get(key).copied()
    }

    pub(super) fn is_on_stack(&self, key: &K) -> bool {
        self.on_stack.contains(key)
    }

    pub(super) fn lowlink_of(&self, key: &K) -> usize {
        self.lowlink_of[key]
    }

    /// Assigns the next discovery index to `key` and pushes `node` on the visit stack.
    pub(super) fn open(&mut self, key: K, node: V) {
        debug_assert!(!self.index_of.contains_key(&key), "Tried to open a node twice");
        self.index_of.insert(key.clone(), self.index);
        self.lowlink_of.insert(key.clone(), self.index);
        self.index += 1;
        self.on_stack.insert(key.clone());
        self.stack.push((key, node));
    }

    /// Low-links only ever decrease.
    pub(super) fn lower_lowlink(&mut self, key: &K, candidate: usize) {
        if let Some(lowlink) = self.lowlink_of.get_mut(key) {
            *lowlink = (*lowlink).min(candidate);
        }
    }

    /// Handles the edge `from -> to` where `to` has already been opened.
    /// Targets that belong to a closed component are ignored.
    pub(super) fn visit_seen(&mut self, from: &K, to: &K, to_index: usize) {
        if self.is_on_stack(to) {
            self.lower_lowlink(from, to_index);
        }
    }

    /// Called once every successor of `key` has been explored. Emits a component
    /// when `key` turns out to be its root.
    pub(super) fn finish(&mut self, key: &K) {
        if self.lowlink_of[key] != self.index_of[key] {
            return;
        }

        let mut component = Vec::new();
        while let Some((w, node)) = self.stack.pop() {
            self.on_stack.remove(&w);
            component.push(node);
            if w == *key {
                break;
            }
        }

        trace!("closed component {} with {} nodes", self.components.len(), component.len());
        self.components.push(component);
    }

    pub(super) fn into_components(self) -> Vec<Vec<V>> {
        debug_assert!(self.stack.is_empty() && self.on_stack.is_empty());
        debug!("found {} components over {} nodes", self.components.len(), self.index);
        self.components
    }
}

struct Frame<K, I> {
    key: K,
    children: I,
}

/// Computes the strongly connected components of the graph reachable from `nodes`.
///
/// `key` gives the identity of a node and must be deterministic; `children`
/// enumerates its successors (an empty iterator when there are none). Only nodes
/// reachable from `nodes` are visited, and `nodes` are tried in the given order.
///
/// Components come out in reverse topological order: a component is emitted only
/// after every component reachable from it. Within a component nodes appear in
/// the order they were popped off the visit stack, so the component's root (the
/// first of its nodes to be entered) is always last.
///
/// The traversal keeps its own frame stack, so the depth of the graph is bounded
/// only by available memory. The graph must be finite.
pub fn strongly_connected_components<V, K, I, FK, FC>(
    nodes: impl IntoIterator<Item = V>,
    mut key: FK,
    mut children: FC,
) -> Vec<Vec<V>>
where
    K: Eq + Hash + Clone,
    FK: FnMut(&V) -> K,
    FC: FnMut(&V) -> I,
    I: IntoIterator<Item = V>,
{
    let mut state = TarjanState::new();
    let mut frames: Vec<Frame<K, I::IntoIter>> = Vec::new();

    for root in nodes {
        let root_key = key(&root);
        if state.index_of(&root_key).is_some() {
            continue;
        }

        frames.push(Frame { key: root_key.clone(), children: children(&root).into_iter() });
        state.open(root_key, root);

        while let Some(frame) = frames.last_mut() {
            match frame.children.next() {
                Some(next) => {
                    let next_key = key(&next);
                    match state.index_of(&next_key) {
                        Some(next_index) => state.visit_seen(&frame.key, &next_key, next_index),
                        None => {
                            frames.push(Frame { key: next_key.clone(), children: children(&next).into_iter() });
                            state.open(next_key, next);
                        }
                    }
                }
                None => {
                    if let Some(done) = frames.pop() {
                        state.finish(&done.key);
                        if let Some(parent) = frames.last() {
                            let lowlink = state.lowlink_of(&done.key);
                            state.lower_lowlink(&parent.key, lowlink);
                        }
                    }
                }
            }
        }
    }

    state.into_components()
}
