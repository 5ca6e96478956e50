use std::hash::Hash;

use super::tarjan::TarjanState;

/// Recursive form of [`super::tarjan::strongly_connected_components`].
///
/// Same contract and same output, but every tree edge costs a native stack
/// frame, so very deep graphs can overflow the stack.
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
    fn strong_connect<V, K, I, FK, FC>(node: V, node_key: K, key: &mut FK, children: &mut FC, state: &mut TarjanState<K, V>)
    where
        K: Eq + Hash + Clone,
        FK: FnMut(&V) -> K,
        FC: FnMut(&V) -> I,
        I: IntoIterator<Item = V>,
    {
        let successors = children(&node);
        state.open(node_key.clone(), node);

        for next in successors {
            let next_key = key(&next);
            match state.index_of(&next_key) {
                Some(next_index) => state.visit_seen(&node_key, &next_key, next_index),
                None => {
                    strong_connect(next, next_key.clone(), key, children, state);
                    let lowlink = state.lowlink_of(&next_key);
                    state.lower_lowlink(&node_key, lowlink);
                }
            }
        }

        state.finish(&node_key);
    }

    let mut state = TarjanState::new();

    for v in nodes {
        let v_key = key(&v);
        if state.index_of(&v_key).is_none() {
            strong_connect(v, v_key, &mut key, &mut children, &mut state);
        }
    }

    state.into_components()
}
