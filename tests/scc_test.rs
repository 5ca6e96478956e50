extern crate scc_finder;

#[cfg(test)]
mod test {
    use rustc_hash::FxHashMap;
    use scc_finder::scc::{recursive, strongly_connected_components};

    struct Graph {
        adj: FxHashMap<char, Vec<char>>,
    }

    impl Graph {
        fn new(edges: &[(char, char)]) -> Graph {
            let mut adj: FxHashMap<char, Vec<char>> = FxHashMap::default();
            for &(u, v) in edges {
                adj.entry(u).or_default().push(v);
            }
            Graph { adj }
        }

        fn children(&self, node: char) -> Vec<char> {
            self.adj.get(&node).cloned().unwrap_or_default()
        }

        fn sccs(&self, roots: &[char]) -> Vec<Vec<char>> {
            let iterative = strongly_connected_components(roots.iter().copied(), |&c| c, |&c| self.children(c));
            let recursive = recursive::strongly_connected_components(roots.iter().copied(), |&c| c, |&c| self.children(c));
            assert_eq!(iterative, recursive);
            iterative
        }
    }

    #[test]
    fn test_empty_input() {
        let graph = Graph::new(&[('A', 'B')]);
        assert!(graph.sccs(&[]).is_empty());
    }

    #[test]
    fn test_single_node() {
        let graph = Graph::new(&[]);
        assert_eq!(graph.sccs(&['A']), vec![vec!['A']]);
    }

    #[test]
    fn test_simple_cycle() {
        let graph = Graph::new(&[('A', 'B'), ('B', 'C'), ('C', 'A')]);
        let components = graph.sccs(&['A']);
        assert_eq!(components.len(), 1);
        let mut nodes = components[0].clone();
        nodes.sort();
        assert_eq!(nodes, vec!['A', 'B', 'C']);
        assert_eq!(*components[0].last().unwrap(), 'A');
    }

    #[test]
    fn test_linear_chain() {
        let graph = Graph::new(&[('A', 'B'), ('B', 'C')]);
        assert_eq!(graph.sccs(&['A']), vec![vec!['C'], vec!['B'], vec!['A']]);
    }

    #[test]
    fn test_disjoint_chains() {
        let graph = Graph::new(&[('A', 'B'), ('X', 'Y'), ('Y', 'X')]);
        assert_eq!(graph.sccs(&['A', 'X']), vec![vec!['B'], vec!['A'], vec!['Y', 'X']]);
        assert_eq!(graph.sccs(&['X', 'A']), vec![vec!['Y', 'X'], vec!['B'], vec!['A']]);
    }

    #[test]
    fn test_self_loop() {
        let graph = Graph::new(&[('A', 'A')]);
        assert_eq!(graph.sccs(&['A']), vec![vec!['A']]);
    }

    #[test]
    fn test_repeated_roots_are_skipped() {
        let graph = Graph::new(&[('A', 'B'), ('B', 'A')]);
        assert_eq!(graph.sccs(&['B', 'A', 'B']), vec![vec!['A', 'B']]);
    }

    #[test]
    fn test_root_inside_later_component() {
        // starting from C, the component {A, B} is reached through a cross edge
        // only after it was closed from the root A
        let graph = Graph::new(&[('A', 'B'), ('B', 'A'), ('C', 'A'), ('C', 'D'), ('D', 'C')]);
        assert_eq!(graph.sccs(&['A', 'C']), vec![vec!['B', 'A'], vec!['D', 'C']]);
        assert_eq!(graph.sccs(&['C']), vec![vec!['B', 'A'], vec!['D', 'C']]);
    }

    #[test]
    fn test_deterministic() {
        let graph = Graph::new(&[('A', 'B'), ('B', 'C'), ('C', 'A'), ('C', 'D'), ('D', 'E'), ('E', 'D')]);
        let first = graph.sccs(&['A', 'D']);
        for _ in 0..10 {
            assert_eq!(graph.sccs(&['A', 'D']), first);
        }
    }
}
