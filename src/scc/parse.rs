use std::str::FromStr;

use thiserror::Error;

use super::digraph::Digraph;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseGraphError {
    #[error("line {line}: edge list has no source node")]
    MissingSource { line: usize },
    #[error("line {line}: expected a single source node, found `{found}`")]
    MultipleSources { line: usize, found: String },
    #[error("line {line}: more than one `->`")]
    MultipleArrows { line: usize },
}

/// Parses the line format `a -> b c d`. A bare `a` declares a node without
/// edges, `#` starts a comment and blank lines are skipped.
pub fn parse_digraph(input: &str) -> Result<Digraph<String>, ParseGraphError> {
    let mut graph = Digraph::new();

    for (i, raw_line) in input.lines().enumerate() {
        let line = i + 1;
        let content = raw_line.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }

        let mut parts = content.split("->");
        let source = parts.next().unwrap_or("").trim();
        let targets = parts.next();
        if parts.next().is_some() {
            return Err(ParseGraphError::MultipleArrows { line });
        }
        if source.is_empty() {
            return Err(ParseGraphError::MissingSource { line });
        }
        if source.split_whitespace().count() > 1 {
            return Err(ParseGraphError::MultipleSources { line, found: source.to_string() });
        }

        let from = graph.add_node(source.to_string());
        for target in targets.into_iter().flat_map(str::split_whitespace) {
            let to = graph.add_node(target.to_string());
            graph.add_edge_by_index(from, to);
        }
    }

    Ok(graph)
}

impl FromStr for Digraph<String> {
    type Err = ParseGraphError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_digraph(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let graph: Digraph<String> = "
            # dependencies
            app -> lib util
            lib -> util   # trailing comment
            util -> lib
            docs
            app ->
        "
        .parse()
        .unwrap();

        let labels: Vec<_> = graph.labels().map(String::as_str).collect();
        assert_eq!(labels, vec!["app", "lib", "util", "docs"]);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(
            graph.strongly_connected_components(),
            vec![vec!["util".to_string(), "lib".to_string()], vec!["app".to_string()], vec!["docs".to_string()]]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_digraph("a -> b\n -> c").err(), Some(ParseGraphError::MissingSource { line: 2 }));
        assert_eq!(
            parse_digraph("a b -> c").err(),
            Some(ParseGraphError::MultipleSources { line: 1, found: "a b".to_string() })
        );
        assert_eq!(parse_digraph("\n\na -> b -> c").err(), Some(ParseGraphError::MultipleArrows { line: 3 }));
    }

    #[test]
    fn test_parse_empty() {
        let graph = parse_digraph("# nothing here\n\n").unwrap();
        assert!(graph.is_empty());
    }
}
