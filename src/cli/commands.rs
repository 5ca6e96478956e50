use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use itertools::Itertools;
use log::info;
use scc_finder::scc::common::Settings;
use scc_finder::scc::digraph::{Digraph, NodeIndex};
use scc_finder::scc::generate::{check_many, CheckReport};
use scc_finder::scc::parse::parse_digraph;
use scc_finder::scc::recursive;

use super::CliError;

pub fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.display().to_string(),
            source,
        }),
        _ => {
            let mut input = String::new();
            io::stdin().lock().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

/// Prints one component per line, labels separated by spaces, in emission order.
pub fn find<W: Write>(input: &str, recursive: bool, cycles_only: bool, out: &mut W) -> Result<(), CliError> {
    let graph = parse_digraph(input)?;
    info!("read graph with {} nodes and {} edges", graph.len(), graph.edge_count());

    let components = if recursive {
        recursive::strongly_connected_components(
            graph.node_indices(),
            |&node_index| node_index,
            |&node_index| graph.successors(node_index).iter().copied(),
        )
    } else {
        graph.strongly_connected_component_indices()
    };

    for component in components {
        if cycles_only && !is_cyclic(&graph, &component) {
            continue;
        }
        writeln!(out, "{}", component.iter().map(|&i| &graph[i]).join(" "))?;
    }
    Ok(())
}

fn is_cyclic(graph: &Digraph<String>, component: &[NodeIndex]) -> bool {
    component.len() > 1 || graph.has_self_loop(component[0])
}

/// Returns whether every generated graph passed.
pub fn check<W: Write>(settings: &Settings, out: &mut W) -> Result<bool, CliError> {
    let report = check_many(settings)?;
    write_report(&report, out)?;
    Ok(report.is_success())
}

fn write_report<W: Write>(report: &CheckReport, out: &mut W) -> Result<(), CliError> {
    writeln!(out, "graphs:           {}", report.n_graphs)?;
    writeln!(out, "nodes:            {}", report.n_nodes)?;
    writeln!(out, "edges:            {}", report.n_edges)?;
    writeln!(out, "components:       {}", report.n_components)?;
    writeln!(out, "cyclic:           {}", report.n_cyclic_components)?;
    writeln!(out, "largest:          {}", report.largest_component)?;
    writeln!(out, "failures:         {}", report.failures.len())?;
    for failure in &report.failures {
        writeln!(out, "  {failure}")?;
    }
    Ok(())
}
