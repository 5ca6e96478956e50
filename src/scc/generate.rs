use std::{panic, thread};

use log::{debug, info, warn};
use rand::{Rng, RngCore, SeedableRng};
use rand_distr::{Binomial, Distribution};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use thiserror::Error;

use super::common::{Settings, SettingsError};
use super::digraph::{Digraph, NodeIndex};
use super::recursive;
use super::verify::{verify_indices, Violation};

/// A random graph over the labels `0..n_nodes`. Each node draws its out-degree
/// from `Binomial(n_nodes, mean_out_degree / n_nodes)` and picks targets uniformly.
pub fn random_digraph<R: RngCore>(rng: &mut R, settings: &Settings) -> Result<Digraph<usize>, SettingsError> {
    settings.validate()?;
    let n = settings.n_nodes;
    let degree = Binomial::new(n as u64, settings.edge_probability())
        .map_err(|_| SettingsError::InvalidDegree(settings.mean_out_degree))?;

    let mut graph = Digraph::with_capacity(n);
    for v in 0..n {
        graph.add_node(v);
    }

    for v in 0..n {
        let out_degree = degree.sample(rng);
        for _ in 0..out_degree {
            let w = rng.gen_range(0..n);
            if w != v || settings.allow_self_loops {
                graph.add_edge_by_index(NodeIndex(v), NodeIndex(w));
            }
        }
    }

    debug!("generated graph with {} nodes and {} edges", graph.len(), graph.edge_count());
    Ok(graph)
}

pub fn seeded_digraph(settings: &Settings, seed: u64) -> Result<Digraph<usize>, SettingsError> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    random_digraph(&mut rng, settings)
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckFailure {
    #[error("seed {seed}: {violation}")]
    Invalid { seed: u64, violation: Violation },
    #[error("seed {seed}: recursive and explicit-stack traversals disagree")]
    Mismatch { seed: u64 },
    #[error("seed {seed}: could not start the recursive traversal: {reason}")]
    RecursiveUnavailable { seed: u64, reason: String },
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CheckReport {
    pub n_graphs: usize,
    pub n_nodes: usize,
    pub n_edges: usize,
    pub n_components: usize,
    pub n_cyclic_components: usize,
    pub largest_component: usize,
    pub failures: Vec<CheckFailure>,
}

impl CheckReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn merge(mut self, other: CheckReport) -> CheckReport {
        self.n_graphs += other.n_graphs;
        self.n_nodes += other.n_nodes;
        self.n_edges += other.n_edges;
        self.n_components += other.n_components;
        self.n_cyclic_components += other.n_cyclic_components;
        self.largest_component = self.largest_component.max(other.largest_component);
        self.failures.extend(other.failures);
        self
    }
}

/// Graphs larger than this are not run through the recursive traversal.
pub const RECURSIVE_CHECK_LIMIT: usize = 10_000;

/// Stack reserved per level of recursion on the thread that runs the recursive
/// traversal. Unoptimized builds need far more than release builds.
const RECURSIVE_FRAME_BYTES: usize = 4096;
const RECURSIVE_MIN_STACK: usize = 1 << 20;

/// Runs the recursive traversal on a dedicated thread whose stack fits a path
/// through every node, so the caller's stack size does not matter.
fn recursive_components(graph: &Digraph<usize>) -> Result<Vec<Vec<NodeIndex>>, String> {
    let stack_size = (graph.len() + 1).saturating_mul(RECURSIVE_FRAME_BYTES).max(RECURSIVE_MIN_STACK);
    thread::scope(|scope| {
        let handle = thread::Builder::new()
            .name("scc-recursive-check".to_string())
            .stack_size(stack_size)
            .spawn_scoped(scope, || {
                recursive::strongly_connected_components(
                    graph.node_indices(),
                    |&node_index| node_index,
                    |&node_index| graph.successors(node_index).iter().copied(),
                )
            })
            .map_err(|e| e.to_string())?;
        match handle.join() {
            Ok(components) => Ok(components),
            Err(payload) => panic::resume_unwind(payload),
        }
    })
}

/// Verifies the components of `graph` and compares both traversals.
pub fn check_graph(graph: &Digraph<usize>, seed: u64) -> CheckReport {
    let components = graph.strongly_connected_component_indices();

    let mut failures = Vec::new();
    if let Err(violation) = verify_indices(graph, &components) {
        failures.push(CheckFailure::Invalid { seed, violation });
    }
    if graph.len() <= RECURSIVE_CHECK_LIMIT {
        match recursive_components(graph) {
            Ok(recursive_components) if recursive_components != components => {
                failures.push(CheckFailure::Mismatch { seed });
            }
            Ok(_) => {}
            Err(reason) => {
                warn!("seed {}: recursive traversal skipped: {}", seed, reason);
                failures.push(CheckFailure::RecursiveUnavailable { seed, reason });
            }
        }
    }

    CheckReport {
        n_graphs: 1,
        n_nodes: graph.len(),
        n_edges: graph.edge_count(),
        n_components: components.len(),
        n_cyclic_components: components
            .iter()
            .filter(|component| component.len() > 1 || graph.has_self_loop(component[0]))
            .count(),
        largest_component: components.iter().map(|component| component.len()).max().unwrap_or(0),
        failures,
    }
}

/// Checks `n_graphs` random graphs seeded with `seed, seed + 1, ...` in parallel.
/// Each graph is still traversed on a single thread.
pub fn check_many(settings: &Settings) -> Result<CheckReport, SettingsError> {
    settings.validate()?;
    info!(
        "checking {} graphs of {} nodes, mean out-degree {}",
        settings.n_graphs, settings.n_nodes, settings.mean_out_degree
    );

    let reports = (0..settings.n_graphs)
        .into_par_iter()
        .map(|i| {
            let seed = settings.seed.wrapping_add(i as u64);
            seeded_digraph(settings, seed).map(|graph| check_graph(&graph, seed))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let report = reports.into_iter().fold(CheckReport::default(), CheckReport::merge);
    info!("{} components, {} failures", report.n_components, report.failures.len());
    Ok(report)
}
