//! Fast Adjacency Search: skeleton discovery by growing conditioning sets.
//!
//! Level `k` tests every still-adjacent pair `(X, Y)` against every
//! `k`-subset of `adj(X) ∪ adj(Y) \ {X, Y}`, taken from the adjacency
//! snapshot at the start of the level. Removals found during a level are
//! applied when it completes, so the result does not depend on pair order
//! and a parallel level produces exactly the sequential result.

pub mod subsets;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use tessera_core::config::{FasConfig, KnowledgePolicy};
use tessera_core::errors::TesseraResult;
use tessera_core::models::{Node, SepsetMap};
use tessera_core::traits::{Cancellable, IndependenceTest};
use tessera_core::Knowledge;
use tessera_graph::{Graph, NodeId};

use subsets::Combinations;

/// Diagnostics from one adjacency search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FasStats {
    /// Independence tests evaluated, including failed ones.
    pub tests_run: usize,
    /// Tests that returned an error. Each kept its edge.
    pub failed_tests: usize,
    /// Edges removed at each completed depth, indexed by depth.
    pub removed_per_depth: Vec<usize>,
    /// Deepest level that ran to completion.
    pub depth_reached: Option<usize>,
}

/// Skeleton plus the sepsets that justified each removal.
#[derive(Debug, Clone)]
pub struct FasOutcome {
    /// Undirected skeleton.
    pub graph: Graph,
    pub sepsets: SepsetMap,
    pub stats: FasStats,
    /// False when cancellation stopped the search before it terminated.
    pub completed: bool,
}

/// One pair scheduled at the current level.
struct PairJob {
    x: NodeId,
    y: NodeId,
    candidates: Vec<NodeId>,
}

/// What testing one pair produced.
#[derive(Default)]
struct PairVerdict {
    sepset: Option<Vec<NodeId>>,
    tests_run: usize,
    failed_tests: usize,
    cancelled: bool,
}

/// The adjacency search engine.
#[derive(Debug, Clone, Default)]
pub struct Fas {
    config: FasConfig,
}

impl Fas {
    pub fn new(config: FasConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FasConfig {
        &self.config
    }

    /// Run the search over `test.variables()`.
    ///
    /// Fails only on invalid configuration. Test errors are counted in
    /// [`FasStats::failed_tests`] and the edge is kept. On cancellation the
    /// level in progress is discarded and the outcome is marked incomplete.
    pub fn search(
        &self,
        test: &dyn IndependenceTest,
        knowledge: &Knowledge,
        cancel: &dyn Cancellable,
    ) -> TesseraResult<FasOutcome> {
        self.config.validate()?;
        let variables = test.variables();
        let _span = crate::fas_span!(variables.len(), self.config.depth).entered();

        let respect_knowledge = self.config.knowledge_policy == KnowledgePolicy::SkeletonAndOrientation;
        let mut graph = initial_graph(variables, knowledge, respect_knowledge)?;
        let mut sepsets = SepsetMap::new();
        let mut stats = FasStats::default();
        let mut completed = true;
        let limit = self.config.depth_limit();

        let mut depth = 0usize;
        loop {
            if limit.is_some_and(|d| depth > d) {
                break;
            }
            if cancel.is_cancelled() {
                completed = false;
                break;
            }

            let jobs = schedule_level(&graph, knowledge, respect_knowledge, depth);
            if jobs.is_empty() {
                break;
            }

            let verdicts: Vec<PairVerdict> = if self.config.parallel {
                jobs.par_iter()
                    .map(|job| test_pair(&graph, test, job, depth, cancel))
                    .collect()
            } else {
                jobs.iter()
                    .map(|job| test_pair(&graph, test, job, depth, cancel))
                    .collect()
            };

            for verdict in &verdicts {
                stats.tests_run += verdict.tests_run;
                stats.failed_tests += verdict.failed_tests;
            }
            if verdicts.iter().any(|v| v.cancelled) {
                info!(depth, "adjacency search cancelled; discarding level");
                completed = false;
                break;
            }

            let mut removed = 0usize;
            for (job, verdict) in jobs.iter().zip(verdicts) {
                let Some(sepset) = verdict.sepset else {
                    continue;
                };
                let names: Vec<String> = sepset.iter().map(|&n| graph.name(n).to_string()).collect();
                debug!(
                    x = %graph.name(job.x),
                    y = %graph.name(job.y),
                    sepset = ?names,
                    depth,
                    "removed adjacency"
                );
                sepsets.set(graph.name(job.x), graph.name(job.y), names);
                graph.remove_edge(job.x, job.y);
                removed += 1;
            }

            info!(depth, pairs = jobs.len(), removed, "adjacency level complete");
            stats.removed_per_depth.push(removed);
            stats.depth_reached = Some(depth);
            depth += 1;
        }

        info!(
            edges = graph.edge_count(),
            tests_run = stats.tests_run,
            failed_tests = stats.failed_tests,
            completed,
            "adjacency search finished"
        );
        Ok(FasOutcome {
            graph,
            sepsets,
            stats,
            completed,
        })
    }
}

/// Convenience form: search with `depth` and default settings otherwise,
/// returning only the skeleton and sepsets.
pub fn search(
    test: &dyn IndependenceTest,
    knowledge: &Knowledge,
    depth: i32,
) -> TesseraResult<(Graph, SepsetMap)> {
    let fas = Fas::new(FasConfig {
        depth,
        ..FasConfig::default()
    });
    let outcome = fas.search(test, knowledge, &tessera_core::CancellationToken::new())?;
    Ok((outcome.graph, outcome.sepsets))
}

/// The complete undirected graph, minus pairs knowledge rules out entirely
/// when the policy asks for it.
fn initial_graph(
    variables: &[Node],
    knowledge: &Knowledge,
    respect_knowledge: bool,
) -> TesseraResult<Graph> {
    let mut graph = Graph::with_nodes(variables.iter().cloned())?;
    let ids: Vec<NodeId> = graph.node_ids().collect();
    for (i, &a) in ids.iter().enumerate() {
        for &b in &ids[i + 1..] {
            if respect_knowledge && knowledge.is_adjacency_forbidden(graph.name(a), graph.name(b)) {
                debug!(a = %graph.name(a), b = %graph.name(b), "pair forbidden by knowledge");
                continue;
            }
            graph.add_undirected_edge(a, b)?;
        }
    }
    Ok(graph)
}

/// Pairs with at least `depth` candidate conditioning variables, in pair order.
fn schedule_level(
    graph: &Graph,
    knowledge: &Knowledge,
    respect_knowledge: bool,
    depth: usize,
) -> Vec<PairJob> {
    graph
        .adjacent_pairs()
        .into_iter()
        .filter(|&(x, y)| {
            !(respect_knowledge && knowledge.is_adjacency_required(graph.name(x), graph.name(y)))
        })
        .filter_map(|(x, y)| {
            let mut candidates: Vec<NodeId> = graph
                .adjacent_nodes(x)
                .into_iter()
                .chain(graph.adjacent_nodes(y))
                .filter(|&n| n != x && n != y)
                .collect();
            graph.sort_by_insertion(&mut candidates);
            candidates.dedup();
            (candidates.len() >= depth).then_some(PairJob { x, y, candidates })
        })
        .collect()
}

/// Test one pair against every `depth`-subset of its candidates, stopping
/// at the first independence.
fn test_pair(
    graph: &Graph,
    test: &dyn IndependenceTest,
    job: &PairJob,
    depth: usize,
    cancel: &dyn Cancellable,
) -> PairVerdict {
    let mut verdict = PairVerdict::default();
    if cancel.is_cancelled() {
        verdict.cancelled = true;
        return verdict;
    }

    let x = graph.node(job.x);
    let y = graph.node(job.y);
    for subset in Combinations::new(job.candidates.len(), depth) {
        let ids: Vec<NodeId> = subset.iter().map(|&i| job.candidates[i]).collect();
        let z: Vec<Node> = ids.iter().map(|&n| graph.node(n).clone()).collect();
        verdict.tests_run += 1;
        match test.check_independence(x, y, &z) {
            Ok(result) if result.independent => {
                verdict.sepset = Some(ids);
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(x = %x, y = %y, depth, error = %e, "independence test failed; keeping edge");
                verdict.failed_tests += 1;
            }
        }
    }
    verdict
}
