//! Meek orientation rules R1 to R4, iterated to a fixed point.
//!
//! Each pass scans the undirected edges in pair order and applies the
//! first rule that fires for either direction. Passes repeat until one
//! changes nothing. Knowledge is consulted before every orientation and
//! cancellation between passes, so a cancelled run leaves the graph as the
//! last completed pass left it.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use tessera_core::config::OrientationConfig;
use tessera_core::errors::TesseraResult;
use tessera_core::traits::Cancellable;
use tessera_core::{CancellationToken, Knowledge};
use tessera_graph::{would_create_cycle, Graph, NodeId};

use super::knowledge::{apply_background_knowledge, is_arrowhead_allowed, KnowledgeStats};

/// The rule that justified an orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rule {
    /// Away from a collider: `P --> X --- Y`, `P` and `Y` non-adjacent.
    R1,
    /// Away from a cycle: `X --> Z --> Y` with `X --- Y`.
    R2,
    /// Double triangle: `X --- C --> Y`, `X --- D --> Y`, `C` and `D` non-adjacent.
    R3,
    /// `X --- C --> D --> Y`, `X` adjacent to `D`, `C` and `Y` non-adjacent.
    R4,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::R1 => "R1",
            Self::R2 => "R2",
            Self::R3 => "R3",
            Self::R4 => "R4",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeekStats {
    pub r1: usize,
    pub r2: usize,
    pub r3: usize,
    pub r4: usize,
    /// Passes started, including the final one that changed nothing.
    pub passes: usize,
    pub skipped_by_cycle: usize,
    pub skipped_by_knowledge: usize,
    pub knowledge: KnowledgeStats,
    /// False when cancellation stopped the rules before a fixed point.
    pub completed: bool,
}

impl MeekStats {
    pub fn total_oriented(&self) -> usize {
        self.r1 + self.r2 + self.r3 + self.r4
    }

    fn record(&mut self, rule: Rule) {
        match rule {
            Rule::R1 => self.r1 += 1,
            Rule::R2 => self.r2 += 1,
            Rule::R3 => self.r3 += 1,
            Rule::R4 => self.r4 += 1,
        }
    }
}

/// The rule engine, bound to one knowledge set.
#[derive(Debug, Clone)]
pub struct MeekRules<'a> {
    knowledge: &'a Knowledge,
    prevent_cycles: bool,
    apply_r4: bool,
}

impl<'a> MeekRules<'a> {
    /// R4 runs when the knowledge is non-empty or the config forces it.
    pub fn new(knowledge: &'a Knowledge, config: &OrientationConfig) -> Self {
        Self {
            knowledge,
            prevent_cycles: config.prevent_cycles,
            apply_r4: config.always_apply_r4 || !knowledge.is_empty(),
        }
    }

    pub fn applies_r4(&self) -> bool {
        self.apply_r4
    }

    /// Apply background knowledge, then the rules until nothing changes.
    /// Idempotent: a second call on the result orients nothing.
    pub fn orient(&self, graph: &mut Graph, cancel: &dyn Cancellable) -> TesseraResult<MeekStats> {
        let _span = crate::orientation_span!("meek", graph.edge_count()).entered();
        let mut stats = MeekStats {
            knowledge: apply_background_knowledge(graph, self.knowledge, self.prevent_cycles)?,
            ..MeekStats::default()
        };

        loop {
            if cancel.is_cancelled() {
                info!(passes = stats.passes, "meek orientation cancelled");
                return Ok(stats);
            }
            stats.passes += 1;
            if !self.pass(graph, &mut stats)? {
                break;
            }
        }

        stats.completed = true;
        info!(
            passes = stats.passes,
            r1 = stats.r1,
            r2 = stats.r2,
            r3 = stats.r3,
            r4 = stats.r4,
            skipped_by_cycle = stats.skipped_by_cycle,
            skipped_by_knowledge = stats.skipped_by_knowledge,
            "meek orientation finished"
        );
        Ok(stats)
    }

    /// One sweep over the undirected edges. Returns whether anything changed.
    fn pass(&self, graph: &mut Graph, stats: &mut MeekStats) -> TesseraResult<bool> {
        let mut changed = false;
        for (a, b) in graph.adjacent_pairs() {
            for (x, y) in [(a, b), (b, a)] {
                if !graph.is_undirected(x, y) {
                    break;
                }
                let Some(rule) = self.firing_rule(graph, x, y) else {
                    continue;
                };
                if !is_arrowhead_allowed(graph, x, y, self.knowledge) {
                    stats.skipped_by_knowledge += 1;
                    continue;
                }
                if self.prevent_cycles && would_create_cycle(graph, x, y) {
                    stats.skipped_by_cycle += 1;
                    continue;
                }
                debug!(from = %graph.name(x), to = %graph.name(y), rule = %rule, "meek orientation");
                graph.orient(x, y)?;
                stats.record(rule);
                changed = true;
                break;
            }
        }
        Ok(changed)
    }

    /// The first rule that orients the undirected edge `x --- y` as `x --> y`.
    pub fn firing_rule(&self, graph: &Graph, x: NodeId, y: NodeId) -> Option<Rule> {
        if rule1(graph, x, y) {
            return Some(Rule::R1);
        }
        if rule2(graph, x, y) {
            return Some(Rule::R2);
        }
        if rule3(graph, x, y) {
            return Some(Rule::R3);
        }
        if self.apply_r4 && rule4(graph, x, y) {
            return Some(Rule::R4);
        }
        None
    }
}

/// Orient an owned graph and hand it back. Never cancelled.
pub fn meek_orient(
    mut graph: Graph,
    knowledge: &Knowledge,
    config: &OrientationConfig,
) -> TesseraResult<Graph> {
    MeekRules::new(knowledge, config).orient(&mut graph, &CancellationToken::new())?;
    Ok(graph)
}

fn rule1(graph: &Graph, x: NodeId, y: NodeId) -> bool {
    graph
        .parents(x)
        .into_iter()
        .any(|p| p != y && !graph.is_adjacent(p, y))
}

fn rule2(graph: &Graph, x: NodeId, y: NodeId) -> bool {
    graph
        .children(x)
        .into_iter()
        .any(|z| graph.is_directed_from_to(z, y))
}

fn rule3(graph: &Graph, x: NodeId, y: NodeId) -> bool {
    let legs: Vec<NodeId> = graph
        .undirected_neighbors(x)
        .into_iter()
        .filter(|&c| c != y && graph.is_directed_from_to(c, y))
        .collect();
    legs.iter()
        .enumerate()
        .any(|(i, &c)| legs[i + 1..].iter().any(|&d| !graph.is_adjacent(c, d)))
}

fn rule4(graph: &Graph, x: NodeId, y: NodeId) -> bool {
    graph.parents(y).into_iter().any(|d| {
        d != x
            && graph.is_adjacent(x, d)
            && graph
                .parents(d)
                .into_iter()
                .any(|c| c != x && c != y && graph.is_undirected(x, c) && !graph.is_adjacent(c, y))
    })
}
