//! The PC runner: adjacency search, background knowledge, colliders, Meek.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use tessera_core::errors::TesseraResult;
use tessera_core::models::SepsetMap;
use tessera_core::traits::{Cancellable, IndependenceTest};
use tessera_core::{Knowledge, TesseraConfig};
use tessera_graph::Graph;

use crate::fas::{Fas, FasStats};
use crate::orientation::{
    apply_background_knowledge, orient_colliders, ColliderStats, KnowledgeStats, MeekRules,
    MeekStats,
};

/// Per-stage diagnostics of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchStats {
    pub test: String,
    pub fas: FasStats,
    pub knowledge: KnowledgeStats,
    pub colliders: ColliderStats,
    pub meek: MeekStats,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SearchStats {
    pub fn elapsed_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

/// The searched pattern and everything needed to explain it.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub graph: Graph,
    pub sepsets: SepsetMap,
    pub stats: SearchStats,
    /// False when cancelled. After a cancelled adjacency search the graph
    /// is the last completed skeleton with no orientation applied.
    pub completed: bool,
}

/// PC search with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct PcSearch {
    config: TesseraConfig,
}

impl PcSearch {
    pub fn new(config: TesseraConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TesseraConfig {
        &self.config
    }

    pub fn search(
        &self,
        test: &dyn IndependenceTest,
        knowledge: &Knowledge,
        cancel: &dyn Cancellable,
    ) -> TesseraResult<SearchOutcome> {
        self.config.validate()?;
        knowledge.validate()?;
        let started_at = Utc::now();
        let _span = crate::search_span!(test.name(), test.variables().len()).entered();

        let fas = Fas::new(self.config.fas.clone()).search(test, knowledge, cancel)?;
        let mut graph = fas.graph;
        let mut stats = SearchStats {
            test: test.name().to_string(),
            fas: fas.stats,
            knowledge: KnowledgeStats::default(),
            colliders: ColliderStats::default(),
            meek: MeekStats::default(),
            started_at,
            finished_at: started_at,
        };

        if !fas.completed || cancel.is_cancelled() {
            stats.finished_at = Utc::now();
            info!("search cancelled after adjacency search");
            return Ok(SearchOutcome {
                graph,
                sepsets: fas.sepsets,
                stats,
                completed: false,
            });
        }

        let prevent_cycles = self.config.orientation.prevent_cycles;
        {
            let _stage = crate::orientation_span!("knowledge", graph.edge_count()).entered();
            stats.knowledge = apply_background_knowledge(&mut graph, knowledge, prevent_cycles)?;
        }
        {
            let _stage = crate::orientation_span!("colliders", graph.edge_count()).entered();
            stats.colliders = orient_colliders(&mut graph, &fas.sepsets, knowledge, prevent_cycles)?;
            info!(oriented = stats.colliders.oriented, "collider orientation finished");
        }
        stats.meek = MeekRules::new(knowledge, &self.config.orientation).orient(&mut graph, cancel)?;

        let completed = stats.meek.completed;
        stats.finished_at = Utc::now();
        info!(
            edges = graph.edge_count(),
            directed = graph.directed_edge_count(),
            elapsed_ms = stats.elapsed_ms(),
            completed,
            "search finished"
        );
        Ok(SearchOutcome {
            graph,
            sepsets: fas.sepsets,
            stats,
            completed,
        })
    }
}
