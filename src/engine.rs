//! Engine façade tying the graph, search, and split optimizer together.
//!
//! A `Pathfinder` owns one immutable graph built from one pool snapshot.
//! Queries only read; the instance is safe to share across threads. When
//! reserves move, build a new instance from a fresh snapshot.

use alloy::primitives::{Address, U256};

use crate::config::PathfinderConfig;
use crate::error::PathfinderError;
use crate::graph::{build_graph, find_best_paths, SwapGraph};
use crate::pool::Pool;
use crate::route::{Route, SplitRoute};
use crate::split::optimize_split;

/// Route-discovery engine over one pool snapshot.
pub struct Pathfinder {
    graph: SwapGraph,
    config: PathfinderConfig,
}

impl Pathfinder {
    /// Build an engine with default configuration. Unusable pools are
    /// logged and skipped.
    pub fn new(pools: &[Pool]) -> Self {
        Self::with_config(pools, PathfinderConfig::default())
    }

    pub fn with_config(pools: &[Pool], config: PathfinderConfig) -> Self {
        Self {
            graph: build_graph(pools),
            config,
        }
    }

    /// Best routes for the full amount, up to `config.top_k` entries.
    /// An empty result means no route connects the pair.
    pub fn find_best_paths(
        &self,
        from: Address,
        to: Address,
        amount_in: U256,
    ) -> Result<Vec<Route>, PathfinderError> {
        self.find_best_paths_k(from, to, amount_in, self.config.top_k)
    }

    /// Same as [`find_best_paths`](Self::find_best_paths) with an
    /// explicit result cap.
    pub fn find_best_paths_k(
        &self,
        from: Address,
        to: Address,
        amount_in: U256,
        k: usize,
    ) -> Result<Vec<Route>, PathfinderError> {
        find_best_paths(&self.graph, &self.config, from, to, amount_in, k)
    }

    /// Split-optimized query for the total amount.
    pub fn optimize_split(
        &self,
        from: Address,
        to: Address,
        total_amount: U256,
    ) -> Result<SplitRoute, PathfinderError> {
        optimize_split(&self.graph, &self.config, from, to, total_amount)
    }

    pub fn token_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn pool_count(&self) -> usize {
        self.graph.pool_count()
    }

    pub fn config(&self) -> &PathfinderConfig {
        &self.config
    }
}
