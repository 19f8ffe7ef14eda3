//! Token graph construction from a pool snapshot.
//!
//! Tokens are nodes, pools are a pair of directed edges. The graph is
//! built once by a pure function and is immutable afterwards; a fresh
//! snapshot requires a fresh graph, so edge weights can never go stale
//! against the reserves they were computed from.

use alloy::primitives::Address;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

use super::types::EdgeData;
use crate::pool::{u256_to_f64, Pool};

/// Immutable adjacency structure over one pool snapshot.
pub struct SwapGraph {
    graph: DiGraph<Address, EdgeData>,
    token_to_node: HashMap<Address, NodeIndex>,
    pools: HashMap<Address, Pool>,
}

/// Build the token graph from a snapshot, skipping unusable pools.
///
/// Skipped pools are logged and excluded; a bad pool degrades the graph,
/// it never fails the whole build. Parallel pools between the same token
/// pair are kept as separate edges since each has independent depth and
/// fee.
pub fn build_graph(pools: &[Pool]) -> SwapGraph {
    let mut graph = SwapGraph {
        graph: DiGraph::new(),
        token_to_node: HashMap::new(),
        pools: HashMap::new(),
    };

    for pool in pools {
        if !pool.is_usable() {
            tracing::warn!(
                "skipping pool {} ({}) - empty reserve, duplicate token, or fee out of range",
                pool.address,
                pool.protocol
            );
            continue;
        }
        graph.add_pool(*pool);
    }

    tracing::info!(
        "graph built: {} tokens, {} edges from {} pools",
        graph.node_count(),
        graph.edge_count(),
        graph.pools.len()
    );

    graph
}

impl SwapGraph {
    fn get_or_create_node(&mut self, token: Address) -> NodeIndex {
        if let Some(&node) = self.token_to_node.get(&token) {
            node
        } else {
            let node = self.graph.add_node(token);
            self.token_to_node.insert(token, node);
            node
        }
    }

    /// Insert both directed edges for a usable pool.
    fn add_pool(&mut self, pool: Pool) {
        let node0 = self.get_or_create_node(pool.token0);
        let node1 = self.get_or_create_node(pool.token1);

        let reserve0 = u256_to_f64(pool.reserve0);
        let reserve1 = u256_to_f64(pool.reserve1);

        // token0 -> token1: spot price reserve1/reserve0, capacity is
        // the destination-side reserve.
        self.graph
            .add_edge(node0, node1, EdgeData::new(pool, reserve1 / reserve0, pool.reserve1));
        self.graph
            .add_edge(node1, node0, EdgeData::new(pool, reserve0 / reserve1, pool.reserve0));

        self.pools.insert(pool.address, pool);
    }

    pub fn get_node(&self, token: Address) -> Option<NodeIndex> {
        self.token_to_node.get(&token).copied()
    }

    pub fn get_token(&self, node: NodeIndex) -> Option<Address> {
        self.graph.node_weight(node).copied()
    }

    /// Look up a usable pool by address.
    pub fn pool(&self, address: Address) -> Option<&Pool> {
        self.pools.get(&address)
    }

    /// Outgoing edges of a node, sorted by weight ascending (best rate
    /// first), ties broken by pool address for deterministic traversal.
    pub fn edges_sorted(&self, node: NodeIndex) -> Vec<(NodeIndex, EdgeData)> {
        let mut edges: Vec<(NodeIndex, EdgeData)> = self
            .graph
            .edges(node)
            .map(|edge| (edge.target(), *edge.weight()))
            .collect();
        edges.sort_by(|a, b| {
            a.1.weight
                .partial_cmp(&b.1.weight)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.1.pool.address.cmp(&b.1.pool.address))
        });
        edges
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Protocol;
    use alloy::primitives::U256;

    fn addr(n: u8) -> Address {
        Address::repeat_byte(n)
    }

    fn pool(address: u8, token0: u8, token1: u8, reserve0: u64, reserve1: u64) -> Pool {
        Pool {
            address: addr(address),
            token0: addr(token0),
            token1: addr(token1),
            reserve0: U256::from(reserve0),
            reserve1: U256::from(reserve1),
            fee_bps: 30,
            protocol: Protocol::ConstantProduct,
        }
    }

    #[test]
    fn test_two_edges_per_pool() {
        let graph = build_graph(&[pool(0xaa, 1, 2, 1_000_000, 2_000_000)]);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.pool_count(), 1);
    }

    #[test]
    fn test_invalid_pool_skipped() {
        let mut bad = pool(0xbb, 1, 2, 0, 2_000_000);
        bad.reserve0 = U256::ZERO;
        let graph = build_graph(&[pool(0xaa, 1, 2, 1_000_000, 2_000_000), bad]);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.pool_count(), 1);
        assert!(graph.pool(addr(0xbb)).is_none());
    }

    #[test]
    fn test_parallel_pools_kept_separate() {
        let graph = build_graph(&[
            pool(0xaa, 1, 2, 1_000_000, 2_000_000),
            pool(0xbb, 1, 2, 5_000_000, 10_000_000),
        ]);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn test_edge_weight_and_capacity() {
        let graph = build_graph(&[pool(0xaa, 1, 2, 1_000_000, 2_000_000)]);
        let node = graph.get_node(addr(1)).unwrap();
        let edges = graph.edges_sorted(node);
        assert_eq!(edges.len(), 1);
        let (_, edge) = edges[0];
        // weight = -ln(2_000_000 / 1_000_000)
        assert!((edge.weight - (-(2.0f64).ln())).abs() < 1e-12);
        assert_eq!(edge.capacity, U256::from(2_000_000u64));
    }

    #[test]
    fn test_better_rate_ranks_first() {
        // Pool 0xbb quotes a better spot rate, so its edge sorts first.
        let graph = build_graph(&[
            pool(0xaa, 1, 2, 1_000_000, 1_000_000),
            pool(0xbb, 1, 2, 1_000_000, 3_000_000),
        ]);
        let node = graph.get_node(addr(1)).unwrap();
        let edges = graph.edges_sorted(node);
        assert_eq!(edges[0].1.pool.address, addr(0xbb));
    }
}
