//! Pathfinder Engine Configuration

use alloy::primitives::U256;

/// Default hop bound for path enumeration (2 = one intermediate token).
pub const DEFAULT_MAX_HOPS: usize = 2;

/// Default number of candidate routes returned by a query.
pub const DEFAULT_TOP_K: usize = 3;

/// Default flat gas estimate per swap hop, in USD.
pub const DEFAULT_GAS_PER_SWAP_USD: f64 = 5.0;

/// Convergence tolerance for the split allocation fixed point.
pub const SPLIT_TOLERANCE: f64 = 1e-6;

/// Iteration cap for the split allocation fixed point. The rate
/// equalization is a slow multiplicative update near its equilibrium,
/// and one iteration is only K route simulations, so the cap is generous.
pub const SPLIT_MAX_ITERS: usize = 1_000;

/// Tunable parameters for one engine instance.
#[derive(Debug, Clone)]
pub struct PathfinderConfig {
    /// Maximum number of hops (pools) in a single route.
    pub max_hops: usize,
    /// Maximum number of routes returned per query.
    pub top_k: usize,
    /// Edges whose destination-side reserve is below this are pruned
    /// before simulation. Zero disables the filter.
    pub min_edge_capacity: U256,
    /// Flat per-hop gas estimate in USD, used for route ranking
    /// tie-breaks and reporting.
    pub gas_per_swap_usd: f64,
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        Self {
            max_hops: DEFAULT_MAX_HOPS,
            top_k: DEFAULT_TOP_K,
            min_edge_capacity: U256::ZERO,
            gas_per_swap_usd: DEFAULT_GAS_PER_SWAP_USD,
        }
    }
}
