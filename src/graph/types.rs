//! Edge payload for the token graph.

use alloy::primitives::U256;

use crate::pool::Pool;

/// One directed traversal option through a pool.
///
/// `weight` is `-ln(spot_price)` and is used only to order and prune
/// candidate edges; final selection always re-ranks by exact simulated
/// output. `capacity` is the destination-side reserve, a liquidity-depth
/// signal for pruning starved edges.
#[derive(Debug, Clone, Copy)]
pub struct EdgeData {
    pub pool: Pool,
    pub weight: f64,
    pub capacity: U256,
}

impl EdgeData {
    /// Build edge data for the direction with the given spot price and
    /// destination-side reserve.
    pub fn new(pool: Pool, spot_price: f64, capacity: U256) -> Self {
        Self {
            pool,
            weight: -spot_price.ln(),
            capacity,
        }
    }
}
