//! Hand-off types consumed by the execution layer.
//!
//! A `Route` is an ordered sequence of simulated hops; a `SplitRoute`
//! distributes one total input across several routes. Both are plain
//! data: the execution layer converts them into calldata and fills the
//! slippage floors before submission.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// One concrete, simulated hop through a single pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwapStep {
    pub pool: Address,
    pub token_in: Address,
    pub token_out: Address,
    pub amount_in: U256,
    pub amount_out: U256,
    /// Slippage floor. Left zero by the engine; populated by the
    /// execution layer before submission.
    pub min_amount_out: U256,
}

/// One complete path from a source token to a destination token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub steps: Vec<SwapStep>,
    pub amount_in: U256,
    pub amount_out: U256,
    /// Aggregate price impact across all hops, as a percentage.
    pub price_impact_pct: f64,
    /// Flat per-hop gas estimate, summed over the steps.
    pub gas_cost_usd: f64,
}

impl Route {
    pub fn source(&self) -> Option<Address> {
        self.steps.first().map(|s| s.token_in)
    }

    pub fn destination(&self) -> Option<Address> {
        self.steps.last().map(|s| s.token_out)
    }

    pub fn hop_count(&self) -> usize {
        self.steps.len()
    }

    /// Token continuity: each step's output token must feed the next
    /// step's input token, and amounts must chain the same way.
    pub fn is_continuous(&self) -> bool {
        self.steps.windows(2).all(|pair| {
            pair[0].token_out == pair[1].token_in && pair[0].amount_out == pair[1].amount_in
        })
    }
}

/// Compound per-hop price impacts into a route-level percentage.
///
/// Each hop consumes liquidity independently, so remaining value
/// multiplies: `100 * (1 - prod(1 - p_i / 100))`.
pub(crate) fn compound_price_impact(step_impacts: &[f64]) -> f64 {
    let remaining: f64 = step_impacts.iter().map(|p| 1.0 - p / 100.0).product();
    (1.0 - remaining) * 100.0
}

/// A single total input distributed across 1..K routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitRoute {
    pub routes: Vec<Route>,
    /// Fraction of the total sent down each route, same ordering as
    /// `routes`. Sums to 1.0 within 1e-6.
    pub distribution: Vec<f64>,
    pub total_amount_in: U256,
    pub total_amount_out: U256,
}

impl SplitRoute {
    /// Distribution must pair one fraction per route and sum to 1.0
    /// within tolerance.
    pub fn distribution_is_valid(&self) -> bool {
        if self.distribution.len() != self.routes.len() {
            return false;
        }
        let sum: f64 = self.distribution.iter().sum();
        (sum - 1.0).abs() <= 1e-6 && self.distribution.iter().all(|w| (0.0..=1.0).contains(w))
    }
}
