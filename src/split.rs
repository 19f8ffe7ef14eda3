//! Volume splitting across candidate routes.
//!
//! Sending the whole trade down the single best route pays that route's
//! full price impact. Splitting volume across the top-K routes lowers
//! the aggregate impact. Allocation starts proportional to each route's
//! full-volume output and is then refined by a fixed-point iteration
//! that re-simulates every route on its own share and shifts weight
//! toward routes with the better realized execution rate, until the
//! allocation converges (equal rates across funded routes) or the
//! iteration cap is hit.

use alloy::primitives::{Address, U256};

use crate::config::{PathfinderConfig, SPLIT_MAX_ITERS, SPLIT_TOLERANCE};
use crate::error::PathfinderError;
use crate::graph::search::{find_best_paths, simulate_route};
use crate::graph::SwapGraph;
use crate::pool::u256_to_f64;
use crate::route::SplitRoute;

/// Fixed-point denominator for converting fractional weights into
/// integer shares of the total amount.
const SHARE_PRECISION: u64 = 1_000_000_000;

/// Distribute `total_amount` across the best routes from `from` to `to`.
///
/// Errors with `NoRouteFound` when the pair is disconnected within the
/// hop bound. The reported `total_amount_out` is always the sum of each
/// route's output simulated on its allocated share, never the full-volume
/// sum.
pub fn optimize_split(
    graph: &SwapGraph,
    config: &PathfinderConfig,
    from: Address,
    to: Address,
    total_amount: U256,
) -> Result<SplitRoute, PathfinderError> {
    let candidates = find_best_paths(graph, config, from, to, total_amount, config.top_k)?;
    if candidates.is_empty() {
        return Err(PathfinderError::NoRouteFound {
            from,
            to,
            max_hops: config.max_hops,
        });
    }
    if candidates.len() == 1 {
        let total_amount_out = candidates[0].amount_out;
        return Ok(SplitRoute {
            routes: candidates,
            distribution: vec![1.0],
            total_amount_in: total_amount,
            total_amount_out,
        });
    }

    // Seed proportional to full-volume output, a depth proxy.
    let full_outputs: Vec<f64> = candidates
        .iter()
        .map(|r| u256_to_f64(r.amount_out))
        .collect();
    let mut weights = normalized(&full_outputs);

    for iteration in 0..SPLIT_MAX_ITERS {
        let shares = allocate_shares(total_amount, &weights);

        // Realized execution rate per route at its current share.
        let mut scaled = Vec::with_capacity(weights.len());
        for ((route, share), weight) in candidates.iter().zip(&shares).zip(&weights) {
            if share.is_zero() {
                scaled.push(0.0);
                continue;
            }
            let sim = simulate_route(graph, &route.steps, *share, config.gas_per_swap_usd)?;
            let rate = u256_to_f64(sim.amount_out) / u256_to_f64(*share);
            scaled.push(weight * rate);
        }

        let next = normalized(&scaled);
        let delta = weights
            .iter()
            .zip(&next)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f64, f64::max);
        weights = next;

        if delta < SPLIT_TOLERANCE {
            tracing::debug!("split allocation converged after {} iteration(s)", iteration + 1);
            break;
        }
    }

    // Final allocation: drop routes whose share rounded to zero, then
    // re-simulate each funded route on its exact integer share.
    let shares = allocate_shares(total_amount, &weights);
    let mut routes = Vec::new();
    let mut distribution = Vec::new();
    let mut total_out = U256::ZERO;
    let total_f64 = u256_to_f64(total_amount);

    for (route, share) in candidates.iter().zip(&shares) {
        if share.is_zero() {
            continue;
        }
        let final_route = simulate_route(graph, &route.steps, *share, config.gas_per_swap_usd)?;
        total_out = total_out
            .checked_add(final_route.amount_out)
            .ok_or(PathfinderError::Overflow)?;
        distribution.push(u256_to_f64(*share) / total_f64);
        routes.push(final_route);
    }

    Ok(SplitRoute {
        routes,
        distribution,
        total_amount_in: total_amount,
        total_amount_out: total_out,
    })
}

/// Normalize a weight vector to sum to 1.0. All-zero input falls back
/// to a uniform distribution.
fn normalized(weights: &[f64]) -> Vec<f64> {
    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        return vec![1.0 / weights.len() as f64; weights.len()];
    }
    weights.iter().map(|w| w / sum).collect()
}

/// Convert fractional weights into integer shares that sum exactly to
/// `total`: every route but the last gets a truncated fixed-point share,
/// the last takes the remainder.
fn allocate_shares(total: U256, weights: &[f64]) -> Vec<U256> {
    let mut shares = Vec::with_capacity(weights.len());
    let mut allocated = U256::ZERO;
    let precision = U256::from(SHARE_PRECISION);

    for weight in &weights[..weights.len() - 1] {
        let numerator = U256::from((weight.clamp(0.0, 1.0) * SHARE_PRECISION as f64) as u64);
        // Split the multiply so total * numerator cannot overflow.
        let share = (total / precision) * numerator + (total % precision) * numerator / precision;
        allocated += share;
        shares.push(share);
    }
    shares.push(total - allocated);
    shares
}
