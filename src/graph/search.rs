//! Bounded-depth route enumeration.
//!
//! Candidate paths are enumerated loop-free up to a configured hop bound.
//! Edge weights only order the traversal; every emitted route is scored
//! by exact sequential simulation, each hop consuming the previous hop's
//! output.

use alloy::primitives::{Address, U256};
use petgraph::graph::NodeIndex;
use std::collections::HashSet;

use super::builder::SwapGraph;
use crate::config::PathfinderConfig;
use crate::error::PathfinderError;
use crate::route::{compound_price_impact, Route, SwapStep};
use crate::simulation::simulate_swap;

/// Find the best routes from `from` to `to` for `amount_in`, sorted
/// descending by simulated output and truncated to at most `k` entries.
///
/// A disconnected pair yields an empty vector; callers treat that as the
/// no-route condition, not as a zero-output swap.
pub fn find_best_paths(
    graph: &SwapGraph,
    config: &PathfinderConfig,
    from: Address,
    to: Address,
    amount_in: U256,
    k: usize,
) -> Result<Vec<Route>, PathfinderError> {
    if amount_in.is_zero() || from == to {
        return Err(PathfinderError::InvalidAmount);
    }
    let (Some(start), Some(_)) = (graph.get_node(from), graph.get_node(to)) else {
        return Ok(Vec::new());
    };

    let search = PathSearch {
        graph,
        to,
        max_hops: config.max_hops.max(1),
        min_capacity: config.min_edge_capacity,
        gas_per_swap_usd: config.gas_per_swap_usd,
    };

    let mut routes = Vec::new();
    search.dfs(
        start,
        amount_in,
        amount_in,
        Vec::new(),
        Vec::new(),
        HashSet::from([start]),
        &mut routes,
    );

    routes.sort_by(|a, b| {
        b.amount_out
            .cmp(&a.amount_out)
            .then_with(|| a.hop_count().cmp(&b.hop_count()))
            .then_with(|| {
                a.price_impact_pct
                    .partial_cmp(&b.price_impact_pct)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });
    routes.truncate(k);

    tracing::debug!(
        "found {} route(s) {} -> {} within {} hops",
        routes.len(),
        from,
        to,
        search.max_hops
    );

    Ok(routes)
}

/// Re-simulate a known path with a different input amount.
///
/// Used by the split optimizer: the step sequence fixes which pools are
/// traversed, while amounts and impacts are recomputed from scratch.
pub(crate) fn simulate_route(
    graph: &SwapGraph,
    steps: &[SwapStep],
    amount_in: U256,
    gas_per_swap_usd: f64,
) -> Result<Route, PathfinderError> {
    let mut current = amount_in;
    let mut out_steps = Vec::with_capacity(steps.len());
    let mut impacts = Vec::with_capacity(steps.len());

    for step in steps {
        let pool = graph
            .pool(step.pool)
            .ok_or(PathfinderError::InvalidPool(step.pool))?;
        let result = simulate_swap(pool, step.token_in, current)?;
        out_steps.push(SwapStep {
            pool: pool.address,
            token_in: step.token_in,
            token_out: result.token_out,
            amount_in: current,
            amount_out: result.amount_out,
            min_amount_out: U256::ZERO,
        });
        impacts.push(result.price_impact_pct);
        current = result.amount_out;
    }

    Ok(Route {
        amount_in,
        amount_out: current,
        price_impact_pct: compound_price_impact(&impacts),
        gas_cost_usd: steps.len() as f64 * gas_per_swap_usd,
        steps: out_steps,
    })
}

struct PathSearch<'a> {
    graph: &'a SwapGraph,
    to: Address,
    max_hops: usize,
    min_capacity: U256,
    gas_per_swap_usd: f64,
}

impl PathSearch<'_> {
    #[allow(clippy::too_many_arguments)]
    fn dfs(
        &self,
        current_node: NodeIndex,
        original_amount: U256,
        current_amount: U256,
        steps: Vec<SwapStep>,
        impacts: Vec<f64>,
        visited: HashSet<NodeIndex>,
        routes: &mut Vec<Route>,
    ) {
        let depth = steps.len();
        if depth >= self.max_hops {
            return;
        }
        let token_in = match self.graph.get_token(current_node) {
            Some(t) => t,
            None => return,
        };

        for (target, edge) in self.graph.edges_sorted(current_node) {
            // Starved edges are pruned before simulation to bound the
            // search combinatorially.
            if !self.min_capacity.is_zero() && edge.capacity < self.min_capacity {
                continue;
            }

            let target_token = match self.graph.get_token(target) {
                Some(t) => t,
                None => continue,
            };

            if target_token == self.to {
                let result = match simulate_swap(&edge.pool, token_in, current_amount) {
                    Ok(r) => r,
                    Err(err) => {
                        tracing::trace!("skipping pool {} in search: {}", edge.pool.address, err);
                        continue;
                    }
                };
                if result.amount_out.is_zero() {
                    continue;
                }

                let mut final_steps = steps.clone();
                final_steps.push(SwapStep {
                    pool: edge.pool.address,
                    token_in,
                    token_out: result.token_out,
                    amount_in: current_amount,
                    amount_out: result.amount_out,
                    min_amount_out: U256::ZERO,
                });
                let mut final_impacts = impacts.clone();
                final_impacts.push(result.price_impact_pct);

                routes.push(Route {
                    amount_in: original_amount,
                    amount_out: result.amount_out,
                    price_impact_pct: compound_price_impact(&final_impacts),
                    gas_cost_usd: final_steps.len() as f64 * self.gas_per_swap_usd,
                    steps: final_steps,
                });
            } else if !visited.contains(&target) && depth + 1 < self.max_hops {
                // Intermediate hop: the next leg consumes this leg's
                // exact output, never the original amount.
                let result = match simulate_swap(&edge.pool, token_in, current_amount) {
                    Ok(r) => r,
                    Err(err) => {
                        tracing::trace!("skipping pool {} in search: {}", edge.pool.address, err);
                        continue;
                    }
                };
                if result.amount_out.is_zero() {
                    continue;
                }

                let mut next_steps = steps.clone();
                next_steps.push(SwapStep {
                    pool: edge.pool.address,
                    token_in,
                    token_out: result.token_out,
                    amount_in: current_amount,
                    amount_out: result.amount_out,
                    min_amount_out: U256::ZERO,
                });
                let mut next_impacts = impacts.clone();
                next_impacts.push(result.price_impact_pct);
                let mut next_visited = visited.clone();
                next_visited.insert(target);

                self.dfs(
                    target,
                    original_amount,
                    result.amount_out,
                    next_steps,
                    next_impacts,
                    next_visited,
                    routes,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::build_graph;
    use crate::pool::{Pool, Protocol};

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

    fn config() -> PathfinderConfig {
        PathfinderConfig::default()
    }

    #[test]
    fn test_direct_route() {
        let graph = build_graph(&[pool(0xaa, 1, 2, 1_000_000, 2_000_000)]);
        let routes =
            find_best_paths(&graph, &config(), addr(1), addr(2), U256::from(10_000u64), 3).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].hop_count(), 1);
        assert_eq!(routes[0].amount_out, U256::from(19_743u64));
        assert!(routes[0].is_continuous());
    }

    #[test]
    fn test_two_hop_only_when_no_direct_edge() {
        // A-B and B-C but no direct A-C: only 2-hop routes through B.
        let graph = build_graph(&[
            pool(0xaa, 1, 2, 1_000_000, 1_000_000),
            pool(0xbb, 2, 3, 1_000_000, 1_000_000),
        ]);
        let routes =
            find_best_paths(&graph, &config(), addr(1), addr(3), U256::from(10_000u64), 3).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].hop_count(), 2);
        assert_eq!(routes[0].source(), Some(addr(1)));
        assert_eq!(routes[0].destination(), Some(addr(3)));
    }

    #[test]
    fn test_second_hop_consumes_first_hop_output() {
        let graph = build_graph(&[
            pool(0xaa, 1, 2, 1_000_000, 1_000_000),
            pool(0xbb, 2, 3, 1_000_000, 1_000_000),
        ]);
        let routes =
            find_best_paths(&graph, &config(), addr(1), addr(3), U256::from(10_000u64), 3).unwrap();
        let route = &routes[0];
        assert_eq!(route.steps[1].amount_in, route.steps[0].amount_out);
        assert_eq!(route.amount_out, route.steps[1].amount_out);
        // Two hops of fees and impact: strictly less than one hop would give.
        assert!(route.amount_out < U256::from(10_000u64));
    }

    #[test]
    fn test_disconnected_pair_returns_empty() {
        let graph = build_graph(&[
            pool(0xaa, 1, 2, 1_000_000, 1_000_000),
            pool(0xbb, 3, 4, 1_000_000, 1_000_000),
        ]);
        let routes =
            find_best_paths(&graph, &config(), addr(1), addr(4), U256::from(10_000u64), 3).unwrap();
        assert!(routes.is_empty());
    }

    #[test]
    fn test_unknown_token_returns_empty() {
        let graph = build_graph(&[pool(0xaa, 1, 2, 1_000_000, 1_000_000)]);
        let routes =
            find_best_paths(&graph, &config(), addr(1), addr(9), U256::from(10_000u64), 3).unwrap();
        assert!(routes.is_empty());
    }

    #[test]
    fn test_zero_amount_rejected() {
        let graph = build_graph(&[pool(0xaa, 1, 2, 1_000_000, 1_000_000)]);
        let err = find_best_paths(&graph, &config(), addr(1), addr(2), U256::ZERO, 3).unwrap_err();
        assert_eq!(err, PathfinderError::InvalidAmount);
    }

    #[test]
    fn test_same_token_rejected() {
        let graph = build_graph(&[pool(0xaa, 1, 2, 1_000_000, 1_000_000)]);
        let err =
            find_best_paths(&graph, &config(), addr(1), addr(1), U256::from(100u64), 3).unwrap_err();
        assert_eq!(err, PathfinderError::InvalidAmount);
    }

    #[test]
    fn test_best_route_first_across_parallel_pools() {
        // Deeper pool absorbs the trade with less impact.
        let graph = build_graph(&[
            pool(0xaa, 1, 2, 1_000_000, 1_000_000),
            pool(0xbb, 1, 2, 10_000_000, 10_000_000),
        ]);
        let routes =
            find_best_paths(&graph, &config(), addr(1), addr(2), U256::from(100_000u64), 3).unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].steps[0].pool, addr(0xbb));
        assert!(routes[0].amount_out > routes[1].amount_out);
    }

    #[test]
    fn test_direct_route_preferred_over_detour() {
        // Direct edge and a 2-hop detour; the direct route must come
        // first when its output is at least as good.
        let graph = build_graph(&[
            pool(0xaa, 1, 2, 10_000_000, 10_000_000),
            pool(0xbb, 1, 3, 10_000_000, 10_000_000),
            pool(0xcc, 3, 2, 10_000_000, 10_000_000),
        ]);
        let routes =
            find_best_paths(&graph, &config(), addr(1), addr(2), U256::from(1_000u64), 3).unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].hop_count(), 1);
    }

    #[test]
    fn test_capacity_pruning() {
        let mut cfg = config();
        cfg.min_edge_capacity = U256::from(500_000u64);
        let graph = build_graph(&[
            pool(0xaa, 1, 2, 1_000_000, 100_000), // starved destination side
            pool(0xbb, 1, 2, 1_000_000, 1_000_000),
        ]);
        let routes =
            find_best_paths(&graph, &cfg, addr(1), addr(2), U256::from(10_000u64), 3).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].steps[0].pool, addr(0xbb));
    }

    #[test]
    fn test_deterministic_results() {
        let pools = [
            pool(0xaa, 1, 2, 1_000_000, 2_000_000),
            pool(0xbb, 1, 3, 3_000_000, 1_000_000),
            pool(0xcc, 3, 2, 2_000_000, 2_000_000),
            pool(0xdd, 1, 2, 5_000_000, 9_000_000),
        ];
        let graph = build_graph(&pools);
        let first =
            find_best_paths(&graph, &config(), addr(1), addr(2), U256::from(50_000u64), 3).unwrap();
        let second =
            find_best_paths(&graph, &config(), addr(1), addr(2), U256::from(50_000u64), 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_three_hop_with_raised_bound() {
        let mut cfg = config();
        cfg.max_hops = 3;
        let graph = build_graph(&[
            pool(0xaa, 1, 2, 1_000_000, 1_000_000),
            pool(0xbb, 2, 3, 1_000_000, 1_000_000),
            pool(0xcc, 3, 4, 1_000_000, 1_000_000),
        ]);
        let routes =
            find_best_paths(&graph, &cfg, addr(1), addr(4), U256::from(10_000u64), 3).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].hop_count(), 3);
        assert!(routes[0].is_continuous());
    }

    #[test]
    fn test_simulate_route_matches_search() {
        let graph = build_graph(&[
            pool(0xaa, 1, 2, 1_000_000, 1_000_000),
            pool(0xbb, 2, 3, 1_000_000, 1_000_000),
        ]);
        let cfg = config();
        let routes =
            find_best_paths(&graph, &cfg, addr(1), addr(3), U256::from(10_000u64), 3).unwrap();
        let resim = simulate_route(
            &graph,
            &routes[0].steps,
            U256::from(10_000u64),
            cfg.gas_per_swap_usd,
        )
        .unwrap();
        assert_eq!(resim, routes[0]);
    }
}
