//! Pathfinder: route discovery and split optimization over on-chain
//! liquidity pools.
//!
//! The engine consumes an immutable snapshot of constant-product pool
//! reserves, builds a directed token graph once, and answers two kinds
//! of queries: the best bounded-hop routes between two tokens, and a
//! volume distribution across the top routes that reduces aggregate
//! price impact. It performs no I/O — fetching pool data and executing
//! the returned routes belong to the surrounding application.

pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod pool;
pub mod route;
pub mod simulation;
pub mod split;

pub use config::PathfinderConfig;
pub use engine::Pathfinder;
pub use error::PathfinderError;
pub use graph::{build_graph, find_best_paths, SwapGraph};
pub use pool::{Pool, Protocol};
pub use route::{Route, SplitRoute, SwapStep};
pub use simulation::{simulate_swap, SwapResult};
pub use split::optimize_split;
