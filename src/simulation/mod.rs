pub mod simulator;

pub use simulator::{simulate_swap, SwapResult};
