pub mod builder;
pub mod search;
pub mod types;

pub use builder::{build_graph, SwapGraph};
pub use search::find_best_paths;
pub use types::EdgeData;
