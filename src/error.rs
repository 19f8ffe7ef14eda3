//! Error taxonomy for the pathfinding engine.
//!
//! Construction-time pool validation failures are logged and the pool is
//! skipped (partial degradation); per-query errors are returned to the
//! caller synchronously and never retried here.

use alloy::primitives::Address;
use thiserror::Error;

use crate::pool::Protocol;

/// All errors the engine can surface to a caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathfinderError {
    /// Pool has an empty reserve, duplicate tokens, or an out-of-range fee.
    #[error("pool {0} is not usable (empty reserve, duplicate token, or fee out of range)")]
    InvalidPool(Address),

    /// Simulation was requested with a token the pool does not hold.
    #[error("token {token} does not belong to pool {pool}")]
    InvalidTokenForPool { pool: Address, token: Address },

    /// Input amount was zero, or source and destination tokens coincide.
    #[error("swap amount must be positive and tokens must differ")]
    InvalidAmount,

    /// Only constant-product pools can be simulated.
    #[error("protocol {0} is not supported by the constant-product simulator")]
    UnsupportedProtocol(Protocol),

    /// No path connects the pair within the configured hop bound.
    #[error("no route from {from} to {to} within {max_hops} hops")]
    NoRouteFound {
        from: Address,
        to: Address,
        max_hops: usize,
    },

    /// Arithmetic on reserves/amounts exceeded U256. Signalled explicitly
    /// so a wrapped value can never corrupt downstream trade amounts.
    #[error("arithmetic overflow while computing swap amounts")]
    Overflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offender() {
        let pool = Address::repeat_byte(0xaa);
        let token = Address::repeat_byte(9);

        let err = PathfinderError::InvalidTokenForPool { pool, token };
        let msg = err.to_string();
        assert!(msg.contains(&token.to_string()), "message was: {msg}");
        assert!(msg.contains(&pool.to_string()), "message was: {msg}");

        let err = PathfinderError::UnsupportedProtocol(Protocol::StableSwap);
        assert!(err.to_string().contains("stable-swap"));
    }

    #[test]
    fn test_errors_compare_by_value() {
        assert_eq!(PathfinderError::Overflow, PathfinderError::Overflow);
        assert_ne!(
            PathfinderError::InvalidAmount,
            PathfinderError::Overflow
        );
        assert_eq!(
            PathfinderError::InvalidPool(Address::repeat_byte(1)),
            PathfinderError::InvalidPool(Address::repeat_byte(1))
        );
    }
}
