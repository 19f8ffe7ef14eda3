//! Liquidity pool snapshot model.
//!
//! A `Pool` is an immutable point-in-time view of one on-chain pool's
//! reserves. Reserves never change for the lifetime of an engine instance;
//! a fresh snapshot requires a fresh engine.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::error::PathfinderError;

/// Fee denominator: fees are expressed in basis points of notional.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Protocol kind of a pool. Only constant-product pools are simulated;
/// the other variants are recognized so a provider snapshot can carry
/// them, but the simulator rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    ConstantProduct,
    ConcentratedLiquidity,
    StableSwap,
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Protocol::ConstantProduct => write!(f, "constant-product"),
            Protocol::ConcentratedLiquidity => write!(f, "concentrated-liquidity"),
            Protocol::StableSwap => write!(f, "stable-swap"),
        }
    }
}

/// Snapshot of one liquidity pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub address: Address,
    pub token0: Address,
    pub token1: Address,
    pub reserve0: U256,
    pub reserve1: U256,
    /// Swap fee in basis points (30 = 0.30%). Must be in [0, 10000).
    pub fee_bps: u32,
    pub protocol: Protocol,
}

impl Pool {
    /// A pool is usable when both reserves are non-zero, its tokens are
    /// distinct, and its fee is in range. Unusable pools are excluded
    /// from the graph.
    pub fn is_usable(&self) -> bool {
        !self.reserve0.is_zero()
            && !self.reserve1.is_zero()
            && self.token0 != self.token1
            && self.fee_bps < BPS_DENOMINATOR
    }

    /// Whether `token` is one of the pool's two tokens.
    pub fn contains(&self, token: Address) -> bool {
        token == self.token0 || token == self.token1
    }

    /// The counterpart of `token` in this pool.
    pub fn other_token(&self, token: Address) -> Result<Address, PathfinderError> {
        if token == self.token0 {
            Ok(self.token1)
        } else if token == self.token1 {
            Ok(self.token0)
        } else {
            Err(PathfinderError::InvalidTokenForPool {
                pool: self.address,
                token,
            })
        }
    }

    /// Reserves oriented for a swap selling `token_in`:
    /// `(reserve_in, reserve_out)`.
    pub fn reserves_for(&self, token_in: Address) -> Result<(U256, U256), PathfinderError> {
        if token_in == self.token0 {
            Ok((self.reserve0, self.reserve1))
        } else if token_in == self.token1 {
            Ok((self.reserve1, self.reserve0))
        } else {
            Err(PathfinderError::InvalidTokenForPool {
                pool: self.address,
                token: token_in,
            })
        }
    }

    /// Marginal exchange rate `reserve_out / reserve_in` at zero trade
    /// size. Used only for edge ranking, never for amounts.
    pub fn spot_price(&self, token_in: Address) -> Result<f64, PathfinderError> {
        let (reserve_in, reserve_out) = self.reserves_for(token_in)?;
        Ok(u256_to_f64(reserve_out) / u256_to_f64(reserve_in))
    }
}

/// Convert U256 to f64, handling values larger than u128::MAX.
/// Lossy for very large values; callers use the result only for
/// ranking and reporting, never for amount computation.
pub(crate) fn u256_to_f64(value: U256) -> f64 {
    if value <= U256::from(u128::MAX) {
        return value.to::<u128>() as f64;
    }

    // Split into high and low 128-bit halves to avoid overflow.
    let low = value & U256::from(u128::MAX);
    let high = value >> 128usize;
    high.to::<u128>() as f64 * 2f64.powi(128) + low.to::<u128>() as f64
}
