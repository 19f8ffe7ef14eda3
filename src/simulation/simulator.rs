//! Constant-product swap simulator.
//!
//! Pure functions over an immutable `Pool` snapshot. All amount math is
//! exact `U256` with checked operations; integer division truncates
//! toward zero, deterministically under-estimating output to match
//! on-chain EVM semantics.

use alloy::primitives::{Address, U256};

use crate::error::PathfinderError;
use crate::pool::{u256_to_f64, Pool, Protocol, BPS_DENOMINATOR};

/// Outcome of simulating one swap against a pool snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapResult {
    pub token_out: Address,
    pub amount_out: U256,
    /// Price impact as a percentage: `amount_in / (reserve_in + amount_in) * 100`.
    pub price_impact_pct: f64,
}

/// Simulate selling `amount_in` of `token_in` into `pool`.
///
/// Constant-product formula with the fee deducted from the input side:
///
/// ```text
/// amount_in_with_fee = amount_in * (10000 - fee_bps)
/// amount_out = amount_in_with_fee * reserve_out
///            / (reserve_in * 10000 + amount_in_with_fee)
/// ```
///
/// Output strictly approaches but never reaches `reserve_out`. The pool
/// snapshot is never mutated.
pub fn simulate_swap(
    pool: &Pool,
    token_in: Address,
    amount_in: U256,
) -> Result<SwapResult, PathfinderError> {
    if pool.protocol != Protocol::ConstantProduct {
        return Err(PathfinderError::UnsupportedProtocol(pool.protocol));
    }
    if !pool.is_usable() {
        return Err(PathfinderError::InvalidPool(pool.address));
    }
    if amount_in.is_zero() {
        return Err(PathfinderError::InvalidAmount);
    }

    let (reserve_in, reserve_out) = pool.reserves_for(token_in)?;
    let token_out = pool.other_token(token_in)?;

    let fee_factor = U256::from(BPS_DENOMINATOR - pool.fee_bps);
    let amount_in_with_fee = amount_in
        .checked_mul(fee_factor)
        .ok_or(PathfinderError::Overflow)?;
    let numerator = amount_in_with_fee
        .checked_mul(reserve_out)
        .ok_or(PathfinderError::Overflow)?;
    let denominator = reserve_in
        .checked_mul(U256::from(BPS_DENOMINATOR))
        .ok_or(PathfinderError::Overflow)?
        .checked_add(amount_in_with_fee)
        .ok_or(PathfinderError::Overflow)?;
    let amount_out = numerator / denominator;

    // Reported from the same reserves the output was computed against.
    let price_impact_pct =
        u256_to_f64(amount_in) / (u256_to_f64(reserve_in) + u256_to_f64(amount_in)) * 100.0;

    Ok(SwapResult {
        token_out,
        amount_out,
        price_impact_pct,
    })
}
