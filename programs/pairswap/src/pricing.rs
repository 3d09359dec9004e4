//! Swap output and LP share math.
//!
//! Everything here is pure: inputs are `u64` token amounts widened to `u128`
//! for the intermediate products, and every division truncates. Nothing
//! rounds up.

use anchor_lang::prelude::*;
use crate::{constants::*, error::PairSwapError};

/// Fee portion of a swap input: `floor(amount_in * 30 / 10_000)`.
pub fn swap_fee(amount_in: u64) -> u64 {
    // < amount_in, always fits
    (amount_in as u128 * FEE_BPS / BPS_DENOMINATOR) as u64
}

/// Constant-product output for `amount_in`, with the fee removed from the
/// input before pricing: `dy = y * dx_net / (x + dx_net)`.
///
/// Returns 0 when either reserve is empty. The caller credits the *full*
/// `amount_in` to the input reserve, so the fee stays in the pool.
pub fn quote_swap(amount_in: u64, reserve_in: u64, reserve_out: u64) -> u64 {
    if reserve_in == 0 || reserve_out == 0 {
        return 0;
    }
    let fee_adjusted = (amount_in - swap_fee(amount_in)) as u128;
    // u64 * u64 never overflows u128; the quotient is ≤ reserve_out
    let numerator = fee_adjusted * reserve_out as u128;
    let denominator = reserve_in as u128 + fee_adjusted;
    (numerator / denominator) as u64
}

/// LP tokens for the first deposit into an empty pool:
/// `floor(a / 2) + floor(b / 2)`.
///
/// An arithmetic mean, not `sqrt(a * b)`. Existing pools were seeded with
/// this formula, so it must not change.
pub fn initial_share(amount_a: u64, amount_b: u64) -> u64 {
    if amount_a == 0 || amount_b == 0 {
        return 0;
    }
    amount_a / 2 + amount_b / 2
}

/// LP tokens for a deposit into a funded pool, limited by the scarcer side:
/// `min(a * S / Ra, b * S / Rb)`. The surplus of the other token is left in
/// the pool without extra shares.
pub fn proportional_share(
    amount_a: u64,
    amount_b: u64,
    reserve_a: u64,
    reserve_b: u64,
    total_supply: u64,
) -> Result<u64> {
    if reserve_a == 0 || reserve_b == 0 || total_supply == 0 {
        return Ok(0);
    }
    let lp_a = amount_a as u128 * total_supply as u128 / reserve_a as u128;
    let lp_b = amount_b as u128 * total_supply as u128 / reserve_b as u128;
    let minted = u64::try_from(lp_a.min(lp_b)).map_err(|_| PairSwapError::MathOverflow)?;
    Ok(minted)
}

/// Reserve amount returned for burning `lp_tokens`: `lp * R / S`.
pub fn redemption(lp_tokens: u64, reserve: u64, total_supply: u64) -> Result<u64> {
    if total_supply == 0 {
        return Ok(0);
    }
    let amount = lp_tokens as u128 * reserve as u128 / total_supply as u128;
    let amount = u64::try_from(amount).map_err(|_| PairSwapError::MathOverflow)?;
    Ok(amount)
}
