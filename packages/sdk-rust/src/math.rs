//! Fee constants and quote math.
//!
//! Mirrors the on-chain arithmetic exactly so off-chain estimates match
//! on-chain results: unsigned, widened to `u128`, every division truncates.

use crate::error::{Error, Result};
use crate::state::PoolState;
use crate::types::{LiquidityQuote, SwapDirection, SwapQuote, WithdrawalQuote};

// ─── Constants ────────────────────────────────────────────────────────────────

/// Swap fee: 0.30 % = 30 / 10_000, taken from the input.
pub const FEE_BPS: u128 = 30;
pub const BPS_DENOMINATOR: u128 = 10_000;
/// Fewest LP tokens a single deposit may mint.
pub const MIN_LIQUIDITY: u64 = 1_000;

// ─── Program formulas ─────────────────────────────────────────────────────────

pub fn swap_fee(amount_in: u64) -> u64 {
    (amount_in as u128 * FEE_BPS / BPS_DENOMINATOR) as u64
}

/// `reserve_out × net / (reserve_in + net)` with `net = amount_in − fee`.
/// 0 when either reserve is empty.
pub fn quote_swap(amount_in: u64, reserve_in: u64, reserve_out: u64) -> u64 {
    if reserve_in == 0 || reserve_out == 0 {
        return 0;
    }
    let net = (amount_in - swap_fee(amount_in)) as u128;
    (net * reserve_out as u128 / (reserve_in as u128 + net)) as u64
}

/// First deposit: `a/2 + b/2`.
pub fn initial_share(amount_a: u64, amount_b: u64) -> u64 {
    if amount_a == 0 || amount_b == 0 {
        return 0;
    }
    amount_a / 2 + amount_b / 2
}

/// Later deposits: `min(a × S / Ra, b × S / Rb)`.
pub fn proportional_share(
    amount_a:     u64,
    amount_b:     u64,
    reserve_a:    u64,
    reserve_b:    u64,
    total_supply: u64,
) -> Result<u64> {
    if reserve_a == 0 || reserve_b == 0 || total_supply == 0 {
        return Ok(0);
    }
    let lp_a = amount_a as u128 * total_supply as u128 / reserve_a as u128;
    let lp_b = amount_b as u128 * total_supply as u128 / reserve_b as u128;
    u64::try_from(lp_a.min(lp_b)).map_err(|_| Error::MathOverflow)
}

/// `lp × reserve / supply`.
pub fn redemption(lp_tokens: u64, reserve: u64, total_supply: u64) -> Result<u64> {
    if total_supply == 0 {
        return Ok(0);
    }
    let amount = lp_tokens as u128 * reserve as u128 / total_supply as u128;
    u64::try_from(amount).map_err(|_| Error::MathOverflow)
}

/// Lowest acceptable output for a quoted amount and a slippage tolerance.
/// `max_slippage_bps == 0` disables the guard.
pub fn min_amount_out(estimated_out: u64, max_slippage_bps: u16) -> u64 {
    if max_slippage_bps == 0 {
        return 0;
    }
    let bps = (max_slippage_bps as u128).min(BPS_DENOMINATOR);
    let cut = estimated_out as u128 * bps / BPS_DENOMINATOR;
    estimated_out - cut as u64
}

// ─── Quotes ───────────────────────────────────────────────────────────────────

/// Full breakdown of a hypothetical swap against pre-fetched pool state.
pub fn quote_swap_detailed(pool: &PoolState, direction: SwapDirection, amount_in: u64) -> SwapQuote {
    let (reserve_in, reserve_out) = match direction {
        SwapDirection::AToB => (pool.reserve_a, pool.reserve_b),
        SwapDirection::BToA => (pool.reserve_b, pool.reserve_a),
    };
    let fee = swap_fee(amount_in);
    let amount_out = quote_swap(amount_in, reserve_in, reserve_out);
    let net = (amount_in - fee) as f64;

    let effective_rate = if amount_in == 0 {
        0.0
    } else {
        amount_out as f64 / amount_in as f64
    };
    let price_impact_pct = if reserve_in as f64 + net > 0.0 {
        net / (reserve_in as f64 + net) * 100.0
    } else {
        0.0
    };

    SwapQuote {
        pool_id: pool.pool_id,
        direction,
        amount_in,
        fee,
        amount_out,
        reserve_in,
        reserve_out,
        effective_rate,
        price_impact_pct,
    }
}

/// LP tokens a deposit would mint right now.
pub fn quote_deposit(pool: &PoolState, amount_a: u64, amount_b: u64) -> Result<LiquidityQuote> {
    let lp_minted = if pool.total_lp_supply == 0 {
        initial_share(amount_a, amount_b)
    } else {
        proportional_share(
            amount_a,
            amount_b,
            pool.reserve_a,
            pool.reserve_b,
            pool.total_lp_supply,
        )?
    };
    let supply_after = pool.total_lp_supply as f64 + lp_minted as f64;
    let share_of_pool_pct = if supply_after > 0.0 {
        lp_minted as f64 / supply_after * 100.0
    } else {
        0.0
    };
    Ok(LiquidityQuote {
        pool_id: pool.pool_id,
        amount_a,
        amount_b,
        lp_minted,
        meets_minimum: amount_a > 0 && amount_b > 0 && lp_minted >= MIN_LIQUIDITY,
        share_of_pool_pct,
    })
}

/// Token amounts burning `lp_tokens` would return right now.
pub fn quote_withdrawal(pool: &PoolState, lp_tokens: u64) -> Result<WithdrawalQuote> {
    if lp_tokens > pool.total_lp_supply {
        return Err(Error::InvalidArgument(format!(
            "lp_tokens {lp_tokens} exceeds pool supply {}",
            pool.total_lp_supply
        )));
    }
    Ok(WithdrawalQuote {
        pool_id: pool.pool_id,
        lp_tokens,
        amount_a: redemption(lp_tokens, pool.reserve_a, pool.total_lp_supply)?,
        amount_b: redemption(lp_tokens, pool.reserve_b, pool.total_lp_supply)?,
    })
}

/// Spot price `reserve_b / reserve_a` in raw units.
pub fn spot_price(pool: &PoolState) -> f64 {
    if pool.reserve_a == 0 {
        0.0
    } else {
        pool.reserve_b as f64 / pool.reserve_a as f64
    }
}
