//! Parameter and result types for [`crate::PairSwapClient`].
//!
//! Result types serialize with `serde`; public keys are written as base-58
//! strings so the JSON matches what explorers and wallets display.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use solana_sdk::pubkey::Pubkey;

use crate::error::Error;

fn base58<S: Serializer>(key: &Pubkey, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.collect_str(key)
}

// ─── Direction ────────────────────────────────────────────────────────────────

/// Which side of the pool the caller sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapDirection {
    /// Sell token A, receive token B (`swap_a_for_b`).
    AToB,
    /// Sell token B, receive token A (`swap_b_for_a`).
    BToA,
}

impl SwapDirection {
    pub fn is_a_to_b(self) -> bool {
        self == SwapDirection::AToB
    }

    /// Anchor instruction name for this direction.
    pub fn instruction_name(self) -> &'static str {
        match self {
            SwapDirection::AToB => "swap_a_for_b",
            SwapDirection::BToA => "swap_b_for_a",
        }
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SwapDirection::AToB => "a-to-b",
            SwapDirection::BToA => "b-to-a",
        })
    }
}

impl FromStr for SwapDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "a-to-b" | "ab" | "a" => Ok(SwapDirection::AToB),
            "b-to-a" | "ba" | "b" => Ok(SwapDirection::BToA),
            other => Err(Error::InvalidArgument(format!(
                "unknown swap direction '{other}'; expected a-to-b or b-to-a"
            ))),
        }
    }
}

// ─── Reads ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct GlobalStatsInfo {
    #[serde(serialize_with = "base58")]
    pub address:         Pubkey,
    #[serde(serialize_with = "base58")]
    pub owner:           Pubkey,
    pub pool_counter:    u64,
    pub total_volume:    u128,
    pub total_fees:      u128,
    pub platform_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PoolInfo {
    pub pool_id:         u64,
    #[serde(serialize_with = "base58")]
    pub address:         Pubkey,
    pub name:            String,
    #[serde(serialize_with = "base58")]
    pub token_a_mint:    Pubkey,
    #[serde(serialize_with = "base58")]
    pub token_b_mint:    Pubkey,
    #[serde(serialize_with = "base58")]
    pub token_a_vault:   Pubkey,
    #[serde(serialize_with = "base58")]
    pub token_b_vault:   Pubkey,
    #[serde(serialize_with = "base58")]
    pub lp_mint:         Pubkey,
    pub reserve_a:       u64,
    pub reserve_b:       u64,
    pub total_lp_supply: u64,
    pub active:          bool,
    pub created_at:      u64,
    /// reserve_b / reserve_a in raw units; 0 for an empty pool.
    pub spot_price:      f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PositionInfo {
    #[serde(serialize_with = "base58")]
    pub address:           Pubkey,
    pub pool_id:           u64,
    #[serde(serialize_with = "base58")]
    pub pool:              Pubkey,
    #[serde(serialize_with = "base58")]
    pub holder:            Pubkey,
    pub lp_tokens:         u64,
    pub token_a_deposited: u128,
    pub token_b_deposited: u128,
    pub last_activity:     u64,
}

// ─── Quotes ───────────────────────────────────────────────────────────────────

/// Off-chain preview of a swap, computed with the program's own formulas.
#[derive(Debug, Clone, Serialize)]
pub struct SwapQuote {
    pub pool_id:          u64,
    pub direction:        SwapDirection,
    pub amount_in:        u64,
    /// 0.30 % of amount_in, truncated; stays in the pool
    pub fee:              u64,
    /// Zero means the swap would be rejected with InsufficientLiquidity
    pub amount_out:       u64,
    pub reserve_in:       u64,
    pub reserve_out:      u64,
    /// amount_out / amount_in in raw units
    pub effective_rate:   f64,
    /// Curve slippage excluding the fee: net_in / (reserve_in + net_in) × 100
    pub price_impact_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LiquidityQuote {
    pub pool_id:           u64,
    pub amount_a:          u64,
    pub amount_b:          u64,
    pub lp_minted:         u64,
    /// False when the deposit would be rejected by the 1000-token floor
    pub meets_minimum:     bool,
    /// Share of the pool's LP supply after the deposit
    pub share_of_pool_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WithdrawalQuote {
    pub pool_id:   u64,
    pub lp_tokens: u64,
    pub amount_a:  u64,
    pub amount_b:  u64,
}

// ─── Writes ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CreatePoolParams {
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub name:         String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePoolResult {
    pub signature:      String,
    pub pool_id:        u64,
    #[serde(serialize_with = "base58")]
    pub pool:           Pubkey,
    #[serde(serialize_with = "base58")]
    pub pool_authority: Pubkey,
    #[serde(serialize_with = "base58")]
    pub vault_a:        Pubkey,
    #[serde(serialize_with = "base58")]
    pub vault_b:        Pubkey,
    #[serde(serialize_with = "base58")]
    pub lp_mint:        Pubkey,
}

#[derive(Debug, Clone)]
pub struct AddLiquidityParams {
    pub pool_id:  u64,
    pub amount_a: u64,
    pub amount_b: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddLiquidityResult {
    pub signature: String,
    #[serde(serialize_with = "base58")]
    pub pool:      Pubkey,
    #[serde(serialize_with = "base58")]
    pub position:  Pubkey,
    pub amount_a:     u64,
    pub amount_b:     u64,
    /// Quoted before sending
    pub estimated_lp: u64,
    /// Minted on chain, read from the transaction's return data
    pub lp_minted:    u64,
}

#[derive(Debug, Clone)]
pub struct RemoveLiquidityParams {
    pub pool_id:   u64,
    pub lp_tokens: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemoveLiquidityResult {
    pub signature: String,
    #[serde(serialize_with = "base58")]
    pub pool:      Pubkey,
    pub lp_tokens: u64,
    /// Paid out on chain, read from the transaction's return data
    pub amount_a:  u64,
    pub amount_b:  u64,
}

#[derive(Debug, Clone)]
pub struct SwapParams {
    pub pool_id:          u64,
    pub direction:        SwapDirection,
    pub amount_in:        u64,
    /// Allowed shortfall below the quote, in bps. 0 disables the guard.
    pub max_slippage_bps: u16,
}

#[derive(Debug, Clone, Serialize)]
pub struct SwapResult {
    pub signature:      String,
    #[serde(serialize_with = "base58")]
    pub pool:           Pubkey,
    pub direction:      SwapDirection,
    pub amount_in:      u64,
    pub estimated_out:  u64,
    pub min_amount_out: u64,
    /// Received on chain, read from the transaction's return data
    pub amount_out:     u64,
}
