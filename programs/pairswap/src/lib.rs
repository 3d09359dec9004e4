//! PairSwap: two-token constant-product AMM with a fixed 0.30 % fee.
//!
//! 7 instructions:
//!   initialize           create the GlobalStats singleton; upgrade authority becomes owner
//!   set_platform_status  owner switch for every mutating instruction
//!   create_pool          owner-only; allocates the next sequential pool id
//!   add_liquidity        deposit both tokens, mint LP, merge into the position
//!   remove_liquidity     burn LP, withdraw the pro-rata share of both reserves
//!   swap_a_for_b         sell token A for token B
//!   swap_b_for_a         sell token B for token A

// ─── Security contact ─────────────────────────────────────────────────────────

use solana_security_txt::security_txt;

#[cfg(not(feature = "no-entrypoint"))]
security_txt! {
    name:             "PairSwap",
    project_url:      "https://github.com/pairswap/pairswap",
    contacts:         "email:security@pairswap.dev",
    policy:           "Please report security vulnerabilities by email. \
                       Do not open public issues for them.",
    source_code:      "https://github.com/pairswap/pairswap",
    preferred_languages: "en"
}

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod pricing;
pub mod state;

use anchor_lang::prelude::*;
pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("AUDi6gUZHxmwhgA2svrM2gJzrTj8Zyn2DAeL9fq4dTim");

#[program]
pub mod pairswap {
    use super::*;

    /// Create GlobalStats. Runs once, signed by the upgrade authority, which
    /// becomes the owner.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        initialize::handler(ctx)
    }

    /// Enable or disable every pool-facing instruction. Owner only.
    pub fn set_platform_status(ctx: Context<SetPlatformStatus>, active: bool) -> Result<()> {
        set_platform_status::handler(ctx, active)
    }

    /// Create an empty pool and return its id.
    pub fn create_pool(ctx: Context<CreatePool>, name: String) -> Result<u64> {
        create_pool::handler(ctx, name)
    }

    /// Deposit both tokens and return the LP tokens minted.
    pub fn add_liquidity(ctx: Context<AddLiquidity>, amount_a: u64, amount_b: u64) -> Result<u64> {
        add_liquidity::handler(ctx, amount_a, amount_b)
    }

    /// Burn LP tokens and return the amounts paid out.
    pub fn remove_liquidity(ctx: Context<RemoveLiquidity>, lp_tokens: u64) -> Result<Withdrawal> {
        remove_liquidity::handler(ctx, lp_tokens)
    }

    pub fn swap_a_for_b(ctx: Context<Swap>, amount_in: u64, min_amount_out: u64) -> Result<u64> {
        swap::handler(ctx, SwapDirection::AToB, amount_in, min_amount_out)
    }

    pub fn swap_b_for_a(ctx: Context<Swap>, amount_in: u64, min_amount_out: u64) -> Result<u64> {
        swap::handler(ctx, SwapDirection::BToA, amount_in, min_amount_out)
    }
}
