use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::{
    constants::*,
    error::PairSwapError,
    events::SwapExecuted,
    state::{GlobalStats, Pool, SwapDirection},
};

/// Swap `amount_in` of one side for the other.
///
/// The 0.30 % fee is taken off the input before pricing, but the full
/// `amount_in` lands in the reserve, so k only grows. `min_amount_out` is the
/// caller's slippage guard; 0 accepts any non-zero output.
pub fn handler(
    ctx: Context<Swap>,
    direction: SwapDirection,
    amount_in: u64,
    min_amount_out: u64,
) -> Result<u64> {
    let plan = ctx.accounts.pool.plan_swap(
        &ctx.accounts.global_stats,
        direction,
        amount_in,
        min_amount_out,
    )?;

    let pool_key = ctx.accounts.pool.key();
    let pool_id = ctx.accounts.pool.pool_id;
    let authority_bump = ctx.accounts.pool.authority_bump;

    // ── Select accounts by direction ────────────────────────────────────────
    let (trader_in, vault_in, vault_out, trader_out) = match direction {
        SwapDirection::AToB => (
            ctx.accounts.trader_token_a.to_account_info(),
            ctx.accounts.token_a_vault.to_account_info(),
            ctx.accounts.token_b_vault.to_account_info(),
            ctx.accounts.trader_token_b.to_account_info(),
        ),
        SwapDirection::BToA => (
            ctx.accounts.trader_token_b.to_account_info(),
            ctx.accounts.token_b_vault.to_account_info(),
            ctx.accounts.token_a_vault.to_account_info(),
            ctx.accounts.trader_token_a.to_account_info(),
        ),
    };

    // Trader → vault_in
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: trader_in,
                to: vault_in,
                authority: ctx.accounts.trader.to_account_info(),
            },
        ),
        amount_in,
    )?;

    // vault_out → trader (PDA-signed)
    let seeds: &[&[u8]] = &[POOL_AUTHORITY_SEED, pool_key.as_ref(), &[authority_bump]];
    let signer = &[seeds];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: vault_out,
                to: trader_out,
                authority: ctx.accounts.pool_authority.to_account_info(),
            },
            signer,
        ),
        plan.amount_out,
    )?;

    ctx.accounts.pool.apply_swap(&plan);
    ctx.accounts.global_stats.record_swap(amount_in, plan.fee)?;

    msg!(
        "Swap: pool={} in={} fee={} out={} a_to_b={}",
        pool_id,
        amount_in,
        plan.fee,
        plan.amount_out,
        direction.is_a_to_b()
    );
    emit!(SwapExecuted {
        pool_id,
        trader: ctx.accounts.trader.key(),
        a_to_b: direction.is_a_to_b(),
        amount_in,
        fee: plan.fee,
        amount_out: plan.amount_out,
    });
    Ok(plan.amount_out)
}

#[derive(Accounts)]
pub struct Swap<'info> {
    pub trader: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_STATS_SEED],
        bump = global_stats.bump,
    )]
    pub global_stats: Box<Account<'info, GlobalStats>>,

    #[account(mut)]
    pub pool: Box<Account<'info, Pool>>,

    /// CHECK: PDA vault authority
    #[account(
        seeds = [POOL_AUTHORITY_SEED, pool.key().as_ref()],
        bump = pool.authority_bump,
    )]
    pub pool_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = token_a_vault.key() == pool.token_a_vault @ PairSwapError::MintMismatch,
    )]
    pub token_a_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = token_b_vault.key() == pool.token_b_vault @ PairSwapError::MintMismatch,
    )]
    pub token_b_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = trader_token_a.mint == pool.token_a_mint @ PairSwapError::MintMismatch,
    )]
    pub trader_token_a: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = trader_token_b.mint == pool.token_b_mint @ PairSwapError::MintMismatch,
    )]
    pub trader_token_b: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}
