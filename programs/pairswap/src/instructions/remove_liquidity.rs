use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, Token, TokenAccount, Transfer};
use crate::{
    constants::*,
    error::PairSwapError,
    events::LiquidityRemoved,
    state::{GlobalStats, Pool, Position, Withdrawal},
};

/// Burn LP tokens and return the pro-rata share of both reserves.
/// Amounts are priced against the supply before the burn.
pub fn handler(ctx: Context<RemoveLiquidity>, lp_tokens: u64) -> Result<Withdrawal> {
    let plan = ctx.accounts.pool.plan_withdrawal(
        &ctx.accounts.global_stats,
        ctx.accounts.position.as_ref().map(|p| &**p),
        lp_tokens,
    )?;

    let pool_key = ctx.accounts.pool.key();
    let pool_id = ctx.accounts.pool.pool_id;
    let authority_bump = ctx.accounts.pool.authority_bump;
    let holder = ctx.accounts.holder.key();
    let slot = Clock::get()?.slot;

    // ── Burn LP tokens from the holder ──────────────────────────────────────
    token::burn(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Burn {
                mint: ctx.accounts.lp_mint.to_account_info(),
                from: ctx.accounts.holder_lp.to_account_info(),
                authority: ctx.accounts.holder.to_account_info(),
            },
        ),
        lp_tokens,
    )?;

    ctx.accounts.pool.apply_withdrawal(&plan);
    let position = ctx
        .accounts
        .position
        .as_mut()
        .ok_or(PairSwapError::NotAuthorized)?;
    let remaining = position.record_withdrawal(&plan, slot)?.lp_tokens;

    // ── Pay out from the vaults (PDA-signed) ────────────────────────────────
    let seeds: &[&[u8]] = &[POOL_AUTHORITY_SEED, pool_key.as_ref(), &[authority_bump]];
    let signer = &[seeds];

    if plan.amount_a > 0 {
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.token_a_vault.to_account_info(),
                    to: ctx.accounts.holder_token_a.to_account_info(),
                    authority: ctx.accounts.pool_authority.to_account_info(),
                },
                signer,
            ),
            plan.amount_a,
        )?;
    }
    if plan.amount_b > 0 {
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.token_b_vault.to_account_info(),
                    to: ctx.accounts.holder_token_b.to_account_info(),
                    authority: ctx.accounts.pool_authority.to_account_info(),
                },
                signer,
            ),
            plan.amount_b,
        )?;
    }

    msg!(
        "Liquidity removed: pool={} lp={} a={} b={} held={}",
        pool_id, lp_tokens, plan.amount_a, plan.amount_b, remaining
    );
    emit!(LiquidityRemoved {
        pool_id,
        holder,
        lp_burned: lp_tokens,
        amount_a: plan.amount_a,
        amount_b: plan.amount_b,
    });
    Ok(Withdrawal {
        amount_a: plan.amount_a,
        amount_b: plan.amount_b,
    })
}

#[derive(Accounts)]
pub struct RemoveLiquidity<'info> {
    pub holder: Signer<'info>,

    #[account(
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

    /// Absent when the holder never deposited into this pool
    #[account(
        mut,
        seeds = [POSITION_SEED, pool.key().as_ref(), holder.key().as_ref()],
        bump = position.bump,
        constraint = position.holder == holder.key() @ PairSwapError::NotAuthorized,
    )]
    pub position: Option<Account<'info, Position>>,

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
        constraint = lp_mint.key() == pool.lp_mint @ PairSwapError::MintMismatch,
    )]
    pub lp_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        constraint = holder_lp.mint == pool.lp_mint @ PairSwapError::MintMismatch,
        constraint = holder_lp.owner == holder.key(),
    )]
    pub holder_lp: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = holder_token_a.mint == pool.token_a_mint @ PairSwapError::MintMismatch,
    )]
    pub holder_token_a: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = holder_token_b.mint == pool.token_b_mint @ PairSwapError::MintMismatch,
    )]
    pub holder_token_b: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}
