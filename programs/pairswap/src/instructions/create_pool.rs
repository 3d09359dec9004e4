use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::{
    constants::*,
    error::PairSwapError,
    events::PoolCreated,
    state::{GlobalStats, Pool},
};

/// Register a new empty pool under the next sequential id.
/// Owner only, and only while the platform is enabled. Names are labels:
/// two pools may share one.
pub fn handler(ctx: Context<CreatePool>, name: String) -> Result<u64> {
    ctx.accounts
        .global_stats
        .plan_pool(&ctx.accounts.owner.key(), &name)?;

    let pool_id = ctx.accounts.global_stats.register_pool()?;
    let created_at = Clock::get()?.slot;

    let pool = &mut ctx.accounts.pool;
    pool.pool_id = pool_id;
    pool.token_a_mint = ctx.accounts.token_a_mint.key();
    pool.token_b_mint = ctx.accounts.token_b_mint.key();
    pool.token_a_vault = ctx.accounts.token_a_vault.key();
    pool.token_b_vault = ctx.accounts.token_b_vault.key();
    pool.lp_mint = ctx.accounts.lp_mint.key();
    pool.authority_bump = ctx.bumps.pool_authority;
    pool.bump = ctx.bumps.pool;
    pool.reserve_a = 0;
    pool.reserve_b = 0;
    pool.total_lp_supply = 0;
    pool.active = true;
    pool.created_at = created_at;
    pool.name = name;

    msg!(
        "Pool created: id={} name={} {}/{}",
        pool_id,
        pool.name,
        pool.token_a_mint,
        pool.token_b_mint
    );
    emit!(PoolCreated {
        pool_id,
        pool: pool.key(),
        name: pool.name.clone(),
        token_a_mint: pool.token_a_mint,
        token_b_mint: pool.token_b_mint,
        created_at,
    });
    Ok(pool_id)
}

#[derive(Accounts)]
pub struct CreatePool<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_STATS_SEED],
        bump = global_stats.bump,
    )]
    pub global_stats: Box<Account<'info, GlobalStats>>,

    pub token_a_mint: Box<Account<'info, Mint>>,

    #[account(constraint = token_b_mint.key() != token_a_mint.key() @ PairSwapError::MintMismatch)]
    pub token_b_mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = owner,
        space = Pool::LEN,
        seeds = [POOL_SEED, global_stats.next_pool_id().to_le_bytes().as_ref()],
        bump,
    )]
    pub pool: Box<Account<'info, Pool>>,

    /// CHECK: PDA authority; owns both vaults and mints LP tokens, holds no data
    #[account(
        seeds = [POOL_AUTHORITY_SEED, pool.key().as_ref()],
        bump,
    )]
    pub pool_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = owner,
        token::mint = token_a_mint,
        token::authority = pool_authority,
    )]
    pub token_a_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        init,
        payer = owner,
        token::mint = token_b_mint,
        token::authority = pool_authority,
    )]
    pub token_b_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        init,
        payer = owner,
        seeds = [LP_MINT_SEED, pool.key().as_ref()],
        bump,
        mint::decimals = LP_DECIMALS,
        mint::authority = pool_authority,
    )]
    pub lp_mint: Box<Account<'info, Mint>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
