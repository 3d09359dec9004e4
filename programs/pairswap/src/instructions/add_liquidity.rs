use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount, Transfer};
use crate::{
    constants::*,
    error::PairSwapError,
    events::LiquidityAdded,
    state::{GlobalStats, Pool, Position, PositionKey},
};

// ─── Handler ──────────────────────────────────────────────────────────────
/// Deposit both tokens and mint LP tokens.
/// Empty pool: LP = a/2 + b/2. Funded pool: LP limited by the scarcer side.
/// Every call must mint at least MIN_LIQUIDITY.
pub fn handler(ctx: Context<AddLiquidity>, amount_a: u64, amount_b: u64) -> Result<u64> {
    // All checks happen here, before any transfer or write
    let plan = ctx
        .accounts
        .pool
        .plan_deposit(&ctx.accounts.global_stats, amount_a, amount_b)?;

    let pool_key = ctx.accounts.pool.key();
    let pool_id = ctx.accounts.pool.pool_id;
    let authority_bump = ctx.accounts.pool.authority_bump;
    let holder = ctx.accounts.holder.key();
    let slot = Clock::get()?.slot;

    // Transfer tokens from holder into vaults
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.holder_token_a.to_account_info(),
                to: ctx.accounts.token_a_vault.to_account_info(),
                authority: ctx.accounts.holder.to_account_info(),
            },
        ),
        amount_a,
    )?;
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.holder_token_b.to_account_info(),
                to: ctx.accounts.token_b_vault.to_account_info(),
                authority: ctx.accounts.holder.to_account_info(),
            },
        ),
        amount_b,
    )?;

    ctx.accounts.pool.apply_deposit(&plan);

    // Mint LP tokens to the holder (PDA-signed)
    let seeds: &[&[u8]] = &[POOL_AUTHORITY_SEED, pool_key.as_ref(), &[authority_bump]];
    let signer = &[seeds];
    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.lp_mint.to_account_info(),
                to: ctx.accounts.holder_lp.to_account_info(),
                authority: ctx.accounts.pool_authority.to_account_info(),
            },
            signer,
        ),
        plan.lp_minted,
    )?;

    let key = PositionKey {
        pool: pool_key,
        pool_id,
        holder,
        bump: ctx.bumps.position,
    };
    let held = ctx.accounts.position.upsert_deposit(key, &plan, slot)?.lp_tokens;

    msg!(
        "Liquidity added: pool={} a={} b={} lp={} held={}",
        pool_id, amount_a, amount_b, plan.lp_minted, held
    );
    emit!(LiquidityAdded {
        pool_id,
        holder,
        amount_a,
        amount_b,
        lp_minted: plan.lp_minted,
    });
    Ok(plan.lp_minted)
}

#[derive(Accounts)]
pub struct AddLiquidity<'info> {
    #[account(mut)]
    pub holder: Signer<'info>,

    #[account(
        seeds = [GLOBAL_STATS_SEED],
        bump = global_stats.bump,
    )]
    pub global_stats: Box<Account<'info, GlobalStats>>,

    #[account(mut)]
    pub pool: Box<Account<'info, Pool>>,

    /// CHECK: PDA vault and LP-mint authority
    #[account(
        seeds = [POOL_AUTHORITY_SEED, pool.key().as_ref()],
        bump = pool.authority_bump,
    )]
    pub pool_authority: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = holder,
        space = Position::LEN,
        seeds = [POSITION_SEED, pool.key().as_ref(), holder.key().as_ref()],
        bump,
    )]
    pub position: Box<Account<'info, Position>>,

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
        constraint = holder_token_a.mint == pool.token_a_mint @ PairSwapError::MintMismatch,
        constraint = holder_token_a.owner == holder.key(),
    )]
    pub holder_token_a: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = holder_token_b.mint == pool.token_b_mint @ PairSwapError::MintMismatch,
        constraint = holder_token_b.owner == holder.key(),
    )]
    pub holder_token_b: Box<Account<'info, TokenAccount>>,

    /// Holder's LP token account, created on first deposit
    #[account(
        init_if_needed,
        payer = holder,
        associated_token::mint = lp_mint,
        associated_token::authority = holder,
    )]
    pub holder_lp: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}
