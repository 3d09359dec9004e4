use anchor_lang::prelude::*;
use crate::{constants::*, events::PlatformStatusChanged, state::GlobalStats};

/// Owner-only switch. While off, every pool-mutating instruction fails
/// with NotAuthorized.
pub fn handler(ctx: Context<SetPlatformStatus>, active: bool) -> Result<()> {
    let stats = &mut ctx.accounts.global_stats;
    stats.ensure_owner(&ctx.accounts.owner.key())?;
    stats.platform_active = active;

    msg!("Platform status: active={}", active);
    emit!(PlatformStatusChanged {
        owner: stats.owner,
        active,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetPlatformStatus<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_STATS_SEED],
        bump = global_stats.bump,
    )]
    pub global_stats: Account<'info, GlobalStats>,
}
