use anchor_lang::prelude::*;
use crate::{
    constants::*,
    error::PairSwapError,
    events::PlatformStatusChanged,
    program::Pairswap,
    state::GlobalStats,
};

/// Create the GlobalStats singleton. Only the program's upgrade authority
/// may call it; that key becomes the privileged owner and the platform
/// starts enabled.
pub fn handler(ctx: Context<Initialize>) -> Result<()> {
    ensure_upgrade_authority(
        ctx.accounts.program_data.upgrade_authority_address,
        &ctx.accounts.owner.key(),
    )?;

    let stats = &mut ctx.accounts.global_stats;
    stats.owner = ctx.accounts.owner.key();
    stats.pool_counter = 0;
    stats.total_volume = 0;
    stats.total_fees = 0;
    stats.platform_active = true;
    stats.bump = ctx.bumps.global_stats;

    msg!("Platform initialized: owner={}", stats.owner);
    emit!(PlatformStatusChanged {
        owner: stats.owner,
        active: true,
    });
    Ok(())
}

/// A frozen program (no upgrade authority) cannot be initialized.
pub fn ensure_upgrade_authority(upgrade_authority: Option<Pubkey>, caller: &Pubkey) -> Result<()> {
    require!(upgrade_authority == Some(*caller), PairSwapError::NotAuthorized);
    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init,
        payer = owner,
        space = GlobalStats::LEN,
        seeds = [GLOBAL_STATS_SEED],
        bump,
    )]
    pub global_stats: Account<'info, GlobalStats>,

    #[account(constraint = program.programdata_address()? == Some(program_data.key()))]
    pub program: Program<'info, Pairswap>,

    pub program_data: Account<'info, ProgramData>,

    pub system_program: Program<'info, System>,
}
