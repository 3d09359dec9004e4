use anchor_lang::prelude::*;

#[event]
pub struct PlatformStatusChanged {
    pub owner: Pubkey,
    pub active: bool,
}

#[event]
pub struct PoolCreated {
    pub pool_id: u64,
    pub pool: Pubkey,
    pub name: String,
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub created_at: u64,
}

#[event]
pub struct LiquidityAdded {
    pub pool_id: u64,
    pub holder: Pubkey,
    pub amount_a: u64,
    pub amount_b: u64,
    pub lp_minted: u64,
}

#[event]
pub struct LiquidityRemoved {
    pub pool_id: u64,
    pub holder: Pubkey,
    pub lp_burned: u64,
    pub amount_a: u64,
    pub amount_b: u64,
}

#[event]
pub struct SwapExecuted {
    pub pool_id: u64,
    pub trader: Pubkey,
    pub a_to_b: bool,
    pub amount_in: u64,
    pub fee: u64,
    pub amount_out: u64,
}
