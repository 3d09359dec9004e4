//! Low-level Anchor instruction builders.
//!
//! Each function constructs a [`solana_sdk::instruction::Instruction`] ready
//! for signing and submission. Account order mirrors the Anchor
//! `#[derive(Accounts)]` structs in the on-chain program exactly.
//!
//! Anchor instruction discriminators: `sha256("global:{name}")[..8]`.
//! Anchor account discriminators:    `sha256("account:{TypeName}")[..8]`.

use solana_sdk::{
    bpf_loader_upgradeable,
    instruction::{AccountMeta, Instruction},
    pubkey,
    pubkey::Pubkey,
    sysvar,
};

use crate::types::SwapDirection;

// ─── Well-known program IDs ───────────────────────────────────────────────────

pub const SPL_TOKEN_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
pub const ATA_PROGRAM_ID: Pubkey = pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");
pub const SYSTEM_PROGRAM_ID: Pubkey = pubkey!("11111111111111111111111111111111");

// ─── PDA seeds (mirrors programs/pairswap/src/constants.rs) ──────────────────

pub const GLOBAL_STATS_SEED:   &[u8] = b"global_stats";
pub const POOL_SEED:           &[u8] = b"pool";
pub const POSITION_SEED:       &[u8] = b"position";
pub const POOL_AUTHORITY_SEED: &[u8] = b"pool_authority";
pub const LP_MINT_SEED:        &[u8] = b"lp_mint";

// ─── PDA derivation helpers ───────────────────────────────────────────────────

pub fn derive_global_stats(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[GLOBAL_STATS_SEED], program_id)
}

/// Derive the pool PDA for a sequential pool id.
pub fn derive_pool(pool_id: u64, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POOL_SEED, &pool_id.to_le_bytes()], program_id)
}

/// Derive the pool-authority PDA that owns the vaults and mints LP tokens.
pub fn derive_pool_authority(pool: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POOL_AUTHORITY_SEED, pool.as_ref()], program_id)
}

pub fn derive_lp_mint(pool: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[LP_MINT_SEED, pool.as_ref()], program_id)
}

/// Derive the per-holder position PDA for a pool.
pub fn derive_position(pool: &Pubkey, holder: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[POSITION_SEED, pool.as_ref(), holder.as_ref()],
        program_id,
    )
}

/// Derive the Associated Token Account for a wallet + mint.
pub fn derive_ata(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[wallet.as_ref(), SPL_TOKEN_ID.as_ref(), mint.as_ref()],
        &ATA_PROGRAM_ID,
    )
    .0
}

// ─── Discriminators ───────────────────────────────────────────────────────────

pub(crate) fn anchor_disc(namespace: &str, name: &str) -> [u8; 8] {
    let h = solana_sdk::hash::hash(format!("{namespace}:{name}").as_bytes());
    let mut d = [0u8; 8];
    d.copy_from_slice(&h.to_bytes()[..8]);
    d
}

fn disc(name: &str) -> Vec<u8> {
    anchor_disc("global", name).to_vec()
}

// ─── initialize ───────────────────────────────────────────────────────────────

/// Build the one-time `initialize` instruction. `owner` must be the
/// program's upgrade authority and becomes the privileged key.
pub fn initialize_ix(program_id: &Pubkey, owner: &Pubkey) -> Instruction {
    let (global_stats, _) = derive_global_stats(program_id);
    let program_data = bpf_loader_upgradeable::get_program_data_address(program_id);
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*owner,       true),   // mut + signer
            AccountMeta::new(global_stats, false),  // mut PDA (init)
            AccountMeta::new_readonly(*program_id,  false),
            AccountMeta::new_readonly(program_data, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ],
        data: disc("initialize"),
    }
}

// ─── set_platform_status ──────────────────────────────────────────────────────

pub fn set_platform_status_ix(program_id: &Pubkey, owner: &Pubkey, active: bool) -> Instruction {
    let (global_stats, _) = derive_global_stats(program_id);
    let mut data = disc("set_platform_status");
    data.push(active as u8);
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*owner, true),
            AccountMeta::new(global_stats,    false),  // mut
        ],
        data,
    }
}

// ─── create_pool ──────────────────────────────────────────────────────────────

/// Build the `create_pool` instruction for `pool_id`, which must be the
/// current `GlobalStats.pool_counter + 1`.
///
/// `vault_a` and `vault_b` must be fresh keypairs; both sign the transaction.
#[allow(clippy::too_many_arguments)]
pub fn create_pool_ix(
    program_id:   &Pubkey,
    owner:        &Pubkey,
    pool_id:      u64,
    token_a_mint: &Pubkey,
    token_b_mint: &Pubkey,
    vault_a:      &Pubkey,
    vault_b:      &Pubkey,
    name:         &str,
) -> Instruction {
    let (global_stats, _)   = derive_global_stats(program_id);
    let (pool, _)           = derive_pool(pool_id, program_id);
    let (pool_authority, _) = derive_pool_authority(&pool, program_id);
    let (lp_mint, _)        = derive_lp_mint(&pool, program_id);

    let mut data = disc("create_pool");
    data.extend_from_slice(&(name.len() as u32).to_le_bytes());
    data.extend_from_slice(name.as_bytes());

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*owner,                  true),   // mut + signer
            AccountMeta::new(global_stats,            false),  // mut
            AccountMeta::new_readonly(*token_a_mint,  false),
            AccountMeta::new_readonly(*token_b_mint,  false),
            AccountMeta::new(pool,                    false),  // mut PDA (init)
            AccountMeta::new_readonly(pool_authority, false),
            AccountMeta::new(*vault_a,                true),   // mut + signer (init)
            AccountMeta::new(*vault_b,                true),   // mut + signer (init)
            AccountMeta::new(lp_mint,                 false),  // mut PDA (init)
            AccountMeta::new_readonly(SPL_TOKEN_ID,   false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ],
        data,
    }
}

// ─── Accounts shared by the pool-facing instructions ──────────────────────────

/// Addresses of a live pool, as read from its account.
#[derive(Debug, Clone, Copy)]
pub struct PoolKeys {
    pub pool:         Pubkey,
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub vault_a:      Pubkey,
    pub vault_b:      Pubkey,
    pub lp_mint:      Pubkey,
}

// ─── add_liquidity ────────────────────────────────────────────────────────────

/// Build `add_liquidity`. The holder's token accounts are their ATAs; the LP
/// ATA is created by the program on first deposit.
pub fn add_liquidity_ix(
    program_id: &Pubkey,
    holder:     &Pubkey,
    keys:       &PoolKeys,
    amount_a:   u64,
    amount_b:   u64,
) -> Instruction {
    let (global_stats, _)   = derive_global_stats(program_id);
    let (pool_authority, _) = derive_pool_authority(&keys.pool, program_id);
    let (position, _)       = derive_position(&keys.pool, holder, program_id);

    let mut data = disc("add_liquidity");
    data.extend_from_slice(&amount_a.to_le_bytes());
    data.extend_from_slice(&amount_b.to_le_bytes());

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*holder,                 true),   // mut + signer
            AccountMeta::new_readonly(global_stats,   false),
            AccountMeta::new(keys.pool,               false),  // mut
            AccountMeta::new_readonly(pool_authority, false),
            AccountMeta::new(position,                false),  // mut PDA (init_if_needed)
            AccountMeta::new(keys.vault_a,            false),
            AccountMeta::new(keys.vault_b,            false),
            AccountMeta::new(keys.lp_mint,            false),
            AccountMeta::new(derive_ata(holder, &keys.token_a_mint), false),
            AccountMeta::new(derive_ata(holder, &keys.token_b_mint), false),
            AccountMeta::new(derive_ata(holder, &keys.lp_mint),      false),  // init_if_needed
            AccountMeta::new_readonly(SPL_TOKEN_ID,      false),
            AccountMeta::new_readonly(ATA_PROGRAM_ID,    false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ],
        data,
    }
}

// ─── remove_liquidity ─────────────────────────────────────────────────────────

/// Build `remove_liquidity`.
///
/// `has_position = false` passes the program id in the optional position
/// slot; the program then rejects the call with `NotAuthorized`.
pub fn remove_liquidity_ix(
    program_id:   &Pubkey,
    holder:       &Pubkey,
    keys:         &PoolKeys,
    has_position: bool,
    lp_tokens:    u64,
) -> Instruction {
    let (global_stats, _)   = derive_global_stats(program_id);
    let (pool_authority, _) = derive_pool_authority(&keys.pool, program_id);
    let position = if has_position {
        AccountMeta::new(derive_position(&keys.pool, holder, program_id).0, false)
    } else {
        AccountMeta::new_readonly(*program_id, false)
    };

    let mut data = disc("remove_liquidity");
    data.extend_from_slice(&lp_tokens.to_le_bytes());

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*holder,        true),
            AccountMeta::new_readonly(global_stats,   false),
            AccountMeta::new(keys.pool,               false),  // mut
            AccountMeta::new_readonly(pool_authority, false),
            position,
            AccountMeta::new(keys.vault_a,            false),
            AccountMeta::new(keys.vault_b,            false),
            AccountMeta::new(keys.lp_mint,            false),  // mut (burn)
            AccountMeta::new(derive_ata(holder, &keys.lp_mint),      false),
            AccountMeta::new(derive_ata(holder, &keys.token_a_mint), false),
            AccountMeta::new(derive_ata(holder, &keys.token_b_mint), false),
            AccountMeta::new_readonly(SPL_TOKEN_ID, false),
        ],
        data,
    }
}

// ─── swap_a_for_b / swap_b_for_a ──────────────────────────────────────────────

/// Build a swap. Both directions take the same accounts; the direction picks
/// the instruction.
pub fn swap_ix(
    program_id:     &Pubkey,
    trader:         &Pubkey,
    keys:           &PoolKeys,
    direction:      SwapDirection,
    amount_in:      u64,
    min_amount_out: u64,
) -> Instruction {
    let (global_stats, _)   = derive_global_stats(program_id);
    let (pool_authority, _) = derive_pool_authority(&keys.pool, program_id);

    let mut data = disc(direction.instruction_name());
    data.extend_from_slice(&amount_in.to_le_bytes());
    data.extend_from_slice(&min_amount_out.to_le_bytes());

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*trader,        true),
            AccountMeta::new(global_stats,            false),  // mut (volume / fees)
            AccountMeta::new(keys.pool,               false),  // mut
            AccountMeta::new_readonly(pool_authority, false),
            AccountMeta::new(keys.vault_a,            false),
            AccountMeta::new(keys.vault_b,            false),
            AccountMeta::new(derive_ata(trader, &keys.token_a_mint), false),
            AccountMeta::new(derive_ata(trader, &keys.token_b_mint), false),
            AccountMeta::new_readonly(SPL_TOKEN_ID, false),
        ],
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> PoolKeys {
        PoolKeys {
            pool:         Pubkey::new_unique(),
            token_a_mint: Pubkey::new_unique(),
            token_b_mint: Pubkey::new_unique(),
            vault_a:      Pubkey::new_unique(),
            vault_b:      Pubkey::new_unique(),
            lp_mint:      Pubkey::new_unique(),
        }
    }

    #[test]
    fn pool_pdas_depend_on_id() {
        let program = Pubkey::new_unique();
        assert_ne!(derive_pool(1, &program).0, derive_pool(2, &program).0);
        assert_eq!(derive_pool(7, &program), derive_pool(7, &program));
    }

    #[test]
    fn create_pool_encodes_borsh_string() {
        let program = Pubkey::new_unique();
        let ix = create_pool_ix(
            &program,
            &Pubkey::new_unique(),
            1,
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            "A/B",
        );
        assert_eq!(&ix.data[..8], &anchor_disc("global", "create_pool"));
        assert_eq!(&ix.data[8..12], &3u32.to_le_bytes());
        assert_eq!(&ix.data[12..], b"A/B");
        assert_eq!(ix.accounts.len(), 12);
        assert_eq!(ix.accounts[4].pubkey, derive_pool(1, &program).0);
        // vaults sign
        assert!(ix.accounts[6].is_signer && ix.accounts[7].is_signer);
    }

    #[test]
    fn swap_direction_selects_instruction() {
        let program = Pubkey::new_unique();
        let trader = Pubkey::new_unique();
        let k = keys();
        let ab = swap_ix(&program, &trader, &k, SwapDirection::AToB, 10, 9);
        let ba = swap_ix(&program, &trader, &k, SwapDirection::BToA, 10, 9);
        assert_eq!(&ab.data[..8], &anchor_disc("global", "swap_a_for_b"));
        assert_eq!(&ba.data[..8], &anchor_disc("global", "swap_b_for_a"));
        assert_eq!(&ab.data[8..16], &10u64.to_le_bytes());
        assert_eq!(&ab.data[16..24], &9u64.to_le_bytes());
        assert_eq!(ab.accounts, ba.accounts);
    }

    #[test]
    fn missing_position_uses_program_id_placeholder() {
        let program = Pubkey::new_unique();
        let holder = Pubkey::new_unique();
        let k = keys();
        let with = remove_liquidity_ix(&program, &holder, &k, true, 5);
        let without = remove_liquidity_ix(&program, &holder, &k, false, 5);
        assert_eq!(with.accounts[4].pubkey, derive_position(&k.pool, &holder, &program).0);
        assert!(with.accounts[4].is_writable);
        assert_eq!(without.accounts[4].pubkey, program);
        assert!(!without.accounts[4].is_writable);
    }

    #[test]
    fn add_liquidity_targets_holder_atas() {
        let program = Pubkey::new_unique();
        let holder = Pubkey::new_unique();
        let k = keys();
        let ix = add_liquidity_ix(&program, &holder, &k, 1_000, 2_000);
        assert_eq!(ix.accounts[8].pubkey, derive_ata(&holder, &k.token_a_mint));
        assert_eq!(ix.accounts[10].pubkey, derive_ata(&holder, &k.lp_mint));
        assert_eq!(&ix.data[8..16], &1_000u64.to_le_bytes());
        assert_eq!(&ix.data[16..24], &2_000u64.to_le_bytes());
    }

    #[test]
    fn initialize_passes_program_data() {
        let program = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let ix = initialize_ix(&program, &owner);
        assert_eq!(ix.data, anchor_disc("global", "initialize").to_vec());
        assert_eq!(ix.accounts.len(), 5);
        assert!(ix.accounts[0].is_signer);
        assert_eq!(ix.accounts[2].pubkey, program);
        let (program_data, _) = Pubkey::find_program_address(
            &[program.as_ref()],
            &bpf_loader_upgradeable::id(),
        );
        assert_eq!(ix.accounts[3].pubkey, program_data);
    }

    #[test]
    fn platform_toggle_encodes_flag() {
        let program = Pubkey::new_unique();
        let ix = set_platform_status_ix(&program, &Pubkey::new_unique(), false);
        assert_eq!(ix.data.len(), 9);
        assert_eq!(ix.data[8], 0);
        assert_eq!(ix.accounts[1].pubkey, derive_global_stats(&program).0);
    }
}
