//! On-chain account deserialization.
//!
//! Parses raw account bytes for `GlobalStats` (82 bytes), `Pool` (247 bytes)
//! and `Position` (129 bytes). Byte offsets mirror the Anchor `#[account]`
//! layout exactly.

use solana_sdk::pubkey::Pubkey;
use crate::error::{Error, Result};

pub const GLOBAL_STATS_LEN: usize = 82;
pub const POOL_LEN: usize = 247;
pub const POSITION_LEN: usize = 129;

/// Offset of `Position.holder`, used as a `getProgramAccounts` filter.
pub const POSITION_HOLDER_OFFSET: usize = 48;

// ─── GlobalStats ──────────────────────────────────────────────────────────────

/// Layout (after 8-byte Anchor discriminator):
/// ```text
/// owner(32)  pool_counter(8)  total_volume(16)  total_fees(16)
/// platform_active(1)  bump(1)  = 82 bytes
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalStatsState {
    pub owner:           Pubkey,
    pub pool_counter:    u64,
    pub total_volume:    u128,
    pub total_fees:      u128,
    pub platform_active: bool,
}

impl GlobalStatsState {
    pub fn next_pool_id(&self) -> u64 {
        self.pool_counter.saturating_add(1)
    }
}

pub fn parse_global_stats(data: &[u8]) -> Result<GlobalStatsState> {
    ensure_len("GlobalStats", data, GLOBAL_STATS_LEN)?;
    Ok(GlobalStatsState {
        owner:           read_pubkey(data, 8)?,
        pool_counter:    read_u64(data, 40)?,
        total_volume:    read_u128(data, 48)?,
        total_fees:      read_u128(data, 64)?,
        platform_active: read_bool(data, 80)?,
    })
}

// ─── Pool ─────────────────────────────────────────────────────────────────────

/// Deserialized `Pool` account state.
///
/// Layout (after 8-byte Anchor discriminator):
/// ```text
/// pool_id(8)  token_a_mint(32)  token_b_mint(32)  token_a_vault(32)
/// token_b_vault(32)  lp_mint(32)  authority_bump(1)  bump(1)
/// reserve_a(8)  reserve_b(8)  total_lp_supply(8)  active(1)  created_at(8)
/// name(4 + ≤32)  = 247 bytes allocated
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolState {
    pub pool_id:         u64,
    pub token_a_mint:    Pubkey,
    pub token_b_mint:    Pubkey,
    pub token_a_vault:   Pubkey,
    pub token_b_vault:   Pubkey,
    pub lp_mint:         Pubkey,
    pub reserve_a:       u64,
    pub reserve_b:       u64,
    pub total_lp_supply: u64,
    pub active:          bool,
    /// Slot the pool was created in.
    pub created_at:      u64,
    pub name:            String,
}

/// Deserialize a `Pool` account from raw bytes.
pub fn parse_pool(data: &[u8]) -> Result<PoolState> {
    const NAME_OFFSET: usize = 211;
    ensure_len("Pool", data, NAME_OFFSET + 4)?;

    let name_len = read_u32(data, NAME_OFFSET)? as usize;
    let name_bytes = data
        .get(NAME_OFFSET + 4..NAME_OFFSET + 4 + name_len)
        .ok_or_else(|| Error::ParseError {
            offset: NAME_OFFSET,
            reason: format!("pool name length {name_len} runs past the account"),
        })?;
    let name = String::from_utf8(name_bytes.to_vec()).map_err(|e| Error::ParseError {
        offset: NAME_OFFSET + 4,
        reason: format!("pool name is not UTF-8: {e}"),
    })?;

    Ok(PoolState {
        pool_id:         read_u64(data, 8)?,
        token_a_mint:    read_pubkey(data, 16)?,
        token_b_mint:    read_pubkey(data, 48)?,
        token_a_vault:   read_pubkey(data, 80)?,
        token_b_vault:   read_pubkey(data, 112)?,
        lp_mint:         read_pubkey(data, 144)?,
        reserve_a:       read_u64(data, 178)?,
        reserve_b:       read_u64(data, 186)?,
        total_lp_supply: read_u64(data, 194)?,
        active:          read_bool(data, 202)?,
        created_at:      read_u64(data, 203)?,
        name,
    })
}

// ─── Position ─────────────────────────────────────────────────────────────────

/// Deserialized `Position` account state.
///
/// Layout (after 8-byte Anchor discriminator):
/// ```text
/// pool(32)  pool_id(8)  holder(32)  lp_tokens(8)
/// token_a_deposited(16)  token_b_deposited(16)  last_activity(8)  bump(1)
/// = 129 bytes
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionState {
    pub pool:              Pubkey,
    pub pool_id:           u64,
    pub holder:            Pubkey,
    pub lp_tokens:         u64,
    /// Running totals; withdrawals do not reduce them.
    pub token_a_deposited: u128,
    pub token_b_deposited: u128,
    /// Slot of the last deposit or withdrawal.
    pub last_activity:     u64,
}

/// Deserialize a `Position` account from raw bytes.
pub fn parse_position(data: &[u8]) -> Result<PositionState> {
    ensure_len("Position", data, POSITION_LEN)?;
    Ok(PositionState {
        pool:              read_pubkey(data, 8)?,
        pool_id:           read_u64(data, 40)?,
        holder:            read_pubkey(data, POSITION_HOLDER_OFFSET)?,
        lp_tokens:         read_u64(data, 80)?,
        token_a_deposited: read_u128(data, 88)?,
        token_b_deposited: read_u128(data, 104)?,
        last_activity:     read_u64(data, 120)?,
    })
}

// ─── Instruction return data ──────────────────────────────────────────────────

/// Amounts paid out by `remove_liquidity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawalState {
    pub amount_a: u64,
    pub amount_b: u64,
}

/// Decode a `u64` returned by `add_liquidity` or a swap.
pub fn parse_return_u64(data: &[u8]) -> Result<u64> {
    Ok(u64::from_le_bytes(untrimmed::<8>(data)?))
}

/// Decode the `Withdrawal` returned by `remove_liquidity`.
pub fn parse_withdrawal(data: &[u8]) -> Result<WithdrawalState> {
    let bytes = untrimmed::<16>(data)?;
    Ok(WithdrawalState {
        amount_a: read_u64(&bytes, 0)?,
        amount_b: read_u64(&bytes, 8)?,
    })
}

/// The runtime drops trailing zero bytes from return data; pad them back.
fn untrimmed<const N: usize>(data: &[u8]) -> Result<[u8; N]> {
    if data.len() > N {
        return Err(Error::ParseError {
            offset: N,
            reason: format!("return data is {} bytes; expected at most {N}", data.len()),
        });
    }
    let mut out = [0u8; N];
    out[..data.len()].copy_from_slice(data);
    Ok(out)
}

// ─── Byte-slice primitives ────────────────────────────────────────────────────

fn ensure_len(kind: &str, data: &[u8], expected: usize) -> Result<()> {
    if data.len() < expected {
        return Err(Error::ParseError {
            offset: 0,
            reason: format!("{kind} account is {} bytes; expected {expected}", data.len()),
        });
    }
    Ok(())
}

fn field<const N: usize>(data: &[u8], offset: usize, what: &str) -> Result<[u8; N]> {
    data.get(offset..offset + N)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| Error::ParseError {
            offset,
            reason: format!("slice too short for {what}"),
        })
}

pub(crate) fn read_pubkey(data: &[u8], offset: usize) -> Result<Pubkey> {
    Ok(Pubkey::from(field::<32>(data, offset, "Pubkey (32 bytes)")?))
}

pub(crate) fn read_bool(data: &[u8], offset: usize) -> Result<bool> {
    Ok(field::<1>(data, offset, "bool")?[0] != 0)
}

pub(crate) fn read_u32(data: &[u8], offset: usize) -> Result<u32> {
    Ok(u32::from_le_bytes(field(data, offset, "u32")?))
}

pub(crate) fn read_u64(data: &[u8], offset: usize) -> Result<u64> {
    Ok(u64::from_le_bytes(field(data, offset, "u64")?))
}

pub(crate) fn read_u128(data: &[u8], offset: usize) -> Result<u128> {
    Ok(u128::from_le_bytes(field(data, offset, "u128")?))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Borsh-style writer for hand-built account images.
    struct Image(Vec<u8>);

    impl Image {
        fn new() -> Self {
            Image(vec![0xAA; 8]) // discriminator, not inspected
        }
        fn key(mut self, k: &Pubkey) -> Self {
            self.0.extend_from_slice(k.as_ref());
            self
        }
        fn u8(mut self, v: u8) -> Self {
            self.0.push(v);
            self
        }
        fn u64(mut self, v: u64) -> Self {
            self.0.extend_from_slice(&v.to_le_bytes());
            self
        }
        fn u128(mut self, v: u128) -> Self {
            self.0.extend_from_slice(&v.to_le_bytes());
            self
        }
        fn string(mut self, s: &str) -> Self {
            self.0.extend_from_slice(&(s.len() as u32).to_le_bytes());
            self.0.extend_from_slice(s.as_bytes());
            self
        }
        fn pad_to(mut self, len: usize) -> Vec<u8> {
            self.0.resize(len, 0);
            self.0
        }
    }

    #[test]
    fn parses_global_stats() {
        let owner = Pubkey::new_unique();
        let data = Image::new()
            .key(&owner)
            .u64(7)
            .u128(1_000_500)
            .u128(3_001)
            .u8(1)
            .u8(254)
            .pad_to(GLOBAL_STATS_LEN);
        let stats = parse_global_stats(&data).unwrap();
        assert_eq!(stats.owner, owner);
        assert_eq!(stats.pool_counter, 7);
        assert_eq!(stats.next_pool_id(), 8);
        assert_eq!(stats.total_volume, 1_000_500);
        assert_eq!(stats.total_fees, 3_001);
        assert!(stats.platform_active);
    }

    #[test]
    fn parses_pool_with_name() {
        let keys: Vec<Pubkey> = (0..5).map(|_| Pubkey::new_unique()).collect();
        let data = Image::new()
            .u64(3)
            .key(&keys[0])
            .key(&keys[1])
            .key(&keys[2])
            .key(&keys[3])
            .key(&keys[4])
            .u8(253)
            .u8(252)
            .u64(1_000_000)
            .u64(2_000_000)
            .u64(1_500_000)
            .u8(1)
            .u64(99)
            .string("USDC/SOL")
            .pad_to(POOL_LEN);
        let pool = parse_pool(&data).unwrap();
        assert_eq!(pool.pool_id, 3);
        assert_eq!(pool.token_a_mint, keys[0]);
        assert_eq!(pool.token_b_mint, keys[1]);
        assert_eq!(pool.token_a_vault, keys[2]);
        assert_eq!(pool.token_b_vault, keys[3]);
        assert_eq!(pool.lp_mint, keys[4]);
        assert_eq!((pool.reserve_a, pool.reserve_b), (1_000_000, 2_000_000));
        assert_eq!(pool.total_lp_supply, 1_500_000);
        assert!(pool.active);
        assert_eq!(pool.created_at, 99);
        assert_eq!(pool.name, "USDC/SOL");
    }

    #[test]
    fn rejects_pool_name_past_end() {
        let mut data = Image::new().pad_to(POOL_LEN);
        data[211..215].copy_from_slice(&200u32.to_le_bytes());
        assert!(matches!(parse_pool(&data), Err(Error::ParseError { offset: 211, .. })));
    }

    #[test]
    fn parses_position() {
        let pool = Pubkey::new_unique();
        let holder = Pubkey::new_unique();
        let data = Image::new()
            .key(&pool)
            .u64(1)
            .key(&holder)
            .u64(1_500_000)
            .u128(1_000_000)
            .u128(2_000_000)
            .u64(42)
            .u8(255)
            .pad_to(POSITION_LEN);
        let pos = parse_position(&data).unwrap();
        assert_eq!(pos.pool, pool);
        assert_eq!(pos.pool_id, 1);
        assert_eq!(pos.holder, holder);
        assert_eq!(pos.lp_tokens, 1_500_000);
        assert_eq!(pos.token_a_deposited, 1_000_000);
        assert_eq!(pos.token_b_deposited, 2_000_000);
        assert_eq!(pos.last_activity, 42);
    }

    #[test]
    fn short_accounts_are_parse_errors() {
        assert!(parse_global_stats(&[0u8; 40]).is_err());
        assert!(parse_pool(&[0u8; 100]).is_err());
        assert!(parse_position(&[0u8; 128]).is_err());
    }

    #[test]
    fn parses_returned_amounts() {
        assert_eq!(parse_return_u64(&1_500_000u64.to_le_bytes()).unwrap(), 1_500_000);
        let data = Image(Vec::new()).u64(1_000_000).u64(2_000_000).0;
        assert_eq!(
            parse_withdrawal(&data).unwrap(),
            WithdrawalState { amount_a: 1_000_000, amount_b: 2_000_000 }
        );
    }

    #[test]
    fn restores_trimmed_trailing_zeros() {
        // 1_000 = e8 03 00 .. 00; only the first two bytes survive
        assert_eq!(parse_return_u64(&[0xe8, 0x03]).unwrap(), 1_000);
        assert_eq!(parse_return_u64(&[]).unwrap(), 0);
        let data = Image(Vec::new()).u64(7).0;
        assert_eq!(
            parse_withdrawal(&data[..1]).unwrap(),
            WithdrawalState { amount_a: 7, amount_b: 0 }
        );
        assert_eq!(parse_withdrawal(&[]).unwrap(), WithdrawalState { amount_a: 0, amount_b: 0 });
    }

    #[test]
    fn oversized_return_data_is_rejected() {
        assert!(matches!(parse_return_u64(&[1u8; 9]), Err(Error::ParseError { offset: 8, .. })));
        assert!(parse_withdrawal(&[1u8; 17]).is_err());
    }
}
