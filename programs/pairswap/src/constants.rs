/// PDA seeds
pub const GLOBAL_STATS_SEED: &[u8] = b"global_stats";
pub const POOL_SEED: &[u8] = b"pool";
pub const POSITION_SEED: &[u8] = b"position";
pub const POOL_AUTHORITY_SEED: &[u8] = b"pool_authority";
pub const LP_MINT_SEED: &[u8] = b"lp_mint";

/// Swap fee: 0.30 %, retained in the input reserve
pub const FEE_BPS: u128 = 30;

/// Denominator for basis-point math (u128 to avoid up-cast noise)
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Smallest LP mint accepted by a single add_liquidity call
pub const MIN_LIQUIDITY: u64 = 1_000;

/// Pool names are metadata only; bounded so the account size is fixed
pub const MAX_POOL_NAME_LEN: usize = 32;

/// Decimals of every pool's LP mint
pub const LP_DECIMALS: u8 = 6;
