//! SDK error type.

/// All errors returned by the PairSwap SDK.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ── RPC / network ────────────────────────────────────────────────────────
    /// A Solana JSON-RPC call failed.
    #[error("RPC error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    // ── Lookups ──────────────────────────────────────────────────────────────
    /// `initialize` has not been run against this program id.
    #[error("GlobalStats account not found; run `initialize` first")]
    NotInitialized,

    /// No pool account exists for this id.
    #[error("Pool {0} not found")]
    PoolNotFound(u64),

    /// The pool exists but holds no reserves.
    #[error("Pool {0} has no liquidity; seed it with add_liquidity first")]
    NoLiquidity(u64),

    // ── Quotes ───────────────────────────────────────────────────────────────
    /// The swap would pay out nothing; the program rejects it with
    /// InsufficientLiquidity.
    #[error("Swapping {amount_in} in pool {pool_id} yields zero output")]
    ZeroOutput { pool_id: u64, amount_in: u64 },

    /// A deposit would mint fewer LP tokens than the per-call floor.
    #[error("Deposit mints {minted} LP tokens; at least {min} required")]
    BelowMinimumLiquidity { minted: u64, min: u64 },

    // ── Arithmetic ───────────────────────────────────────────────────────────
    #[error("Integer overflow in pricing math")]
    MathOverflow,

    // ── Account parsing ──────────────────────────────────────────────────────
    /// Raw account bytes could not be deserialized.
    #[error("Account parse error at offset {offset}: {reason}")]
    ParseError { offset: usize, reason: String },

    /// A confirmed transaction's return data was missing or malformed.
    #[error("Return data error for {signature}: {reason}")]
    ReturnData { signature: String, reason: String },

    // ── Validation ───────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience alias so every module can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;
