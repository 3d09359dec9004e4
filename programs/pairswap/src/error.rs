use anchor_lang::prelude::*;

#[error_code]
pub enum PairSwapError {
    #[msg("Caller is not authorized or the platform is disabled")]
    NotAuthorized,
    #[msg("Pool does not exist or is inactive")]
    PoolNotFound,
    #[msg("Pool has insufficient liquidity")]
    InsufficientLiquidity,
    #[msg("Amount must be greater than zero")]
    InvalidAmount,
    #[msg("Output below minimum: slippage exceeded")]
    SlippageTooHigh,
    #[msg("Minted LP tokens below the minimum liquidity floor")]
    ZeroLiquidity,
    /// Reserved: pool names are not unique and creation never raises this.
    #[msg("Pool already exists")]
    PoolAlreadyExists,
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Token account does not match pool")]
    MintMismatch,
    #[msg("Pool name exceeds 32 bytes")]
    NameTooLong,
}
