//! [`PairSwapClient`]: the main entry point for integrations.

use base64::prelude::{Engine, BASE64_STANDARD};
use solana_account_decoder_client_types::UiAccountEncoding;
use solana_client::{
    nonblocking::rpc_client::RpcClient,
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig, RpcTransactionConfig},
    rpc_filter::{Memcmp, MemcmpEncodedBytes, RpcFilterType},
};
use solana_sdk::{
    account::Account,
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    pubkey,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use solana_transaction_status_client_types::{UiTransactionEncoding, UiTransactionReturnData};

use crate::{
    error::{Error, Result},
    instructions::{
        add_liquidity_ix, anchor_disc, create_pool_ix, derive_global_stats, derive_lp_mint,
        derive_pool, derive_pool_authority, derive_position, initialize_ix,
        remove_liquidity_ix, set_platform_status_ix, swap_ix, PoolKeys,
    },
    math::{
        min_amount_out, quote_deposit, quote_swap_detailed, quote_withdrawal, spot_price,
        MIN_LIQUIDITY,
    },
    state::{
        parse_global_stats, parse_pool, parse_position, parse_return_u64, parse_withdrawal,
        GlobalStatsState, PoolState, PositionState, POSITION_HOLDER_OFFSET, POSITION_LEN,
    },
    types::{
        AddLiquidityParams, AddLiquidityResult, CreatePoolParams, CreatePoolResult,
        GlobalStatsInfo, LiquidityQuote, PoolInfo, PositionInfo, RemoveLiquidityParams,
        RemoveLiquidityResult, SwapDirection, SwapParams, SwapQuote, SwapResult,
        WithdrawalQuote,
    },
};

// ─── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_PROGRAM_ID: Pubkey = pubkey!("AUDi6gUZHxmwhgA2svrM2gJzrTj8Zyn2DAeL9fq4dTim");
pub const DEVNET_RPC:  &str = "https://api.devnet.solana.com";
pub const MAINNET_RPC: &str = "https://api.mainnet-beta.solana.com";
pub const LOCALNET_RPC: &str = "http://127.0.0.1:8899";

/// Longest pool name the program accepts, in bytes.
pub const MAX_POOL_NAME_LEN: usize = 32;

// ─── Client ───────────────────────────────────────────────────────────────────

/// Async PairSwap client.
///
/// Read methods return `Ok(None)` when the account does not exist; only RPC
/// and decoding failures are errors.
///
/// ```rust,no_run
/// # use pairswap_sdk::{PairSwapClient, SwapDirection};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = PairSwapClient::devnet();
/// if let Some(q) = client.quote_swap(1, SwapDirection::AToB, 1_000_000).await? {
///     println!("1_000_000 A buys {} B (fee {})", q.amount_out, q.fee);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PairSwapClient {
    rpc_url:    String,
    program_id: Pubkey,
}

impl PairSwapClient {
    /// Create a client pointing at any RPC endpoint.
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url:    rpc_url.into(),
            program_id: DEFAULT_PROGRAM_ID,
        }
    }

    pub fn devnet() -> Self {
        Self::new(DEVNET_RPC)
    }

    pub fn mainnet() -> Self {
        Self::new(MAINNET_RPC)
    }

    pub fn localnet() -> Self {
        Self::new(LOCALNET_RPC)
    }

    /// Override the program ID (useful for locally deployed programs in tests).
    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    // ── Write operations ──────────────────────────────────────────────────────

    /// Create GlobalStats with `owner` as the privileged key. `owner` must be
    /// the program's upgrade authority.
    pub async fn initialize(&self, owner: &Keypair) -> Result<Signature> {
        let rpc = self.rpc();
        let ix = initialize_ix(&self.program_id, &owner.pubkey());
        self.sign_and_send(&rpc, &[ix], owner, &[]).await
    }

    /// Enable or disable the platform. Owner only.
    pub async fn set_platform_status(&self, owner: &Keypair, active: bool) -> Result<Signature> {
        let rpc = self.rpc();
        let ix = set_platform_status_ix(&self.program_id, &owner.pubkey(), active);
        self.sign_and_send(&rpc, &[ix], owner, &[]).await
    }

    /// Create an empty pool under the next sequential id. Owner only.
    ///
    /// Fresh vault keypairs are generated internally and returned in the result.
    pub async fn create_pool(
        &self,
        owner:  &Keypair,
        params: CreatePoolParams,
    ) -> Result<CreatePoolResult> {
        if params.name.len() > MAX_POOL_NAME_LEN {
            return Err(Error::InvalidArgument(format!(
                "pool name is {} bytes; at most {MAX_POOL_NAME_LEN} allowed",
                params.name.len()
            )));
        }
        if params.token_a_mint == params.token_b_mint {
            return Err(Error::InvalidArgument("token A and token B must differ".into()));
        }

        let rpc = self.rpc();
        let stats = self
            .fetch_global_stats(&rpc)
            .await?
            .ok_or(Error::NotInitialized)?;
        let pool_id = stats.next_pool_id();

        let vault_a = Keypair::new();
        let vault_b = Keypair::new();
        let (pool, _)           = derive_pool(pool_id, &self.program_id);
        let (pool_authority, _) = derive_pool_authority(&pool, &self.program_id);
        let (lp_mint, _)        = derive_lp_mint(&pool, &self.program_id);

        let ix = create_pool_ix(
            &self.program_id,
            &owner.pubkey(),
            pool_id,
            &params.token_a_mint,
            &params.token_b_mint,
            &vault_a.pubkey(),
            &vault_b.pubkey(),
            &params.name,
        );
        let sig = self.sign_and_send(&rpc, &[ix], owner, &[&vault_a, &vault_b]).await?;

        Ok(CreatePoolResult {
            signature: sig.to_string(),
            pool_id,
            pool,
            pool_authority,
            vault_a: vault_a.pubkey(),
            vault_b: vault_b.pubkey(),
            lp_mint,
        })
    }

    /// Deposit both tokens. The quote is checked against the 1000-token floor
    /// before anything is sent; `lp_minted` is what the program reports.
    pub async fn add_liquidity(
        &self,
        holder: &Keypair,
        params: AddLiquidityParams,
    ) -> Result<AddLiquidityResult> {
        if params.amount_a == 0 || params.amount_b == 0 {
            return Err(Error::InvalidArgument("both deposit amounts must be > 0".into()));
        }
        let rpc = self.rpc();
        let (pool_addr, pool) = self.require_pool(&rpc, params.pool_id).await?;

        let quote = quote_deposit(&pool, params.amount_a, params.amount_b)?;
        if !quote.meets_minimum {
            return Err(Error::BelowMinimumLiquidity {
                minted: quote.lp_minted,
                min:    MIN_LIQUIDITY,
            });
        }

        let keys = pool_keys(pool_addr, &pool);
        let (position, _) = derive_position(&pool_addr, &holder.pubkey(), &self.program_id);
        let ix = add_liquidity_ix(
            &self.program_id,
            &holder.pubkey(),
            &keys,
            params.amount_a,
            params.amount_b,
        );
        let sig = self.sign_and_send(&rpc, &[ix], holder, &[]).await?;
        let lp_minted = parse_return_u64(&self.fetch_return_data(&rpc, &sig).await?)?;

        Ok(AddLiquidityResult {
            signature:    sig.to_string(),
            pool:         pool_addr,
            position,
            amount_a:     params.amount_a,
            amount_b:     params.amount_b,
            estimated_lp: quote.lp_minted,
            lp_minted,
        })
    }

    /// Burn LP tokens and withdraw the pro-rata share of both reserves.
    /// The amounts are the ones the program paid out.
    pub async fn remove_liquidity(
        &self,
        holder: &Keypair,
        params: RemoveLiquidityParams,
    ) -> Result<RemoveLiquidityResult> {
        if params.lp_tokens == 0 {
            return Err(Error::InvalidArgument("lp_tokens must be > 0".into()));
        }
        let rpc = self.rpc();
        let (pool_addr, pool) = self.require_pool(&rpc, params.pool_id).await?;
        let (position_addr, _) = derive_position(&pool_addr, &holder.pubkey(), &self.program_id);
        let has_position = self.fetch(&rpc, &position_addr).await?.is_some();

        // fails early when lp_tokens exceeds the pool's supply
        quote_withdrawal(&pool, params.lp_tokens)?;
        let ix = remove_liquidity_ix(
            &self.program_id,
            &holder.pubkey(),
            &pool_keys(pool_addr, &pool),
            has_position,
            params.lp_tokens,
        );
        let sig = self.sign_and_send(&rpc, &[ix], holder, &[]).await?;
        let paid = parse_withdrawal(&self.fetch_return_data(&rpc, &sig).await?)?;

        Ok(RemoveLiquidityResult {
            signature: sig.to_string(),
            pool:      pool_addr,
            lp_tokens: params.lp_tokens,
            amount_a:  paid.amount_a,
            amount_b:  paid.amount_b,
        })
    }

    /// Swap against a pool by id.
    ///
    /// `max_slippage_bps = 0` disables the slippage guard.
    pub async fn swap(&self, trader: &Keypair, params: SwapParams) -> Result<SwapResult> {
        if params.amount_in == 0 {
            return Err(Error::InvalidArgument("amount_in must be > 0".into()));
        }
        let rpc = self.rpc();
        let (pool_addr, pool) = self.require_pool(&rpc, params.pool_id).await?;
        if pool.total_lp_supply == 0 {
            return Err(Error::NoLiquidity(params.pool_id));
        }

        let quote = quote_swap_detailed(&pool, params.direction, params.amount_in);
        let min_out = guarded_min_out(&quote, params.max_slippage_bps)?;

        let ix = swap_ix(
            &self.program_id,
            &trader.pubkey(),
            &pool_keys(pool_addr, &pool),
            params.direction,
            params.amount_in,
            min_out,
        );
        let sig = self.sign_and_send(&rpc, &[ix], trader, &[]).await?;
        let amount_out = parse_return_u64(&self.fetch_return_data(&rpc, &sig).await?)?;

        Ok(SwapResult {
            signature:      sig.to_string(),
            pool:           pool_addr,
            direction:      params.direction,
            amount_in:      params.amount_in,
            estimated_out:  quote.amount_out,
            min_amount_out: min_out,
            amount_out,
        })
    }

    // ── Read operations ───────────────────────────────────────────────────────

    pub async fn global_stats(&self) -> Result<Option<GlobalStatsInfo>> {
        let rpc = self.rpc();
        let address = derive_global_stats(&self.program_id).0;
        Ok(self
            .fetch_global_stats(&rpc)
            .await?
            .map(|s| stats_info(address, s)))
    }

    /// Pool by id, `None` if it was never created.
    pub async fn pool(&self, pool_id: u64) -> Result<Option<PoolInfo>> {
        let rpc = self.rpc();
        Ok(self
            .fetch_pool(&rpc, pool_id)
            .await?
            .map(|(addr, pool)| pool_info(addr, pool)))
    }

    /// Every pool created so far, in id order.
    pub async fn pools(&self) -> Result<Vec<PoolInfo>> {
        let rpc = self.rpc();
        let Some(stats) = self.fetch_global_stats(&rpc).await? else {
            return Ok(Vec::new());
        };
        let addrs: Vec<Pubkey> = (1..=stats.pool_counter)
            .map(|id| derive_pool(id, &self.program_id).0)
            .collect();

        let mut out = Vec::with_capacity(addrs.len());
        // getMultipleAccounts caps at 100 keys per call
        for chunk in addrs.chunks(100) {
            let accounts = rpc.get_multiple_accounts(chunk).await?;
            for (addr, maybe) in chunk.iter().zip(accounts) {
                if let Some(acc) = maybe {
                    out.push(pool_info(*addr, parse_pool(&acc.data)?));
                }
            }
        }
        Ok(out)
    }

    /// A holder's position in one pool, `None` before their first deposit.
    pub async fn position(&self, pool_id: u64, holder: &Pubkey) -> Result<Option<PositionInfo>> {
        let rpc = self.rpc();
        let (pool_addr, _) = derive_pool(pool_id, &self.program_id);
        let (address, _) = derive_position(&pool_addr, holder, &self.program_id);
        match self.fetch(&rpc, &address).await? {
            Some(acc) => Ok(Some(position_info(address, parse_position(&acc.data)?))),
            None => Ok(None),
        }
    }

    /// All positions held by `holder`, across pools.
    pub async fn positions_for_holder(&self, holder: &Pubkey) -> Result<Vec<PositionInfo>> {
        let rpc = self.rpc();
        let disc = anchor_disc("account", "Position");

        let config = RpcProgramAccountsConfig {
            filters: Some(vec![
                RpcFilterType::DataSize(POSITION_LEN as u64),
                RpcFilterType::Memcmp(Memcmp::new(
                    0,
                    MemcmpEncodedBytes::Bytes(disc.to_vec()),
                )),
                RpcFilterType::Memcmp(Memcmp::new(
                    POSITION_HOLDER_OFFSET,
                    MemcmpEncodedBytes::Bytes(holder.to_bytes().to_vec()),
                )),
            ]),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                ..RpcAccountInfoConfig::default()
            },
            ..Default::default()
        };

        let raw = rpc
            .get_program_accounts_with_config(&self.program_id, config)
            .await?;

        positions_from_accounts(raw)
    }

    /// Quote a swap without sending anything. `None` if the pool is absent.
    pub async fn quote_swap(
        &self,
        pool_id:   u64,
        direction: SwapDirection,
        amount_in: u64,
    ) -> Result<Option<SwapQuote>> {
        let rpc = self.rpc();
        Ok(self
            .fetch_pool(&rpc, pool_id)
            .await?
            .map(|(_, pool)| quote_swap_detailed(&pool, direction, amount_in)))
    }

    pub async fn quote_add_liquidity(
        &self,
        pool_id:  u64,
        amount_a: u64,
        amount_b: u64,
    ) -> Result<Option<LiquidityQuote>> {
        let rpc = self.rpc();
        self.fetch_pool(&rpc, pool_id)
            .await?
            .map(|(_, pool)| quote_deposit(&pool, amount_a, amount_b))
            .transpose()
    }

    pub async fn quote_remove_liquidity(
        &self,
        pool_id:   u64,
        lp_tokens: u64,
    ) -> Result<Option<WithdrawalQuote>> {
        let rpc = self.rpc();
        self.fetch_pool(&rpc, pool_id)
            .await?
            .map(|(_, pool)| quote_withdrawal(&pool, lp_tokens))
            .transpose()
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn rpc(&self) -> RpcClient {
        RpcClient::new_with_commitment(self.rpc_url.clone(), CommitmentConfig::confirmed())
    }

    async fn sign_and_send(
        &self,
        rpc:          &RpcClient,
        instructions: &[Instruction],
        payer:        &Keypair,
        extra:        &[&Keypair],
    ) -> Result<Signature> {
        let blockhash = rpc.get_latest_blockhash().await?;
        let mut signers: Vec<&dyn Signer> = vec![payer];
        signers.extend(extra.iter().map(|k| k as &dyn Signer));
        let tx = Transaction::new_signed_with_payer(
            instructions,
            Some(&payer.pubkey()),
            &signers,
            blockhash,
        );
        Ok(rpc.send_and_confirm_transaction(&tx).await?)
    }

    /// Raw return data of a confirmed transaction sent to this program.
    async fn fetch_return_data(&self, rpc: &RpcClient, signature: &Signature) -> Result<Vec<u8>> {
        let config = RpcTransactionConfig {
            encoding: Some(UiTransactionEncoding::Base64),
            commitment: Some(CommitmentConfig::confirmed()),
            max_supported_transaction_version: Some(0),
        };
        let tx = rpc.get_transaction_with_config(signature, config).await?;
        let meta = tx.transaction.meta.ok_or_else(|| Error::ReturnData {
            signature: signature.to_string(),
            reason:    "transaction has no status meta".into(),
        })?;
        decode_return_data(&self.program_id, signature, meta.return_data.into())
    }

    /// Fetch an account, mapping "does not exist" to `None`.
    async fn fetch(&self, rpc: &RpcClient, address: &Pubkey) -> Result<Option<Account>> {
        Ok(rpc
            .get_account_with_commitment(address, CommitmentConfig::confirmed())
            .await?
            .value)
    }

    async fn fetch_global_stats(&self, rpc: &RpcClient) -> Result<Option<GlobalStatsState>> {
        let (address, _) = derive_global_stats(&self.program_id);
        self.fetch(rpc, &address)
            .await?
            .map(|acc| parse_global_stats(&acc.data))
            .transpose()
    }

    async fn fetch_pool(&self, rpc: &RpcClient, pool_id: u64) -> Result<Option<(Pubkey, PoolState)>> {
        if pool_id == 0 {
            return Ok(None);
        }
        let (address, _) = derive_pool(pool_id, &self.program_id);
        match self.fetch(rpc, &address).await? {
            Some(acc) => Ok(Some((address, parse_pool(&acc.data)?))),
            None => Ok(None),
        }
    }

    async fn require_pool(&self, rpc: &RpcClient, pool_id: u64) -> Result<(Pubkey, PoolState)> {
        self.fetch_pool(rpc, pool_id)
            .await?
            .ok_or(Error::PoolNotFound(pool_id))
    }
}

// ─── Return data ──────────────────────────────────────────────────────────────

/// Base64-decode return data set by `program_id`.
///
/// Trailing zero bytes are trimmed by the runtime, so an all-zero value
/// arrives as no return data at all and decodes to an empty buffer.
fn decode_return_data(
    program_id:  &Pubkey,
    signature:   &Signature,
    return_data: Option<UiTransactionReturnData>,
) -> Result<Vec<u8>> {
    let Some(return_data) = return_data else {
        return Ok(Vec::new());
    };
    let fail = |reason: String| Error::ReturnData {
        signature: signature.to_string(),
        reason,
    };
    if return_data.program_id != program_id.to_string() {
        return Err(fail(format!("set by {}, expected {program_id}", return_data.program_id)));
    }
    let (data, _) = return_data.data;
    BASE64_STANDARD.decode(data).map_err(|e| fail(e.to_string()))
}

// ─── Slippage ─────────────────────────────────────────────────────────────────

/// Minimum output to send with a swap. A quote of zero is rejected here:
/// the program would fail it with InsufficientLiquidity.
fn guarded_min_out(quote: &SwapQuote, max_slippage_bps: u16) -> Result<u64> {
    if quote.amount_out == 0 {
        return Err(Error::ZeroOutput {
            pool_id:   quote.pool_id,
            amount_in: quote.amount_in,
        });
    }
    Ok(min_amount_out(quote.amount_out, max_slippage_bps))
}

// ─── Conversions ──────────────────────────────────────────────────────────────

fn pool_keys(pool: Pubkey, state: &PoolState) -> PoolKeys {
    PoolKeys {
        pool,
        token_a_mint: state.token_a_mint,
        token_b_mint: state.token_b_mint,
        vault_a:      state.token_a_vault,
        vault_b:      state.token_b_vault,
        lp_mint:      state.lp_mint,
    }
}

fn stats_info(address: Pubkey, s: GlobalStatsState) -> GlobalStatsInfo {
    GlobalStatsInfo {
        address,
        owner:           s.owner,
        pool_counter:    s.pool_counter,
        total_volume:    s.total_volume,
        total_fees:      s.total_fees,
        platform_active: s.platform_active,
    }
}

fn pool_info(address: Pubkey, p: PoolState) -> PoolInfo {
    let spot_price = spot_price(&p);
    PoolInfo {
        pool_id:         p.pool_id,
        address,
        name:            p.name,
        token_a_mint:    p.token_a_mint,
        token_b_mint:    p.token_b_mint,
        token_a_vault:   p.token_a_vault,
        token_b_vault:   p.token_b_vault,
        lp_mint:         p.lp_mint,
        reserve_a:       p.reserve_a,
        reserve_b:       p.reserve_b,
        total_lp_supply: p.total_lp_supply,
        active:          p.active,
        created_at:      p.created_at,
        spot_price,
    }
}

/// Decode program accounts into positions sorted by pool id. One bad
/// account fails the whole batch.
fn positions_from_accounts(raw: Vec<(Pubkey, Account)>) -> Result<Vec<PositionInfo>> {
    let mut out = raw
        .into_iter()
        .map(|(pk, acc)| Ok(position_info(pk, parse_position(&acc.data)?)))
        .collect::<Result<Vec<PositionInfo>>>()?;
    out.sort_by_key(|p| p.pool_id);
    Ok(out)
}

fn position_info(address: Pubkey, p: PositionState) -> PositionInfo {
    PositionInfo {
        address,
        pool_id:           p.pool_id,
        pool:              p.pool,
        holder:            p.holder,
        lp_tokens:         p.lp_tokens,
        token_a_deposited: p.token_a_deposited,
        token_b_deposited: p.token_b_deposited,
        last_activity:     p.last_activity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_program_id_matches_program() {
        assert_eq!(
            PairSwapClient::devnet().program_id().to_string(),
            "AUDi6gUZHxmwhgA2svrM2gJzrTj8Zyn2DAeL9fq4dTim"
        );
    }

    #[test]
    fn program_id_override() {
        let id = Pubkey::new_unique();
        let client = PairSwapClient::localnet().with_program_id(id);
        assert_eq!(client.program_id(), &id);
    }

    #[tokio::test]
    async fn rejects_bad_arguments_before_any_rpc() {
        // Nothing listens on this port; every check below fails before an RPC call.
        let client = PairSwapClient::new("http://127.0.0.1:1");
        let owner = Keypair::new();
        let mint = Pubkey::new_unique();

        let err = client
            .create_pool(&owner, CreatePoolParams {
                token_a_mint: mint,
                token_b_mint: Pubkey::new_unique(),
                name:         "x".repeat(33),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let err = client
            .create_pool(&owner, CreatePoolParams {
                token_a_mint: mint,
                token_b_mint: mint,
                name:         "A/A".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let err = client
            .add_liquidity(&owner, AddLiquidityParams { pool_id: 1, amount_a: 0, amount_b: 5 })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let err = client
            .swap(&owner, SwapParams {
                pool_id:          1,
                direction:        SwapDirection::AToB,
                amount_in:        0,
                max_slippage_bps: 50,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    fn pool_state(reserve_a: u64, reserve_b: u64) -> PoolState {
        PoolState {
            pool_id:         4,
            token_a_mint:    Pubkey::new_unique(),
            token_b_mint:    Pubkey::new_unique(),
            token_a_vault:   Pubkey::new_unique(),
            token_b_vault:   Pubkey::new_unique(),
            lp_mint:         Pubkey::new_unique(),
            reserve_a,
            reserve_b,
            total_lp_supply: 2_500,
            active:          true,
            created_at:      7,
            name:            "A/B".into(),
        }
    }

    fn return_data(program_id: &Pubkey, bytes: &[u8]) -> UiTransactionReturnData {
        UiTransactionReturnData {
            program_id: program_id.to_string(),
            data: (
                BASE64_STANDARD.encode(bytes),
                solana_transaction_status_client_types::UiReturnDataEncoding::Base64,
            ),
        }
    }

    #[test]
    fn decodes_program_return_data() {
        let program = Pubkey::new_unique();
        let sig = Signature::default();
        let bytes = 998_497u64.to_le_bytes();
        let data = decode_return_data(&program, &sig, Some(return_data(&program, &bytes))).unwrap();
        assert_eq!(parse_return_u64(&data).unwrap(), 998_497);

        let paid = [1_000_000u64.to_le_bytes(), 2_000_000u64.to_le_bytes()].concat();
        let data = decode_return_data(&program, &sig, Some(return_data(&program, &paid))).unwrap();
        let w = parse_withdrawal(&data).unwrap();
        assert_eq!((w.amount_a, w.amount_b), (1_000_000, 2_000_000));
    }

    #[test]
    fn absent_return_data_is_zero() {
        let data = decode_return_data(&Pubkey::new_unique(), &Signature::default(), None).unwrap();
        assert!(data.is_empty());
        assert_eq!(parse_withdrawal(&data).unwrap().amount_a, 0);
    }

    #[test]
    fn return_data_from_another_program_is_rejected() {
        let program = Pubkey::new_unique();
        let other = return_data(&Pubkey::new_unique(), &5u64.to_le_bytes());
        let err = decode_return_data(&program, &Signature::default(), Some(other)).unwrap_err();
        assert!(matches!(err, Error::ReturnData { .. }));
    }

    #[test]
    fn zero_output_swap_is_rejected_before_sending() {
        // 100 B into (1_000, 2_000_000): 100 * 1_000 / 2_000_100 == 0
        let quote = quote_swap_detailed(&pool_state(1_000, 2_000_000), SwapDirection::BToA, 100);
        assert_eq!(quote.amount_out, 0);
        let err = guarded_min_out(&quote, 50).unwrap_err();
        assert!(matches!(err, Error::ZeroOutput { pool_id: 4, amount_in: 100 }));
    }

    #[test]
    fn min_out_never_exceeds_quote() {
        let quote = quote_swap_detailed(&pool_state(1_000_000, 2_000_000), SwapDirection::AToB, 1_000_000);
        assert_eq!(quote.amount_out, 998_497);
        assert_eq!(guarded_min_out(&quote, 0).unwrap(), 0);
        assert_eq!(guarded_min_out(&quote, 50).unwrap(), 998_497 - 4_992);
        assert_eq!(guarded_min_out(&quote, 10_000).unwrap(), 0);
    }

    fn position_account(pool_id: u64) -> Account {
        let mut data = vec![0u8; crate::state::POSITION_LEN];
        data[40..48].copy_from_slice(&pool_id.to_le_bytes());
        data[80..88].copy_from_slice(&1_500u64.to_le_bytes());
        Account { data, ..Account::default() }
    }

    #[test]
    fn positions_are_sorted_by_pool() {
        let raw = vec![
            (Pubkey::new_unique(), position_account(3)),
            (Pubkey::new_unique(), position_account(1)),
        ];
        let positions = positions_from_accounts(raw).unwrap();
        assert_eq!(positions.iter().map(|p| p.pool_id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(positions[0].lp_tokens, 1_500);
    }

    #[test]
    fn malformed_position_fails_the_listing() {
        let short = Account { data: vec![0u8; 40], ..Account::default() };
        let raw = vec![
            (Pubkey::new_unique(), position_account(1)),
            (Pubkey::new_unique(), short),
        ];
        assert!(matches!(positions_from_accounts(raw), Err(Error::ParseError { .. })));
    }

    #[test]
    fn pool_info_carries_spot_price() {
        let state = PoolState {
            pool_id:         4,
            token_a_mint:    Pubkey::new_unique(),
            token_b_mint:    Pubkey::new_unique(),
            token_a_vault:   Pubkey::new_unique(),
            token_b_vault:   Pubkey::new_unique(),
            lp_mint:         Pubkey::new_unique(),
            reserve_a:       1_000,
            reserve_b:       4_000,
            total_lp_supply: 2_500,
            active:          true,
            created_at:      7,
            name:            "A/B".into(),
        };
        let info = pool_info(Pubkey::new_unique(), state);
        assert_eq!(info.pool_id, 4);
        assert_eq!(info.spot_price, 4.0);
        assert_eq!(info.name, "A/B");
    }
}
