use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use pairswap_sdk::{
    client::DEFAULT_PROGRAM_ID, math::MIN_LIQUIDITY, AddLiquidityParams, CreatePoolParams,
    PairSwapClient, PoolInfo, PositionInfo, RemoveLiquidityParams, SwapDirection, SwapParams,
};
use serde::Serialize;
use serde_json::json;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signer},
};
use std::str::FromStr;

// ─── Token symbol registry (mainnet-beta) ────────────────────────────────────

const KNOWN_TOKENS: &[(&str, &str)] = &[
    ("SOL",  "So11111111111111111111111111111111111111112"),
    ("USDC", "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"),
    ("USDT", "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB"),
];

/// Resolve a symbol (SOL, USDC, USDT) or raw base-58 mint address to a Pubkey.
fn resolve_mint(symbol_or_address: &str) -> Result<Pubkey> {
    let upper = symbol_or_address.to_uppercase();
    for (sym, addr) in KNOWN_TOKENS {
        if upper == *sym {
            return Ok(Pubkey::from_str(addr)?);
        }
    }
    Pubkey::from_str(symbol_or_address)
        .map_err(|_| anyhow!(
            "Unknown token '{}'. Use a built-in symbol ({}) or a base-58 mint address.",
            symbol_or_address,
            KNOWN_TOKENS.iter().map(|(s, _)| *s).collect::<Vec<_>>().join(", ")
        ))
}

/// Reverse-lookup: mint address → symbol, or shortened address for unknowns.
fn resolve_symbol(mint: &Pubkey) -> String {
    let addr = mint.to_string();
    for (sym, known) in KNOWN_TOKENS {
        if addr == *known {
            return sym.to_string();
        }
    }
    format!("{}…{}", &addr[..4], &addr[addr.len() - 4..])
}

/// Expand `~/` to `$HOME/` in keypair paths.
fn expand_home(path: &str) -> String {
    match path.strip_prefix("~/") {
        Some(rest) => format!("{}/{}", std::env::var("HOME").unwrap_or_default(), rest),
        None => path.to_string(),
    }
}

fn load_keypair(path: &str) -> Result<Keypair> {
    let expanded = expand_home(path);
    read_keypair_file(&expanded)
        .map_err(|e| anyhow!(
            "Cannot load keypair from '{}': {}\n  \
             Set PAIRSWAP_KEYPAIR or pass --keypair to specify a different path.",
            expanded, e
        ))
}

/// `--max-slippage` percent → basis points. 0 disables the guard.
fn slippage_bps(pct: f64) -> Result<u16> {
    if !(0.0..=100.0).contains(&pct) {
        return Err(anyhow!("--max-slippage {pct} is out of range. Allowed: 0–100 (percent)."));
    }
    Ok((pct * 100.0).round() as u16)
}

fn parse_direction(s: &str) -> std::result::Result<SwapDirection, String> {
    s.parse::<SwapDirection>().map_err(|e| e.to_string())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ─── Version banner ───────────────────────────────────────────────────────────

fn print_banner() {
    let ver = env!("CARGO_PKG_VERSION");
    println!();
    println!("  PairSwap  v{ver}  ·  two-token constant-product AMM on Solana");
    println!("  {}", "─".repeat(62));
    println!("  Program   {DEFAULT_PROGRAM_ID}");
    println!("  Fee       0.30% of amount_in, kept by the pool");
    println!("  Min mint  {MIN_LIQUIDITY} LP tokens per deposit");
    println!();
}

// ─── CLI definition ───────────────────────────────────────────────────────────

/// PairSwap: two-token constant-product AMM on Solana.
///
/// Every command supports --json for machine-readable output.
#[derive(Parser)]
#[command(
    name        = "pairswap",
    version     = env!("CARGO_PKG_VERSION"),
    about       = "Two-token constant-product AMM: sequential pools, LP positions, 0.30% swap fee.",
    after_help  = "\
ENVIRONMENT:
  PAIRSWAP_RPC_URL      Solana JSON-RPC endpoint  [default: https://api.devnet.solana.com]
  PAIRSWAP_KEYPAIR      Path to Ed25519 keypair JSON  [default: ~/.config/solana/id.json]
  PAIRSWAP_PROGRAM_ID   Program id override

QUICK START:
  pairswap stats
  pairswap pool-info --pool 1
  pairswap quote swap --pool 1 --direction a-to-b --amount 1000000
  pairswap swap --pool 1 --direction a-to-b --amount 1000000
  pairswap position"
)]
struct Cli {
    /// Solana JSON-RPC endpoint
    #[arg(
        long,
        global        = true,
        value_name    = "URL",
        default_value = "https://api.devnet.solana.com",
        env           = "PAIRSWAP_RPC_URL"
    )]
    rpc_url: String,

    /// Path to the signer's Ed25519 keypair JSON file
    #[arg(
        long,
        global        = true,
        value_name    = "PATH",
        default_value = "~/.config/solana/id.json",
        env           = "PAIRSWAP_KEYPAIR"
    )]
    keypair: String,

    /// Program id, for local or forked deployments
    #[arg(long, global = true, value_name = "PUBKEY", env = "PAIRSWAP_PROGRAM_ID")]
    program_id: Option<String>,

    /// Output machine-readable JSON instead of human-readable text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the platform's GlobalStats account; the keypair becomes the owner
    ///
    /// Runs once per program deployment, signed by the program's upgrade
    /// authority.
    Init,

    /// Enable or disable every pool operation (owner only)
    #[command(
        name = "set-platform",
        after_help = "\
EXAMPLES:
  pairswap set-platform --active false   # pause deposits, withdrawals, swaps, pool creation
  pairswap set-platform --active true"
    )]
    SetPlatform {
        #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
        active: bool,
    },

    /// Create an empty pool for a token pair (owner only)
    ///
    /// Pools get sequential ids starting at 1. The name is a label only;
    /// several pools may share a pair or a name.
    #[command(
        after_help = "\
EXAMPLES:
  pairswap create-pool --token-a SOL --token-b USDC --name SOL/USDC
  pairswap create-pool --token-a <mintA> --token-b <mintB>

NOTES:
  After creation the pool is empty. Run `add-liquidity` to seed it."
    )]
    CreatePool {
        /// Token A: symbol (SOL, USDC, USDT) or base-58 mint address
        #[arg(long, value_name = "TOKEN")]
        token_a: String,

        /// Token B: symbol or base-58 mint address
        #[arg(long, value_name = "TOKEN")]
        token_b: String,

        /// Pool label, at most 32 bytes. Defaults to "A/B" from the symbols.
        #[arg(long, value_name = "NAME")]
        name: Option<String>,
    },

    /// Deposit both tokens and receive LP tokens
    #[command(
        name = "add-liquidity",
        after_help = "\
EXAMPLES:
  pairswap add-liquidity --pool 1 --amount-a 1000000 --amount-b 2000000

NOTES:
  First deposit mints amount_a/2 + amount_b/2 LP tokens.
  Later deposits mint by the scarcer side; surplus of the other token stays
  in the pool. Every deposit must mint at least 1000 LP tokens."
    )]
    AddLiquidity {
        #[arg(long, value_name = "ID")]
        pool: u64,

        /// Amount of token A (atomic units)
        #[arg(long, value_name = "AMOUNT")]
        amount_a: u64,

        /// Amount of token B (atomic units)
        #[arg(long, value_name = "AMOUNT")]
        amount_b: u64,
    },

    /// Burn LP tokens and withdraw the pro-rata share of both reserves
    #[command(
        name = "remove-liquidity",
        after_help = "\
EXAMPLES:
  pairswap remove-liquidity --pool 1 --lp 500000
  pairswap position --pool 1    # see how many LP tokens you hold"
    )]
    RemoveLiquidity {
        #[arg(long, value_name = "ID")]
        pool: u64,

        /// LP tokens to burn
        #[arg(long, value_name = "AMOUNT")]
        lp: u64,
    },

    /// Swap one side of a pool for the other
    #[command(
        after_help = "\
EXAMPLES:
  pairswap swap --pool 1 --direction a-to-b --amount 1000000
  pairswap swap --pool 1 --direction b-to-a --amount 1000000 --max-slippage 0.1

FEE MODEL:
  fee        = amount_in × 0.30%  (truncated, stays in the pool)
  amount_out = reserve_out × (amount_in − fee) / (reserve_in + amount_in − fee)"
    )]
    Swap {
        #[arg(long, value_name = "ID")]
        pool: u64,

        /// a-to-b sells token A; b-to-a sells token B
        #[arg(long, value_name = "DIR", value_parser = parse_direction)]
        direction: SwapDirection,

        /// Amount of the input token (atomic units)
        #[arg(long, value_name = "AMOUNT")]
        amount: u64,

        /// Reject the swap if output falls more than this many percent below
        /// the quote. 0 = accept any non-zero output.
        #[arg(long, value_name = "PCT", default_value_t = 0.5)]
        max_slippage: f64,
    },

    /// Preview a swap, deposit or withdrawal without sending a transaction
    #[command(subcommand)]
    Quote(QuoteKind),

    /// Show one pool, or every pool when --pool is omitted
    #[command(
        name = "pool-info",
        after_help = "\
EXAMPLES:
  pairswap pool-info --pool 1
  pairswap pool-info --json"
    )]
    PoolInfo {
        #[arg(long, value_name = "ID")]
        pool: Option<u64>,
    },

    /// Show the keypair's position in one pool, or in every pool
    #[command(
        after_help = "\
EXAMPLES:
  pairswap position
  pairswap position --pool 1
  pairswap position --holder <PUBKEY> --json"
    )]
    Position {
        #[arg(long, value_name = "ID")]
        pool: Option<u64>,

        /// Holder to inspect instead of the keypair's own address
        #[arg(long, value_name = "PUBKEY")]
        holder: Option<String>,
    },

    /// Show platform statistics: owner, pool count, volume, fees
    Stats,
}

#[derive(Subcommand)]
enum QuoteKind {
    /// Swap output and fee
    Swap {
        #[arg(long, value_name = "ID")]
        pool: u64,
        #[arg(long, value_name = "DIR", value_parser = parse_direction)]
        direction: SwapDirection,
        #[arg(long, value_name = "AMOUNT")]
        amount: u64,
    },
    /// LP tokens a deposit would mint
    Add {
        #[arg(long, value_name = "ID")]
        pool: u64,
        #[arg(long, value_name = "AMOUNT")]
        amount_a: u64,
        #[arg(long, value_name = "AMOUNT")]
        amount_b: u64,
    },
    /// Tokens returned for burning LP tokens
    Remove {
        #[arg(long, value_name = "ID")]
        pool: u64,
        #[arg(long, value_name = "AMOUNT")]
        lp: u64,
    },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    // When invoked with no arguments, show banner + full help and exit cleanly.
    if std::env::args().len() == 1 {
        print_banner();
        Cli::command().print_long_help().ok();
        println!();
        return Ok(());
    }

    let cli = Cli::parse();
    let client = build_client(&cli)?;

    match &cli.command {
        Commands::Init => cmd_init(&client, &cli.keypair, cli.json).await,
        Commands::SetPlatform { active } => {
            cmd_set_platform(&client, &cli.keypair, *active, cli.json).await
        }
        Commands::CreatePool { token_a, token_b, name } => {
            cmd_create_pool(&client, &cli.keypair, token_a, token_b, name.as_deref(), cli.json).await
        }
        Commands::AddLiquidity { pool, amount_a, amount_b } => {
            cmd_add_liquidity(&client, &cli.keypair, *pool, *amount_a, *amount_b, cli.json).await
        }
        Commands::RemoveLiquidity { pool, lp } => {
            cmd_remove_liquidity(&client, &cli.keypair, *pool, *lp, cli.json).await
        }
        Commands::Swap { pool, direction, amount, max_slippage } => {
            cmd_swap(&client, &cli.keypair, *pool, *direction, *amount, *max_slippage, cli.json).await
        }
        Commands::Quote(kind) => cmd_quote(&client, kind, cli.json).await,
        Commands::PoolInfo { pool } => cmd_pool_info(&client, *pool, cli.json).await,
        Commands::Position { pool, holder } => {
            cmd_position(&client, &cli.keypair, *pool, holder.as_deref(), cli.json).await
        }
        Commands::Stats => cmd_stats(&client, cli.json).await,
    }
}

fn build_client(cli: &Cli) -> Result<PairSwapClient> {
    let client = PairSwapClient::new(cli.rpc_url.clone());
    match &cli.program_id {
        Some(id) => {
            let id = Pubkey::from_str(id)
                .with_context(|| format!("--program-id '{id}' is not a valid base-58 pubkey"))?;
            Ok(client.with_program_id(id))
        }
        None => Ok(client),
    }
}

// ─── init / set-platform ──────────────────────────────────────────────────────

async fn cmd_init(client: &PairSwapClient, keypair_path: &str, json_output: bool) -> Result<()> {
    let owner = load_keypair(keypair_path)?;
    let sig = client
        .initialize(&owner)
        .await
        .context("initialize transaction failed (already initialized, or keypair is not the upgrade authority?)")?;

    if json_output {
        print_json(&json!({
            "status":  "ok",
            "command": "init",
            "owner":   owner.pubkey().to_string(),
            "tx":      sig.to_string(),
        }))
    } else {
        println!("─── Platform Initialized ─────────────────────────────────────────");
        println!("  Owner            {}", owner.pubkey());
        println!("  Program          {}", client.program_id());
        println!("  Transaction      {sig}");
        Ok(())
    }
}

async fn cmd_set_platform(
    client: &PairSwapClient,
    keypair_path: &str,
    active: bool,
    json_output: bool,
) -> Result<()> {
    let owner = load_keypair(keypair_path)?;
    let sig = client
        .set_platform_status(&owner, active)
        .await
        .context("set_platform_status transaction failed (is this keypair the owner?)")?;

    if json_output {
        print_json(&json!({
            "status":  "ok",
            "command": "set-platform",
            "active":  active,
            "tx":      sig.to_string(),
        }))
    } else {
        let state = if active { "ENABLED" } else { "DISABLED" };
        println!("─── Platform {state} ───────────────────────────────────────────────");
        println!("  Transaction      {sig}");
        Ok(())
    }
}

// ─── create-pool ─────────────────────────────────────────────────────────────

async fn cmd_create_pool(
    client: &PairSwapClient,
    keypair_path: &str,
    token_a: &str,
    token_b: &str,
    name: Option<&str>,
    json_output: bool,
) -> Result<()> {
    let mint_a = resolve_mint(token_a)?;
    let mint_b = resolve_mint(token_b)?;
    let name = match name {
        Some(n) => n.to_string(),
        None => format!("{}/{}", resolve_symbol(&mint_a), resolve_symbol(&mint_b)),
    };

    let owner = load_keypair(keypair_path)?;
    let res = client
        .create_pool(&owner, CreatePoolParams {
            token_a_mint: mint_a,
            token_b_mint: mint_b,
            name:         name.clone(),
        })
        .await
        .context("create_pool transaction failed")?;

    if json_output {
        print_json(&res)
    } else {
        println!("─── Pool Created ─────────────────────────────────────────────────");
        println!("  Pool id          {}", res.pool_id);
        println!("  Name             {name}");
        println!("  Token A          {}  ({mint_a})", resolve_symbol(&mint_a));
        println!("  Token B          {}  ({mint_b})", resolve_symbol(&mint_b));
        println!("  Pool PDA         {}", res.pool);
        println!("  Pool authority   {}", res.pool_authority);
        println!("  Vault A          {}", res.vault_a);
        println!("  Vault B          {}", res.vault_b);
        println!("  LP mint          {}", res.lp_mint);
        println!("  Transaction      {}", res.signature);
        println!();
        println!("  Pool is empty. Seed it with:");
        println!("    pairswap add-liquidity --pool {} --amount-a <A> --amount-b <B>", res.pool_id);
        Ok(())
    }
}

// ─── add-liquidity / remove-liquidity ─────────────────────────────────────────

async fn cmd_add_liquidity(
    client: &PairSwapClient,
    keypair_path: &str,
    pool_id: u64,
    amount_a: u64,
    amount_b: u64,
    json_output: bool,
) -> Result<()> {
    let holder = load_keypair(keypair_path)?;
    let res = client
        .add_liquidity(&holder, AddLiquidityParams { pool_id, amount_a, amount_b })
        .await
        .context("add_liquidity failed")?;

    if json_output {
        print_json(&res)
    } else {
        println!("─── Liquidity Added ──────────────────────────────────────────────");
        println!("  Pool             {pool_id}  ({})", res.pool);
        println!("  Deposited A      {}", res.amount_a);
        println!("  Deposited B      {}", res.amount_b);
        println!("  LP expected      {}", res.estimated_lp);
        println!("  LP minted        {}", res.lp_minted);
        println!("  Position         {}", res.position);
        println!("  Transaction      {}", res.signature);
        Ok(())
    }
}

async fn cmd_remove_liquidity(
    client: &PairSwapClient,
    keypair_path: &str,
    pool_id: u64,
    lp_tokens: u64,
    json_output: bool,
) -> Result<()> {
    let holder = load_keypair(keypair_path)?;
    let res = client
        .remove_liquidity(&holder, RemoveLiquidityParams { pool_id, lp_tokens })
        .await
        .context("remove_liquidity failed")?;

    if json_output {
        print_json(&res)
    } else {
        println!("─── Liquidity Removed ────────────────────────────────────────────");
        println!("  Pool             {pool_id}  ({})", res.pool);
        println!("  LP burned        {}", res.lp_tokens);
        println!("  Received A       {}", res.amount_a);
        println!("  Received B       {}", res.amount_b);
        println!("  Transaction      {}", res.signature);
        Ok(())
    }
}

// ─── swap / quote ─────────────────────────────────────────────────────────────

async fn cmd_swap(
    client: &PairSwapClient,
    keypair_path: &str,
    pool_id: u64,
    direction: SwapDirection,
    amount_in: u64,
    max_slippage: f64,
    json_output: bool,
) -> Result<()> {
    let max_slippage_bps = slippage_bps(max_slippage)?;
    if max_slippage_bps == 0 && !json_output {
        eprintln!("Warning: --max-slippage 0 disables the slippage guard.");
    }
    let trader = load_keypair(keypair_path)?;
    let res = client
        .swap(&trader, SwapParams { pool_id, direction, amount_in, max_slippage_bps })
        .await
        .context("swap failed")?;

    if json_output {
        print_json(&res)
    } else {
        println!("─── Swap Executed ────────────────────────────────────────────────");
        println!("  Pool             {pool_id}  ({})", res.pool);
        println!("  Direction        {}", res.direction);
        println!("  Sold             {}", res.amount_in);
        println!("  Expected out     {}", res.estimated_out);
        println!("  Minimum out      {}", res.min_amount_out);
        println!("  Received         {}", res.amount_out);
        println!("  Transaction      {}", res.signature);
        Ok(())
    }
}

async fn cmd_quote(client: &PairSwapClient, kind: &QuoteKind, json_output: bool) -> Result<()> {
    match *kind {
        QuoteKind::Swap { pool, direction, amount } => {
            let q = client
                .quote_swap(pool, direction, amount)
                .await?
                .ok_or_else(|| pool_missing(pool))?;
            if json_output {
                return print_json(&q);
            }
            println!("─── Swap Quote ───────────────────────────────────────────────────");
            println!("  Pool             {pool}  ({direction})");
            println!("  Amount in        {}", q.amount_in);
            println!("  Fee (0.30%)      {}", q.fee);
            println!("  Amount out       {}", q.amount_out);
            println!("  Effective rate   {:.6}", q.effective_rate);
            println!("  Price impact     {:.4}%", q.price_impact_pct);
            if q.amount_out == 0 {
                eprintln!("Warning: output rounds to zero; the swap would be rejected.");
            }
        }
        QuoteKind::Add { pool, amount_a, amount_b } => {
            let q = client
                .quote_add_liquidity(pool, amount_a, amount_b)
                .await?
                .ok_or_else(|| pool_missing(pool))?;
            if json_output {
                return print_json(&q);
            }
            println!("─── Deposit Quote ────────────────────────────────────────────────");
            println!("  Pool             {pool}");
            println!("  LP minted        {}", q.lp_minted);
            println!("  Share of pool    {:.4}%", q.share_of_pool_pct);
            if !q.meets_minimum {
                eprintln!("Warning: deposits must mint at least {MIN_LIQUIDITY} LP tokens; this one would be rejected.");
            }
        }
        QuoteKind::Remove { pool, lp } => {
            let q = client
                .quote_remove_liquidity(pool, lp)
                .await?
                .ok_or_else(|| pool_missing(pool))?;
            if json_output {
                return print_json(&q);
            }
            println!("─── Withdrawal Quote ─────────────────────────────────────────────");
            println!("  Pool             {pool}");
            println!("  LP burned        {}", q.lp_tokens);
            println!("  Receive A        {}", q.amount_a);
            println!("  Receive B        {}", q.amount_b);
        }
    }
    Ok(())
}

fn pool_missing(pool_id: u64) -> anyhow::Error {
    anyhow!(
        "Pool {pool_id} does not exist.\n  \
         Run `pairswap pool-info` to list pools."
    )
}

// ─── pool-info / position / stats ─────────────────────────────────────────────

fn print_pool(p: &PoolInfo) {
    println!("─── Pool {} ─────────────────────────────────────────────────────", p.pool_id);
    println!("  Name             {}", p.name);
    println!("  Address          {}", p.address);
    println!("  Token A          {}  ({})", resolve_symbol(&p.token_a_mint), p.token_a_mint);
    println!("  Token B          {}  ({})", resolve_symbol(&p.token_b_mint), p.token_b_mint);
    println!("  Reserve A        {}", p.reserve_a);
    println!("  Reserve B        {}", p.reserve_b);
    println!("  LP supply        {}", p.total_lp_supply);
    println!("  Spot price       {:.6}  (B per A, raw units)", p.spot_price);
    println!("  Active           {}", p.active);
    println!("  Created at slot  {}", p.created_at);
}

async fn cmd_pool_info(client: &PairSwapClient, pool_id: Option<u64>, json_output: bool) -> Result<()> {
    let pools = match pool_id {
        Some(id) => vec![client.pool(id).await?.ok_or_else(|| pool_missing(id))?],
        None => client.pools().await.context("Failed to list pools")?,
    };

    if json_output {
        return match pool_id {
            Some(_) => print_json(&pools[0]),
            None => print_json(&pools),
        };
    }
    if pools.is_empty() {
        println!("No pools yet. Create one with `pairswap create-pool`.");
    }
    for p in &pools {
        print_pool(p);
    }
    Ok(())
}

#[derive(Serialize)]
struct PositionsOutput<'a> {
    holder:    String,
    positions: &'a [PositionInfo],
}

fn print_position(p: &PositionInfo) {
    println!("─── Position in pool {} ──────────────────────────────────────────", p.pool_id);
    println!("  Address          {}", p.address);
    println!("  LP tokens        {}", p.lp_tokens);
    println!("  Deposited A      {}  (lifetime)", p.token_a_deposited);
    println!("  Deposited B      {}  (lifetime)", p.token_b_deposited);
    println!("  Last activity    slot {}", p.last_activity);
}

async fn cmd_position(
    client: &PairSwapClient,
    keypair_path: &str,
    pool_id: Option<u64>,
    holder: Option<&str>,
    json_output: bool,
) -> Result<()> {
    let holder = match holder {
        Some(h) => Pubkey::from_str(h).with_context(|| format!("'{h}' is not a valid pubkey"))?,
        None => load_keypair(keypair_path)?.pubkey(),
    };

    let positions = match pool_id {
        Some(id) => client.position(id, &holder).await?.into_iter().collect::<Vec<_>>(),
        None => client
            .positions_for_holder(&holder)
            .await
            .context("Failed to query position accounts; check your RPC endpoint")?,
    };

    if json_output {
        return print_json(&PositionsOutput {
            holder:    holder.to_string(),
            positions: &positions,
        });
    }
    if positions.is_empty() {
        println!("No positions for {holder}.");
    }
    for p in &positions {
        print_position(p);
    }
    Ok(())
}

async fn cmd_stats(client: &PairSwapClient, json_output: bool) -> Result<()> {
    let stats = client
        .global_stats()
        .await?
        .ok_or_else(|| anyhow!("Platform not initialized. Run `pairswap init` first."))?;

    if json_output {
        return print_json(&stats);
    }
    println!("─── Platform ─────────────────────────────────────────────────────");
    println!("  Owner            {}", stats.owner);
    println!("  Active           {}", stats.platform_active);
    println!("  Pools            {}", stats.pool_counter);
    println!("  Total volume     {}", stats.total_volume);
    println!("  Total fees       {}", stats.total_fees);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_symbols_and_addresses() {
        let sol = resolve_mint("sol").unwrap();
        assert_eq!(sol.to_string(), "So11111111111111111111111111111111111111112");
        assert_eq!(resolve_symbol(&sol), "SOL");

        let raw = Pubkey::new_unique();
        assert_eq!(resolve_mint(&raw.to_string()).unwrap(), raw);
        assert!(resolve_mint("NOPE").is_err());
    }

    #[test]
    fn unknown_mints_are_shortened() {
        let raw = Pubkey::new_unique();
        let label = resolve_symbol(&raw);
        assert!(label.contains('…'));
        assert!(label.chars().count() < 12);
    }

    #[test]
    fn expands_home_prefix_only() {
        std::env::set_var("HOME", "/home/lp");
        assert_eq!(expand_home("~/id.json"), "/home/lp/id.json");
        assert_eq!(expand_home("/tmp/id.json"), "/tmp/id.json");
        assert_eq!(expand_home("a~/b"), "a~/b");
    }

    #[test]
    fn slippage_percent_to_bps() {
        assert_eq!(slippage_bps(0.5).unwrap(), 50);
        assert_eq!(slippage_bps(0.0).unwrap(), 0);
        assert_eq!(slippage_bps(100.0).unwrap(), 10_000);
        assert!(slippage_bps(-1.0).is_err());
        assert!(slippage_bps(101.0).is_err());
    }

    #[test]
    fn parses_swap_command() {
        let cli = Cli::try_parse_from([
            "pairswap", "swap", "--pool", "3", "--direction", "b-to-a", "--amount", "500",
        ])
        .unwrap();
        match cli.command {
            Commands::Swap { pool, direction, amount, max_slippage } => {
                assert_eq!(pool, 3);
                assert_eq!(direction, SwapDirection::BToA);
                assert_eq!(amount, 500);
                assert_eq!(max_slippage, 0.5);
            }
            _ => panic!("expected swap"),
        }
    }

    #[test]
    fn parses_nested_quote_and_flags() {
        let cli = Cli::try_parse_from([
            "pairswap", "--json", "quote", "add", "--pool", "1", "--amount-a", "10", "--amount-b", "20",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Commands::Quote(QuoteKind::Add { pool: 1, amount_a: 10, amount_b: 20 })
        ));

        let cli = Cli::try_parse_from(["pairswap", "set-platform", "--active", "false"]).unwrap();
        assert!(matches!(cli.command, Commands::SetPlatform { active: false }));
    }

    #[test]
    fn rejects_bad_direction() {
        assert!(Cli::try_parse_from([
            "pairswap", "swap", "--pool", "1", "--direction", "up", "--amount", "5",
        ])
        .is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
