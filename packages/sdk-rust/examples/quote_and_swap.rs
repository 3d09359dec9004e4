//! PairSwap Rust SDK: quote, swap and inspect positions.
//!
//! ```bash
//! export PAIRSWAP_RPC_URL="https://api.devnet.solana.com"
//! export PAIRSWAP_KEYPAIR="$HOME/.config/solana/id.json"
//! cargo run -p pairswap-sdk --example quote_and_swap -- 1 1000000
//! ```

use pairswap_sdk::{PairSwapClient, SwapDirection, SwapParams};
use solana_sdk::signature::{read_keypair_file, Signer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let pool_id: u64 = args.next().unwrap_or_else(|| "1".into()).parse()?;
    let amount_in: u64 = args.next().unwrap_or_else(|| "1000000".into()).parse()?;

    let rpc_url = std::env::var("PAIRSWAP_RPC_URL")
        .unwrap_or_else(|_| "https://api.devnet.solana.com".into());
    let client = PairSwapClient::new(rpc_url);

    // ── Quote ────────────────────────────────────────────────────────────────
    let Some(quote) = client.quote_swap(pool_id, SwapDirection::AToB, amount_in).await? else {
        println!("pool {pool_id} does not exist");
        return Ok(());
    };
    println!(
        "sell {} A → {} B  (fee {}, impact {:.3}%)",
        quote.amount_in, quote.amount_out, quote.fee, quote.price_impact_pct
    );
    if quote.amount_out == 0 {
        println!("output rounds to zero; not sending");
        return Ok(());
    }

    // ── Swap with a 0.5 % guard ──────────────────────────────────────────────
    let path = std::env::var("PAIRSWAP_KEYPAIR").unwrap_or_else(|_| {
        format!("{}/.config/solana/id.json", std::env::var("HOME").unwrap_or_default())
    });
    let trader = read_keypair_file(&path)?;
    let res = client
        .swap(&trader, SwapParams {
            pool_id,
            direction: SwapDirection::AToB,
            amount_in,
            max_slippage_bps: 50,
        })
        .await?;
    println!(
        "swapped: tx {}  received {} (min {})",
        res.signature, res.amount_out, res.min_amount_out
    );

    // ── Positions ────────────────────────────────────────────────────────────
    for p in client.positions_for_holder(&trader.pubkey()).await? {
        println!("pool {}: {} LP", p.pool_id, p.lp_tokens);
    }
    Ok(())
}
