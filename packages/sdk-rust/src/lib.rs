//! PairSwap Rust SDK
//!
//! Client for the PairSwap two-token constant-product AMM on Solana.
//! Reads pool, position and platform state, quotes trades with the
//! program's own integer math, and builds and sends every instruction.
//! No Anchor dependency required.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pairswap_sdk::{PairSwapClient, SwapDirection, SwapParams};
//! use solana_sdk::signature::Keypair;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PairSwapClient::devnet();
//!     let keypair = Keypair::new(); // use a funded keypair
//!
//!     // 1. Quote first
//!     if let Some(q) = client.quote_swap(1, SwapDirection::AToB, 1_000_000).await? {
//!         println!("out: {}  fee: {}  impact: {:.2}%", q.amount_out, q.fee, q.price_impact_pct);
//!     }
//!
//!     // 2. Execute with 0.5% max slippage
//!     let result = client.swap(&keypair, SwapParams {
//!         pool_id:          1,
//!         direction:        SwapDirection::AToB,
//!         amount_in:        1_000_000,
//!         max_slippage_bps: 50,
//!     }).await?;
//!     println!("Swapped! tx: {}", result.signature);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Feature Overview
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`PairSwapClient::initialize`] | One-time platform setup |
//! | [`PairSwapClient::set_platform_status`] | Owner switch for all pool operations |
//! | [`PairSwapClient::create_pool`] | Create a pool under the next sequential id |
//! | [`PairSwapClient::add_liquidity`] | Deposit both tokens, receive LP tokens |
//! | [`PairSwapClient::remove_liquidity`] | Burn LP tokens, withdraw both tokens |
//! | [`PairSwapClient::swap`] | Swap in either direction |
//! | [`PairSwapClient::quote_swap`] | Off-chain fee + output preview |
//! | [`PairSwapClient::pool`] | Pool reserves, supply, spot price |
//! | [`PairSwapClient::positions_for_holder`] | All positions of a holder |
//! | [`PairSwapClient::global_stats`] | Pool count, volume, fees |

pub mod client;
pub mod error;
pub mod instructions;
pub mod math;
pub mod state;
pub mod types;

pub use client::PairSwapClient;
pub use error::{Error, Result};
pub use types::*;
