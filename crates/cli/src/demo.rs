//! Offline walkthrough against the in-memory pool.

use crate::{paired_amount, print_current_state, print_execution, print_quote};
use anyhow::Result;
use dex_client::prelude::*;
use dex_domain::address;
use dex_domain::prelude::*;
use dex_protocols::prelude::*;
use std::sync::Arc;
use tracing::info;

const SEED_A: &str = "10";
const SEED_B: &str = "20";
const FUNDING: &str = "100";

pub async fn run(config: ClientConfig, fee_bps: u32) -> Result<()> {
    let chain = Arc::new(SimulatedChain::new());
    let weth = chain.deploy_token("WETH", 18);
    let token_b = chain.deploy_token("ABC", 18);
    let pool = chain.deploy_pool(weth, token_b);
    chain.set_pool_fee(fee_bps);

    let deployer = address::from_index(1);
    chain.seed_pool(
        deployer,
        to_base_units(18, SEED_A)?,
        to_base_units(18, SEED_B)?,
    );

    let user = address::from_index(2);
    chain.mint(weth, user, to_base_units(18, FUNDING)?);
    chain.mint(token_b, user, to_base_units(18, FUNDING)?);
    info!(pool = %pool, fee_bps, "Deployed simulated pool");

    println!("🚀 Simulated pool {pool} seeded with {SEED_A} WETH / {SEED_B} ABC");
    let client = DexClient::new(config, pool, chain.clone(), Arc::new(chain.wallet(user)));
    client.refresh_state().await?;
    print_current_state(&client).await;

    let quote = client.quote(SwapDirection::AToB, "1", None).await?;
    print_quote(&client, &quote)?;

    let outcome = client.swap(SwapDirection::AToB, "1", None).await?;
    print_execution(&outcome.execution);
    print_current_state(&client).await;

    let amount_b = paired_amount(&client, "2").await?;
    println!("\n➕ Adding 2 WETH and {amount_b} ABC");
    let execution = client.add_liquidity("2", &amount_b, None).await?;
    print_execution(&execution);
    print_current_state(&client).await;

    let held = client
        .snapshot()
        .await
        .map(|s| s.user.liquidity)
        .unwrap_or_default();
    let half = to_display_units(LIQUIDITY_DECIMALS, TokenAmount(held.0 / 2));
    println!("\n➖ Removing {half} shares");
    let execution = client.remove_liquidity(&half, None).await?;
    print_execution(&execution);
    print_current_state(&client).await;

    Ok(())
}
