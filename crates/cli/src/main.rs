//! Command Line Interface for the SimpleDEX client.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dex_client::prelude::*;
use dex_domain::prelude::*;
use dex_protocols::prelude::*;
use dotenv::dotenv;
use prettytable::{Table, row};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod demo;

#[derive(Parser)]
#[command(name = "dex-cli")]
#[command(about = "Client for a SimpleDEX constant-product pool", long_about = None)]
struct Cli {
    /// Node JSON-RPC endpoint (overrides DEX_RPC_URL)
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Pool address (overrides DEX_POOL and the address file)
    #[arg(long, global = true)]
    pool: Option<Address>,

    /// Deployment address file (overrides DEX_ADDRESSES)
    #[arg(long, global = true)]
    addresses: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Direction {
    /// Sell token A for token B
    AToB,
    /// Sell token B for token A
    BToA,
}

impl From<Direction> for SwapDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::AToB => SwapDirection::AToB,
            Direction::BToA => SwapDirection::BToA,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run a swap and a liquidity round trip against an in-memory pool
    Demo {
        /// Swap fee charged by the simulated pool, in basis points
        #[arg(long, default_value_t = 0)]
        fee_bps: u32,
    },
    #[command(flatten)]
    Live(LiveCommand),
}

/// Commands that talk to a node.
#[derive(Subcommand)]
enum LiveCommand {
    /// Show reserves, balances and liquidity of the connected account
    State {
        /// Print the state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Quote a swap without sending anything
    Quote {
        #[arg(short, long, value_enum, default_value = "a-to-b")]
        direction: Direction,

        /// Input amount in token units (e.g. 1.5)
        #[arg(short, long)]
        amount: String,

        /// Slippage tolerance in percent (e.g. 0.5)
        #[arg(short, long)]
        slippage: Option<SlippageTolerance>,
    },
    /// Approve the input token and swap
    Swap {
        #[arg(short, long, value_enum, default_value = "a-to-b")]
        direction: Direction,

        /// Input amount in token units
        #[arg(short, long)]
        amount: String,

        /// Slippage tolerance in percent
        #[arg(short, long)]
        slippage: Option<SlippageTolerance>,
    },
    /// Approve both tokens and deposit them
    AddLiquidity {
        /// Token A amount
        #[arg(long)]
        amount_a: String,

        /// Token B amount; derived from the pool ratio when omitted
        #[arg(long)]
        amount_b: Option<String>,

        /// Slippage tolerance in percent
        #[arg(short, long)]
        slippage: Option<SlippageTolerance>,
    },
    /// Burn liquidity shares
    RemoveLiquidity {
        /// Shares to burn
        #[arg(long)]
        shares: String,

        /// Slippage tolerance in percent
        #[arg(short, long)]
        slippage: Option<SlippageTolerance>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.rpc_url {
        config.rpc.url = url.clone();
    }
    if let Some(pool) = cli.pool {
        config.pool = Some(pool);
    }
    if let Some(path) = &cli.addresses {
        config.addresses_path = path.clone();
    }

    match &cli.command {
        Commands::Demo { fee_bps } => demo::run(config, *fee_bps).await?,
        Commands::Live(command) => {
            let (client, provider) = connect(&config).await?;
            run_live(command, &client, &provider).await?;
        }
    }

    Ok(())
}

async fn connect(config: &ClientConfig) -> Result<(DexClient, Arc<RpcProvider>)> {
    let provider = Arc::new(RpcProvider::new(config.rpc.clone())?);
    let wallet = NodeWallet::connect(provider.clone())
        .await
        .with_context(|| format!("no usable account on {}", config.rpc.url))?;
    let pool = config
        .pool_address()
        .await
        .context("pool address not configured")?;

    println!("📡 Connected to {} as {}", config.rpc.url, wallet_account(&wallet));
    let client = DexClient::new(config.clone(), pool, provider.clone(), Arc::new(wallet));
    Ok((client, provider))
}

fn wallet_account(wallet: &NodeWallet) -> String {
    wallet
        .account()
        .map(|a| a.to_string())
        .unwrap_or_else(|| "-".to_string())
}

async fn run_live(
    command: &LiveCommand,
    client: &DexClient,
    provider: &RpcProvider,
) -> Result<()> {
    match command {
        LiveCommand::State { json } => {
            client.refresh_state().await?;
            let state = client
                .formatted_state()
                .await
                .context("state not available")?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                let block = provider.block_number().await?;
                print_state(&state, Some(block));
            }
        }
        LiveCommand::Quote {
            direction,
            amount,
            slippage,
        } => {
            let quote = client.quote((*direction).into(), amount, *slippage).await?;
            print_quote(client, &quote)?;
        }
        LiveCommand::Swap {
            direction,
            amount,
            slippage,
        } => {
            let outcome = client.swap((*direction).into(), amount, *slippage).await?;
            print_quote(client, &outcome.quote)?;
            print_execution(&outcome.execution);
            print_current_state(client).await;
        }
        LiveCommand::AddLiquidity {
            amount_a,
            amount_b,
            slippage,
        } => {
            let amount_b = match amount_b {
                Some(amount) => amount.clone(),
                None => paired_amount(client, amount_a).await?,
            };
            let execution = client.add_liquidity(amount_a, &amount_b, *slippage).await?;
            print_execution(&execution);
            print_current_state(client).await;
        }
        LiveCommand::RemoveLiquidity { shares, slippage } => {
            let execution = client.remove_liquidity(shares, *slippage).await?;
            print_execution(&execution);
            print_current_state(client).await;
        }
    }
    Ok(())
}

/// Token B amount matching `amount_a` at the current pool ratio.
pub(crate) async fn paired_amount(client: &DexClient, amount_a: &str) -> Result<String> {
    client.refresh_state().await?;
    let paired = client
        .paired_deposit(SwapDirection::AToB, amount_a)
        .await?
        .context("pool is empty, pass --amount-b to set the initial ratio")?;
    let pair = client.bootstrap().await?;
    Ok(pair.token_b.to_display_units(paired))
}

pub(crate) fn print_quote(client: &DexClient, quote: &Quote) -> Result<()> {
    let pair = client.tokens().context("token metadata not loaded")?;
    let token_in = pair.input(quote.direction);
    let token_out = pair.output(quote.direction);

    println!("\n💱 Quote {}", quote.direction);
    println!("════════════════════════════════════");
    println!(
        "In:          {} {}",
        token_in.to_display_units(quote.amount_in),
        token_in.symbol
    );
    println!(
        "Out:         {} {}",
        token_out.to_display_units(quote.amount_out),
        token_out.symbol
    );
    println!(
        "Minimum out: {} {} ({} slippage)",
        token_out.to_display_units(quote.minimum_out),
        token_out.symbol,
        quote.slippage
    );
    if let Some(rate) = quote.rate(pair) {
        println!(
            "Rate:        1 {} ≈ {} {}",
            token_in.symbol,
            rate.round_dp(6).normalize(),
            token_out.symbol
        );
    }
    println!("════════════════════════════════════");
    Ok(())
}

pub(crate) fn print_execution(execution: &Execution) {
    for grant in &execution.approvals {
        println!(
            "✅ Approved {} {} (tx {})",
            grant.approval.token.to_display_units(grant.approval.amount),
            grant.approval.token.symbol,
            grant.receipt.tx_hash
        );
    }
    println!(
        "✅ Mined in block {} (tx {}, gas {})",
        execution.receipt.block_number, execution.receipt.tx_hash, execution.receipt.gas_used
    );
}

pub(crate) async fn print_current_state(client: &DexClient) {
    match client.formatted_state().await {
        Some(state) => print_state(&state, None),
        None => println!("❌ Pool state unavailable"),
    }
}

pub(crate) fn print_state(state: &FormattedState, block: Option<u64>) {
    match block {
        Some(block) => println!("\n📊 Pool state at block {block}"),
        None => println!("\n📊 Pool state"),
    }
    let mut table = Table::new();
    table.add_row(row!["", state.symbol_a, state.symbol_b]);
    table.add_row(row!["Reserves", state.reserve_a, state.reserve_b]);
    table.add_row(row!["Your balance", state.balance_a, state.balance_b]);
    table.printstd();
    println!(
        "Liquidity: {} of {} shares ({}% of the pool)",
        state.liquidity, state.total_liquidity, state.pool_share
    );
}
