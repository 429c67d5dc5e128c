use alignment::HarmonyTable;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::Config;
use core_types::{TradeAction, TradeRequest, ZodiacSign};
use engine::{MemoryAccountStore, TradingEngine};
use market_data::{StaticDirectory, StaticPriceFeed};
use rust_decimal_macros::dec;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use web_server::AppState;

/// The main entry point for the Astrofolio paper-trading application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if present.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => handle_serve(args).await,
        Commands::Demo(args) => handle_demo(args).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A zodiac-flavored paper-trading engine with alignment-aware valuations.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server.
    Serve(ServeArgs),
    /// Run a scripted trading session and print the resulting portfolio.
    Demo(DemoArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Override the bind address from config.toml (e.g. "0.0.0.0:9000").
    #[arg(long)]
    addr: Option<SocketAddr>,
}

#[derive(Parser)]
struct DemoArgs {
    /// The demo user's zodiac sign.
    #[arg(long, default_value = "leo")]
    sign: String,
}

// ==============================================================================
// Wiring
// ==============================================================================

fn load_config_or_default() -> Config {
    match configuration::load_config() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "Falling back to built-in defaults.");
            Config::default()
        }
    }
}

/// Builds the engine plus the seeded in-memory collaborators it runs on.
fn build_engine(config: &Config) -> (Arc<TradingEngine>, Arc<StaticPriceFeed>) {
    let feed = Arc::new(StaticPriceFeed::new());
    let directory = Arc::new(StaticDirectory::new());

    for listing in &config.listings {
        feed.set_quote(&listing.ticker, listing.price, listing.previous_close);
        directory.assign(&listing.ticker, listing.sign);
    }

    let engine = Arc::new(TradingEngine::new(
        Arc::new(MemoryAccountStore::new()),
        feed.clone(),
        directory,
        Arc::new(HarmonyTable::new()),
    ));
    (engine, feed)
}

// ==============================================================================
// Serve Command Logic
// ==============================================================================

async fn handle_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = load_config_or_default();
    let (engine, _feed) = build_engine(&config);

    let addr = match args.addr {
        Some(addr) => addr,
        None => format!("{}:{}", config.server.host, config.server.port).parse()?,
    };

    let state = Arc::new(AppState {
        engine,
        account_defaults: config.accounts.clone(),
    });

    web_server::run_server(addr, state).await
}

// ==============================================================================
// Demo Command Logic
// ==============================================================================

async fn handle_demo(args: DemoArgs) -> anyhow::Result<()> {
    let mut config = load_config_or_default();
    if config.listings.is_empty() {
        config.listings = demo_listings();
    }
    let (engine, feed) = build_engine(&config);

    let sign: ZodiacSign = args.sign.parse()?;
    let account = engine
        .open_account(sign, config.accounts.initial_cash)
        .await?;
    let id = account.account_id;
    println!(
        "Opened account {} for a {} investor with {} cash.\n",
        id, sign, account.cash_balance
    );

    let script = [
        ("AAPL", TradeAction::Buy, dec!(10), dec!(1750)),
        ("AAPL", TradeAction::Buy, dec!(5), dec!(950)),
        ("TSLA", TradeAction::Buy, dec!(8), dec!(2000)),
        ("NVDA", TradeAction::Buy, dec!(12), dec!(1440)),
        ("AAPL", TradeAction::Sell, dec!(8), dec!(1600)),
    ];

    for (ticker, action, quantity, total_value) in script {
        let receipt = engine
            .execute_trade(
                id,
                TradeRequest {
                    ticker: ticker.to_string(),
                    action,
                    quantity,
                    total_value,
                },
            )
            .await?;
        println!("{}", receipt.message);
    }

    // Let the market drift before the closing valuation.
    feed.set_quote("AAPL", dec!(210), dec!(200));
    feed.set_quote("TSLA", dec!(240), dec!(250));
    feed.set_quote("NVDA", dec!(132), dec!(120));

    let snapshot = engine.portfolio_summary(id).await?;

    let mut table = Table::new();
    table.set_header(vec![
        "Ticker", "Sign", "Element", "Qty", "Avg Cost", "Price", "Value", "Gain/Loss", "Match",
        "Score",
    ]);
    for holding in &snapshot.holdings {
        table.add_row(vec![
            holding.ticker.clone(),
            holding.sign.to_string(),
            holding.element.to_string(),
            holding.quantity.to_string(),
            holding.average_cost_basis.round_dp(2).to_string(),
            holding.current_price.to_string(),
            holding.current_value.round_dp(2).to_string(),
            holding.gain_loss.round_dp(2).to_string(),
            holding
                .match_type
                .map(|m| m.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            holding.alignment_score.to_string(),
        ]);
    }
    println!("\n{table}");

    println!("\nCash balance:        {}", snapshot.cash_balance);
    println!("Stocks value:        {}", snapshot.stocks_value.round_dp(2));
    println!("Total value:         {}", snapshot.total_value.round_dp(2));
    println!(
        "Total gain/loss:     {} ({}%)",
        snapshot.total_gain_loss.round_dp(2),
        snapshot.total_gain_loss_percent.round_dp(2)
    );
    println!("Alignment score:     {}", snapshot.overall_alignment_score);
    println!("Cosmic vibe index:   {}", snapshot.cosmic_vibe_index);
    let dist = snapshot.element_distribution;
    println!(
        "Elements:            Fire {}% / Earth {}% / Air {}% / Water {}%",
        dist.fire, dist.earth, dist.air, dist.water
    );

    Ok(())
}

/// The built-in stock universe used when config.toml supplies no listings.
fn demo_listings() -> Vec<configuration::Listing> {
    use configuration::Listing;
    vec![
        Listing {
            ticker: "AAPL".to_string(),
            sign: ZodiacSign::Virgo,
            price: dec!(190),
            previous_close: dec!(188),
        },
        Listing {
            ticker: "TSLA".to_string(),
            sign: ZodiacSign::Aries,
            price: dec!(250),
            previous_close: dec!(245),
        },
        Listing {
            ticker: "NVDA".to_string(),
            sign: ZodiacSign::Leo,
            price: dec!(120),
            previous_close: dec!(118),
        },
        Listing {
            ticker: "MSFT".to_string(),
            sign: ZodiacSign::Gemini,
            price: dec!(410),
            previous_close: dec!(405),
        },
        Listing {
            ticker: "JPM".to_string(),
            sign: ZodiacSign::Capricorn,
            price: dec!(210),
            previous_close: dec!(207),
        },
    ]
}
