//! Size a concentrated-liquidity position from a scenario file
//!
//! Usage:
//!   position_demo
//!   position_demo --config config/scenarios/eth_usdc.toml
//!   position_demo --print-default > my_scenario.toml

use amm::{PositionSizer, V3Math};
use anyhow::{Context, Result};
use clap::Parser;
use clmm_config::ScenarioConfig;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "position_demo")]
#[command(about = "Size a CLMM position from a price range and two deposit amounts")]
#[command(version)]
struct Args {
    /// Scenario TOML; the built-in ETH/USDC scenario when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Print the default scenario as TOML and exit
    #[arg(long)]
    print_default: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_default {
        print!("{}", ScenarioConfig::default().to_toml_string()?);
        return Ok(());
    }

    init_logging(&args);

    let scenario = ScenarioConfig::load(args.config.as_deref()).map_err(|e| {
        error!("Failed to load scenario: {:#}", e);
        e
    })?;
    let inputs = scenario.position_inputs()?;

    info!(
        "Scenario {}/{}: range {}..{}, current {}",
        scenario.token0.symbol,
        scenario.token1.symbol,
        scenario.position.lower_price,
        scenario.position.upper_price,
        scenario.position.current_price
    );

    let sizer =
        PositionSizer::from_prices(inputs.lower_price, inputs.current_price, inputs.upper_price)
            .context("Invalid price range")?;
    let range = sizer.range();

    for (label, price, sqrt_price) in [
        ("lower", inputs.lower_price, range.lower),
        ("current", inputs.current_price, sizer.current()),
        ("upper", inputs.upper_price, range.upper),
    ] {
        info!(
            "{:>7}: price={} tick={} sqrt_price_x96={}",
            label,
            price,
            V3Math::price_to_tick(price)?,
            sqrt_price
        );
    }
    let quote = sizer
        .quote(inputs.amount0, inputs.amount1)
        .context("Failed to size position")?;

    info!("liquidity0 ({}): {}", scenario.token0.symbol, quote.liquidity0);
    info!("liquidity1 ({}): {}", scenario.token1.symbol, quote.liquidity1);
    info!("liquidity: {} (limited by {:?})", quote.liquidity, quote.limiting_token());
    info!(
        "required: {} {} (offered {}), {} {} (offered {})",
        quote.amount0,
        scenario.token0.symbol,
        inputs.amount0,
        quote.amount1,
        scenario.token1.symbol,
        inputs.amount1
    );

    Ok(())
}

fn init_logging(args: &Args) {
    let log_level = match args.log_level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };

    tracing_subscriber::fmt().with_max_level(log_level).init();
}
