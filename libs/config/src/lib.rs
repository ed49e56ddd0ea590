//! # CLMM Scenario Configuration
//!
//! Configuration for drivers that size concentrated-liquidity positions.
//! The math library itself takes no configuration; this crate turns a TOML
//! scenario (token decimals, price range, deposit amounts) into the scaled
//! integer and float inputs the library expects.
//!
//! ## Usage
//!
//! ```no_run
//! use clmm_config::ScenarioConfig;
//! use std::path::Path;
//!
//! let scenario = ScenarioConfig::load(Some(Path::new("config/scenarios/eth_usdc.toml")))?;
//! let inputs = scenario.position_inputs()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod defaults;
pub mod scenario_config;

pub use scenario_config::{PositionConfig, PositionInputs, ScenarioConfig, TokenConfig};
