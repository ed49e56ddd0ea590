//! Scenario Configuration Module
//!
//! Loads a position scenario from TOML with environment overrides and
//! converts its human-readable values into math library inputs.
//! Overrides use the `CLMM_` prefix and `__` between nested keys, e.g.
//! `CLMM_POSITION__CURRENT_PRICE=5200`.

use crate::defaults::{self, ENV_PREFIX, ENV_SEPARATOR, MAX_TOKEN_DECIMALS};
use amm::{Amount, Price, U256};
use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File, FileFormat};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Complete position scenario
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ScenarioConfig {
    /// Base token
    pub token0: TokenConfig,

    /// Quote token
    pub token1: TokenConfig,

    /// Range and deposit
    pub position: PositionConfig,
}

/// Token metadata needed to scale amounts
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TokenConfig {
    pub symbol: String,
    pub decimals: u32,
}

/// Price range, current price and desired deposit, in human units
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PositionConfig {
    pub lower_price: Decimal,
    pub current_price: Decimal,
    pub upper_price: Decimal,
    pub amount0: Decimal,
    pub amount1: Decimal,
}

/// Scenario values converted for the math library
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionInputs {
    pub lower_price: Price,
    pub current_price: Price,
    pub upper_price: Price,
    pub amount0: Amount,
    pub amount1: Amount,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            token0: TokenConfig {
                symbol: defaults::token0::SYMBOL.to_string(),
                decimals: defaults::token0::DECIMALS,
            },
            token1: TokenConfig {
                symbol: defaults::token1::SYMBOL.to_string(),
                decimals: defaults::token1::DECIMALS,
            },
            position: PositionConfig {
                lower_price: Decimal::from(defaults::position::LOWER_PRICE),
                current_price: Decimal::from(defaults::position::CURRENT_PRICE),
                upper_price: Decimal::from(defaults::position::UPPER_PRICE),
                amount0: Decimal::from(defaults::position::AMOUNT0),
                amount1: Decimal::from(defaults::position::AMOUNT1),
            },
        }
    }
}

impl ScenarioConfig {
    /// Load the default scenario, overlaid by `path` if given, then by
    /// `CLMM_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = toml::to_string(&Self::default())
            .context("Failed to serialize default scenario")?;

        let mut builder =
            Config::builder().add_source(File::from_str(&defaults, FileFormat::Toml));

        if let Some(path) = path {
            info!("Loading scenario config: {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

        let scenario: Self = builder
            .build()
            .context("Failed to build scenario configuration")?
            .try_deserialize()
            .context("Failed to deserialize scenario configuration")?;

        scenario.validate()?;
        debug!(?scenario, "Scenario loaded");
        Ok(scenario)
    }

    /// Parse a scenario from a TOML string, without defaults or overrides
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let scenario: Self = toml::from_str(content).context("Failed to parse scenario TOML")?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize scenario")
    }

    /// Reject scenarios the position sizer cannot use
    pub fn validate(&self) -> Result<()> {
        self.token0.validate()?;
        self.token1.validate()?;

        let p = &self.position;
        if p.lower_price <= Decimal::ZERO {
            bail!("Lower price must be positive, got {}", p.lower_price);
        }
        if !(p.lower_price < p.current_price && p.current_price < p.upper_price) {
            bail!(
                "Prices must satisfy lower < current < upper, got {} / {} / {}",
                p.lower_price,
                p.current_price,
                p.upper_price
            );
        }
        if p.amount0.is_sign_negative() || p.amount1.is_sign_negative() {
            bail!("Deposit amounts must be non-negative");
        }
        Ok(())
    }

    /// Prices as floats and amounts in smallest units
    pub fn position_inputs(&self) -> Result<PositionInputs> {
        let p = &self.position;
        Ok(PositionInputs {
            lower_price: decimal_to_price(p.lower_price)?,
            current_price: decimal_to_price(p.current_price)?,
            upper_price: decimal_to_price(p.upper_price)?,
            amount0: self
                .token0
                .to_smallest_units(p.amount0)
                .with_context(|| format!("Invalid {} amount", self.token0.symbol))?,
            amount1: self
                .token1
                .to_smallest_units(p.amount1)
                .with_context(|| format!("Invalid {} amount", self.token1.symbol))?,
        })
    }
}

impl TokenConfig {
    fn validate(&self) -> Result<()> {
        if self.decimals > MAX_TOKEN_DECIMALS {
            bail!(
                "Token {} decimals {} exceed maximum {}",
                self.symbol,
                self.decimals,
                MAX_TOKEN_DECIMALS
            );
        }
        Ok(())
    }

    /// Scale a human amount by `10^decimals`
    ///
    /// Fails on negative amounts, on precision finer than one smallest unit,
    /// and on results wider than 256 bits.
    pub fn to_smallest_units(&self, amount: Decimal) -> Result<Amount> {
        if amount.is_sign_negative() && !amount.is_zero() {
            bail!("Amount must be non-negative, got {}", amount);
        }
        self.validate()?;

        let amount = amount.normalize();
        let mantissa = U256::from(amount.mantissa().unsigned_abs());
        let scale = amount.scale();

        if scale > self.decimals {
            let divisor = U256::exp10((scale - self.decimals) as usize);
            if !(mantissa % divisor).is_zero() {
                bail!(
                    "Amount {} has more than {} decimal places",
                    amount,
                    self.decimals
                );
            }
            return Ok(mantissa / divisor);
        }

        mantissa
            .checked_mul(U256::exp10((self.decimals - scale) as usize))
            .with_context(|| format!("Amount {} overflows 256 bits", amount))
    }
}

fn decimal_to_price(value: Decimal) -> Result<Price> {
    value
        .to_f64()
        .with_context(|| format!("Price {} is not representable as f64", value))
}
