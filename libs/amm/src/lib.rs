//! # CLMM AMM Library - Q96 Concentrated Liquidity Mathematics
//!
//! ## Purpose
//!
//! Pure numeric library for concentrated-liquidity AMMs with price ranges.
//! Converts between human-readable prices, tick indices and Q96 fixed-point
//! square-root prices, and derives liquidity and token amounts for a position
//! bounded by a price range.
//!
//! ## Numeric Model
//!
//! - **Price**: `f64`, quote per base
//! - **Tick**: `i32`, `price = 1.0001^tick`, floored
//! - **SqrtPriceQ96 / Liquidity / Amount**: 256-bit unsigned integers
//! - **Intermediates**: 512-bit, overflow reported as [`DomainError::Overflow`]
//! - **Rounding**: truncation toward zero at every integer division
//!
//! ## Integration Points
//!
//! - **Callers** scale token amounts to smallest units before calling in
//! - **Position sizing** via [`PositionSizer`], which takes the minimum of the
//!   two single-sided liquidities; the formulas themselves enforce no policy
//!
//! All functions are stateless and safe to call from any number of threads.

pub mod error;
pub mod position;
pub mod types;
pub mod v3_math;

pub use error::{DomainError, MathResult};
pub use position::{LimitingToken, PositionQuote, PositionSizer};
pub use types::{
    floor_f64_to_u256, q96, q96_f64, tick_in_bounds, u256_to_f64, Amount, Liquidity, Price,
    PriceRange, SqrtPriceQ96, Tick, MAX_TICK, MIN_TICK, RESOLUTION, TICK_BASE,
};
pub use v3_math::V3Math;

/// Common integer types for Q96 calculations
pub use ethereum_types::{U256, U512};
