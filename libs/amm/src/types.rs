//! Value types and the float/integer boundary for Q96 math
//!
//! Prices are plain `f64` values. Sqrt prices, liquidity and token amounts are
//! 256-bit unsigned integers; products between them are widened to 512 bits by
//! the formulas in [`crate::v3_math`]. The only place a float becomes an integer
//! is [`floor_f64_to_u256`].

use crate::error::{DomainError, MathResult};
use ethereum_types::U256;
use serde::{Deserialize, Serialize};

/// Quote-per-base exchange rate
pub type Price = f64;

/// Index into price space such that `price = 1.0001^tick`
pub type Tick = i32;

/// `sqrt(price) * 2^96`, truncated toward zero
pub type SqrtPriceQ96 = U256;

/// Concentrated liquidity parameter `L`
pub type Liquidity = U256;

/// Token quantity in the token's smallest indivisible unit
pub type Amount = U256;

/// Fractional bits of the sqrt price encoding
pub const RESOLUTION: u32 = 96;

/// Base of the tick exponent
pub const TICK_BASE: f64 = 1.0001;

/// Lowest tick a pool accepts
pub const MIN_TICK: Tick = -887272;

/// Highest tick a pool accepts
pub const MAX_TICK: Tick = 887272;

/// `2^96` as a 256-bit integer
pub fn q96() -> U256 {
    U256::one() << RESOLUTION as usize
}

/// `2^96` as a float; exact since it is a power of two
pub fn q96_f64() -> f64 {
    2f64.powi(RESOLUTION as i32)
}

/// Whether `tick` lies inside `[MIN_TICK, MAX_TICK]`
pub fn tick_in_bounds(tick: Tick) -> bool {
    (MIN_TICK..=MAX_TICK).contains(&tick)
}

/// Sqrt-price bounds of a position, always stored with `lower <= upper`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RangeBounds")]
pub struct PriceRange {
    pub lower: SqrtPriceQ96,
    pub upper: SqrtPriceQ96,
}

#[derive(Deserialize)]
struct RangeBounds {
    lower: SqrtPriceQ96,
    upper: SqrtPriceQ96,
}

impl From<RangeBounds> for PriceRange {
    fn from(bounds: RangeBounds) -> Self {
        Self::new(bounds.lower, bounds.upper)
    }
}

impl PriceRange {
    /// Build a range from bounds given in either order
    pub fn new(a: SqrtPriceQ96, b: SqrtPriceQ96) -> Self {
        if a > b {
            Self { lower: b, upper: a }
        } else {
            Self { lower: a, upper: b }
        }
    }

    /// `upper - lower`; never underflows
    pub fn width(&self) -> U256 {
        self.upper - self.lower
    }

    /// Width for use as a divisor
    pub fn nonzero_width(&self) -> MathResult<U256> {
        let width = self.width();
        if width.is_zero() {
            return Err(DomainError::ZeroWidthRange);
        }
        Ok(width)
    }

    pub fn is_empty(&self) -> bool {
        self.lower == self.upper
    }

    /// Whether `sqrt_price` is inside the closed range
    pub fn contains(&self, sqrt_price: SqrtPriceQ96) -> bool {
        self.lower <= sqrt_price && sqrt_price <= self.upper
    }
}

/// Truncate a non-negative float toward zero into a 256-bit integer
///
/// The IEEE-754 value is decomposed into its 53-bit significand and binary
/// exponent, so the conversion is exact: the result is the integer part of
/// `value` with no intermediate rounding.
pub fn floor_f64_to_u256(value: f64) -> MathResult<U256> {
    if !value.is_finite() {
        return Err(DomainError::NonFinitePrice { price: value });
    }
    if value < 0.0 {
        return Err(DomainError::NegativePrice { price: value });
    }
    if value < 1.0 {
        return Ok(U256::zero());
    }

    let bits = value.to_bits();
    // value >= 1.0 is always a normal number, so the implicit bit is set
    let exponent = ((bits >> 52) & 0x7ff) as i32 - 1075;
    let significand = (bits & ((1u64 << 52) - 1)) | (1u64 << 52);

    if exponent >= 0 {
        if exponent > 256 - 53 {
            return Err(DomainError::Overflow {
                operation: "floor_f64_to_u256",
            });
        }
        Ok(U256::from(significand) << exponent as usize)
    } else {
        Ok(U256::from(significand >> (-exponent) as u32))
    }
}

/// Approximate `f64` of a 256-bit integer (for reporting, not for exact math)
pub fn u256_to_f64(value: U256) -> f64 {
    let limb_scale = 2f64.powi(64);
    value
        .0
        .iter()
        .rev()
        .fold(0.0, |acc, limb| acc * limb_scale + *limb as f64)
}
