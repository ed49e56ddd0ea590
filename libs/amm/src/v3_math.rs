//! Uniswap V3 style price, tick and liquidity mathematics in Q96
//!
//! Prices enter as `f64`, cross into integers once (sqrt, scale by 2^96,
//! truncate), and from then on every liquidity and amount calculation is exact
//! integer arithmetic with a floor at each division.

use crate::error::{DomainError, MathResult};
use crate::types::{
    floor_f64_to_u256, q96, q96_f64, u256_to_f64, Amount, Liquidity, Price, PriceRange,
    SqrtPriceQ96, Tick, TICK_BASE,
};
use ethereum_types::{U256, U512};
use tracing::trace;

/// Stateless V3 concentrated-liquidity math
pub struct V3Math;

impl V3Math {
    /// Largest tick whose price does not exceed `price`
    ///
    /// Computed as `floor(ln(price) / ln(1.0001))` in binary floating point. A
    /// price sitting exactly on a tick boundary may land on `tick - 1` because
    /// neither logarithm is exact; that is accepted, not corrected.
    pub fn price_to_tick(price: Price) -> MathResult<Tick> {
        if price.is_nan() {
            return Err(DomainError::NonFinitePrice { price });
        }
        if price <= 0.0 {
            return Err(DomainError::NonPositivePrice { price });
        }
        if price.is_infinite() {
            return Err(DomainError::NonFinitePrice { price });
        }

        // |ln(f64::MAX) / ln(1.0001)| < 7.5e6, well inside i32
        let tick = (price.ln() / TICK_BASE.ln()).floor() as Tick;
        trace!(price, tick, "price_to_tick");
        Ok(tick)
    }

    /// `1.0001^tick`
    pub fn tick_to_price(tick: Tick) -> Price {
        TICK_BASE.powi(tick)
    }

    /// `floor(sqrt(price) * 2^96)`
    ///
    /// The square root is taken in `f64` and scaled before truncation, so the
    /// result carries the precision of an `f64` sqrt (53 significant bits), not
    /// of an exact integer square root.
    pub fn price_to_q96(price: Price) -> MathResult<SqrtPriceQ96> {
        if price.is_nan() || price.is_infinite() {
            return Err(DomainError::NonFinitePrice { price });
        }
        if price < 0.0 {
            return Err(DomainError::NegativePrice { price });
        }

        let sqrt_price = floor_f64_to_u256(price.sqrt() * q96_f64()).map_err(|e| match e {
            DomainError::Overflow { .. } => DomainError::Overflow {
                operation: "price_to_q96",
            },
            other => other,
        })?;
        trace!(price, %sqrt_price, "price_to_q96");
        Ok(sqrt_price)
    }

    /// Sqrt price of a tick, through [`Self::tick_to_price`]
    pub fn tick_to_q96(tick: Tick) -> MathResult<SqrtPriceQ96> {
        Self::price_to_q96(Self::tick_to_price(tick))
    }

    /// `(sqrt_price / 2^96)^2`, approximate
    pub fn q96_to_price(sqrt_price: SqrtPriceQ96) -> Price {
        let sqrt = u256_to_f64(sqrt_price) / q96_f64();
        sqrt * sqrt
    }

    /// Liquidity from depositing only token0 across the range
    ///
    /// `L = (amount0 * (pa * pb) / Q96) / (pb - pa)`
    pub fn liquidity_from_amount0(
        amount0: Amount,
        sqrt_price_a: SqrtPriceQ96,
        sqrt_price_b: SqrtPriceQ96,
    ) -> MathResult<Liquidity> {
        const OP: &str = "liquidity_from_amount0";

        let range = PriceRange::new(sqrt_price_a, sqrt_price_b);
        let width = range.nonzero_width()?;

        let bounds_product = U512::from(range.lower) * U512::from(range.upper);
        let numerator = U512::from(amount0)
            .checked_mul(bounds_product)
            .ok_or(DomainError::Overflow { operation: OP })?;

        let liquidity = numerator / U512::from(q96()) / U512::from(width);
        let liquidity = narrow(liquidity, OP)?;

        trace!(%amount0, lower = %range.lower, upper = %range.upper, %liquidity, "{}", OP);
        Ok(liquidity)
    }

    /// Liquidity from depositing only token1 across the range
    ///
    /// `L = amount1 * Q96 / (pb - pa)`
    pub fn liquidity_from_amount1(
        amount1: Amount,
        sqrt_price_a: SqrtPriceQ96,
        sqrt_price_b: SqrtPriceQ96,
    ) -> MathResult<Liquidity> {
        const OP: &str = "liquidity_from_amount1";

        let range = PriceRange::new(sqrt_price_a, sqrt_price_b);
        let width = range.nonzero_width()?;

        // amount1 < 2^256 and Q96 = 2^96, so the product always fits in 512 bits
        let numerator = U512::from(amount1) * U512::from(q96());
        let liquidity = narrow(numerator / U512::from(width), OP)?;

        trace!(%amount1, lower = %range.lower, upper = %range.upper, %liquidity, "{}", OP);
        Ok(liquidity)
    }

    /// Token0 backing `liquidity` across the range
    ///
    /// `x = L * Q96 * (pb - pa) / pa / pb`, truncated after each division in
    /// that order. Dividing by `pa * pb` in one step can differ by a few units.
    pub fn amount0_from_liquidity(
        liquidity: Liquidity,
        sqrt_price_a: SqrtPriceQ96,
        sqrt_price_b: SqrtPriceQ96,
    ) -> MathResult<Amount> {
        const OP: &str = "amount0_from_liquidity";

        let range = PriceRange::new(sqrt_price_a, sqrt_price_b);
        // upper >= lower, so a zero upper implies a zero lower
        if range.lower.is_zero() {
            return Err(DomainError::ZeroBound);
        }

        let numerator = U512::from(liquidity)
            .checked_mul(U512::from(q96()))
            .and_then(|value| value.checked_mul(U512::from(range.width())))
            .ok_or(DomainError::Overflow { operation: OP })?;

        let amount = numerator / U512::from(range.lower) / U512::from(range.upper);
        let amount = narrow(amount, OP)?;

        trace!(%liquidity, lower = %range.lower, upper = %range.upper, %amount, "{}", OP);
        Ok(amount)
    }

    /// Token1 backing `liquidity` across the range
    ///
    /// `y = L * (pb - pa) / Q96`. A zero-width range yields zero.
    pub fn amount1_from_liquidity(
        liquidity: Liquidity,
        sqrt_price_a: SqrtPriceQ96,
        sqrt_price_b: SqrtPriceQ96,
    ) -> MathResult<Amount> {
        const OP: &str = "amount1_from_liquidity";

        let range = PriceRange::new(sqrt_price_a, sqrt_price_b);

        // both factors are below 2^256
        let numerator = U512::from(liquidity) * U512::from(range.width());
        let amount = narrow(numerator / U512::from(q96()), OP)?;

        trace!(%liquidity, lower = %range.lower, upper = %range.upper, %amount, "{}", OP);
        Ok(amount)
    }
}

fn narrow(value: U512, operation: &'static str) -> MathResult<U256> {
    U256::try_from(value).map_err(|_| DomainError::Overflow { operation })
}
