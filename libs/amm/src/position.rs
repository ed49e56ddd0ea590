//! Position sizing for a two-sided deposit into a price range
//!
//! The core formulas are single-sided. Sizing a real deposit computes the
//! liquidity each token could support on its own side of the current price and
//! keeps the smaller one, then asks how much of each token that liquidity
//! actually needs. Callers are free to apply a different policy; nothing in
//! [`V3Math`] depends on this module.

use crate::error::MathResult;
use crate::types::{Amount, Liquidity, Price, PriceRange, SqrtPriceQ96};
use crate::V3Math;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of sizing a deposit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionQuote {
    /// Liquidity token0 alone supports over `[current, upper]`
    pub liquidity0: Liquidity,
    /// Liquidity token1 alone supports over `[lower, current]`
    pub liquidity1: Liquidity,
    /// `min(liquidity0, liquidity1)`
    pub liquidity: Liquidity,
    /// Token0 required by `liquidity`
    pub amount0: Amount,
    /// Token1 required by `liquidity`
    pub amount1: Amount,
}

impl PositionQuote {
    /// Which token limits the position
    pub fn limiting_token(&self) -> LimitingToken {
        if self.liquidity0 <= self.liquidity1 {
            LimitingToken::Token0
        } else {
            LimitingToken::Token1
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitingToken {
    Token0,
    Token1,
}

/// Sizes deposits for one range at one current price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionSizer {
    range: PriceRange,
    current: SqrtPriceQ96,
}

impl PositionSizer {
    /// Range bounds may be given in either order
    pub fn new(lower: SqrtPriceQ96, current: SqrtPriceQ96, upper: SqrtPriceQ96) -> Self {
        Self {
            range: PriceRange::new(lower, upper),
            current,
        }
    }

    /// Build from human-readable prices
    pub fn from_prices(lower: Price, current: Price, upper: Price) -> MathResult<Self> {
        Ok(Self::new(
            V3Math::price_to_q96(lower)?,
            V3Math::price_to_q96(current)?,
            V3Math::price_to_q96(upper)?,
        ))
    }

    pub fn range(&self) -> PriceRange {
        self.range
    }

    pub fn current(&self) -> SqrtPriceQ96 {
        self.current
    }

    /// Size a deposit of up to `amount0` token0 and `amount1` token1
    pub fn quote(&self, amount0: Amount, amount1: Amount) -> MathResult<PositionQuote> {
        let liquidity0 = V3Math::liquidity_from_amount0(amount0, self.current, self.range.upper)?;
        let liquidity1 = V3Math::liquidity_from_amount1(amount1, self.current, self.range.lower)?;
        let liquidity = liquidity0.min(liquidity1);

        let amount0 = V3Math::amount0_from_liquidity(liquidity, self.range.upper, self.current)?;
        let amount1 = V3Math::amount1_from_liquidity(liquidity, self.range.lower, self.current)?;

        debug!(
            %liquidity0,
            %liquidity1,
            %liquidity,
            %amount0,
            %amount1,
            "Sized position"
        );

        Ok(PositionQuote {
            liquidity0,
            liquidity1,
            liquidity,
            amount0,
            amount1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;
    use ethereum_types::U256;

    fn eth_usdc() -> PositionSizer {
        PositionSizer::from_prices(4545.0, 5000.0, 5500.0).unwrap()
    }

    #[test]
    fn test_quote_matches_reference_scenario() {
        let quote = eth_usdc()
            .quote(U256::exp10(18), U256::from(5000u64) * U256::exp10(18))
            .unwrap();

        assert_eq!(quote.liquidity, quote.liquidity1);
        assert_eq!(quote.limiting_token(), LimitingToken::Token1);
        assert_eq!(
            quote.liquidity,
            U256::from_dec_str("1517882343751509783892").unwrap()
        );
        assert_eq!(
            quote.amount0,
            U256::from_dec_str("998976618347425273").unwrap()
        );
        assert_eq!(
            quote.amount1,
            U256::from_dec_str("4999999999999999999999").unwrap()
        );
    }

    #[test]
    fn test_quote_never_exceeds_deposit() {
        let amount0 = U256::exp10(18);
        let amount1 = U256::from(5000u64) * U256::exp10(18);
        let quote = eth_usdc().quote(amount0, amount1).unwrap();

        assert!(quote.amount0 <= amount0);
        assert!(quote.amount1 <= amount1);
    }

    #[test]
    fn test_bounds_order_is_irrelevant() {
        let forward = eth_usdc();
        let reversed = PositionSizer::from_prices(5500.0, 5000.0, 4545.0).unwrap();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_current_on_bound_is_zero_width() {
        let sizer = PositionSizer::from_prices(4545.0, 5500.0, 5500.0).unwrap();
        assert_eq!(
            sizer.quote(U256::exp10(18), U256::exp10(18)),
            Err(DomainError::ZeroWidthRange)
        );
    }

    #[test]
    fn test_negative_price_rejected() {
        assert!(matches!(
            PositionSizer::from_prices(-1.0, 5000.0, 5500.0),
            Err(DomainError::NegativePrice { .. })
        ));
    }
}
