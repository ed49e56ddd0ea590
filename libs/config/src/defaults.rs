//! Default scenario values
//!
//! The reference position: 1 ETH and 5000 USDC deposited into the
//! 4545..5500 range with the pool at 5000. Both tokens use 18 decimals so the
//! amounts line up with the worked example in the math library tests.

/// Environment variable prefix for scenario overrides
pub const ENV_PREFIX: &str = "CLMM";

/// Separator between nested keys in environment overrides
pub const ENV_SEPARATOR: &str = "__";

/// Largest decimals value whose scale factor fits in 256 bits
pub const MAX_TOKEN_DECIMALS: u32 = 77;

pub mod token0 {
    pub const SYMBOL: &str = "ETH";
    pub const DECIMALS: u32 = 18;
}

pub mod token1 {
    pub const SYMBOL: &str = "USDC";
    pub const DECIMALS: u32 = 18;
}

pub mod position {
    pub const LOWER_PRICE: i64 = 4545;
    pub const CURRENT_PRICE: i64 = 5000;
    pub const UPPER_PRICE: i64 = 5500;
    pub const AMOUNT0: i64 = 1;
    pub const AMOUNT1: i64 = 5000;
}
