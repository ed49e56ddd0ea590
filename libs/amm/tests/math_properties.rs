//! Q96 Math Property Tests
//!
//! Properties that must hold for every valid input, independent of the
//! reference scenario.

use amm::{DomainError, V3Math, U256};
use proptest::prelude::*;

/// Sqrt prices spanning roughly 1e-12..1e12 in price terms
fn sqrt_price() -> impl Strategy<Value = U256> {
    (1e-12f64..1e12f64).prop_map(|price| V3Math::price_to_q96(price).unwrap())
}

/// Amounts up to 10^30 smallest units
fn amount() -> impl Strategy<Value = U256> {
    (any::<u64>(), 0u64..1_000_000_000_000)
        .prop_map(|(low, high)| U256::from(high) * U256::exp10(18) + U256::from(low))
}

proptest! {
    #[test]
    fn prop_tick_round_trip(tick in -400_000i32..400_000) {
        let recovered = V3Math::price_to_tick(V3Math::tick_to_price(tick)).unwrap();
        prop_assert!(recovered == tick || recovered == tick - 1,
            "tick {} recovered as {}", tick, recovered);
    }

    #[test]
    fn prop_tick_monotonic(a in 1e-30f64..1e30, b in 1e-30f64..1e30) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(V3Math::price_to_tick(low).unwrap() <= V3Math::price_to_tick(high).unwrap());
    }

    #[test]
    fn prop_q96_monotonic(a in 0f64..1e30, b in 0f64..1e30) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(V3Math::price_to_q96(low).unwrap() <= V3Math::price_to_q96(high).unwrap());
    }

    #[test]
    fn prop_non_positive_price_rejected(price in -1e30f64..=0.0) {
        prop_assert!(
            matches!(
                V3Math::price_to_tick(price),
                Err(DomainError::NonPositivePrice { .. })
            ),
            "price {} should be rejected",
            price
        );
    }

    #[test]
    fn prop_formulas_order_independent(
        amt in amount(),
        pa in sqrt_price(),
        pb in sqrt_price(),
    ) {
        prop_assume!(pa != pb);

        prop_assert_eq!(
            V3Math::liquidity_from_amount0(amt, pa, pb),
            V3Math::liquidity_from_amount0(amt, pb, pa)
        );
        prop_assert_eq!(
            V3Math::liquidity_from_amount1(amt, pa, pb),
            V3Math::liquidity_from_amount1(amt, pb, pa)
        );
        prop_assert_eq!(
            V3Math::amount0_from_liquidity(amt, pa, pb),
            V3Math::amount0_from_liquidity(amt, pb, pa)
        );
        prop_assert_eq!(
            V3Math::amount1_from_liquidity(amt, pa, pb),
            V3Math::amount1_from_liquidity(amt, pb, pa)
        );
    }

    #[test]
    fn prop_amount1_round_trip_never_exceeds_input(
        amt in amount(),
        pa in sqrt_price(),
        pb in sqrt_price(),
    ) {
        prop_assume!(pa != pb);

        let liquidity = V3Math::liquidity_from_amount1(amt, pa, pb).unwrap();
        let recovered = V3Math::amount1_from_liquidity(liquidity, pb, pa).unwrap();
        prop_assert!(recovered <= amt);
    }

    #[test]
    fn prop_amount0_round_trip_never_exceeds_input(
        amt in amount(),
        pa in sqrt_price(),
        pb in sqrt_price(),
    ) {
        prop_assume!(pa != pb);

        let liquidity = V3Math::liquidity_from_amount0(amt, pa, pb).unwrap();
        let recovered = V3Math::amount0_from_liquidity(liquidity, pb, pa).unwrap();
        prop_assert!(recovered <= amt);
    }

    #[test]
    fn prop_zero_width_always_rejected(amt in amount(), p in sqrt_price()) {
        prop_assert_eq!(
            V3Math::liquidity_from_amount0(amt, p, p),
            Err(DomainError::ZeroWidthRange)
        );
        prop_assert_eq!(
            V3Math::liquidity_from_amount1(amt, p, p),
            Err(DomainError::ZeroWidthRange)
        );
        prop_assert_eq!(V3Math::amount1_from_liquidity(amt, p, p), Ok(U256::zero()));
    }
}
