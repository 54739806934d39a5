//! Property-based tests for the fee solver.
//!
//! Invariants checked across randomized net amounts, providers and opt-in
//! flags:
//! - The customer is never charged less than the requested net profit
//! - Fee components are never negative
//! - Gross minus all fees reproduces the net profit within a cent
//! - The bracket follows the provisional gross with `>=` semantics
//! - Monotonic gross amount when the optional settlement fee is off

use grossup_core::fees::{compute, FeeConfig, GrossUpInput, Provider, SettlementKind};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ============================================================================
// Strategies
// ============================================================================

/// Net profit in cents, 0.00 to 100,000.00
fn net_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn provider_strategy() -> impl Strategy<Value = Provider> {
    prop_oneof![Just(Provider::Tabby), Just(Provider::Tamara)]
}

fn solve(net: Decimal, provider: Provider, include_settlement: bool) -> grossup_core::fees::CalculationResult {
    compute(
        &GrossUpInput::new(net, provider, include_settlement),
        &FeeConfig::default(),
    )
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_gross_never_below_net(
        net in net_strategy(),
        provider in provider_strategy(),
        include in any::<bool>(),
    ) {
        let result = solve(net, provider, include);
        prop_assert!(result.gross_amount >= net, "gross {} < net {}", result.gross_amount, net);
    }

    #[test]
    fn prop_fees_non_negative(
        net in net_strategy(),
        provider in provider_strategy(),
        include in any::<bool>(),
    ) {
        let result = solve(net, provider, include);
        prop_assert!(result.service_fee_base >= Decimal::ZERO);
        prop_assert!(result.vat_on_service_fee >= Decimal::ZERO);
        prop_assert!(result.total_service_fee >= Decimal::ZERO);
        prop_assert!(result.settlement_or_transfer_fee >= Decimal::ZERO);
    }

    #[test]
    fn prop_round_trip_within_a_cent(
        net in net_strategy(),
        provider in provider_strategy(),
        include in any::<bool>(),
    ) {
        let result = solve(net, provider, include);
        let diff = (result.net_after_fees() - net).abs();
        prop_assert!(diff <= dec!(0.01), "round trip off by {}", diff);
    }

    #[test]
    fn prop_zero_net_has_no_fees(
        provider in provider_strategy(),
        include in any::<bool>(),
    ) {
        let result = solve(Decimal::ZERO, provider, include);
        prop_assert_eq!(result.gross_amount, Decimal::ZERO);
        prop_assert_eq!(result.total_fees(), Decimal::ZERO);
        prop_assert_eq!(result.settlement_kind, None);
        prop_assert!(!result.settlement_fee_active);
    }

    #[test]
    fn prop_bracket_follows_provisional_gross(
        net in net_strategy(),
        provider in provider_strategy(),
        include in any::<bool>(),
    ) {
        let config = FeeConfig::default();
        let result = solve(net, provider, include);
        if net > Decimal::ZERO {
            let expect_bank = result.provisional_gross >= config.settlement_threshold;
            prop_assert_eq!(
                result.settlement_kind == Some(SettlementKind::BankTransfer),
                expect_bank
            );
            if expect_bank {
                prop_assert_eq!(result.settlement_or_transfer_fee, config.transfer_fee_total);
                prop_assert!(result.gross_amount >= config.settlement_threshold);
            }
        }
    }

    #[test]
    fn prop_active_flag_matches_fee(
        net in net_strategy(),
        provider in provider_strategy(),
        include in any::<bool>(),
    ) {
        let result = solve(net, provider, include);
        prop_assert_eq!(
            result.settlement_fee_active,
            result.settlement_or_transfer_fee > Decimal::ZERO
        );
    }

    #[test]
    fn prop_monotonic_without_opt_in(
        a in net_strategy(),
        b in net_strategy(),
        provider in provider_strategy(),
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let low = solve(lo, provider, false);
        let high = solve(hi, provider, false);
        prop_assert!(high.gross_amount >= low.gross_amount);
    }

    #[test]
    fn prop_monotonic_within_bracket_with_opt_in(
        a in net_strategy(),
        b in net_strategy(),
        provider in provider_strategy(),
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let low = solve(lo, provider, true);
        let high = solve(hi, provider, true);
        if low.settlement_kind == high.settlement_kind {
            prop_assert!(high.gross_amount >= low.gross_amount);
        }
    }

    #[test]
    fn prop_deterministic(
        net in net_strategy(),
        provider in provider_strategy(),
        include in any::<bool>(),
    ) {
        prop_assert_eq!(solve(net, provider, include), solve(net, provider, include));
    }
}

#[test]
fn test_opt_in_gross_drops_when_bank_transfer_takes_over() {
    // With the optional provider fee grossed up, the switch to the cheaper
    // transfer fee at the threshold lowers the gross amount.
    let config = FeeConfig::default();
    let net_at = |gross: Decimal| gross * config.denominator() - config.fixed_fee_with_vat();
    let below = solve(net_at(dec!(2499.99)), Provider::Tabby, true);
    let at = solve(net_at(dec!(2500)), Provider::Tabby, true);
    assert!(at.gross_amount < below.gross_amount);
}
