use grossup_core::fees::{
    calculate_gross_up, compute, parse_net_profit, FeeConfig, GrossUpInput, Provider,
    SettlementKind,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn config() -> FeeConfig {
    FeeConfig::standard().unwrap()
}

fn assert_close(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

/// Net amount whose provisional gross (no conditional fee) is exactly `gross`.
fn net_for_provisional(gross: Decimal, cfg: &FeeConfig) -> Decimal {
    gross * cfg.denominator() - cfg.fixed_fee_with_vat()
}

// ===========================================================================
// Zero and invalid input
// ===========================================================================

#[test]
fn test_zero_net_profit_zeroes_everything() {
    let result = compute(&GrossUpInput::new(Decimal::ZERO, Provider::Tabby, true), &config());

    assert_eq!(result.net_profit_input, Decimal::ZERO);
    assert_eq!(result.gross_amount, Decimal::ZERO);
    assert_eq!(result.service_fee_base, Decimal::ZERO);
    assert_eq!(result.vat_on_service_fee, Decimal::ZERO);
    assert_eq!(result.total_service_fee, Decimal::ZERO);
    assert_eq!(result.settlement_or_transfer_fee, Decimal::ZERO);
    assert_eq!(result.settlement_kind, None);
    assert_eq!(result.provider_label, None);
    assert!(!result.settlement_fee_active);
}

#[test]
fn test_garbage_and_negative_text_degrade_to_zero() {
    let cfg = config();
    for raw in ["", "abc", "-250", "12abc", "∞"] {
        let result = compute(&GrossUpInput::from_raw(raw, Provider::Tamara, true), &cfg);
        assert_eq!(result.gross_amount, Decimal::ZERO, "input {raw:?}");
        assert_eq!(result.settlement_kind, None, "input {raw:?}");
    }
    assert_eq!(parse_net_profit("0012.50"), dec!(12.5));
}

// ===========================================================================
// Provider settlement bracket
// ===========================================================================

#[test]
fn test_tabby_without_settlement_fee() {
    // X = (100 + 1.5 * 1.15) / (1 - 0.0699 * 1.15) = 101.725 / 0.919615
    let result = compute(&GrossUpInput::new(dec!(100), Provider::Tabby, false), &config());

    assert_close(result.gross_amount, dec!(110.6169), dec!(0.0001));
    assert_eq!(result.settlement_or_transfer_fee, Decimal::ZERO);
    assert_eq!(result.settlement_kind, Some(SettlementKind::ProviderSettlement));
    assert_eq!(result.provider_label.as_deref(), Some("Tabby"));
    assert!(!result.settlement_fee_active);

    // Service fee = X * 6.99% + 1.50, VAT = 15% of that
    assert_close(result.service_fee_base, dec!(9.2321), dec!(0.0001));
    assert_close(result.vat_on_service_fee, dec!(1.3848), dec!(0.0001));
    assert_eq!(
        result.total_service_fee,
        result.service_fee_base + result.vat_on_service_fee
    );
}

#[test]
fn test_tabby_with_settlement_fee() {
    let cfg = config();
    let without = compute(&GrossUpInput::new(dec!(100), Provider::Tabby, false), &cfg);
    let with = compute(&GrossUpInput::new(dec!(100), Provider::Tabby, true), &cfg);

    assert_eq!(with.settlement_or_transfer_fee, dec!(28.75));
    assert!(with.settlement_fee_active);
    assert_eq!(with.settlement_kind, Some(SettlementKind::ProviderSettlement));

    // The difference is the settlement fee grossed up by the denominator
    assert_close(
        with.gross_amount - without.gross_amount,
        dec!(28.75) / cfg.denominator(),
        dec!(0.0000001),
    );
    assert_close(with.gross_amount, dec!(141.88), dec!(0.01));
}

#[test]
fn test_tamara_settlement_fee() {
    let result = compute(&GrossUpInput::new(dec!(100), Provider::Tamara, true), &config());
    assert_eq!(result.settlement_or_transfer_fee, dec!(25.00));
    assert_eq!(result.provider_label.as_deref(), Some("Tamara"));
    assert!(result.settlement_fee_active);
}

// ===========================================================================
// Bank transfer bracket
// ===========================================================================

#[test]
fn test_large_sale_uses_bank_transfer() {
    for include_settlement in [false, true] {
        let result = compute(
            &GrossUpInput::new(dec!(2600), Provider::Tamara, include_settlement),
            &config(),
        );
        assert_eq!(result.settlement_kind, Some(SettlementKind::BankTransfer));
        assert_eq!(result.settlement_or_transfer_fee, dec!(6.90));
        assert_eq!(result.provider_label.as_deref(), Some("Bank Transfer"));
        assert!(result.settlement_fee_active);
        assert!(result.provisional_gross > dec!(2500));
        assert_close(result.gross_amount, dec!(2836.65), dec!(0.01));
    }
}

#[test]
fn test_threshold_is_inclusive() {
    let cfg = config();

    let at = compute(
        &GrossUpInput::new(net_for_provisional(dec!(2500), &cfg), Provider::Tabby, false),
        &cfg,
    );
    assert_eq!(at.provisional_gross, dec!(2500));
    assert_eq!(at.settlement_kind, Some(SettlementKind::BankTransfer));

    let below = compute(
        &GrossUpInput::new(net_for_provisional(dec!(2499.99), &cfg), Provider::Tabby, false),
        &cfg,
    );
    assert_eq!(below.provisional_gross, dec!(2499.99));
    assert_eq!(below.settlement_kind, Some(SettlementKind::ProviderSettlement));
    assert_eq!(below.settlement_or_transfer_fee, Decimal::ZERO);

    let above = compute(
        &GrossUpInput::new(net_for_provisional(dec!(2500.01), &cfg), Provider::Tabby, false),
        &cfg,
    );
    assert_eq!(above.settlement_kind, Some(SettlementKind::BankTransfer));
    assert_eq!(above.settlement_or_transfer_fee, cfg.transfer_fee_total);
}

#[test]
fn test_threshold_switch_replaces_settlement_fee() {
    let cfg = config();
    let below = compute(
        &GrossUpInput::new(net_for_provisional(dec!(2499.99), &cfg), Provider::Tabby, true),
        &cfg,
    );
    let above = compute(
        &GrossUpInput::new(net_for_provisional(dec!(2500), &cfg), Provider::Tabby, true),
        &cfg,
    );
    assert_eq!(below.settlement_or_transfer_fee, dec!(28.75));
    assert_eq!(above.settlement_or_transfer_fee, dec!(6.90));
}

#[test]
fn test_bank_transfer_bracket_is_stable_between_passes() {
    // Adding the transfer fee only raises the gross amount, so the final
    // amount stays above the threshold whenever the provisional one is.
    let cfg = config();
    for gross in [dec!(2500), dec!(2500.01), dec!(3000), dec!(100000)] {
        let result = compute(
            &GrossUpInput::new(net_for_provisional(gross, &cfg), Provider::Tamara, false),
            &cfg,
        );
        assert!(result.gross_amount >= cfg.settlement_threshold);
        assert!(!result.crossed_threshold(&cfg));
    }
}

#[test]
fn test_without_opt_in_passes_agree_below_threshold() {
    let cfg = config();
    let result = compute(
        &GrossUpInput::new(net_for_provisional(dec!(2499.99), &cfg), Provider::Tabby, false),
        &cfg,
    );
    assert_eq!(result.gross_amount, result.provisional_gross);
    assert!(!result.crossed_threshold(&cfg));
}

// ===========================================================================
// Round trip and envelope
// ===========================================================================

#[test]
fn test_round_trip_reproduces_net_profit() {
    let cfg = config();
    for net in [dec!(0.01), dec!(1), dec!(99.99), dec!(2297.3125), dec!(10000)] {
        for provider in Provider::ALL {
            for include_settlement in [false, true] {
                let result = compute(&GrossUpInput::new(net, provider, include_settlement), &cfg);
                assert_close(result.net_after_fees(), net, dec!(0.01));
            }
        }
    }
}

#[test]
fn test_calculate_gross_up_envelope() {
    let out = calculate_gross_up(
        &GrossUpInput::new(dec!(2600), Provider::Tabby, false),
        &config(),
    )
    .unwrap();

    assert!(out.methodology.contains("gross-up"));
    assert!(out.warnings.is_empty());
    assert_eq!(out.assumptions["settlement_threshold"], "2500");
    assert_eq!(out.result.settlement_kind, Some(SettlementKind::BankTransfer));
}

#[test]
fn test_result_serializes_snake_case_kind() {
    let result = compute(&GrossUpInput::new(dec!(2600), Provider::Tabby, false), &config());
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["settlement_kind"], "bank_transfer");
    assert_eq!(json["provider"], "tabby");

    let zero = compute(&GrossUpInput::new(Decimal::ZERO, Provider::Tabby, false), &config());
    let json = serde_json::to_value(&zero).unwrap();
    assert!(json["settlement_kind"].is_null());
}
