use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use std::time::Instant;

use super::config::FeeConfig;
use super::provider::Provider;
use crate::types::*;
use crate::FeeResult;

/// Solved amounts below this are treated as a degenerate (zero) charge.
const MIN_CHARGE: Money = dec!(0.01);

pub const BANK_TRANSFER_LABEL: &str = "Bank Transfer";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which conditional fee the solve ended up charging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementKind {
    /// Gross amount at or above the threshold: mandatory bank transfer fee
    BankTransfer,
    /// Gross amount below the threshold: optional provider settlement fee
    ProviderSettlement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrossUpInput {
    /// Net amount the merchant wants to keep. Accepts a JSON number or raw
    /// text; anything unparseable becomes zero and negatives clamp to zero.
    #[serde(deserialize_with = "deserialize_net_profit", default)]
    pub net_profit: Money,
    #[serde(default)]
    pub provider: Provider,
    /// Gross up the provider settlement fee (below-threshold amounts only)
    #[serde(default)]
    pub include_settlement: bool,
}

impl GrossUpInput {
    pub fn new(net_profit: Money, provider: Provider, include_settlement: bool) -> Self {
        Self {
            net_profit: net_profit.max(Decimal::ZERO),
            provider,
            include_settlement,
        }
    }

    /// Build from raw user text, sanitising it the same way as JSON input.
    pub fn from_raw(raw: &str, provider: Provider, include_settlement: bool) -> Self {
        Self::new(parse_net_profit(raw), provider, include_settlement)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Requested net amount, clamped to >= 0
    pub net_profit_input: Money,
    /// Amount the customer is charged
    pub gross_amount: Money,
    /// Gross amount solved without any settlement/transfer fee; decides the branch
    pub provisional_gross: Money,
    /// gross x service_rate + fixed_fee
    pub service_fee_base: Money,
    pub vat_on_service_fee: Money,
    pub total_service_fee: Money,
    pub settlement_or_transfer_fee: Money,
    pub settlement_kind: Option<SettlementKind>,
    /// True only when a non-zero conditional fee was charged
    pub settlement_fee_active: bool,
    pub provider: Provider,
    /// Who the conditional fee is attributed to; None when no branch applies
    pub provider_label: Option<String>,
}

impl CalculationResult {
    /// Service fee plus conditional fee.
    pub fn total_fees(&self) -> Money {
        self.total_service_fee + self.settlement_or_transfer_fee
    }

    /// What the merchant keeps out of `gross_amount`; equals the requested
    /// net profit up to rounding.
    pub fn net_after_fees(&self) -> Money {
        self.gross_amount - self.total_fees()
    }

    /// Whether the final gross landed in a different bracket than the
    /// provisional solve that selected the branch.
    pub fn crossed_threshold(&self, config: &FeeConfig) -> bool {
        if self.settlement_kind.is_none() {
            return false;
        }
        let provisional_above = self.provisional_gross >= config.settlement_threshold;
        let final_above = self.gross_amount >= config.settlement_threshold;
        provisional_above != final_above
    }
}

/// Outcome of the bracket selection (step 2).
#[derive(Debug, Clone)]
struct SettlementSelection {
    kind: Option<SettlementKind>,
    fee: Money,
    active: bool,
    label: Option<String>,
}

// ---------------------------------------------------------------------------
// Input sanitation
// ---------------------------------------------------------------------------

/// Parse raw net-profit text. Empty or non-numeric text yields zero and
/// negative amounts clamp to zero.
pub fn parse_net_profit(raw: &str) -> Money {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO)
}

fn deserialize_net_profit<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => parse_net_profit(&n.to_string()),
        serde_json::Value::String(s) => parse_net_profit(&s),
        _ => Decimal::ZERO,
    })
}

// ---------------------------------------------------------------------------
// Main calculation
// ---------------------------------------------------------------------------

/// Solve `X - (X*r + F)(1 + v) - S = P` for the gross amount `X`.
///
/// Returns `P` unchanged when there is nothing to gross up or the
/// denominator is not positive, and `None` when the solve overflows.
fn invert(net: Money, conditional_fee: Money, config: &FeeConfig) -> Option<Money> {
    let denominator = config.denominator();
    if net > Decimal::ZERO && denominator > Decimal::ZERO {
        net.checked_add(config.fixed_fee_with_vat())?
            .checked_add(conditional_fee)?
            .checked_div(denominator)
            .map(|gross| gross.max(net))
    } else {
        Some(net)
    }
}

/// Service fee base, its VAT and their sum for a solved gross amount.
fn service_fees(gross: Money, config: &FeeConfig) -> Option<(Money, Money, Money)> {
    let base = gross
        .checked_mul(config.service_rate)?
        .checked_add(config.fixed_fee)?;
    let vat = base.checked_mul(config.vat_rate)?;
    Some((base, vat, base.checked_add(vat)?))
}

fn select_settlement(
    provisional_gross: Money,
    input: &GrossUpInput,
    config: &FeeConfig,
) -> SettlementSelection {
    if provisional_gross >= config.settlement_threshold {
        SettlementSelection {
            kind: Some(SettlementKind::BankTransfer),
            fee: config.transfer_fee_total,
            active: true,
            label: Some(BANK_TRANSFER_LABEL.to_string()),
        }
    } else if provisional_gross > Decimal::ZERO {
        let fee = if input.include_settlement {
            config.settlement_fee(input.provider)
        } else {
            Decimal::ZERO
        };
        SettlementSelection {
            kind: Some(SettlementKind::ProviderSettlement),
            fee,
            active: input.include_settlement,
            label: Some(input.provider.display_name().to_string()),
        }
    } else {
        SettlementSelection {
            kind: None,
            fee: Decimal::ZERO,
            active: false,
            label: None,
        }
    }
}

/// Gross up a requested net profit into the amount the customer must pay.
///
/// Two passes of the same inversion: the first ignores the conditional fee
/// and decides the fee bracket, the second includes the selected fee. Never
/// fails; a net profit too large to gross up within `Decimal` range is
/// treated like unparseable input and solves as zero.
pub fn compute(input: &GrossUpInput, config: &FeeConfig) -> CalculationResult {
    let net = input.net_profit.max(Decimal::ZERO);
    match solve(net, input, config) {
        Some(result) => result,
        None => {
            tracing::warn!(net = %net, "net profit out of range, treating as zero");
            unsolved(input.provider)
        }
    }
}

fn solve(net: Money, input: &GrossUpInput, config: &FeeConfig) -> Option<CalculationResult> {
    // Step 1: provisional solve without any conditional fee
    let provisional_gross = invert(net, Decimal::ZERO, config)?;

    // Step 2: choose the bracket from the provisional amount
    let mut selection = select_settlement(provisional_gross, input, config);
    tracing::debug!(
        net = %net,
        provisional = %provisional_gross,
        kind = ?selection.kind,
        fee = %selection.fee,
        "settlement bracket selected"
    );

    // Step 3: final solve including the selected fee
    let mut gross = net;
    let mut service_fee_base = Decimal::ZERO;
    let mut vat_on_service_fee = Decimal::ZERO;
    let mut total_service_fee = Decimal::ZERO;

    if net > Decimal::ZERO && config.denominator() > Decimal::ZERO {
        gross = invert(net, selection.fee, config)?;
        if gross >= MIN_CHARGE {
            (service_fee_base, vat_on_service_fee, total_service_fee) =
                service_fees(gross, config)?;
        } else {
            tracing::debug!(net = %net, gross = %gross, "sub-cent solve, charging net amount");
            gross = net;
            if net.is_zero() {
                selection.fee = Decimal::ZERO;
                selection.active = false;
                selection.kind = None;
            }
        }
    }

    let fee = selection.fee.max(Decimal::ZERO);
    Some(CalculationResult {
        net_profit_input: net,
        gross_amount: gross.max(Decimal::ZERO),
        provisional_gross: provisional_gross.max(Decimal::ZERO),
        service_fee_base: service_fee_base.max(Decimal::ZERO),
        vat_on_service_fee: vat_on_service_fee.max(Decimal::ZERO),
        total_service_fee: total_service_fee.max(Decimal::ZERO),
        settlement_or_transfer_fee: fee,
        settlement_kind: selection.kind,
        settlement_fee_active: selection.active && fee > Decimal::ZERO,
        provider: input.provider,
        provider_label: selection.label,
    })
}

/// The zero-input result, used when the requested amount cannot be solved.
fn unsolved(provider: Provider) -> CalculationResult {
    CalculationResult {
        net_profit_input: Decimal::ZERO,
        gross_amount: Decimal::ZERO,
        provisional_gross: Decimal::ZERO,
        service_fee_base: Decimal::ZERO,
        vat_on_service_fee: Decimal::ZERO,
        total_service_fee: Decimal::ZERO,
        settlement_or_transfer_fee: Decimal::ZERO,
        settlement_kind: None,
        settlement_fee_active: false,
        provider,
        provider_label: None,
    }
}

/// Validated, enveloped gross-up with methodology, assumptions and warnings.
pub fn calculate_gross_up(
    input: &GrossUpInput,
    config: &FeeConfig,
) -> FeeResult<ComputationOutput<CalculationResult>> {
    let start = Instant::now();
    config.validate()?;

    let mut warnings: Vec<String> = Vec::new();
    if input.net_profit < Decimal::ZERO {
        warnings.push(format!(
            "Negative net profit {} clamped to zero",
            input.net_profit
        ));
    }

    let result = compute(input, config);
    if input.net_profit > Decimal::ZERO && result.net_profit_input.is_zero() {
        warnings.push(format!(
            "Net profit {} is too large to gross up and was treated as zero",
            input.net_profit
        ));
    }

    if result.crossed_threshold(config) {
        tracing::warn!(
            provisional = %result.provisional_gross,
            gross = %result.gross_amount,
            threshold = %config.settlement_threshold,
            "gross amount crossed the settlement threshold after including the settlement fee"
        );
        warnings.push(format!(
            "Gross amount {} is on the other side of the {} threshold than the provisional amount {}; \
             the bracket chosen from the provisional amount was kept",
            result.gross_amount.round_dp(2),
            config.settlement_threshold,
            result.provisional_gross.round_dp(2)
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Reverse fee gross-up: X = (P + F(1+v) + S) / (1 - r(1+v)), bracket chosen from the provisional X without S",
        config,
        warnings,
        elapsed,
        result,
    ))
}
