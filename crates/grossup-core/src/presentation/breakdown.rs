use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::locale::{format_money, Language, LineItem};
use crate::fees::{CalculationResult, FeeConfig};
use crate::types::{Money, Rate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownLine {
    pub item: LineItem,
    pub label: String,
    /// Amount formatted to two decimals with grouping
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Localised, display-ready view of a [`CalculationResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub language: Language,
    pub currency: String,
    pub provider_label: Option<String>,
    pub amount_due: String,
    pub lines: Vec<BreakdownLine>,
    /// Share of the gross amount the merchant keeps, in percent
    pub profit_pct: Rate,
    /// Share of the gross amount consumed by fees, in percent
    pub fees_pct: Rate,
}

impl Breakdown {
    pub fn from_result(result: &CalculationResult, config: &FeeConfig, language: Language) -> Self {
        let gross = format_money(result.gross_amount);
        let base = format_money(result.service_fee_base);
        let vat = format_money(result.vat_on_service_fee);
        let total = format_money(result.total_service_fee);
        let fee = format_money(result.settlement_or_transfer_fee);
        let profit = format_money(result.net_profit_input);
        let kind = result.settlement_kind;

        let line = |item: LineItem, value: &str, detail: Option<String>| BreakdownLine {
            item,
            label: language.line_label(item, kind, config),
            value: value.to_string(),
            detail,
        };

        let lines = vec![
            line(
                LineItem::ServiceFee,
                &base,
                Some(language.service_fee_detail(&gross, &base, config)),
            ),
            line(
                LineItem::Vat,
                &vat,
                Some(language.vat_detail(&base, &vat, config)),
            ),
            line(
                LineItem::TotalServiceFee,
                &total,
                Some(language.total_service_fee_detail(&base, &vat, &total)),
            ),
            line(
                LineItem::SettlementFee,
                &fee,
                Some(language.settlement_detail(
                    kind,
                    result.provider,
                    &fee,
                    result.settlement_fee_active,
                    result.gross_amount,
                    config,
                )),
            ),
            line(LineItem::AmountDue, &gross, None),
            line(
                LineItem::NetProfit,
                &profit,
                Some(language.net_profit_detail(&profit)),
            ),
        ];

        let (profit_pct, fees_pct) = payment_split(result);

        Self {
            language,
            currency: language.currency().to_string(),
            provider_label: localized_provider_label(result, language),
            amount_due: gross,
            lines,
            profit_pct,
            fees_pct,
        }
    }

    pub fn line(&self, item: LineItem) -> Option<&BreakdownLine> {
        self.lines.iter().find(|l| l.item == item)
    }
}

fn localized_provider_label(result: &CalculationResult, language: Language) -> Option<String> {
    use crate::fees::SettlementKind;
    match result.settlement_kind {
        Some(SettlementKind::BankTransfer) => Some(language.bank_transfer().to_string()),
        Some(SettlementKind::ProviderSettlement) => {
            Some(language.provider_name(result.provider).to_string())
        }
        None => None,
    }
}

/// Profit and fee shares of the gross amount, in percent, rounded to one
/// decimal and capped to [0, 100].
pub fn payment_split(result: &CalculationResult) -> (Rate, Rate) {
    let gross: Money = result.gross_amount;
    let (profit, fees) = if gross > Decimal::ZERO {
        (
            result.net_profit_input / gross * dec!(100),
            result.total_fees() / gross * dec!(100),
        )
    } else if result.net_profit_input > Decimal::ZERO {
        (dec!(100), Decimal::ZERO)
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };
    (clamp_pct(profit), clamp_pct(fees))
}

fn clamp_pct(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO).min(dec!(100)).round_dp(1)
}
