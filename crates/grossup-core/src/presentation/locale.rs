use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FeeError;
use crate::fees::{FeeConfig, Provider, SettlementKind};
use crate::types::{Money, Rate};

/// Display language. Amounts are always formatted with en-US digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    Ar,
    En,
}

/// One row of the customer payment breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItem {
    ServiceFee,
    Vat,
    TotalServiceFee,
    SettlementFee,
    AmountDue,
    NetProfit,
}

impl Language {
    pub fn toggled(&self) -> Language {
        match self {
            Language::Ar => Language::En,
            Language::En => Language::Ar,
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Ar)
    }

    /// Currency suffix without the leading space.
    pub fn currency(&self) -> &'static str {
        match self {
            Language::Ar => "ر.س",
            Language::En => "SAR",
        }
    }

    pub fn provider_name(&self, provider: Provider) -> &'static str {
        match (self, provider) {
            (Language::Ar, Provider::Tabby) => "تابي",
            (Language::Ar, Provider::Tamara) => "تمارا",
            (Language::En, p) => p.display_name(),
        }
    }

    pub fn bank_transfer(&self) -> &'static str {
        match self {
            Language::Ar => "تحويل بنكي",
            Language::En => "Bank Transfer",
        }
    }

    pub fn combined_title(&self) -> &'static str {
        match self {
            Language::Ar => "تابي / تمارا",
            Language::En => "Tabby / Tamara",
        }
    }

    pub fn line_label(&self, item: LineItem, kind: Option<SettlementKind>, config: &FeeConfig) -> String {
        let cur = self.currency();
        match (self, item) {
            (Language::En, LineItem::ServiceFee) => format!(
                "Service Fee ({}% + {:.1} {cur})",
                percent(config.service_rate, 2),
                config.fixed_fee
            ),
            (Language::Ar, LineItem::ServiceFee) => format!(
                "رسوم الخدمة ({}% + {:.1} {cur})",
                percent(config.service_rate, 2),
                config.fixed_fee
            ),
            (Language::En, LineItem::Vat) => format!("VAT ({}%)", plain_percent(config.vat_rate)),
            (Language::Ar, LineItem::Vat) => {
                format!("ضريبة القيمة المضافة ({}%)", plain_percent(config.vat_rate))
            }
            (Language::En, LineItem::TotalServiceFee) => "Total Service Fees".into(),
            (Language::Ar, LineItem::TotalServiceFee) => "إجمالي رسوم الخدمة".into(),
            (Language::En, LineItem::SettlementFee) => match kind {
                Some(SettlementKind::BankTransfer) => format!(
                    "Bank Transfer Fee ({} {cur})",
                    to_fixed(config.transfer_fee_total)
                ),
                _ => "Settlement Fee (Optional)".into(),
            },
            (Language::Ar, LineItem::SettlementFee) => match kind {
                Some(SettlementKind::BankTransfer) => format!(
                    "رسوم التحويل البنكي ({} {cur})",
                    to_fixed(config.transfer_fee_total)
                ),
                _ => "رسوم التسوية (اختياري)".into(),
            },
            (Language::En, LineItem::AmountDue) => "Amount Customer Pays".into(),
            (Language::Ar, LineItem::AmountDue) => "المبلغ المطلوب من العميل".into(),
            (Language::En, LineItem::NetProfit) => "Net Merchant Profit".into(),
            (Language::Ar, LineItem::NetProfit) => "صافي ربح المتجر".into(),
        }
    }

    /// Formula line for the service fee: `(X x rate) + fixed = fee`.
    pub fn service_fee_detail(&self, gross: &str, fee: &str, config: &FeeConfig) -> String {
        let rate = percent(config.service_rate, 2);
        let fixed = to_fixed(config.fixed_fee);
        let cur = self.currency();
        match self {
            Language::En => {
                format!("Formula: (Amount Due {gross} × {rate}%) + {fixed} = {fee} {cur}")
            }
            Language::Ar => {
                format!("المعادلة: (المبلغ المطلوب {gross} × {rate}%) + {fixed} = {fee} {cur}")
            }
        }
    }

    pub fn vat_detail(&self, base: &str, vat: &str, config: &FeeConfig) -> String {
        let rate = plain_percent(config.vat_rate);
        let cur = self.currency();
        match self {
            Language::En => format!("Formula: (Service Fee {base} × {rate}%) = {vat} {cur}"),
            Language::Ar => format!("المعادلة: (رسوم الخدمة {base} × {rate}%) = {vat} {cur}"),
        }
    }

    pub fn total_service_fee_detail(&self, base: &str, vat: &str, total: &str) -> String {
        let cur = self.currency();
        match self {
            Language::En => format!("Sum: Service Fee ({base}) + VAT ({vat}) = {total} {cur}"),
            Language::Ar => {
                format!("المجموع: رسوم الخدمة ({base}) + الضريبة ({vat}) = {total} {cur}")
            }
        }
    }

    /// Explains which conditional fee applied and why.
    pub fn settlement_detail(
        &self,
        kind: Option<SettlementKind>,
        provider: Provider,
        fee: &str,
        active: bool,
        gross: Money,
        config: &FeeConfig,
    ) -> String {
        let cur = self.currency();
        let threshold = config.settlement_threshold.normalize();
        let name = self.provider_name(provider);
        match (self, kind) {
            (Language::En, Some(SettlementKind::BankTransfer)) => format!(
                "Bank transfer fee (because amount {} {cur} or more): {fee} {cur} (VAT inclusive).",
                format_money(gross)
            ),
            (Language::Ar, Some(SettlementKind::BankTransfer)) => format!(
                "رسوم تحويل بنكي (لأن المبلغ {} ريال أو أكثر): {fee} {cur} (شاملة ضريبة القيمة المضافة).",
                format_money(gross)
            ),
            (Language::En, Some(SettlementKind::ProviderSettlement)) if active => format!(
                "{name} settlement fee (because amount is less than {threshold} {cur}): {fee} {cur}"
            ),
            (Language::En, Some(SettlementKind::ProviderSettlement)) => format!(
                "{name} settlement fee not included (amount is less than {threshold} {cur})."
            ),
            (Language::Ar, Some(SettlementKind::ProviderSettlement)) if active => format!(
                "رسوم تسوية {name} (لأن المبلغ أقل من {threshold} ريال): {fee} {cur}"
            ),
            (Language::Ar, Some(SettlementKind::ProviderSettlement)) => format!(
                "رسوم تسوية {name} غير مضافة (المبلغ أقل من {threshold} ريال)."
            ),
            (Language::En, None) => "No settlement/transfer fee applied.".into(),
            (Language::Ar, None) => "لا توجد رسوم تسوية/تحويل مطبقة.".into(),
        }
    }

    pub fn net_profit_detail(&self, profit: &str) -> String {
        let cur = self.currency();
        match self {
            Language::En => {
                format!("Represents the desired net profit for the store: {profit} {cur}")
            }
            Language::Ar => format!("يمثل صافي الربح المطلوب للمتجر: {profit} {cur}"),
        }
    }

    /// Share template with `{P}`, `{X}` and `{C}` placeholders.
    pub fn share_template(&self) -> &'static str {
        match self {
            Language::Ar => {
                "حاسبة الشروق:\n- صافي ربح المتجر: {P} {C}\n- المبلغ المطلوب من العميل (مع الرسوم): {X} {C}"
            }
            Language::En => {
                "Al-Shorouq Calculator:\n- Store Net Profit: {P} {C}\n- Customer Pays (w/ Fees): {X} {C}"
            }
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Ar => f.write_str("ar"),
            Language::En => f.write_str("en"),
        }
    }
}

impl FromStr for Language {
    type Err = FeeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" => Ok(Language::Ar),
            "en" => Ok(Language::En),
            other => Err(FeeError::InvalidInput {
                field: "language".into(),
                reason: format!("Unsupported language '{other}'. Use: ar, en"),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Two decimals, no grouping (`1234.5` -> `1234.50`).
pub fn to_fixed(value: Decimal) -> String {
    format!("{:.2}", round2(value))
}

/// Two decimals with en-US thousands grouping (`1234.5` -> `1,234.50`).
pub fn format_money(value: Money) -> String {
    let fixed = to_fixed(value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if round2(value) < Decimal::ZERO { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

fn percent(rate: Rate, dp: u32) -> String {
    let pct =
        (rate * dec!(100)).round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, pct)
}

fn plain_percent(rate: Rate) -> String {
    (rate * dec!(100)).normalize().to_string()
}
