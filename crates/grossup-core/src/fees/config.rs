use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::provider::Provider;
use crate::error::FeeError;
use crate::types::{Money, Rate};
use crate::FeeResult;

pub const SERVICE_RATE: Rate = dec!(0.0699);
pub const FIXED_FEE: Money = dec!(1.50);
pub const VAT_RATE: Rate = dec!(0.15);
pub const SETTLEMENT_TABBY: Money = dec!(28.75);
pub const SETTLEMENT_TAMARA: Money = dec!(25.00);
pub const TRANSFER_FEE_BASE: Money = dec!(6.00);
pub const SETTLEMENT_THRESHOLD: Money = dec!(2500);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Flat per-cycle settlement fee charged by each provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettlementFees {
    pub tabby: Money,
    pub tamara: Money,
}

impl ProviderSettlementFees {
    pub fn get(&self, provider: Provider) -> Money {
        match provider {
            Provider::Tabby => self.tabby,
            Provider::Tamara => self.tamara,
        }
    }
}

impl Default for ProviderSettlementFees {
    fn default() -> Self {
        Self {
            tabby: SETTLEMENT_TABBY,
            tamara: SETTLEMENT_TAMARA,
        }
    }
}

/// Process-wide fee table.
///
/// Built once at startup and never mutated. `transfer_fee_total` is rounded
/// to two decimals at construction and reused verbatim by every solve, since
/// threshold comparisons depend on that exact value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeConfig {
    /// Percentage of the gross amount charged as service fee
    pub service_rate: Rate,
    /// Flat per-transaction fee, before VAT
    pub fixed_fee: Money,
    /// VAT applied to the service fee
    pub vat_rate: Rate,
    pub settlement_fees: ProviderSettlementFees,
    /// Bank transfer fee before VAT
    pub transfer_fee_base: Money,
    /// Bank transfer fee including VAT, rounded to two decimals
    pub transfer_fee_total: Money,
    /// Gross amount at or above which the bank transfer fee replaces the
    /// provider settlement fee
    pub settlement_threshold: Money,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            service_rate: SERVICE_RATE,
            fixed_fee: FIXED_FEE,
            vat_rate: VAT_RATE,
            settlement_fees: ProviderSettlementFees::default(),
            transfer_fee_base: TRANSFER_FEE_BASE,
            transfer_fee_total: transfer_fee_total(TRANSFER_FEE_BASE, VAT_RATE),
            settlement_threshold: SETTLEMENT_THRESHOLD,
        }
    }
}

// ---------------------------------------------------------------------------
// Construction and validation
// ---------------------------------------------------------------------------

impl FeeConfig {
    /// Build and validate a fee table, deriving the VAT-inclusive transfer fee.
    pub fn new(
        service_rate: Rate,
        fixed_fee: Money,
        vat_rate: Rate,
        settlement_fees: ProviderSettlementFees,
        transfer_fee_base: Money,
        settlement_threshold: Money,
    ) -> FeeResult<Self> {
        let config = Self {
            service_rate,
            fixed_fee,
            vat_rate,
            settlement_fees,
            transfer_fee_base,
            transfer_fee_total: transfer_fee_total(transfer_fee_base, vat_rate),
            settlement_threshold,
        };
        config.validate()?;
        Ok(config)
    }

    /// The shipped constants, validated. Intended to be called once at startup.
    pub fn standard() -> FeeResult<Self> {
        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FeeResult<()> {
        if self.service_rate < Decimal::ZERO || self.service_rate >= Decimal::ONE {
            return Err(invalid(
                "service_rate",
                "Service rate must be in [0, 1)".into(),
            ));
        }
        if self.vat_rate < Decimal::ZERO {
            return Err(invalid("vat_rate", "VAT rate cannot be negative".into()));
        }
        if self.fixed_fee < Decimal::ZERO {
            return Err(invalid("fixed_fee", "Fixed fee cannot be negative".into()));
        }
        for provider in Provider::ALL {
            if self.settlement_fees.get(provider) < Decimal::ZERO {
                return Err(invalid(
                    "settlement_fees",
                    format!("{provider} settlement fee cannot be negative"),
                ));
            }
        }
        if self.transfer_fee_base < Decimal::ZERO {
            return Err(invalid(
                "transfer_fee_base",
                "Transfer fee cannot be negative".into(),
            ));
        }
        let expected_total = transfer_fee_total(self.transfer_fee_base, self.vat_rate);
        if self.transfer_fee_total != expected_total {
            return Err(invalid(
                "transfer_fee_total",
                format!(
                    "Transfer fee total {} does not match base x (1 + VAT) = {}",
                    self.transfer_fee_total, expected_total
                ),
            ));
        }
        if self.settlement_threshold <= Decimal::ZERO {
            return Err(invalid(
                "settlement_threshold",
                "Settlement threshold must be greater than zero".into(),
            ));
        }
        if self.denominator() <= Decimal::ZERO {
            return Err(invalid(
                "service_rate",
                format!(
                    "Service rate {} x (1 + VAT {}) must be below 1; the gross-up denominator is {}",
                    self.service_rate,
                    self.vat_rate,
                    self.denominator()
                ),
            ));
        }
        tracing::debug!(
            service_rate = %self.service_rate,
            vat_rate = %self.vat_rate,
            transfer_fee_total = %self.transfer_fee_total,
            threshold = %self.settlement_threshold,
            "fee configuration validated"
        );
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Derived terms of the gross-up formula
    // -----------------------------------------------------------------------

    pub fn factor_with_vat(&self) -> Decimal {
        Decimal::ONE + self.vat_rate
    }

    /// `1 - service_rate * (1 + vat_rate)`; positive for every valid config.
    pub fn denominator(&self) -> Decimal {
        Decimal::ONE - self.service_rate * self.factor_with_vat()
    }

    pub fn fixed_fee_with_vat(&self) -> Money {
        self.fixed_fee * self.factor_with_vat()
    }

    pub fn settlement_fee(&self, provider: Provider) -> Money {
        self.settlement_fees.get(provider)
    }
}

/// Transfer fee including VAT, rounded half away from zero to two decimals.
pub fn transfer_fee_total(base: Money, vat_rate: Rate) -> Money {
    (base * (Decimal::ONE + vat_rate))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn invalid(field: &str, reason: String) -> FeeError {
    FeeError::InvalidConfig {
        field: field.into(),
        reason,
    }
}
