use super::locale::{to_fixed, Language};
use crate::fees::CalculationResult;

/// Text handed to an external share target: requested net profit and the
/// amount the customer pays, both to two decimals.
pub fn share_message(result: &CalculationResult, language: Language) -> String {
    language
        .share_template()
        .replace("{P}", &to_fixed(result.net_profit_input))
        .replace("{X}", &to_fixed(result.gross_amount))
        .replace("{C}", language.currency())
}
