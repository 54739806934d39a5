use serde_json::{json, Value};

use grossup_core::fees::FeeConfig;

/// Report the fee table together with the derived gross-up terms.
pub fn run_fees(config: &FeeConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let mut result = serde_json::to_value(config)?;
    if let Value::Object(ref mut map) = result {
        map.insert("factor_with_vat".into(), json!(config.factor_with_vat()));
        map.insert("denominator".into(), json!(config.denominator()));
        map.insert("fixed_fee_with_vat".into(), json!(config.fixed_fee_with_vat()));
    }
    Ok(json!({ "result": result }))
}
