use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use grossup_core::presentation::to_fixed;

use super::plain;

/// Fields that answer each command, in priority order.
const ANSWER_KEYS: [&str; 5] = [
    "gross_amount",
    "message",
    "next_settlement_date",
    "transfer_fee_total",
    "language",
];

/// Print just the headline value: the amount the customer pays for a quote,
/// the message for a share, and so on.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_answer(value));
}

fn minimal_answer(value: &Value) -> String {
    if let Some(Value::Array(rows)) = value.get("results") {
        return rows
            .iter()
            .map(|row| {
                format!(
                    "{} {}",
                    plain(&row["provider"]),
                    plain(&row["next_settlement_date"])
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
    }

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result {
        for key in ANSWER_KEYS {
            if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                return match (key, Decimal::from_str(&plain(val))) {
                    ("gross_amount", Ok(amount)) => to_fixed(amount),
                    _ => plain(val),
                };
            }
        }
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, plain(val));
        }
    }

    plain(result)
}
