use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::plain;

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::Array(rows)) = map.get("results") {
                println!("{}", rows_table(rows));
            } else if let Some(result) = map.get("result") {
                print_envelope(result, map);
            } else {
                println!("{}", field_table(map));
            }
        }
        Value::Array(rows) => println!("{}", rows_table(rows)),
        _ => println!("{}", plain(value)),
    }
}

fn print_envelope(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) => println!("{}", field_table(res_map)),
        other => println!("{}", plain(other)),
    }

    // Localised payment breakdown from `quote`
    if let Some(Value::Array(lines)) = envelope.get("breakdown").and_then(|b| b.get("lines")) {
        let currency = envelope["breakdown"]["currency"].as_str().unwrap_or_default();
        let mut builder = Builder::default();
        builder.push_record(["Item", "Amount", "Details"]);
        for line in lines {
            builder.push_record([
                plain(&line["label"]),
                format!("{} {}", plain(&line["value"]), currency),
                plain(&line["detail"]),
            ]);
        }
        println!("\n{}", Table::from(builder));
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(|w| w.as_str()) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn field_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.clone(), plain(val)]);
    }
    Table::from(builder)
}

fn rows_table(rows: &[Value]) -> Table {
    let mut builder = Builder::default();
    if let Some(Value::Object(first)) = rows.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        builder.push_record(headers.clone());
        for row in rows {
            builder.push_record(headers.iter().map(|h| plain(&row[h.as_str()])));
        }
    } else {
        for row in rows {
            builder.push_record([plain(row)]);
        }
    }
    Table::from(builder)
}
