use serde_json::Value;
use std::io;

use super::plain;

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    for record in csv_records(value) {
        let _ = wtr.write_record(&record);
    }
    let _ = wtr.flush();
}

/// Rows for CSV output: `results` arrays become one row per entry, anything
/// else becomes two-column `field,value` pairs from the `result` section.
fn csv_records(value: &Value) -> Vec<Vec<String>> {
    if let Some(Value::Array(rows)) = value.get("results") {
        let Some(Value::Object(first)) = rows.first() else {
            return rows.iter().map(|r| vec![plain(r)]).collect();
        };
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut records = vec![headers.clone()];
        records.extend(
            rows.iter()
                .map(|row| headers.iter().map(|h| plain(&row[h.as_str()])).collect()),
        );
        return records;
    }

    let section = value.get("result").unwrap_or(value);
    match section {
        Value::Object(map) => {
            let mut records = vec![vec!["field".to_string(), "value".to_string()]];
            records.extend(map.iter().map(|(k, v)| vec![k.clone(), plain(v)]));
            records
        }
        other => vec![vec![plain(other)]],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_section_as_field_value_pairs() {
        let value = json!({ "result": { "gross_amount": "110.6", "settlement_kind": null } });
        let records = csv_records(&value);
        assert_eq!(records[0], vec!["field", "value"]);
        assert!(records.contains(&vec!["gross_amount".to_string(), "110.6".to_string()]));
        assert!(records.contains(&vec!["settlement_kind".to_string(), String::new()]));
    }

    #[test]
    fn test_results_rows() {
        let value = json!({ "results": [{ "provider": "tabby" }, { "provider": "tamara" }] });
        let records = csv_records(&value);
        assert_eq!(records.len(), 3);
        assert_eq!(records[2], vec!["tamara"]);
    }
}
