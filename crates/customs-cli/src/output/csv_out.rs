use serde_json::Value;
use std::io;

use super::flatten_fields;

/// Write output as two-column (field, value) CSV to stdout, suitable for
/// pasting into a spreadsheet. Envelopes contribute only their `result`
/// section; nested breakdowns flatten to dotted keys.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let fields = match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => flatten_fields(result),
            _ => flatten_fields(map),
        },
        other => vec![("value".to_string(), other.clone())],
    };

    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in fields {
        let _ = wtr.write_record([key.as_str(), &render(&val)]);
    }

    let _ = wtr.flush();
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
