pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Flatten one level of nested objects into dotted keys, so the landed-cost
/// breakdown's embedded `taxes` record renders as ordinary rows.
pub(crate) fn flatten_fields(map: &serde_json::Map<String, Value>) -> Vec<(String, Value)> {
    let mut fields = Vec::new();
    for (key, val) in map {
        match val {
            Value::Object(inner) => {
                for (inner_key, inner_val) in inner {
                    fields.push((format!("{}.{}", key, inner_key), inner_val.clone()));
                }
            }
            _ => fields.push((key.clone(), val.clone())),
        }
    }
    fields
}
