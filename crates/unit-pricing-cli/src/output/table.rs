use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use unit_pricing_core::format::format_amount;
use unit_pricing_core::Money;

/// Render command output as tables.
///
/// Quotes show the formatted breakdown and one row per frequency; schedules
/// show one row per installment; anything else falls back to field/value rows.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::Object(display)) = map.get("display") {
                println!("{}", field_table(display));
                if let Some(plans) = map.get("result").and_then(|r| r.get("plans")) {
                    println!("\n{}", plans_table(plans));
                }
            } else if let Some(Value::Object(result)) = map.get("result") {
                println!("{}", field_table(result));
            } else {
                println!("{}", field_table(map));
            }
            print_footer(map);
        }
        Value::Array(rows) if rows.is_empty() => println!("(no installments)"),
        Value::Array(rows) => println!("{}", schedule_table(rows)),
        _ => println!("{}", value),
    }
}

fn field_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([label(key), cell(val)]);
    }
    builder.build()
}

fn plans_table(plans: &Value) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Frequency", "Per year", "Installments", "Amount"]);
    if let Value::Object(plans) = plans {
        for plan in plans.values() {
            builder.push_record([
                cell(&plan["frequency"]),
                cell(&plan["installments_per_year"]),
                cell(&plan["total_installment_count"]),
                amount_cell(&plan["per_installment_amount"]),
            ]);
        }
    }
    builder.build()
}

fn schedule_table(rows: &[Value]) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["#", "Due date", "Amount", "Balance after"]);
    for row in rows {
        builder.push_record([
            cell(&row["number"]),
            cell(&row["due_date"]),
            amount_cell(&row["amount"]),
            amount_cell(&row["balance_after"]),
        ]);
    }
    builder.build()
}

fn print_footer(map: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = map.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = map.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// `price_after_discount` -> `Price after discount`
fn label(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Decimals are serialised as strings; round them for display.
fn amount_cell(value: &Value) -> String {
    match value.as_str().and_then(|s| s.parse::<Money>().ok()) {
        Some(amount) => format_amount(amount),
        None => cell(value),
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => arr.iter().map(cell).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_label() {
        assert_eq!(label("price_after_discount"), "Price after discount");
        assert_eq!(label(""), "");
    }

    #[test]
    fn test_amount_cell_rounds_decimal_strings() {
        assert_eq!(amount_cell(&json!("27777.777777777")), "27,778");
        assert_eq!(amount_cell(&Value::Null), "-");
    }
}
