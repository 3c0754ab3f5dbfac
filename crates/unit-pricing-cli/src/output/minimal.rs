use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Prefers the formatted `display.installment` figure, then well-known result
/// fields, then the first field of the result object.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    if let Some(Value::String(s)) = value.get("display").and_then(|d| d.get("installment")) {
        return s.clone();
    }

    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "per_installment_amount",
        "calculated_installment",
        "premium",
        "monthly_installment",
        "remaining_amount",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return format_minimal(val);
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_minimal(val));
        }
    }

    if let Value::Array(rows) = result_obj {
        return format!("{} rows", rows.len());
    }

    format_minimal(result_obj)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prefers_display_installment() {
        let v = json!({"result": {"remaining_amount": "1080000"}, "display": {"installment": "9,000 EGP"}});
        assert_eq!(minimal_line(&v), "9,000 EGP");
    }

    #[test]
    fn test_falls_back_to_priority_key() {
        let v = json!({"result": {"total_amount_paid": "16200000", "premium": "9200000"}});
        assert_eq!(minimal_line(&v), "9200000");
    }

    #[test]
    fn test_schedule_rows() {
        let v = json!([{"number": 1}, {"number": 2}]);
        assert_eq!(minimal_line(&v), "2 rows");
    }
}
