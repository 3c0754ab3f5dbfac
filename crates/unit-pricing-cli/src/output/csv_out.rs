use serde_json::Value;
use std::io;

/// Write output as CSV to stdout.
///
/// Schedules become one row per installment; quotes and other results become
/// `field,value` pairs, preferring the formatted `display` section.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let records = match value {
        Value::Array(rows) => row_records(rows),
        Value::Object(map) => {
            let section = map
                .get("display")
                .or_else(|| map.get("result"))
                .unwrap_or(value);
            pair_records(section)
        }
        other => vec![vec![csv_cell(other)]],
    };

    for record in records {
        let _ = wtr.write_record(&record);
    }
    let _ = wtr.flush();
}

fn pair_records(section: &Value) -> Vec<Vec<String>> {
    let mut records = vec![vec!["field".to_string(), "value".to_string()]];
    if let Value::Object(map) = section {
        for (key, val) in map {
            records.push(vec![key.clone(), csv_cell(val)]);
        }
    }
    records
}

fn row_records(rows: &[Value]) -> Vec<Vec<String>> {
    let Some(Value::Object(first)) = rows.first() else {
        return rows.iter().map(|r| vec![csv_cell(r)]).collect();
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut records = vec![headers.clone()];
    for row in rows {
        records.push(
            headers
                .iter()
                .map(|h| row.get(h).map(csv_cell).unwrap_or_default())
                .collect(),
        );
    }
    records
}

fn csv_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
