use std::path::Path;

use unit_pricing_core::config::CalculatorConfig;

use crate::input;

/// Load calculator defaults. No path means built-in defaults; `.yaml`/`.yml`
/// files are read as YAML, everything else as JSON.
pub fn load(path: Option<&str>) -> Result<CalculatorConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(CalculatorConfig::default());
    };

    let contents = input::file::read_text(path)?;
    parse(path, &contents)
}

fn parse(path: &str, contents: &str) -> Result<CalculatorConfig, Box<dyn std::error::Error>> {
    let is_yaml = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    let cfg = if is_yaml {
        serde_yaml::from_str(contents)
            .map_err(|e| format!("Failed to parse config '{}': {}", path, e))?
    } else {
        serde_json::from_str(contents)
            .map_err(|e| format!("Failed to parse config '{}': {}", path, e))?
    };
    Ok(cfg)
}
