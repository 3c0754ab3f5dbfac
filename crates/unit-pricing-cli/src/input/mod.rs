pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Typed JSON input from `--input <file>` or, failing that, piped stdin.
/// `None` means the caller should fall back to command-line flags.
pub fn read_document<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_json(path)?));
    }

    match stdin::read_piped()? {
        Some(text) => {
            let value: T = serde_json::from_str(&text)
                .map_err(|e| format!("Failed to parse stdin: {}", e))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}
