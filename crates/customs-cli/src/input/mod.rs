pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Read a typed input record from `--input <file>` when given, falling back
/// to piped stdin. Errors with `what` in the message when neither is there.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
    what: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::read_json(path);
    }
    if let Some(value) = stdin::read_stdin()? {
        return Ok(serde_json::from_value(value)?);
    }
    Err(format!("--input <file.json> or stdin required for {}", what).into())
}
