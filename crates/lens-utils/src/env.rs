//! Environment variable helpers

/// Read a non-empty environment variable
///
/// Unset and blank values are both treated as missing.
pub fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
