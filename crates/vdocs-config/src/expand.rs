//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Supports:
/// - `${VAR}` - expands to the value of VAR, errors if unset
/// - `${VAR:-default}` - expands to VAR if set, otherwise uses default
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let expanded = shellexpand::env_with_context_no_errors(value, |var| std::env::var(var).ok())
        .into_owned();

    // Unset variables without a default are left verbatim by shellexpand.
    if let Some(start) = expanded.find("${") {
        let rest = &expanded[start + 2..];
        let name = rest.split('}').next().unwrap_or(rest);
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{name}}} not set"),
        });
    }

    Ok(expanded)
}
