//! Environment variable handling for MeetMe.
//!
//! Configuration values are overridden with `MEETME__SECTION__KEY` variables by the
//! `config` crate itself. Values marked `"secret_from_env"` in a config file are
//! resolved here, first from `MEETME_SECRET_SECTION_KEY` and then from the shorter
//! `SECTION_KEY` form (e.g. `ADMIN_PAGE_SECRET`).

use std::env;
use tracing::warn;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "MEETME";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "MEETME_SECRET";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Marker value that asks for a secret to be pulled from the environment.
pub const SECRET_MARKER: &str = "secret_from_env";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a secret path to an environment variable name
///
/// `"admin.page_secret"` becomes `"MEETME_SECRET_ADMIN_PAGE_SECRET"`.
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to its short environment variable name
///
/// `"admin.page_secret"` becomes `"ADMIN_PAGE_SECRET"`.
pub fn legacy_secret_path_to_env_var(path: &str) -> String {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.len() < 2 {
        return path.to_uppercase();
    }

    let service = parts[0];
    let key = parts[1..].join(SECRET_SEPARATOR);
    format!("{}_{}", service, key).to_uppercase()
}

/// Get an environment variable for a secret path, trying the prefixed name first.
pub fn get_secret_env_var(path: &str) -> Option<String> {
    let env_var = secret_path_to_env_var(path);
    if let Ok(value) = env::var(&env_var) {
        return Some(value);
    }

    let legacy_env_var = legacy_secret_path_to_env_var(path);
    env::var(&legacy_env_var).ok()
}

/// Replace every `"secret_from_env"` string inside `value` with its environment value.
///
/// Markers without a matching variable become `null`, so an optional secret reads as unset
/// instead of carrying the marker text. Returns `true` if anything was replaced.
pub fn inject_env_vars(value: &mut serde_json::Value) -> bool {
    use serde_json::Value;

    fn walk(path: Vec<String>, obj: &mut Value) -> bool {
        let mut replaced = false;

        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    replaced |= walk(new_path, v);
                }
            }
            Value::Array(arr) => {
                for (i, v) in arr.iter_mut().enumerate() {
                    let mut new_path = path.clone();
                    new_path.push(i.to_string());
                    replaced |= walk(new_path, v);
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let path_str = path.join(".");
                match get_secret_env_var(&path_str) {
                    Some(env_val) => {
                        *obj = Value::String(env_val);
                        replaced = true;
                    }
                    None => {
                        warn!("env var for {} not found, leaving it unset", path_str);
                        *obj = Value::Null;
                    }
                }
            }
            _ => {}
        }

        replaced
    }

    walk(vec![], value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_secret_path_to_env_var() {
        assert_eq!(
            secret_path_to_env_var("admin.page_secret"),
            "MEETME_SECRET_ADMIN_PAGE_SECRET"
        );
    }

    #[test]
    fn test_legacy_secret_path_to_env_var() {
        assert_eq!(
            legacy_secret_path_to_env_var("admin.page_secret"),
            "ADMIN_PAGE_SECRET"
        );
        assert_eq!(
            legacy_secret_path_to_env_var("gcal.credentials_base64"),
            "GCAL_CREDENTIALS_BASE64"
        );
        assert_eq!(legacy_secret_path_to_env_var("token"), "TOKEN");
    }

    #[test]
    fn test_inject_env_vars_prefers_prefixed_name() {
        env::set_var("MEETME_SECRET_INJECTTEST_ALPHA", "prefixed");
        env::set_var("INJECTTEST_ALPHA", "legacy");
        env::set_var("INJECTTEST_BETA", "legacy-only");

        let mut value = json!({
            "injecttest": {
                "alpha": "secret_from_env",
                "beta": "secret_from_env",
                "plain": "untouched"
            }
        });

        assert!(inject_env_vars(&mut value));
        assert_eq!(value["injecttest"]["alpha"], "prefixed");
        assert_eq!(value["injecttest"]["beta"], "legacy-only");
        assert_eq!(value["injecttest"]["plain"], "untouched");
    }

    #[test]
    fn test_inject_env_vars_missing_secret_becomes_null() {
        let mut value = json!({ "injectmissing": { "never_set_anywhere": "secret_from_env" } });

        assert!(!inject_env_vars(&mut value));
        assert!(value["injectmissing"]["never_set_anywhere"].is_null());
    }
}
