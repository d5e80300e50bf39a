use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if value <= 0.0 || !value.is_finite() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("must be a positive finite number, got {raw}"),
            });
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("SITERISK_ENV", "development"));
    let log_level = or_default("SITERISK_LOG_LEVEL", "info");
    let sources_path = PathBuf::from(or_default("SITERISK_SOURCES_PATH", "./config/sources.yaml"));

    let request_timeout_secs = parse_u64("SITERISK_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SITERISK_USER_AGENT", "siterisk/0.1 (property-intelligence)");
    let max_retries = parse_u32("SITERISK_MAX_RETRIES", "3")?;
    let backoff_base_secs = parse_u64("SITERISK_RETRY_BACKOFF_BASE_SECS", "5")?;
    let cache_ttl_hours = parse_u64("SITERISK_CACHE_TTL_HOURS", "24")?;
    let default_buffer_radius_m = parse_f64("SITERISK_DEFAULT_BUFFER_RADIUS_M", "2000")?;

    Ok(AppConfig {
        env,
        log_level,
        sources_path,
        request_timeout_secs,
        user_agent,
        max_retries,
        backoff_base_secs,
        cache_ttl_hours,
        default_buffer_radius_m,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_development() {
        assert_eq!(parse_environment("development"), Environment::Development);
    }

    #[test]
    fn parse_environment_test() {
        assert_eq!(parse_environment("test"), Environment::Test);
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("unknown"), Environment::Development);
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.sources_path.to_string_lossy(), "./config/sources.yaml");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.user_agent, "siterisk/0.1 (property-intelligence)");
        assert_eq!(cfg.max_retries, 3);
        assert_eq!(cfg.backoff_base_secs, 5);
        assert_eq!(cfg.cache_ttl_hours, 24);
        assert!((cfg.default_buffer_radius_m - 2000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn build_app_config_request_timeout_override() {
        let mut map = HashMap::new();
        map.insert("SITERISK_REQUEST_TIMEOUT_SECS", "60");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.request_timeout_secs, 60);
    }

    #[test]
    fn build_app_config_request_timeout_invalid() {
        let mut map = HashMap::new();
        map.insert("SITERISK_REQUEST_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SITERISK_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(SITERISK_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_user_agent_override() {
        let mut map = HashMap::new();
        map.insert("SITERISK_USER_AGENT", "custom-agent/2.0");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.user_agent, "custom-agent/2.0");
    }

    #[test]
    fn build_app_config_max_retries_override() {
        let mut map = HashMap::new();
        map.insert("SITERISK_MAX_RETRIES", "5");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.max_retries, 5);
    }

    #[test]
    fn build_app_config_max_retries_invalid() {
        let mut map = HashMap::new();
        map.insert("SITERISK_MAX_RETRIES", "many");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SITERISK_MAX_RETRIES"),
            "expected InvalidEnvVar(SITERISK_MAX_RETRIES), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_cache_ttl_override() {
        let mut map = HashMap::new();
        map.insert("SITERISK_CACHE_TTL_HOURS", "48");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.cache_ttl_hours, 48);
        assert_eq!(cfg.cache_ttl(), std::time::Duration::from_secs(48 * 3600));
    }

    #[test]
    fn build_app_config_buffer_radius_override() {
        let mut map = HashMap::new();
        map.insert("SITERISK_DEFAULT_BUFFER_RADIUS_M", "5000");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!((cfg.default_buffer_radius_m - 5000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn build_app_config_buffer_radius_rejects_non_positive() {
        let mut map = HashMap::new();
        map.insert("SITERISK_DEFAULT_BUFFER_RADIUS_M", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SITERISK_DEFAULT_BUFFER_RADIUS_M"),
            "expected InvalidEnvVar(SITERISK_DEFAULT_BUFFER_RADIUS_M), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_buffer_radius_rejects_nan() {
        let mut map = HashMap::new();
        map.insert("SITERISK_DEFAULT_BUFFER_RADIUS_M", "NaN");
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_err(), "NaN radius must be rejected");
    }
}
