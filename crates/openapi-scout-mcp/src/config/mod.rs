//! Configuration loading and resolution.

use openapi_scout::ScoutSettings;

/// Default SwaggerHub token when a call passes none.
pub const TOKEN_ENV: &str = "SWAGGERHUB_API_TOKEN";
pub const FETCH_TIMEOUT_ENV: &str = "SCOUT_FETCH_TIMEOUT_MS";
pub const PROBE_TIMEOUT_ENV: &str = "SCOUT_PROBE_TIMEOUT_MS";

/// Values given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub swaggerhub_token: Option<String>,
    pub fetch_timeout_ms: Option<u64>,
    pub probe_timeout_ms: Option<u64>,
}

/// Resolve engine settings: explicit flag > environment > default.
pub fn resolve_settings(overrides: &SettingsOverrides) -> ScoutSettings {
    resolve_settings_with(overrides, |name| std::env::var(name).ok())
}

/// [`resolve_settings`] with the environment supplied by the caller.
pub fn resolve_settings_with<F>(overrides: &SettingsOverrides, env: F) -> ScoutSettings
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = ScoutSettings::default();

    let vendor_token = overrides
        .swaggerhub_token
        .clone()
        .or_else(|| env(TOKEN_ENV))
        .filter(|t| !t.trim().is_empty());

    let fetch_timeout_ms = overrides
        .fetch_timeout_ms
        .or_else(|| millis(env(FETCH_TIMEOUT_ENV), FETCH_TIMEOUT_ENV))
        .unwrap_or(defaults.fetch_timeout_ms);

    let probe_timeout_ms = overrides
        .probe_timeout_ms
        .or_else(|| millis(env(PROBE_TIMEOUT_ENV), PROBE_TIMEOUT_ENV))
        .unwrap_or(defaults.probe_timeout_ms);

    ScoutSettings {
        fetch_timeout_ms,
        probe_timeout_ms,
        vendor_token,
        ..defaults
    }
}

fn millis(raw: Option<String>, name: &str) -> Option<u64> {
    let raw = raw?;
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => {
            tracing::warn!("Ignoring {name}={raw}: expected a positive number of milliseconds");
            None
        }
        Ok(ms) => Some(ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_flags_or_env() {
        let settings = resolve_settings_with(&SettingsOverrides::default(), env_of(&[]));
        assert_eq!(settings, ScoutSettings::default());
    }

    #[test]
    fn test_flag_beats_env() {
        let overrides = SettingsOverrides {
            swaggerhub_token: Some("flag".to_string()),
            fetch_timeout_ms: Some(1_000),
            probe_timeout_ms: None,
        };
        let settings = resolve_settings_with(
            &overrides,
            env_of(&[
                (TOKEN_ENV, "env"),
                (FETCH_TIMEOUT_ENV, "2000"),
                (PROBE_TIMEOUT_ENV, "3000"),
            ]),
        );
        assert_eq!(settings.vendor_token.as_deref(), Some("flag"));
        assert_eq!(settings.fetch_timeout_ms, 1_000);
        assert_eq!(settings.probe_timeout_ms, 3_000);
    }

    #[test]
    fn test_bad_env_values_fall_back() {
        let settings = resolve_settings_with(
            &SettingsOverrides::default(),
            env_of(&[
                (TOKEN_ENV, "  "),
                (FETCH_TIMEOUT_ENV, "soon"),
                (PROBE_TIMEOUT_ENV, "0"),
            ]),
        );
        let defaults = ScoutSettings::default();
        assert_eq!(settings.vendor_token, None);
        assert_eq!(settings.fetch_timeout_ms, defaults.fetch_timeout_ms);
        assert_eq!(settings.probe_timeout_ms, defaults.probe_timeout_ms);
    }
}
