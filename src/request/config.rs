use std::env;

use crate::debug::DebugTarget;
use crate::response::ResponseOverrides;

pub const ENV_DEBUG: &str = "MOCK_FETCH_DEBUG";
pub const ENV_LEGACY_WARNINGS: &str = "MOCK_FETCH_LEGACY_WARNINGS";

#[derive(Clone, Debug)]
pub struct MockFetchConfig {
    /// Emit a deprecation warning whenever a legacy accessor is used.
    pub legacy_warnings: bool,
    /// Dump every completed request to this target.
    pub debug: Option<DebugTarget>,
    /// Applied over the built-in response defaults, under per-call overrides.
    pub response_defaults: ResponseOverrides,
}

impl Default for MockFetchConfig {
    fn default() -> Self {
        Self {
            legacy_warnings: true,
            debug: None,
            response_defaults: ResponseOverrides::default(),
        }
    }
}

impl MockFetchConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(target) = lookup(ENV_DEBUG) {
            cfg.debug = Some(DebugTarget::parse(Some(&target)));
        }
        if let Some(flag) = lookup(ENV_LEGACY_WARNINGS) {
            cfg.legacy_warnings = !matches!(flag.trim().to_lowercase().as_str(), "0" | "false" | "off" | "no");
        }
        cfg
    }

    pub fn debug(mut self, target: DebugTarget) -> Self {
        self.debug = Some(target);
        self
    }

    pub fn legacy_warnings(mut self, enabled: bool) -> Self {
        self.legacy_warnings = enabled;
        self
    }

    pub fn response_defaults(mut self, defaults: ResponseOverrides) -> Self {
        self.response_defaults = defaults;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let cfg = MockFetchConfig::from_lookup(lookup(&[]));
        assert!(cfg.legacy_warnings);
        assert_eq!(cfg.debug, None);
        assert!(cfg.response_defaults.is_empty());
    }

    #[test]
    fn env_enables_debug_and_silences_legacy_warnings() {
        let cfg = MockFetchConfig::from_lookup(lookup(&[
            (ENV_DEBUG, "console"),
            (ENV_LEGACY_WARNINGS, "false"),
        ]));
        assert_eq!(cfg.debug, Some(DebugTarget::Console));
        assert!(!cfg.legacy_warnings);
    }

    #[test]
    fn unrecognised_flag_keeps_warnings_on() {
        let cfg = MockFetchConfig::from_lookup(lookup(&[(ENV_LEGACY_WARNINGS, "1")]));
        assert!(cfg.legacy_warnings);
    }
}
