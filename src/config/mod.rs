use dashmap::DashMap;
use std::env;
use std::sync::Arc;

/// Key/value configuration store, seeded from the process environment
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    pub fn new() -> Self {
        let service = Self::default();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Reads a flag; `true`, `1`, `yes` and `on` (any case) are truthy
    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| {
            matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "yes" | "on"
            )
        })
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }
}

/// Application settings the response layer reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `APP_NAME`
    pub name: String,
    /// `APP_VERSION`, defaults to `1.0`
    pub version: String,
    /// `APP_DEBUG`; attaches traces to error envelopes when set
    pub debug: bool,
}

impl AppConfig {
    pub const DEFAULT_VERSION: &'static str = "1.0";

    pub fn from_service(config: &ConfigService) -> Self {
        Self {
            name: config.get_or("APP_NAME", ""),
            version: config.get_or("APP_VERSION", Self::DEFAULT_VERSION),
            debug: config.get_bool("APP_DEBUG"),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            version: Self::DEFAULT_VERSION.to_string(),
            debug: false,
        }
    }
}
