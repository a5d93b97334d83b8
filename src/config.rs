//! Service configuration from environment variables.

use std::env::VarError;
use std::fmt;

use crate::google::GoogleMapsConfig;

pub const REQUIRED_VARIABLES: &[&str] = &["GOOGLE_MAPS_API_KEY"];

const DEFAULT_LISTEN_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub listen_port: u16,
    pub maps: GoogleMapsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(String),
    NotUnicode(String),
    Invalid { name: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "{name} not set"),
            ConfigError::NotUnicode(name) => write!(f, "{name} value is not valid unicode"),
            ConfigError::Invalid { name, value } => write!(f, "{name} has invalid value {value:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name))
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let required = |name: &str| {
            var(name).map_err(|e| match e {
                VarError::NotPresent => ConfigError::Missing(name.to_string()),
                VarError::NotUnicode(_) => ConfigError::NotUnicode(name.to_string()),
            })
        };
        let optional = |name: &str| match var(name) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(name.to_string())),
        };

        let api_key = required("GOOGLE_MAPS_API_KEY")?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::Missing("GOOGLE_MAPS_API_KEY".to_string()));
        }

        let listen_port = match optional("LISTEN_PORT")? {
            Some(value) => parse("LISTEN_PORT", value)?,
            None => DEFAULT_LISTEN_PORT,
        };

        let mut maps = GoogleMapsConfig {
            api_key,
            ..GoogleMapsConfig::default()
        };
        if let Some(base_url) = optional("GOOGLE_MAPS_BASE_URL")? {
            maps.base_url = base_url;
        }
        if let Some(value) = optional("GOOGLE_MAPS_TIMEOUT_SECS")? {
            maps.timeout_secs = parse("GOOGLE_MAPS_TIMEOUT_SECS", value)?;
        }
        maps.language = optional("GOOGLE_MAPS_LANGUAGE")?;

        Ok(Self { listen_port, maps })
    }

    pub fn log(&self) {
        tracing::info!(
            listen_port = self.listen_port,
            maps_base_url = %self.maps.base_url,
            maps_timeout_secs = self.maps.timeout_secs,
            maps_language = self.maps.language.as_deref().unwrap_or("<default>"),
            maps_api_key = "<redacted>",
            "configuration loaded"
        );
    }
}

fn parse<T: std::str::FromStr>(name: &str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name: name.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServiceConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|name| vars.get(name).cloned().ok_or(VarError::NotPresent))
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("GOOGLE_MAPS_API_KEY", "secret")]).unwrap();
        assert_eq!(config.listen_port, 8080);
        assert_eq!(config.maps.api_key, "secret");
        assert_eq!(config.maps.base_url, "https://maps.googleapis.com");
        assert_eq!(config.maps.timeout_secs, 10);
        assert_eq!(config.maps.language, None);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("GOOGLE_MAPS_API_KEY", "secret"),
            ("LISTEN_PORT", "9000"),
            ("GOOGLE_MAPS_BASE_URL", "http://localhost:1234"),
            ("GOOGLE_MAPS_TIMEOUT_SECS", "3"),
            ("GOOGLE_MAPS_LANGUAGE", "de"),
        ])
        .unwrap();
        assert_eq!(config.listen_port, 9000);
        assert_eq!(config.maps.base_url, "http://localhost:1234");
        assert_eq!(config.maps.timeout_secs, 3);
        assert_eq!(config.maps.language.as_deref(), Some("de"));
    }

    #[test]
    fn test_missing_key() {
        let err = config_from(&[]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("GOOGLE_MAPS_API_KEY".to_string()));
        assert_eq!(err.to_string(), "GOOGLE_MAPS_API_KEY not set");
    }

    #[test]
    fn test_blank_key_is_missing() {
        let err = config_from(&[("GOOGLE_MAPS_API_KEY", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("GOOGLE_MAPS_API_KEY", "k"), ("LISTEN_PORT", "http")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "LISTEN_PORT".to_string(),
                value: "http".to_string()
            }
        );
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logged(config: &ServiceConfig) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || config.log());
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_log_includes_language_and_hides_key() {
        let config = config_from(&[
            ("GOOGLE_MAPS_API_KEY", "SUPERSECRETKEY"),
            ("GOOGLE_MAPS_LANGUAGE", "de"),
        ])
        .unwrap();
        let line = logged(&config);
        assert!(line.contains("maps_language=\"de\""), "{line}");
        assert!(!line.contains("SUPERSECRETKEY"), "{line}");

        let config = config_from(&[("GOOGLE_MAPS_API_KEY", "k")]).unwrap();
        assert!(logged(&config).contains("maps_language=\"<default>\""));
    }
}
