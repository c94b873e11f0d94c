//! Server configuration.
//!
//! Loaded from ~/.config/calvox/config.json, with environment variable
//! overrides for deployments that keep secrets out of files:
//! CALVOX_GEMINI_API_KEY, CALVOX_GOOGLE_CLIENT_ID,
//! CALVOX_GOOGLE_CLIENT_SECRET, CALVOX_TIMEZONE, CALVOX_PORT.

use std::path::PathBuf;

use chrono_tz::Tz;
use serde::Deserialize;

use calvox_core::{CalvoxError, CalvoxResult};
use calvox_provider_google::GoogleCredentials;

const DEFAULT_PORT: u16 = 4097;
const DEFAULT_TIMEZONE: &str = "Africa/Addis_Ababa";

/// Raw on-disk shape of the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawConfig {
    gemini_api_key: Option<String>,
    google_client_id: Option<String>,
    google_client_secret: Option<String>,
    timezone: Option<String>,
    port: Option<u16>,
}

/// Validated server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub gemini_api_key: String,
    pub google: GoogleCredentials,
    /// Display timezone attached to created events. Fixed per deployment,
    /// not per user - a documented limitation.
    pub timezone: Tz,
    pub port: u16,
}

pub fn base_dir() -> CalvoxResult<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or_else(|| CalvoxError::Config("Could not determine config directory".into()))?
        .join("calvox"))
}

impl ServerConfig {
    pub fn load() -> CalvoxResult<Self> {
        let path = base_dir()?.join("config.json");
        let raw = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents).map_err(|e| {
                CalvoxError::Config(format!("Failed to parse {}: {e}", path.display()))
            })?
        } else {
            RawConfig::default()
        };

        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> CalvoxResult<Self> {
        let gemini_api_key = env_or("CALVOX_GEMINI_API_KEY", raw.gemini_api_key)
            .ok_or_else(|| CalvoxError::Config("Missing Gemini API key".into()))?;
        let client_id = env_or("CALVOX_GOOGLE_CLIENT_ID", raw.google_client_id)
            .ok_or_else(|| CalvoxError::Config("Missing Google client id".into()))?;
        let client_secret = env_or("CALVOX_GOOGLE_CLIENT_SECRET", raw.google_client_secret)
            .ok_or_else(|| CalvoxError::Config("Missing Google client secret".into()))?;

        let timezone_name = env_or("CALVOX_TIMEZONE", raw.timezone)
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone: Tz = timezone_name
            .parse()
            .map_err(|_| CalvoxError::Config(format!("Unknown timezone '{timezone_name}'")))?;

        let port = match env_or("CALVOX_PORT", None) {
            Some(value) => value
                .parse()
                .map_err(|_| CalvoxError::Config(format!("Invalid port '{value}'")))?,
            None => raw.port.unwrap_or(DEFAULT_PORT),
        };

        Ok(ServerConfig {
            gemini_api_key,
            google: GoogleCredentials {
                client_id,
                client_secret,
            },
            timezone,
            port,
        })
    }
}

fn env_or(var: &str, fallback: Option<String>) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.is_empty()).or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_raw() -> RawConfig {
        RawConfig {
            gemini_api_key: Some("gm-key".into()),
            google_client_id: Some("client".into()),
            google_client_secret: Some("secret".into()),
            timezone: Some("Europe/Stockholm".into()),
            port: Some(9000),
        }
    }

    #[test]
    fn builds_from_complete_file_values() {
        let config = ServerConfig::from_raw(full_raw()).unwrap();

        assert_eq!(config.gemini_api_key, "gm-key");
        assert_eq!(config.google.client_id, "client");
        assert_eq!(config.timezone, chrono_tz::Europe::Stockholm);
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let raw = RawConfig {
            gemini_api_key: None,
            ..full_raw()
        };
        let err = ServerConfig::from_raw(raw).unwrap_err();
        assert!(matches!(err, CalvoxError::Config(_)));
    }

    #[test]
    fn unknown_timezone_is_a_config_error() {
        let raw = RawConfig {
            timezone: Some("Mars/Olympus_Mons".into()),
            ..full_raw()
        };
        let err = ServerConfig::from_raw(raw).unwrap_err();
        assert!(matches!(err, CalvoxError::Config(_)));
    }

    #[test]
    fn defaults_apply_when_optional_values_are_absent() {
        let raw = RawConfig {
            timezone: None,
            port: None,
            ..full_raw()
        };
        let config = ServerConfig::from_raw(raw).unwrap();

        assert_eq!(config.timezone, chrono_tz::Africa::Addis_Ababa);
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
