use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api/v1";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid KEEPUP_AUTH_MODE '{0}', expected 'cookie' or 'bearer'")]
    AuthMode(String),
    #[error("invalid KEEPUP_API_BASE '{0}'")]
    ApiBase(String),
}

/// How the client proves who it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Session cookie, verified through `/users/me`.
    #[default]
    Cookie,
    /// Access token kept in client storage.
    Bearer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base: String,
    pub auth_mode: AuthMode,
    pub map_api_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            auth_mode: AuthMode::Cookie,
            map_api_key: None,
        }
    }
}

impl ClientConfig {
    /// Values baked in when the wasm bundle is built.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_values(
            option_env!("KEEPUP_API_BASE"),
            option_env!("KEEPUP_AUTH_MODE"),
            option_env!("KEEPUP_MAP_API_KEY"),
        )
    }

    pub fn from_values(api_base: Option<&str>, auth_mode: Option<&str>, map_api_key: Option<&str>) -> Result<Self, ConfigError> {
        let api_base = match api_base.map(str::trim).filter(|base| !base.is_empty()) {
            Some(base) if base.starts_with("http://") || base.starts_with("https://") || base.starts_with('/') => {
                base.trim_end_matches('/').to_string()
            }
            Some(base) => return Err(ConfigError::ApiBase(base.to_string())),
            None => DEFAULT_API_BASE.to_string(),
        };

        let auth_mode = match auth_mode.map(|mode| mode.trim().to_ascii_lowercase()) {
            None => AuthMode::Cookie,
            Some(mode) if mode.is_empty() || mode == "cookie" => AuthMode::Cookie,
            Some(mode) if mode == "bearer" => AuthMode::Bearer,
            Some(mode) => return Err(ConfigError::AuthMode(mode)),
        };

        let map_api_key = map_api_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);

        Ok(Self {
            api_base,
            auth_mode,
            map_api_key,
        })
    }
}
