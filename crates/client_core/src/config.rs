use std::{fs, path::PathBuf, time::Duration};

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use url::Url;

pub const DEFAULT_SERVICE_ORIGIN: &str = "http://localhost:5000";

const SETTINGS_FILE_NAME: &str = "client.toml";
const APP_CONFIG_DIR: &str = "urban_lens";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("service origin '{0}' must be an http(s) URL")]
    UnsupportedOrigin(String),
    #[error("invalid service origin '{raw}': {source}")]
    InvalidOrigin {
        raw: String,
        source: url::ParseError,
    },
    #[error("service origin '{0}' cannot carry route segments")]
    CannotBeABase(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub service_origin: Url,
    pub ask_route: String,
    pub image_route: String,
    pub request_timeout_seconds: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_origin: Url::parse(DEFAULT_SERVICE_ORIGIN)
                .expect("default service origin is a valid URL"),
            ask_route: "/ask".into(),
            image_route: "/images".into(),
            request_timeout_seconds: None,
        }
    }
}

/// Resolved URLs for the two routes the client touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoints {
    pub ask_url: Url,
    pub image_base: Url,
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    service_origin: Option<String>,
    ask_route: Option<String>,
    image_route: Option<String>,
    request_timeout_seconds: Option<u64>,
}

impl Settings {
    pub fn with_origin(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.service_origin = parse_origin(raw)?;
        Ok(self)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }

    pub fn endpoints(&self) -> Result<ServiceEndpoints, ConfigError> {
        Ok(ServiceEndpoints {
            ask_url: append_route(&self.service_origin, &self.ask_route)?,
            image_base: append_route(&self.service_origin, &self.image_route)?,
        })
    }
}

pub fn load_settings() -> Settings {
    let raw = settings_file_candidates()
        .into_iter()
        .find_map(|path| fs::read_to_string(path).ok());
    load_settings_from(raw.as_deref(), |name| std::env::var(name).ok())
}

pub fn load_settings_from(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        match toml::from_str::<FileSettings>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.service_origin {
                    set_origin(&mut settings, &v);
                }
                if let Some(v) = file_cfg.ask_route {
                    settings.ask_route = v;
                }
                if let Some(v) = file_cfg.image_route {
                    settings.image_route = v;
                }
                if file_cfg.request_timeout_seconds.is_some() {
                    settings.request_timeout_seconds = file_cfg.request_timeout_seconds;
                }
            }
            Err(error) => warn!(%error, "ignoring unreadable {SETTINGS_FILE_NAME}"),
        }
    }

    if let Some(v) = env("SERVICE_ORIGIN") {
        set_origin(&mut settings, &v);
    }
    if let Some(v) = env("APP__SERVICE_ORIGIN") {
        set_origin(&mut settings, &v);
    }

    if let Some(v) = env("APP__ASK_ROUTE") {
        settings.ask_route = v;
    }
    if let Some(v) = env("APP__IMAGE_ROUTE") {
        settings.image_route = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECONDS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.request_timeout_seconds = Some(parsed),
            Err(_) => warn!(value = %v, "ignoring non-numeric APP__REQUEST_TIMEOUT_SECONDS"),
        }
    }

    settings
}

fn settings_file_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(SETTINGS_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join(APP_CONFIG_DIR).join(SETTINGS_FILE_NAME));
    }
    candidates
}

fn set_origin(settings: &mut Settings, raw: &str) {
    match parse_origin(raw) {
        Ok(origin) => settings.service_origin = origin,
        Err(error) => warn!(%error, "keeping service origin {}", settings.service_origin),
    }
}

fn parse_origin(raw: &str) -> Result<Url, ConfigError> {
    let raw = raw.trim();
    let url = Url::parse(raw).map_err(|source| ConfigError::InvalidOrigin {
        raw: raw.to_string(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedOrigin(raw.to_string()));
    }
    Ok(url)
}

fn append_route(origin: &Url, route: &str) -> Result<Url, ConfigError> {
    let mut url = origin.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| ConfigError::CannotBeABase(origin.to_string()))?
        .pop_if_empty()
        .extend(route.split('/').filter(|segment| !segment.is_empty()));
    Ok(url)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
