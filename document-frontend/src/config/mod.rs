use serde::Deserialize;
use service_core::config::ObservabilitySettings;
use std::path::{Path, PathBuf};

/// Environment variables that select the backend base URL, checked in order.
///
/// They win over `backend.url` from the file and `APP_BACKEND__URL`.
pub const BACKEND_URL_ENV_VARS: [&str; 2] = ["API_URL", "NEXT_PUBLIC_API_URL"];

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    #[serde(default)]
    pub observability: ObservabilitySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    /// Base URL of the document-processing backend (e.g., http://backend:8000).
    #[serde(default = "default_backend_url")]
    pub url: String,
}

fn default_backend_url() -> String {
    "http://backend:8000".to_string()
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {}", e))
    })?;

    // Either run from the crate directory or from the workspace root
    let configuration_directory = if base_path.ends_with("document-frontend") {
        base_path.join("config")
    } else {
        base_path.join("document-frontend").join("config")
    };

    let backend_url_override = backend_url_from_env(|key| std::env::var(key).ok());

    load_from(&configuration_directory, backend_url_override)
}

/// First of [`BACKEND_URL_ENV_VARS`] that is set to a non-blank value.
pub fn backend_url_from_env(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    BACKEND_URL_ENV_VARS
        .iter()
        .find_map(|key| lookup(key).filter(|value| !value.trim().is_empty()))
}

/// Build settings from `<dir>/base.yaml`, `APP_` environment variables and an
/// optional backend URL override.
pub fn load_from(
    configuration_directory: &Path,
    backend_url_override: Option<String>,
) -> Result<Settings, config::ConfigError> {
    let base_file: PathBuf = configuration_directory.join("base.yaml");

    let settings = config::Config::builder()
        .add_source(config::File::from(base_file).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option(
            "backend.url",
            backend_url_override.filter(|url| !url.trim().is_empty()),
        )?
        .build()?;

    let mut settings = settings.try_deserialize::<Settings>()?;
    settings.backend.url = settings.backend.url.trim_end_matches('/').to_string();
    Ok(settings)
}
