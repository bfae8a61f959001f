use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use planner_api::DEFAULT_MAX_TRANSCRIPT_BYTES;
use serde::Deserialize;
use tracing::warn;

pub const SETTINGS_FILE: &str = "planner.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_bind: String,
    pub credentials_path: PathBuf,
    pub credentials_env_var: String,
    pub max_transcript_bytes: u64,
    /// Sampling temperature handed to the model client once one is wired in.
    pub model_temperature: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8501".into(),
            credentials_path: PathBuf::from("keys.txt"),
            credentials_env_var: "OPENAI_API_KEY".into(),
            max_transcript_bytes: DEFAULT_MAX_TRANSCRIPT_BYTES,
            model_temperature: 0.9,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    credentials_path: Option<PathBuf>,
    credentials_env_var: Option<String>,
    max_transcript_bytes: Option<u64>,
    model_temperature: Option<f32>,
}

pub fn load_settings() -> Settings {
    let settings = load_settings_file(Path::new(SETTINGS_FILE), Settings::default());
    apply_env_overrides(settings, |key| std::env::var(key).ok())
}

/// Layers `path` over `settings`. A missing file is not an error; a
/// malformed one is logged and ignored.
pub fn load_settings_file(path: &Path, mut settings: Settings) -> Settings {
    let Ok(raw) = fs::read_to_string(path) else {
        return settings;
    };
    let file_cfg = match toml::from_str::<FileSettings>(&raw) {
        Ok(cfg) => cfg,
        Err(error) => {
            warn!(path = %path.display(), %error, "ignoring malformed settings file");
            return settings;
        }
    };

    if let Some(v) = file_cfg.bind_addr {
        settings.server_bind = v;
    }
    if let Some(v) = file_cfg.credentials_path {
        settings.credentials_path = v;
    }
    if let Some(v) = file_cfg.credentials_env_var {
        settings.credentials_env_var = v;
    }
    if let Some(v) = file_cfg.max_transcript_bytes {
        settings.max_transcript_bytes = v;
    }
    if let Some(v) = file_cfg.model_temperature {
        settings.model_temperature = v;
    }
    settings
}

pub fn apply_env_overrides<F>(mut settings: Settings, lookup: F) -> Settings
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("PLANNER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = lookup("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = lookup("APP__CREDENTIALS_PATH") {
        settings.credentials_path = PathBuf::from(v);
    }
    if let Some(v) = lookup("APP__CREDENTIALS_ENV_VAR") {
        settings.credentials_env_var = v;
    }

    if let Some(v) = lookup("APP__MAX_TRANSCRIPT_BYTES") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.max_transcript_bytes = parsed,
            Err(_) => warn!(value = %v, "ignoring invalid APP__MAX_TRANSCRIPT_BYTES"),
        }
    }
    if let Some(v) = lookup("APP__MODEL_TEMPERATURE") {
        match v.parse::<f32>() {
            Ok(parsed) => settings.model_temperature = parsed,
            Err(_) => warn!(value = %v, "ignoring invalid APP__MODEL_TEMPERATURE"),
        }
    }

    settings
}

/// Model API token read from the credentials file.
pub struct Credentials {
    api_key: String,
}

impl Credentials {
    #[cfg(test)]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Publishes the token for model client libraries that read it from the
    /// environment. Must run before any other thread starts.
    pub fn export(&self, var: &str) {
        std::env::set_var(var, &self.api_key);
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

pub fn load_credentials(path: &Path) -> anyhow::Result<Credentials> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read credentials file '{}'", path.display()))?;
    let api_key = raw.trim();
    if api_key.is_empty() {
        bail!("credentials file '{}' is empty", path.display());
    }
    Ok(Credentials {
        api_key: api_key.to_string(),
    })
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
