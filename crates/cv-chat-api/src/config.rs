//! Chat API server configuration, loadable from TOML and environment.

use std::path::PathBuf;

use serde::Deserialize;

use crate::intent::dialogflow::DialogflowConfig;

/// Top-level API server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Listen address (e.g., "0.0.0.0").
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Location of the theme JSON file.
    #[serde(default = "default_theme_path")]
    pub theme_path: PathBuf,
    /// Dialogflow provider settings. Absent means rule-based only.
    #[serde(default)]
    pub dialogflow: Option<DialogflowConfig>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_theme_path() -> PathBuf {
    PathBuf::from("./theme.json")
}

impl ApiConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from an optional TOML file, then apply environment overrides.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_env(|key| std::env::var(key).ok()))
    }

    /// Apply overrides from `lookup` (normally the process environment).
    ///
    /// `GOOGLE_CLOUD_PROJECT_ID` creates the Dialogflow section when the file
    /// didn't; the other `DIALOGFLOW_*` keys only tune an existing section.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("HOST") {
            self.host = host;
        }
        if let Some(port) = get("PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!(value = %port, "ignoring invalid PORT"),
            }
        }
        if let Some(path) = get("THEME_PATH") {
            self.theme_path = PathBuf::from(path);
        }
        if let Some(origins) = get("CORS_ORIGINS") {
            self.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(project_id) = get("GOOGLE_CLOUD_PROJECT_ID") {
            match self.dialogflow.as_mut() {
                Some(df) => df.project_id = project_id,
                None => self.dialogflow = Some(DialogflowConfig::new(project_id)),
            }
        }
        if let Some(df) = self.dialogflow.as_mut() {
            if let Some(token) = get("DIALOGFLOW_ACCESS_TOKEN") {
                df.access_token = Some(token);
            }
            if let Some(endpoint) = get("DIALOGFLOW_ENDPOINT") {
                df.endpoint = endpoint;
            }
            if let Some(code) = get("DIALOGFLOW_LANGUAGE_CODE") {
                df.language_code = code;
            }
            if let Some(secs) = get("DIALOGFLOW_TIMEOUT_SECS") {
                match secs.parse::<u64>() {
                    Ok(parsed) if parsed > 0 => df.timeout_secs = parsed,
                    _ => tracing::warn!(value = %secs, "ignoring invalid DIALOGFLOW_TIMEOUT_SECS"),
                }
            }
        }

        self
    }

    /// `host:port` for the listener.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
            theme_path: default_theme_path(),
            dialogflow: None,
        }
    }
}
