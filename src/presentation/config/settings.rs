use std::path::PathBuf;
use std::time::Duration;

use axum::http::HeaderValue;
use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use tower_http::cors::AllowOrigin;

use crate::application::ports::ClientOptions;
use crate::infrastructure::llm::DEFAULT_BASE_URL;

use super::Environment;

const API_KEY_VARIABLES: [&str; 2] = ["GOOGLE_API_KEY", "GEMINI_API_KEY"];
const MIB: usize = 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Taken from `APP_ENVIRONMENT`, never from the layered sources.
    #[serde(skip)]
    pub environment: Environment,
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub uploads: UploadSettings,
    pub cors: CorsSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadSettings {
    /// Staging directory; the OS temp dir is used when unset.
    pub dir: Option<PathBuf>,
    pub max_file_size_mb: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsSettings {
    /// A single origin, or `*` for any.
    pub allowed_origin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid environment: {0}")]
    Environment(String),
    #[error("failed to load settings: {0}")]
    Load(#[from] ConfigError),
    #[error("missing API key: set APP_LLM__API_KEY or GOOGLE_API_KEY")]
    MissingApiKey,
    #[error("invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),
    #[error("uploads.max_file_size_mb must be greater than zero")]
    InvalidUploadLimit,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: Environment::Local,
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            llm: LlmSettings {
                api_key: String::new(),
                model: "gemini-1.5-flash".to_string(),
                base_url: DEFAULT_BASE_URL.to_string(),
                request_timeout_secs: 60,
                temperature: 0.2,
            },
            uploads: UploadSettings {
                dir: None,
                max_file_size_mb: 10,
            },
            cors: CorsSettings {
                allowed_origin: "*".to_string(),
            },
            logging: LoggingSettings {
                level: "info".to_string(),
                json: false,
            },
        }
    }
}

impl Settings {
    /// Layers, lowest precedence first: built-in defaults, the optional
    /// `appsettings.{environment}` file, `APP_*` variables (`__` nests), and
    /// finally `GOOGLE_API_KEY`/`GEMINI_API_KEY` when no key was configured.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env().map_err(SettingsError::Environment)?;
        let defaults = Settings {
            environment,
            ..Settings::default()
        };

        let mut settings: Settings = Config::builder()
            .add_source(Config::try_from(&defaults)?)
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.environment = environment;
        if settings.llm.api_key.trim().is_empty() {
            settings.llm.api_key =
                LlmSettings::api_key_from(|name| std::env::var(name).ok()).unwrap_or_default();
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Rejects settings the service cannot start with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.llm.api_key.trim().is_empty() {
            return Err(SettingsError::MissingApiKey);
        }
        if self.uploads.max_file_size_mb == 0 {
            return Err(SettingsError::InvalidUploadLimit);
        }
        if !self.cors.allows_any() && HeaderValue::from_str(&self.cors.allowed_origin).is_err() {
            return Err(SettingsError::InvalidCorsOrigin(
                self.cors.allowed_origin.clone(),
            ));
        }
        Ok(())
    }
}

impl LlmSettings {
    /// First non-blank key among `GOOGLE_API_KEY` and `GEMINI_API_KEY`.
    pub fn api_key_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        API_KEY_VARIABLES
            .iter()
            .filter_map(|name| lookup(name))
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            api_key: self.api_key.trim().to_string(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            request_timeout: self.request_timeout(),
            temperature: self.temperature,
        }
    }
}

impl std::fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSettings")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl UploadSettings {
    pub fn staging_dir(&self) -> PathBuf {
        self.dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("rfq-compliance-uploads"))
    }

    /// Two documents per request, plus multipart framing headroom.
    pub fn body_limit_bytes(&self) -> usize {
        self.max_file_size_mb.saturating_mul(2 * MIB) + MIB
    }
}

impl CorsSettings {
    pub fn allows_any(&self) -> bool {
        self.allowed_origin.trim() == "*"
    }

    pub fn allow_origin(&self) -> AllowOrigin {
        if self.allows_any() {
            return AllowOrigin::any();
        }
        match HeaderValue::from_str(self.allowed_origin.trim()) {
            Ok(origin) => AllowOrigin::exact(origin),
            Err(_) => {
                tracing::warn!(origin = %self.allowed_origin, "Invalid CORS origin, allowing any");
                AllowOrigin::any()
            }
        }
    }
}
