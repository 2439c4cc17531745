mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    CorsSettings, LlmSettings, LoggingSettings, ServerSettings, Settings, SettingsError,
    UploadSettings,
};
