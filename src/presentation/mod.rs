pub mod config;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::{
    CorsSettings, Environment, LlmSettings, LoggingSettings, ServerSettings, Settings,
    SettingsError, UploadSettings,
};
pub use router::create_router;
pub use state::AppState;
