mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ApplicationSettings, AudioSettings, AuthSettings, LoggingSettings, ModelSettings, Settings,
    SettingsError, DEFAULT_TIMESTAMP_FORMAT,
};
