mod settings;

pub use settings::{
    LlmSettings, LoggingSettings, SearchSettings, ServerSettings, Settings, SettingsError,
};
