use std::env;

/// Runtime configuration, assembled once at startup. The backend credentials
/// live here and are handed to the client constructors explicitly; nothing
/// reads the environment after this point.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub search: SearchSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub base_url: String,
    pub api_key: String,
    pub chat_model: String,
    pub vision_model: String,
    pub max_tokens: usize,
    pub temperature: f32,
}

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub base_url: String,
    pub api_key: String,
    pub engine_id: String,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

fn required(name: &'static str) -> Result<String, SettingsError> {
    env::var(name).map_err(|_| SettingsError::MissingVar(name))
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, SettingsError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| SettingsError::InvalidValue { name, value }),
        Err(_) => Ok(default),
    }
}

fn flag(name: &str) -> bool {
    env::var(name)
        .map(|v| v.to_lowercase() == "true" || v == "1")
        .unwrap_or(false)
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Ok(Self {
            server: ServerSettings {
                host: var_or("SERVER_HOST", "0.0.0.0"),
                port: parse_or("SERVER_PORT", 3000)?,
            },
            llm: LlmSettings {
                base_url: var_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
                api_key: required("OPENAI_API_KEY")?,
                chat_model: var_or("CHAT_MODEL", "gpt-4o-mini"),
                vision_model: var_or("VISION_MODEL", "gpt-4o"),
                max_tokens: parse_or("LLM_MAX_TOKENS", 1024)?,
                temperature: parse_or("LLM_TEMPERATURE", 0.7)?,
            },
            search: SearchSettings {
                base_url: var_or(
                    "SEARCH_BASE_URL",
                    "https://www.googleapis.com/customsearch/v1",
                ),
                api_key: required("GOOGLE_API_KEY")?,
                engine_id: required("SEARCH_ENGINE_ID")?,
            },
            logging: LoggingSettings {
                level: var_or("LOG_LEVEL", "info"),
                enable_json: flag("LOG_JSON"),
            },
        })
    }
}
