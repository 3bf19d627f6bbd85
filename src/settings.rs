use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::data::request::QueryParams;

pub const DEFAULT_ENDPOINT: &str = "https://q0oo54zo2c.execute-api.eu-central-1.amazonaws.com/dev";
const CONFIG_FILE: &str = "chargebreed";
const ENV_PREFIX: &str = "CHARGEBREED";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiSettings,
    /// Initial values of the calculation form.
    pub defaults: QueryParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    pub endpoint: String,
    /// Request timeout in seconds. Unset means wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiSettings {
                endpoint: DEFAULT_ENDPOINT.to_string(),
                timeout_secs: None,
            },
            defaults: QueryParams::default(),
        }
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn builtin_defaults() -> anyhow::Result<config::File<config::FileSourceString, config::FileFormat>> {
    let json = serde_json::to_string(&AppConfig::default())?;
    Ok(config::File::from_str(&json, config::FileFormat::Json))
}

/// Built-in defaults, overridden by an optional `chargebreed.toml` in the
/// working directory, overridden by `CHARGEBREED_API__ENDPOINT`-style
/// environment variables.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(builtin_defaults()?)
        .add_source(config::File::with_name(CONFIG_FILE).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
