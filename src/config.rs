use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use validator::Validate;

/// Configuration for the workbook import host
#[derive(Debug, Deserialize, Validate, Clone)]
pub struct Config {
    /// Endpoint that receives raw file bytes and answers with the converted workbook
    #[validate(url)]
    pub upload_url: String,

    /// Per-request timeout in seconds
    #[validate(range(min = 1, max = 600))]
    pub request_timeout_secs: u64,

    /// Log level (e.g., info, debug, trace)
    pub log_level: String,

    /// Where the host writes imported workbooks
    pub output_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upload_url: "http://localhost:8000/api/upload".to_string(),
            request_timeout_secs: 30,
            log_level: "info".to_string(),
            output_dir: ".".to_string(),
        }
    }
}

impl Config {
    /// Defaults, then `~/.workbook-import/config.*`, then `WORKBOOK_IMPORT__*` env vars.
    pub fn load() -> Result<Self, config::ConfigError> {
        let home = dirs::home_dir()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| ".".to_string());
        Self::load_from(&format!("{}/.workbook-import/config", home))
    }

    /// Same layering as [`Config::load`] with an explicit file stem.
    pub fn load_from(file_stem: &str) -> Result<Self, config::ConfigError> {
        let defaults = Config::default();
        let settings = config::Config::builder()
            .set_default("upload_url", defaults.upload_url)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs)?
            .set_default("log_level", defaults.log_level)?
            .set_default("output_dir", defaults.output_dir)?
            .add_source(config::File::with_name(file_stem).required(false))
            // Environment overrides: WORKBOOK_IMPORT__UPLOAD_URL, etc.
            .add_source(config::Environment::with_prefix("WORKBOOK_IMPORT").separator("__"))
            .build()?;

        let cfg: Config = settings.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn output_path(&self) -> &Path {
        Path::new(&self.output_dir)
    }
}
