use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// JSON snapshot of stored sessions; in-memory only when unset
    pub sessions_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed to call the API from a browser (the dashboard)
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from built-in defaults, then `path` (any format the
    /// `config` crate understands, extension optional), then `CALMMATE__*`
    /// environment variables (e.g. `CALMMATE__SERVICE__HTTP__PORT=9000`).
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "calmmate")?
            .set_default("service.log_level", "info")?
            .set_default("service.http.bind", "127.0.0.1")?
            .set_default("service.http.port", 8000)?
            .set_default("cors.allowed_origins", vec!["http://localhost:3000"])?
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("CALMMATE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Address string for the HTTP listener
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.service.http.bind, self.service.http.port)
    }
}
