use dotenv::dotenv;
use serde::Deserialize;
use std::env;
use std::path::Path;

/// Variable de entorno con la ruta del archivo TOML de configuración.
pub const CONFIG_ENV: &str = "TRANSPORT_CATALOGUE_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("router_threads must be at least 1")]
    InvalidThreads,
}

/// Configuración del proceso. Lo que depende de los datos (ruteo, dibujo,
/// archivo del snapshot) viene en los documentos JSON, no aquí.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Filtro por defecto de tracing cuando `RUST_LOG` no está definida.
    pub log_filter: String,
    pub pretty_output: bool,
    /// Hilos para precalcular los caminos mínimos.
    pub router_threads: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            pretty_output: true,
            router_threads: num_cpus::get(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.router_threads == 0 {
            return Err(ConfigError::InvalidThreads);
        }
        Ok(())
    }
}

/// Carga `.env` si existe y luego el archivo indicado por `TRANSPORT_CATALOGUE_CONFIG`.
/// Sin esa variable se usan los valores por defecto.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    dotenv().ok();

    match env::var(CONFIG_ENV) {
        Ok(path) => AppConfig::from_file(path),
        Err(_) => Ok(AppConfig::default()),
    }
}
