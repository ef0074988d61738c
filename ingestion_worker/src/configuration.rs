use common::{domain::entities::document::DocumentType, helper::error_chain_fmt};
use secrecy::Secret;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

pub use common::configuration::{DatabaseSettings, DocumentStoreBackend, DocumentStoreSettings};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub worker: WorkerSettings,
    pub metric_source: MetricSourceSettings,
    pub database: DatabaseSettings,
    pub document_store: DocumentStoreSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WorkerSettings {
    /// Metric domain ingested by this process
    pub domain: DocumentType,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricSourceSettings {
    pub base_url: String,
    /// Bearer token sent to the provider. Acquiring and refreshing it is done outside the worker.
    pub access_token: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_ms: u64,
}

impl MetricSourceSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }
}

/// Extracts worker settings from configuration files and env variables
///
/// `configuration/base.yaml` holds the shared settings, `configuration/{env}.yaml`
/// the ones of the environment selected by `APP_ENVIRONMENT` (`local` by default).
/// Env variables prefixed with `APP_` override both, with `__` between sections:
/// `APP_WORKER__DOMAIN=weight` sets `Settings.worker.domain`.
pub fn get_configuration() -> Result<Settings, ConfigurationError> {
    let configuration_directory = std::env::current_dir()?.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigurationError::Environment)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize::<Settings>()?)
}

/// The possible runtime environment for the worker.
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

#[derive(thiserror::Error)]
pub enum ConfigurationError {
    #[error("Failed to determine the current directory: {0}")]
    CurrentDirectory(#[from] std::io::Error),
    #[error("Failed to parse APP_ENVIRONMENT: {0}")]
    Environment(String),
    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

impl std::fmt::Debug for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
