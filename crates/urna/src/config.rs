//! Layered configuration.
//!
//! Precedence, lowest first: built-in defaults, `urna.toml` (or the file given
//! with `--config`), `URNA_*` environment variables, command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use urna_fetch::{DEFAULT_BASE_URL, Endpoints, FetchOptions};

pub const DEFAULT_CONFIG_FILE: &str = "urna.toml";
pub const ENV_PREFIX: &str = "URNA_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {0} does not exist")]
    MissingFile(PathBuf),

    #[error(transparent)]
    Figment(#[from] Box<figment::Error>),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `{region}-p000407-cs.json` catalogs.
    pub catalog_dir: PathBuf,
    /// Directory the `.bu` files are written to.
    pub output_dir: PathBuf,
    pub base_url: String,
    pub batch_size: usize,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: Option<String>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_dir: PathBuf::from("state_ballots"),
            output_dir: PathBuf::from("ballot_files"),
            base_url: DEFAULT_BASE_URL.to_string(),
            batch_size: 100,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: None,
            log_level: "info".to_string(),
        }
    }
}

/// Values set on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Config {
    pub fn figment(file: Option<&Path>, overrides: &Overrides) -> Figment {
        let file = file.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
    }

    /// Load every layer. An explicitly named file must exist; the default
    /// `urna.toml` is optional.
    pub fn load(file: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        if let Some(path) = file
            && !path.is_file()
        {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }
        Config::figment(file, overrides)
            .extract()
            .map_err(|e| ConfigError::Figment(Box::new(e)))
    }

    /// Reject settings that would make the run meaningless. Called before any
    /// network activity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid("batch_size must be at least 1".into()));
        }
        if self.request_timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeouts must be at least 1 second".into()));
        }
        self.endpoints().map(|_| ())
    }

    pub fn endpoints(&self) -> Result<Endpoints, ConfigError> {
        Endpoints::parse(&self.base_url)
            .map_err(|e| ConfigError::Invalid(format!("base_url {:?}: {e}", self.base_url)))
    }

    pub fn fetch_options(&self) -> FetchOptions {
        let options = FetchOptions::default()
            .request_timeout(Duration::from_secs(self.request_timeout_secs))
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs));
        match &self.user_agent {
            Some(user_agent) => options.user_agent(user_agent.clone()),
            None => options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_any_source() {
        Jail::expect_with(|_jail| {
            let config = Config::load(None, &Overrides::default()).map_err(|e| e.to_string())?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn layers_apply_in_order() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "urna.toml",
                r#"
                    batch_size = 50
                    output_dir = "from-file"
                    request_timeout_secs = 5
                "#,
            )?;
            jail.set_env("URNA_BATCH_SIZE", "25");

            let overrides = Overrides {
                output_dir: Some(PathBuf::from("from-cli")),
                ..Overrides::default()
            };
            let config = Config::load(None, &overrides).map_err(|e| e.to_string())?;

            assert_eq!(config.batch_size, 25);
            assert_eq!(config.output_dir, PathBuf::from("from-cli"));
            assert_eq!(config.request_timeout_secs, 5);
            assert_eq!(config.catalog_dir, PathBuf::from("state_ballots"));
            Ok(())
        });
    }

    #[test]
    fn explicit_file_must_exist() {
        Jail::expect_with(|_jail| {
            let result = Config::load(Some(Path::new("nope.toml")), &Overrides::default());
            assert!(matches!(result, Err(ConfigError::MissingFile(_))));
            Ok(())
        });
    }

    #[test]
    fn validate_rejects_zero_batch_and_bad_url() {
        let config = Config {
            batch_size: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = Config {
            base_url: "resultados".into(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn fetch_options_follow_config() {
        let config = Config {
            request_timeout_secs: 3,
            user_agent: Some("probe/1".into()),
            ..Config::default()
        };
        let options = config.fetch_options();
        assert_eq!(options.timeouts.request, Duration::from_secs(3));
        assert_eq!(options.user_agent, "probe/1");
    }
}
