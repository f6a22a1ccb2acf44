//! Configuration for the product catalog API

use core_config::{app_info, server::ServerConfig, AppInfo, FromEnv};
use database::mongodb::MongoConfig;
use std::path::{Path, PathBuf};

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            mongodb: MongoConfig::from_env()?,
            server: ServerConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }
}

/// Load `.env` from the working directory or one of its parents.
///
/// Variables already present in the process are left untouched. A missing
/// file is not an error.
pub fn load_dotenv() -> eyre::Result<Option<PathBuf>> {
    found_or_none(dotenvy::dotenv())
}

/// Same as [`load_dotenv`] for an explicit file
pub fn load_dotenv_from(path: &Path) -> eyre::Result<Option<PathBuf>> {
    found_or_none(dotenvy::from_path(path).map(|()| path.to_path_buf()))
}

fn found_or_none(result: dotenvy::Result<PathBuf>) -> eyre::Result<Option<PathBuf>> {
    match result {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(eyre::eyre!("Failed to load .env file: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        temp_env::with_vars_unset(
            [
                "HOST",
                "PORT",
                "MONGODB_URL",
                "MONGO_URL",
                "MONGODB_DATABASE",
                "MONGO_DATABASE",
                "APP_ENV",
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.mongodb.url(), "mongodb://localhost:27017");
                assert_eq!(config.mongodb.database(), "product_catalog");
                assert!(config.environment.is_development());
                assert_eq!(config.app.name, "products_api");
            },
        );
    }

    #[test]
    fn test_config_rejects_invalid_port() {
        temp_env::with_var("PORT", Some("eighty"), || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn test_dotenv_file_fills_gaps_without_overriding_process() {
        let path = std::env::temp_dir().join(format!("products-api-{}.env", std::process::id()));
        std::fs::write(&path, "PORT=9090\nMONGODB_DATABASE=from_file\n").unwrap();

        temp_env::with_vars(
            [("PORT", None), ("MONGODB_DATABASE", Some("from_process"))],
            || {
                assert_eq!(load_dotenv_from(&path).unwrap(), Some(path.clone()));

                let config = Config::from_env().unwrap();
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.mongodb.database(), "from_process");
            },
        );

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_dotenv_file_is_not_an_error() {
        let path = std::env::temp_dir().join("products-api-does-not-exist.env");
        assert_eq!(load_dotenv_from(&path).unwrap(), None);
    }
}
