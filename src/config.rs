use std::env;
use std::path::PathBuf;

use tracing::info;

use crate::api_connection::endpoints::DEFAULT_SPOONACULAR_BASE_URL;
use crate::jokes::DEFAULT_JOKE_API_URL;

pub const API_KEY_ENV_VAR: &str = "SPOONACULAR_API_KEY";
pub const BASE_URL_ENV_VAR: &str = "SPOONACULAR_BASE_URL";
pub const JOKE_URL_ENV_VAR: &str = "JOKE_API_URL";
pub const DATA_DIR_ENV_VAR: &str = "RECIPE_PLANNER_DATA_DIR";
pub const DEFAULT_DATA_DIR: &str = ".recipe_planner";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub spoonacular_base_url: String,
    pub joke_api_url: String,
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            spoonacular_base_url: DEFAULT_SPOONACULAR_BASE_URL.to_string(),
            joke_api_url: DEFAULT_JOKE_API_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl Config {
    /// Reads the process environment, after pulling in a `.env` file if one exists.
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = lookup(API_KEY_ENV_VAR).filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            info!("{API_KEY_ENV_VAR} not set, recipe commands will be unavailable");
        }

        Self {
            api_key,
            spoonacular_base_url: load_or_default(
                &lookup,
                BASE_URL_ENV_VAR,
                DEFAULT_SPOONACULAR_BASE_URL,
            ),
            joke_api_url: load_or_default(&lookup, JOKE_URL_ENV_VAR, DEFAULT_JOKE_API_URL),
            data_dir: PathBuf::from(load_or_default(&lookup, DATA_DIR_ENV_VAR, DEFAULT_DATA_DIR)),
        }
    }
}

fn load_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
}
