use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt;
use tracing::{debug, error};

use super::endpoints::{
    recipe_information_path, RecipeDetail, RecipeSummary, FIND_BY_INGREDIENTS_PATH,
};
use crate::config::{Config, API_KEY_ENV_VAR};

#[derive(Debug)]
pub enum ApiConnectionError {
    MissingApiKey(String),
    NetworkError(reqwest::Error),
    SerializationError(serde_json::Error),
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
    InvalidQuery(String),
}

impl fmt::Display for ApiConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiConnectionError::MissingApiKey(key_name) => {
                write!(f, "API key not found in environment: {}", key_name)
            }
            ApiConnectionError::NetworkError(err) => write!(f, "Network error: {}", err),
            ApiConnectionError::SerializationError(err) => {
                write!(f, "Serialization error: {}", err)
            }
            ApiConnectionError::ApiError { status, error_body } => {
                write!(f, "API error {}: {}", status, error_body)
            }
            ApiConnectionError::InvalidQuery(reason) => write!(f, "Invalid query: {}", reason),
        }
    }
}

impl Error for ApiConnectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiConnectionError::NetworkError(err) => Some(err),
            ApiConnectionError::SerializationError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiConnectionError {
    fn from(err: reqwest::Error) -> Self {
        ApiConnectionError::NetworkError(err)
    }
}

impl From<serde_json::Error> for ApiConnectionError {
    fn from(err: serde_json::Error) -> Self {
        ApiConnectionError::SerializationError(err)
    }
}

/// Anything that can hand back the full detail of a recipe by id.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    async fn fetch_recipe_detail(&self, recipe_id: u64) -> Result<RecipeDetail, ApiConnectionError>;
}

#[derive(Clone, Debug)]
pub struct SpoonacularClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl SpoonacularClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            base_url: config.spoonacular_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn api_key(&self) -> Result<&str, ApiConnectionError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() && key != "undefined" => Ok(key),
            _ => Err(ApiConnectionError::MissingApiKey(API_KEY_ENV_VAR.to_string())),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiConnectionError> {
        let api_key = self.api_key()?;
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "sending request");

        let response = self
            .http
            .get(&url)
            .query(&[("apiKey", api_key)])
            .query(query)
            .send()
            .await?;

        let status = response.status();
        debug!(%url, %status, "received response");

        if status.is_success() {
            let body = response.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(%url, %status, "API returned an error");
            Err(ApiConnectionError::ApiError { status, error_body })
        }
    }

    /// Searches recipes that use the given comma-separated ingredients.
    pub async fn find_by_ingredients(
        &self,
        ingredients: &str,
        number: u32,
    ) -> Result<Vec<RecipeSummary>, ApiConnectionError> {
        let ingredients = ingredients.trim();
        if ingredients.is_empty() {
            return Err(ApiConnectionError::InvalidQuery(
                "at least one ingredient is required".to_string(),
            ));
        }

        self.get_json(
            FIND_BY_INGREDIENTS_PATH,
            &[
                ("ingredients", ingredients.to_string()),
                ("number", number.to_string()),
            ],
        )
        .await
    }

    pub async fn recipe_information(
        &self,
        recipe_id: u64,
    ) -> Result<RecipeDetail, ApiConnectionError> {
        self.get_json(&recipe_information_path(recipe_id), &[]).await
    }
}

#[async_trait]
impl RecipeSource for SpoonacularClient {
    async fn fetch_recipe_detail(&self, recipe_id: u64) -> Result<RecipeDetail, ApiConnectionError> {
        self.recipe_information(recipe_id).await
    }
}
