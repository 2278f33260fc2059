use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::api_connection::endpoints::RecipeSummary;
use crate::storage::{load_json, save_json, KeyValueStore};

pub const SESSION_KEY: &str = "lastSearch";

/// What the user last searched for, kept so `back` can show it again.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    pub last_search_term: String,
    pub last_search_results: Option<Vec<RecipeSummary>>,
}

impl Session {
    pub fn load(store: &dyn KeyValueStore) -> Result<Self> {
        Ok(load_json(store, SESSION_KEY)?.unwrap_or_default())
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        save_json(store, SESSION_KEY, self)
    }

    pub fn record_search(&mut self, term: &str, results: Vec<RecipeSummary>) {
        self.last_search_term = term.to_string();
        self.last_search_results = Some(results);
    }
}
