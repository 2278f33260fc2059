use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api_connection::endpoints::RecipeDetail;
use crate::storage::{load_json, save_json, KeyValueStore};

pub const FAVORITES_KEY: &str = "recipesFavorites";

/// A saved snapshot of a recipe, so favorites can be shown without the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRecipe {
    #[serde(flatten)]
    pub recipe: RecipeDetail,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    Removed,
}

pub struct FavoritesStore<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> FavoritesStore<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<FavoriteRecipe>> {
        Ok(load_json(self.store, FAVORITES_KEY)?.unwrap_or_default())
    }

    fn save(&self, favorites: &[FavoriteRecipe]) -> Result<()> {
        save_json(self.store, FAVORITES_KEY, &favorites)
    }

    pub fn get(&self, recipe_id: u64) -> Result<Option<FavoriteRecipe>> {
        Ok(self
            .list()?
            .into_iter()
            .find(|favorite| favorite.recipe.id == recipe_id))
    }

    pub fn is_favorite(&self, recipe_id: u64) -> Result<bool> {
        Ok(self.get(recipe_id)?.is_some())
    }

    pub fn toggle(&self, recipe: &RecipeDetail) -> Result<FavoriteToggle> {
        self.toggle_at(recipe, Utc::now())
    }

    pub fn toggle_at(&self, recipe: &RecipeDetail, now: DateTime<Utc>) -> Result<FavoriteToggle> {
        let mut favorites = self.list()?;
        let outcome = match favorites.iter().position(|f| f.recipe.id == recipe.id) {
            Some(index) => {
                favorites.remove(index);
                FavoriteToggle::Removed
            }
            None => {
                favorites.push(FavoriteRecipe {
                    recipe: recipe.clone(),
                    saved_at: now,
                });
                FavoriteToggle::Added
            }
        };
        self.save(&favorites)?;
        info!(recipe_id = recipe.id, ?outcome, "toggled favorite");
        Ok(outcome)
    }

    /// Returns whether anything was removed.
    pub fn remove(&self, recipe_id: u64) -> Result<bool> {
        let mut favorites = self.list()?;
        let before = favorites.len();
        favorites.retain(|favorite| favorite.recipe.id != recipe_id);
        let removed = favorites.len() != before;
        if removed {
            self.save(&favorites)?;
        }
        Ok(removed)
    }
}

pub fn format_favorites(favorites: &[FavoriteRecipe]) -> String {
    let count = favorites.len();
    let mut out = format!(
        "My Favorite Recipes\n{} recipe{} saved\n",
        count,
        if count == 1 { "" } else { "s" }
    );
    if favorites.is_empty() {
        out.push_str("\nYou haven't saved any favorites yet!\n");
        out.push_str("Search for recipes and use `favorites toggle <id>` to save them here.\n");
        return out;
    }
    for favorite in favorites {
        let ready = favorite
            .recipe
            .ready_in_minutes
            .filter(|minutes| *minutes > 0)
            .map(|minutes| format!("{} min", minutes))
            .unwrap_or_else(|| "Quick & Easy".to_string());
        out.push_str(&format!(
            "\n  [{}] {} ({})",
            favorite.recipe.id, favorite.recipe.title, ready
        ));
    }
    out.push('\n');
    out
}
