use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::api_connection::connection::{ApiConnectionError, SpoonacularClient};
use crate::api_connection::endpoints::RecipeSummary;
use crate::session::Session;

pub const SEARCH_RESULT_COUNT: u32 = 10;
pub const SURPRISE_RESULT_COUNT: u32 = 5;
pub const SURPRISE_INGREDIENTS: [&str; 5] = ["chicken", "pasta", "tomato", "cheese", "onion"];

pub fn pick_surprise_ingredient<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    SURPRISE_INGREDIENTS.choose(rng).copied().unwrap_or(SURPRISE_INGREDIENTS[0])
}

/// Searches by ingredients and remembers the term and results in `session`.
pub async fn search_recipes(
    client: &SpoonacularClient,
    session: &mut Session,
    ingredients: &str,
    number: u32,
) -> Result<Vec<RecipeSummary>, ApiConnectionError> {
    let term = ingredients.trim();
    info!(ingredients = term, number, "searching recipes");
    let results = client.find_by_ingredients(term, number).await?;
    info!(count = results.len(), "search complete");
    session.record_search(term, results.clone());
    Ok(results)
}

pub fn format_search_results(results: &[RecipeSummary]) -> String {
    if results.is_empty() {
        return "No recipes found. Try different ingredients!\n".to_string();
    }
    results
        .iter()
        .map(|recipe| {
            format!(
                "[{}] {}\n    Uses {} of your ingredients, missing {}\n",
                recipe.id, recipe.title, recipe.used_ingredient_count, recipe.missed_ingredient_count
            )
        })
        .collect()
}
