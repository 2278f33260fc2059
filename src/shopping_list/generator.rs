use std::error::Error;
use std::fmt;
use std::sync::Arc;
use tokio::task::{JoinError, JoinSet};
use tracing::{error, info};

use super::aggregator::aggregate_ingredients;
use super::grouper::{group_by_category, ShoppingList};
use crate::api_connection::connection::{ApiConnectionError, RecipeSource};
use crate::api_connection::endpoints::RecipeDetail;
use crate::meal_plan::MealPlan;

#[derive(Debug, Clone, PartialEq)]
pub enum ShoppingListOutcome {
    NoMealsPlanned,
    NoIngredients { recipe_count: usize },
    Ready { recipe_count: usize, list: ShoppingList },
}

#[derive(Debug)]
pub enum ShoppingListError {
    FetchFailed {
        recipe_id: u64,
        source: ApiConnectionError,
    },
    TaskFailed(JoinError),
}

impl fmt::Display for ShoppingListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShoppingListError::FetchFailed { recipe_id, source } => {
                write!(f, "Failed to fetch recipe {}: {}", recipe_id, source)
            }
            ShoppingListError::TaskFailed(err) => write!(f, "Recipe fetch task failed: {}", err),
        }
    }
}

impl Error for ShoppingListError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ShoppingListError::FetchFailed { source, .. } => Some(source),
            ShoppingListError::TaskFailed(err) => Some(err),
        }
    }
}

/// Fetches every recipe at once and waits for the whole batch.
///
/// The result keeps the order of `recipe_ids`. The first failure is returned
/// and the fetches still in flight are aborted.
pub async fn fetch_recipe_details(
    source: Arc<dyn RecipeSource>,
    recipe_ids: &[u64],
) -> Result<Vec<RecipeDetail>, ShoppingListError> {
    let mut fetches = JoinSet::new();
    for (index, &recipe_id) in recipe_ids.iter().enumerate() {
        let source = Arc::clone(&source);
        fetches.spawn(async move { (index, recipe_id, source.fetch_recipe_detail(recipe_id).await) });
    }

    let mut details: Vec<Option<RecipeDetail>> = vec![None; recipe_ids.len()];
    while let Some(joined) = fetches.join_next().await {
        let (index, recipe_id, result) = joined.map_err(ShoppingListError::TaskFailed)?;
        match result {
            Ok(detail) => details[index] = Some(detail),
            Err(source) => {
                error!(recipe_id, error = %source, "recipe fetch failed, abandoning shopping list");
                return Err(ShoppingListError::FetchFailed { recipe_id, source });
            }
        }
    }

    Ok(details.into_iter().flatten().collect())
}

/// Builds the shopping list for every recipe referenced by `plan`.
pub async fn generate_shopping_list(
    plan: &MealPlan,
    source: Arc<dyn RecipeSource>,
) -> Result<ShoppingListOutcome, ShoppingListError> {
    let recipe_ids = plan.recipe_ids();
    if recipe_ids.is_empty() {
        info!("no meals planned, skipping shopping list");
        return Ok(ShoppingListOutcome::NoMealsPlanned);
    }

    info!(recipes = recipe_ids.len(), "fetching recipes for shopping list");
    let recipes = fetch_recipe_details(source, &recipe_ids).await?;
    let list = group_by_category(aggregate_ingredients(&recipes));
    let recipe_count = recipes.len();

    if list.is_empty() {
        Ok(ShoppingListOutcome::NoIngredients { recipe_count })
    } else {
        info!(recipe_count, items = list.item_count(), "shopping list ready");
        Ok(ShoppingListOutcome::Ready { recipe_count, list })
    }
}
