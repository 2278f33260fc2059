use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::normalizer::normalize;
use crate::api_connection::endpoints::RecipeDetail;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AggregatedIngredient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub aisle: String,
    pub original: Option<String>,
}

/// Grouping key to merged line, in order of first appearance.
pub type AggregatedIngredients = IndexMap<String, AggregatedIngredient>;

/// Merges the ingredients of every recipe into one line per grouping key.
///
/// Amounts are summed. Name, unit, aisle and original text come from the
/// first occurrence of a key and are never overwritten.
pub fn aggregate_ingredients<'a, I>(recipes: I) -> AggregatedIngredients
where
    I: IntoIterator<Item = &'a RecipeDetail>,
{
    let mut aggregated = AggregatedIngredients::new();

    for recipe in recipes {
        for ingredient in recipe.ingredients() {
            let normalized = normalize(ingredient);
            match aggregated.entry(normalized.key) {
                Entry::Occupied(mut entry) => {
                    entry.get_mut().amount += normalized.amount;
                }
                Entry::Vacant(entry) => {
                    entry.insert(AggregatedIngredient {
                        name: normalized.name.to_string(),
                        amount: normalized.amount,
                        unit: normalized.unit.to_string(),
                        aisle: normalized.aisle.to_string(),
                        original: normalized.original.map(str::to_string),
                    });
                }
            }
        }
    }

    aggregated
}
