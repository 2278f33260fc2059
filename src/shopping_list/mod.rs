pub mod aggregator;
pub mod generator;
pub mod grouper;
pub mod normalizer;

pub use aggregator::{aggregate_ingredients, AggregatedIngredient, AggregatedIngredients};
pub use generator::{generate_shopping_list, ShoppingListError, ShoppingListOutcome};
pub use grouper::{group_by_category, ShoppingList};
pub use normalizer::{grouping_key, normalize, NormalizedIngredient};
