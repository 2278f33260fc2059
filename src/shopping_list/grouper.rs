use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::aggregator::{AggregatedIngredient, AggregatedIngredients};

/// Aggregated lines bucketed by aisle. Categories iterate alphabetically,
/// lines within a category keep aggregation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ShoppingList {
    categories: BTreeMap<String, Vec<AggregatedIngredient>>,
}

impl ShoppingList {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn category(&self, name: &str) -> Option<&[AggregatedIngredient]> {
        self.categories.get(name).map(Vec::as_slice)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &[AggregatedIngredient])> {
        self.categories
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }

    pub fn item_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }
}

pub fn group_by_category(aggregated: AggregatedIngredients) -> ShoppingList {
    let mut categories: BTreeMap<String, Vec<AggregatedIngredient>> = BTreeMap::new();
    for (_, ingredient) in aggregated {
        categories
            .entry(ingredient.aisle.clone())
            .or_default()
            .push(ingredient);
    }
    ShoppingList { categories }
}

/// At most two decimals, trailing zeros dropped: `3`, `2.5`, `0.33`.
pub fn format_amount(amount: f64) -> String {
    let fixed = format!("{:.2}", amount);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// A total of exactly zero means "unspecified": only the name is shown.
pub fn format_line(ingredient: &AggregatedIngredient) -> String {
    if ingredient.amount == 0.0 {
        return ingredient.name.clone();
    }
    let quantity = format!("{} {}", format_amount(ingredient.amount), ingredient.unit);
    format!("{} - {}", ingredient.name, quantity.trim_end())
}

impl fmt::Display for ShoppingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (category, items)) in self.categories().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", category)?;
            for item in items {
                writeln!(f, "  [ ] {}", format_line(item))?;
            }
        }
        Ok(())
    }
}
