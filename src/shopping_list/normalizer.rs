use crate::api_connection::endpoints::Ingredient;

pub const DEFAULT_AISLE: &str = "Other";
const KEY_SEPARATOR: char = '_';

/// One ingredient with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedIngredient<'a> {
    pub key: String,
    pub name: &'a str,
    pub unit: &'a str,
    pub aisle: &'a str,
    pub amount: f64,
    pub original: Option<&'a str>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Case-folded `name` and `unit` joined by an underscore. Units are compared
/// as written, so "clove" and "cloves" stay apart.
pub fn grouping_key(name: &str, unit: &str) -> String {
    let mut key = name.to_lowercase();
    key.push(KEY_SEPARATOR);
    key.push_str(&unit.to_lowercase());
    key
}

pub fn normalize(ingredient: &Ingredient) -> NormalizedIngredient<'_> {
    let name = non_empty(&ingredient.name)
        .or_else(|| non_empty(&ingredient.original))
        .unwrap_or("");
    let unit = non_empty(&ingredient.unit).unwrap_or("");
    let aisle = non_empty(&ingredient.aisle).unwrap_or(DEFAULT_AISLE);
    let amount = ingredient.amount.filter(|a| a.is_finite()).unwrap_or(0.0);

    NormalizedIngredient {
        key: grouping_key(name, unit),
        name,
        unit,
        aisle,
        amount,
        original: ingredient.original.as_deref(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(name: Option<&str>, unit: Option<&str>) -> Ingredient {
        Ingredient {
            name: name.map(str::to_string),
            unit: unit.map(str::to_string),
            ..Ingredient::default()
        }
    }

    #[test]
    fn test_key_is_case_folded() {
        let raw_a = ingredient(Some("Flour"), Some("Cup"));
        let raw_b = ingredient(Some("flour"), Some("cup"));
        let a = normalize(&raw_a);
        let b = normalize(&raw_b);
        assert_eq!(a.key, "flour_cup");
        assert_eq!(a.key, b.key);
        // Display name keeps its casing.
        assert_eq!(a.name, "Flour");
    }

    #[test]
    fn test_missing_unit_gives_empty_component() {
        assert_eq!(normalize(&ingredient(Some("egg"), None)).key, "egg_");
        assert_eq!(normalize(&ingredient(Some("egg"), Some(""))).key, "egg_");
    }

    #[test]
    fn test_units_are_not_singularized() {
        let raw_clove = ingredient(Some("garlic"), Some("clove"));
        let raw_cloves = ingredient(Some("garlic"), Some("cloves"));
        let clove = normalize(&raw_clove);
        let cloves = normalize(&raw_cloves);
        assert_ne!(clove.key, cloves.key);
    }

    #[test]
    fn test_name_falls_back_to_original() {
        let mut raw = ingredient(None, Some("pinch"));
        raw.original = Some("A pinch of Salt".to_string());
        let normalized = normalize(&raw);
        assert_eq!(normalized.name, "A pinch of Salt");
        assert_eq!(normalized.key, "a pinch of salt_pinch");
    }

    #[test]
    fn test_everything_missing_degrades_to_defaults() {
        let raw = Ingredient::default();
        let normalized = normalize(&raw);
        assert_eq!(normalized.key, "_");
        assert_eq!(normalized.name, "");
        assert_eq!(normalized.unit, "");
        assert_eq!(normalized.aisle, DEFAULT_AISLE);
        assert_eq!(normalized.amount, 0.0);
        assert_eq!(normalized.original, None);
    }
}
