use serde::{Deserialize, Serialize};

pub const DEFAULT_SPOONACULAR_BASE_URL: &str = "https://api.spoonacular.com";
pub const FIND_BY_INGREDIENTS_PATH: &str = "/recipes/findByIngredients";

pub fn recipe_information_path(recipe_id: u64) -> String {
    format!("/recipes/{}/information", recipe_id)
}

/// One hit from the find-by-ingredients search.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub used_ingredient_count: u32,
    #[serde(default)]
    pub missed_ingredient_count: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub unit_short: Option<String>,
    #[serde(default)]
    pub unit_long: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Measures {
    #[serde(default)]
    pub metric: Option<Measure>,
    #[serde(default)]
    pub us: Option<Measure>,
}

// Every field is optional: the API omits or nulls them freely and the
// shopping list falls back to defaults instead of failing.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub aisle: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measures: Option<Measures>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct InstructionStep {
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub step: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct AnalyzedInstruction {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub steps: Vec<InstructionStep>,
}

/// Full recipe as returned by the information endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub extended_ingredients: Option<Vec<Ingredient>>,
    #[serde(default)]
    pub analyzed_instructions: Option<Vec<AnalyzedInstruction>>,
    #[serde(default)]
    pub instructions: Option<String>,
    // Spoonacular sends -1 when it does not know these.
    #[serde(default)]
    pub preparation_minutes: Option<i32>,
    #[serde(default)]
    pub cooking_minutes: Option<i32>,
    #[serde(default)]
    pub very_healthy: Option<bool>,
}

impl RecipeDetail {
    pub fn ingredients(&self) -> &[Ingredient] {
        self.extended_ingredients.as_deref().unwrap_or(&[])
    }

    /// Steps of the first analyzed instruction block, if any.
    pub fn first_instruction_steps(&self) -> &[InstructionStep] {
        self.analyzed_instructions
            .as_deref()
            .and_then(|blocks| blocks.first())
            .map(|block| block.steps.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_detail_tolerates_missing_and_null_fields() {
        let detail: RecipeDetail = serde_json::from_str(
            r#"{"id": 42, "title": "Toast", "extendedIngredients": null, "veryHealthy": null}"#,
        )
        .unwrap();
        assert_eq!(detail.id, 42);
        assert!(detail.ingredients().is_empty());
        assert!(detail.first_instruction_steps().is_empty());
        assert_eq!(detail.very_healthy, None);
    }

    #[test]
    fn test_ingredient_parses_spoonacular_shape() {
        let ingredient: Ingredient = serde_json::from_str(
            r#"{
                "id": 20081,
                "aisle": "Baking",
                "name": "flour",
                "amount": 2.0,
                "unit": "cups",
                "original": "2 cups all-purpose flour",
                "measures": {"metric": {"amount": 250.0, "unitShort": "g", "unitLong": "grams"}}
            }"#,
        )
        .unwrap();
        assert_eq!(ingredient.name.as_deref(), Some("flour"));
        assert_eq!(ingredient.amount, Some(2.0));
        let metric = ingredient.measures.unwrap().metric.unwrap();
        assert_eq!(metric.unit_short.as_deref(), Some("g"));
    }

    #[test]
    fn test_recipe_information_path() {
        assert_eq!(recipe_information_path(716429), "/recipes/716429/information");
    }
}
