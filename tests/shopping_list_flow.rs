use async_trait::async_trait;
use recipe_planner::api_connection::endpoints::{Ingredient, RecipeDetail};
use recipe_planner::api_connection::{ApiConnectionError, RecipeSource};
use recipe_planner::meal_plan::{Day, MealPlanStore, RecipeRef, Slot};
use recipe_planner::shopping_list::grouper::format_line;
use recipe_planner::shopping_list::{generate_shopping_list, ShoppingListOutcome};
use recipe_planner::storage::{JsonFileStore, KeyValueStore, MemoryStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

struct CannedSource {
    recipes: HashMap<u64, RecipeDetail>,
    calls: Mutex<Vec<u64>>,
}

#[async_trait]
impl RecipeSource for CannedSource {
    async fn fetch_recipe_detail(&self, recipe_id: u64) -> Result<RecipeDetail, ApiConnectionError> {
        self.calls.lock().unwrap().push(recipe_id);
        self.recipes
            .get(&recipe_id)
            .cloned()
            .ok_or_else(|| ApiConnectionError::ApiError {
                status: reqwest::StatusCode::NOT_FOUND,
                error_body: format!("no recipe {}", recipe_id),
            })
    }
}

fn canned_recipes() -> HashMap<u64, RecipeDetail> {
    let pancakes: RecipeDetail = serde_json::from_str(
        r#"{
            "id": 5, "title": "Pancakes", "readyInMinutes": 20, "servings": 2,
            "extendedIngredients": [
                {"name": "flour", "amount": 2, "unit": "cup", "aisle": "Baking", "original": "2 cups flour"},
                {"name": "egg", "amount": 2, "unit": "", "aisle": "Dairy", "original": "2 eggs"},
                {"name": "salt", "unit": "pinch", "aisle": "Spices", "original": "a pinch of salt"}
            ]
        }"#,
    )
    .unwrap();
    let bread: RecipeDetail = serde_json::from_str(
        r#"{
            "id": 7, "title": "Bread",
            "extendedIngredients": [
                {"name": "Flour", "amount": 1, "unit": "cup", "aisle": "Baking", "original": "1 cup Flour"},
                {"name": "egg", "unit": "", "aisle": "Dairy", "original": "egg wash"},
                {"original": "water, as needed", "aisle": null}
            ]
        }"#,
    )
    .unwrap();
    HashMap::from([(5, pancakes), (7, bread)])
}

fn reference(recipe: &RecipeDetail) -> RecipeRef {
    RecipeRef::from(recipe)
}

#[tokio::test]
async fn test_plan_on_disk_to_grouped_shopping_list() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    let plans = MealPlanStore::new(&store);
    let recipes = canned_recipes();

    plans.add_meal(Day::Monday, Slot::Breakfast, reference(&recipes[&5])).unwrap();
    plans.add_meal(Day::Saturday, Slot::Breakfast, reference(&recipes[&5])).unwrap();
    plans.add_meal(Day::Sunday, Slot::Lunch, reference(&recipes[&7])).unwrap();

    // The persisted layout is plain camelCase JSON keyed by day and slot.
    let raw: serde_json::Value =
        serde_json::from_str(&store.get("mealPlan").unwrap().unwrap()).unwrap();
    assert_eq!(raw["monday"]["breakfast"]["readyInMinutes"], 20);
    assert!(raw["monday"]["dinner"].is_null());

    let source = Arc::new(CannedSource {
        recipes,
        calls: Mutex::new(Vec::new()),
    });
    let plan = plans.read_plan().unwrap();
    let outcome = generate_shopping_list(&plan, source.clone()).await.unwrap();

    let mut calls = source.calls.lock().unwrap().clone();
    calls.sort_unstable();
    assert_eq!(calls, vec![5, 7]);

    let list = match outcome {
        ShoppingListOutcome::Ready { recipe_count, list } => {
            assert_eq!(recipe_count, 2);
            list
        }
        other => panic!("expected a shopping list, got {:?}", other),
    };

    assert_eq!(
        list.category_names().collect::<Vec<_>>(),
        vec!["Baking", "Dairy", "Other", "Spices"]
    );

    let baking = list.category("Baking").unwrap();
    assert_eq!(baking.len(), 1);
    assert_eq!(format_line(&baking[0]), "flour - 3 cup");

    let dairy = list.category("Dairy").unwrap();
    assert_eq!(dairy[0].amount, 2.0);
    assert_eq!(dairy[0].original.as_deref(), Some("2 eggs"));

    let other = list.category("Other").unwrap();
    assert_eq!(format_line(&other[0]), "water, as needed");

    let spices = list.category("Spices").unwrap();
    assert_eq!(format_line(&spices[0]), "salt");
}

#[tokio::test]
async fn test_missing_recipe_fails_without_partial_list() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    let plans = MealPlanStore::new(&store);
    let recipes = canned_recipes();

    plans.add_meal(Day::Monday, Slot::Dinner, reference(&recipes[&5])).unwrap();
    plans
        .add_meal(
            Day::Tuesday,
            Slot::Dinner,
            RecipeRef {
                id: 404,
                title: "Gone".to_string(),
                image: None,
                ready_in_minutes: None,
                servings: None,
            },
        )
        .unwrap();

    let source = Arc::new(CannedSource {
        recipes,
        calls: Mutex::new(Vec::new()),
    });
    let err = generate_shopping_list(&plans.read_plan().unwrap(), source)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Failed to fetch recipe 404"));
}

#[test]
fn test_ingredient_defaults_match_api_nulls() {
    let ingredient: Ingredient =
        serde_json::from_str(r#"{"name": null, "amount": null, "unit": null, "aisle": null}"#).unwrap();
    assert_eq!(ingredient, Ingredient::default());
}

#[tokio::test]
async fn test_unknown_prep_minutes_do_not_block_shopping_list() {
    let stew: RecipeDetail = serde_json::from_str(
        r#"{
            "id": 9, "title": "Stew", "preparationMinutes": -1, "cookingMinutes": -1,
            "extendedIngredients": [
                {"name": "flour", "amount": 1, "unit": "tbsp", "aisle": "Baking", "original": "1 tbsp flour"}
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(stew.preparation_minutes, Some(-1));

    let store = MemoryStore::new();
    let plans = MealPlanStore::new(&store);
    plans.add_meal(Day::Friday, Slot::Dinner, reference(&stew)).unwrap();

    let source = Arc::new(CannedSource {
        recipes: HashMap::from([(9, stew)]),
        calls: Mutex::new(Vec::new()),
    });
    let outcome = generate_shopping_list(&plans.read_plan().unwrap(), source)
        .await
        .unwrap();

    match outcome {
        ShoppingListOutcome::Ready { recipe_count, list } => {
            assert_eq!(recipe_count, 1);
            assert_eq!(format_line(&list.category("Baking").unwrap()[0]), "flour - 1 tbsp");
        }
        other => panic!("expected a shopping list, got {:?}", other),
    }
}
