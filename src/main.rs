use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use recipe_planner::api_connection::{RecipeSource, SpoonacularClient};
use recipe_planner::cli::{parse_args, Command, FavoritesCommand, PlanCommand};
use recipe_planner::config::Config;
use recipe_planner::export::export_json;
use recipe_planner::favorites::{format_favorites, FavoriteToggle, FavoritesStore};
use recipe_planner::jokes::{format_joke, JokeClient};
use recipe_planner::meal_plan::{format_meal_plan, MealPlanStore, RecipeRef};
use recipe_planner::recipe_details::render_recipe_detail;
use recipe_planner::recipe_search::{
    format_search_results, pick_surprise_ingredient, search_recipes, SURPRISE_RESULT_COUNT,
};
use recipe_planner::session::Session;
use recipe_planner::shopping_list::{generate_shopping_list, ShoppingListOutcome};
use recipe_planner::storage::{JsonFileStore, KeyValueStore};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_search(
    client: &SpoonacularClient,
    store: &dyn KeyValueStore,
    ingredients: &str,
    number: u32,
    export: Option<&Path>,
) -> Result<()> {
    let mut session = Session::load(store)?;
    let results = search_recipes(client, &mut session, ingredients, number)
        .await
        .context("Failed to search recipes. Please try again.")?;
    session.save(store)?;

    print!("{}", format_search_results(&results));
    if let Some(path) = export {
        export_json(&results, path)?;
        println!("Saved {} recipes to {}", results.len(), path.display());
    }
    Ok(())
}

async fn run_show(
    client: &SpoonacularClient,
    store: &dyn KeyValueStore,
    recipe_id: u64,
    export: Option<&Path>,
) -> Result<()> {
    let recipe = client
        .recipe_information(recipe_id)
        .await
        .with_context(|| format!("Failed to load recipe {}", recipe_id))?;
    let is_favorite = FavoritesStore::new(store).is_favorite(recipe_id)?;
    print!("{}", render_recipe_detail(&recipe, is_favorite));
    if let Some(path) = export {
        export_json(&recipe, path)?;
    }
    Ok(())
}

async fn run_favorites(
    client: &SpoonacularClient,
    store: &dyn KeyValueStore,
    command: FavoritesCommand,
) -> Result<()> {
    let favorites = FavoritesStore::new(store);
    match command {
        FavoritesCommand::List => print!("{}", format_favorites(&favorites.list()?)),
        FavoritesCommand::Toggle { id } => {
            let recipe = match favorites.get(id)? {
                Some(saved) => saved.recipe,
                None => client
                    .recipe_information(id)
                    .await
                    .with_context(|| format!("Failed to load recipe {}", id))?,
            };
            match favorites.toggle(&recipe)? {
                FavoriteToggle::Added => println!("Added to favorites!"),
                FavoriteToggle::Removed => println!("Removed from favorites!"),
            }
        }
        FavoritesCommand::Remove { id } => {
            if favorites.remove(id)? {
                println!("Removed from favorites!");
            } else {
                println!("Recipe {} is not in your favorites.", id);
            }
        }
    }
    Ok(())
}

async fn run_plan(
    client: &SpoonacularClient,
    store: &dyn KeyValueStore,
    command: PlanCommand,
) -> Result<()> {
    let plans = MealPlanStore::new(store);
    match command {
        PlanCommand::Show => print!("{}", format_meal_plan(&plans.read_plan()?)),
        PlanCommand::Add { day, slot, id } => {
            let recipe = client
                .recipe_information(id)
                .await
                .with_context(|| format!("Failed to load recipe {}", id))?;
            plans.add_meal(day, slot, RecipeRef::from(&recipe))?;
            println!("Added {} to {} {}.", recipe.title, day, slot);
        }
        PlanCommand::Remove { day, slot } => {
            plans.remove_meal(day, slot)?;
            println!("Cleared {} {}.", day, slot);
        }
        PlanCommand::Clear => {
            plans.clear()?;
            println!("Meal plan cleared.");
        }
    }
    Ok(())
}

async fn run_shopping_list(
    client: SpoonacularClient,
    store: &dyn KeyValueStore,
    export: Option<&Path>,
) -> Result<()> {
    let plan = MealPlanStore::new(store).read_plan()?;
    let source: Arc<dyn RecipeSource> = Arc::new(client);

    match generate_shopping_list(&plan, source)
        .await
        .context("Failed to generate shopping list. Please try again.")?
    {
        ShoppingListOutcome::NoMealsPlanned => {
            println!("No meals planned yet. Add recipes with `plan add <day> <slot> <id>`.");
        }
        ShoppingListOutcome::NoIngredients { recipe_count } => {
            println!("No ingredients found in the {} planned recipes.", recipe_count);
        }
        ShoppingListOutcome::Ready { recipe_count, list } => {
            println!(
                "Shopping list for {} recipes ({} items)\n",
                recipe_count,
                list.item_count()
            );
            print!("{}", list);
            if let Some(path) = export {
                export_json(&list, path)?;
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = parse_args();
    let mut config = Config::load();
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    info!(data_dir = ?config.data_dir, "starting");

    let store = JsonFileStore::new(&config.data_dir);
    let client = SpoonacularClient::new(&config);

    match cli.command {
        Command::Search {
            ingredients,
            number,
            export,
        } => run_search(&client, &store, &ingredients, number, export.as_deref()).await?,
        Command::Surprise => {
            let ingredient = pick_surprise_ingredient(&mut rand::thread_rng());
            println!("Surprise ingredient: {}\n", ingredient);
            run_search(&client, &store, ingredient, SURPRISE_RESULT_COUNT, None).await?
        }
        Command::Back => {
            let session = Session::load(&store)?;
            match session.last_search_results {
                Some(results) => {
                    println!("Last search: {}\n", session.last_search_term);
                    print!("{}", format_search_results(&results));
                }
                None => println!("No previous search. Try `search <ingredients>`."),
            }
        }
        Command::Show { id, export } => run_show(&client, &store, id, export.as_deref()).await?,
        Command::Favorites(command) => run_favorites(&client, &store, command).await?,
        Command::Plan(command) => run_plan(&client, &store, command).await?,
        Command::ShoppingList { export } => {
            run_shopping_list(client, &store, export.as_deref()).await?
        }
        Command::Joke => {
            let mut rng = StdRng::from_entropy();
            let joke = JokeClient::new(&config.joke_api_url).food_joke(&mut rng).await;
            println!("{}", format_joke(&joke));
        }
    }

    Ok(())
}
