use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::export::DEFAULT_EXPORT_FILE;
use crate::meal_plan::{Day, Slot};
use crate::recipe_search::SEARCH_RESULT_COUNT;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory for the meal plan, favorites and last search
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find recipes that use the given ingredients (comma-separated)
    Search {
        ingredients: String,
        #[arg(short, long, default_value_t = SEARCH_RESULT_COUNT)]
        number: u32,
        /// Also write the results to this JSON file (recipes.json if no path is given)
        #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_EXPORT_FILE)]
        export: Option<PathBuf>,
    },
    /// Search with a random staple ingredient
    Surprise,
    /// Show the results of the last search again
    Back,
    /// Show the full recipe
    Show {
        id: u64,
        /// Write the recipe detail to this JSON file
        #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_EXPORT_FILE)]
        export: Option<PathBuf>,
    },
    #[command(subcommand)]
    Favorites(FavoritesCommand),
    #[command(subcommand)]
    Plan(PlanCommand),
    /// Build the shopping list for every planned meal
    ShoppingList {
        /// Write the grouped list to this JSON file
        #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_EXPORT_FILE)]
        export: Option<PathBuf>,
    },
    /// Tell a food joke
    Joke,
}

#[derive(Subcommand, Debug)]
pub enum FavoritesCommand {
    List,
    /// Save the recipe, or unsave it if it is already a favorite
    Toggle { id: u64 },
    Remove { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum PlanCommand {
    Show,
    Add { day: Day, slot: Slot, id: u64 },
    Remove { day: Day, slot: Slot },
    Clear,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_plan_add() {
        let cli = Cli::try_parse_from(["recipe_planner", "plan", "add", "friday", "dinner", "42"]).unwrap();
        match cli.command {
            Command::Plan(PlanCommand::Add { day, slot, id }) => {
                assert_eq!(day, Day::Friday);
                assert_eq!(slot, Slot::Dinner);
                assert_eq!(id, 42);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_search_defaults_to_ten_results() {
        let cli = Cli::try_parse_from(["recipe_planner", "search", "egg, tomato"]).unwrap();
        match cli.command {
            Command::Search { ingredients, number, export } => {
                assert_eq!(ingredients, "egg, tomato");
                assert_eq!(number, 10);
                assert!(export.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_bare_export_flag_uses_default_file() {
        let cli = Cli::try_parse_from(["recipe_planner", "search", "egg", "--export"]).unwrap();
        match cli.command {
            Command::Search { export, .. } => {
                assert_eq!(export, Some(PathBuf::from(DEFAULT_EXPORT_FILE)));
            }
            other => panic!("unexpected command {:?}", other),
        }

        let cli = Cli::try_parse_from(["recipe_planner", "shopping-list", "--export", "week.json"]).unwrap();
        match cli.command {
            Command::ShoppingList { export } => {
                assert_eq!(export, Some(PathBuf::from("week.json")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_slot() {
        assert!(Cli::try_parse_from(["recipe_planner", "plan", "remove", "monday", "brunch"]).is_err());
    }
}
