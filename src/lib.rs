pub mod api_connection;
pub mod cli;
pub mod config;
pub mod export;
pub mod favorites;
pub mod jokes;
pub mod meal_plan;
pub mod recipe_details;
pub mod recipe_search;
pub mod session;
pub mod shopping_list;
pub mod storage;
