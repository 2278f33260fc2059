use rand::seq::SliceRandom;
use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api_connection::connection::ApiConnectionError;

pub const DEFAULT_JOKE_API_URL: &str = "https://v2.jokeapi.dev/joke/Any";
pub const FOOD_JOKE_ATTEMPTS: usize = 10;
const SAFE_JOKE_QUERY: [(&str, &str); 2] = [
    ("blacklistFlags", "nsfw,religious,political,racist,sexist,explicit"),
    ("safe-mode", ""),
];

const FOOD_KEYWORDS: &[&str] = &[
    "food", "cook", "chef", "kitchen", "restaurant", "eat", "dinner", "lunch",
    "breakfast", "recipe", "meal", "dish", "cuisine", "ingredient", "vegetable",
    "fruit", "meat", "bread", "pizza", "pasta", "soup", "salad", "dessert",
    "coffee", "tea", "wine", "beer", "drink", "hungry", "taste", "flavor",
    "spice", "sauce", "cheese", "butter", "egg", "milk", "cream", "sugar",
    "salt", "pepper", "garlic", "onion", "tomato", "potato", "carrot",
    "chicken", "beef", "pork", "fish", "bacon", "hamburger", "sandwich",
    "taco", "burrito", "sushi", "noodle", "rice", "bean", "apple", "banana",
    "orange", "grape", "strawberry", "cake", "cookie", "pie", "chocolate",
    "candy", "waiter", "menu", "order", "serve", "plate", "fork", "spoon",
    "knife", "oven", "stove", "grill", "bake", "fry", "boil", "roast",
];

const CURATED_FOOD_JOKES: &[(&str, &str)] = &[
    ("Why did the tomato turn red?", "Because it saw the salad dressing!"),
    ("What do you call cheese that isn't yours?", "Nacho cheese!"),
    ("Why did the cookie go to the doctor?", "Because it felt crumbly!"),
    ("What do you call a fake noodle?", "An impasta!"),
    ("Why don't eggs tell jokes?", "They'd crack each other up!"),
    ("What did the grape say when it got stepped on?", "Nothing, it just let out a little wine!"),
    ("Why did the banana go to the doctor?", "Because it wasn't peeling well!"),
    ("What's orange and sounds like a parrot?", "A carrot!"),
    ("Why did the coffee file a police report?", "It got mugged!"),
    ("What do you call a potato that's reluctant to jump into boiling water?", "A hes-i-tater!"),
    ("Why shouldn't you tell a secret on a farm?", "Because the potatoes have eyes and the corn has ears!"),
    ("What do you call a sad strawberry?", "A blueberry!"),
    ("Why did the chef quit?", "They just didn't have the thyme!"),
    ("What did the lettuce say to the celery?", "Quit stalking me!"),
    ("Why do mushrooms get invited to all the parties?", "Because they're fungi!"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JokeKind {
    Single,
    Twopart,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JokeFlags {
    pub nsfw: bool,
    pub religious: bool,
    pub political: bool,
    pub racist: bool,
    pub sexist: bool,
    pub explicit: bool,
}

impl JokeFlags {
    pub fn none_set(&self) -> bool {
        !(self.nsfw || self.religious || self.political || self.racist || self.sexist || self.explicit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: JokeKind,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub joke: Option<String>,
    #[serde(default)]
    pub setup: Option<String>,
    #[serde(default)]
    pub delivery: Option<String>,
    #[serde(rename = "lang", default)]
    pub language: String,
    #[serde(default)]
    pub safe: bool,
    #[serde(default)]
    pub flags: JokeFlags,
}

impl Joke {
    fn searchable_text(&self) -> String {
        let text = match self.kind {
            JokeKind::Single => self.joke.clone().unwrap_or_default(),
            _ => format!(
                "{} {}",
                self.setup.as_deref().unwrap_or(""),
                self.delivery.as_deref().unwrap_or("")
            ),
        };
        text.to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokeMetadata {
    pub id: u64,
    pub category: String,
    pub kind: JokeKind,
    pub language: String,
    pub is_safe: bool,
    pub has_no_flags: bool,
}

pub fn is_food_related(joke: &Joke) -> bool {
    let text = joke.searchable_text();
    FOOD_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}

pub fn curated_food_joke<R: Rng + ?Sized>(rng: &mut R) -> Joke {
    let (setup, delivery) = CURATED_FOOD_JOKES
        .choose(rng)
        .copied()
        .unwrap_or(CURATED_FOOD_JOKES[0]);
    Joke {
        id: rng.gen_range(0..10_000),
        kind: JokeKind::Twopart,
        category: "Food".to_string(),
        joke: None,
        setup: Some(setup.to_string()),
        delivery: Some(delivery.to_string()),
        language: "en".to_string(),
        safe: true,
        flags: JokeFlags::default(),
    }
}

pub fn format_joke(joke: &Joke) -> String {
    match joke.kind {
        JokeKind::Single => joke.joke.clone().unwrap_or_default(),
        JokeKind::Twopart => format!(
            "{}\n\n{}",
            joke.setup.as_deref().unwrap_or(""),
            joke.delivery.as_deref().unwrap_or("")
        ),
        JokeKind::Unknown => "No joke available".to_string(),
    }
}

pub fn joke_metadata(joke: &Joke) -> JokeMetadata {
    JokeMetadata {
        id: joke.id,
        category: joke.category.clone(),
        kind: joke.kind,
        language: joke.language.clone(),
        is_safe: joke.safe,
        has_no_flags: joke.flags.none_set(),
    }
}

#[derive(Clone, Debug)]
pub struct JokeClient {
    http: Client,
    url: String,
}

impl JokeClient {
    pub fn new(url: &str) -> Self {
        Self {
            http: Client::new(),
            url: url.to_string(),
        }
    }

    /// One safe-mode joke from any category.
    pub async fn random_joke(&self) -> Result<Joke, ApiConnectionError> {
        let response = self.http.get(&self.url).query(&SAFE_JOKE_QUERY).send().await?;
        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(ApiConnectionError::ApiError { status, error_body });
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Keeps asking for jokes until one mentions food, then falls back to the
    /// curated list.
    pub async fn food_joke<R: Rng + ?Sized>(&self, rng: &mut R) -> Joke {
        for attempt in 1..=FOOD_JOKE_ATTEMPTS {
            match self.random_joke().await {
                Ok(joke) if joke.safe && is_food_related(&joke) => {
                    info!(attempt, joke_id = joke.id, "found a food joke");
                    return joke;
                }
                Ok(_) => {}
                Err(e) => warn!(attempt, error = %e, "joke request failed"),
            }
        }
        info!("no food joke from the API, using the curated list");
        curated_food_joke(rng)
    }
}
