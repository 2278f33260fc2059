use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::api_connection::endpoints::{Ingredient, RecipeDetail};

const SUMMARY_PLACEHOLDER: &str = "This area contains a brief overview of the dish, what makes it special, and any key highlights that entice interest for tasters!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInfo {
    pub prep: Option<u32>,
    pub cook: Option<u32>,
}

/// Prep and cook minutes, estimated from `readyInMinutes` when the API
/// leaves them out (30% prep, 70% cook). Zero or negative counts as unknown.
pub fn time_info(recipe: &RecipeDetail) -> TimeInfo {
    let prep = positive_minutes(recipe.preparation_minutes);
    let cook = positive_minutes(recipe.cooking_minutes);
    let ready = recipe.ready_in_minutes.filter(|m| *m > 0);

    match (prep, cook, ready) {
        (Some(prep), Some(cook), _) => TimeInfo {
            prep: Some(prep),
            cook: Some(cook),
        },
        (prep, cook, Some(ready)) => TimeInfo {
            prep: prep.or(Some(ready * 3 / 10)),
            cook: cook.or(Some(ready * 7 / 10)),
        },
        (prep, cook, None) => TimeInfo { prep, cook },
    }
}

fn positive_minutes(minutes: Option<i32>) -> Option<u32> {
    minutes
        .and_then(|m| u32::try_from(m).ok())
        .filter(|m| *m > 0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Healthy,
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Healthy => "Healthy",
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

pub fn difficulty(recipe: &RecipeDetail) -> Difficulty {
    if recipe.very_healthy.unwrap_or(false) {
        return Difficulty::Healthy;
    }
    let ready = recipe.ready_in_minutes.unwrap_or(0);
    let steps = recipe.first_instruction_steps().len();

    if ready <= 20 || steps <= 5 {
        Difficulty::Easy
    } else if ready <= 45 || steps <= 10 {
        Difficulty::Medium
    } else {
        Difficulty::Hard
    }
}

fn hyperlink_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)<a\b[^>]*>(.*?)</a>").expect("hyperlink pattern is valid"))
}

/// Replaces `<a ...>text</a>` with `text`.
pub fn remove_hyperlinks(html: Option<&str>) -> String {
    match html {
        Some(html) => hyperlink_pattern().replace_all(html, "$1").into_owned(),
        None => String::new(),
    }
}

pub fn is_english_text(text: &str) -> bool {
    !text.is_empty()
        && text.chars().all(|c| {
            c.is_ascii() || ('\u{00C0}'..='\u{00FF}').contains(&c) || c.is_whitespace()
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instructions {
    Steps(Vec<String>),
    Text(String),
    NotEnglish,
    Missing,
}

pub fn instructions(recipe: &RecipeDetail) -> Instructions {
    let has_analyzed = recipe
        .analyzed_instructions
        .as_ref()
        .is_some_and(|blocks| !blocks.is_empty());

    if has_analyzed {
        let steps = recipe.first_instruction_steps();
        if steps.first().is_some_and(|first| !is_english_text(&first.step)) {
            return Instructions::NotEnglish;
        }
        return Instructions::Steps(steps.iter().map(|s| s.step.clone()).collect());
    }

    match recipe.instructions.as_deref().filter(|text| !text.is_empty()) {
        Some(text) if !is_english_text(text) => Instructions::NotEnglish,
        Some(text) => Instructions::Text(text.to_string()),
        None => Instructions::Missing,
    }
}

fn format_minutes(minutes: Option<u32>) -> String {
    minutes
        .map(|m| format!("{} min", m))
        .unwrap_or_else(|| "N/A".to_string())
}

fn format_ingredient(ingredient: &Ingredient) -> String {
    let text = ingredient.original.as_deref().unwrap_or("");
    let metric = ingredient.measures.as_ref().and_then(|m| m.metric.as_ref());
    let amount = metric
        .and_then(|m| m.amount)
        .map(crate::shopping_list::grouper::format_amount)
        .unwrap_or_default();
    let unit = metric.and_then(|m| m.unit_short.as_deref()).unwrap_or("");
    let measure = format!("{} {}", amount, unit);
    let measure = measure.trim();
    if measure.is_empty() {
        format!("  - {}", text)
    } else {
        format!("  - {} ({})", text, measure)
    }
}

pub fn render_recipe_detail(recipe: &RecipeDetail, is_favorite: bool) -> String {
    let times = time_info(recipe);
    let mut out = String::new();

    out.push_str(&format!("{} [{}]\n", recipe.title, recipe.id));
    out.push_str(&format!(
        "Prep Time: {} | Cook Time: {} | Servings: {} | Difficulty: {}\n",
        format_minutes(times.prep),
        format_minutes(times.cook),
        recipe
            .servings
            .filter(|s| *s > 0)
            .map(|s| s.to_string())
            .unwrap_or_else(|| "N/A".to_string()),
        difficulty(recipe)
    ));

    let summary = remove_hyperlinks(recipe.summary.as_deref());
    out.push('\n');
    out.push_str(if summary.is_empty() { SUMMARY_PLACEHOLDER } else { summary.as_str() });
    out.push_str("\n\nIngredients\n");
    for ingredient in recipe.ingredients() {
        out.push_str(&format_ingredient(ingredient));
        out.push('\n');
    }

    out.push_str("\nInstructions\n");
    match instructions(recipe) {
        Instructions::Steps(steps) => {
            for (index, step) in steps.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", index + 1, step));
            }
        }
        Instructions::Text(text) => {
            out.push_str(&text);
            out.push('\n');
        }
        Instructions::NotEnglish => {
            out.push_str("Instructions are not available in English for this recipe.\n");
            out.push_str("Please try searching for a similar recipe or check the source website.\n");
        }
        Instructions::Missing => out.push_str("No instructions available for this recipe.\n"),
    }

    out.push_str(if is_favorite {
        "\n♥ In your favorites\n"
    } else {
        "\n♡ Not in your favorites\n"
    });
    out
}
