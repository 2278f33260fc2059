use anyhow::Result;
use clap::ValueEnum;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use crate::api_connection::endpoints::RecipeDetail;
use crate::storage::{load_json, save_json, KeyValueStore};

pub const MEAL_PLAN_KEY: &str = "mealPlan";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::Breakfast, Slot::Lunch, Slot::Dinner, Slot::Snacks];

    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Breakfast => "breakfast",
            Slot::Lunch => "lunch",
            Slot::Dinner => "dinner",
            Slot::Snacks => "snacks",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The compact form of a recipe kept in a plan slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRef {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
}

impl From<&RecipeDetail> for RecipeRef {
    fn from(recipe: &RecipeDetail) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title.clone(),
            image: recipe.image.clone(),
            ready_in_minutes: recipe.ready_in_minutes,
            servings: recipe.servings,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayPlan {
    pub breakfast: Option<RecipeRef>,
    pub lunch: Option<RecipeRef>,
    pub dinner: Option<RecipeRef>,
    pub snacks: Option<RecipeRef>,
}

impl DayPlan {
    pub fn slot(&self, slot: Slot) -> Option<&RecipeRef> {
        match slot {
            Slot::Breakfast => self.breakfast.as_ref(),
            Slot::Lunch => self.lunch.as_ref(),
            Slot::Dinner => self.dinner.as_ref(),
            Slot::Snacks => self.snacks.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, slot: Slot) -> &mut Option<RecipeRef> {
        match slot {
            Slot::Breakfast => &mut self.breakfast,
            Slot::Lunch => &mut self.lunch,
            Slot::Dinner => &mut self.dinner,
            Slot::Snacks => &mut self.snacks,
        }
    }

    pub fn meals(&self) -> impl Iterator<Item = (Slot, &RecipeRef)> {
        Slot::ALL
            .into_iter()
            .filter_map(move |slot| self.slot(slot).map(|recipe| (slot, recipe)))
    }
}

/// A week of meals. Serializes to the persisted layout: lowercase day names,
/// each holding the four slots as `null` or a [`RecipeRef`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MealPlan {
    pub monday: DayPlan,
    pub tuesday: DayPlan,
    pub wednesday: DayPlan,
    pub thursday: DayPlan,
    pub friday: DayPlan,
    pub saturday: DayPlan,
    pub sunday: DayPlan,
}

impl MealPlan {
    pub fn day(&self, day: Day) -> &DayPlan {
        match day {
            Day::Monday => &self.monday,
            Day::Tuesday => &self.tuesday,
            Day::Wednesday => &self.wednesday,
            Day::Thursday => &self.thursday,
            Day::Friday => &self.friday,
            Day::Saturday => &self.saturday,
            Day::Sunday => &self.sunday,
        }
    }

    pub fn day_mut(&mut self, day: Day) -> &mut DayPlan {
        match day {
            Day::Monday => &mut self.monday,
            Day::Tuesday => &mut self.tuesday,
            Day::Wednesday => &mut self.wednesday,
            Day::Thursday => &mut self.thursday,
            Day::Friday => &mut self.friday,
            Day::Saturday => &mut self.saturday,
            Day::Sunday => &mut self.sunday,
        }
    }

    pub fn get(&self, day: Day, slot: Slot) -> Option<&RecipeRef> {
        self.day(day).slot(slot)
    }

    pub fn set(&mut self, day: Day, slot: Slot, recipe: Option<RecipeRef>) {
        *self.day_mut(day).slot_mut(slot) = recipe;
    }

    /// Every filled slot, Monday breakfast first.
    pub fn meals(&self) -> impl Iterator<Item = (Day, Slot, &RecipeRef)> {
        Day::ALL.into_iter().flat_map(move |day| {
            self.day(day)
                .meals()
                .map(move |(slot, recipe)| (day, slot, recipe))
        })
    }

    /// Distinct recipe ids in first-seen order.
    pub fn recipe_ids(&self) -> Vec<u64> {
        self.meals()
            .map(|(_, _, recipe)| recipe.id)
            .collect::<IndexSet<u64>>()
            .into_iter()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.meals().next().is_none()
    }
}

pub fn format_meal_plan(plan: &MealPlan) -> String {
    let mut out = String::new();
    for day in Day::ALL {
        out.push_str(day.as_str());
        out.push('\n');
        for slot in Slot::ALL {
            let meal = plan
                .get(day, slot)
                .map(|recipe| format!("{} [{}]", recipe.title, recipe.id))
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!("  {:<10} {}\n", slot.as_str(), meal));
        }
    }
    out
}

pub struct MealPlanStore<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> MealPlanStore<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// The stored plan, or an empty week when nothing has been saved yet.
    pub fn read_plan(&self) -> Result<MealPlan> {
        Ok(load_json(self.store, MEAL_PLAN_KEY)?.unwrap_or_default())
    }

    pub fn save_plan(&self, plan: &MealPlan) -> Result<()> {
        save_json(self.store, MEAL_PLAN_KEY, plan)
    }

    pub fn write_slot(&self, day: Day, slot: Slot, recipe: Option<RecipeRef>) -> Result<()> {
        let mut plan = self.read_plan()?;
        plan.set(day, slot, recipe);
        self.save_plan(&plan)
    }

    pub fn add_meal(&self, day: Day, slot: Slot, recipe: RecipeRef) -> Result<()> {
        info!(%day, %slot, recipe_id = recipe.id, "adding meal to plan");
        self.write_slot(day, slot, Some(recipe))
    }

    pub fn remove_meal(&self, day: Day, slot: Slot) -> Result<()> {
        info!(%day, %slot, "removing meal from plan");
        self.write_slot(day, slot, None)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(MEAL_PLAN_KEY)
    }

    pub fn recipe_ids(&self) -> Result<Vec<u64>> {
        Ok(self.read_plan()?.recipe_ids())
    }
}
