use std::collections::HashMap;
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::planner::numeric::finite_or_zero;

/// Minimum similarity for "did you mean" suggestions.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// A cooking ingredient from the static catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ingredient {
    pub id: &'static str,
    pub name: &'static str,
}

impl Ingredient {
    pub const fn new(id: &'static str, name: &'static str) -> Self {
        Self { id, name }
    }
}

/// Closest candidate to a misspelled id, compared case-insensitively.
pub fn closest_match<'a>(
    needle: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    let needle = needle.to_lowercase();
    candidates
        .into_iter()
        .map(|c| (c, jaro_winkler(&c.to_lowercase(), &needle)))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(c, _)| c)
}

/// Recipe category. Only one pot per category cooks at a time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[serde(alias = "カレー・シチュー")]
    Curry,
    #[serde(alias = "サラダ")]
    Salad,
    #[serde(alias = "デザート・ドリンク")]
    Dessert,
}

impl Category {

    pub fn index(self) -> usize {
        match self {
            Category::Curry => 0,
            Category::Salad => 1,
            Category::Dessert => 2,
        }
    }

    /// In-game label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Curry => "カレー・シチュー",
            Category::Salad => "サラダ",
            Category::Dessert => "デザート・ドリンク",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A static recipe definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,

    #[serde(default)]
    pub name: String,

    pub category: Category,

    /// Per-serving quantities, in the order the recipe lists them.
    #[serde(
        serialize_with = "serialize_ingredients",
        deserialize_with = "deserialize_ingredients"
    )]
    pub ingredients: Vec<(String, u32)>,

    pub base_energy: i64,
}

impl Recipe {
    /// Total ingredient units for one serving.
    pub fn total_ingredients(&self) -> u32 {
        self.ingredients.iter().map(|(_, qty)| qty).sum()
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

fn serialize_ingredients<S>(
    ingredients: &[(String, u32)],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(ingredients.len()))?;
    for (id, qty) in ingredients {
        map.serialize_entry(id, qty)?;
    }
    map.end()
}

struct IngredientMapVisitor;

impl<'de> Visitor<'de> for IngredientMapVisitor {
    type Value = Vec<(String, u32)>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of ingredient id to quantity")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries: Vec<(String, u32)> = Vec::new();
        while let Some((id, qty)) = access.next_entry::<String, f64>()? {
            let qty = finite_or_zero(qty).max(0.0) as u32;
            // Duplicate keys keep their first position, last value wins.
            match entries.iter_mut().find(|(existing, _)| *existing == id) {
                Some(entry) => entry.1 = qty,
                None => entries.push((id, qty)),
            }
        }
        Ok(entries)
    }

    fn visit_seq<A>(self, _seq: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: de::SeqAccess<'de>,
    {
        Err(de::Error::custom("ingredients must be a map, not a list"))
    }
}

fn deserialize_ingredients<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<(String, u32)>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_map(IngredientMapVisitor)
}

/// Read-only recipe lookup table.
#[derive(Debug, Clone, Default)]
pub struct RecipeTable {
    recipes: Vec<Recipe>,
    /// Recipe id -> index into `recipes`.
    index: HashMap<String, usize>,
}

impl RecipeTable {
    /// Build a table; a later recipe with a duplicate id replaces the earlier one.
    pub fn new(recipes: Vec<Recipe>) -> Self {
        let mut table = Self::default();
        for recipe in recipes {
            match table.index.get(&recipe.id) {
                Some(&i) => table.recipes[i] = recipe,
                None => {
                    table.index.insert(recipe.id.clone(), table.recipes.len());
                    table.recipes.push(recipe);
                }
            }
        }
        table
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.index.get(id).map(|&i| &self.recipes[i])
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter().filter(move |r| r.category == category)
    }

    /// First recipe listed for a category (the default pick for a new row).
    pub fn first_in_category(&self, category: Category) -> Option<&Recipe> {
        self.in_category(category).next()
    }

    /// Closest known recipe id to a misspelled one.
    pub fn suggest(&self, id: &str) -> Option<&str> {
        closest_match(id, self.recipes.iter().map(|r| r.id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
