use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One ingredient line after quick-add parsing.
///
/// Transient: consumed immediately to build an insert row, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedLine {
    pub amount: Option<f64>,
    pub unit: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub published: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub owner_id: String,
    pub recipe_id: String,
    pub name: String,
    pub amount: Option<f64>,
    pub unit: Option<String>,
    pub position: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub id: String,
    pub owner_id: String,
    pub recipe_id: String,
    pub text: String,
    pub position: i64,
}

/// Which kind of row a tip hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentKind {
    Instruction,
    Ingredient,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tip {
    pub id: String,
    pub owner_id: String,
    pub parent_kind: ParentKind,
    pub parent_id: String,
    pub text: String,
    pub position: i64,
}

impl Tip {
    pub fn group(&self) -> GroupKey {
        GroupKey::Parent(self.parent_kind, self.parent_id.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShootStatus {
    Planned,
    Shot,
    Edited,
    Published,
}

/// A scheduled recording session for one recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShootEvent {
    pub id: String,
    pub owner_id: String,
    pub recipe_id: String,
    pub shoot_date: NaiveDate,
    pub status: ShootStatus,
    pub notes: Option<String>,
}

/// One line of the aggregated shopping list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingItem {
    pub name: String,
    pub unit: Option<String>,
    /// Sum of the amounts that were present; None when no merged row had one
    pub amount: Option<f64>,
    /// Number of ingredient rows merged into this line
    pub entries: usize,
}

/// Partial update for a recipe row; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecipePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

/// Partial update for an ingredient row; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngredientPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Partial update for a shoot event; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShootPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shoot_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ShootStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The row kinds that participate in sibling ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Ingredient,
    Instruction,
    Tip,
}

/// The scope within which sibling order is significant.
///
/// Ingredients and instructions order within their recipe; tips order within
/// the instruction or ingredient they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Recipe(String),
    Parent(ParentKind, String),
}
