//! Row store abstraction over the hosted relational backend.
//!
//! Every read and write takes the acting owner id as an explicit argument and
//! applies it as an equality filter; ownership is never inferred from ambient
//! state. The positioned-row facade (`find_item`, `max_position`, `neighbor`,
//! `set_position`, `delete_item`) is what the ordinal position manager runs
//! against, one view per ordered row kind.

mod memory;
mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{
    GroupKey, Ingredient, IngredientPatch, Instruction, ItemKind, Recipe, RecipePatch, ShootEvent,
    ShootPatch, Tip,
};
use crate::ordering::{MoveDirection, PositionedRow};

/// Errors surfaced by row store implementations
#[derive(Error, Debug)]
pub enum StoreError {
    /// HTTP transport failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend rejected the request
    #[error("Backend rejected the request: {status} {message}")]
    Backend { status: u16, message: String },

    /// Row payload could not be decoded
    #[error("Failed to decode row data: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Owner-filtered access to the dashboard's tables.
///
/// Boolean results on updates and deletes report whether a row matched the
/// (owner, id) filter; callers treat `false` as a silent no-op.
#[async_trait]
pub trait RowStore: Send + Sync {
    // -- recipes --

    async fn insert_recipe(&self, row: &Recipe) -> Result<(), StoreError>;
    async fn find_recipe(&self, owner: &str, id: &str) -> Result<Option<Recipe>, StoreError>;
    /// Public-page lookup: published recipes only, no owner filter.
    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Recipe>, StoreError>;
    async fn list_recipes(&self, owner: &str) -> Result<Vec<Recipe>, StoreError>;
    async fn update_recipe(
        &self,
        owner: &str,
        id: &str,
        patch: &RecipePatch,
    ) -> Result<bool, StoreError>;
    async fn delete_recipe(&self, owner: &str, id: &str) -> Result<bool, StoreError>;
    /// Slug uniqueness probe across all owners (slugs are globally routable).
    async fn slug_taken(&self, slug: &str) -> Result<bool, StoreError>;

    // -- ingredients --

    async fn insert_ingredient(&self, row: &Ingredient) -> Result<(), StoreError>;
    /// Siblings of one recipe in position order.
    async fn list_ingredients(
        &self,
        owner: &str,
        recipe_id: &str,
    ) -> Result<Vec<Ingredient>, StoreError>;
    async fn update_ingredient(
        &self,
        owner: &str,
        id: &str,
        patch: &IngredientPatch,
    ) -> Result<bool, StoreError>;

    // -- instructions --

    async fn insert_instruction(&self, row: &Instruction) -> Result<(), StoreError>;
    async fn list_instructions(
        &self,
        owner: &str,
        recipe_id: &str,
    ) -> Result<Vec<Instruction>, StoreError>;
    async fn update_instruction(
        &self,
        owner: &str,
        id: &str,
        text: &str,
    ) -> Result<bool, StoreError>;

    // -- tips --

    async fn insert_tip(&self, row: &Tip) -> Result<(), StoreError>;
    async fn list_tips(&self, owner: &str, group: &GroupKey) -> Result<Vec<Tip>, StoreError>;
    async fn update_tip(&self, owner: &str, id: &str, text: &str) -> Result<bool, StoreError>;

    // -- shoot schedule --

    async fn insert_shoot(&self, row: &ShootEvent) -> Result<(), StoreError>;
    async fn list_shoots(&self, owner: &str) -> Result<Vec<ShootEvent>, StoreError>;
    async fn update_shoot(
        &self,
        owner: &str,
        id: &str,
        patch: &ShootPatch,
    ) -> Result<bool, StoreError>;
    async fn delete_shoot(&self, owner: &str, id: &str) -> Result<bool, StoreError>;

    // -- positioned-row facade --

    async fn find_item(
        &self,
        owner: &str,
        kind: ItemKind,
        id: &str,
    ) -> Result<Option<PositionedRow>, StoreError>;
    /// Current maximum position among the group's siblings; 0 when empty.
    async fn max_position(
        &self,
        owner: &str,
        kind: ItemKind,
        group: &GroupKey,
    ) -> Result<i64, StoreError>;
    /// Order-adjacent sibling: largest position strictly below the pivot for
    /// `Up`, smallest strictly above for `Down`.
    async fn neighbor(
        &self,
        owner: &str,
        kind: ItemKind,
        group: &GroupKey,
        pivot: i64,
        direction: MoveDirection,
    ) -> Result<Option<PositionedRow>, StoreError>;
    async fn set_position(
        &self,
        owner: &str,
        kind: ItemKind,
        id: &str,
        position: i64,
    ) -> Result<bool, StoreError>;
    async fn delete_item(&self, owner: &str, kind: ItemKind, id: &str)
        -> Result<bool, StoreError>;
}
