use std::time::Duration;

use chrono::NaiveDate;

use crate::config::{AppConfig, OrderingSteps};
use crate::error::DashboardError;
use crate::model::{
    GroupKey, Ingredient, IngredientPatch, Instruction, ItemKind, Recipe, RecipePatch, ShootEvent,
    ShootPatch, ShootStatus, ShoppingItem, Tip,
};
use crate::ops;
use crate::ops::ingredients::NewIngredient;
use crate::ops::instructions::NewInstruction;
use crate::ops::recipes::NewRecipe;
use crate::ops::schedule::NewShoot;
use crate::ops::tips::NewTip;
use crate::ordering::{self, MoveDirection, MoveOutcome};
use crate::store::{RestStore, RowStore};

/// Builder for configuring a dashboard client against the hosted backend
///
/// # Example
/// ```no_run
/// use cookdesk::Dashboard;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dashboard = Dashboard::builder()
///     .base_url("https://project.example.co")
///     .api_key("service-key")
///     .owner("user-1")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct DashboardBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    owner: Option<String>,
    timeout: Option<Duration>,
    steps: Option<OrderingSteps>,
}

impl DashboardBuilder {
    /// Set the backend base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the backend API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the acting owner identity threaded into every operation
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Set a timeout for HTTP requests
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Override the append increments (defaults to 10 per entity kind)
    pub fn steps(mut self, steps: OrderingSteps) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Build the client
    ///
    /// # Errors
    /// Returns `DashboardError::Builder` if the base URL, API key or owner
    /// was not provided.
    pub fn build(self) -> Result<Dashboard<RestStore>, DashboardError> {
        let base_url = self
            .base_url
            .ok_or_else(|| DashboardError::Builder("No base URL specified".to_string()))?;
        let api_key = self
            .api_key
            .ok_or_else(|| DashboardError::Builder("No API key specified".to_string()))?;
        let owner = self
            .owner
            .ok_or_else(|| DashboardError::Builder("No owner identity specified".to_string()))?;

        let store = match self.timeout {
            Some(timeout) => RestStore::with_timeout(base_url, api_key, timeout)?,
            None => RestStore::new(base_url, api_key),
        };
        Ok(Dashboard {
            store,
            owner,
            steps: self.steps.unwrap_or_default(),
        })
    }
}

/// Dashboard client: a row store plus the acting owner identity.
///
/// Every method threads the owner id into the underlying operation as an
/// explicit filter; no ambient session state exists.
pub struct Dashboard<S> {
    store: S,
    owner: String,
    steps: OrderingSteps,
}

impl Dashboard<RestStore> {
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::default()
    }

    /// Build a client from loaded configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, DashboardError> {
        Dashboard::builder()
            .base_url(config.backend.base_url.clone())
            .api_key(config.backend.api_key.clone())
            .owner(config.backend.owner_id.clone())
            .timeout(Duration::from_secs(config.backend.timeout))
            .steps(config.ordering)
            .build()
    }
}

impl<S: RowStore> Dashboard<S> {
    /// Wrap an existing store (tests pair this with `MemoryStore`)
    pub fn with_store(store: S, owner: impl Into<String>) -> Self {
        Dashboard {
            store,
            owner: owner.into(),
            steps: OrderingSteps::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // -- recipes --

    pub async fn create_recipe(&self, input: NewRecipe) -> Result<Recipe, DashboardError> {
        ops::recipes::create_recipe(&self.store, &self.owner, input).await
    }

    pub async fn recipe(&self, id: &str) -> Result<Option<Recipe>, DashboardError> {
        Ok(self.store.find_recipe(&self.owner, id).await?)
    }

    pub async fn recipes(&self) -> Result<Vec<Recipe>, DashboardError> {
        Ok(self.store.list_recipes(&self.owner).await?)
    }

    pub async fn update_recipe(&self, id: &str, patch: RecipePatch) -> Result<(), DashboardError> {
        ops::recipes::update_recipe(&self.store, &self.owner, id, patch).await
    }

    pub async fn delete_recipe(&self, id: &str) -> Result<(), DashboardError> {
        ops::recipes::delete_recipe(&self.store, &self.owner, id).await
    }

    pub async fn publish_recipe(&self, id: &str) -> Result<(), DashboardError> {
        ops::recipes::set_published(&self.store, &self.owner, id, true).await
    }

    pub async fn unpublish_recipe(&self, id: &str) -> Result<(), DashboardError> {
        ops::recipes::set_published(&self.store, &self.owner, id, false).await
    }

    // -- ingredients --

    pub async fn add_ingredient(
        &self,
        input: NewIngredient,
    ) -> Result<Option<Ingredient>, DashboardError> {
        ops::ingredients::add_ingredient(&self.store, &self.owner, self.steps, input).await
    }

    /// Parse one free-text line and append it to the recipe
    pub async fn quick_add_ingredient(
        &self,
        recipe_id: &str,
        line: &str,
    ) -> Result<Option<Ingredient>, DashboardError> {
        ops::ingredients::quick_add_ingredient(&self.store, &self.owner, self.steps, recipe_id, line)
            .await
    }

    /// Import a pasted block of ingredient text, one row per parseable line
    pub async fn import_ingredients(
        &self,
        recipe_id: &str,
        text: &str,
    ) -> Result<Vec<Ingredient>, DashboardError> {
        ops::ingredients::import_ingredient_lines(
            &self.store,
            &self.owner,
            self.steps,
            recipe_id,
            text,
        )
        .await
    }

    pub async fn ingredients(&self, recipe_id: &str) -> Result<Vec<Ingredient>, DashboardError> {
        Ok(self.store.list_ingredients(&self.owner, recipe_id).await?)
    }

    pub async fn update_ingredient(
        &self,
        id: &str,
        patch: IngredientPatch,
    ) -> Result<(), DashboardError> {
        ops::ingredients::update_ingredient(&self.store, &self.owner, id, patch).await
    }

    pub async fn move_ingredient(
        &self,
        id: &str,
        direction: MoveDirection,
    ) -> Result<MoveOutcome, DashboardError> {
        ordering::move_item(&self.store, &self.owner, ItemKind::Ingredient, id, direction).await
    }

    pub async fn delete_ingredient(&self, id: &str) -> Result<(), DashboardError> {
        ordering::delete_item(&self.store, &self.owner, ItemKind::Ingredient, id).await?;
        Ok(())
    }

    // -- instructions --

    pub async fn add_instruction(
        &self,
        input: NewInstruction,
    ) -> Result<Option<Instruction>, DashboardError> {
        ops::instructions::add_instruction(&self.store, &self.owner, self.steps, input).await
    }

    pub async fn instructions(&self, recipe_id: &str) -> Result<Vec<Instruction>, DashboardError> {
        Ok(self.store.list_instructions(&self.owner, recipe_id).await?)
    }

    pub async fn update_instruction(&self, id: &str, text: &str) -> Result<(), DashboardError> {
        ops::instructions::update_instruction(&self.store, &self.owner, id, text).await
    }

    pub async fn move_instruction(
        &self,
        id: &str,
        direction: MoveDirection,
    ) -> Result<MoveOutcome, DashboardError> {
        ordering::move_item(&self.store, &self.owner, ItemKind::Instruction, id, direction).await
    }

    pub async fn delete_instruction(&self, id: &str) -> Result<(), DashboardError> {
        ordering::delete_item(&self.store, &self.owner, ItemKind::Instruction, id).await?;
        Ok(())
    }

    // -- tips --

    pub async fn add_tip(&self, input: NewTip) -> Result<Option<Tip>, DashboardError> {
        ops::tips::add_tip(&self.store, &self.owner, self.steps, input).await
    }

    pub async fn tips(&self, group: &GroupKey) -> Result<Vec<Tip>, DashboardError> {
        Ok(self.store.list_tips(&self.owner, group).await?)
    }

    pub async fn update_tip(&self, id: &str, text: &str) -> Result<(), DashboardError> {
        ops::tips::update_tip(&self.store, &self.owner, id, text).await
    }

    pub async fn move_tip(
        &self,
        id: &str,
        direction: MoveDirection,
    ) -> Result<MoveOutcome, DashboardError> {
        ordering::move_item(&self.store, &self.owner, ItemKind::Tip, id, direction).await
    }

    pub async fn delete_tip(&self, id: &str) -> Result<(), DashboardError> {
        ordering::delete_item(&self.store, &self.owner, ItemKind::Tip, id).await?;
        Ok(())
    }

    // -- shoot schedule --

    pub async fn plan_shoot(&self, input: NewShoot) -> Result<Option<ShootEvent>, DashboardError> {
        ops::schedule::plan_shoot(&self.store, &self.owner, input).await
    }

    pub async fn shoots(
        &self,
        status: Option<ShootStatus>,
    ) -> Result<Vec<ShootEvent>, DashboardError> {
        ops::schedule::list_shoots(&self.store, &self.owner, status).await
    }

    pub async fn update_shoot(&self, id: &str, patch: ShootPatch) -> Result<(), DashboardError> {
        ops::schedule::update_shoot(&self.store, &self.owner, id, patch).await
    }

    pub async fn reschedule_shoot(
        &self,
        id: &str,
        shoot_date: NaiveDate,
    ) -> Result<(), DashboardError> {
        let patch = ShootPatch {
            shoot_date: Some(shoot_date),
            ..ShootPatch::default()
        };
        ops::schedule::update_shoot(&self.store, &self.owner, id, patch).await
    }

    pub async fn delete_shoot(&self, id: &str) -> Result<(), DashboardError> {
        ops::schedule::delete_shoot(&self.store, &self.owner, id).await
    }

    // -- derived views --

    /// Shopping list across the recipes of all planned shoots
    pub async fn shopping_list(&self) -> Result<Vec<ShoppingItem>, DashboardError> {
        ops::shopping::shopping_list(&self.store, &self.owner).await
    }

    /// Public page for a published recipe; slug lookup ignores the owner
    pub async fn recipe_page(&self, slug: &str) -> Result<Option<String>, DashboardError> {
        ops::publish::recipe_page(&self.store, slug).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_base_url() {
        let result = Dashboard::builder().api_key("k").owner("o").build();
        assert!(matches!(result, Err(DashboardError::Builder(_))));
    }

    #[test]
    fn test_builder_requires_owner() {
        let result = Dashboard::builder()
            .base_url("https://project.example.co")
            .api_key("k")
            .build();
        let err = result.err().unwrap();
        assert!(err.to_string().contains("owner"));
    }

    #[test]
    fn test_builder_method_chaining() {
        let dashboard = Dashboard::builder()
            .base_url("https://project.example.co")
            .api_key("service-key")
            .owner("user-1")
            .timeout(Duration::from_secs(5))
            .build();
        assert!(dashboard.is_ok());
    }
}
