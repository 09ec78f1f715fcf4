//! In-process row store used by tests and local dry runs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::model::{
    GroupKey, Ingredient, IngredientPatch, Instruction, ItemKind, ParentKind, Recipe, RecipePatch,
    ShootEvent, ShootPatch, Tip,
};
use crate::ordering::{MoveDirection, PositionedRow};
use crate::store::{RowStore, StoreError};

#[derive(Default)]
struct Tables {
    recipes: HashMap<String, Recipe>,
    ingredients: HashMap<String, Ingredient>,
    instructions: HashMap<String, Instruction>,
    tips: HashMap<String, Tip>,
    shoots: HashMap<String, ShootEvent>,
}

/// Hash-map backed [`RowStore`]. Mirrors the backend's behavior including
/// recipe-deletion cascade over child rows. Clones share the same tables,
/// so one store can serve several acting identities in tests.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn positioned(tables: &Tables, kind: ItemKind, owner: &str) -> Vec<PositionedRow> {
    match kind {
        ItemKind::Ingredient => tables
            .ingredients
            .values()
            .filter(|r| r.owner_id == owner)
            .map(|r| PositionedRow {
                id: r.id.clone(),
                group: GroupKey::Recipe(r.recipe_id.clone()),
                position: r.position,
            })
            .collect(),
        ItemKind::Instruction => tables
            .instructions
            .values()
            .filter(|r| r.owner_id == owner)
            .map(|r| PositionedRow {
                id: r.id.clone(),
                group: GroupKey::Recipe(r.recipe_id.clone()),
                position: r.position,
            })
            .collect(),
        ItemKind::Tip => tables
            .tips
            .values()
            .filter(|r| r.owner_id == owner)
            .map(|r| PositionedRow {
                id: r.id.clone(),
                group: r.group(),
                position: r.position,
            })
            .collect(),
    }
}

#[async_trait]
impl RowStore for MemoryStore {
    async fn insert_recipe(&self, row: &Recipe) -> Result<(), StoreError> {
        let mut tables = self.inner.lock().unwrap();
        tables.recipes.insert(row.id.clone(), row.clone());
        Ok(())
    }

    async fn find_recipe(&self, owner: &str, id: &str) -> Result<Option<Recipe>, StoreError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .recipes
            .get(id)
            .filter(|r| r.owner_id == owner)
            .cloned())
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Recipe>, StoreError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .recipes
            .values()
            .find(|r| r.slug == slug && r.published)
            .cloned())
    }

    async fn list_recipes(&self, owner: &str) -> Result<Vec<Recipe>, StoreError> {
        let tables = self.inner.lock().unwrap();
        let mut rows: Vec<Recipe> = tables
            .recipes
            .values()
            .filter(|r| r.owner_id == owner)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(rows)
    }

    async fn update_recipe(
        &self,
        owner: &str,
        id: &str,
        patch: &RecipePatch,
    ) -> Result<bool, StoreError> {
        let mut tables = self.inner.lock().unwrap();
        let Some(row) = tables.recipes.get_mut(id).filter(|r| r.owner_id == owner) else {
            return Ok(false);
        };
        if let Some(title) = &patch.title {
            row.title = title.clone();
        }
        if let Some(description) = &patch.description {
            row.description = Some(description.clone());
        }
        if let Some(video_url) = &patch.video_url {
            row.video_url = Some(video_url.clone());
        }
        if let Some(published) = patch.published {
            row.published = published;
        }
        Ok(true)
    }

    async fn delete_recipe(&self, owner: &str, id: &str) -> Result<bool, StoreError> {
        let mut tables = self.inner.lock().unwrap();
        let owned = tables.recipes.get(id).is_some_and(|r| r.owner_id == owner);
        if !owned {
            return Ok(false);
        }
        tables.recipes.remove(id);

        // Foreign-key cascade, as the backend schema does it.
        let instruction_ids: Vec<String> = tables
            .instructions
            .values()
            .filter(|r| r.recipe_id == id)
            .map(|r| r.id.clone())
            .collect();
        let ingredient_ids: Vec<String> = tables
            .ingredients
            .values()
            .filter(|r| r.recipe_id == id)
            .map(|r| r.id.clone())
            .collect();
        tables.instructions.retain(|_, r| r.recipe_id != id);
        tables.ingredients.retain(|_, r| r.recipe_id != id);
        tables.tips.retain(|_, t| match t.parent_kind {
            ParentKind::Instruction => !instruction_ids.contains(&t.parent_id),
            ParentKind::Ingredient => !ingredient_ids.contains(&t.parent_id),
        });
        tables.shoots.retain(|_, s| s.recipe_id != id);
        Ok(true)
    }

    async fn slug_taken(&self, slug: &str) -> Result<bool, StoreError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.recipes.values().any(|r| r.slug == slug))
    }

    async fn insert_ingredient(&self, row: &Ingredient) -> Result<(), StoreError> {
        let mut tables = self.inner.lock().unwrap();
        tables.ingredients.insert(row.id.clone(), row.clone());
        Ok(())
    }

    async fn list_ingredients(
        &self,
        owner: &str,
        recipe_id: &str,
    ) -> Result<Vec<Ingredient>, StoreError> {
        let tables = self.inner.lock().unwrap();
        let mut rows: Vec<Ingredient> = tables
            .ingredients
            .values()
            .filter(|r| r.owner_id == owner && r.recipe_id == recipe_id)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.position);
        Ok(rows)
    }

    async fn update_ingredient(
        &self,
        owner: &str,
        id: &str,
        patch: &IngredientPatch,
    ) -> Result<bool, StoreError> {
        let mut tables = self.inner.lock().unwrap();
        let Some(row) = tables.ingredients.get_mut(id).filter(|r| r.owner_id == owner) else {
            return Ok(false);
        };
        if let Some(name) = &patch.name {
            row.name = name.clone();
        }
        if let Some(amount) = patch.amount {
            row.amount = Some(amount);
        }
        if let Some(unit) = &patch.unit {
            row.unit = Some(unit.clone());
        }
        Ok(true)
    }

    async fn insert_instruction(&self, row: &Instruction) -> Result<(), StoreError> {
        let mut tables = self.inner.lock().unwrap();
        tables.instructions.insert(row.id.clone(), row.clone());
        Ok(())
    }

    async fn list_instructions(
        &self,
        owner: &str,
        recipe_id: &str,
    ) -> Result<Vec<Instruction>, StoreError> {
        let tables = self.inner.lock().unwrap();
        let mut rows: Vec<Instruction> = tables
            .instructions
            .values()
            .filter(|r| r.owner_id == owner && r.recipe_id == recipe_id)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.position);
        Ok(rows)
    }

    async fn update_instruction(
        &self,
        owner: &str,
        id: &str,
        text: &str,
    ) -> Result<bool, StoreError> {
        let mut tables = self.inner.lock().unwrap();
        let Some(row) = tables.instructions.get_mut(id).filter(|r| r.owner_id == owner) else {
            return Ok(false);
        };
        row.text = text.to_string();
        Ok(true)
    }

    async fn insert_tip(&self, row: &Tip) -> Result<(), StoreError> {
        let mut tables = self.inner.lock().unwrap();
        tables.tips.insert(row.id.clone(), row.clone());
        Ok(())
    }

    async fn list_tips(&self, owner: &str, group: &GroupKey) -> Result<Vec<Tip>, StoreError> {
        let tables = self.inner.lock().unwrap();
        let mut rows: Vec<Tip> = tables
            .tips
            .values()
            .filter(|r| r.owner_id == owner && r.group() == *group)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.position);
        Ok(rows)
    }

    async fn update_tip(&self, owner: &str, id: &str, text: &str) -> Result<bool, StoreError> {
        let mut tables = self.inner.lock().unwrap();
        let Some(row) = tables.tips.get_mut(id).filter(|r| r.owner_id == owner) else {
            return Ok(false);
        };
        row.text = text.to_string();
        Ok(true)
    }

    async fn insert_shoot(&self, row: &ShootEvent) -> Result<(), StoreError> {
        let mut tables = self.inner.lock().unwrap();
        tables.shoots.insert(row.id.clone(), row.clone());
        Ok(())
    }

    async fn list_shoots(&self, owner: &str) -> Result<Vec<ShootEvent>, StoreError> {
        let tables = self.inner.lock().unwrap();
        let mut rows: Vec<ShootEvent> = tables
            .shoots
            .values()
            .filter(|r| r.owner_id == owner)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.shoot_date);
        Ok(rows)
    }

    async fn update_shoot(
        &self,
        owner: &str,
        id: &str,
        patch: &ShootPatch,
    ) -> Result<bool, StoreError> {
        let mut tables = self.inner.lock().unwrap();
        let Some(row) = tables.shoots.get_mut(id).filter(|r| r.owner_id == owner) else {
            return Ok(false);
        };
        if let Some(shoot_date) = patch.shoot_date {
            row.shoot_date = shoot_date;
        }
        if let Some(status) = patch.status {
            row.status = status;
        }
        if let Some(notes) = &patch.notes {
            row.notes = Some(notes.clone());
        }
        Ok(true)
    }

    async fn delete_shoot(&self, owner: &str, id: &str) -> Result<bool, StoreError> {
        let mut tables = self.inner.lock().unwrap();
        let owned = tables
            .shoots
            .get(id)
            .is_some_and(|r| r.owner_id == owner);
        if owned {
            tables.shoots.remove(id);
        }
        Ok(owned)
    }

    async fn find_item(
        &self,
        owner: &str,
        kind: ItemKind,
        id: &str,
    ) -> Result<Option<PositionedRow>, StoreError> {
        let tables = self.inner.lock().unwrap();
        Ok(positioned(&tables, kind, owner)
            .into_iter()
            .find(|r| r.id == id))
    }

    async fn max_position(
        &self,
        owner: &str,
        kind: ItemKind,
        group: &GroupKey,
    ) -> Result<i64, StoreError> {
        let tables = self.inner.lock().unwrap();
        Ok(positioned(&tables, kind, owner)
            .into_iter()
            .filter(|r| r.group == *group)
            .map(|r| r.position)
            .max()
            .unwrap_or(0))
    }

    async fn neighbor(
        &self,
        owner: &str,
        kind: ItemKind,
        group: &GroupKey,
        pivot: i64,
        direction: MoveDirection,
    ) -> Result<Option<PositionedRow>, StoreError> {
        let tables = self.inner.lock().unwrap();
        let siblings = positioned(&tables, kind, owner)
            .into_iter()
            .filter(|r| r.group == *group);
        Ok(match direction {
            MoveDirection::Up => siblings
                .filter(|r| r.position < pivot)
                .max_by_key(|r| r.position),
            MoveDirection::Down => siblings
                .filter(|r| r.position > pivot)
                .min_by_key(|r| r.position),
        })
    }

    async fn set_position(
        &self,
        owner: &str,
        kind: ItemKind,
        id: &str,
        position: i64,
    ) -> Result<bool, StoreError> {
        let mut tables = self.inner.lock().unwrap();
        let updated = match kind {
            ItemKind::Ingredient => tables
                .ingredients
                .get_mut(id)
                .filter(|r| r.owner_id == owner)
                .map(|r| r.position = position)
                .is_some(),
            ItemKind::Instruction => tables
                .instructions
                .get_mut(id)
                .filter(|r| r.owner_id == owner)
                .map(|r| r.position = position)
                .is_some(),
            ItemKind::Tip => tables
                .tips
                .get_mut(id)
                .filter(|r| r.owner_id == owner)
                .map(|r| r.position = position)
                .is_some(),
        };
        Ok(updated)
    }

    async fn delete_item(
        &self,
        owner: &str,
        kind: ItemKind,
        id: &str,
    ) -> Result<bool, StoreError> {
        let mut tables = self.inner.lock().unwrap();
        let deleted = match kind {
            ItemKind::Ingredient => {
                let owned = tables
                    .ingredients
                    .get(id)
                    .is_some_and(|r| r.owner_id == owner);
                if owned {
                    tables.ingredients.remove(id);
                    // Cascade tips hanging off the removed row.
                    tables.tips.retain(|_, t| {
                        !(t.parent_kind == ParentKind::Ingredient && t.parent_id == id)
                    });
                }
                owned
            }
            ItemKind::Instruction => {
                let owned = tables
                    .instructions
                    .get(id)
                    .is_some_and(|r| r.owner_id == owner);
                if owned {
                    tables.instructions.remove(id);
                    tables.tips.retain(|_, t| {
                        !(t.parent_kind == ParentKind::Instruction && t.parent_id == id)
                    });
                }
                owned
            }
            ItemKind::Tip => {
                let owned = tables.tips.get(id).is_some_and(|r| r.owner_id == owner);
                if owned {
                    tables.tips.remove(id);
                }
                owned
            }
        };
        Ok(deleted)
    }
}
