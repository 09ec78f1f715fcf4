//! Ingredient editing: structured add, quick-add, pasted import, updates.

use log::debug;
use uuid::Uuid;

use crate::config::OrderingSteps;
use crate::error::DashboardError;
use crate::model::{GroupKey, Ingredient, IngredientPatch, ItemKind, ParsedLine};
use crate::ops::{checked_amount, clean_optional, required};
use crate::ordering;
use crate::parser::{parse_line, parse_lines};
use crate::store::RowStore;

/// Form input for a structured ingredient row.
#[derive(Debug, Clone, Default)]
pub struct NewIngredient {
    pub recipe_id: String,
    pub name: String,
    pub amount: Option<f64>,
    pub unit: Option<String>,
}

/// Append one ingredient at the end of the recipe's list.
///
/// Returns `None` without inserting when the recipe is missing or owned by
/// someone else.
pub async fn add_ingredient<S>(
    store: &S,
    owner: &str,
    steps: OrderingSteps,
    input: NewIngredient,
) -> Result<Option<Ingredient>, DashboardError>
where
    S: RowStore + ?Sized,
{
    let name = required(&input.name, "name")?;
    let amount = checked_amount(input.amount)?;
    let unit = clean_optional(input.unit).map(|u| u.to_lowercase());

    if store.find_recipe(owner, &input.recipe_id).await?.is_none() {
        debug!(
            "add ingredient: recipe {} not visible to this owner, skipping",
            input.recipe_id
        );
        return Ok(None);
    }

    let group = GroupKey::Recipe(input.recipe_id.clone());
    let position = ordering::next_position(
        store,
        owner,
        ItemKind::Ingredient,
        &group,
        steps.ingredients,
    )
    .await?;
    let row = Ingredient {
        id: Uuid::new_v4().to_string(),
        owner_id: owner.to_string(),
        recipe_id: input.recipe_id,
        name,
        amount,
        unit,
        position,
    };
    store.insert_ingredient(&row).await?;
    Ok(Some(row))
}

/// Parse one free-text line and append it.
///
/// Returns `None` for lines the parser skips (empty after bullet stripping)
/// and for missing/unowned recipes.
pub async fn quick_add_ingredient<S>(
    store: &S,
    owner: &str,
    steps: OrderingSteps,
    recipe_id: &str,
    line: &str,
) -> Result<Option<Ingredient>, DashboardError>
where
    S: RowStore + ?Sized,
{
    let Some(parsed) = parse_line(line) else {
        return Ok(None);
    };
    add_ingredient(store, owner, steps, from_parsed(recipe_id, parsed)).await
}

/// Import a pasted block of legacy ingredient text.
///
/// One append-position read covers the whole batch; the i-th parsed line
/// lands at `start + i * step`, preserving paste order.
pub async fn import_ingredient_lines<S>(
    store: &S,
    owner: &str,
    steps: OrderingSteps,
    recipe_id: &str,
    text: &str,
) -> Result<Vec<Ingredient>, DashboardError>
where
    S: RowStore + ?Sized,
{
    let lines = parse_lines(text);
    if lines.is_empty() {
        return Ok(Vec::new());
    }
    if store.find_recipe(owner, recipe_id).await?.is_none() {
        debug!("import: recipe {recipe_id} not visible to this owner, skipping");
        return Ok(Vec::new());
    }

    let group = GroupKey::Recipe(recipe_id.to_string());
    let start = ordering::next_position(
        store,
        owner,
        ItemKind::Ingredient,
        &group,
        steps.ingredients,
    )
    .await?;
    let positions = ordering::bulk_positions(start, lines.len(), steps.ingredients);

    let mut rows = Vec::with_capacity(lines.len());
    for (parsed, position) in lines.into_iter().zip(positions) {
        let row = Ingredient {
            id: Uuid::new_v4().to_string(),
            owner_id: owner.to_string(),
            recipe_id: recipe_id.to_string(),
            name: parsed.name,
            amount: parsed.amount,
            unit: parsed.unit,
            position,
        };
        store.insert_ingredient(&row).await?;
        rows.push(row);
    }
    debug!("imported {} ingredient lines into {recipe_id}", rows.len());
    Ok(rows)
}

pub async fn update_ingredient<S>(
    store: &S,
    owner: &str,
    id: &str,
    patch: IngredientPatch,
) -> Result<(), DashboardError>
where
    S: RowStore + ?Sized,
{
    let patch = IngredientPatch {
        name: match patch.name {
            Some(name) => Some(required(&name, "name")?),
            None => None,
        },
        amount: checked_amount(patch.amount)?,
        unit: patch.unit.map(|u| u.trim().to_lowercase()),
    };
    if !store.update_ingredient(owner, id, &patch).await? {
        debug!("update: ingredient {id} not visible to this owner, skipping");
    }
    Ok(())
}

fn from_parsed(recipe_id: &str, parsed: ParsedLine) -> NewIngredient {
    NewIngredient {
        recipe_id: recipe_id.to_string(),
        name: parsed.name,
        amount: parsed.amount,
        unit: parsed.unit,
    }
}
