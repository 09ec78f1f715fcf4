//! Instruction step editing.

use log::debug;
use uuid::Uuid;

use crate::config::OrderingSteps;
use crate::error::DashboardError;
use crate::model::{GroupKey, Instruction, ItemKind};
use crate::ops::required;
use crate::ordering;
use crate::store::RowStore;

/// Form input for a new instruction step.
#[derive(Debug, Clone, Default)]
pub struct NewInstruction {
    pub recipe_id: String,
    pub text: String,
}

/// Append one instruction at the end of the recipe's steps.
///
/// Returns `None` without inserting when the recipe is missing or owned by
/// someone else.
pub async fn add_instruction<S>(
    store: &S,
    owner: &str,
    steps: OrderingSteps,
    input: NewInstruction,
) -> Result<Option<Instruction>, DashboardError>
where
    S: RowStore + ?Sized,
{
    let text = required(&input.text, "text")?;

    if store.find_recipe(owner, &input.recipe_id).await?.is_none() {
        debug!(
            "add instruction: recipe {} not visible to this owner, skipping",
            input.recipe_id
        );
        return Ok(None);
    }

    let group = GroupKey::Recipe(input.recipe_id.clone());
    let position = ordering::next_position(
        store,
        owner,
        ItemKind::Instruction,
        &group,
        steps.instructions,
    )
    .await?;
    let row = Instruction {
        id: Uuid::new_v4().to_string(),
        owner_id: owner.to_string(),
        recipe_id: input.recipe_id,
        text,
        position,
    };
    store.insert_instruction(&row).await?;
    Ok(Some(row))
}

pub async fn update_instruction<S>(
    store: &S,
    owner: &str,
    id: &str,
    text: &str,
) -> Result<(), DashboardError>
where
    S: RowStore + ?Sized,
{
    let text = required(text, "text")?;
    if !store.update_instruction(owner, id, &text).await? {
        debug!("update: instruction {id} not visible to this owner, skipping");
    }
    Ok(())
}
