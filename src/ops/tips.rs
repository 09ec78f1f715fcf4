//! Presenter tips attached to an instruction or an ingredient.

use log::debug;
use uuid::Uuid;

use crate::config::OrderingSteps;
use crate::error::DashboardError;
use crate::model::{GroupKey, ItemKind, ParentKind, Tip};
use crate::ops::required;
use crate::ordering;
use crate::store::RowStore;

/// Form input for a new tip.
#[derive(Debug, Clone)]
pub struct NewTip {
    pub parent_kind: ParentKind,
    pub parent_id: String,
    pub text: String,
}

/// Append a tip under its parent row.
///
/// Returns `None` without inserting when the parent is missing or owned by
/// someone else.
pub async fn add_tip<S>(
    store: &S,
    owner: &str,
    steps: OrderingSteps,
    input: NewTip,
) -> Result<Option<Tip>, DashboardError>
where
    S: RowStore + ?Sized,
{
    let text = required(&input.text, "text")?;

    let parent_item_kind = match input.parent_kind {
        ParentKind::Instruction => ItemKind::Instruction,
        ParentKind::Ingredient => ItemKind::Ingredient,
    };
    if store
        .find_item(owner, parent_item_kind, &input.parent_id)
        .await?
        .is_none()
    {
        debug!(
            "add tip: parent {} not visible to this owner, skipping",
            input.parent_id
        );
        return Ok(None);
    }

    let group = GroupKey::Parent(input.parent_kind, input.parent_id.clone());
    let position =
        ordering::next_position(store, owner, ItemKind::Tip, &group, steps.tips).await?;
    let row = Tip {
        id: Uuid::new_v4().to_string(),
        owner_id: owner.to_string(),
        parent_kind: input.parent_kind,
        parent_id: input.parent_id,
        text,
        position,
    };
    store.insert_tip(&row).await?;
    Ok(Some(row))
}

pub async fn update_tip<S>(
    store: &S,
    owner: &str,
    id: &str,
    text: &str,
) -> Result<(), DashboardError>
where
    S: RowStore + ?Sized,
{
    let text = required(text, "text")?;
    if !store.update_tip(owner, id, &text).await? {
        debug!("update: tip {id} not visible to this owner, skipping");
    }
    Ok(())
}
