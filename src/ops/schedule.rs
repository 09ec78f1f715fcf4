//! Shooting-schedule tracking for the video pipeline.

use chrono::NaiveDate;
use log::debug;
use uuid::Uuid;

use crate::error::DashboardError;
use crate::model::{ShootEvent, ShootPatch, ShootStatus};
use crate::ops::clean_optional;
use crate::store::RowStore;

/// Form input for planning a recording session.
#[derive(Debug, Clone)]
pub struct NewShoot {
    pub recipe_id: String,
    pub shoot_date: NaiveDate,
    pub notes: Option<String>,
}

/// Plan a shoot for an owned recipe.
///
/// Returns `None` without inserting when the recipe is missing or owned by
/// someone else.
pub async fn plan_shoot<S>(
    store: &S,
    owner: &str,
    input: NewShoot,
) -> Result<Option<ShootEvent>, DashboardError>
where
    S: RowStore + ?Sized,
{
    if store.find_recipe(owner, &input.recipe_id).await?.is_none() {
        debug!(
            "plan shoot: recipe {} not visible to this owner, skipping",
            input.recipe_id
        );
        return Ok(None);
    }

    let row = ShootEvent {
        id: Uuid::new_v4().to_string(),
        owner_id: owner.to_string(),
        recipe_id: input.recipe_id,
        shoot_date: input.shoot_date,
        status: ShootStatus::Planned,
        notes: clean_optional(input.notes),
    };
    store.insert_shoot(&row).await?;
    Ok(Some(row))
}

/// Shoots in date order, optionally narrowed to one pipeline status.
pub async fn list_shoots<S>(
    store: &S,
    owner: &str,
    status: Option<ShootStatus>,
) -> Result<Vec<ShootEvent>, DashboardError>
where
    S: RowStore + ?Sized,
{
    let mut rows = store.list_shoots(owner).await?;
    if let Some(status) = status {
        rows.retain(|r| r.status == status);
    }
    Ok(rows)
}

pub async fn update_shoot<S>(
    store: &S,
    owner: &str,
    id: &str,
    patch: ShootPatch,
) -> Result<(), DashboardError>
where
    S: RowStore + ?Sized,
{
    if !store.update_shoot(owner, id, &patch).await? {
        debug!("update: shoot {id} not visible to this owner, skipping");
    }
    Ok(())
}

pub async fn delete_shoot<S>(store: &S, owner: &str, id: &str) -> Result<(), DashboardError>
where
    S: RowStore + ?Sized,
{
    if !store.delete_shoot(owner, id).await? {
        debug!("delete: shoot {id} not visible to this owner, skipping");
    }
    Ok(())
}
