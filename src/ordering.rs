//! Ordinal position management for sibling rows.
//!
//! Positions are sparse integers used purely for sort order: appends land at
//! `max + step` so rows can later be squeezed in without a full renumber,
//! moves swap position values with the order-adjacent neighbor, and deletes
//! leave gaps in place. These are stateless operations over externally-owned
//! rows; nothing about "the list" is held between calls.

use log::{debug, error};

use crate::error::DashboardError;
use crate::model::{GroupKey, ItemKind};
use crate::store::{RowStore, StoreError};

pub const DEFAULT_STEP: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Result of a move: either the swap happened, or the operation completed
/// without touching anything (missing/unowned item, or already at the
/// boundary in the requested direction).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Unchanged,
}

/// Kind-agnostic view of a row participating in sibling ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedRow {
    pub id: String,
    pub group: GroupKey,
    pub position: i64,
}

/// Compute the append position for a new sibling of `group`.
///
/// Read-then-use with no lock: two concurrent appends against the same group
/// can observe the same max and collide on the returned position. The
/// backend does not constrain (group, position) uniqueness, so the collision
/// is accepted rather than detected.
pub async fn next_position<S>(
    store: &S,
    owner: &str,
    kind: ItemKind,
    group: &GroupKey,
    step: i64,
) -> Result<i64, StoreError>
where
    S: RowStore + ?Sized,
{
    let max = store.max_position(owner, kind, group).await?;
    Ok(max + step)
}

/// Positions for a multi-line import: the i-th line (1-based) lands at
/// `start + i * step`, strictly increasing and collision-free as long as
/// `start` was freshly read via [`next_position`].
pub fn bulk_positions(start: i64, count: usize, step: i64) -> Vec<i64> {
    (1..=count as i64).map(|i| start + i * step).collect()
}

/// Swap an item's position with its order-adjacent neighbor.
///
/// Missing or unowned items and boundary moves (first item up, last item
/// down) complete as [`MoveOutcome::Unchanged`]. The two position writes are
/// issued independently; a rejected write surfaces as
/// [`DashboardError::Reorder`].
pub async fn move_item<S>(
    store: &S,
    owner: &str,
    kind: ItemKind,
    id: &str,
    direction: MoveDirection,
) -> Result<MoveOutcome, DashboardError>
where
    S: RowStore + ?Sized,
{
    let Some(item) = store.find_item(owner, kind, id).await? else {
        debug!("move: {kind:?} {id} not visible to this owner, skipping");
        return Ok(MoveOutcome::Unchanged);
    };

    let Some(neighbor) = store
        .neighbor(owner, kind, &item.group, item.position, direction)
        .await?
    else {
        return Ok(MoveOutcome::Unchanged);
    };

    store
        .set_position(owner, kind, &item.id, neighbor.position)
        .await
        .map_err(|e| {
            error!("position write failed for {kind:?} {id}: {e}");
            DashboardError::Reorder
        })?;
    store
        .set_position(owner, kind, &neighbor.id, item.position)
        .await
        .map_err(|e| {
            error!("position write failed for {kind:?} {}: {e}", neighbor.id);
            DashboardError::Reorder
        })?;

    Ok(MoveOutcome::Moved)
}

/// Remove a row. Remaining siblings keep their positions; gaps stay until a
/// later bulk append re-gaps locally.
pub async fn delete_item<S>(
    store: &S,
    owner: &str,
    kind: ItemKind,
    id: &str,
) -> Result<bool, StoreError>
where
    S: RowStore + ?Sized,
{
    let deleted = store.delete_item(owner, kind, id).await?;
    if !deleted {
        debug!("delete: {kind:?} {id} not visible to this owner, skipping");
    }
    Ok(deleted)
}
