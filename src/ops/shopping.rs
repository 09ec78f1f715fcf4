//! Shopping-list aggregation across the recipes of planned shoots.

use std::collections::HashMap;

use log::debug;

use crate::error::DashboardError;
use crate::model::{Ingredient, ShoppingItem, ShootStatus};
use crate::store::RowStore;

/// Build the shopping list for everything still waiting to be shot.
///
/// Ingredient rows from every planned shoot's recipe are merged by
/// case-folded name and unit; a recipe scheduled twice contributes once.
pub async fn shopping_list<S>(store: &S, owner: &str) -> Result<Vec<ShoppingItem>, DashboardError>
where
    S: RowStore + ?Sized,
{
    let shoots = store.list_shoots(owner).await?;
    let mut recipe_ids: Vec<String> = Vec::new();
    for shoot in shoots
        .into_iter()
        .filter(|s| s.status == ShootStatus::Planned)
    {
        if !recipe_ids.contains(&shoot.recipe_id) {
            recipe_ids.push(shoot.recipe_id);
        }
    }

    let mut rows: Vec<Ingredient> = Vec::new();
    for recipe_id in &recipe_ids {
        rows.extend(store.list_ingredients(owner, recipe_id).await?);
    }
    debug!(
        "aggregating {} ingredient rows from {} planned recipes",
        rows.len(),
        recipe_ids.len()
    );
    Ok(aggregate_items(&rows))
}

/// Merge ingredient rows into shopping lines keyed by (name, unit).
///
/// Amounts are summed where present; rows without an amount still merge and
/// bump the entry count. Output is sorted by name.
pub fn aggregate_items(rows: &[Ingredient]) -> Vec<ShoppingItem> {
    let mut items: Vec<ShoppingItem> = Vec::new();
    let mut index: HashMap<(String, Option<String>), usize> = HashMap::new();

    for row in rows {
        let key = (row.name.trim().to_lowercase(), row.unit.clone());
        match index.get(&key) {
            Some(&i) => {
                let item = &mut items[i];
                item.entries += 1;
                item.amount = match (item.amount, row.amount) {
                    (Some(total), Some(amount)) => Some(total + amount),
                    (None, Some(amount)) => Some(amount),
                    (total, None) => total,
                };
            }
            None => {
                index.insert(key, items.len());
                items.push(ShoppingItem {
                    name: row.name.trim().to_string(),
                    unit: row.unit.clone(),
                    amount: row.amount,
                    entries: 1,
                });
            }
        }
    }

    items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, amount: Option<f64>, unit: Option<&str>) -> Ingredient {
        Ingredient {
            id: format!("{name}-{:?}-{:?}", amount, unit),
            owner_id: "owner-1".to_string(),
            recipe_id: "r1".to_string(),
            name: name.to_string(),
            amount,
            unit: unit.map(str::to_string),
            position: 0,
        }
    }

    #[test]
    fn test_amounts_sum_per_name_and_unit() {
        let rows = vec![
            row("farinha", Some(200.0), Some("g")),
            row("Farinha", Some(300.0), Some("g")),
            row("farinha", Some(1.0), Some("kg")),
        ];
        let items = aggregate_items(&rows);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].amount, Some(500.0));
        assert_eq!(items[0].unit.as_deref(), Some("g"));
        assert_eq!(items[0].entries, 2);
        assert_eq!(items[1].amount, Some(1.0));
    }

    #[test]
    fn test_amountless_rows_merge_without_sum() {
        let rows = vec![
            row("sal a gosto", None, None),
            row("Sal a gosto", None, None),
        ];
        let items = aggregate_items(&rows);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].amount, None);
        assert_eq!(items[0].entries, 2);
    }

    #[test]
    fn test_mixed_amounts_keep_partial_sum() {
        let rows = vec![row("ovos", None, None), row("ovos", Some(3.0), None)];
        let items = aggregate_items(&rows);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].amount, Some(3.0));
        assert_eq!(items[0].entries, 2);
    }

    #[test]
    fn test_output_sorted_by_name() {
        let rows = vec![
            row("ovos", Some(3.0), None),
            row("açúcar", Some(100.0), Some("g")),
            row("Batata", Some(1.0), Some("kg")),
        ];
        let items = aggregate_items(&rows);
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["açúcar", "Batata", "ovos"]);
    }
}
