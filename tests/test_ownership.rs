//! Missing and unauthorized rows degrade to silent no-ops: no error, no
//! mutation, and the caller cannot tell the two conditions apart.

use cookdesk::model::IngredientPatch;
use cookdesk::ops::ingredients::NewIngredient;
use cookdesk::ops::recipes::NewRecipe;
use cookdesk::{Dashboard, Ingredient, MemoryStore, MoveDirection, MoveOutcome, Recipe};

struct Fixture {
    owner: Dashboard<MemoryStore>,
    intruder: Dashboard<MemoryStore>,
    recipe: Recipe,
    rows: Vec<Ingredient>,
}

async fn fixture() -> Fixture {
    let store = MemoryStore::new();
    let owner = Dashboard::with_store(store.clone(), "owner-1");
    let intruder = Dashboard::with_store(store, "owner-2");

    let recipe = owner
        .create_recipe(NewRecipe {
            title: "Moqueca".to_string(),
            ..NewRecipe::default()
        })
        .await
        .unwrap();
    let rows = owner
        .import_ingredients(&recipe.id, "500 g peixe\n2 tomates\n1 pimentão")
        .await
        .unwrap();
    Fixture {
        owner,
        intruder,
        recipe,
        rows,
    }
}

#[tokio::test]
async fn test_foreign_move_is_silent_and_inert() {
    let f = fixture().await;

    let outcome = f
        .intruder
        .move_ingredient(&f.rows[1].id, MoveDirection::Up)
        .await
        .unwrap();
    assert_eq!(outcome, MoveOutcome::Unchanged);

    let listed = f.owner.ingredients(&f.recipe.id).await.unwrap();
    let positions: Vec<i64> = listed.iter().map(|r| r.position).collect();
    assert_eq!(positions, vec![20, 30, 40]);
}

#[tokio::test]
async fn test_foreign_delete_is_silent_and_inert() {
    let f = fixture().await;

    f.intruder.delete_ingredient(&f.rows[0].id).await.unwrap();
    assert_eq!(f.owner.ingredients(&f.recipe.id).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_foreign_update_is_silent_and_inert() {
    let f = fixture().await;

    f.intruder
        .update_ingredient(
            &f.rows[0].id,
            IngredientPatch {
                name: Some("camarão".to_string()),
                ..IngredientPatch::default()
            },
        )
        .await
        .unwrap();

    let listed = f.owner.ingredients(&f.recipe.id).await.unwrap();
    assert_eq!(listed[0].name, "peixe");
}

#[tokio::test]
async fn test_add_to_foreign_recipe_inserts_nothing() {
    let f = fixture().await;

    let row = f
        .intruder
        .add_ingredient(NewIngredient {
            recipe_id: f.recipe.id.clone(),
            name: "sal".to_string(),
            amount: None,
            unit: None,
        })
        .await
        .unwrap();
    assert!(row.is_none());
    assert_eq!(f.owner.ingredients(&f.recipe.id).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_unknown_ids_are_silent() {
    let f = fixture().await;

    let outcome = f
        .owner
        .move_ingredient("no-such-row", MoveDirection::Down)
        .await
        .unwrap();
    assert_eq!(outcome, MoveOutcome::Unchanged);
    f.owner.delete_ingredient("no-such-row").await.unwrap();
    f.owner.delete_recipe("no-such-recipe").await.unwrap();
}

#[tokio::test]
async fn test_foreign_recipe_is_invisible() {
    let f = fixture().await;

    assert!(f.intruder.recipe(&f.recipe.id).await.unwrap().is_none());
    assert!(f.intruder.recipes().await.unwrap().is_empty());
    assert!(f
        .intruder
        .ingredients(&f.recipe.id)
        .await
        .unwrap()
        .is_empty());
}
