//! Hosted backend client speaking the PostgREST dialect.
//!
//! Tables are addressed as `{base_url}/rest/v1/{table}`; filters travel as
//! `column=eq.value` query parameters, ordering as `order=column.direction`,
//! and writes ask for `return=representation` so a row count distinguishes
//! "updated" from "no row matched the owner filter".

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::model::{
    GroupKey, Ingredient, IngredientPatch, Instruction, ItemKind, ParentKind, Recipe, RecipePatch,
    ShootEvent, ShootPatch, Tip,
};
use crate::ordering::{MoveDirection, PositionedRow};
use crate::store::{RowStore, StoreError};

pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

type Filter = (String, String);

fn eq(column: &str, value: &str) -> Filter {
    (column.to_string(), format!("eq.{value}"))
}

fn owner_eq(owner: &str) -> Filter {
    eq("owner_id", owner)
}

fn order(by: &str) -> Filter {
    ("order".to_string(), by.to_string())
}

fn limit(n: u32) -> Filter {
    ("limit".to_string(), n.to_string())
}

fn table(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Ingredient => "ingredients",
        ItemKind::Instruction => "instructions",
        ItemKind::Tip => "tips",
    }
}

fn parent_kind_value(kind: ParentKind) -> &'static str {
    match kind {
        ParentKind::Instruction => "instruction",
        ParentKind::Ingredient => "ingredient",
    }
}

fn group_filters(group: &GroupKey) -> Vec<Filter> {
    match group {
        GroupKey::Recipe(id) => vec![eq("recipe_id", id)],
        GroupKey::Parent(kind, id) => vec![
            eq("parent_kind", parent_kind_value(*kind)),
            eq("parent_id", id),
        ],
    }
}

/// Minimal projection used by the position probes.
#[derive(Debug, Deserialize)]
struct SlimRow {
    id: String,
    position: i64,
}

impl RestStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        RestStore {
            client: Client::new(),
            base_url: trim_base(base_url.into()),
            api_key: api_key.into(),
        }
    }

    /// Create a store with a per-request timeout on the HTTP client.
    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(RestStore {
            client,
            base_url: trim_base(base_url.into()),
            api_key: api_key.into(),
        })
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/rest/v1/{}", self.base_url, table))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(StoreError::Backend {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: Vec<Filter>,
    ) -> Result<Vec<T>, StoreError> {
        debug!("GET {table} {filters:?}");
        let response = self
            .request(Method::GET, table)
            .query(&filters)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn insert<T: Serialize>(&self, table: &str, row: &T) -> Result<(), StoreError> {
        let response = self
            .request(Method::POST, table)
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn update<B: Serialize>(
        &self,
        table: &str,
        filters: Vec<Filter>,
        body: &B,
    ) -> Result<bool, StoreError> {
        let response = self
            .request(Method::PATCH, table)
            .header("Prefer", "return=representation")
            .query(&filters)
            .json(body)
            .send()
            .await?;
        let rows: Vec<Value> = Self::check(response).await?.json().await?;
        Ok(!rows.is_empty())
    }

    async fn delete(&self, table: &str, filters: Vec<Filter>) -> Result<bool, StoreError> {
        let response = self
            .request(Method::DELETE, table)
            .header("Prefer", "return=representation")
            .query(&filters)
            .send()
            .await?;
        let rows: Vec<Value> = Self::check(response).await?.json().await?;
        Ok(!rows.is_empty())
    }

    async fn slim_probe(
        &self,
        kind: ItemKind,
        mut filters: Vec<Filter>,
        descending: bool,
    ) -> Result<Option<SlimRow>, StoreError> {
        filters.push(("select".to_string(), "id,position".to_string()));
        filters.push(order(if descending {
            "position.desc"
        } else {
            "position.asc"
        }));
        filters.push(limit(1));
        let mut rows: Vec<SlimRow> = self.select(table(kind), filters).await?;
        Ok(rows.pop())
    }
}

fn trim_base(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

#[async_trait]
impl RowStore for RestStore {
    async fn insert_recipe(&self, row: &Recipe) -> Result<(), StoreError> {
        self.insert("recipes", row).await
    }

    async fn find_recipe(&self, owner: &str, id: &str) -> Result<Option<Recipe>, StoreError> {
        let mut rows: Vec<Recipe> = self
            .select("recipes", vec![owner_eq(owner), eq("id", id), limit(1)])
            .await?;
        Ok(rows.pop())
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Recipe>, StoreError> {
        let mut rows: Vec<Recipe> = self
            .select(
                "recipes",
                vec![eq("slug", slug), eq("published", "true"), limit(1)],
            )
            .await?;
        Ok(rows.pop())
    }

    async fn list_recipes(&self, owner: &str) -> Result<Vec<Recipe>, StoreError> {
        self.select("recipes", vec![owner_eq(owner), order("title.asc")])
            .await
    }

    async fn update_recipe(
        &self,
        owner: &str,
        id: &str,
        patch: &RecipePatch,
    ) -> Result<bool, StoreError> {
        self.update("recipes", vec![owner_eq(owner), eq("id", id)], patch)
            .await
    }

    async fn delete_recipe(&self, owner: &str, id: &str) -> Result<bool, StoreError> {
        // Child rows go with the recipe via the schema's FK cascade.
        self.delete("recipes", vec![owner_eq(owner), eq("id", id)])
            .await
    }

    async fn slug_taken(&self, slug: &str) -> Result<bool, StoreError> {
        let rows: Vec<Value> = self
            .select(
                "recipes",
                vec![
                    eq("slug", slug),
                    ("select".to_string(), "id".to_string()),
                    limit(1),
                ],
            )
            .await?;
        Ok(!rows.is_empty())
    }

    async fn insert_ingredient(&self, row: &Ingredient) -> Result<(), StoreError> {
        self.insert("ingredients", row).await
    }

    async fn list_ingredients(
        &self,
        owner: &str,
        recipe_id: &str,
    ) -> Result<Vec<Ingredient>, StoreError> {
        self.select(
            "ingredients",
            vec![
                owner_eq(owner),
                eq("recipe_id", recipe_id),
                order("position.asc"),
            ],
        )
        .await
    }

    async fn update_ingredient(
        &self,
        owner: &str,
        id: &str,
        patch: &IngredientPatch,
    ) -> Result<bool, StoreError> {
        self.update("ingredients", vec![owner_eq(owner), eq("id", id)], patch)
            .await
    }

    async fn insert_instruction(&self, row: &Instruction) -> Result<(), StoreError> {
        self.insert("instructions", row).await
    }

    async fn list_instructions(
        &self,
        owner: &str,
        recipe_id: &str,
    ) -> Result<Vec<Instruction>, StoreError> {
        self.select(
            "instructions",
            vec![
                owner_eq(owner),
                eq("recipe_id", recipe_id),
                order("position.asc"),
            ],
        )
        .await
    }

    async fn update_instruction(
        &self,
        owner: &str,
        id: &str,
        text: &str,
    ) -> Result<bool, StoreError> {
        self.update(
            "instructions",
            vec![owner_eq(owner), eq("id", id)],
            &json!({ "text": text }),
        )
        .await
    }

    async fn insert_tip(&self, row: &Tip) -> Result<(), StoreError> {
        self.insert("tips", row).await
    }

    async fn list_tips(&self, owner: &str, group: &GroupKey) -> Result<Vec<Tip>, StoreError> {
        let mut filters = vec![owner_eq(owner)];
        filters.extend(group_filters(group));
        filters.push(order("position.asc"));
        self.select("tips", filters).await
    }

    async fn update_tip(&self, owner: &str, id: &str, text: &str) -> Result<bool, StoreError> {
        self.update(
            "tips",
            vec![owner_eq(owner), eq("id", id)],
            &json!({ "text": text }),
        )
        .await
    }

    async fn insert_shoot(&self, row: &ShootEvent) -> Result<(), StoreError> {
        self.insert("shoot_events", row).await
    }

    async fn list_shoots(&self, owner: &str) -> Result<Vec<ShootEvent>, StoreError> {
        self.select(
            "shoot_events",
            vec![owner_eq(owner), order("shoot_date.asc")],
        )
        .await
    }

    async fn update_shoot(
        &self,
        owner: &str,
        id: &str,
        patch: &ShootPatch,
    ) -> Result<bool, StoreError> {
        self.update("shoot_events", vec![owner_eq(owner), eq("id", id)], patch)
            .await
    }

    async fn delete_shoot(&self, owner: &str, id: &str) -> Result<bool, StoreError> {
        self.delete("shoot_events", vec![owner_eq(owner), eq("id", id)])
            .await
    }

    async fn find_item(
        &self,
        owner: &str,
        kind: ItemKind,
        id: &str,
    ) -> Result<Option<PositionedRow>, StoreError> {
        let filters = vec![owner_eq(owner), eq("id", id), limit(1)];
        Ok(match kind {
            ItemKind::Ingredient => {
                let mut rows: Vec<Ingredient> = self.select(table(kind), filters).await?;
                rows.pop().map(|r| PositionedRow {
                    id: r.id,
                    group: GroupKey::Recipe(r.recipe_id),
                    position: r.position,
                })
            }
            ItemKind::Instruction => {
                let mut rows: Vec<Instruction> = self.select(table(kind), filters).await?;
                rows.pop().map(|r| PositionedRow {
                    id: r.id,
                    group: GroupKey::Recipe(r.recipe_id),
                    position: r.position,
                })
            }
            ItemKind::Tip => {
                let mut rows: Vec<Tip> = self.select(table(kind), filters).await?;
                rows.pop().map(|r| PositionedRow {
                    id: r.id.clone(),
                    group: r.group(),
                    position: r.position,
                })
            }
        })
    }

    async fn max_position(
        &self,
        owner: &str,
        kind: ItemKind,
        group: &GroupKey,
    ) -> Result<i64, StoreError> {
        let mut filters = vec![owner_eq(owner)];
        filters.extend(group_filters(group));
        let row = self.slim_probe(kind, filters, true).await?;
        Ok(row.map(|r| r.position).unwrap_or(0))
    }

    async fn neighbor(
        &self,
        owner: &str,
        kind: ItemKind,
        group: &GroupKey,
        pivot: i64,
        direction: MoveDirection,
    ) -> Result<Option<PositionedRow>, StoreError> {
        let mut filters = vec![owner_eq(owner)];
        filters.extend(group_filters(group));
        let descending = match direction {
            MoveDirection::Up => {
                filters.push(("position".to_string(), format!("lt.{pivot}")));
                true
            }
            MoveDirection::Down => {
                filters.push(("position".to_string(), format!("gt.{pivot}")));
                false
            }
        };
        let row = self.slim_probe(kind, filters, descending).await?;
        Ok(row.map(|r| PositionedRow {
            id: r.id,
            group: group.clone(),
            position: r.position,
        }))
    }

    async fn set_position(
        &self,
        owner: &str,
        kind: ItemKind,
        id: &str,
        position: i64,
    ) -> Result<bool, StoreError> {
        self.update(
            table(kind),
            vec![owner_eq(owner), eq("id", id)],
            &json!({ "position": position }),
        )
        .await
    }

    async fn delete_item(
        &self,
        owner: &str,
        kind: ItemKind,
        id: &str,
    ) -> Result<bool, StoreError> {
        self.delete(table(kind), vec![owner_eq(owner), eq("id", id)])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_max_position_empty_group() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/ingredients")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create();

        let store = RestStore::new(server.url(), "test-key");
        let group = GroupKey::Recipe("r1".to_string());
        let max = store
            .max_position("owner-1", ItemKind::Ingredient, &group)
            .await
            .unwrap();
        assert_eq!(max, 0);
        mock.assert();
    }

    #[tokio::test]
    async fn test_max_position_reads_top_row() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/ingredients")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("owner_id".into(), "eq.owner-1".into()),
                Matcher::UrlEncoded("recipe_id".into(), "eq.r1".into()),
                Matcher::UrlEncoded("order".into(), "position.desc".into()),
                Matcher::UrlEncoded("limit".into(), "1".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id": "i3", "position": 30}]"#)
            .create();

        let store = RestStore::new(server.url(), "test-key");
        let group = GroupKey::Recipe("r1".to_string());
        let max = store
            .max_position("owner-1", ItemKind::Ingredient, &group)
            .await
            .unwrap();
        assert_eq!(max, 30);
        mock.assert();
    }

    #[tokio::test]
    async fn test_neighbor_up_probes_below_pivot() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/instructions")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("position".into(), "lt.20".into()),
                Matcher::UrlEncoded("order".into(), "position.desc".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id": "s1", "position": 10}]"#)
            .create();

        let store = RestStore::new(server.url(), "test-key");
        let group = GroupKey::Recipe("r1".to_string());
        let neighbor = store
            .neighbor("owner-1", ItemKind::Instruction, &group, 20, MoveDirection::Up)
            .await
            .unwrap();
        assert_eq!(
            neighbor,
            Some(PositionedRow {
                id: "s1".to_string(),
                group,
                position: 10,
            })
        );
        mock.assert();
    }

    #[tokio::test]
    async fn test_set_position_reports_unmatched_filter() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PATCH", "/rest/v1/tips")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create();

        let store = RestStore::new(server.url(), "test-key");
        let updated = store
            .set_position("owner-2", ItemKind::Tip, "t1", 10)
            .await
            .unwrap();
        assert!(!updated);
        mock.assert();
    }

    #[tokio::test]
    async fn test_insert_surfaces_backend_rejection() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/v1/recipes")
            .with_status(401)
            .with_body(r#"{"message": "JWT expired"}"#)
            .create();

        let store = RestStore::new(server.url(), "stale-key");
        let recipe = Recipe {
            id: "r1".to_string(),
            owner_id: "owner-1".to_string(),
            title: "Bolo de cenoura".to_string(),
            slug: "bolo-de-cenoura".to_string(),
            description: None,
            video_url: None,
            published: false,
        };
        let err = store.insert_recipe(&recipe).await.unwrap_err();
        match err {
            StoreError::Backend { status, message } => {
                assert_eq!(status, 401);
                assert!(message.contains("JWT expired"));
            }
            other => panic!("expected Backend error, got {other:?}"),
        }
        mock.assert();
    }

    #[tokio::test]
    async fn test_find_published_by_slug() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/recipes")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("slug".into(), "eq.bolo-de-cenoura".into()),
                Matcher::UrlEncoded("published".into(), "eq.true".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{
                    "id": "r1",
                    "owner_id": "owner-1",
                    "title": "Bolo de cenoura",
                    "slug": "bolo-de-cenoura",
                    "description": null,
                    "video_url": null,
                    "published": true
                }]"#,
            )
            .create();

        let store = RestStore::new(server.url(), "test-key");
        let recipe = store
            .find_published_by_slug("bolo-de-cenoura")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(recipe.title, "Bolo de cenoura");
        assert!(recipe.published);
        mock.assert();
    }
}
