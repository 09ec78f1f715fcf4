//! Recipe CRUD, slug allocation and publishing flags.

use log::debug;
use uuid::Uuid;

use crate::error::DashboardError;
use crate::model::{Recipe, RecipePatch};
use crate::ops::{clean_optional, required};
use crate::store::{RowStore, StoreError};

/// Form input for creating a recipe.
#[derive(Debug, Clone, Default)]
pub struct NewRecipe {
    pub title: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
}

pub async fn create_recipe<S>(
    store: &S,
    owner: &str,
    input: NewRecipe,
) -> Result<Recipe, DashboardError>
where
    S: RowStore + ?Sized,
{
    let title = required(&input.title, "title")?;
    let slug = allocate_slug(store, &title).await?;
    let recipe = Recipe {
        id: Uuid::new_v4().to_string(),
        owner_id: owner.to_string(),
        title,
        slug,
        description: clean_optional(input.description),
        video_url: clean_optional(input.video_url),
        published: false,
    };
    store.insert_recipe(&recipe).await?;
    debug!("created recipe {} as /{}", recipe.id, recipe.slug);
    Ok(recipe)
}

pub async fn update_recipe<S>(
    store: &S,
    owner: &str,
    id: &str,
    patch: RecipePatch,
) -> Result<(), DashboardError>
where
    S: RowStore + ?Sized,
{
    let RecipePatch {
        title,
        description,
        video_url,
        published,
    } = patch;
    let patch = RecipePatch {
        title: match title {
            Some(title) => Some(required(&title, "title")?),
            None => None,
        },
        description,
        video_url,
        published,
    };
    if !store.update_recipe(owner, id, &patch).await? {
        debug!("update: recipe {id} not visible to this owner, skipping");
    }
    Ok(())
}

pub async fn delete_recipe<S>(store: &S, owner: &str, id: &str) -> Result<(), DashboardError>
where
    S: RowStore + ?Sized,
{
    if !store.delete_recipe(owner, id).await? {
        debug!("delete: recipe {id} not visible to this owner, skipping");
    }
    Ok(())
}

/// Flip the public-page flag. Missing or unowned recipes are skipped.
pub async fn set_published<S>(
    store: &S,
    owner: &str,
    id: &str,
    published: bool,
) -> Result<(), DashboardError>
where
    S: RowStore + ?Sized,
{
    let patch = RecipePatch {
        published: Some(published),
        ..RecipePatch::default()
    };
    if !store.update_recipe(owner, id, &patch).await? {
        debug!("publish: recipe {id} not visible to this owner, skipping");
    }
    Ok(())
}

/// Lowercased, diacritic-folded, hyphen-joined slug of a title.
pub fn slugify(title: &str) -> String {
    let mut slug = String::new();
    let mut pending_gap = false;
    for c in title.to_lowercase().chars() {
        let c = fold_diacritic(c);
        if c.is_ascii_alphanumeric() {
            if pending_gap && !slug.is_empty() {
                slug.push('-');
            }
            pending_gap = false;
            slug.push(c);
        } else {
            pending_gap = true;
        }
    }
    slug
}

fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

/// First free slug for the title: the plain slug, then `-2`, `-3`, ...
async fn allocate_slug<S>(store: &S, title: &str) -> Result<String, StoreError>
where
    S: RowStore + ?Sized,
{
    let mut base = slugify(title);
    if base.is_empty() {
        base = "recipe".to_string();
    }
    if !store.slug_taken(&base).await? {
        return Ok(base);
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if !store.slug_taken(&candidate).await? {
            return Ok(candidate);
        }
        n += 1;
    }
}
