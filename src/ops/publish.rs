//! Public recipe-page rendering.

use html_escape::{encode_double_quoted_attribute, encode_text};
use log::debug;

use crate::error::DashboardError;
use crate::model::{GroupKey, Ingredient, Instruction, ParentKind, Recipe, Tip};
use crate::store::RowStore;

/// Render the public page for a published recipe.
///
/// Returns `None` for unknown slugs and for recipes that are not published;
/// the two cases are indistinguishable to the reader.
pub async fn recipe_page<S>(store: &S, slug: &str) -> Result<Option<String>, DashboardError>
where
    S: RowStore + ?Sized,
{
    let Some(recipe) = store.find_published_by_slug(slug).await? else {
        debug!("page: no published recipe at /{slug}");
        return Ok(None);
    };

    // Child rows are keyed by the recipe's own owner; the page itself is
    // unauthenticated.
    let owner = recipe.owner_id.clone();
    let ingredients = store.list_ingredients(&owner, &recipe.id).await?;
    let instructions = store.list_instructions(&owner, &recipe.id).await?;

    let mut ingredient_sections = Vec::with_capacity(ingredients.len());
    for row in ingredients {
        let tips = store
            .list_tips(
                &owner,
                &GroupKey::Parent(ParentKind::Ingredient, row.id.clone()),
            )
            .await?;
        ingredient_sections.push((row, tips));
    }

    let mut instruction_sections = Vec::with_capacity(instructions.len());
    for row in instructions {
        let tips = store
            .list_tips(
                &owner,
                &GroupKey::Parent(ParentKind::Instruction, row.id.clone()),
            )
            .await?;
        instruction_sections.push((row, tips));
    }

    Ok(Some(render_page(
        &recipe,
        &ingredient_sections,
        &instruction_sections,
    )))
}

/// Build the page HTML from already-loaded rows.
pub fn render_page(
    recipe: &Recipe,
    ingredients: &[(Ingredient, Vec<Tip>)],
    instructions: &[(Instruction, Vec<Tip>)],
) -> String {
    let title = encode_text(&recipe.title);
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html lang=\"pt\">\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str(&format!("<title>{title}</title>\n</head>\n<body>\n"));
    page.push_str("<article class=\"recipe\">\n");
    page.push_str(&format!("<h1>{title}</h1>\n"));

    if let Some(description) = &recipe.description {
        page.push_str(&format!(
            "<p class=\"description\">{}</p>\n",
            encode_text(description)
        ));
    }
    if let Some(video_url) = &recipe.video_url {
        page.push_str(&format!(
            "<p class=\"video\"><a href=\"{}\">Assista ao vídeo</a></p>\n",
            encode_double_quoted_attribute(video_url)
        ));
    }

    page.push_str("<h2>Ingredientes</h2>\n<ul class=\"ingredients\">\n");
    for (row, tips) in ingredients {
        page.push_str(&format!("<li>{}", encode_text(&ingredient_line(row))));
        push_tips(&mut page, tips);
        page.push_str("</li>\n");
    }
    page.push_str("</ul>\n");

    page.push_str("<h2>Modo de preparo</h2>\n<ol class=\"instructions\">\n");
    for (row, tips) in instructions {
        page.push_str(&format!("<li>{}", encode_text(&row.text)));
        push_tips(&mut page, tips);
        page.push_str("</li>\n");
    }
    page.push_str("</ol>\n");

    page.push_str("</article>\n</body>\n</html>\n");
    page
}

fn push_tips(page: &mut String, tips: &[Tip]) {
    if tips.is_empty() {
        return;
    }
    page.push_str("\n<ul class=\"tips\">\n");
    for tip in tips {
        page.push_str(&format!("<li>{}</li>\n", encode_text(&tip.text)));
    }
    page.push_str("</ul>\n");
}

/// Display form of one ingredient row: "200 g farinha", "3 ovos", "sal".
fn ingredient_line(row: &Ingredient) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(3);
    if let Some(amount) = row.amount {
        parts.push(format_amount(amount));
    }
    if let Some(unit) = &row.unit {
        parts.push(unit.clone());
    }
    parts.push(row.name.clone());
    parts.join(" ")
}

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        amount.to_string()
    }
}
