use std::env;
use std::fs;
use std::io::{self, Read};

use cookdesk::{parse_lines, AppConfig, Dashboard};

/// Quick-add dry run and import tool: parses a pasted ingredient block and
/// either prints the structured rows or pushes them into a recipe.
///
/// Usage: cookdesk [FILE] [--import RECIPE_ID]
///
/// Reads from stdin when no file is given. `--import` needs backend settings
/// in config.toml or COOKDESK__ environment variables.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let mut file = None;
    let mut import_target = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--import" {
            let id = iter.next().ok_or("--import requires a recipe id")?;
            import_target = Some(id.clone());
        } else {
            file = Some(arg.clone());
        }
    }

    let text = match file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    match import_target {
        Some(recipe_id) => {
            let config = AppConfig::load()?;
            let dashboard = Dashboard::from_config(&config)?;
            let rows = dashboard.import_ingredients(&recipe_id, &text).await?;
            println!("Imported {} ingredient rows into {recipe_id}", rows.len());
        }
        None => {
            for line in parse_lines(&text) {
                let amount = line
                    .amount
                    .map(|a| a.to_string())
                    .unwrap_or_else(|| "-".to_string());
                let unit = line.unit.unwrap_or_else(|| "-".to_string());
                println!("{amount}\t{unit}\t{}", line.name);
            }
        }
    }

    Ok(())
}
