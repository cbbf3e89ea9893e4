use std::env;
use std::fs;
use std::io::{self, Read, Write};

use log::{debug, error};

use kondate::{
    aggregate_ingredients, Ingredient, IngredientLimits, IngredientParser, KondateConfig,
    KondateError, Recipe,
};

const USAGE: &str = "Usage: kondate <parse|aggregate|check> [FILE]

  parse       Parse ingredient lines and print them as JSON
  aggregate   Read a JSON array of recipes and print the shopping list as JSON
  check       Parse ingredient lines and validate each one

Reads from stdin when FILE is omitted.";

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), KondateError> {
    let args: Vec<String> = env::args().collect();
    let command = args
        .get(1)
        .filter(|c| matches!(c.as_str(), "parse" | "aggregate" | "check"))
        .ok_or_else(|| KondateError::Usage(USAGE.to_string()))?;
    let input = read_input(args.get(2).map(String::as_str))?;

    let config = KondateConfig::load()?;
    debug!("loaded configuration: {:?}", config);

    match command.as_str() {
        "parse" => {
            let parser = IngredientParser::with_config(config.parser);
            let ingredients = parser.parse_checked(&input)?;
            println!("{}", serde_json::to_string_pretty(&ingredients)?);
        }
        "aggregate" => {
            let recipes: Vec<Recipe> = serde_json::from_str(&input)?;
            let shopping_list = aggregate_ingredients(&recipes);
            println!("{}", serde_json::to_string_pretty(&shopping_list)?);
        }
        "check" => {
            let parser = IngredientParser::with_config(config.parser);
            let ingredients = parser.parse_checked(&input)?;
            check_ingredients(&ingredients, &config.limits, &mut io::stdout().lock())?;
        }
        _ => return Err(KondateError::Usage(USAGE.to_string())),
    }

    Ok(())
}

/// Print one verdict line per ingredient; an error when any of them is invalid.
fn check_ingredients(
    ingredients: &[Ingredient],
    limits: &IngredientLimits,
    out: &mut impl Write,
) -> Result<(), KondateError> {
    let mut failed = 0;
    for ingredient in ingredients {
        match ingredient.validate(limits) {
            Ok(()) => writeln!(out, "ok      {}", ingredient.display_line())?,
            Err(e) => {
                failed += 1;
                writeln!(out, "invalid {}: {}", ingredient.display_line(), e)?;
            }
        }
    }
    writeln!(out, "{} ingredients, {} invalid", ingredients.len(), failed)?;

    if failed > 0 {
        return Err(KondateError::ValidationFailed {
            failed,
            total: ingredients.len(),
        });
    }
    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String, KondateError> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}
