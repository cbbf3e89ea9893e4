//! Ingredient parsing and shopping list aggregation for household meal planning.
//!
//! ```
//! use kondate::{aggregate_ingredients, parse_ingredients, Recipe};
//!
//! let curry = Recipe::new("カレー", parse_ingredients("玉ねぎ…1個\n塩…少々").collect());
//! let soup = Recipe::new("スープ", parse_ingredients("・玉ねぎ：1個").collect());
//!
//! let list = aggregate_ingredients(&[curry, soup]);
//! assert_eq!(list[0].amount, Some(2.0));
//! ```

pub mod aggregator;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;

// UniFFI bindings for mobile platforms
pub mod ffi;

pub use crate::aggregator::{
    aggregate_ingredients, matches_ingredient_filter, normalize_ingredient_name,
    ShoppingListAggregator,
};
pub use crate::config::{IngredientLimits, KondateConfig, ParserConfig};
pub use crate::error::{KondateError, ValidationError};
pub use crate::model::{AggregatedIngredient, DishType, Ingredient, Recipe};
pub use crate::parser::{parse_ingredients, IngredientParser, Ingredients};

/// Parse `text` and validate every recognized ingredient against `config.limits`.
///
/// Fails with [`KondateError::NothingRecognized`] when nothing was recognized,
/// or with the first validation failure.
pub fn parse_and_validate(
    text: &str,
    config: &KondateConfig,
) -> Result<Vec<Ingredient>, KondateError> {
    let parser = IngredientParser::with_config(config.parser.clone());
    let ingredients = parser.parse_checked(text)?;
    for ingredient in &ingredients {
        ingredient.validate(&config.limits)?;
    }
    Ok(ingredients)
}
