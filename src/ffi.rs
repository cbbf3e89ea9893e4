//! UniFFI bindings for kondate
//!
//! FFI-compatible records and synchronous entry points for iOS and Android.
//! Without the `uniffi` feature these are plain Rust types and functions.

use std::fmt;

use crate::{
    aggregate_ingredients, normalize_ingredient_name, AggregatedIngredient, Ingredient,
    IngredientParser, KondateError, ParserConfig, Recipe,
};

#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible ingredient
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiIngredient {
    pub name: String,
    pub amount: Option<f64>,
    pub unit: Option<String>,
    pub note: Option<String>,
}

impl From<Ingredient> for FfiIngredient {
    fn from(ingredient: Ingredient) -> Self {
        FfiIngredient {
            name: ingredient.name,
            amount: ingredient.amount,
            unit: ingredient.unit,
            note: ingredient.note,
        }
    }
}

impl From<FfiIngredient> for Ingredient {
    fn from(ffi: FfiIngredient) -> Self {
        Ingredient {
            name: ffi.name,
            amount: ffi.amount,
            unit: ffi.unit,
            note: ffi.note,
        }
    }
}

/// FFI-compatible recipe: a name and its ingredients
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipe {
    pub name: String,
    pub ingredients: Vec<FfiIngredient>,
}

impl From<FfiRecipe> for Recipe {
    fn from(ffi: FfiRecipe) -> Self {
        Recipe::new(
            ffi.name,
            ffi.ingredients.into_iter().map(Ingredient::from).collect(),
        )
    }
}

/// FFI-compatible shopping list line
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiShoppingItem {
    pub name: String,
    pub normalized_name: String,
    pub amount: Option<f64>,
    pub unit: Option<String>,
    pub recipe_names: Vec<String>,
    pub has_unspecified_amount: bool,
}

impl From<AggregatedIngredient> for FfiShoppingItem {
    fn from(item: AggregatedIngredient) -> Self {
        FfiShoppingItem {
            name: item.name,
            normalized_name: item.normalized_name,
            amount: item.amount,
            unit: item.unit,
            recipe_names: item.recipe_names,
            has_unspecified_amount: item.has_unspecified_amount,
        }
    }
}

/// Optional parser settings
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiParseConfig {
    pub note_separator: Option<String>,
    pub extra_keywords: Vec<String>,
}

impl From<FfiParseConfig> for ParserConfig {
    fn from(ffi: FfiParseConfig) -> Self {
        let mut config = ParserConfig {
            extra_keywords: ffi.extra_keywords,
            ..ParserConfig::default()
        };
        if let Some(separator) = ffi.note_separator {
            config.note_separator = separator;
        }
        config
    }
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiKondateError {
    NothingRecognized { message: String },
    InvalidInput { message: String },
}

impl fmt::Display for FfiKondateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiKondateError::NothingRecognized { message } => {
                write!(f, "Nothing recognized: {}", message)
            }
            FfiKondateError::InvalidInput { message } => write!(f, "Invalid input: {}", message),
        }
    }
}

impl std::error::Error for FfiKondateError {}

impl From<KondateError> for FfiKondateError {
    fn from(err: KondateError) -> Self {
        match err {
            err @ KondateError::NothingRecognized => FfiKondateError::NothingRecognized {
                message: err.to_string(),
            },
            other => FfiKondateError::InvalidInput {
                message: other.to_string(),
            },
        }
    }
}

/// Parse pasted ingredient text; an error when nothing is recognized.
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn parse_ingredient_text(
    text: String,
    config: Option<FfiParseConfig>,
) -> Result<Vec<FfiIngredient>, FfiKondateError> {
    let parser = IngredientParser::with_config(config.unwrap_or_default().into());
    let ingredients = parser.parse_checked(&text)?;
    Ok(ingredients.into_iter().map(FfiIngredient::from).collect())
}

/// Merge the ingredients of `recipes` into one shopping list.
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn aggregate_shopping_list(recipes: Vec<FfiRecipe>) -> Vec<FfiShoppingItem> {
    let recipes: Vec<Recipe> = recipes.into_iter().map(Recipe::from).collect();
    aggregate_ingredients(&recipes)
        .into_iter()
        .map(FfiShoppingItem::from)
        .collect()
}

/// Matching key used to merge ingredient names.
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn normalize_name(name: String) -> String {
    normalize_ingredient_name(&name)
}
