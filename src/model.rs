use serde::{Deserialize, Serialize};

use crate::config::IngredientLimits;
use crate::error::ValidationError;

/// A structured ingredient, as produced by the parser and consumed by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,
    /// Positive amount; `None` means unspecified ("to taste")
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>) -> Self {
        Ingredient {
            name: name.into(),
            amount: None,
            unit: None,
            note: None,
        }
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// The amount as the text numeral a form field would carry (`1`, `0.5`).
    pub fn format_amount(&self) -> Option<String> {
        self.amount.map(format_number)
    }

    /// One-line human readable rendering: `name amount unit (note)`.
    pub fn display_line(&self) -> String {
        let mut parts = vec![self.name.clone()];

        if let Some(amount) = self.format_amount() {
            parts.push(amount);
        }

        if let Some(unit) = self.unit.as_deref().filter(|u| !u.is_empty()) {
            parts.push(unit.to_string());
        }

        if let Some(note) = self.note.as_deref().filter(|n| !n.is_empty()) {
            parts.push(format!("({})", note));
        }

        parts.join(" ").trim().to_string()
    }

    /// Check the record against the recipe ingredient schema.
    pub fn validate(&self, limits: &IngredientLimits) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        if let Some(amount) = self.amount {
            if !amount.is_finite() || amount <= 0.0 {
                return Err(ValidationError::NonPositiveAmount(amount));
            }
        }

        if let Some(unit) = &self.unit {
            let len = unit.chars().count();
            if len > limits.max_unit_chars {
                return Err(ValidationError::UnitTooLong {
                    len,
                    max: limits.max_unit_chars,
                });
            }
        }

        if let Some(note) = &self.note {
            let len = note.chars().count();
            if len > limits.max_note_chars {
                return Err(ValidationError::NoteTooLong {
                    len,
                    max: limits.max_note_chars,
                });
            }
        }

        Ok(())
    }
}

/// Menu slot a recipe is planned for. Carried through, never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DishType {
    Main,
    Side,
}

/// A recipe as seen by the aggregator: its name and ingredient list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dish_type: Option<DishType>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    pub fn new(name: impl Into<String>, ingredients: Vec<Ingredient>) -> Self {
        Recipe {
            name: name.into(),
            dish_type: None,
            ingredients,
        }
    }
}

/// One shopping list line merged from every matching ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedIngredient {
    /// Display name, taken from the first contribution
    pub name: String,
    /// Matching key, never shown to users
    pub normalized_name: String,
    pub amount: Option<f64>,
    pub unit: Option<String>,
    /// Distinct contributing recipe names in first-seen order
    pub recipe_names: Vec<String>,
    /// At least one contribution had no amount, so `amount` may understate the need
    #[serde(default)]
    pub has_unspecified_amount: bool,
}

/// Shortest numeral that round-trips, without a trailing `.0` for whole numbers.
pub(crate) fn format_number(value: f64) -> String {
    format!("{}", value)
}
