//! Shopping list aggregation.
//!
//! Ingredients from several recipes are grouped by normalized name *and*
//! unit, so `2 個` and `200 g` of the same ingredient stay on separate lines.
//! Groups keep first-seen order, and the display name and unit come from the
//! first contribution.

use std::collections::HashMap;

use log::{debug, trace};
use unicode_normalization::UnicodeNormalization;

use crate::model::{AggregatedIngredient, Ingredient, Recipe};

/// Matching key for an ingredient name: NFKC, no whitespace, lowercase.
///
/// Purely textual. Synonyms and different scripts for the same word never match.
pub fn normalize_ingredient_name(name: &str) -> String {
    name.nfkc()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// True when either normalized name contains the other, e.g. filter `ねぎ` and `玉ねぎ`.
pub fn matches_ingredient_filter(name: &str, filter: &str) -> bool {
    let filter = normalize_ingredient_name(filter);
    if filter.is_empty() {
        return false;
    }
    let name = normalize_ingredient_name(name);
    name.contains(&filter) || filter.contains(&name)
}

/// Aggregate the ingredients of `recipes` into one shopping list.
pub fn aggregate_ingredients(recipes: &[Recipe]) -> Vec<AggregatedIngredient> {
    let mut aggregator = ShoppingListAggregator::new();
    for recipe in recipes {
        aggregator.add_recipe(recipe);
    }
    aggregator.finish()
}

type GroupKey = (String, Option<String>);

#[derive(Debug)]
struct Group {
    item: AggregatedIngredient,
    /// Every numeric contribution, summed in `finish` in ascending order
    amounts: Vec<f64>,
}

/// Accumulates ingredients across recipes for a single aggregation pass.
#[derive(Debug, Default)]
pub struct ShoppingListAggregator {
    index: HashMap<GroupKey, usize>,
    groups: Vec<Group>,
}

impl ShoppingListAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_recipe(&mut self, recipe: &Recipe) {
        trace!(
            "adding {} ingredients from {:?}",
            recipe.ingredients.len(),
            recipe.name
        );
        for ingredient in &recipe.ingredients {
            self.add_ingredient(&recipe.name, ingredient);
        }
    }

    /// Merge one ingredient contributed by `recipe_name` (empty for none).
    pub fn add_ingredient(&mut self, recipe_name: &str, ingredient: &Ingredient) {
        let normalized_name = normalize_ingredient_name(&ingredient.name);
        // A blank unit is the same as no unit
        let unit = ingredient
            .unit
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .map(str::to_string);
        let key = (normalized_name, unit);

        let existing = self.index.get(&key).copied();
        let group = match existing {
            Some(idx) => &mut self.groups[idx],
            None => {
                let (normalized_name, unit) = key.clone();
                self.index.insert(key, self.groups.len());
                self.groups.push(Group {
                    item: AggregatedIngredient {
                        name: ingredient.name.clone(),
                        normalized_name,
                        amount: None,
                        unit,
                        recipe_names: Vec::new(),
                        has_unspecified_amount: false,
                    },
                    amounts: Vec::new(),
                });
                let last = self.groups.len() - 1;
                &mut self.groups[last]
            }
        };

        match ingredient.amount {
            Some(amount) => group.amounts.push(amount),
            None => group.item.has_unspecified_amount = true,
        }

        let names = &mut group.item.recipe_names;
        if !recipe_name.is_empty() && !names.iter().any(|n| n == recipe_name) {
            names.push(recipe_name.to_string());
        }
    }

    /// Number of distinct shopping list lines so far
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn finish(self) -> Vec<AggregatedIngredient> {
        debug!("aggregated into {} shopping list items", self.groups.len());
        self.groups
            .into_iter()
            .map(|mut group| {
                group.item.amount = sum_amounts(&mut group.amounts);
                group.item
            })
            .collect()
    }
}

/// Total of `amounts`, independent of the order they were contributed in.
fn sum_amounts(amounts: &mut [f64]) -> Option<f64> {
    if amounts.is_empty() {
        return None;
    }
    amounts.sort_by(f64::total_cmp);
    Some(amounts.iter().sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn onion() -> Ingredient {
        Ingredient::new("玉ねぎ").with_amount(1.0).with_unit("個")
    }

    #[test]
    fn test_normalize_ingredient_name() {
        assert_eq!(normalize_ingredient_name("ﾀﾏﾈｷﾞ"), "タマネギ");
        assert_eq!(normalize_ingredient_name("ＢＡＣＯＮ"), "bacon");
        assert_eq!(normalize_ingredient_name(" 鶏 もも　肉 "), "鶏もも肉");
        assert_eq!(normalize_ingredient_name("Olive Oil"), "oliveoil");
    }

    #[test]
    fn test_synonyms_do_not_match() {
        assert_ne!(
            normalize_ingredient_name("じゃがいも"),
            normalize_ingredient_name("ポテト")
        );
    }

    #[test]
    fn test_same_ingredient_sums() {
        let recipes = vec![
            Recipe::new("カレー", vec![onion()]),
            Recipe::new("肉じゃが", vec![onion()]),
        ];
        let list = aggregate_ingredients(&recipes);

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].amount, Some(2.0));
        assert_eq!(list[0].unit.as_deref(), Some("個"));
        assert_eq!(list[0].recipe_names, vec!["カレー", "肉じゃが"]);
        assert!(!list[0].has_unspecified_amount);
    }

    #[test]
    fn test_different_units_stay_separate() {
        let recipes = vec![
            Recipe::new("A", vec![Ingredient::new("塩")]),
            Recipe::new("B", vec![Ingredient::new("塩").with_amount(5.0).with_unit("g")]),
        ];
        let list = aggregate_ingredients(&recipes);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].amount, None);
        assert_eq!(list[0].unit, None);
        assert_eq!(list[1].amount, Some(5.0));
        assert_eq!(list[1].unit.as_deref(), Some("g"));
    }

    #[test]
    fn test_null_amount_adopts_later_amount() {
        let recipes = vec![
            Recipe::new("A", vec![Ingredient::new("卵")]),
            Recipe::new("B", vec![Ingredient::new("卵").with_amount(2.0)]),
            Recipe::new("C", vec![Ingredient::new("卵").with_amount(1.0)]),
            Recipe::new("D", vec![Ingredient::new("卵")]),
        ];
        let list = aggregate_ingredients(&recipes);

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].amount, Some(3.0));
        assert_eq!(list[0].recipe_names, vec!["A", "B", "C", "D"]);
        assert!(list[0].has_unspecified_amount);
    }

    #[test]
    fn test_all_unspecified_stays_none() {
        let recipes = vec![
            Recipe::new("A", vec![Ingredient::new("こしょう").with_note("適量")]),
            Recipe::new("B", vec![Ingredient::new("こしょう")]),
        ];
        let list = aggregate_ingredients(&recipes);

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].amount, None);
        assert!(list[0].has_unspecified_amount);
    }

    #[test]
    fn test_first_seen_name_and_order() {
        let recipes = vec![
            Recipe::new(
                "A",
                vec![
                    Ingredient::new("ＢＡＣＯＮ").with_amount(2.0).with_unit("枚"),
                    Ingredient::new("卵").with_amount(1.0),
                ],
            ),
            Recipe::new(
                "B",
                vec![
                    Ingredient::new("にんじん").with_amount(1.0).with_unit("本"),
                    Ingredient::new("bacon").with_amount(3.0).with_unit("枚"),
                ],
            ),
        ];
        let list = aggregate_ingredients(&recipes);

        let names: Vec<&str> = list.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["ＢＡＣＯＮ", "卵", "にんじん"]);
        assert_eq!(list[0].normalized_name, "bacon");
        assert_eq!(list[0].amount, Some(5.0));
    }

    #[test]
    fn test_recipe_names_deduplicated_and_empty_skipped() {
        let recipes = vec![
            Recipe::new("サラダ", vec![onion(), onion()]),
            Recipe::new("", vec![onion()]),
        ];
        let list = aggregate_ingredients(&recipes);

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].amount, Some(3.0));
        assert_eq!(list[0].recipe_names, vec!["サラダ"]);
    }

    #[test]
    fn test_unit_is_compared_verbatim() {
        let recipes = vec![Recipe::new(
            "A",
            vec![
                Ingredient::new("牛乳").with_amount(100.0).with_unit("ml"),
                Ingredient::new("牛乳").with_amount(100.0).with_unit("mL"),
            ],
        )];
        assert_eq!(aggregate_ingredients(&recipes).len(), 2);
    }

    #[test]
    fn test_total_does_not_depend_on_recipe_order() {
        let recipes: Vec<Recipe> = [("A", 0.1), ("B", 0.2), ("C", 0.3)]
            .into_iter()
            .map(|(name, amount)| {
                let vinegar = Ingredient::new("酢").with_amount(amount).with_unit("カップ");
                Recipe::new(name, vec![vinegar])
            })
            .collect();
        let mut reversed = recipes.clone();
        reversed.reverse();

        let forward = aggregate_ingredients(&recipes);
        let backward = aggregate_ingredients(&reversed);
        assert_eq!(forward[0].amount, backward[0].amount);
        assert!((forward[0].amount.unwrap() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_blank_unit_groups_with_missing_unit() {
        let recipes = vec![
            Recipe::new("A", vec![Ingredient::new("卵").with_amount(2.0)]),
            Recipe::new("B", vec![Ingredient::new("卵").with_amount(1.0).with_unit("")]),
            Recipe::new("C", vec![Ingredient::new("卵").with_amount(1.0).with_unit("  ")]),
        ];
        let list = aggregate_ingredients(&recipes);

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].amount, Some(4.0));
        assert_eq!(list[0].unit, None);
        assert_eq!(list[0].recipe_names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_blank_unit_first_is_stored_as_none() {
        let recipes = vec![
            Recipe::new("A", vec![Ingredient::new("卵").with_amount(1.0).with_unit("")]),
            Recipe::new("B", vec![Ingredient::new("卵").with_amount(2.0)]),
        ];
        let list = aggregate_ingredients(&recipes);

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].unit, None);
        assert_eq!(list[0].amount, Some(3.0));
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_ingredients(&[]).is_empty());
        assert!(ShoppingListAggregator::new().is_empty());
    }

    #[test]
    fn test_incremental_aggregator() {
        let mut aggregator = ShoppingListAggregator::new();
        aggregator.add_ingredient("A", &onion());
        aggregator.add_ingredient("B", &onion());
        aggregator.add_ingredient("B", &Ingredient::new("塩"));
        assert_eq!(aggregator.len(), 2);

        let list = aggregator.finish();
        assert_eq!(list[0].recipe_names, vec!["A", "B"]);
    }

    #[test]
    fn test_matches_ingredient_filter() {
        assert!(matches_ingredient_filter("玉ねぎ", "ねぎ"));
        assert!(matches_ingredient_filter("ねぎ", "長ねぎ"));
        assert!(!matches_ingredient_filter("豚バラ肉", "ﾌﾞﾀ"));
        assert!(matches_ingredient_filter("Chicken Thigh", "chicken"));
        assert!(!matches_ingredient_filter("卵", "  "));
    }
}
