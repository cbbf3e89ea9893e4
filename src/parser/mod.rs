//! Free-text ingredient parsing.
//!
//! Each line of pasted recipe text is read as `name <separator> quantity`,
//! for example `生米…1合` or `・玉ねぎ：1/2個（みじん切り）`. The grammar is
//! heuristic: lines without a recognizable name are dropped, never reported.

mod quantity;

pub use self::quantity::{split_quantity, Quantity, QuantityRule, QUANTITY_RULES};

use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParserConfig;
use crate::error::KondateError;
use crate::model::Ingredient;

/// Words meaning "to taste", "as much as you like", "a little" and the like.
/// A quantity containing any of them is kept verbatim as a note.
pub const QUALITATIVE_KEYWORDS: &[&str] =
    &["適量", "お好み", "たっぷり", "好きなだけ", "適宜", "少々"];

/// Glyphs separating the ingredient name from its quantity
pub const NAME_SEPARATORS: &[char] = &['…', '‥', '⋯', '︙', ':', '：'];

const LINE_BREAKS: &[char] = &['\r', '\n'];

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static BULLET_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[・\-*•●○\s　]+").unwrap());
static PARENTHETICAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"（[^）]+）|\([^)]*\)").unwrap());

static DEFAULT_PARSER: Lazy<IngredientParser> = Lazy::new(IngredientParser::new);

/// Parse `text` with the default configuration.
pub fn parse_ingredients(text: &str) -> Ingredients<'_> {
    DEFAULT_PARSER.parse(text)
}

#[derive(Debug, Clone, Default)]
pub struct IngredientParser {
    config: ParserConfig,
}

impl IngredientParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        IngredientParser { config }
    }

    /// Lazily parse every line of `text`, skipping blank and unparseable lines.
    pub fn parse<'a>(&'a self, text: &'a str) -> Ingredients<'a> {
        Ingredients {
            parser: self,
            lines: text.split(LINE_BREAKS),
        }
    }

    /// Like [`parse`](Self::parse), but an empty result is an error.
    pub fn parse_checked(&self, text: &str) -> Result<Vec<Ingredient>, KondateError> {
        let ingredients: Vec<Ingredient> = self.parse(text).collect();
        if ingredients.is_empty() {
            return Err(KondateError::NothingRecognized);
        }
        debug!("recognized {} ingredients", ingredients.len());
        Ok(ingredients)
    }

    /// Parse a single line. `None` for blank lines and lines without a name.
    pub fn parse_line(&self, line: &str) -> Option<Ingredient> {
        let line = sanitize_line(line);
        if line.is_empty() {
            return None;
        }

        let (line, mut notes) = extract_parenthetical_notes(&line);

        let (name, rest) = match line.find(NAME_SEPARATORS) {
            Some(idx) => {
                let (name, rest) = line.split_at(idx);
                (name.trim(), Some(rest.trim_start_matches(NAME_SEPARATORS).trim()))
            }
            None => (line.trim(), None),
        };

        if name.is_empty() {
            debug!("dropping line without ingredient name: {:?}", line);
            return None;
        }

        let mut amount = None;
        let mut unit = None;

        if let Some(rest) = rest.filter(|r| !r.is_empty()) {
            if self.is_qualitative(rest) {
                notes.push(rest.to_string());
            } else {
                let (rest, rest_notes) = extract_parenthetical_notes(rest);
                notes.extend(rest_notes);

                match split_quantity(&rest) {
                    Some(quantity) => {
                        amount = Some(quantity.amount);
                        unit = quantity.unit;
                    }
                    None if !rest.is_empty() => notes.push(rest),
                    None => {}
                }
            }
        }

        let ingredient = Ingredient {
            name: name.to_string(),
            amount,
            unit,
            note: (!notes.is_empty()).then(|| notes.join(self.config.note_separator.as_str())),
        };
        trace!("parsed {:?}", ingredient);
        Some(ingredient)
    }

    fn is_qualitative(&self, text: &str) -> bool {
        QUALITATIVE_KEYWORDS
            .iter()
            .copied()
            .chain(self.config.extra_keywords.iter().map(String::as_str))
            .filter(|k| !k.is_empty())
            .any(|k| text.contains(k))
    }
}

/// Iterator over the ingredients recognized in a block of text
pub struct Ingredients<'a> {
    parser: &'a IngredientParser,
    lines: std::str::Split<'a, &'static [char]>,
}

impl Iterator for Ingredients<'_> {
    type Item = Ingredient;

    fn next(&mut self) -> Option<Ingredient> {
        for line in self.lines.by_ref() {
            if let Some(ingredient) = self.parser.parse_line(line) {
                return Some(ingredient);
            }
        }
        None
    }
}

/// Collapse whitespace runs and strip leading bullet glyphs.
fn sanitize_line(line: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(line, " ");
    BULLET_PREFIX.replace(&collapsed, "").trim().to_string()
}

/// Remove every parenthesized aside from `text`, returning the rest and the asides.
fn extract_parenthetical_notes(text: &str) -> (String, Vec<String>) {
    let notes = PARENTHETICAL
        .find_iter(text)
        .filter_map(|m| {
            let mut inner = m.as_str().chars();
            inner.next();
            inner.next_back();
            let note = inner.as_str().trim();
            (!note.is_empty()).then(|| note.to_string())
        })
        .collect();
    let cleaned = PARENTHETICAL.replace_all(text, "").trim().to_string();
    (cleaned, notes)
}
