//! Leading quantity extraction for the text after an ingredient name.
//!
//! Numeric forms are tried in the order of [`QUANTITY_RULES`]; the first
//! pattern that matches decides the token. Fractions come before plain
//! numbers so that `1/2` is never read as `1` followed by a `/2` unit.

use std::borrow::Cow;

use log::trace;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Amount and unit split off the front of a quantity string
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub amount: f64,
    pub unit: Option<String>,
}

pub struct QuantityRule {
    pub name: &'static str,
    pattern: Regex,
    evaluate: fn(&Captures) -> Option<f64>,
}

impl QuantityRule {
    fn new(name: &'static str, pattern: &str, evaluate: fn(&Captures) -> Option<f64>) -> Self {
        QuantityRule {
            name,
            pattern: Regex::new(pattern).unwrap(),
            evaluate,
        }
    }
}

/// Numeric token forms in priority order.
///
/// There is no rule for a whole part written directly before a fraction:
/// `11/2` is read as eleven halves by `vulgar_fraction`, never as `1 1/2`.
pub static QUANTITY_RULES: Lazy<Vec<QuantityRule>> = Lazy::new(|| {
    vec![
        QuantityRule::new(
            "mixed_fraction",
            r"^([0-9]+)\s+([0-9]+)/([0-9]+)",
            |caps| {
                let whole = number(caps, 1)?;
                Some(whole + fraction(number(caps, 2)?, number(caps, 3)?)?)
            },
        ),
        QuantityRule::new("vulgar_fraction", r"^([0-9]+)/([0-9]+)", |caps| {
            fraction(number(caps, 1)?, number(caps, 2)?)
        }),
        QuantityRule::new("decimal", r"^[0-9]+\.[0-9]+", |caps| number(caps, 0)),
        QuantityRule::new("integer", r"^[0-9]+", |caps| number(caps, 0)),
    ]
});

fn number(caps: &Captures, group: usize) -> Option<f64> {
    caps.get(group)?.as_str().parse().ok()
}

fn fraction(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

/// Split a leading amount off `text`, leaving the rest as the unit.
///
/// Returns `None` when `text` does not start with a number, or when the
/// leading token is numeric but unusable (zero denominator, zero value).
pub fn split_quantity(text: &str) -> Option<Quantity> {
    let text = fold_leading_numerals(text);

    for rule in QUANTITY_RULES.iter() {
        let Some(caps) = rule.pattern.captures(&text) else {
            continue;
        };
        let token = caps.get(0)?;

        let amount = (rule.evaluate)(&caps).filter(|v| v.is_finite() && *v > 0.0);
        let Some(amount) = amount else {
            trace!("rejected {} token {:?}", rule.name, token.as_str());
            return None;
        };

        let unit = text[token.end()..].trim();
        return Some(Quantity {
            amount,
            unit: (!unit.is_empty()).then(|| unit.to_string()),
        });
    }

    None
}

/// Read full-width digits, full stop and solidus at the start of `text` as ASCII.
fn fold_leading_numerals(text: &str) -> Cow<'_, str> {
    let prefix_len = text
        .char_indices()
        .find(|(_, c)| !is_numeral_char(*c))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let prefix = &text[..prefix_len];

    if prefix.is_ascii() {
        return Cow::Borrowed(text);
    }

    let mut folded: String = prefix
        .chars()
        .map(|c| match c {
            '０'..='９' => char::from(b'0' + (c as u32 - '０' as u32) as u8),
            '．' => '.',
            '／' => '/',
            other => other,
        })
        .collect();
    folded.push_str(&text[prefix_len..]);
    Cow::Owned(folded)
}

fn is_numeral_char(c: char) -> bool {
    matches!(c, '0'..='9' | '.' | '/' | ' ' | '０'..='９' | '．' | '／')
}
