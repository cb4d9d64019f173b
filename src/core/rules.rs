//! Category rules written as plain words and phrases.
//!
//! A rules file maps categories to subcategories to lists of terms:
//!
//! ```json
//! { "Food": { "Coffee": ["starbucks", "blue bottle"], "Groceries": ["trader joe's"] } }
//! ```
//!
//! Each term is compiled into a [`LoosePattern`] that ignores case and treats
//! spaces, dashes and punctuation between words as interchangeable, so
//! `"trader joe's"` matches `TRADER JOE S #123`. Declaration order in the file
//! is kept and decides ties.

use crate::domain::model::Categorization;
use crate::domain::ports::Storage;
use crate::utils::error::{CategorizeError, Result};
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use std::ops::Range;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\w]+").expect("NON_WORD regex is valid");
}

#[derive(Debug, Clone)]
pub struct LoosePattern {
    term: String,
    regex: Regex,
    /// Reject hits glued to a neighbouring ASCII letter or digit.
    guarded: bool,
}

impl LoosePattern {
    pub fn new(term: &str) -> Result<Self> {
        let term = term.trim();
        let tokens: Vec<&str> = NON_WORD.split(term).filter(|t| !t.is_empty()).collect();

        let (body, guarded) = if tokens.is_empty() {
            (regex::escape(term), false)
        } else {
            let escaped: Vec<String> = tokens.iter().map(|t| regex::escape(t)).collect();
            (escaped.join(r"\W*"), true)
        };

        let regex = RegexBuilder::new(&body).case_insensitive(true).build()?;

        Ok(Self {
            term: term.to_string(),
            regex,
            guarded,
        })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Byte range of the leftmost acceptable hit in `haystack`.
    pub fn find(&self, haystack: &str) -> Option<Range<usize>> {
        let mut from = 0;
        while from <= haystack.len() {
            let hit = self.regex.find_at(haystack, from)?;
            if !self.guarded || boundaries_clear(haystack, hit.start(), hit.end()) {
                return Some(hit.range());
            }
            from = hit.start()
                + haystack[hit.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
        }
        None
    }

    /// Length of the leftmost acceptable hit, in characters.
    pub fn match_len(&self, haystack: &str) -> Option<usize> {
        self.find(haystack)
            .map(|range| haystack[range].chars().count())
    }
}

fn boundaries_clear(haystack: &str, start: usize, end: usize) -> bool {
    let before = haystack[..start].chars().next_back();
    let after = haystack[end..].chars().next();
    !before.is_some_and(|c| c.is_ascii_alphanumeric())
        && !after.is_some_and(|c| c.is_ascii_alphanumeric())
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub category: String,
    pub subcategory: String,
    pub patterns: Vec<LoosePattern>,
}

#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        let raw: Value = serde_json::from_slice(bytes)?;
        Self::from_value(raw)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::from_json_bytes(content.as_bytes())
    }

    pub async fn load<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        tracing::debug!("Loading rules from {}", path);
        let bytes = storage.read_file(path).await?;
        let rules = Self::from_json_bytes(&bytes)?;
        tracing::info!(
            "📚 Loaded {} rules across {} categories from {}",
            rules.len(),
            rules.categories().len(),
            path
        );
        Ok(rules)
    }

    fn from_value(raw: Value) -> Result<Self> {
        let Value::Object(categories) = raw else {
            return Err(rules_error("<root>", "expected an object of categories"));
        };

        let mut rules = Vec::new();
        for (category, subs) in categories {
            let Value::Object(subs) = subs else {
                return Err(rules_error(&category, "expected an object of subcategories"));
            };

            for (subcategory, terms) in subs {
                let location = format!("{}.{}", category, subcategory);
                let Value::Array(terms) = terms else {
                    return Err(rules_error(&location, "expected an array of terms"));
                };

                let mut patterns = Vec::with_capacity(terms.len());
                for (index, term) in terms.iter().enumerate() {
                    let Value::String(term) = term else {
                        return Err(rules_error(
                            &format!("{}[{}]", location, index),
                            "terms must be strings",
                        ));
                    };
                    if term.trim().is_empty() {
                        tracing::warn!("Skipping empty term at {}[{}]", location, index);
                        continue;
                    }
                    patterns.push(LoosePattern::new(term)?);
                }

                rules.push(Rule {
                    category: category.clone(),
                    subcategory,
                    patterns,
                });
            }
        }

        Ok(Self { rules })
    }

    /// Category of the most specific hit, i.e. the longest matched span.
    ///
    /// Earlier rules win ties. Descriptions nothing matches are
    /// `Uncategorized / Other`.
    pub fn best_match(&self, description: &str) -> Categorization {
        let mut best: Option<(usize, &Rule)> = None;

        for rule in &self.rules {
            for pattern in &rule.patterns {
                if let Some(len) = pattern.match_len(description) {
                    if best.map_or(true, |(best_len, _)| len > best_len) {
                        best = Some((len, rule));
                    }
                }
            }
        }

        match best {
            Some((_, rule)) => Categorization {
                category: rule.category.clone(),
                subcategory: rule.subcategory.clone(),
            },
            None => Categorization::default(),
        }
    }

    /// Top-level categories in declaration order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if !seen.contains(&rule.category.as_str()) {
                seen.push(&rule.category);
            }
        }
        seen
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of (category, subcategory) rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn rules_error(location: &str, message: &str) -> CategorizeError {
    CategorizeError::RulesError {
        location: location.to_string(),
        message: message.to_string(),
    }
}
