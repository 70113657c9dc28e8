use crate::catalog::Catalog;
use crate::models::Intent;

const SUSTAINABILITY_KEYWORDS: &[&str] = &["sustainable", "eco", "green", "environment", "energy"];
const PROFITABILITY_KEYWORDS: &[&str] = &["profit", "rising", "trending", "growth", "gains"];
const ADVICE_KEYWORDS: &[&str] = &["invest", "buy", "recommend", "advice", "best"];
const MARKET_KEYWORDS: &[&str] = &["price", "market", "cap", "value"];
const HELP_KEYWORDS: &[&str] = &["help", "what", "how", "commands"];

pub fn normalize_text(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// First-match-wins keyword scan. Rule order is the tie-break: a query that
/// mentions both "sustainable" and "trending" is a sustainability query.
pub fn classify_intent_rules(text: &str, catalog: &Catalog) -> Intent {
    let lower = normalize_text(text).to_lowercase();

    if contains_any(&lower, SUSTAINABILITY_KEYWORDS) {
        return Intent::Sustainability;
    }

    if contains_any(&lower, PROFITABILITY_KEYWORDS) {
        return Intent::Profitability;
    }

    if mentions_catalog_entry(&lower, catalog) {
        return Intent::SpecificCrypto;
    }

    if contains_any(&lower, ADVICE_KEYWORDS) {
        return Intent::GeneralAdvice;
    }

    if contains_any(&lower, MARKET_KEYWORDS) {
        return Intent::MarketInfo;
    }

    if contains_any(&lower, HELP_KEYWORDS) {
        return Intent::Help;
    }

    Intent::Unknown
}

// Names match anywhere; tickers only as standalone words so that "method"
// does not read as ETH.
fn mentions_catalog_entry(lower: &str, catalog: &Catalog) -> bool {
    catalog.iter().any(|entry| {
        lower.contains(&entry.name.to_lowercase()) || has_word(lower, &entry.symbol)
    })
}

/// Case-insensitive match of `word` against the alphanumeric runs of `text`.
pub(crate) fn has_word(text: &str, word: &str) -> bool {
    let word = word.to_lowercase();
    let text = text.to_lowercase();
    let found = text
        .split(|ch: char| !ch.is_alphanumeric())
        .any(|candidate| !candidate.is_empty() && candidate == word);
    found
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}
