use std::collections::HashSet;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::models::{CatalogEntry, PriceTrend, Tier, MAX_SUSTAINABILITY_SCORE};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog must contain at least one entry")]
    Empty,

    #[error("catalog entry #{index} has an empty {field}")]
    MissingField { index: usize, field: &'static str },

    #[error("sustainability score {score} for '{name}' is outside 0..=10")]
    ScoreOutOfRange { name: String, score: u8 },

    #[error("duplicate catalog name '{0}'")]
    DuplicateName(String),

    #[error("duplicate ticker symbol '{0}'")]
    DuplicateSymbol(String),

    #[error("'{0}' is both a name and a ticker symbol of different entries")]
    AmbiguousKey(String),

    #[error("failed reading catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ordered, read-only set of tracked assets.
///
/// Construction validates every entry; after that the catalog is never
/// mutated, so it can be shared freely behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut names = HashSet::new();
        let mut symbols = HashSet::new();

        for (index, entry) in entries.iter().enumerate() {
            for (field, value) in [
                ("name", &entry.name),
                ("symbol", &entry.symbol),
                ("current_price", &entry.current_price),
                ("description", &entry.description),
            ] {
                if value.trim().is_empty() {
                    return Err(CatalogError::MissingField { index, field });
                }
            }

            if entry.sustainability_score > MAX_SUSTAINABILITY_SCORE {
                return Err(CatalogError::ScoreOutOfRange {
                    name: entry.name.clone(),
                    score: entry.sustainability_score,
                });
            }

            // Names and tickers share one lookup space; an entry may only
            // collide with itself.
            let name = entry.name.to_lowercase();
            let symbol = entry.symbol.to_lowercase();

            if !names.insert(name.clone()) {
                return Err(CatalogError::DuplicateName(entry.name.clone()));
            }
            if symbols.contains(&name) {
                return Err(CatalogError::AmbiguousKey(entry.name.clone()));
            }
            if !symbols.insert(symbol.clone()) {
                return Err(CatalogError::DuplicateSymbol(entry.symbol.clone()));
            }
            if symbol != name && names.contains(&symbol) {
                return Err(CatalogError::AmbiguousKey(entry.symbol.clone()));
            }
        }

        Ok(Self { entries })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(raw)?;
        Self::new(entries)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// The five-asset catalog the assistant ships with.
    pub fn reference() -> Self {
        Self {
            entries: vec![
                entry(
                    "Bitcoin",
                    "BTC",
                    PriceTrend::Rising,
                    Tier::High,
                    Tier::High,
                    3,
                    "$45,000",
                    "The original cryptocurrency with massive adoption",
                ),
                entry(
                    "Ethereum",
                    "ETH",
                    PriceTrend::Stable,
                    Tier::High,
                    Tier::Medium,
                    6,
                    "$2,800",
                    "Smart contract platform with DeFi ecosystem",
                ),
                entry(
                    "Cardano",
                    "ADA",
                    PriceTrend::Rising,
                    Tier::Medium,
                    Tier::Low,
                    8,
                    "$0.45",
                    "Proof-of-stake blockchain focused on sustainability",
                ),
                entry(
                    "Solana",
                    "SOL",
                    PriceTrend::Rising,
                    Tier::Medium,
                    Tier::Low,
                    7,
                    "$95",
                    "High-speed blockchain for DApps and DeFi",
                ),
                entry(
                    "Polkadot",
                    "DOT",
                    PriceTrend::Stable,
                    Tier::Medium,
                    Tier::Low,
                    8,
                    "$7.50",
                    "Multi-chain protocol enabling interoperability",
                ),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Case-insensitive lookup by display name or ticker symbol.
    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.matches_key(key))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_str()).collect()
    }
}

#[allow(clippy::too_many_arguments)]
fn entry(
    name: &str,
    symbol: &str,
    price_trend: PriceTrend,
    market_cap: Tier,
    energy_use: Tier,
    sustainability_score: u8,
    current_price: &str,
    description: &str,
) -> CatalogEntry {
    CatalogEntry {
        name: name.to_string(),
        symbol: symbol.to_string(),
        price_trend,
        market_cap,
        energy_use,
        sustainability_score,
        current_price: current_price.to_string(),
        description: description.to_string(),
    }
}
