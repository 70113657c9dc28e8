use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Sustainability,
    Profitability,
    SpecificCrypto,
    GeneralAdvice,
    MarketInfo,
    Help,
    Unknown,
}

impl Intent {
    pub const ALL: [Intent; 7] = [
        Self::Sustainability,
        Self::Profitability,
        Self::SpecificCrypto,
        Self::GeneralAdvice,
        Self::MarketInfo,
        Self::Help,
        Self::Unknown,
    ];

    pub fn as_code(self) -> &'static str {
        match self {
            Self::Sustainability => "sustainability",
            Self::Profitability => "profitability",
            Self::SpecificCrypto => "specific_crypto",
            Self::GeneralAdvice => "general_advice",
            Self::MarketInfo => "market_info",
            Self::Help => "help",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTrend {
    Rising,
    Stable,
    Falling,
}

impl PriceTrend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rising => "rising",
            Self::Stable => "stable",
            Self::Falling => "falling",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Rising => "Rising",
            Self::Stable => "Stable",
            Self::Falling => "Falling",
        }
    }
}

/// Coarse low/medium/high bucket shared by market cap and energy use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

pub const MAX_SUSTAINABILITY_SCORE: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub symbol: String,
    pub price_trend: PriceTrend,
    pub market_cap: Tier,
    pub energy_use: Tier,
    pub sustainability_score: u8,
    pub current_price: String,
    pub description: String,
}

impl CatalogEntry {
    pub fn is_rising(&self) -> bool {
        self.price_trend == PriceTrend::Rising
    }

    pub fn is_high_cap(&self) -> bool {
        self.market_cap == Tier::High
    }

    pub fn matches_key(&self, key: &str) -> bool {
        let key = key.trim().to_lowercase();
        self.name.to_lowercase() == key || self.symbol.to_lowercase() == key
    }
}
