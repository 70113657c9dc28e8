use chrono::{Local, NaiveDateTime};

use crate::catalog::Catalog;
use crate::chooser::{choose, Chooser};
use crate::intent::{classify_intent_rules, has_word};
use crate::models::{CatalogEntry, Intent};

pub const EMPTY_QUERY_REPLY: &str =
    "🤔 I didn't catch that. Try asking me about crypto trends, sustainability, or specific coins!";

pub const NO_RISING_REPLY: &str =
    "📈 Currently, no cryptos in my database show strong rising trends. Market conditions change rapidly!";

pub const ADVICE_FALLBACK_REPLY: &str = "💡 Based on my analysis, consider a mix of sustainable and trending cryptos. Cardano and Solana show good potential!";

pub const HELP_REPLY: &str = "🤖 **CryptoBuddy Help Center**

**What I can help you with:**
• 🌱 Find sustainable/eco-friendly cryptos
• 📈 Discover trending/profitable cryptos
• 💰 Get investment advice and recommendations
• 📊 Check specific crypto information
• 🔍 Market overview and analysis

**Try asking:**
• \"What's the most sustainable crypto?\"
• \"Which cryptos are trending up?\"
• \"Tell me about Bitcoin\"
• \"What should I invest in?\"
• \"Show me market info\"

**Remember:** I'm here to educate and inform, not provide financial advice! 🎓";

pub const UNKNOWN_REPLY: &str = "🤔 I'm not sure what you're asking about. Try:
• 'What's sustainable?'
• 'Which crypto is trending?'
• 'Tell me about Ethereum'
• 'What should I buy?'
• Type 'help' for more options!";

pub const MARKET_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One value pulled out of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Price,
    Trend,
    MarketCap,
    EnergyUse,
    Score,
    Description,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldLine {
    pub label: Option<&'static str>,
    pub field: Field,
    pub suffix: &'static str,
}

const fn line(label: &'static str, field: Field) -> FieldLine {
    FieldLine {
        label: Some(label),
        field,
        suffix: "",
    }
}

/// Which fields an intent shows for an entry, in order, and how.
#[derive(Debug, Clone, Copy)]
pub struct EntryLayout {
    pub bullet: &'static str,
    pub title_case: bool,
    pub lines: &'static [FieldLine],
}

pub const SUSTAINABILITY_LAYOUT: EntryLayout = EntryLayout {
    bullet: "•",
    title_case: false,
    lines: &[
        line("Sustainability Score", Field::Score),
        line("Energy Use", Field::EnergyUse),
        line("Current Price", Field::Price),
        line("Why it's great", Field::Description),
    ],
};

pub const PROFITABILITY_LAYOUT: EntryLayout = EntryLayout {
    bullet: "•",
    title_case: false,
    lines: &[
        FieldLine {
            label: Some("Price"),
            field: Field::Price,
            suffix: " (Rising!)",
        },
        line("Market Cap", Field::MarketCap),
        FieldLine {
            label: None,
            field: Field::Description,
            suffix: "",
        },
    ],
};

pub const DETAIL_LAYOUT: EntryLayout = EntryLayout {
    bullet: "•",
    title_case: true,
    lines: &[
        line("Current Price", Field::Price),
        line("Trend", Field::Trend),
        line("Market Cap", Field::MarketCap),
        line("Energy Use", Field::EnergyUse),
        line("Sustainability Score", Field::Score),
        line("About", Field::Description),
    ],
};

pub const ADVICE_LAYOUT: EntryLayout = EntryLayout {
    bullet: "✅",
    title_case: false,
    lines: &[
        line("Price trending", Field::Trend),
        line("Sustainability score", Field::Score),
        FieldLine {
            label: Some("Energy efficient"),
            field: Field::EnergyUse,
            suffix: " usage",
        },
        line("Current price", Field::Price),
    ],
};

pub fn field_value(entry: &CatalogEntry, field: Field, title_case: bool) -> String {
    match field {
        Field::Price => entry.current_price.clone(),
        Field::Trend if title_case => entry.price_trend.title().to_string(),
        Field::Trend => entry.price_trend.as_str().to_string(),
        Field::MarketCap if title_case => entry.market_cap.title().to_string(),
        Field::MarketCap => entry.market_cap.as_str().to_string(),
        Field::EnergyUse if title_case => entry.energy_use.title().to_string(),
        Field::EnergyUse => entry.energy_use.as_str().to_string(),
        Field::Score => format!("{}/10", entry.sustainability_score),
        Field::Description => entry.description.clone(),
    }
}

/// Renders the bullet lines of `layout` for one entry, one line per field.
pub fn format_entry(entry: &CatalogEntry, layout: &EntryLayout) -> String {
    layout
        .lines
        .iter()
        .map(|line| {
            let value = field_value(entry, line.field, layout.title_case);
            match line.label {
                Some(label) => format!("{} {}: {}{}", layout.bullet, label, value, line.suffix),
                None => format!("{} {}{}", layout.bullet, value, line.suffix),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Top-level dispatch: blank input short-circuits before classification.
pub fn compose_reply(text: &str, catalog: &Catalog, chooser: &mut dyn Chooser) -> String {
    if text.trim().is_empty() {
        return EMPTY_QUERY_REPLY.to_string();
    }

    let intent = classify_intent_rules(text, catalog);
    respond(intent, text, catalog, chooser)
}

pub fn respond(
    intent: Intent,
    text: &str,
    catalog: &Catalog,
    chooser: &mut dyn Chooser,
) -> String {
    respond_at(intent, text, catalog, chooser, Local::now().naive_local())
}

/// Same as [`respond`] with an explicit wall-clock instant for the market
/// overview timestamp.
pub fn respond_at(
    intent: Intent,
    text: &str,
    catalog: &Catalog,
    chooser: &mut dyn Chooser,
    now: NaiveDateTime,
) -> String {
    match intent {
        Intent::Sustainability => sustainability_reply(catalog),
        Intent::Profitability => profitability_reply(catalog),
        Intent::SpecificCrypto => crypto_info_reply(text, catalog),
        Intent::GeneralAdvice => advice_reply(catalog, chooser),
        Intent::MarketInfo => market_reply(catalog, now),
        Intent::Help => HELP_REPLY.to_string(),
        Intent::Unknown => UNKNOWN_REPLY.to_string(),
    }
}

/// Highest sustainability score; the earliest entry wins a tie.
pub fn most_sustainable(catalog: &Catalog) -> Option<&CatalogEntry> {
    catalog.iter().fold(None, |best, entry| match best {
        Some(current) if current.sustainability_score >= entry.sustainability_score => {
            Some(current)
        }
        _ => Some(entry),
    })
}

/// Resolves the entry a query talks about, strongest evidence first: a
/// display name anywhere in the text, then a ticker standing as its own word
/// (the same test the classifier applies), then a ticker buried inside a
/// longer word. Each pass scans in catalog order, so "together with dot" is
/// Polkadot rather than the "eth" hidden in "together".
pub fn find_mentioned<'a>(text: &str, catalog: &'a Catalog) -> Option<&'a CatalogEntry> {
    let query = text.to_lowercase();
    catalog
        .iter()
        .find(|entry| query.contains(&entry.name.to_lowercase()))
        .or_else(|| catalog.iter().find(|entry| has_word(&query, &entry.symbol)))
        .or_else(|| {
            catalog
                .iter()
                .find(|entry| query.contains(&entry.symbol.to_lowercase()))
        })
}

pub fn balanced_candidates(catalog: &Catalog) -> Vec<&CatalogEntry> {
    catalog
        .iter()
        .filter(|entry| entry.sustainability_score >= 6 && entry.is_rising())
        .collect()
}

fn sustainability_reply(catalog: &Catalog) -> String {
    let Some(best) = most_sustainable(catalog) else {
        return UNKNOWN_REPLY.to_string();
    };

    format!(
        "🌱 **{} ({})** is your best eco-friendly choice!\n{}\nPerfect for long-term, environmentally conscious investing! 🌍",
        best.name,
        best.symbol,
        format_entry(best, &SUSTAINABILITY_LAYOUT)
    )
}

fn profitability_reply(catalog: &Catalog) -> String {
    let rising = catalog
        .iter()
        .filter(|entry| entry.is_rising())
        .collect::<Vec<_>>();

    if rising.is_empty() {
        return NO_RISING_REPLY.to_string();
    }

    let mut reply = String::from("📈 **Hot Trending Cryptos:**\n\n");
    for entry in rising {
        let marker = if entry.is_high_cap() { "🚀" } else { "📊" };
        reply.push_str(&format!(
            "{} **{} ({})**\n{}\n\n",
            marker,
            entry.name,
            entry.symbol,
            format_entry(entry, &PROFITABILITY_LAYOUT)
        ));
    }

    reply + "Remember: Rising trends don't guarantee future gains! 💡"
}

fn crypto_info_reply(text: &str, catalog: &Catalog) -> String {
    match find_mentioned(text, catalog) {
        Some(entry) => {
            let trend_marker = if entry.is_rising() { "📈" } else { "📊" };
            let sustain_marker = if entry.sustainability_score >= 7 {
                "🌱"
            } else {
                "⚡"
            };
            format!(
                "{} **{} ({})** {}\n{}\n",
                trend_marker,
                entry.name,
                entry.symbol,
                sustain_marker,
                format_entry(entry, &DETAIL_LAYOUT)
            )
        }
        None => format!(
            "🤔 I don't have information about that cryptocurrency in my database. Try asking about {}!",
            name_list(catalog)
        ),
    }
}

fn advice_reply(catalog: &Catalog, chooser: &mut dyn Chooser) -> String {
    let candidates = balanced_candidates(catalog);

    match choose(chooser, &candidates) {
        Some(entry) => format!(
            "💡 **My Balanced Recommendation: {} ({})**\n\nWhy it's a smart choice:\n{}\n\n💭 {}\n\n⚠️ Remember: Diversify your portfolio and never invest more than you can afford to lose!",
            entry.name,
            entry.symbol,
            format_entry(entry, &ADVICE_LAYOUT),
            entry.description
        ),
        None => ADVICE_FALLBACK_REPLY.to_string(),
    }
}

fn market_reply(catalog: &Catalog, now: NaiveDateTime) -> String {
    let rising = catalog.iter().filter(|entry| entry.is_rising()).count();
    let sustainable = catalog
        .iter()
        .filter(|entry| entry.sustainability_score >= 7)
        .count();

    format!(
        "📊 **Market Overview:**\n• Total tracked cryptos: {}\n• Currently rising: {}\n• Highly sustainable (7+/10): {}\n• Last updated: {}\n\n💡 Tip: Look for cryptos that balance profitability with sustainability!",
        catalog.len(),
        rising,
        sustainable,
        now.format(MARKET_TIMESTAMP_FORMAT)
    )
}

// "A, B, or C" in catalog order.
fn name_list(catalog: &Catalog) -> String {
    let names = catalog.names();
    match names.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{first} or {second}"),
        [rest @ .., last] => format!("{}, or {}", rest.join(", "), last),
    }
}
