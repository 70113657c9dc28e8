use std::sync::Arc;

use chrono::NaiveDateTime;
use cryptobuddy_core::responder::EMPTY_QUERY_REPLY;
use cryptobuddy_core::{
    choose, classify_intent_rules, normalize_text, respond_at, Catalog, Chooser, Intent,
    SeededChooser,
};
use cryptobuddy_observability::BuddyMetrics;
use tracing::{debug, info, instrument};

pub const ASSISTANT_NAME: &str = "CryptoBuddy";

pub const EXIT_KEYWORDS: &[&str] = &["quit", "exit", "bye", "goodbye"];

pub const GREETINGS: &[&str] = &[
    "Hey there! 👋 Ready to explore the crypto universe?",
    "Welcome to CryptoBuddy! 🚀 Let's find your perfect crypto match!",
    "Hello, crypto explorer! 🌟 I'm here to help you make smart decisions!",
];

pub const FAREWELLS: &[&str] = &[
    "Happy investing! Remember: DYOR (Do Your Own Research)! 💎",
    "Crypto adventures await! Stay safe out there! 🛡️",
    "May your portfolio be green and your investments wise! 🌱📈",
];

pub const DISCLAIMER: &str = "⚠️ DISCLAIMER: This is for educational purposes only. Cryptocurrency investments are risky. Always do your own research!";

pub const RECOVERY_REPLY: &str = "Oops! Something went wrong. Let me try again! 🔧";

#[derive(Debug, Clone)]
pub struct BuddyReply {
    pub intent: Option<Intent>,
    pub text: String,
}

/// One chat session's worth of state: the shared catalog, the randomness
/// provider and the metrics sink. Queries are answered one at a time.
pub struct CryptoBuddy {
    catalog: Arc<Catalog>,
    chooser: Box<dyn Chooser>,
    metrics: Arc<BuddyMetrics>,
}

impl CryptoBuddy {
    pub fn new(
        catalog: Arc<Catalog>,
        chooser: Box<dyn Chooser>,
        metrics: Arc<BuddyMetrics>,
    ) -> Self {
        Self {
            catalog,
            chooser,
            metrics,
        }
    }

    /// Builds an agent whose picks are reproducible when `seed` is set.
    pub fn with_seed(
        catalog: Arc<Catalog>,
        seed: Option<u64>,
        metrics: Arc<BuddyMetrics>,
    ) -> Self {
        let chooser = match seed {
            Some(seed) => SeededChooser::from_seed(seed),
            None => SeededChooser::from_entropy(),
        };
        Self::new(catalog, Box::new(chooser), metrics)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn metrics(&self) -> &Arc<BuddyMetrics> {
        &self.metrics
    }

    pub fn greet(&mut self) -> String {
        let greeting = choose(self.chooser.as_mut(), GREETINGS)
            .copied()
            .unwrap_or(GREETINGS[0]);
        format!(
            "{greeting}\n\n{DISCLAIMER}\n\nHow can I help you today? Try asking about:\n• Trending cryptos\n• Sustainable coins\n• Investment advice\n• Specific crypto info"
        )
    }

    pub fn farewell(&mut self) -> &'static str {
        choose(self.chooser.as_mut(), FAREWELLS)
            .copied()
            .unwrap_or(FAREWELLS[0])
    }

    pub fn handle(&mut self, text: &str) -> BuddyReply {
        self.handle_at(text, chrono::Local::now().naive_local())
    }

    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub fn handle_at(&mut self, text: &str, now: NaiveDateTime) -> BuddyReply {
        self.metrics.inc_query();

        let normalized = normalize_text(text);
        if normalized.is_empty() {
            self.metrics.inc_empty();
            debug!("empty query short-circuited");
            return BuddyReply {
                intent: None,
                text: EMPTY_QUERY_REPLY.to_string(),
            };
        }

        let intent = classify_intent_rules(&normalized, &self.catalog);
        self.metrics.record_intent(intent);

        let reply = respond_at(
            intent,
            &normalized,
            &self.catalog,
            self.chooser.as_mut(),
            now,
        );

        info!(
            intent = %intent,
            reply_chars = reply.chars().count(),
            "query handled"
        );

        BuddyReply {
            intent: Some(intent),
            text: reply,
        }
    }
}

pub fn is_exit_command(input: &str) -> bool {
    let trimmed = input.trim();
    EXIT_KEYWORDS
        .iter()
        .any(|keyword| trimmed.eq_ignore_ascii_case(keyword))
}
