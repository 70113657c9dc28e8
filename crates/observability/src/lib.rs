use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cryptobuddy_core::Intent;
use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct BuddyMetrics {
    queries_total: AtomicU64,
    empty_queries_total: AtomicU64,
    fallback_total: AtomicU64,
    by_intent: [AtomicU64; Intent::ALL.len()],
}

#[derive(Debug, Clone, Serialize)]
pub struct IntentCount {
    pub intent: Intent,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub queries_total: u64,
    pub empty_queries_total: u64,
    pub fallback_total: u64,
    pub by_intent: Vec<IntentCount>,
}

impl BuddyMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_query(&self) {
        self.queries_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_empty(&self) {
        self.empty_queries_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a classified query; unknown intents also count as fallbacks.
    pub fn record_intent(&self, intent: Intent) {
        if let Some(slot) = Intent::ALL
            .iter()
            .position(|candidate| *candidate == intent)
            .and_then(|index| self.by_intent.get(index))
        {
            slot.fetch_add(1, Ordering::Relaxed);
        }
        if intent == Intent::Unknown {
            self.fallback_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_total: self.queries_total.load(Ordering::Relaxed),
            empty_queries_total: self.empty_queries_total.load(Ordering::Relaxed),
            fallback_total: self.fallback_total.load(Ordering::Relaxed),
            by_intent: Intent::ALL
                .iter()
                .zip(self.by_intent.iter())
                .map(|(intent, count)| IntentCount {
                    intent: *intent,
                    count: count.load(Ordering::Relaxed),
                })
                .collect(),
        }
    }
}

/// Installs the global JSON subscriber once. Logs go to stderr so that
/// replies on stdout stay readable; `RUST_LOG` overrides `default_level`.
pub fn init_tracing(service_name: &str, default_level: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{service_name}={default_level},cryptobuddy_agents={default_level},cryptobuddy_core={default_level}"
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(io::stderr)
            .init();
    });
}
