use std::collections::HashSet;

use cryptobuddy_core::responder::{
    ADVICE_FALLBACK_REPLY, EMPTY_QUERY_REPLY, HELP_REPLY, NO_RISING_REPLY,
};
use cryptobuddy_core::{
    classify_intent_rules, compose_reply, respond, respond_at, Catalog, Intent, SeededChooser,
    SequenceChooser,
};
use cryptobuddy_tests::{buddy_with, custom_catalog, fixed_now, reference_buddy};

#[test]
fn every_entry_answers_by_name() {
    let catalog = Catalog::reference();

    for entry in catalog.iter() {
        let query = format!("tell me about {}", entry.name).to_lowercase();
        assert_eq!(
            classify_intent_rules(&query, &catalog),
            Intent::SpecificCrypto,
            "query: {query}"
        );

        let reply = respond(
            Intent::SpecificCrypto,
            &query,
            &catalog,
            &mut SequenceChooser::always(0),
        );
        assert!(reply.contains(&entry.name), "reply: {reply}");
        assert!(reply.contains(&entry.symbol), "reply: {reply}");
        assert!(reply.contains(&entry.description), "reply: {reply}");
    }
}

#[test]
fn blank_input_never_reaches_classifier() {
    let mut buddy = reference_buddy();

    for input in ["", "   ", "\t\n"] {
        let reply = buddy.handle(input);
        assert_eq!(reply.intent, None);
        assert_eq!(reply.text, EMPTY_QUERY_REPLY);
    }

    let snapshot = buddy.metrics().snapshot();
    assert_eq!(snapshot.queries_total, 3);
    assert_eq!(snapshot.empty_queries_total, 3);
    assert!(snapshot.by_intent.iter().all(|entry| entry.count == 0));
}

#[test]
fn keyword_precedence_follows_rule_order() {
    let catalog = Catalog::reference();
    let cases = [
        ("sustainable trending coin", Intent::Sustainability),
        ("green energy with big gains", Intent::Sustainability),
        ("growth of ethereum", Intent::Profitability),
        ("buy solana", Intent::SpecificCrypto),
        ("best price right now", Intent::GeneralAdvice),
        ("what is the market cap", Intent::MarketInfo),
        ("how does this work", Intent::Help),
        ("help me understand", Intent::Help),
        ("lorem ipsum", Intent::Unknown),
    ];

    for (query, expected) in cases {
        assert_eq!(
            classify_intent_rules(query, &catalog),
            expected,
            "query: {query}"
        );
    }
}

#[test]
fn most_sustainable_is_first_maximum() {
    let reply = respond(
        Intent::Sustainability,
        "anything eco",
        &Catalog::reference(),
        &mut SequenceChooser::always(0),
    );
    assert!(reply.contains("**Cardano (ADA)**"));
    assert!(!reply.contains("Polkadot"));
}

#[test]
fn profitability_blocks_match_rising_entries() {
    let catalog = Catalog::reference();
    let reply = respond(
        Intent::Profitability,
        "",
        &catalog,
        &mut SequenceChooser::always(0),
    );

    let blocks = reply.matches("(Rising!)").count();
    let rising = catalog.iter().filter(|entry| entry.is_rising()).count();
    assert_eq!(blocks, rising);

    for entry in catalog.iter() {
        assert_eq!(reply.contains(&entry.name), entry.is_rising());
    }

    let custom = custom_catalog();
    let reply = respond(
        Intent::Profitability,
        "",
        &custom,
        &mut SequenceChooser::always(0),
    );
    assert!(reply.contains("🚀 **Algorand (ALGO)**"));
    assert!(!reply.contains("Dogecoin"));
}

#[test]
fn profitability_without_rising_entries_is_verbatim() {
    let falling_only = Catalog::from_json_str(
        r#"[{
            "name": "Dogecoin",
            "symbol": "DOGE",
            "price_trend": "falling",
            "market_cap": "medium",
            "energy_use": "high",
            "sustainability_score": 2,
            "current_price": "$0.07",
            "description": "Meme coin"
        }]"#,
    )
    .unwrap();

    let reply = respond(
        Intent::Profitability,
        "",
        &falling_only,
        &mut SequenceChooser::always(0),
    );
    assert_eq!(reply, NO_RISING_REPLY);

    let advice = respond(
        Intent::GeneralAdvice,
        "",
        &falling_only,
        &mut SeededChooser::from_seed(9),
    );
    assert_eq!(advice, ADVICE_FALLBACK_REPLY);
}

#[test]
fn advice_is_stable_per_seed_and_covers_candidates() {
    let catalog = Catalog::reference();
    let advise = |seed: u64| {
        respond(
            Intent::GeneralAdvice,
            "what should i buy",
            &catalog,
            &mut SeededChooser::from_seed(seed),
        )
    };

    assert_eq!(advise(7), advise(7));

    let mut surfaced = HashSet::new();
    for seed in 0..200 {
        let reply = advise(seed);
        for entry in catalog.iter() {
            if reply.contains(&format!("Recommendation: {}", entry.name)) {
                surfaced.insert(entry.name.clone());
            }
        }
    }

    let expected = ["Cardano", "Solana"]
        .into_iter()
        .map(String::from)
        .collect::<HashSet<_>>();
    assert_eq!(surfaced, expected);
}

#[test]
fn ticker_only_query_resolves_polkadot() {
    let catalog = Catalog::reference();
    for query in ["DOT", "dot", "Dot?"] {
        assert_eq!(
            classify_intent_rules(query, &catalog),
            Intent::SpecificCrypto
        );
        let reply = compose_reply(query, &catalog, &mut SequenceChooser::always(0));
        assert!(reply.contains("**Polkadot (DOT)**"), "reply: {reply}");
    }
}

#[test]
fn market_overview_uses_catalog_counts() {
    let reply = respond_at(
        Intent::MarketInfo,
        "market",
        &custom_catalog(),
        &mut SequenceChooser::always(0),
        fixed_now(),
    );
    assert!(reply.contains("• Total tracked cryptos: 2"));
    assert!(reply.contains("• Currently rising: 1"));
    assert!(reply.contains("• Highly sustainable (7+/10): 1"));
    assert!(reply.contains("• Last updated: 2025-01-31 09:30"));
}

#[test]
fn custom_catalog_drives_the_agent() -> anyhow::Result<()> {
    let mut buddy = buddy_with(custom_catalog(), SequenceChooser::always(0));

    let reply = buddy.handle_at("tell me about doge", fixed_now());
    assert_eq!(reply.intent, Some(Intent::SpecificCrypto));
    assert!(reply.text.starts_with("📊 **Dogecoin (DOGE)** ⚡"));

    let reply = buddy.handle_at("which coin is the most eco friendly", fixed_now());
    assert_eq!(reply.intent, Some(Intent::Sustainability));
    assert!(reply.text.contains("**Algorand (ALGO)**"));

    let reply = buddy.handle_at("tell me about monero", fixed_now());
    assert_eq!(reply.intent, Some(Intent::Unknown));

    let reply = buddy.handle_at("help", fixed_now());
    assert_eq!(reply.text, HELP_REPLY);

    let snapshot = serde_json::to_value(buddy.metrics().snapshot())?;
    assert_eq!(snapshot["queries_total"], 4);
    assert_eq!(snapshot["fallback_total"], 1);
    Ok(())
}

#[test]
fn sample_catalog_file_loads() {
    let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../data/catalog.sample.json");
    let catalog = Catalog::from_path(&path).expect("sample catalog should load");
    assert_eq!(catalog.names(), vec!["Bitcoin", "Cardano", "Algorand"]);

    let reply = compose_reply(
        "most sustainable pick?",
        &catalog,
        &mut SequenceChooser::always(0),
    );
    assert!(reply.contains("**Algorand (ALGO)**"));
}
