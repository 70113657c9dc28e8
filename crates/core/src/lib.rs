pub mod catalog;
pub mod chooser;
pub mod intent;
pub mod models;
pub mod responder;

pub use catalog::{Catalog, CatalogError};
pub use chooser::{choose, Chooser, SeededChooser, SequenceChooser};
pub use intent::{classify_intent_rules, normalize_text};
pub use models::*;
pub use responder::{compose_reply, format_entry, respond, respond_at, EntryLayout, Field};
