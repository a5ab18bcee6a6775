//! Bundled text corpora. Keeps the synthesizer decoupled from any one story:
//! a corpus is just a `Book` document, and these ship as defaults.

use lector_timeline::Book;

pub const EL_PRINCIPITO_JSON: &str = include_str!("../assets/el-principito.json");

/// The first four chapters of El Principito, with the duration of its
/// narration audio (1h42m30s).
pub fn el_principito() -> Book {
    serde_json::from_str(EL_PRINCIPITO_JSON).unwrap()
}
