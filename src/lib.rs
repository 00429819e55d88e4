#![deny(rust_2018_idioms)]

use std::borrow::Cow;
use std::sync::OnceLock;

pub mod vacancy;
pub use vacancy::Vacancy;

pub mod dataset;
pub use dataset::function::read_vacancies;

pub mod currency;
pub use currency::CurrencyRates;

pub mod aggregate;
pub use aggregate::function::aggregate;

pub mod reconcile;
pub use reconcile::function::{fill_gaps, reconcile};

pub mod geo;
pub use geo::function::rank_locations;

pub mod report;
pub use report::function::analyze;
pub use report::Report;

/// Clean up a raw field value as found in vacancy exports, which may carry HTML markup and multi-line text.
///
/// Tags are removed, newlines become `"; "` and whitespace runs collapse into a single space, trimmed at both ends.
pub fn sanitize_field(value: &str) -> String {
    static MARKUP: OnceLock<regex::Regex> = OnceLock::new();
    let markup = MARKUP.get_or_init(|| regex::Regex::new("<.*?>").expect("valid markup pattern"));
    let value: Cow<'_, str> = markup.replace_all(value, "");
    value
        .replace('\n', "; ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
