//! Conversion of salaries into the reference currency, `RUR`.

use std::collections::BTreeMap;
use std::sync::OnceLock;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Currency '{code}' is not in the conversion table")]
    UnknownCurrency { code: String },
    #[error("{amount} {code} does not fit into whole units of the reference currency")]
    OutOfRange { amount: f64, code: String },
    #[error("Failed to open the currency rate table for reading")]
    Io(#[from] std::io::Error),
    #[error("Could not decode the currency rate table")]
    Decode(#[from] ron::de::SpannedError),
}

/// The currency all salaries are converted into.
pub const REFERENCE_CURRENCY: &str = "RUR";

/// Rates to multiply an amount in a given currency with to obtain the amount in [`REFERENCE_CURRENCY`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CurrencyRates {
    pub rates: BTreeMap<String, f64>,
}

impl Default for CurrencyRates {
    fn default() -> Self {
        CurrencyRates {
            rates: [
                ("AZN", 35.68),
                ("BYR", 23.91),
                ("EUR", 59.90),
                ("GEL", 21.74),
                ("KGS", 0.76),
                ("KZT", 0.13),
                (REFERENCE_CURRENCY, 1.0),
                ("UAH", 1.64),
                ("USD", 60.66),
                ("UZS", 0.0055),
            ]
            .into_iter()
            .map(|(code, rate)| (code.to_owned(), rate))
            .collect(),
        }
    }
}

impl CurrencyRates {
    /// The built-in table, created on first use and shared for the lifetime of the process.
    pub fn fixed() -> &'static CurrencyRates {
        static RATES: OnceLock<CurrencyRates> = OnceLock::new();
        RATES.get_or_init(CurrencyRates::default)
    }

    /// Read a table like `(rates: {"RUR": 1.0, "USD": 60.66})` in RON notation.
    pub fn from_ron_reader(read: impl std::io::Read) -> Result<Self, Error> {
        Ok(ron::de::from_reader(read)?)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    /// Convert `amount` given in `currency` into whole units of the reference currency, truncating any fraction.
    ///
    /// Results that are negative or exceed `u64::MAX` are rejected instead of being clamped.
    pub fn normalize(&self, amount: f64, currency: &str) -> Result<u64, Error> {
        let rate = self
            .rates
            .get(currency)
            .ok_or_else(|| Error::UnknownCurrency {
                code: currency.to_owned(),
            })?;
        let converted = amount * rate;
        if !(converted >= 0.0 && converted < u64::MAX as f64) {
            return Err(Error::OutOfRange {
                amount,
                code: currency.to_owned(),
            });
        }
        Ok(converted as u64)
    }
}
