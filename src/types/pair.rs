use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix used by the aggregates provider for currency tickers.
const CURRENCY_TICKER_PREFIX: &str = "C:";

/// A six-letter FX pair such as EUR/USD.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CurrencyPair {
    base: String,
    quote: String,
}

impl CurrencyPair {
    /// Parse a pair from `C:EURUSD`, `EURUSD`, `EUR/USD` or lowercase variants.
    pub fn parse(input: &str) -> Result<Self, AppError> {
        let trimmed = input.trim();
        let raw = trimmed
            .strip_prefix(CURRENCY_TICKER_PREFIX)
            .or_else(|| trimmed.strip_prefix("c:"))
            .unwrap_or(trimmed);
        let letters: String = raw.chars().filter(|c| *c != '/').collect();

        if letters.len() != 6 || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AppError::BadRequest(format!(
                "Invalid currency pair: {}",
                input
            )));
        }

        let upper = letters.to_ascii_uppercase();
        Ok(Self {
            base: upper[..3].to_string(),
            quote: upper[3..].to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// Display code, e.g. `EURUSD`.
    pub fn code(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }

    /// Ticker for the aggregates provider, e.g. `C:EURUSD`.
    pub fn aggregates_ticker(&self) -> String {
        format!("{}{}{}", CURRENCY_TICKER_PREFIX, self.base, self.quote)
    }

    /// Symbol for the intraday provider, e.g. `EUR/USD`.
    pub fn intraday_symbol(&self) -> String {
        format!("{}/{}", self.base, self.quote)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.quote)
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.code()
    }
}

impl TryFrom<String> for CurrencyPair {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CurrencyPair::parse(&value)
    }
}
