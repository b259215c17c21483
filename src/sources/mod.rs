//! Upstream market-data providers.

pub mod polygon;
pub mod twelvedata;

pub use polygon::PolygonClient;
pub use twelvedata::TwelveDataClient;

use crate::error::Result;
use crate::types::{Bar, CurrencyPair, TimeframeSpec};
use async_trait::async_trait;

/// A single upstream that can serve bars for some timeframes.
///
/// `Ok(vec![])` means the upstream answered but had nothing for the request;
/// `Err` means the request itself failed (transport, status, payload).
#[async_trait]
pub trait BarProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    async fn fetch(&self, pair: &CurrencyPair, spec: &TimeframeSpec) -> Result<Vec<Bar>>;
}
