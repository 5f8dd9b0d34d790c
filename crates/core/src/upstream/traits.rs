use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::price::PerformancePoint;
use crate::models::snapshot::PortfolioSnapshot;

/// Trait abstraction over the external data service.
///
/// The dashboard core only consumes pre-computed payloads; this seam
/// lets tests and alternative transports stand in for the HTTP service
/// without touching the analytics layer.
#[async_trait]
pub trait PortfolioDataSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the full portfolio snapshot: per-ticker history/metadata,
    /// aggregate metrics, and the ordered ticker list.
    async fn fetch_snapshot(&self) -> Result<PortfolioSnapshot, CoreError>;

    /// Fetch the historical valuation series of the whole portfolio.
    async fn fetch_performance(&self) -> Result<Vec<PerformancePoint>, CoreError>;
}
