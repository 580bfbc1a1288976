use crate::domain::model::ArtworkPage;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn user_agent(&self) -> &str;
    fn page_size(&self) -> u64;
    fn start_page(&self) -> u64;
}

/// A paged source of artworks.
#[async_trait]
pub trait ArtworkSource: Send + Sync {
    /// Fetches one page. `page_number` is 1-based and `page_size` must be non-zero.
    async fn fetch_page(&self, page_number: u64, page_size: u64) -> Result<ArtworkPage>;
}
