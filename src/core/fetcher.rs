use crate::domain::model::{Artwork, ArtworkPage, ARTWORK_FIELDS};
use crate::domain::ports::{ArtworkSource, ConfigProvider};
use crate::utils::error::{Result, TableError};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Wire shape of `GET /artworks`. Only the parts we read are modeled.
#[derive(Debug, Deserialize)]
struct ArtworksResponse {
    data: Option<Vec<Artwork>>,
    pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    total: Option<u64>,
}

impl From<ArtworksResponse> for ArtworkPage {
    fn from(response: ArtworksResponse) -> Self {
        ArtworkPage {
            records: response.data.unwrap_or_default(),
            total_records: response
                .pagination
                .and_then(|p| p.total)
                .unwrap_or(0),
        }
    }
}

/// HTTP client for the Art Institute of Chicago artworks endpoint.
pub struct ArticFetcher {
    client: Client,
    endpoint: String,
}

impl ArticFetcher {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .user_agent(config.user_agent())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.api_endpoint().to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl ArtworkSource for ArticFetcher {
    async fn fetch_page(&self, page_number: u64, page_size: u64) -> Result<ArtworkPage> {
        crate::utils::validation::validate_positive_number("page_number", page_number, 1)?;
        crate::utils::validation::validate_positive_number("page_size", page_size, 1)?;

        tracing::debug!(
            "Fetching page {} (limit {}) from {}",
            page_number,
            page_size,
            self.endpoint
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("page", page_number.to_string()),
                ("limit", page_size.to_string()),
                ("fields", ARTWORK_FIELDS.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(TableError::HttpStatusError {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        // Read as text first so malformed JSON surfaces as a serde error, not a reqwest one.
        let body = response.text().await?;
        let parsed: ArtworksResponse = serde_json::from_str(&body)?;
        let page = ArtworkPage::from(parsed);

        tracing::debug!(
            "Page {} returned {} records (total {})",
            page_number,
            page.records.len(),
            page.total_records
        );

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_page_sends_projection_and_paging() {
        let server = MockServer::start();
        let mock_data = serde_json::json!({
            "pagination": {"total": 133, "limit": 12, "current_page": 2},
            "data": [
                {"id": 1, "title": "Water Lilies", "place_of_origin": "France",
                 "artist_display": "Claude Monet", "inscriptions": null,
                 "date_start": 1906, "date_end": 1906},
                {"id": 2, "title": "Untitled"}
            ]
        });

        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/artworks")
                .query_param("page", "2")
                .query_param("limit", "12")
                .query_param("fields", ARTWORK_FIELDS);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(mock_data);
        });

        let fetcher = ArticFetcher::new(server.url("/artworks"));
        let page = fetcher.fetch_page(2, 12).await.unwrap();

        api_mock.assert();
        assert_eq!(page.total_records, 133);
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.records[0].artist_display.as_deref(), Some("Claude Monet"));
        assert_eq!(page.records[0].inscriptions, None);
        assert_eq!(page.records[1].place_of_origin, None);
        assert_eq!(page.records[1].date_end, None);
    }

    #[tokio::test]
    async fn test_missing_pagination_means_zero_total() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/artworks");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"data": [{"id": 7}]}));
        });

        let fetcher = ArticFetcher::new(server.url("/artworks"));
        let page = fetcher.fetch_page(1, 12).await.unwrap();

        api_mock.assert();
        assert_eq!(page.total_records, 0);
        assert_eq!(page.records, vec![Artwork::new(7)]);
    }

    #[tokio::test]
    async fn test_missing_data_means_empty_page() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/artworks");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"pagination": {"total": 5}}));
        });

        let fetcher = ArticFetcher::new(server.url("/artworks"));
        let page = fetcher.fetch_page(1, 12).await.unwrap();

        assert!(page.records.is_empty());
        assert_eq!(page.total_records, 5);
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/artworks");
            then.status(500);
        });

        let fetcher = ArticFetcher::new(server.url("/artworks"));
        let err = fetcher.fetch_page(1, 12).await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, TableError::HttpStatusError { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_malformed_json_is_reported() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/artworks");
            then.status(200)
                .header("Content-Type", "application/json")
                .body("{\"data\": [");
        });

        let fetcher = ArticFetcher::new(server.url("/artworks"));
        let err = fetcher.fetch_page(1, 12).await.unwrap_err();

        assert!(matches!(err, TableError::SerializationError(_)));
    }

    #[tokio::test]
    async fn test_invalid_window_issues_no_request() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/artworks");
            then.status(200).json_body(serde_json::json!({"data": []}));
        });

        let fetcher = ArticFetcher::new(server.url("/artworks"));
        assert!(fetcher.fetch_page(0, 12).await.is_err());
        assert!(fetcher.fetch_page(1, 0).await.is_err());

        api_mock.assert_hits(0);
    }
}
