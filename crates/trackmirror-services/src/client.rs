//! HTTP client for the import/sync server.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client};
use tracing::instrument;
use url::Url;

use crate::error::ClientError;
use crate::types::*;

/// Client for the four POST endpoints exposed by the import/sync server.
#[derive(Debug, Clone)]
pub struct TrackerClient {
    client: Arc<Client>,
    base_url: Url,
}

impl TrackerClient {
    /// Create a client rooted at `base_url`.
    ///
    /// `timeout` of `None` leaves requests unbounded; they settle only when
    /// the transport resolves or fails.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn post(&self, url: Url) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
    }

    /// Import one cached source issue into the tracker.
    #[instrument(skip(self), level = "info")]
    pub async fn import_issue(&self, id: &IssueId) -> Result<ImportIssueResponse, ClientError> {
        let url = self.endpoint(&["import-issue", id.as_str()])?;
        tracing::debug!("POST {}", url);

        let response = self.post(url).send().await?;
        self.handle_response(response).await
    }

    /// Import a batch of issues in one request.
    #[instrument(skip(self, request), fields(count = request.issue_ids.len()), level = "info")]
    pub async fn import_bulk(
        &self,
        request: &BulkImportRequest,
    ) -> Result<BulkImportResponse, ClientError> {
        let url = self.endpoint(&["import-bulk-issues"])?;
        tracing::debug!("POST {} ({} issues)", url, request.issue_ids.len());

        let response = self.post(url).json(request).send().await?;
        let body: BulkImportResponse = self.handle_response(response).await?;

        tracing::info!(
            "Bulk import finished: {} of {} imported",
            body.imported_count,
            request.issue_ids.len()
        );
        Ok(body)
    }

    /// Synchronize every mapped issue.
    #[instrument(skip(self), level = "info")]
    pub async fn sync_issues(&self) -> Result<BatchSyncReport, ClientError> {
        let url = self.endpoint(&["sync-issues"])?;
        tracing::debug!("POST {}", url);

        let response = self.post(url).send().await?;
        let report: BatchSyncReport = self.handle_response(response).await?;

        tracing::info!("Sync returned {} results", report.results.len());
        Ok(report)
    }

    /// Synchronize a single mapped issue. The report holds at most one result.
    #[instrument(skip(self), level = "info")]
    pub async fn sync_issue(&self, id: &IssueId) -> Result<BatchSyncReport, ClientError> {
        let url = self.endpoint(&["sync-issue", id.as_str()])?;
        tracing::debug!("POST {}", url);

        let response = self.post(url).send().await?;
        self.handle_response(response).await
    }

    /// Decode a JSON body, turning non-2xx answers into `ClientError::Api`.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&text).map_err(|e| ClientError::Parse(e.to_string()))
        } else {
            let message = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
                .unwrap_or_else(|| {
                    if text.is_empty() {
                        status.to_string()
                    } else {
                        text.clone()
                    }
                });
            tracing::warn!("Server answered {}: {}", status, message);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_import_issue() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/import-issue/12"))
            .and(header("Content-Type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "issue_id": 12,
                "youtrack_id": "2-15",
                "message": "Issue #12 imported successfully"
            })))
            .mount(&mock_server)
            .await;

        let client = TrackerClient::new(&mock_server.uri(), None).unwrap();
        let resp = client.import_issue(&IssueId::from("12")).await.unwrap();

        assert!(!resp.is_failure());
        assert_eq!(resp.youtrack_id.as_deref(), Some("2-15"));
    }

    #[tokio::test]
    async fn test_import_bulk_sends_ids_and_titles() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/import-bulk-issues"))
            .and(body_json(serde_json::json!({
                "issue_ids": ["1", "2"],
                "issue_titles": ["One", "Two"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "imported_count": 1,
                "total_count": 2,
                "results": [{"success": true}, {"success": false, "error": "boom"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = TrackerClient::new(&mock_server.uri(), None).unwrap();
        let resp = client
            .import_bulk(&BulkImportRequest {
                issue_ids: vec!["1".into(), "2".into()],
                issue_titles: vec!["One".into(), "Two".into()],
            })
            .await
            .unwrap();

        assert_eq!(resp.imported_count, 1);
        assert_eq!(resp.total_count, Some(2));
        assert!(resp.results[1].is_failure());
    }

    #[tokio::test]
    async fn test_sync_issues() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/sync-issues"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "synced": 0,
                "errors": 1,
                "total_checked": 2,
                "results": [
                    {"github_number": 1, "youtrack_id": "PRJ-1", "status": "in_sync"},
                    {"github_number": "2", "youtrack_id": "PRJ-2", "status": "error", "message": "Exception: x"}
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = TrackerClient::new(&mock_server.uri(), None).unwrap();
        let report = client.sync_issues().await.unwrap();

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results[0].status, SyncStatus::InSync);
        assert_eq!(report.results[1].github_number, IssueId::from("2"));
        assert_eq!(report.errors_or_zero(), 1);
    }

    #[tokio::test]
    async fn test_sync_issue_not_mapped() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/sync-issue/7"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": "No mapping found for GitHub issue #7",
                "success": false
            })))
            .mount(&mock_server)
            .await;

        let client = TrackerClient::new(&mock_server.uri(), None).unwrap();
        let result = client.sync_issue(&IssueId::from("7")).await;

        match result {
            Err(ClientError::Api { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "No mapping found for GitHub issue #7");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/sync-issues"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = TrackerClient::new(&mock_server.uri(), None).unwrap();
        let result = client.sync_issues().await;

        assert!(matches!(result, Err(ClientError::Parse(_))));
    }

    #[tokio::test]
    async fn test_base_url_with_path_prefix() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/mirror/sync-issue/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": []
            })))
            .mount(&mock_server)
            .await;

        let base = format!("{}/mirror", mock_server.uri());
        let client = TrackerClient::new(&base, None).unwrap();
        let report = client.sync_issue(&IssueId::from("5")).await.unwrap();

        assert!(report.results.is_empty());
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            TrackerClient::new("not a url", None),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
