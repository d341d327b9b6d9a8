//! HTTP access to the listing page.

use crate::error::ScrapeError;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, info, instrument};

/// Build the client shared by every request of a run.
///
/// The `User-Agent` is installed as a default header so PDF downloads carry
/// it too. Timeouts are left at the library defaults.
pub fn build_client(user_agent: &str) -> Result<Client, ScrapeError> {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(user_agent).map_err(|e| ScrapeError::Config {
        path: "user_agent".into(),
        reason: e.to_string(),
    })?;
    headers.insert(USER_AGENT, value);

    Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| ScrapeError::network("client", e))
}

/// GET `url` once and return the body text.
///
/// # Errors
///
/// - [`ScrapeError::Network`] if the request or body read fails
/// - [`ScrapeError::Status`] if the server answers with a non-2xx status
#[instrument(level = "info", skip(client))]
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, ScrapeError> {
    info!("Connecting to listing page");
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ScrapeError::network(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| ScrapeError::network(url, e))?;
    debug!(bytes = body.len(), %status, "Fetched listing page");
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::{Route, StubServer};

    #[tokio::test]
    async fn test_fetch_page_sends_user_agent() {
        let server = StubServer::start(vec![Route::html("/Documents/circulars.html", "<p>ok</p>")]);
        let client = build_client("unit-test-agent/1.0").unwrap();

        let body = fetch_page(&client, &server.url("/Documents/circulars.html"))
            .await
            .unwrap();
        assert_eq!(body, "<p>ok</p>");
        assert_eq!(server.user_agents(), vec!["unit-test-agent/1.0".to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_error_status() {
        let server = StubServer::start(vec![]);
        let client = build_client("agent").unwrap();

        let err = fetch_page(&client, &server.url("/missing")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(matches!(
            err,
            ScrapeError::Status { status, .. } if status == reqwest::StatusCode::NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn test_fetch_page_connection_refused() {
        // Bind then drop to get a port nobody listens on.
        let port = {
            let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            l.local_addr().unwrap().port()
        };
        let client = build_client("agent").unwrap();

        let err = fetch_page(&client, &format!("http://127.0.0.1:{port}/"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Network { .. }));
    }

    #[test]
    fn test_invalid_user_agent() {
        let err = build_client("bad\nagent").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
