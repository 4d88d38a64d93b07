//! Stock prices from the remote JSON API, one request per symbol.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::STOCK_SERVICE;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::service::{FetchError, FetchResult, StockFetchService};
use crate::domain::{PriceRecord, StockIdentifier};
use crate::engine::cancellation::CancellationToken;

pub struct HttpStockService {
    client: Client,
    base_url: String,
}

impl HttpStockService {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(STOCK_SERVICE.connect_timeout_ms))
            .user_agent(STOCK_SERVICE.user_agent)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn symbol_url(&self, symbol: &str) -> String {
        format!("{}/{}", self.base_url, symbol)
    }

    async fn fetch_symbol(&self, symbol: &str) -> Result<Vec<PriceRecord>, FetchError> {
        let url = self.symbol_url(symbol);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| FetchError::Failed(format!("Request for {} failed: {}", symbol, e)))?;

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Failed(format!("Reading {} response failed: {}", symbol, e)))?;

        serde_json::from_str::<Vec<PriceRecord>>(&body)
            .map_err(|e| FetchError::Failed(format!("Unexpected data for {}: {}", symbol, e)))
    }
}

#[async_trait]
impl StockFetchService for HttpStockService {
    fn signature(&self) -> &'static str {
        "Stock API"
    }

    /// Requests each symbol in turn. Resolves to `Cancelled` as soon as the token is
    /// cancelled, and also when its source is released mid-request, since nobody is
    /// left to take the result.
    async fn fetch(&self, identifier: &StockIdentifier, token: CancellationToken) -> FetchResult {
        let mut records = Vec::new();

        // One registration for the whole fetch, not one per request.
        let cancelled = token.cancelled();
        tokio::pin!(cancelled);

        for symbol in identifier.symbols() {
            if token.is_cancelled() {
                return Err(FetchError::Cancelled);
            }

            // Dropping the request future aborts the connection.
            let batch = tokio::select! {
                batch = self.fetch_symbol(symbol) => batch?,
                _ = &mut cancelled => return Err(FetchError::Cancelled),
            };

            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_fetch_progress {
                log::info!("[http] {} -> {} records", symbol, batch.len());
            }

            for record in batch {
                if token.is_cancelled() {
                    return Err(FetchError::Cancelled);
                }
                records.push(record);
            }
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cancellation;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const PRICES_JSON: &str = r#"[
        {"identifier":"MSFT","tradeDate":"2019-01-02T00:00:00","open":99.55,"high":101.75,"low":98.94,"close":101.12,"volume":35329345,"change":1.57,"changePercent":1.58},
        {"identifier":"MSFT","tradeDate":"2019-01-03T00:00:00","open":100.1,"high":100.19,"low":97.2,"close":97.4,"volume":42579100,"change":-3.72,"changePercent":-3.68}
    ]"#;

    /// Local server for one connection. `None` reads the request and never answers.
    async fn serve_once(reply: Option<String>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;

            match reply {
                Some(reply) => {
                    let _ = socket.write_all(reply.as_bytes()).await;
                    let _ = socket.shutdown().await;
                }
                None => {
                    // Hold the connection open until the test runtime goes away.
                    std::future::pending::<()>().await;
                    drop(socket);
                }
            }
        });

        format!("http://{}/api/stocks", addr)
    }

    fn http_reply(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        )
    }

    async fn fetch_msft(base_url: String, token: CancellationToken) -> FetchResult {
        let service = HttpStockService::new(base_url).unwrap();
        let id = StockIdentifier::parse("MSFT").unwrap();
        tokio::time::timeout(Duration::from_secs(5), service.fetch(&id, token))
            .await
            .expect("fetch should resolve")
    }

    #[test]
    fn symbol_urls_drop_trailing_slash() {
        let service = HttpStockService::new("http://localhost:1234/api/stocks/").unwrap();
        assert_eq!(
            service.symbol_url("MSFT"),
            "http://localhost:1234/api/stocks/MSFT"
        );
    }

    #[tokio::test]
    async fn already_cancelled_token_short_circuits() {
        // Nothing listens on this port; a request would fail rather than cancel.
        let service = HttpStockService::new("http://127.0.0.1:9/api/stocks").unwrap();
        let (source, token) = cancellation::create();
        source.cancel();

        let id = StockIdentifier::parse("MSFT").unwrap();
        assert_eq!(service.fetch(&id, token).await, Err(FetchError::Cancelled));
    }

    #[tokio::test]
    async fn prices_are_parsed_from_a_successful_response() {
        let url = serve_once(Some(http_reply("200 OK", PRICES_JSON))).await;
        let (_source, token) = cancellation::create();

        let records = fetch_msft(url, token).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].symbol, "MSFT");
        assert_eq!(records[1].volume, 42_579_100);
    }

    #[tokio::test]
    async fn cancel_interrupts_a_hanging_request() {
        let url = serve_once(None).await;
        let (source, token) = cancellation::create();

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            source.cancel()
        });

        assert_eq!(fetch_msft(url, token).await, Err(FetchError::Cancelled));
        assert!(canceller.await.unwrap());
    }

    #[tokio::test]
    async fn releasing_the_source_also_ends_the_request() {
        let url = serve_once(None).await;
        let (source, token) = cancellation::create();
        let observer = token.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            source.release();
        });

        assert_eq!(fetch_msft(url, token).await, Err(FetchError::Cancelled));
        assert!(!observer.is_cancelled());
    }

    #[tokio::test]
    async fn server_error_becomes_a_failure() {
        let url = serve_once(Some(http_reply("500 Internal Server Error", ""))).await;
        let (_source, token) = cancellation::create();

        match fetch_msft(url, token).await {
            Err(FetchError::Failed(message)) => assert!(message.contains("MSFT"), "{}", message),
            other => panic!("expected a failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_body_becomes_a_failure() {
        let url = serve_once(Some(http_reply("200 OK", "not json!"))).await;
        let (_source, token) = cancellation::create();

        match fetch_msft(url, token).await {
            Err(FetchError::Failed(message)) => {
                assert!(message.starts_with("Unexpected data for MSFT"), "{}", message)
            }
            other => panic!("expected a failure, got {:?}", other),
        }
    }
}
