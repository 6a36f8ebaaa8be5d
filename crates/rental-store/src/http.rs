//! # Remote Order Collection (HTTP)
//!
//! Appends orders to a hosted append-only JSON collection.
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST {base_url}/{collection}.json[?auth={token}]                       │
//! │  Content-Type: application/json                                         │
//! │                                                                         │
//! │  { "lineItems": [...], "monthlyTotal": 17900, "rentalPeriodMonths": 2,  │
//! │    "deliveryFee": 19900, "subtotal": 55700,                             │
//! │    "submittedAt": "2026-03-01T09:00:00Z" }                              │
//! │                                                                         │
//! │  200 OK                                                                 │
//! │  { "name": "-NxR3..." }   ← generated push id = OrderId                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Mapping
//! ```text
//! connect / DNS / TLS failure   → StoreError::Unavailable
//! request timed out             → StoreError::Timeout
//! non-2xx status                → StoreError::Rejected("401 Unauthorized: ...")
//! body without a string `name`  → StoreError::InvalidResponse
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use rental_core::{Order, OrderId, OrderStore, StoreError};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest error body echoed into `StoreError::Rejected`.
const MAX_ERROR_BODY: usize = 200;

/// Settings for [`HttpOrderStore`].
#[derive(Debug, Clone)]
pub struct HttpStoreConfig {
    /// Base URL of the hosted database, without a trailing slash.
    pub base_url: String,

    /// Collection the orders are appended to.
    /// Default: `orders`
    pub collection: String,

    /// Optional token sent as the `auth` query parameter.
    pub auth_token: Option<String>,

    /// Whole-request timeout.
    /// Default: 10 seconds
    pub timeout: Duration,
}

impl HttpStoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpStoreConfig {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            collection: "orders".to_string(),
            auth_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the collection name.
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Sets the auth token.
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `{base_url}/{collection}.json`
    pub fn collection_url(&self) -> String {
        format!(
            "{}/{}.json",
            self.base_url,
            self.collection.trim_matches('/')
        )
    }
}

#[derive(Debug, Deserialize)]
struct PushResponse {
    name: String,
}

/// Order store backed by a remote JSON collection.
#[derive(Debug, Clone)]
pub struct HttpOrderStore {
    client: Client,
    config: HttpStoreConfig,
}

impl HttpOrderStore {
    /// Builds the HTTP client.
    ///
    /// Fails with `StoreError::Internal` if the TLS backend can't be set up.
    pub fn new(config: HttpStoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Internal(format!("HTTP client: {e}")))?;

        Ok(HttpOrderStore { client, config })
    }

    /// Returns the store settings.
    pub fn config(&self) -> &HttpStoreConfig {
        &self.config
    }
}

/// Sorts a transport failure into the port's categories.
fn map_transport_error(err: reqwest::Error) -> StoreError {
    if err.is_timeout() {
        StoreError::Timeout(err.to_string())
    } else if err.is_connect() || err.is_request() {
        StoreError::Unavailable(err.to_string())
    } else if err.is_decode() || err.is_body() {
        StoreError::InvalidResponse(err.to_string())
    } else {
        StoreError::Internal(err.to_string())
    }
}

#[async_trait]
impl OrderStore for HttpOrderStore {
    #[instrument(skip(self, order), fields(backend = "http"))]
    async fn append(&self, order: &Order) -> Result<OrderId, StoreError> {
        let url = self.config.collection_url();
        let body =
            serde_json::to_vec(order).map_err(|e| StoreError::Serialization(e.to_string()))?;

        debug!(url = %url, bytes = body.len(), "Posting order");

        let mut request = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(token) = &self.config.auth_token {
            request = request.query(&[("auth", token)]);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        debug!(status = %status, "Order collection responded");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail: String = text.chars().take(MAX_ERROR_BODY).collect();
            warn!(status = %status, "Order collection refused the order");
            return Err(StoreError::Rejected(format!("{status}: {detail}")));
        }

        let bytes = response.bytes().await.map_err(map_transport_error)?;
        let pushed: PushResponse = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        if pushed.name.is_empty() {
            return Err(StoreError::InvalidResponse("empty name".to_string()));
        }

        Ok(OrderId::new(pushed.name))
    }

    fn backend(&self) -> &'static str {
        "http"
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use httpmock::prelude::*;
    use rental_core::{Cart, Catalog, CatalogItem, Money, PricingTerms};
    use serde_json::json;
    use std::sync::Arc;

    fn sample_order() -> Order {
        let catalog = Arc::new(
            Catalog::new(vec![
                CatalogItem::new(
                    "florence",
                    "Florence Chair",
                    Money::from_dollars(980),
                    Money::from_dollars(45),
                ),
                CatalogItem::new(
                    "hewitt",
                    "Hewitt Chair",
                    Money::from_dollars(897),
                    Money::from_dollars(39),
                ),
                CatalogItem::new(
                    "harper",
                    "Harper Swivel Chair",
                    Money::from_dollars(800),
                    Money::from_dollars(28),
                ),
            ])
            .unwrap(),
        );
        let cart =
            Cart::with_quantities(catalog, [("florence", 1), ("hewitt", 2), ("harper", 2)])
                .unwrap();
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        Order::snapshot(&cart, &PricingTerms::default(), at)
    }

    fn store_for(server: &MockServer) -> HttpOrderStore {
        HttpOrderStore::new(HttpStoreConfig::new(server.base_url())).unwrap()
    }

    #[tokio::test]
    async fn test_append_posts_order_and_returns_push_id() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/orders.json")
                .header("content-type", "application/json")
                .body_contains("\"monthlyTotal\":17900")
                .body_contains("\"subtotal\":55700")
                .body_contains("\"submittedAt\":\"2026-03-01T09:00:00Z\"");
            then.status(200).json_body(json!({ "name": "-NxR3abc" }));
        });

        let id = store_for(&server).append(&sample_order()).await.unwrap();

        mock.assert();
        assert_eq!(id.as_str(), "-NxR3abc");
    }

    #[tokio::test]
    async fn test_auth_token_and_collection() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/rentals/2026.json")
                .query_param("auth", "secret-token");
            then.status(200).json_body(json!({ "name": "-Nabc" }));
        });

        let config = HttpStoreConfig::new(format!("{}/", server.base_url()))
            .collection("rentals/2026")
            .auth_token("secret-token");
        let store = HttpOrderStore::new(config).unwrap();

        store.append(&sample_order()).await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn test_non_success_status_is_rejected() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/orders.json");
            then.status(401).body("Permission denied");
        });

        let err = store_for(&server).append(&sample_order()).await.unwrap_err();

        match err {
            StoreError::Rejected(msg) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("Permission denied"));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/orders.json");
            then.status(200).json_body(json!({ "id": 7 }));
        });

        let err = store_for(&server).append(&sample_order()).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/orders.json");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(json!({ "name": "-late" }));
        });

        let config = HttpStoreConfig::new(server.base_url()).timeout(Duration::from_millis(50));
        let err = HttpOrderStore::new(config)
            .unwrap()
            .append(&sample_order())
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Timeout(_)), "got {err:?}");
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_unavailable() {
        // Port 1 on loopback refuses connections.
        let config = HttpStoreConfig::new("http://127.0.0.1:1");
        let err = HttpOrderStore::new(config)
            .unwrap()
            .append(&sample_order())
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Unavailable(_)), "got {err:?}");
    }

    #[test]
    fn test_collection_url() {
        let config = HttpStoreConfig::new("https://example.test/").collection("/orders/");
        assert_eq!(config.collection_url(), "https://example.test/orders.json");
    }
}
