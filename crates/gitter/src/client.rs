//! HTTPS webhook client.

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Request, Url};
use thiserror::Error;
use tracing::debug;

use notifier::{TransportError, WebhookResponse, WebhookTransport};

use crate::WebhookClientConfig;

const JSON_UTF8: &str = "application/json; charset=UTF-8";
const JSON: &str = "application/json";

/// Errors raised while setting up the client.
#[derive(Debug, Error)]
pub enum GitterError {
    /// The underlying HTTP client (TLS backend, timeouts) could not be built.
    #[error("could not build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

/// Posts notifications to a webhook over HTTPS.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpsWebhookClient {
    client: Client,
}

impl HttpsWebhookClient {
    /// Builds a rustls-backed client that refuses plain-HTTP URLs.
    pub fn new(config: &WebhookClientConfig) -> Result<Self, GitterError> {
        let mut builder = Client::builder()
            .use_rustls_tls()
            .https_only(true)
            .user_agent(concat!("gitter-notifier/", env!("CARGO_PKG_VERSION")));

        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    fn build_request(&self, url: &str, body: String) -> Result<Request, TransportError> {
        let target = Url::parse(url).map_err(|e| TransportError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if target.scheme() != "https" {
            return Err(TransportError::InsecureScheme {
                url: url.to_string(),
            });
        }

        self.client
            .post(target)
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))
            .header(ACCEPT, HeaderValue::from_static(JSON))
            .body(body)
            .build()
            .map_err(|e| TransportError::Request {
                reason: error_chain(&e),
            })
    }
}

#[async_trait]
impl WebhookTransport for HttpsWebhookClient {
    async fn post(&self, url: &str, body: String) -> Result<WebhookResponse, TransportError> {
        let request = self.build_request(url, body)?;
        debug!(host = ?request.url().host_str(), "posting notification");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| TransportError::Request {
                reason: error_chain(&e),
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| TransportError::Body {
            reason: error_chain(&e),
        })?;

        Ok(WebhookResponse { status, body })
    }
}

// reqwest's Display omits the cause ("error sending request"), which is the
// part an operator needs (refused, DNS, certificate).
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client() -> HttpsWebhookClient {
        HttpsWebhookClient::new(&WebhookClientConfig::default()).unwrap()
    }

    #[test]
    fn request_carries_json_headers_and_body() {
        let request = client()
            .build_request(
                "https://webhooks.gitter.im/e/abc",
                r#"{"message":"m","status":"passed"}"#.to_string(),
            )
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(request.url().as_str(), "https://webhooks.gitter.im/e/abc");
        assert_eq!(
            request.headers().get(CONTENT_TYPE).unwrap(),
            "application/json; charset=UTF-8"
        );
        assert_eq!(request.headers().get(ACCEPT).unwrap(), "application/json");
        assert_eq!(
            request.body().and_then(|b| b.as_bytes()),
            Some(br#"{"message":"m","status":"passed"}"#.as_slice())
        );
    }

    #[tokio::test]
    async fn plain_http_is_refused_before_connecting() {
        let err = client()
            .post("http://127.0.0.1:9/hook", "{}".to_string())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            TransportError::InsecureScheme {
                url: "http://127.0.0.1:9/hook".to_string()
            }
        );
    }

    #[tokio::test]
    async fn unparsable_url_is_rejected() {
        let err = client().post("not a url", "{}".to_string()).await.unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn refused_connection_is_a_request_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let err = client()
            .post(&format!("https://127.0.0.1:{port}/hook"), "{}".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Request { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn non_tls_endpoint_fails_the_handshake() {
        use tokio::io::AsyncWriteExt;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let _ = socket
                    .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 2\r\n\r\nOK")
                    .await;
            }
        });

        let config = WebhookClientConfig::default()
            .with_connect_timeout(5)
            .with_request_timeout(5);
        let err = HttpsWebhookClient::new(&config)
            .unwrap()
            .post(&format!("https://{addr}/hook"), "{}".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Request { .. }), "{err:?}");
    }
}
