//! Fetch client: one HTTP GET per call, validated before anything decodes it.

use async_trait::async_trait;
use reqwest::StatusCode;

/// A raw reply as the transport saw it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a reply; carries the transport's message.
    #[error("{0}")]
    Transport(String),
    #[error("Invalid response")]
    InvalidResponse,
    /// Non-2xx status; carries the status reason phrase.
    #[error("{0}")]
    InvalidStatus(String),
    #[error("No data.")]
    NoData,
}

/// Performs a single GET.
///
/// `Err` means the request failed below HTTP (DNS, connect, TLS, read). Any
/// reply that made it back, whatever its status, is `Ok`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpReply, String>;
}

/// reqwest-backed transport. Each call builds its own client, so no
/// connection state is shared between requests.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReqwestTransport;

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpReply, String> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| err.to_string())?;
        let response = client.get(url).send().await.map_err(|err| err.to_string())?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|err| err.to_string())?
            .to_vec();
        Ok(HttpReply { status, body })
    }
}

#[derive(Clone, Debug, Default)]
pub struct ServiceClient<T = ReqwestTransport> {
    transport: T,
}

impl ServiceClient<ReqwestTransport> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: HttpTransport> ServiceClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET `url` and return the body once the reply passes validation.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        tracing::debug!(url, "fetch started");
        let reply = match self.transport.get(url).await {
            Ok(reply) => reply,
            Err(message) => {
                tracing::warn!(url, error = %message, "transport failure");
                return Err(FetchError::Transport(message));
            }
        };
        let status = reply.status;
        let result = validate(reply);
        match &result {
            Ok(body) => tracing::debug!(url, status, bytes = body.len(), "fetch finished"),
            Err(err) => tracing::warn!(url, status, error = %err, "fetch rejected"),
        }
        result
    }
}

/// Check, in order: well-formed status, 2xx status, non-empty body.
pub fn validate(reply: HttpReply) -> Result<Vec<u8>, FetchError> {
    let status = StatusCode::from_u16(reply.status).map_err(|_| FetchError::InvalidResponse)?;
    if !status.is_success() {
        return Err(FetchError::InvalidStatus(reason_phrase(status)));
    }
    if reply.body.is_empty() {
        return Err(FetchError::NoData);
    }
    Ok(reply.body)
}

/// Human-readable phrase for a status code, falling back to its class.
pub fn reason_phrase(status: StatusCode) -> String {
    if let Some(reason) = status.canonical_reason() {
        return reason.to_string();
    }
    match status.as_u16() {
        100..=199 => "informational",
        200..=299 => "success",
        300..=399 => "redirected",
        400..=499 => "client error",
        _ => "server error",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reply(status: u16, body: &[u8]) -> HttpReply {
        HttpReply {
            status,
            body: body.to_vec(),
        }
    }

    #[test]
    fn test_success_range_boundaries() {
        assert_eq!(validate(reply(200, b"{}")), Ok(b"{}".to_vec()));
        assert_eq!(validate(reply(299, b"{}")), Ok(b"{}".to_vec()));
        assert!(matches!(
            validate(reply(199, b"{}")),
            Err(FetchError::InvalidStatus(_))
        ));
        assert!(matches!(
            validate(reply(300, b"{}")),
            Err(FetchError::InvalidStatus(_))
        ));
    }

    #[test]
    fn test_status_reason_phrase() {
        assert_eq!(
            validate(reply(404, b"Not Found")),
            Err(FetchError::InvalidStatus("Not Found".to_string()))
        );
        assert_eq!(
            validate(reply(300, b"")).unwrap_err().to_string(),
            "Multiple Choices"
        );
        assert_eq!(
            validate(reply(199, b"")).unwrap_err().to_string(),
            "informational"
        );
        assert_eq!(
            validate(reply(599, b"")).unwrap_err().to_string(),
            "server error"
        );
    }

    #[test]
    fn test_malformed_status_is_invalid_response() {
        assert_eq!(validate(reply(0, b"{}")), Err(FetchError::InvalidResponse));
        assert_eq!(validate(reply(1000, b"{}")), Err(FetchError::InvalidResponse));
        assert_eq!(
            FetchError::InvalidResponse.to_string(),
            "Invalid response"
        );
    }

    #[test]
    fn test_empty_body_is_no_data() {
        let err = validate(reply(200, b"")).unwrap_err();
        assert_eq!(err, FetchError::NoData);
        assert_eq!(err.to_string(), "No data.");
    }

    #[test]
    fn test_status_checked_before_body() {
        assert!(matches!(
            validate(reply(500, b"")),
            Err(FetchError::InvalidStatus(_))
        ));
    }
}
