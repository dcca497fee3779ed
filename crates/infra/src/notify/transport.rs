use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to hand a text message to the transport.
///
/// Never fatal: the caller reports it and moves on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendError {
    #[error("text alerts are not authorized")]
    Unauthorized,

    #[error("invalid recipient: {0}")]
    InvalidRecipient(String),

    #[error("transport rejected message: {0}")]
    Transport(String),

    #[error("transport timed out")]
    Timeout,
}

/// Phone number a text alert is delivered to.
///
/// 3 to 15 digits, optionally prefixed with `+`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Recipient(String);

impl Recipient {
    pub fn parse(raw: impl Into<String>) -> Result<Self, SendError> {
        let raw = raw.into();
        let digits = raw.strip_prefix('+').unwrap_or(&raw);
        let valid = (3..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit());
        if valid {
            Ok(Self(raw))
        } else {
            Err(SendError::InvalidRecipient(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Recipient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Recipient {
    type Error = SendError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Recipient> for String {
    fn from(value: Recipient) -> Self {
        value.0
    }
}

/// "Send text to number" capability.
///
/// Fire-and-forget: `Ok` means the transport accepted the message, not that
/// it was delivered.
#[async_trait::async_trait]
pub trait SmsTransport: Send + Sync {
    async fn deliver(&self, recipient: &Recipient, body: &str) -> Result<(), SendError>;
}

/// Transport that only writes the message to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTransport;

#[async_trait::async_trait]
impl SmsTransport for LogTransport {
    async fn deliver(&self, recipient: &Recipient, body: &str) -> Result<(), SendError> {
        tracing::info!(recipient = %recipient, body, "text alert (log transport)");
        Ok(())
    }
}

#[cfg(feature = "http")]
pub use http::HttpSmsTransport;

#[cfg(feature = "http")]
mod http {
    use std::time::Duration;

    use super::{Recipient, SendError, SmsTransport};

    /// Transport that posts `{ "to", "body" }` as JSON to an SMS webhook.
    #[derive(Debug, Clone)]
    pub struct HttpSmsTransport {
        client: reqwest::Client,
        endpoint: String,
        token: Option<String>,
    }

    impl HttpSmsTransport {
        pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SendError> {
            let client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| SendError::Transport(format!("failed to build http client: {e}")))?;
            Ok(Self {
                client,
                endpoint: endpoint.into(),
                token: None,
            })
        }

        pub fn with_token(mut self, token: impl Into<String>) -> Self {
            self.token = Some(token.into());
            self
        }

        pub fn endpoint(&self) -> &str {
            &self.endpoint
        }
    }

    #[async_trait::async_trait]
    impl SmsTransport for HttpSmsTransport {
        async fn deliver(&self, recipient: &Recipient, body: &str) -> Result<(), SendError> {
            let payload = serde_json::json!({
                "to": recipient.as_str(),
                "body": body,
            });

            let mut req = self.client.post(&self.endpoint).json(&payload);
            if let Some(token) = &self.token {
                req = req.bearer_auth(token);
            }

            let resp = req.send().await.map_err(|e| {
                if e.is_timeout() {
                    SendError::Timeout
                } else {
                    SendError::Transport(e.to_string())
                }
            })?;

            let status = resp.status();
            if !status.is_success() {
                let text = resp.text().await.unwrap_or_default();
                return Err(SendError::Transport(format!(
                    "sms gateway responded {}: {}",
                    status.as_u16(),
                    text
                )));
            }

            tracing::debug!(recipient = %recipient, endpoint = %self.endpoint, "text alert accepted");
            Ok(())
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipient_accepts_plain_and_plus_prefixed_digits() {
        assert!(Recipient::parse("17864516721").is_ok());
        assert!(Recipient::parse("+4915112345678").is_ok());
    }

    #[test]
    fn recipient_rejects_malformed_numbers() {
        for raw in ["", "+", "12", "555-0100", "abc123", "1234567890123456"] {
            assert!(
                matches!(Recipient::parse(raw), Err(SendError::InvalidRecipient(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn log_transport_always_accepts() {
        let recipient = Recipient::parse("15550100").unwrap();
        assert!(LogTransport.deliver(&recipient, "hello").await.is_ok());
    }
}
