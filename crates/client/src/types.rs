//! Types shared with whatever renders the inventory list.

use serde::{Deserialize, Serialize};

/// How prominently a message should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// Short user-visible text produced by one operation (toast-style).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMessage {
    pub severity: Severity,
    pub text: String,
}

impl UserMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }
}

impl core::fmt::Display for UserMessage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{}] {}", self.severity.as_str(), self.text)
    }
}

/// What happened when a quantity was checked against the low-stock policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertOutcome {
    /// Quantity is at or above the threshold.
    NotNeeded,
    /// Alert handed to the transport.
    Sent,
    /// Not authorized; the user was told locally instead.
    Fallback,
    /// The transport refused the alert.
    Failed(stockwatch_infra::SendError),
}
