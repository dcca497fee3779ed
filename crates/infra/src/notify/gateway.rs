use std::sync::Arc;

use super::authorization::{AuthorizationOutcome, AuthorizationPrompt, AuthorizationState};
use super::transport::{Recipient, SendError, SmsTransport};

/// Delivers text alerts to one configured recipient.
///
/// Sending requires authorization. The gateway asks the platform prompt at
/// most once; whatever it answers sticks for the gateway's lifetime.
pub struct NotificationGateway {
    recipient: String,
    transport: Arc<dyn SmsTransport>,
    prompt: Arc<dyn AuthorizationPrompt>,
    state: AuthorizationState,
}

impl NotificationGateway {
    pub fn new(
        recipient: impl Into<String>,
        transport: Arc<dyn SmsTransport>,
        prompt: Arc<dyn AuthorizationPrompt>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            transport,
            prompt,
            state: AuthorizationState::Unknown,
        }
    }

    /// Start in a known state, e.g. when the platform already remembers the
    /// user's earlier answer.
    pub fn with_state(mut self, state: AuthorizationState) -> Self {
        self.state = state;
        self
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn state(&self) -> AuthorizationState {
        self.state
    }

    pub fn is_authorized(&self) -> bool {
        self.state == AuthorizationState::Granted
    }

    /// Ask the platform for permission and wait for its answer.
    ///
    /// In a terminal state the recorded answer is returned without prompting.
    pub async fn request_authorization(&mut self) -> AuthorizationOutcome {
        if self.state.is_terminal() {
            return if self.is_authorized() {
                AuthorizationOutcome::Granted
            } else {
                AuthorizationOutcome::Denied
            };
        }

        let outcome = match self.prompt.prompt().await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!("authorization prompt dropped without an answer; treating as denied");
                AuthorizationOutcome::Denied
            }
        };

        self.state = outcome.into();
        tracing::info!(state = ?self.state, "text alert authorization resolved");
        outcome
    }

    /// Send `message` to the configured recipient.
    pub async fn send(&self, message: &str) -> Result<(), SendError> {
        if !self.is_authorized() {
            return Err(SendError::Unauthorized);
        }
        let recipient = Recipient::parse(self.recipient.as_str())?;
        self.transport.deliver(&recipient, message).await
    }
}

impl core::fmt::Debug for NotificationGateway {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NotificationGateway")
            .field("recipient", &self.recipient)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
