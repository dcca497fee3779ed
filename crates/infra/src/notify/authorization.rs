use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

/// Answer delivered by the platform for one authorization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizationOutcome {
    Granted,
    Denied,
}

/// Authorization state of the notification gateway.
///
/// `Unknown` is initial; `Granted` and `Denied` are terminal for the lifetime
/// of the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizationState {
    #[default]
    Unknown,
    Granted,
    Denied,
}

impl AuthorizationState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, AuthorizationState::Unknown)
    }
}

impl From<AuthorizationOutcome> for AuthorizationState {
    fn from(outcome: AuthorizationOutcome) -> Self {
        match outcome {
            AuthorizationOutcome::Granted => AuthorizationState::Granted,
            AuthorizationOutcome::Denied => AuthorizationState::Denied,
        }
    }
}

/// Platform permission prompt.
///
/// `prompt()` must not block: the answer arrives later on the returned
/// channel, exactly once. Dropping the sender without answering counts as a
/// denial.
pub trait AuthorizationPrompt: Send + Sync {
    fn prompt(&self) -> oneshot::Receiver<AuthorizationOutcome>;
}

/// Prompt that always gives the same answer.
///
/// Stands in for the platform dialog in headless runs, where the decision
/// comes from configuration.
#[derive(Debug, Clone, Copy)]
pub struct StaticPrompt {
    outcome: AuthorizationOutcome,
}

impl StaticPrompt {
    pub fn new(outcome: AuthorizationOutcome) -> Self {
        Self { outcome }
    }

    pub fn granting() -> Self {
        Self::new(AuthorizationOutcome::Granted)
    }

    pub fn denying() -> Self {
        Self::new(AuthorizationOutcome::Denied)
    }
}

impl AuthorizationPrompt for StaticPrompt {
    fn prompt(&self) -> oneshot::Receiver<AuthorizationOutcome> {
        let (tx, rx) = oneshot::channel();
        // The receiver is still alive here, so this cannot fail.
        let _ = tx.send(self.outcome);
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_prompt_answers_immediately() {
        assert_eq!(
            StaticPrompt::granting().prompt().await.unwrap(),
            AuthorizationOutcome::Granted
        );
        assert_eq!(
            StaticPrompt::denying().prompt().await.unwrap(),
            AuthorizationOutcome::Denied
        );
    }

    #[test]
    fn only_unknown_is_non_terminal() {
        assert!(!AuthorizationState::Unknown.is_terminal());
        assert!(AuthorizationState::Granted.is_terminal());
        assert!(AuthorizationState::Denied.is_terminal());
        assert_eq!(AuthorizationState::default(), AuthorizationState::Unknown);
    }
}
