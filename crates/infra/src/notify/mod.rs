//! Outbound text alerts.
//!
//! The gateway owns the authorization state and the configured recipient;
//! transports only know how to move a message to a number.

pub mod authorization;
pub mod gateway;
pub mod transport;

pub use authorization::{
    AuthorizationOutcome, AuthorizationPrompt, AuthorizationState, StaticPrompt,
};
pub use gateway::NotificationGateway;
#[cfg(feature = "http")]
pub use transport::HttpSmsTransport;
pub use transport::{LogTransport, Recipient, SendError, SmsTransport};
