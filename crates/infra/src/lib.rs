//! Infrastructure layer: record persistence and outbound notifications.

pub mod notify;
pub mod store;

pub use notify::{
    AuthorizationOutcome, AuthorizationPrompt, AuthorizationState, LogTransport,
    NotificationGateway, Recipient, SendError, SmsTransport, StaticPrompt,
};
#[cfg(feature = "http")]
pub use notify::HttpSmsTransport;
pub use store::{InMemoryRecordStore, RecordStore, SqliteRecordStore, StoreError};
