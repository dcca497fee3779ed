#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, oneshot};

use stockwatch_client::{InventoryController, ListDisplay, Severity, UserMessage};
use stockwatch_core::PartNumber;
use stockwatch_infra::{
    AuthorizationOutcome, AuthorizationPrompt, AuthorizationState, InMemoryRecordStore,
    NotificationGateway, Recipient, RecordStore, SendError, SmsTransport, StaticPrompt, StoreError,
};
use stockwatch_inventory::{InventoryRecord, LowStockPolicy};

pub const RECIPIENT: &str = "15550100";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    Inserted(usize, String, u32),
    Removed(usize),
    Changed(usize, String, u32),
}

#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub events: Vec<DisplayEvent>,
    pub messages: Vec<UserMessage>,
}

impl RecordingDisplay {
    pub fn texts(&self) -> Vec<&str> {
        self.messages.iter().map(|m| m.text.as_str()).collect()
    }

    pub fn last_text(&self) -> Option<&str> {
        self.messages.last().map(|m| m.text.as_str())
    }

    pub fn errors(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.severity == Severity::Error)
            .count()
    }
}

impl ListDisplay for RecordingDisplay {
    fn item_inserted(&mut self, position: usize, record: &InventoryRecord) {
        self.events.push(DisplayEvent::Inserted(
            position,
            record.part_number().to_string(),
            record.quantity(),
        ));
    }

    fn item_removed(&mut self, position: usize) {
        self.events.push(DisplayEvent::Removed(position));
    }

    fn item_changed(&mut self, position: usize, record: &InventoryRecord) {
        self.events.push(DisplayEvent::Changed(
            position,
            record.part_number().to_string(),
            record.quantity(),
        ));
    }

    fn show_message(&mut self, message: &UserMessage) {
        self.messages.push(message.clone());
    }
}

#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub sent: Mutex<Vec<(String, String)>>,
    pub fail: AtomicBool,
}

impl RecordingTransport {
    pub fn bodies(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, body)| body.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl SmsTransport for RecordingTransport {
    async fn deliver(&self, recipient: &Recipient, body: &str) -> Result<(), SendError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(SendError::Transport("no network path".into()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), body.to_string()));
        Ok(())
    }
}

/// In-memory store that counts writes and can be told to fail them.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: InMemoryRecordStore,
    pub fail_writes: AtomicBool,
    pub update_calls: AtomicUsize,
}

impl FlakyStore {
    pub fn failing(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn updates(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(StoreError::Io("disk full".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl RecordStore for FlakyStore {
    async fn get_all(&self) -> Result<Vec<InventoryRecord>, StoreError> {
        self.inner.get_all().await
    }

    async fn get(&self, part_number: &PartNumber) -> Result<Option<InventoryRecord>, StoreError> {
        self.inner.get(part_number).await
    }

    async fn add(&self, record: &InventoryRecord) -> Result<bool, StoreError> {
        self.check()?;
        self.inner.add(record).await
    }

    async fn delete(&self, part_number: &PartNumber) -> Result<bool, StoreError> {
        self.check()?;
        self.inner.delete(part_number).await
    }

    async fn update_quantity(
        &self,
        part_number: &PartNumber,
        quantity: u32,
    ) -> Result<bool, StoreError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.update_quantity(part_number, quantity).await
    }
}

/// Prompt whose answer is given later by the test, through `answers`.
pub struct DeferredPrompt {
    pending: mpsc::UnboundedSender<oneshot::Sender<AuthorizationOutcome>>,
}

impl DeferredPrompt {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<oneshot::Sender<AuthorizationOutcome>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { pending: tx }, rx)
    }
}

impl AuthorizationPrompt for DeferredPrompt {
    fn prompt(&self) -> oneshot::Receiver<AuthorizationOutcome> {
        let (tx, rx) = oneshot::channel();
        let _ = self.pending.send(tx);
        rx
    }
}

pub struct Harness {
    pub controller: InventoryController<RecordingDisplay>,
    pub store: Arc<FlakyStore>,
    pub transport: Arc<RecordingTransport>,
}

pub fn pn(s: &str) -> PartNumber {
    PartNumber::new(s).unwrap()
}

pub fn gateway_with(
    transport: Arc<RecordingTransport>,
    prompt: Arc<dyn AuthorizationPrompt>,
    state: AuthorizationState,
) -> NotificationGateway {
    NotificationGateway::new(RECIPIENT, transport, prompt).with_state(state)
}

/// Controller over a flaky in-memory store with the given authorization state.
pub async fn harness(state: AuthorizationState) -> Harness {
    let prompt: Arc<dyn AuthorizationPrompt> = match state {
        AuthorizationState::Denied => Arc::new(StaticPrompt::denying()),
        _ => Arc::new(StaticPrompt::granting()),
    };
    harness_with_prompt(state, prompt).await
}

pub async fn harness_with_prompt(
    state: AuthorizationState,
    prompt: Arc<dyn AuthorizationPrompt>,
) -> Harness {
    let store = Arc::new(FlakyStore::default());
    let transport = Arc::new(RecordingTransport::default());
    let gateway = gateway_with(transport.clone(), prompt, state);

    let mut controller = InventoryController::new(
        store.clone(),
        gateway,
        LowStockPolicy::default(),
        RecordingDisplay::default(),
    );
    controller.load_all().await.unwrap();

    Harness {
        controller,
        store,
        transport,
    }
}
