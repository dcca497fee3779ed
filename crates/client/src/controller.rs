//! Inventory controller: one method per user intent.
//!
//! The controller keeps an in-memory copy of the store's records. Every
//! mutation goes to the store first and is mirrored into the copy only after
//! the store accepted it. All mutations take `&mut self`, so at most one is in
//! flight at a time.

use std::sync::Arc;

use stockwatch_core::{DomainError, Entity, PartNumber};
use stockwatch_infra::{AuthorizationOutcome, AuthorizationState, NotificationGateway, RecordStore};
use stockwatch_inventory::{InventoryIntent, InventoryRecord, LowStockPolicy, NewRecord, alert_message};

use crate::display::ListDisplay;
use crate::error::ControllerError;
use crate::types::{AlertOutcome, UserMessage};

pub const ENABLED_MESSAGE: &str = "Inventory App SMS notifications are now enabled!";
pub const GRANTED_MESSAGE: &str = "SMS notifications enabled for Inventory App!";

pub struct InventoryController<D> {
    store: Arc<dyn RecordStore>,
    gateway: NotificationGateway,
    policy: LowStockPolicy,
    display: D,
    records: Vec<InventoryRecord>,
}

impl<D: ListDisplay> InventoryController<D> {
    pub fn new(
        store: Arc<dyn RecordStore>,
        gateway: NotificationGateway,
        policy: LowStockPolicy,
        display: D,
    ) -> Self {
        Self {
            store,
            gateway,
            policy,
            display,
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    pub fn record(&self, part_number: &PartNumber) -> Option<&InventoryRecord> {
        self.records.iter().find(|r| r.is_identified_by(part_number))
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn gateway(&self) -> &NotificationGateway {
        &self.gateway
    }

    pub fn policy(&self) -> LowStockPolicy {
        self.policy
    }

    /// Replace the in-memory list with the store's contents.
    ///
    /// A store failure here is fatal to startup and is returned as-is.
    pub async fn load_all(&mut self) -> Result<(), ControllerError> {
        let records = self.store.get_all().await.map_err(|err| {
            tracing::error!("failed to load inventory: {err}");
            err
        })?;

        for position in (0..self.records.len()).rev() {
            self.display.item_removed(position);
        }
        self.records = records;
        for (position, record) in self.records.iter().enumerate() {
            self.display.item_inserted(position, record);
        }

        tracing::info!(count = self.records.len(), "inventory loaded");
        Ok(())
    }

    /// Read one record straight from the store.
    pub async fn lookup(
        &self,
        part_number: &PartNumber,
    ) -> Result<Option<InventoryRecord>, ControllerError> {
        Ok(self.store.get(part_number).await?)
    }

    pub async fn dispatch(&mut self, intent: InventoryIntent) -> Result<(), ControllerError> {
        tracing::debug!(intent = intent.name(), part_number = intent.target(), "dispatching");
        match intent {
            InventoryIntent::Add(input) => self.add_item(input).await,
            InventoryIntent::Delete { part_number } => self.delete_item(&part_number).await,
            InventoryIntent::Increase { part_number } => self.increase_quantity(&part_number).await,
            InventoryIntent::Decrease { part_number } => self.decrease_quantity(&part_number).await,
            InventoryIntent::EnableNotifications => {
                self.enable_notifications().await;
                Ok(())
            }
        }
    }

    pub async fn add_item(&mut self, input: NewRecord) -> Result<(), ControllerError> {
        let record = match InventoryRecord::try_from(input) {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!("rejected new item: {err}");
                self.report(UserMessage::error(format!("Failed to add item: {err}")));
                return Err(err.into());
            }
        };

        match self.store.add(&record).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(part_number = %record.part_number(), "duplicate part number");
                self.report(UserMessage::error("Failed to add item"));
                return Err(DomainError::duplicate_key(record.part_number().as_str()).into());
            }
            Err(err) => {
                tracing::error!(part_number = %record.part_number(), "failed to add item: {err}");
                self.report(UserMessage::error("Failed to add item"));
                return Err(err.into());
            }
        }

        tracing::info!(
            part_number = %record.part_number(),
            quantity = record.quantity(),
            "item added"
        );

        let name = record.name().to_string();
        let quantity = record.quantity();
        self.records.push(record);
        let position = self.records.len() - 1;
        self.display.item_inserted(position, &self.records[position]);

        self.notify_low_stock(&name, quantity).await;
        self.report(UserMessage::info(format!("Added: {name}")));
        Ok(())
    }

    pub async fn delete_item(&mut self, part_number: &PartNumber) -> Result<(), ControllerError> {
        let Some(position) = self.position_of(part_number) else {
            tracing::warn!(part_number = %part_number, "delete of unknown part");
            self.report(UserMessage::error("Failed to delete item"));
            return Err(DomainError::not_found(part_number.as_str()).into());
        };

        match self.store.delete(part_number).await {
            Ok(true) => {
                self.records.remove(position);
                self.display.item_removed(position);
                tracing::info!(part_number = %part_number, "item deleted");
                self.report(UserMessage::info("Item deleted"));
                Ok(())
            }
            Ok(false) => {
                tracing::warn!(part_number = %part_number, "store has no such part");
                self.report(UserMessage::error("Failed to delete item"));
                Err(DomainError::not_found(part_number.as_str()).into())
            }
            Err(err) => {
                tracing::error!(part_number = %part_number, "failed to delete item: {err}");
                self.report(UserMessage::error("Failed to delete item"));
                Err(err.into())
            }
        }
    }

    pub async fn increase_quantity(
        &mut self,
        part_number: &PartNumber,
    ) -> Result<(), ControllerError> {
        let position = self.require_position(part_number)?;
        let quantity = match self.records[position].incremented() {
            Ok(q) => q,
            Err(err) => {
                self.report(UserMessage::error("Failed to update quantity"));
                return Err(err.into());
            }
        };

        self.write_quantity(position, quantity).await
    }

    pub async fn decrease_quantity(
        &mut self,
        part_number: &PartNumber,
    ) -> Result<(), ControllerError> {
        let position = self.require_position(part_number)?;
        let quantity = match self.records[position].decremented() {
            Ok(q) => q,
            Err(err) => {
                tracing::warn!(part_number = %part_number, "decrement below zero rejected");
                self.report(UserMessage::error("Quantity cannot be negative"));
                return Err(err.into());
            }
        };

        self.write_quantity(position, quantity).await?;

        let name = self.records[position].name().to_string();
        self.notify_low_stock(&name, quantity).await;
        Ok(())
    }

    /// Alert on a low quantity if the policy says so.
    ///
    /// Never fails: a refused alert is reported to the user and returned as
    /// `AlertOutcome::Failed`, and nothing already written is undone.
    pub async fn notify_low_stock(&mut self, name: &str, quantity: u32) -> AlertOutcome {
        if !self.policy.should_alert(quantity) {
            return AlertOutcome::NotNeeded;
        }

        tracing::info!(item = name, quantity, threshold = self.policy.threshold(), "low stock");

        if !self.gateway.is_authorized() {
            self.report(UserMessage::warning("Low stock! Enable SMS for alerts."));
            return AlertOutcome::Fallback;
        }

        self.send_and_report(&alert_message(name, quantity)).await
    }

    /// Turn on text alerts, asking for permission if it has not been decided yet.
    pub async fn enable_notifications(&mut self) -> AuthorizationState {
        if self.gateway.is_authorized() {
            self.send_and_report(ENABLED_MESSAGE).await;
            return self.gateway.state();
        }

        match self.gateway.request_authorization().await {
            AuthorizationOutcome::Granted => {
                self.send_and_report(GRANTED_MESSAGE).await;
                self.report(UserMessage::info("SMS permission granted!"));
            }
            AuthorizationOutcome::Denied => {
                self.report(UserMessage::warning(
                    "SMS Permission Denied. Notifications disabled.",
                ));
            }
        }
        self.gateway.state()
    }

    async fn send_and_report(&mut self, message: &str) -> AlertOutcome {
        match self.gateway.send(message).await {
            Ok(()) => {
                self.report(UserMessage::info("Alert sent via SMS!"));
                AlertOutcome::Sent
            }
            Err(err) => {
                tracing::error!("failed to send text alert: {err}");
                self.report(UserMessage::error(format!("Failed to send SMS: {err}")));
                AlertOutcome::Failed(err)
            }
        }
    }

    /// Persist `quantity` for the record at `position`, then mirror it.
    async fn write_quantity(&mut self, position: usize, quantity: u32) -> Result<(), ControllerError> {
        let part_number = self.records[position].part_number().clone();

        let result = self.store.update_quantity(&part_number, quantity).await;
        match result {
            Ok(true) => {
                self.records[position].set_quantity(quantity);
                self.display.item_changed(position, &self.records[position]);
                tracing::info!(part_number = %part_number, quantity, "quantity updated");
                Ok(())
            }
            Ok(false) => {
                tracing::warn!(part_number = %part_number, "store has no such part");
                self.report(UserMessage::error("Failed to update quantity"));
                Err(DomainError::not_found(part_number.as_str()).into())
            }
            Err(err) => {
                tracing::error!(part_number = %part_number, "failed to update quantity: {err}");
                self.report(UserMessage::error("Failed to update quantity"));
                Err(err.into())
            }
        }
    }

    fn position_of(&self, part_number: &PartNumber) -> Option<usize> {
        self.records.iter().position(|r| r.is_identified_by(part_number))
    }

    fn require_position(&mut self, part_number: &PartNumber) -> Result<usize, ControllerError> {
        match self.position_of(part_number) {
            Some(position) => Ok(position),
            None => {
                tracing::warn!(part_number = %part_number, "update of unknown part");
                self.report(UserMessage::error("Failed to update quantity"));
                Err(DomainError::not_found(part_number.as_str()).into())
            }
        }
    }

    fn report(&mut self, message: UserMessage) {
        self.display.show_message(&message);
    }
}

impl<D> core::fmt::Debug for InventoryController<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InventoryController")
            .field("gateway", &self.gateway)
            .field("policy", &self.policy)
            .field("records", &self.records.len())
            .finish_non_exhaustive()
    }
}
