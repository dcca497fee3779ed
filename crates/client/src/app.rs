//! Wiring: turn a `ClientConfig` into a ready controller.

use std::sync::Arc;

use anyhow::Context;

use stockwatch_infra::{
    AuthorizationOutcome, HttpSmsTransport, LogTransport, NotificationGateway, RecordStore,
    SmsTransport, SqliteRecordStore, StaticPrompt,
};
use stockwatch_inventory::LowStockPolicy;

use crate::config::{ClientConfig, StoreLocation};
use crate::controller::InventoryController;
use crate::display::ListDisplay;

pub async fn open_store(config: &ClientConfig) -> anyhow::Result<Arc<dyn RecordStore>> {
    let store = match &config.store {
        StoreLocation::Memory => SqliteRecordStore::in_memory()
            .await
            .context("failed to open in-memory record store")?,
        StoreLocation::File(path) => SqliteRecordStore::open(path)
            .await
            .with_context(|| format!("failed to open record store at {path:?}"))?,
    };
    Ok(Arc::new(store))
}

pub fn build_transport(config: &ClientConfig) -> anyhow::Result<Arc<dyn SmsTransport>> {
    match &config.sms_webhook_url {
        Some(url) => {
            let mut transport = HttpSmsTransport::new(url.clone(), config.sms_timeout)
                .context("failed to build SMS webhook transport")?;
            if let Some(token) = &config.sms_webhook_token {
                transport = transport.with_token(token.clone());
            }
            tracing::info!(endpoint = %transport.endpoint(), "text alerts go to SMS webhook");
            Ok(Arc::new(transport))
        }
        None => {
            tracing::info!("no SMS webhook configured; text alerts are only logged");
            Ok(Arc::new(LogTransport))
        }
    }
}

pub fn build_gateway(config: &ClientConfig, transport: Arc<dyn SmsTransport>) -> NotificationGateway {
    let outcome = if config.sms_authorized {
        AuthorizationOutcome::Granted
    } else {
        AuthorizationOutcome::Denied
    };
    NotificationGateway::new(
        config.alert_recipient.clone(),
        transport,
        Arc::new(StaticPrompt::new(outcome)),
    )
}

/// Build a controller and load the inventory into it.
///
/// Fails if the store cannot be opened or read.
pub async fn build_controller<D: ListDisplay>(
    config: &ClientConfig,
    display: D,
) -> anyhow::Result<InventoryController<D>> {
    let store = open_store(config).await?;
    let gateway = build_gateway(config, build_transport(config)?);
    let policy = LowStockPolicy::new(config.low_stock_threshold);

    let mut controller = InventoryController::new(store, gateway, policy, display);
    controller
        .load_all()
        .await
        .context("failed to load inventory")?;
    Ok(controller)
}
