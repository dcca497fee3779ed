//! User intents dispatched to the inventory controller.

use serde::{Deserialize, Serialize};

use stockwatch_core::PartNumber;

use crate::record::NewRecord;

/// One user-triggered action against the inventory list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InventoryIntent {
    Add(NewRecord),
    Delete { part_number: PartNumber },
    Increase { part_number: PartNumber },
    Decrease { part_number: PartNumber },
    EnableNotifications,
}

impl InventoryIntent {
    /// Part number the intent targets, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            InventoryIntent::Add(input) => Some(input.part_number.as_str()),
            InventoryIntent::Delete { part_number }
            | InventoryIntent::Increase { part_number }
            | InventoryIntent::Decrease { part_number } => Some(part_number.as_str()),
            InventoryIntent::EnableNotifications => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InventoryIntent::Add(_) => "inventory.add",
            InventoryIntent::Delete { .. } => "inventory.delete",
            InventoryIntent::Increase { .. } => "inventory.increase",
            InventoryIntent::Decrease { .. } => "inventory.decrease",
            InventoryIntent::EnableNotifications => "notifications.enable",
        }
    }
}
