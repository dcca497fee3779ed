//! Low-stock alert policy.

use serde::{Deserialize, Serialize};

/// Quantity below which an alert fires unless configured otherwise.
pub const DEFAULT_THRESHOLD: u32 = 3;

/// `true` when `quantity` is strictly below `threshold`.
pub fn should_alert(quantity: u32, threshold: u32) -> bool {
    quantity < threshold
}

/// Text of the alert sent for a low-stock record.
pub fn alert_message(name: &str, quantity: u32) -> String {
    format!("Low inventory alert for {name}: only {quantity} left!")
}

/// Configured low-stock threshold.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockPolicy {
    threshold: u32,
}

impl LowStockPolicy {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn should_alert(&self, quantity: u32) -> bool {
        should_alert(quantity, self.threshold)
    }
}

impl Default for LowStockPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}
