use serde::{Deserialize, Serialize};

use stockwatch_core::{DomainError, DomainResult, Entity, PartNumber};

/// Raw input handed over by the add-item form.
///
/// Nothing here is validated yet; `InventoryRecord::try_from` does that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub part_number: String,
    pub name: String,
    pub bin: String,
    pub quantity: i64,
}

impl NewRecord {
    pub fn new(
        part_number: impl Into<String>,
        name: impl Into<String>,
        bin: impl Into<String>,
        quantity: i64,
    ) -> Self {
        Self {
            part_number: part_number.into(),
            name: name.into(),
            bin: bin.into(),
            quantity,
        }
    }
}

/// One inventory line item, keyed by part number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    part_number: PartNumber,
    name: String,
    bin: String,
    quantity: u32,
}

impl InventoryRecord {
    pub fn new(
        part_number: PartNumber,
        name: impl Into<String>,
        bin: impl Into<String>,
        quantity: u32,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(Self {
            part_number,
            name,
            bin: bin.into(),
            quantity,
        })
    }

    pub fn part_number(&self) -> &PartNumber {
        &self.part_number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bin(&self) -> &str {
        &self.bin
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Overwrite the quantity. Only the controller calls this, after the
    /// store has accepted the same value.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    /// Quantity after adding one unit.
    pub fn incremented(&self) -> DomainResult<u32> {
        self.quantity
            .checked_add(1)
            .ok_or_else(|| DomainError::validation("quantity overflow"))
    }

    /// Quantity after removing one unit; rejected at zero.
    pub fn decremented(&self) -> DomainResult<u32> {
        self.quantity.checked_sub(1).ok_or_else(|| {
            DomainError::negative_quantity(format!("{} is already at 0", self.part_number))
        })
    }
}

impl Entity for InventoryRecord {
    type Id = PartNumber;

    fn id(&self) -> &Self::Id {
        &self.part_number
    }
}

impl TryFrom<NewRecord> for InventoryRecord {
    type Error = DomainError;

    fn try_from(input: NewRecord) -> Result<Self, Self::Error> {
        let part_number = PartNumber::new(input.part_number)?;
        if input.quantity < 0 {
            return Err(DomainError::negative_quantity(format!(
                "{part_number} entered with quantity {}",
                input.quantity
            )));
        }
        let quantity = u32::try_from(input.quantity)
            .map_err(|_| DomainError::validation("quantity too large"))?;
        Self::new(part_number, input.name, input.bin, quantity)
    }
}
