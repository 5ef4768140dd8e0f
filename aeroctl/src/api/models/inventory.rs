//! Inventory records for rentable devices.

use super::device::DeviceOption;
use crate::types::{DeviceId, InventoryRecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InventoryStatus {
    InStock,
    OutOfStock,
    LowStock,
}

/// Thresholds used to derive an [`InventoryStatus`] from a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryPolicy {
    /// Quantities at or below this (but above zero) count as low stock
    pub low_stock_threshold: u32,
}

impl Default for InventoryPolicy {
    fn default() -> Self {
        Self { low_stock_threshold: 5 }
    }
}

impl InventoryPolicy {
    pub fn status_for(&self, quantity: u32) -> InventoryStatus {
        if quantity == 0 {
            InventoryStatus::OutOfStock
        } else if quantity <= self.low_stock_threshold {
            InventoryStatus::LowStock
        } else {
            InventoryStatus::InStock
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("cannot remove {requested} units from {device_id}, only {available} available")]
    InsufficientStock {
        device_id: DeviceId,
        available: u32,
        requested: u64,
    },

    #[error("quantity overflow for {device_id}")]
    Overflow { device_id: DeviceId },
}

/// Stock held for one device at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub id: InventoryRecordId,
    pub device_id: DeviceId,
    pub device_name: String,
    pub quantity: u32,
    pub status: InventoryStatus,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub update_time: DateTime<Utc>,
}

impl InventoryRecord {
    pub fn new(
        id: impl Into<InventoryRecordId>,
        device: &DeviceOption,
        quantity: u32,
        location: impl Into<String>,
        policy: &InventoryPolicy,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            device_id: device.id.clone(),
            device_name: device.name.clone(),
            quantity,
            status: policy.status_for(quantity),
            location: location.into(),
            note: None,
            update_time: now,
        }
    }

    /// Apply a signed stock movement.
    ///
    /// The status is re-derived and `update_time` bumped. A movement that would take the
    /// quantity below zero is refused and leaves the record untouched.
    pub fn adjust(&mut self, delta: i64, policy: &InventoryPolicy, now: DateTime<Utc>) -> Result<(), InventoryError> {
        let quantity = i64::from(self.quantity) + delta;
        if quantity < 0 {
            return Err(InventoryError::InsufficientStock {
                device_id: self.device_id.clone(),
                available: self.quantity,
                requested: delta.unsigned_abs(),
            });
        }
        self.quantity = u32::try_from(quantity).map_err(|_| InventoryError::Overflow {
            device_id: self.device_id.clone(),
        })?;
        self.status = policy.status_for(self.quantity);
        self.update_time = now;
        Ok(())
    }

    /// Re-derive the status after a policy change without touching the quantity.
    pub fn restatus(&mut self, policy: &InventoryPolicy) {
        self.status = policy.status_for(self.quantity);
    }
}
