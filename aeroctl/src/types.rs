//! Common identifier types.
//!
//! Certification records use sequential numeric ids, the console's device catalogue uses
//! opaque string ids.

pub type RealnameId = i64;
pub type PilotId = i64;
pub type DeviceId = String;
pub type InventoryRecordId = String;
