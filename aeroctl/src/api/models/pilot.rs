//! API request/response models for pilot (drone operator) certification.

use super::certification::{AuditRequest, VerificationStatus};
use super::pagination::PageRequest;
use crate::query::ListQuery;
use crate::types::PilotId;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A pilot certificate submission awaiting or past review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PilotVerification {
    pub id: PilotId,
    pub name: String,
    #[schema(example = "RPAS-2023-001")]
    pub certificate_no: String,
    pub certificate_type: String,
    #[serde(with = "console_datetime")]
    #[schema(value_type = String, example = "2023-12-01 10:00:00")]
    pub submit_time: NaiveDateTime,
    #[schema(value_type = String, format = Date)]
    pub expire_time: NaiveDate,
    pub status: VerificationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<String>,
    pub certificate_image: String,
    pub id_card_front_image: String,
    pub id_card_back_image: String,
    pub qualification_image: String,
}

/// Filters for the pilot list. All filters are optional and combined with AND.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PilotListQuery {
    /// Substring of the pilot name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Substring of the certificate number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_no: Option<String>,
    /// Exact status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    #[schema(inline)]
    pub pagination: PageRequest,
}

impl PilotListQuery {
    pub fn filters(&self) -> ListQuery<'_, PilotVerification> {
        ListQuery::new()
            .contains(self.name.as_deref(), |p: &PilotVerification| p.name.as_str())
            .contains(self.certificate_no.as_deref(), |p: &PilotVerification| p.certificate_no.as_str())
            .equals(self.status.as_deref(), |p: &PilotVerification| p.status.as_str())
    }
}

/// Pilot audits carry the same fields as realname audits.
pub type AuditPilotRequest = AuditRequest;

/// `YYYY-MM-DD HH:MM:SS`, the console's display format for submission times.
mod console_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
