//! API request/response models for realname certification.

use super::pagination::PageRequest;
use crate::query::ListQuery;
use crate::types::RealnameId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Review state shared by realname and pilot certification records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Approved,
    Rejected,
}

impl VerificationStatus {
    pub const ALL: [VerificationStatus; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome an operator can record when auditing a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AuditDecision {
    Approved,
    Rejected,
}

impl AuditDecision {
    /// Message returned to the console once the decision is stored.
    pub fn outcome_message(&self) -> &'static str {
        match self {
            Self::Approved => "Verification approved",
            Self::Rejected => "Verification rejected",
        }
    }
}

impl From<AuditDecision> for VerificationStatus {
    fn from(decision: AuditDecision) -> Self {
        match decision {
            AuditDecision::Approved => Self::Approved,
            AuditDecision::Rejected => Self::Rejected,
        }
    }
}

/// A realname (identity card) verification submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RealnameVerification {
    pub id: RealnameId,
    pub name: String,
    /// Identity number as submitted. Fixture values are not checksum-valid.
    #[schema(example = "110105199003071234")]
    pub id_card: String,
    pub status: VerificationStatus,
    pub create_time: DateTime<Utc>,
    /// Front of the identity card
    pub front_image: String,
    /// Back of the identity card
    pub back_image: String,
    /// Face photo taken during submission
    pub face_image: String,
    /// Only meaningful while the record is rejected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<String>,
}

/// Filters for the realname list. All filters are optional and combined with AND.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RealnameListQuery {
    /// Substring of the applicant name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Substring of the identity number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_card: Option<String>,
    /// Exact status (`pending`, `approved`, `rejected`); unknown values match nothing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    #[schema(inline)]
    pub pagination: PageRequest,
}

impl RealnameListQuery {
    /// The conjunctive filter described by this query.
    pub fn filters(&self) -> ListQuery<'_, RealnameVerification> {
        ListQuery::new()
            .contains(self.name.as_deref(), |r: &RealnameVerification| r.name.as_str())
            .contains(self.id_card.as_deref(), |r: &RealnameVerification| r.id_card.as_str())
            .equals(self.status.as_deref(), |r: &RealnameVerification| r.status.as_str())
    }
}

/// Audit command for a realname record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditRequest {
    pub id: RealnameId,
    pub status: AuditDecision,
    /// Stored only when rejecting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<String>,
}
