//! Pilot certification calls.
//!
//! There is no pilot backend yet, so these calls run locally over a fixed set of five records
//! with the same filter and pagination rules as the realname list. Audits report the outcome but
//! change nothing.

use super::{ClientError, ConsoleClient};
use crate::api::models::certification::VerificationStatus;
use crate::api::models::pagination::{DEFAULT_PAGE_SIZE, Page};
use crate::api::models::pilot::{AuditPilotRequest, PilotListQuery, PilotVerification};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

const PLACEHOLDER_IMAGE: &str = "https://picsum.photos/400/300";

struct PilotFixture {
    id: i64,
    name: &'static str,
    certificate_no: &'static str,
    certificate_type: &'static str,
    submit_time: NaiveDateTime,
    expire_time: NaiveDate,
    status: VerificationStatus,
    reject_reason: Option<&'static str>,
}

const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid fixture date"),
    }
}

const fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    match date.and_hms_opt(hour, minute, 0) {
        Some(time) => time,
        None => panic!("invalid fixture time"),
    }
}

const PILOTS: [PilotFixture; 5] = [
    PilotFixture {
        id: 1,
        name: "Zhang San",
        certificate_no: "RPAS-2023-001",
        certificate_type: "UAV pilot certificate",
        submit_time: at(date(2023, 12, 1), 10, 0),
        expire_time: date(2025, 12, 1),
        status: VerificationStatus::Pending,
        reject_reason: None,
    },
    PilotFixture {
        id: 2,
        name: "Li Si",
        certificate_no: "RPAS-2023-002",
        certificate_type: "UAV pilot rating certificate",
        submit_time: at(date(2023, 12, 2), 11, 30),
        expire_time: date(2025, 12, 2),
        status: VerificationStatus::Approved,
        reject_reason: None,
    },
    PilotFixture {
        id: 3,
        name: "Wang Wu",
        certificate_no: "RPAS-2023-003",
        certificate_type: "UAV pilot licence",
        submit_time: at(date(2023, 12, 3), 14, 20),
        expire_time: date(2025, 12, 3),
        status: VerificationStatus::Rejected,
        reject_reason: Some("Certificate details incomplete, please provide proof of qualification"),
    },
    PilotFixture {
        id: 4,
        name: "Zhao Liu",
        certificate_no: "RPAS-2023-004",
        certificate_type: "UAV pilot certificate",
        submit_time: at(date(2023, 12, 4), 9, 15),
        expire_time: date(2025, 12, 4),
        status: VerificationStatus::Pending,
        reject_reason: None,
    },
    PilotFixture {
        id: 5,
        name: "Qian Qi",
        certificate_no: "RPAS-2023-005",
        certificate_type: "UAV pilot rating certificate",
        submit_time: at(date(2023, 12, 5), 16, 40),
        expire_time: date(2025, 12, 5),
        status: VerificationStatus::Approved,
        reject_reason: None,
    },
];

impl From<&PilotFixture> for PilotVerification {
    fn from(fixture: &PilotFixture) -> Self {
        Self {
            id: fixture.id,
            name: fixture.name.to_string(),
            certificate_no: fixture.certificate_no.to_string(),
            certificate_type: fixture.certificate_type.to_string(),
            submit_time: fixture.submit_time,
            expire_time: fixture.expire_time,
            status: fixture.status,
            reject_reason: fixture.reject_reason.map(str::to_string),
            certificate_image: PLACEHOLDER_IMAGE.to_string(),
            id_card_front_image: PLACEHOLDER_IMAGE.to_string(),
            id_card_back_image: PLACEHOLDER_IMAGE.to_string(),
            qualification_image: PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

/// The fixed pilot records, in id order.
pub fn pilot_records() -> Vec<PilotVerification> {
    PILOTS.iter().map(PilotVerification::from).collect()
}

impl ConsoleClient {
    /// Filter and page the pilot records locally.
    pub async fn pilot_list(&self, query: &PilotListQuery) -> Result<Page<PilotVerification>, ClientError> {
        let records = pilot_records();
        let page = query.pagination.resolve(DEFAULT_PAGE_SIZE);
        Ok(query.filters().paginate(&records, page))
    }

    /// Report the outcome of a pilot audit. Nothing is stored.
    pub async fn audit_pilot(&self, request: &AuditPilotRequest) -> Result<String, ClientError> {
        debug!(id = request.id, status = ?request.status, "Simulated pilot audit");
        Ok(request.status.outcome_message().to_string())
    }
}
