//! In-memory realname verification store.

use crate::api::models::certification::{AuditRequest, RealnameListQuery, RealnameVerification, VerificationStatus};
use crate::api::models::pagination::Page;
use crate::config::FixturesConfig;
use crate::errors::{Error, Result};
use crate::store::generator;
use crate::types::RealnameId;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rand::prelude::RngExt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::{debug, info};

/// Realname records keyed by id.
///
/// Cloning is cheap and every clone shares the same records. An audit holds the record's shard
/// lock for the whole lookup-and-update, so concurrent audits of one id never interleave.
#[derive(Debug, Clone, Default)]
pub struct RealnameStore {
    records: Arc<DashMap<RealnameId, RealnameVerification>>,
}

impl RealnameStore {
    pub fn new(records: impl IntoIterator<Item = RealnameVerification>) -> Self {
        Self {
            records: Arc::new(records.into_iter().map(|record| (record.id, record)).collect()),
        }
    }

    /// Build a store of generated fixtures with an explicit random source.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, config: &FixturesConfig, now: DateTime<Utc>) -> Self {
        Self::new(generator::realname_records(rng, config, now))
    }

    /// Build a store of generated fixtures, seeded from config when a seed is set.
    pub fn from_config(config: &FixturesConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        info!(count = config.realname_count, seed, "Generating realname fixtures");
        Self::generate(&mut StdRng::seed_from_u64(seed), config, Utc::now())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record, ordered by id.
    pub fn snapshot(&self) -> Vec<RealnameVerification> {
        let mut records: Vec<_> = self.records.iter().map(|entry| entry.value().clone()).collect();
        records.sort_by_key(|record| record.id);
        records
    }

    /// Filter by name, identity number and status, then page the result.
    pub fn list(&self, query: &RealnameListQuery, default_page_size: i64) -> Page<RealnameVerification> {
        let page = query.pagination.resolve(default_page_size);
        let records = self.snapshot();
        query.filters().paginate(&records, page)
    }

    pub fn get(&self, id: RealnameId) -> Result<RealnameVerification> {
        match self.records.get(&id) {
            Some(record) => Ok(record.value().clone()),
            None => {
                debug!(id, "Realname verification not found");
                Err(Error::realname_not_found(id))
            }
        }
    }

    /// Record an audit decision and return the outcome message.
    ///
    /// The status is always overwritten. Rejecting with a reason stores the reason; rejecting
    /// without one keeps whatever reason was there. Approving clears any earlier reason, since a
    /// reason only belongs to rejected records. A missing id changes nothing.
    pub fn audit(&self, request: &AuditRequest) -> Result<&'static str> {
        let Some(mut record) = self.records.get_mut(&request.id) else {
            debug!(id = request.id, "Audit target not found");
            return Err(Error::realname_not_found(request.id));
        };

        let previous = record.status;
        record.status = VerificationStatus::from(request.status);
        match record.status {
            VerificationStatus::Rejected => {
                if let Some(reason) = request.reject_reason.as_deref().filter(|r| !r.is_empty()) {
                    record.reject_reason = Some(reason.to_string());
                }
            }
            _ => record.reject_reason = None,
        }

        info!(id = request.id, from = %previous, to = %record.status, "Realname verification audited");
        Ok(request.status.outcome_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::certification::AuditDecision;
    use crate::api::models::pagination::PageRequest;

    fn store() -> RealnameStore {
        RealnameStore::generate(&mut StdRng::seed_from_u64(2024), &FixturesConfig::default(), Utc::now())
    }

    fn audit(id: RealnameId, status: AuditDecision, reason: Option<&str>) -> AuditRequest {
        AuditRequest {
            id,
            status,
            reject_reason: reason.map(str::to_string),
        }
    }

    #[test]
    fn test_approved_page_of_two() {
        let store = store();
        let approved = store
            .snapshot()
            .into_iter()
            .filter(|r| r.status == VerificationStatus::Approved)
            .count();

        let query = RealnameListQuery {
            status: Some("approved".to_string()),
            pagination: PageRequest::new(1, 2),
            ..Default::default()
        };
        let page = store.list(&query, 10);

        assert!(page.list.len() <= 2);
        assert_eq!(page.list.len(), approved.min(2));
        assert!(page.list.iter().all(|r| r.status == VerificationStatus::Approved));
        assert_eq!(page.total, approved);
        assert_eq!(page.page_size, 2);
        assert_eq!(page.current_page, 1);
    }

    #[test]
    fn test_list_defaults_and_order() {
        let store = store();
        let page = store.list(&RealnameListQuery::default(), 10);
        assert_eq!(page.total, 20);
        let ids: Vec<_> = page.list.iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_list_out_of_range_page() {
        let store = store();
        let query = RealnameListQuery {
            pagination: PageRequest::new(5, 10),
            ..Default::default()
        };
        let page = store.list(&query, 10);
        assert!(page.list.is_empty());
        assert_eq!(page.total, 20);
    }

    #[test]
    fn test_list_by_id_card_substring() {
        let store = store();
        let target = store.get(4).unwrap();
        let query = RealnameListQuery {
            id_card: Some(target.id_card[..14].to_string()),
            ..Default::default()
        };
        let page = store.list(&query, 10);
        assert!(page.list.iter().any(|r| r.id == 4));
        assert!(page.list.iter().all(|r| r.id_card.contains(&target.id_card[..14])));
    }

    #[test]
    fn test_detail_missing_is_not_found() {
        let store = store();
        assert!(store.get(1).is_ok());
        assert!(matches!(store.get(999), Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_reject_sets_reason() {
        let store = store();
        let message = store
            .audit(&audit(3, AuditDecision::Rejected, Some("Blurry photo")))
            .unwrap();
        assert_eq!(message, "Verification rejected");

        let record = store.get(3).unwrap();
        assert_eq!(record.status, VerificationStatus::Rejected);
        assert_eq!(record.reject_reason.as_deref(), Some("Blurry photo"));
    }

    #[test]
    fn test_reject_without_reason_keeps_previous() {
        let store = store();
        store.audit(&audit(3, AuditDecision::Rejected, Some("first"))).unwrap();
        store.audit(&audit(3, AuditDecision::Rejected, None)).unwrap();
        assert_eq!(store.get(3).unwrap().reject_reason.as_deref(), Some("first"));
    }

    #[test]
    fn test_approve_after_reject_clears_reason() {
        let store = store();
        store.audit(&audit(5, AuditDecision::Rejected, Some("mismatch"))).unwrap();
        let message = store.audit(&audit(5, AuditDecision::Approved, None)).unwrap();
        assert_eq!(message, "Verification approved");

        let record = store.get(5).unwrap();
        assert_eq!(record.status, VerificationStatus::Approved);
        assert_eq!(record.reject_reason, None);
    }

    #[test]
    fn test_audit_missing_id_changes_nothing() {
        let store = store();
        let before = store.snapshot();
        let result = store.audit(&audit(999, AuditDecision::Rejected, Some("nope")));
        assert!(matches!(result, Err(Error::NotFound { .. })));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_audit_is_idempotent() {
        let store = store();
        let request = audit(7, AuditDecision::Rejected, Some("expired card"));
        store.audit(&request).unwrap();
        let once = store.snapshot();
        store.audit(&request).unwrap();
        assert_eq!(store.snapshot(), once);
    }

    #[tokio::test]
    async fn test_concurrent_audits_of_one_record() {
        let store = store();
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.audit(&audit(9, AuditDecision::Rejected, Some("same reason")))
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let record = store.get(9).unwrap();
        assert_eq!(record.status, VerificationStatus::Rejected);
        assert_eq!(record.reject_reason.as_deref(), Some("same reason"));
        assert_eq!(store.len(), 20);
    }
}
