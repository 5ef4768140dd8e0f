//! Realname certification and navigation calls.

use super::{ClientError, ConsoleClient};
use crate::api::models::certification::{AuditRequest, RealnameListQuery, RealnameVerification};
use crate::api::models::pagination::Page;
use crate::endpoints;
use crate::navigation::RouteRecord;
use crate::types::RealnameId;

impl ConsoleClient {
    /// `POST /certification/realname/list`
    pub async fn realname_list(&self, query: &RealnameListQuery) -> Result<Page<RealnameVerification>, ClientError> {
        let url = self.url(&endpoints::REALNAME_LIST, &[])?;
        self.fetch_data(&endpoints::REALNAME_LIST, url, Some(query)).await
    }

    /// `GET /certification/realname/detail/{id}`; a missing record is [`ClientError::NotFound`].
    pub async fn realname_detail(&self, id: RealnameId) -> Result<RealnameVerification, ClientError> {
        let url = self.url(&endpoints::REALNAME_DETAIL, &[&id])?;
        self.fetch_data(&endpoints::REALNAME_DETAIL, url, None::<&()>).await
    }

    /// `POST /certification/realname/audit`, returning the outcome message.
    pub async fn audit_realname(&self, request: &AuditRequest) -> Result<String, ClientError> {
        let url = self.url(&endpoints::REALNAME_AUDIT, &[])?;
        self.fetch_message(&endpoints::REALNAME_AUDIT, url, Some(request)).await
    }

    /// `GET /navigation/routes`
    pub async fn navigation_routes(&self) -> Result<Vec<RouteRecord>, ClientError> {
        let url = self.url(&endpoints::NAVIGATION_ROUTES, &[])?;
        self.fetch_data(&endpoints::NAVIGATION_ROUTES, url, None::<&()>).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::certification::{AuditDecision, VerificationStatus};
    use crate::api::models::pagination::PageRequest;
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn record_json(id: i64, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": "Zhang Wei",
            "idCard": "110105199003071234",
            "status": status,
            "createTime": "2024-05-01T08:00:00Z",
            "frontImage": "https://picsum.photos/400/300?random=1",
            "backImage": "https://picsum.photos/400/300?random=2",
            "faceImage": "https://picsum.photos/400/300?random=3"
        })
    }

    async fn client(server: &MockServer) -> ConsoleClient {
        ConsoleClient::new(Url::parse(&server.uri()).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_list_posts_filters_and_decodes_page() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/certification/realname/list"))
            .and(body_json(json!({ "status": "approved", "currentPage": 1, "pageSize": 2 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": { "list": [record_json(4, "approved")], "total": 1, "pageSize": 2, "currentPage": 1 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let query = RealnameListQuery {
            status: Some("approved".to_string()),
            pagination: PageRequest::new(1, 2),
            ..Default::default()
        };
        let page = client(&server).await.realname_list(&query).await.unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.list[0].id, 4);
        assert_eq!(page.list[0].status, VerificationStatus::Approved);
    }

    #[tokio::test]
    async fn test_detail_substitutes_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/certification/realname/detail/12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": record_json(12, "pending")
            })))
            .mount(&server)
            .await;

        let record = client(&server).await.realname_detail(12).await.unwrap();
        assert_eq!(record.id, 12);
        assert_eq!(record.reject_reason, None);
    }

    #[tokio::test]
    async fn test_detail_not_found_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/certification/realname/detail/999"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "success": false,
                "message": "No matching realname verification record found"
            })))
            .mount(&server)
            .await;

        let err = client(&server).await.realname_detail(999).await.unwrap_err();
        match err {
            ClientError::NotFound { message } => {
                assert_eq!(message, "No matching realname verification record found")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_audit_returns_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/certification/realname/audit"))
            .and(body_json(json!({ "id": 3, "status": "rejected", "rejectReason": "Blurry photo" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Verification rejected"
            })))
            .mount(&server)
            .await;

        let message = client(&server)
            .await
            .audit_realname(&AuditRequest {
                id: 3,
                status: AuditDecision::Rejected,
                reject_reason: Some("Blurry photo".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(message, "Verification rejected");
    }

    #[tokio::test]
    async fn test_non_envelope_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/certification/realname/audit"))
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream connect error"))
            .mount(&server)
            .await;

        let err = client(&server)
            .await
            .audit_realname(&AuditRequest {
                id: 1,
                status: AuditDecision::Approved,
                reject_reason: None,
            })
            .await
            .unwrap_err();
        match err {
            ClientError::Decode { status, detail } => {
                assert_eq!(status.as_u16(), 502);
                assert!(detail.contains("upstream connect error"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bad_request_envelope_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/certification/realname/list"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "success": false,
                "message": "Failed to deserialize the JSON body into the target type"
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .await
            .realname_list(&RealnameListQuery::default())
            .await
            .unwrap_err();
        match err {
            ClientError::Rejected { status, message } => {
                assert_eq!(status.as_u16(), 400);
                assert!(message.starts_with("Failed to deserialize"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
