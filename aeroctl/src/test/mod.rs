//! End-to-end tests: a real server on a loopback port, driven through [`ConsoleClient`].

use crate::Application;
use crate::api::models::certification::{AuditDecision, AuditRequest, RealnameListQuery, VerificationStatus};
use crate::api::models::pagination::PageRequest;
use crate::api::models::pilot::PilotListQuery;
use crate::client::{ClientError, ConsoleClient};
use crate::test_utils::create_test_config;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use url::Url;

struct RunningServer {
    client: ConsoleClient,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<anyhow::Result<()>>,
}

impl RunningServer {
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Application::new(create_test_config()).expect("Failed to create application");

        let (shutdown, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(app.serve_on(listener, async {
            let _ = rx.await;
        }));

        let client = ConsoleClient::new(Url::parse(&format!("http://{addr}")).unwrap()).unwrap();
        Self {
            client,
            shutdown,
            handle,
        }
    }

    async fn stop(self) {
        let _ = self.shutdown.send(());
        self.handle.await.unwrap().unwrap();
    }
}

/// Lists, audits and re-reads a record over HTTP, the way the console does.
#[test_log::test(tokio::test)]
async fn test_e2e_realname_review_flow() {
    let server = RunningServer::start().await;
    let client = &server.client;

    let page = client.realname_list(&RealnameListQuery::default()).await.unwrap();
    assert_eq!(page.total, 20);
    assert_eq!(page.list.len(), 10);
    assert_eq!(page.current_page, 1);

    let target = page.list[0].clone();
    let message = client
        .audit_realname(&AuditRequest {
            id: target.id,
            status: AuditDecision::Rejected,
            reject_reason: Some("Face photo does not match".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(message, "Verification rejected");

    let record = client.realname_detail(target.id).await.unwrap();
    assert_eq!(record.status, VerificationStatus::Rejected);
    assert_eq!(record.reject_reason.as_deref(), Some("Face photo does not match"));
    assert_eq!(record.id_card, target.id_card);

    let rejected = client
        .realname_list(&RealnameListQuery {
            status: Some("rejected".to_string()),
            pagination: PageRequest::new(1, 100),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(rejected.list.iter().any(|r| r.id == target.id));
    assert!(rejected.list.iter().all(|r| r.status == VerificationStatus::Rejected));

    server.stop().await;
}

#[test_log::test(tokio::test)]
async fn test_e2e_missing_records() {
    let server = RunningServer::start().await;

    let err = server.client.realname_detail(999).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound { .. }), "got {err:?}");

    let err = server
        .client
        .audit_realname(&AuditRequest {
            id: 999,
            status: AuditDecision::Approved,
            reject_reason: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound { .. }), "got {err:?}");

    server.stop().await;
}

#[test_log::test(tokio::test)]
async fn test_e2e_navigation_and_pilots() {
    let server = RunningServer::start().await;

    let routes = server.client.navigation_routes().await.unwrap();
    assert_eq!(routes, crate::navigation::route_table());

    // Served from fixtures, but through the same client
    let pilots = server.client.pilot_list(&PilotListQuery::default()).await.unwrap();
    assert_eq!(pilots.total, 5);

    server.stop().await;
}
