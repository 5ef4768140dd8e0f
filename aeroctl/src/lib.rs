//! # aeroctl: backend and client for the drone-rental admin console
//!
//! `aeroctl` serves the mock backend the admin console talks to while the real backend is not
//! available, and ships the typed client the console's data layer is built on.
//!
//! ## What It Does
//!
//! - **Realname certification**: an in-memory store of generated identity verification records
//!   with list (filter and page), detail and audit endpoints.
//! - **Pilot certification**: a client-side simulation over a fixed set of pilot records, using
//!   the same filter-then-paginate routine as the server.
//! - **Navigation**: the console's route table, also served as JSON.
//! - **Device catalogue and inventory**: data models with specification combination,
//!   validation, search and stock status derivation.
//!
//! ## Architecture
//!
//! - [`api`]: axum handlers and the wire models shared by server and client
//! - [`store`]: the in-memory realname store and its fixture generator
//! - [`query`]: the generic conjunctive filter and 1-based pagination
//! - [`client`]: reqwest-based client for every endpoint
//! - [`endpoints`]: method and path of each endpoint, used by both router and client
//! - [`navigation`]: the route table
//! - [`config`], [`telemetry`], [`errors`]: configuration, tracing and error mapping
//!
//! ## Running
//!
//! ```bash
//! aeroctl -f config.yaml
//! AEROCTL_PORT=8080 AEROCTL_FIXTURES__SEED=7 aeroctl
//! ```
//!
//! The OpenAPI document is served at `/api-docs/openapi.json` and rendered at `/docs`.

pub mod api;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod errors;
pub mod navigation;
pub mod openapi;
pub mod query;
pub mod store;
pub mod telemetry;
pub mod types;

#[cfg(test)]
mod test;
#[cfg(test)]
pub(crate) mod test_utils;

use crate::api::handlers::{certification, navigation as navigation_handlers};
use crate::config::CorsOrigin;
use crate::endpoints::Endpoint;
use crate::openapi::ApiDoc;
use crate::store::RealnameStore;
use axum::handler::Handler;
use axum::http::{self, HeaderValue, Method};
use axum::routing::{MethodFilter, get, on};
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use axum_prometheus::metrics_exporter_prometheus::PrometheusHandle;
use bon::Builder;
pub use config::Config;
use std::net::SocketAddr;
use std::sync::OnceLock;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Application state shared across all request handlers.
///
/// ```ignore
/// let state = AppState::builder()
///     .config(config)
///     .realname(RealnameStore::from_config(&config.fixtures))
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub config: Config,
    pub realname: RealnameStore,
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors_config = &config.cors;

    let allow_origin = if cors_config.allowed_origins.contains(&CorsOrigin::Wildcard) {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &cors_config.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                // Browsers send the bare origin, without the trailing slash `Url` adds
                origins.push(url.origin().ascii_serialization().parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(origins)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
        .allow_credentials(cors_config.allow_credentials);

    if let Some(max_age) = cors_config.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// The Prometheus recorder is process-global, so every router built in this process shares one
/// layer and handle.
fn metrics_pair() -> (PrometheusMetricLayer<'static>, PrometheusHandle) {
    static METRICS: OnceLock<(PrometheusMetricLayer<'static>, PrometheusHandle)> = OnceLock::new();
    METRICS.get_or_init(PrometheusMetricLayer::pair).clone()
}

/// Mount `handler` on the endpoint's method and path.
fn mount<H, T>(router: Router<AppState>, endpoint: &Endpoint, handler: H) -> anyhow::Result<Router<AppState>>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    let filter = MethodFilter::try_from(endpoint.method.clone())?;
    Ok(router.route(endpoint.path, on(filter, handler)))
}

/// Build the main application router with all endpoints and middleware.
///
/// - Realname certification and navigation endpoints
/// - `/healthz`, the OpenAPI document and the Scalar viewer
/// - Optional Prometheus metrics on `/internal/metrics`
/// - CORS and request tracing
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    let mut api_routes = Router::new();
    api_routes = mount(api_routes, &endpoints::REALNAME_LIST, certification::list_realname)?;
    api_routes = mount(api_routes, &endpoints::REALNAME_DETAIL, certification::get_realname)?;
    api_routes = mount(api_routes, &endpoints::REALNAME_AUDIT, certification::audit_realname)?;
    api_routes = mount(api_routes, &endpoints::NAVIGATION_ROUTES, navigation_handlers::list_routes)?;

    let router = api_routes
        .route("/healthz", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .with_state(state.clone())
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    let mut router = router.layer(create_cors_layer(&state.config)?);

    if state.config.enable_metrics {
        let (prometheus_layer, metric_handle) = metrics_pair();
        router = router
            .route("/internal/metrics", get(move || async move { metric_handle.render() }))
            .layer(prometheus_layer);
    }

    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// The console backend, ready to serve.
///
/// 1. **Create**: [`Application::new`] generates the fixtures and builds the router
/// 2. **Serve**: [`Application::serve`] binds the configured address and handles requests until
///    the shutdown future resolves
pub struct Application {
    router: Router,
    app_state: AppState,
    config: Config,
}

impl Application {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let realname = RealnameStore::from_config(&config.fixtures);
        Self::with_store(config, realname)
    }

    /// Build the application around an existing store.
    pub fn with_store(config: Config, realname: RealnameStore) -> anyhow::Result<Self> {
        debug!("Starting aeroctl with configuration: {:#?}", config);

        let app_state = AppState::builder().config(config.clone()).realname(realname).build();
        let router = build_router(&app_state)?;

        Ok(Self {
            router,
            app_state,
            config,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.app_state
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router.into_make_service()).expect("Failed to create test server")
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.bind_address()).await?;
        self.serve_on(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let local_addr: SocketAddr = listener.local_addr()?;
        info!(
            records = self.app_state.realname.len(),
            "aeroctl listening on http://{}, docs at http://{}/docs", local_addr, local_addr
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_config;
    use axum::http::StatusCode;
    use url::Url;

    #[test_log::test(tokio::test)]
    async fn test_healthz_and_docs() {
        let server = Application::new(create_test_config()).unwrap().into_test_server();

        let response = server.get("/healthz").await;
        response.assert_status_ok();
        response.assert_text("OK");

        let response = server.get("/api-docs/openapi.json").await;
        response.assert_status_ok();
        assert!(response.text().contains("\"/certification/realname/list\""));

        server.get("/docs").await.assert_status_ok();
    }

    #[test_log::test(tokio::test)]
    async fn test_metrics_endpoint_toggle() {
        let server = Application::new(create_test_config()).unwrap().into_test_server();
        server.get("/internal/metrics").await.assert_status(StatusCode::NOT_FOUND);

        let mut config = create_test_config();
        config.enable_metrics = true;
        let server = Application::new(config).unwrap().into_test_server();
        server.get("/healthz").await.assert_status_ok();
        server.get("/internal/metrics").await.assert_status_ok();
    }

    #[test_log::test(tokio::test)]
    async fn test_cors_allows_configured_origin() {
        let mut config = create_test_config();
        config.cors.allowed_origins = vec![CorsOrigin::Url(Url::parse("http://localhost:8848").unwrap())];
        config.cors.allow_credentials = true;
        let server = Application::new(config).unwrap().into_test_server();

        let response = server
            .get("/healthz")
            .add_header(http::header::ORIGIN, HeaderValue::from_static("http://localhost:8848"))
            .await;
        assert_eq!(
            response.header(http::header::ACCESS_CONTROL_ALLOW_ORIGIN),
            HeaderValue::from_static("http://localhost:8848")
        );

        let response = server
            .get("/healthz")
            .add_header(http::header::ORIGIN, HeaderValue::from_static("http://evil.example"))
            .await;
        assert!(
            response
                .maybe_header(http::header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }

    #[test]
    fn test_state_is_shared_with_router() {
        let app = Application::new(create_test_config()).unwrap();
        assert_eq!(app.state().realname.len(), 20);
    }
}
