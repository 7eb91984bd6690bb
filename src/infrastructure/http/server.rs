//! Dashboard HTTP server.
//!
//! JSON endpoints backing the test selector, re-run and results pages.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::errors::DomainError;
use crate::domain::models::{
    ArtifactSummary, BuildHistory, ConfirmModel, RerunModel, ServerConfig, TestHierarchyResult,
    TestOption, TestResultModel, TestSelection, TriggerOutcome, WorkflowTriggerData,
};
use crate::domain::ports::{CiDataSource, TestMethodSource};
use crate::services::DashboardService;

/// Configuration for the dashboard HTTP server.
#[derive(Debug, Clone)]
pub struct DashboardHttpConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to enable CORS.
    pub enable_cors: bool,
}

impl Default for DashboardHttpConfig {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

impl From<&ServerConfig> for DashboardHttpConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            enable_cors: config.enable_cors,
        }
    }
}

/// Confirmed trigger submitted by the confirmation page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfirmTriggerRequest {
    pub branch: Option<String>,
    pub build_slug: Option<String>,
    pub commit_hash: Option<String>,
    pub job_name: Option<String>,
    pub flank_config_base64: Option<String>,
}

impl ConfirmTriggerRequest {
    fn into_trigger_data(self) -> Result<WorkflowTriggerData, DomainError> {
        fn required(value: Option<String>, field: &'static str) -> Result<String, DomainError> {
            value
                .filter(|v| !v.trim().is_empty())
                .ok_or(DomainError::MissingFormField(field))
        }

        Ok(WorkflowTriggerData {
            branch: required(self.branch, "Branch")?,
            build_slug: required(self.build_slug, "Build slug")?,
            commit_hash: required(self.commit_hash, "Commit hash")?,
            job_name: required(self.job_name, "Job name")?,
            flank_config_base64: required(self.flank_config_base64, "Flank Base64")?,
        })
    }
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(err: &DomainError) -> ApiError {
    let (status, code) = match err {
        DomainError::MalformedTestIdentifier { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "MALFORMED_TEST_IDENTIFIER")
        }
        DomainError::NoTestFilters => (StatusCode::BAD_REQUEST, "NO_TEST_FILTERS"),
        DomainError::MissingFormField(_) => (StatusCode::BAD_REQUEST, "MISSING_FIELD"),
        DomainError::InvalidOption(_) => (StatusCode::BAD_REQUEST, "INVALID_OPTION"),
        DomainError::TriggerRejected(_) => (StatusCode::CONFLICT, "TRIGGER_REJECTED"),
        DomainError::ArtifactNotFound(_) => (StatusCode::NOT_FOUND, "ARTIFACT_NOT_FOUND"),
        DomainError::MalformedTestReport(_) => (StatusCode::BAD_GATEWAY, "MALFORMED_TEST_REPORT"),
        DomainError::CiUnavailable(_) => (StatusCode::BAD_GATEWAY, "CI_UNAVAILABLE"),
        DomainError::SerializationError(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "SERIALIZATION_ERROR")
        }
    };

    if status.is_server_error() {
        tracing::warn!(error = %err, code, "request failed");
    } else {
        tracing::debug!(error = %err, code, "request rejected");
    }

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: code.to_string(),
        }),
    )
}

type AppState<C, M> = Arc<DashboardService<C, M>>;

/// Dashboard HTTP Server.
pub struct DashboardHttpServer<C, M> {
    config: DashboardHttpConfig,
    service: Arc<DashboardService<C, M>>,
}

impl<C, M> DashboardHttpServer<C, M>
where
    C: CiDataSource + 'static,
    M: TestMethodSource + 'static,
{
    pub fn new(service: Arc<DashboardService<C, M>>, config: DashboardHttpConfig) -> Self {
        Self { config, service }
    }

    /// Build the router.
    pub fn router(self) -> Router {
        let app = Router::new()
            .route("/api/ci-data", get(ci_data::<C, M>))
            .route("/api/options", get(options::<C, M>))
            .route("/api/artifacts/{build_slug}", get(artifacts::<C, M>))
            .route(
                "/api/test-metadata/{build_slug}/{artifact_slug}",
                get(test_metadata::<C, M>),
            )
            .route("/api/test-rerun/{build_slug}", get(test_rerun::<C, M>))
            .route("/api/test-results", get(test_results::<C, M>))
            .route("/api/trigger-tests", post(trigger_tests::<C, M>))
            .route("/api/confirm-test-trigger", post(confirm_test_trigger::<C, M>))
            // Health check
            .route("/health", get(health_check))
            .with_state(self.service);

        if self.config.enable_cors {
            app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
                .layer(TraceLayer::new_for_http())
        } else {
            app.layer(TraceLayer::new_for_http())
        }
    }

    /// Start the server.
    pub async fn serve(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(
        self,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        let router = self.router();
        tracing::info!("Dashboard HTTP server listening on {}", addr);
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

// Handler functions

async fn health_check() -> &'static str {
    "OK"
}

async fn ci_data<C: CiDataSource, M: TestMethodSource>(
    State(service): State<AppState<C, M>>,
) -> Result<Json<BuildHistory>, ApiError> {
    service
        .branch_builds()
        .await
        .map(Json)
        .map_err(|e| error_response(&e))
}

async fn options<C: CiDataSource, M: TestMethodSource>(
    State(service): State<AppState<C, M>>,
) -> Json<Vec<TestOption>> {
    Json(service.options().to_vec())
}

async fn artifacts<C: CiDataSource, M: TestMethodSource>(
    State(service): State<AppState<C, M>>,
    Path(build_slug): Path<String>,
) -> Result<Json<Vec<ArtifactSummary>>, ApiError> {
    service
        .artifacts(&build_slug)
        .await
        .map(Json)
        .map_err(|e| error_response(&e))
}

async fn test_metadata<C: CiDataSource, M: TestMethodSource>(
    State(service): State<AppState<C, M>>,
    Path((build_slug, artifact_slug)): Path<(String, String)>,
) -> Result<Json<TestHierarchyResult>, ApiError> {
    service
        .test_metadata(&build_slug, &artifact_slug)
        .await
        .map(Json)
        .map_err(|e| error_response(&e))
}

async fn test_rerun<C: CiDataSource, M: TestMethodSource>(
    State(service): State<AppState<C, M>>,
    Path(build_slug): Path<String>,
) -> Result<Json<RerunModel>, ApiError> {
    service
        .rerun(&build_slug)
        .await
        .map(Json)
        .map_err(|e| error_response(&e))
}

async fn test_results<C: CiDataSource, M: TestMethodSource>(
    State(service): State<AppState<C, M>>,
) -> Result<Json<Vec<TestResultModel>>, ApiError> {
    service
        .test_results()
        .await
        .map(Json)
        .map_err(|e| error_response(&e))
}

async fn trigger_tests<C: CiDataSource, M: TestMethodSource>(
    State(service): State<AppState<C, M>>,
    Json(selection): Json<TestSelection>,
) -> Result<Json<ConfirmModel>, ApiError> {
    service
        .confirm(&selection)
        .map(Json)
        .map_err(|e| error_response(&e))
}

async fn confirm_test_trigger<C: CiDataSource, M: TestMethodSource>(
    State(service): State<AppState<C, M>>,
    Json(request): Json<ConfirmTriggerRequest>,
) -> Result<Json<TriggerOutcome>, ApiError> {
    let data = request
        .into_trigger_data()
        .map_err(|e| error_response(&e))?;
    service
        .trigger(&data)
        .await
        .map(Json)
        .map_err(|e| error_response(&e))
}
