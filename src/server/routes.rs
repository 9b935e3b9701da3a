//! HTTP surface: router, CORS, error-to-status mapping

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use serde_json::json;
use tracing::error;

use crate::extractor::traits::StreamProvider;
use crate::extractor::{MediaDownloaderProvider, YtStreamProvider};
use crate::server::download::{resolve_download, DownloadRequest};
use crate::utils::config::{AppSettings, ProviderKind};
use crate::utils::error::TubeGrabError;

/// Shared per-process state; requests themselves are stateless
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<AppSettings>,
    /// None while the credential is missing; requests then fail with a 500
    pub provider: Option<Arc<dyn StreamProvider>>,
}

impl AppState {
    pub fn from_settings(settings: AppSettings) -> Self {
        let provider = build_provider(&settings).ok();
        Self {
            settings: Arc::new(settings),
            provider,
        }
    }
}

/// Construct the configured provider adapter
pub fn build_provider(
    settings: &AppSettings,
) -> Result<Arc<dyn StreamProvider>, TubeGrabError> {
    match settings.provider {
        ProviderKind::MediaDownloader => Ok(Arc::new(MediaDownloaderProvider::new(settings)?)),
        ProviderKind::YtStream => Ok(Arc::new(YtStreamProvider::new(settings)?)),
    }
}

/// Build the service router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/download",
            post(download).options(preflight).fallback(method_not_allowed),
        )
        .layer(axum::middleware::map_response(apply_cors))
        .with_state(state)
}

/// POST /download
pub async fn download(
    State(state): State<AppState>,
    Json(request): Json<DownloadRequest>,
) -> Response {
    let Some(provider) = state.provider.clone() else {
        return error_response(&TubeGrabError::Configuration(
            "API key not configured".to_string(),
        ));
    };

    match resolve_download(provider.as_ref(), &state.settings, request).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
        .into_response()
}

/// Permissive CORS headers on every response, for cross-origin browser use
async fn apply_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

fn error_response(err: &TubeGrabError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!("Download request failed: {}", err);
    }

    let body = match err {
        TubeGrabError::Upstream { details, .. } => {
            json!({ "error": err.to_string(), "details": details })
        }
        _ => json!({ "error": err.to_string() }),
    };

    (status, Json(body)).into_response()
}
