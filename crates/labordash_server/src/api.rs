//! HTTP surface: the dashboard page at `/` and artifacts under `/assets`.
//!
//! The page is composed once at startup and served from memory. Artifacts
//! are streamed from disk as-is; a missing file is a 404 for that frame only.

use crate::config::ServerConfig;
use axum::Router;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use http::StatusCode;
use labordash_core::{ASSET_ROUTE, AssetManifest, AssetReport, CoreError};
use labordash_layout::{Composer, LayoutError, Page};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

/// Server startup or runtime failure
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Metrics override could not be loaded
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Page composition failed
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Listen address could not be bound
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// Requested address
        addr: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Error while serving connections
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Dashboard HTTP server
pub struct DashboardServer {
    config: ServerConfig,
    page: Page,
    html: Arc<str>,
    assets: AssetReport,
}

impl DashboardServer {
    /// Load the snapshot, compose the page, and check the asset directory
    ///
    /// # Errors
    ///
    /// Fails if the metrics override cannot be read or the snapshot lacks a
    /// metric the page displays. Missing artifacts are only logged.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let snapshot = config.load_snapshot()?;
        let page = Composer::new(&snapshot).compose()?;
        let html: Arc<str> = Arc::from(page.render());

        let assets = AssetManifest::standard().check(&config.assets_dir);
        for (artifact, status) in assets.degraded() {
            tracing::warn!(
                file = artifact.file,
                frame = artifact.frame_id,
                %status,
                "artifact unavailable, frame will render empty"
            );
        }
        tracing::info!(
            dir = %config.assets_dir.display(),
            present = assets.present_count(),
            expected = assets.entries.len(),
            "checked asset directory"
        );

        Ok(Self {
            config,
            page,
            html,
            assets,
        })
    }

    /// The composed page
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Asset check taken at startup
    #[must_use]
    pub fn asset_report(&self) -> &AssetReport {
        &self.assets
    }

    /// Router serving this server's page and asset directory
    #[must_use]
    pub fn router(&self) -> Router {
        router(Arc::clone(&self.html), &self.config.assets_dir)
    }

    /// Bind and serve until the process exits
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Bind` if the address is unavailable
    pub async fn serve(self) -> ServerResult<()> {
        let listener = tokio::net::TcpListener::bind(&self.config.bind)
            .await
            .map_err(|source| ServerError::Bind {
                addr: self.config.bind.clone(),
                source,
            })?;

        tracing::info!(addr = %self.config.bind, "dashboard listening");
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

/// Build the router for a rendered page and an asset directory
pub fn router(html: Arc<str>, assets_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index))
        .nest_service(ASSET_ROUTE, ServeDir::new(assets_dir))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(html)
}

async fn index(State(html): State<Arc<str>>) -> Html<String> {
    Html(html.to_string())
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use http::{Request, header};
    use labordash_core::{Artifact, AssetStatus};
    use std::path::PathBuf;
    use tower::ServiceExt;

    fn asset_dir(skip: &[Artifact]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for artifact in Artifact::ALL {
            if !skip.contains(&artifact) {
                std::fs::write(
                    artifact.path_in(dir.path()),
                    format!("<html><body>{}</body></html>", artifact.frame_id),
                )
                .unwrap();
            }
        }
        dir
    }

    fn config(assets_dir: PathBuf) -> ServerConfig {
        ServerConfig {
            assets_dir,
            ..ServerConfig::default()
        }
    }

    async fn fetch(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_index_serves_page() {
        let dir = asset_dir(&[]);
        let server = DashboardServer::new(config(dir.path().to_path_buf())).unwrap();

        let (status, content_type, body) = fetch(server.router(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("text/html; charset=utf-8"));
        assert_eq!(body, server.page().render());
        assert!(server.asset_report().is_complete());
    }

    #[tokio::test]
    async fn test_asset_served_from_dir() {
        let dir = asset_dir(&[]);
        let app = router(Arc::from("page"), dir.path());

        let (status, _, body) = fetch(app, "/assets/job_clusters_tsne.html").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("job-clusters"));
    }

    #[tokio::test]
    async fn test_missing_heatmap_only_breaks_its_frame() {
        let dir = asset_dir(&[Artifact::SKILL_HEATMAP]);
        let server = DashboardServer::new(config(dir.path().to_path_buf())).unwrap();

        assert_eq!(
            server.asset_report().degraded(),
            vec![(Artifact::SKILL_HEATMAP, AssetStatus::Missing)]
        );

        let (status, _, body) = fetch(server.router(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"src="/assets/skill_heatmap.html""#));

        let (status, _, _) = fetch(server.router(), "/assets/skill_heatmap.html").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        for artifact in Artifact::ALL {
            if artifact == Artifact::SKILL_HEATMAP {
                continue;
            }
            let (status, _, _) = fetch(server.router(), &artifact.url()).await;
            assert_eq!(status, StatusCode::OK, "{}", artifact.file);
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = router(Arc::from("page"), Path::new("assets"));
        let (status, _, _) = fetch(app, "/api/metrics").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_missing_asset_dir_still_starts() {
        let dir = tempfile::tempdir().unwrap();
        let server = DashboardServer::new(config(dir.path().join("nope"))).unwrap();
        assert_eq!(server.asset_report().present_count(), 0);
        assert_eq!(server.asset_report().degraded().len(), 17);
    }

    #[test]
    fn test_override_missing_metric_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.json");
        std::fs::write(
            &path,
            r#"{
                "initial_workforce": 4555,
                "final_workforce": 5071,
                "total_cumulative_shortage": 1513,
                "training_multiplier_needed": 2.84,
                "mobility_multiplier_needed": 3.21
            }"#,
        )
        .unwrap();

        let result = DashboardServer::new(ServerConfig {
            metrics: Some(path),
            ..ServerConfig::default()
        });
        match result {
            Err(ServerError::Layout(LayoutError::Core(CoreError::MissingMetric { key }))) => {
                assert_eq!(key, "avg_monthly_shortage");
            }
            other => panic!("expected missing metric, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_unreadable_override_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.json");
        std::fs::write(&path, "not json").unwrap();

        let result = DashboardServer::new(ServerConfig {
            metrics: Some(path),
            ..ServerConfig::default()
        });
        assert!(matches!(
            result,
            Err(ServerError::Core(CoreError::ParseError { .. }))
        ));
    }
}
