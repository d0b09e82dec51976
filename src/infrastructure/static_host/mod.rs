#[cfg(test)]
#[path = "static_host_test.rs"]
mod tests;

mod mime;

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;
use axum::extract::State;
use axum::http::header;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Router;
use tokio::fs;
use tower_http::trace::TraceLayer;

pub use mime::*;

const ROOT_DOCUMENT: &str = "index.html";

/// Folds `.` and `..` segments of a URL path into a relative file path.
/// `None` when the path would leave the document root.
pub fn normalize(path: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    for component in Path::new(path.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => {
                relative.push(part);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if !relative.pop() {
                    return None;
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return None;
            }
        }
    }

    return Some(relative);
}

/// Serves a built single-page app from a document root. Holds no mutable
/// state, so requests are handled independently.
pub struct StaticHost {
    document_root: PathBuf,
    base_path: String,
}

impl StaticHost {
    pub fn new(document_root: PathBuf, base_path: &str) -> StaticHost {
        return StaticHost {
            document_root,
            base_path: base_path.to_string(),
        };
    }

    /// Drops the query string and the deployment prefix, if any.
    pub fn strip_base_path<'a>(&self, request_path: &'a str) -> &'a str {
        let path = request_path.split('?').next().unwrap_or("");
        if self.base_path.is_empty() {
            return path;
        }

        if let Some(stripped) = path.strip_prefix(&self.base_path) {
            if stripped.is_empty() {
                return "/";
            }
            return stripped;
        }

        return path;
    }

    /// The file that answers `request_path`. Anything missing, any directory,
    /// and anything trying to climb out of the document root resolves to the
    /// root document.
    pub async fn resolve(&self, request_path: &str) -> PathBuf {
        let root_document = self.document_root.join(ROOT_DOCUMENT);
        let path = self.strip_base_path(request_path);
        if path == "/" {
            return root_document;
        }

        let relative = match normalize(path) {
            Some(relative) => relative,
            None => return root_document,
        };

        let candidate = self.document_root.join(relative);
        match fs::metadata(&candidate).await {
            Ok(meta) if !meta.is_dir() => return candidate,
            _ => return root_document,
        }
    }

    pub async fn respond(&self, request_path: &str) -> Response {
        let file_path = self.resolve(request_path).await;
        let content_type = content_type(&file_path);

        match fs::read(&file_path).await {
            Ok(bytes) => {
                return (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, content_type)],
                    bytes,
                )
                    .into_response();
            }
            Err(err) => {
                tracing::warn!(
                    path = request_path,
                    file = %file_path.display(),
                    error = %err,
                    "Failed to read file"
                );
                return (
                    StatusCode::NOT_FOUND,
                    [(header::CONTENT_TYPE, "text/plain")],
                    format!("Not found: {request_path}"),
                )
                    .into_response();
            }
        }
    }

    pub fn router(self) -> Router {
        return Router::new()
            .fallback(serve_asset)
            .with_state(Arc::new(self))
            .layer(TraceLayer::new_for_http());
    }
}

async fn serve_asset(State(host): State<Arc<StaticHost>>, uri: Uri) -> Response {
    return host.respond(uri.path()).await;
}

#[allow(clippy::implicit_return)]
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?err, "Failed to listen for shutdown signal");
    }
}

pub async fn serve(host: StaticHost, bind_address: &str, port: u16) -> Result<()> {
    let base_path = host.base_path.to_string();
    let listener = tokio::net::TcpListener::bind((bind_address, port))
        .await
        .with_context(|| return format!("Failed to bind to {bind_address}:{port}"))?;

    if base_path.is_empty() {
        tracing::info!(port = port, "Server running on port {port}");
    } else {
        tracing::info!(
            port = port,
            base_path = %base_path,
            "Server running on port {port} (base path: {base_path})"
        );
    }

    axum::serve(listener, host.router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    return Ok(());
}
