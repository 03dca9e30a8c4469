//! Running the front end as a background task.
//!
//! `start_server` binds before returning, so bind errors surface to the
//! caller; serving happens on a spawned task that ends on `shutdown()`.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::api::router::app_router;
use crate::api::types::AppContext;

// ═══════════════════════════════════════════════════════════
// Public types
// ═══════════════════════════════════════════════════════════

/// Metadata for a running front end server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSession {
    pub session_id: String,
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

/// Handle to a running front end server.
///
/// Dropping the handle leaves the server running; call [`Self::shutdown`].
pub struct FrontendServer {
    pub session: ServerSession,
    stop: Option<oneshot::Sender<()>>,
}

impl FrontendServer {
    /// Ask the server to stop accepting connections. In-flight requests are
    /// allowed to finish. Repeated calls do nothing.
    pub fn shutdown(&mut self) {
        let Some(stop) = self.stop.take() else {
            return;
        };
        if stop.send(()).is_err() {
            tracing::debug!(addr = %self.session.server_addr, "Front end already stopped");
        } else {
            tracing::info!(addr = %self.session.server_addr, "Front end stopping");
        }
    }

    pub fn is_running(&self) -> bool {
        self.stop.is_some()
    }
}

// ═══════════════════════════════════════════════════════════
// Server lifecycle
// ═══════════════════════════════════════════════════════════

/// Serve the front end on `addr`. Port 0 picks an ephemeral port; the real
/// one is reported in the returned [`ServerSession`].
pub async fn start_server(ctx: AppContext, addr: SocketAddr) -> Result<FrontendServer, String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind front end on {addr}: {e}"))?;
    let bound = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    let session = ServerSession {
        session_id: Uuid::new_v4().to_string(),
        server_addr: bound.to_string(),
        port: bound.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };
    tracing::info!(
        addr = %bound,
        backend = %ctx.backend_url(),
        server_session = %session.session_id,
        "Front end listening"
    );

    let (stop, stopped) = oneshot::channel::<()>();
    let app = app_router(ctx);
    tokio::spawn(serve(listener, app, stopped));

    Ok(FrontendServer {
        session,
        stop: Some(stop),
    })
}

async fn serve(listener: tokio::net::TcpListener, app: axum::Router, stopped: oneshot::Receiver<()>) {
    let result = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            // A dropped sender counts as a stop request too
            let _ = stopped.await;
        })
        .await;
    match result {
        Ok(()) => tracing::info!("Front end stopped"),
        Err(e) => tracing::error!(error = %e, "Front end server failed"),
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::Arc;
    use std::time::Duration;

    use crate::backend::MockRiskBackend;
    use crate::config::FrontendConfig;

    fn localhost() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)
    }

    fn test_ctx() -> AppContext {
        let config = FrontendConfig {
            step_delay: Duration::ZERO,
            reveal_delay: Duration::ZERO,
            ..FrontendConfig::default()
        };
        let backend = MockRiskBackend::new().with_prediction(Ok(MockRiskBackend::prediction_body(1)));
        AppContext::new(config, Arc::new(backend))
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let mut server = start_server(test_ctx(), localhost())
            .await
            .expect("server should start");

        assert!(!server.session.session_id.is_empty());
        assert!(server.session.port > 0);

        let url = format!("http://127.0.0.1:{}/api/health", server.session.port);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["backend_reachable"], true);

        server.shutdown();
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn server_session_has_valid_metadata() {
        let mut server = start_server(test_ctx(), localhost())
            .await
            .expect("server should start");

        assert!(!server.session.started_at.is_empty());
        assert!(server.session.server_addr.starts_with("127.0.0.1:"));
        assert!(server.is_running());

        server.shutdown();
        assert!(!server.is_running());
    }

    #[tokio::test]
    async fn server_serves_pages_and_form_posts() {
        let mut server = start_server(test_ctx(), localhost())
            .await
            .expect("server should start");
        let port = server.session.port;

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/nonexistent"))
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        // The 303 after the POST is followed to the session page
        let client = reqwest::Client::new();
        let resp = client
            .post(format!("http://127.0.0.1:{port}/prediksi"))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body("age=45&glucose=148&insulin=85&bmi=33.6")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let page = resp.url().clone();
        assert_eq!(page.path(), "/prediksi");
        assert!(page.query().unwrap().starts_with("sesi="));

        let mut html = resp.text().await.unwrap();
        for _ in 0..100 {
            if html.contains("Risiko Tinggi") {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
            html = client.get(page.clone()).send().await.unwrap().text().await.unwrap();
        }
        assert!(html.contains("Risiko Tinggi"));

        server.shutdown();
    }

    #[tokio::test]
    async fn bind_conflict_is_reported() {
        let mut first = start_server(test_ctx(), localhost()).await.unwrap();
        let taken: SocketAddr = first.session.server_addr.parse().unwrap();

        let err = match start_server(test_ctx(), taken).await {
            Ok(_) => panic!("second bind should fail"),
            Err(e) => e,
        };
        assert!(err.contains("Failed to bind"));

        first.shutdown();
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let mut server = start_server(test_ctx(), localhost())
            .await
            .expect("server should start");

        server.shutdown();
        server.shutdown();
    }
}
