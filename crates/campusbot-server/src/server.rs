//! HTTP API server

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use campusbot_core::{ChatService, Config, Database, GeminiClient, ServerConfig, SharedDatabase};
use tokio::net::TcpListener;
use tracing::info;

use crate::handlers::AppState;
use crate::routes::create_app;

/// HTTP API server
pub struct HttpServer {
    config: ServerConfig,
    state: AppState,
}

impl HttpServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Serve until Ctrl-C
    pub async fn run(&self) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .listen_addr
            .parse()
            .context("Invalid HTTP listen address")?;

        let app = create_app(self.state.clone(), &self.config);

        let listener = TcpListener::bind(&addr)
            .await
            .context("Failed to bind HTTP server")?;

        info!("HTTP API server listening on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("HTTP server shutting down");
            })
            .await
            .context("HTTP server error")?;

        Ok(())
    }
}

/// Open the database, wire the Gemini client and serve
pub async fn start_server(config: Config) -> Result<()> {
    let db_path = config.database_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let db = Database::open(&db_path)?;
    db.initialize()?;
    info!("Using database {}", db_path.display());

    if config.gemini.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; chat requests will fail");
    }

    let client = Arc::new(GeminiClient::new(config.gemini.clone())?);
    let chat = ChatService::new(
        SharedDatabase::new(db),
        client.clone(),
        client,
        config.retrieval.clone(),
    );
    let state = AppState::new(chat, config.chunking);

    HttpServer::new(config.server, state).run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusbot_core::{ChunkingConfig, GeminiConfig, RetrievalConfig};

    fn server(listen_addr: &str) -> HttpServer {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        let client = Arc::new(
            GeminiClient::new(GeminiConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                api_key: None,
                ..GeminiConfig::default()
            })
            .unwrap(),
        );
        let chat = ChatService::new(
            SharedDatabase::new(db),
            client.clone(),
            client,
            RetrievalConfig::default(),
        );
        HttpServer::new(
            ServerConfig {
                listen_addr: listen_addr.to_string(),
                ..ServerConfig::default()
            },
            AppState::new(chat, ChunkingConfig::default()),
        )
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_listen_addr() {
        let err = server("not-an-address").run().await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid HTTP listen address");

        let err = server("127.0.0.1").run().await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid HTTP listen address");
    }

    #[tokio::test]
    async fn test_run_reports_port_in_use() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = taken.local_addr().unwrap().to_string();

        let err = server(&addr).run().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to bind HTTP server");
    }
}
