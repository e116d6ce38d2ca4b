//! Test server harness.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use newsprobe::classifier::{TrainingConfig, seed_dataset, train};
use newsprobe::corpus::parse_jsonl;
use newsprobe::embedding::{EmbedderConfig, SentenceEmbedder, TextEmbedder};
use newsprobe::gateway::{HandlerState, create_router_with_state};
use newsprobe::scoring::ServingContext;
use newsprobe::vectordb::IndexBuilder;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::ARTICLES_JSONL;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

async fn wait_for_server_ready(addr: SocketAddr) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();
    let timeout = Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS);

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(Duration::from_millis(STARTUP_POLL_INTERVAL_MS)).await;
            }
        }
    }
}

/// In-memory context: seed-trained classifier, stub embedder, fixture articles.
pub fn fixture_context() -> Result<ServingContext, ServerStartupError> {
    let fail = |e: &dyn std::fmt::Display| ServerStartupError::StartupFailed(e.to_string());

    let classifier = train(&seed_dataset(), &TrainingConfig::default()).map_err(|e| fail(&e))?;
    let embedder = SentenceEmbedder::load(EmbedderConfig::stub()).map_err(|e| fail(&e))?;
    let documents = parse_jsonl(ARTICLES_JSONL.as_bytes()).map_err(|e| fail(&e))?;
    let index = IndexBuilder::new(&embedder)
        .build(documents)
        .map_err(|e| fail(&e))?;

    let embedder: Arc<dyn TextEmbedder> = Arc::new(embedder);
    ServingContext::new(Arc::new(classifier), Arc::new(index), embedder, 5, 0.5)
        .map_err(|e| fail(&e))
}

/// Spawns the gateway on an ephemeral port with [`fixture_context`].
pub async fn spawn_test_server() -> Result<TestServer, ServerStartupError> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;

    let app = create_router_with_state(HandlerState::new(fixture_context()?));
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let server_handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    wait_for_server_ready(addr).await?;

    Ok(TestServer {
        addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
