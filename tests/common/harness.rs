//! Test server harness.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use glosaurus::config::Config;
use glosaurus::embedding::{Embedder, MockEmbedder};
use glosaurus::gateway::{HandlerState, create_router};
use glosaurus::lexicon::ResyfLexicon;
use glosaurus::ranking::Ranker;
use glosaurus::suggest::{SuggestionStrategy, SynonymService};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

pub const MOOD_LEXICON: &str = r#"{
    "content": {
        "ADJ": [
            { "sense_id": "content_1", "synonyms": [
                { "word": "angry" }, { "word": "joyful" }, { "word": "happy" }, { "word": "sad" }
            ] }
        ],
        "VER": [
            { "sense_id": "content_2", "synonyms": [ { "word": "satisfy" } ] }
        ]
    }
}"#;

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
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => tokio::time::sleep(interval).await,
        }
    }
}

/// Serves `service` on an ephemeral local port.
pub async fn spawn_server<E>(service: SynonymService<E>) -> Result<TestServer, ServerStartupError>
where
    E: Embedder + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = create_router(HandlerState::new(service), &Config::default());

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server_handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    wait_for_server_ready(
        addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}

/// Server with the mood vocabulary embedder and a one-word lexicon.
pub async fn spawn_mood_server() -> Result<TestServer, ServerStartupError> {
    let lexicon = ResyfLexicon::from_json(MOOD_LEXICON).expect("fixture lexicon parses");
    let service = SynonymService::new(
        Ranker::new(MockEmbedder::mood()),
        Arc::new(lexicon),
        SuggestionStrategy::Lexicon,
    );
    spawn_server(service).await
}
