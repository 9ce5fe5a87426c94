//! Glosaurus HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use glosaurus::config::Config;
use glosaurus::constants::{DEFAULT_EMBEDDING_MODEL, DEFAULT_PORT};
use glosaurus::embedding::{CachedEmbedder, Embedder, EmbedderConfig, SentenceEmbedder};
use glosaurus::gateway::{HandlerState, create_router};
use glosaurus::generation::{GenaiGenerator, find_runtime, pull_model};
use glosaurus::lexicon::{LexicalResource, ResyfLexicon};
use glosaurus::ranking::Ranker;
use glosaurus::suggest::{SuggestionStrategy, SynonymService};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        strategy = %config.strategy,
        "Glosaurus starting"
    );

    let embedder_config = match &config.model_dir {
        Some(dir) => EmbedderConfig::new(dir.clone()),
        None => {
            tracing::warn!(
                expected_model = DEFAULT_EMBEDDING_MODEL,
                "No GLOSAURUS_MODEL_DIR configured, running embedder in stub mode"
            );
            EmbedderConfig::stub()
        }
    };
    let embedder = SentenceEmbedder::load(embedder_config)?;

    let embedder: Arc<dyn Embedder> = if config.embed_cache_capacity > 0 {
        Arc::new(CachedEmbedder::new(embedder, config.embed_cache_capacity))
    } else {
        Arc::new(embedder)
    };

    let lexicon: Arc<dyn LexicalResource> = match &config.lexicon_path {
        Some(path) => Arc::new(ResyfLexicon::load(path)?),
        None => {
            if config.strategy == SuggestionStrategy::Lexicon {
                tracing::warn!(
                    "No GLOSAURUS_LEXICON_PATH configured, lexicon lookups return nothing"
                );
            }
            Arc::new(ResyfLexicon::empty())
        }
    };

    let mut service = SynonymService::new(Ranker::new(embedder), lexicon, config.strategy);

    if config.strategy == SuggestionStrategy::Generator {
        if config.pull_model {
            pull_model(&find_runtime(), &config.generator_model).await?;
        }
        service = service.with_generator(Arc::new(GenaiGenerator::new(
            config.generator_model.clone(),
            config.generator_max_tokens,
        )));
    }

    let app = create_router(HandlerState::new(service), &config);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Glosaurus shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("GLOSAURUS_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(rt) = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    else {
        return 1;
    };

    rt.block_on(async {
        let Ok(client) = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
        else {
            return 1;
        };

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
