//! Newsprobe command-line entrypoint: training, indexing, prediction and serving.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use newsprobe::classifier::{Classifier, TrainingConfig, load_or_seed, train};
use newsprobe::config::Config;
use newsprobe::constants::{DEFAULT_MAX_FEATURES, DEFAULT_MAX_ITER};
use newsprobe::corpus::load_jsonl;
use newsprobe::embedding::{EmbedderConfig, SentenceEmbedder};
use newsprobe::gateway::{HandlerState, create_router_with_state};
use newsprobe::scoring::{AnalyzeRequest, ServingContext};
use newsprobe::vectordb::{DEFAULT_BATCH_SIZE, IndexBuilder};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser, Debug)]
#[command(
    name = "newsprobe",
    version,
    about = "Fake-news scoring with a TF-IDF classifier and a semantic evidence index"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Train the classifier from a `text,label` CSV (seeded if missing)
    Train {
        /// Training CSV (default: `$NEWSPROBE_DATA_DIR/small_labeled.csv`)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Output artifact (default: `$NEWSPROBE_CLASSIFIER_PATH`)
        #[arg(long)]
        out: Option<PathBuf>,

        #[arg(long, default_value_t = DEFAULT_MAX_FEATURES)]
        max_features: usize,

        #[arg(long, default_value_t = DEFAULT_MAX_ITER)]
        max_iter: usize,
    },

    /// Embed a JSONL article feed and persist the vector index
    BuildIndex {
        /// Article feed (default: `$NEWSPROBE_DATA_DIR/articles.json`)
        #[arg(long)]
        articles: Option<PathBuf>,

        /// Output directory (default: `$NEWSPROBE_INDEX_DIR`)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Documents embedded per encoder call
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,
    },

    /// Classify one text with the persisted classifier
    Predict {
        text: String,

        /// Decision threshold on the fake probability
        #[arg(long)]
        threshold: Option<f32>,

        /// Classifier artifact (default: `$NEWSPROBE_CLASSIFIER_PATH`)
        #[arg(long)]
        model: Option<PathBuf>,
    },

    /// Run the full analysis (classification + evidence) and print JSON
    Analyze {
        text: String,

        #[arg(long, default_value = "")]
        title: String,
    },

    /// Serve the HTTP API
    Serve,
}

fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    config.validate()?;

    match cli.command {
        Command::Train {
            data,
            out,
            max_features,
            max_iter,
        } => run_train(&config, data, out, max_features, max_iter),
        Command::BuildIndex {
            articles,
            out,
            batch_size,
        } => run_build_index(&config, articles, out, batch_size),
        Command::Predict {
            text,
            threshold,
            model,
        } => run_predict(&config, &text, threshold, model),
        Command::Analyze { text, title } => run_analyze(&config, title, text),
        Command::Serve => tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("failed to build tokio runtime")?
            .block_on(serve(config)),
    }
}

fn run_train(
    config: &Config,
    data: Option<PathBuf>,
    out: Option<PathBuf>,
    max_features: usize,
    max_iter: usize,
) -> anyhow::Result<()> {
    let data = data.unwrap_or_else(|| config.training_path());
    let out = out.unwrap_or_else(|| config.classifier_path.clone());

    let rows = load_or_seed(&data)?;
    let training = TrainingConfig {
        max_features,
        max_iter,
        ..Default::default()
    };
    let model = train(&rows, &training)?;
    model.save(&out)?;

    println!("Saved model to {}", out.display());
    Ok(())
}

fn run_build_index(
    config: &Config,
    articles: Option<PathBuf>,
    out: Option<PathBuf>,
    batch_size: usize,
) -> anyhow::Result<()> {
    let articles = articles.unwrap_or_else(|| config.articles_path());
    let out = out.unwrap_or_else(|| config.index_dir.clone());

    let documents = load_jsonl(&articles)
        .with_context(|| format!("failed to load articles from {}", articles.display()))?;

    if config.embedder_path.is_none() {
        tracing::warn!("No NEWSPROBE_EMBEDDER_PATH configured, embedding with the stub backend");
    }
    let embedder = SentenceEmbedder::load(EmbedderConfig::from_model_dir(
        config.embedder_path.clone(),
    ))?;

    let index = IndexBuilder::new(&embedder)
        .with_batch_size(batch_size)
        .build(documents)?;
    index.persist(&out)?;

    println!("Saved index with {} documents to {}", index.len(), out.display());
    Ok(())
}

fn run_predict(
    config: &Config,
    text: &str,
    threshold: Option<f32>,
    model: Option<PathBuf>,
) -> anyhow::Result<()> {
    let model_path = model.unwrap_or_else(|| config.classifier_path.clone());
    let classifier = Classifier::load(&model_path)?;

    let result = classifier.predict(text, threshold.unwrap_or(config.threshold))?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn run_analyze(config: &Config, title: String, text: String) -> anyhow::Result<()> {
    let context = ServingContext::load(config)?;
    let result = context
        .pipeline()
        .analyze(&AnalyzeRequest { title, text })?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        "Newsprobe starting"
    );

    let load_config = config.clone();
    let context = tokio::task::spawn_blocking(move || ServingContext::load(&load_config))
        .await
        .context("component loading task failed")??;
    tracing::info!(?context, "Components loaded");

    let app = create_router_with_state(HandlerState::new(context));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Newsprobe shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("NEWSPROBE_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8000);

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
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
