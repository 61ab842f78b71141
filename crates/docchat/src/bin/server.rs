//! Chat server binary
//!
//! Run with: cargo run -p docchat --bin docchat-server

use docchat::{config::ChatConfig, server::ChatServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docchat=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ChatConfig::from_env();

    tracing::info!("configuration loaded");
    tracing::info!("  - chunk size: {}", config.chunking.max_chunk_size);
    tracing::info!(
        "  - top-k: {} (multi-doc: {})",
        config.retrieval.top_k,
        config.retrieval.top_k_multi_doc
    );
    tracing::info!(
        "  - session idle timeout: {}s",
        config.session.idle_timeout_secs
    );

    let server = ChatServer::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/documents       - Upload a document, open a session");
    println!("  POST /api/chat/message    - Ask a question");
    println!("  POST /api/chat/stream     - Ask a question (SSE answer)");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
