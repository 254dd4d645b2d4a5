use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use morse::api::{create_router, AppState};
use morse::config::Config;
use morse::ocr::OcrProvider;

#[derive(Parser)]
#[command(name = "morse")]
#[command(about = "MorseOCR: extract text from images with Google Gemini")]
struct Args {
    /// Bind host, overrides MORSE_HOST
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overrides MORSE_PORT
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "morse=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    if config.server.api_key.is_none() {
        tracing::warn!(
            "MORSE_API_KEY is not set. /ocr/image will answer 500 until it is configured."
        );
    }
    if config.ocr.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set. OCR requests will fail as unavailable.");
    }

    tracing::info!("Initializing OCR provider: {}...", config.ocr.model);
    let ocr = OcrProvider::new(&config.ocr)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, ocr);
    let app = create_router(state);

    tracing::info!("MorseOCR starting on http://{}", addr);
    tracing::info!("  OCR endpoint: http://{}/ocr/image", addr);
    tracing::info!("  API docs:     http://{}/redoc", addr);
    tracing::info!("  OpenAPI spec: http://{}/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping server...");
}
