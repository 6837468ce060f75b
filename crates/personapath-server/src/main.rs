use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use personapath_auth::TokenVerifier;
use personapath_bedrock::ReportGenerator;
use personapath_bedrock::converse::BedrockBackend;
use personapath_server::{AppState, shutdown_signal};
use personapath_server::config::{config_path, load_config};
use personapath_storage::{FileBacking, ReportStore};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let path = config_path()?;
    let mut config = load_config(&path)?;
    config.apply_env(|key| std::env::var(key).ok())?;
    config.validate()?;

    let summary = config.summary();
    tracing::info!(
        bind = %summary.bind,
        data_dir = %summary.data_dir,
        region = %summary.region,
        model_id = %summary.model_id,
        credential_type = %summary.credential_type,
        profile_name = ?summary.profile_name,
        access_key_hint = ?summary.access_key_hint,
        generation_timeout_secs = ?summary.generation_timeout_secs,
        "configuration loaded"
    );

    let data_dir = config.data_dir()?;
    std::fs::create_dir_all(&data_dir)?;
    let store = ReportStore::new(FileBacking::new(data_dir));

    let backend = BedrockBackend::connect(&config.bedrock).await;
    if !backend.has_credentials() {
        tracing::warn!("no Bedrock credential configured; report generation will fail");
    }
    let mut generator = ReportGenerator::new(Arc::new(backend));
    if let Some(timeout) = config.generation_timeout() {
        generator = generator.with_timeout(timeout);
    }

    let verifier = TokenVerifier::new(config.session_secret.as_bytes());
    let app = personapath_server::app(AppState::new(store, generator, verifier));

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(tokio::signal::ctrl_c()))
        .await?;
    Ok(())
}
