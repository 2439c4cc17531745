use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use rfq_compliance::application::ports::{FileLoader, StagingStore};
use rfq_compliance::application::services::{ClientResolver, ComplianceService};
use rfq_compliance::infrastructure::llm::sdk_namespace;
use rfq_compliance::infrastructure::observability::{TracingConfig, init_tracing};
use rfq_compliance::infrastructure::storage::LocalStagingStore;
use rfq_compliance::infrastructure::text_processing::CompositeFileLoader;
use rfq_compliance::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("configuration error")?;

    init_tracing(
        &TracingConfig::from_settings(settings.environment, &settings.logging),
        settings.server.port,
    );

    let constructor = ClientResolver::google_generative_ai()
        .resolve(&sdk_namespace())
        .context("configuration error")?;
    let llm_client = constructor
        .construct(&settings.llm.client_options())
        .context("failed to construct the model client")?;
    tracing::info!(
        constructor = constructor.name(),
        model = %settings.llm.model,
        "Model client ready"
    );

    let file_loader: Arc<dyn FileLoader> = Arc::new(CompositeFileLoader::standard());
    let staging_dir = settings.uploads.staging_dir();
    let staging_store: Arc<dyn StagingStore> = Arc::new(
        LocalStagingStore::new(staging_dir.clone())
            .with_context(|| format!("failed to prepare {}", staging_dir.display()))?,
    );

    let compliance_service = Arc::new(ComplianceService::new(
        file_loader,
        llm_client,
        settings.llm.request_timeout(),
    ));

    let host: std::net::IpAddr = settings
        .server
        .host
        .parse()
        .with_context(|| format!("invalid server host: {}", settings.server.host))?;
    let addr = SocketAddr::from((host, settings.server.port));

    let state = AppState {
        compliance_service,
        staging_store,
        settings: Arc::new(settings),
    };
    let router = create_router(state);

    tracing::info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
