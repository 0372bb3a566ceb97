use std::sync::Arc;

use anyhow::Context;

use salesdesk_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    salesdesk_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let services = salesdesk_api::app::services::build_services(&config)
        .await
        .context("failed to initialize record stores")?;
    let app = salesdesk_api::app::build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
