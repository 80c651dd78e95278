use anyhow::Context;
use tokio::net::TcpListener;
use todo_server::{app, config::AppConfig, server, store, telemetry, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("invalid configuration")?;
    telemetry::init_tracing(config.log_format);

    let store = store::open(&config.storage)
        .await
        .context("failed to open todo store")?;

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    let result = server::serve(
        listener,
        app(AppState::from_shared(store.clone())),
        server::shutdown_signal(),
        config.shutdown_grace,
    )
    .await;

    store.close().await;
    result.context("server error")?;
    tracing::info!("server stopped");
    Ok(())
}
