use blog_server::{config::Config, server, telemetry, Database};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config = Config::load()?;
    let db = Database::connect(&config.database.url).await?;

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {addr}");

    server::serve(listener, db, shutdown_signal()).await?;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}
