//! Bring the HTTP API up and down around a run.
//!
//! # Design
//! `start` returns only after the listener is bound, so a caller can issue
//! requests as soon as it has the `RunningServer`. The store handle is kept on
//! the `RunningServer` so a test harness can seed and tear down the very
//! collection the server is reading, without any process-wide state.

use std::{future::Future, net::SocketAddr};

use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

use crate::{
    routes::app,
    store::{Database, StoreError},
};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Serve the API on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    db: Database,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app(db))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Connect to `database_address` and serve on an ephemeral local port.
pub async fn start(database_address: &str) -> Result<RunningServer, ServerError> {
    let db = Database::connect(database_address).await?;
    start_with(db).await
}

/// Serve an already-open store on an ephemeral local port.
pub async fn start_with(db: Database) -> Result<RunningServer, ServerError> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, rx) = oneshot::channel::<()>();

    let task = tokio::spawn(serve(listener, db.clone(), async move {
        let _ = rx.await;
    }));
    tracing::info!(%addr, "server started");

    Ok(RunningServer {
        addr,
        db,
        shutdown: tx,
        task,
    })
}

/// A server spawned by [`start`]. Dropping it without [`stop`](Self::stop)
/// also shuts the server down, but without waiting for it.
#[derive(Debug)]
pub struct RunningServer {
    addr: SocketAddr,
    db: Database,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<Result<(), std::io::Error>>,
}

impl RunningServer {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// The store this server reads and writes.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Trigger graceful shutdown and wait for in-flight requests to finish.
    pub async fn stop(self) -> Result<(), ServerError> {
        let _ = self.shutdown.send(());
        self.task.await??;
        tracing::info!(addr = %self.addr, "server stopped");
        Ok(())
    }
}
