use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::Config;
use crate::gateway::app::Application;
use crate::server::connection::Connection;

/// Binds to the configured address and accepts connections forever.
///
/// Each accepted socket is served on its own task; per-request state is
/// owned entirely by that task, and the only things shared across
/// connections are the listening socket and the read-only application.
/// A failed connection is logged and never stops the loop.
pub async fn run<A>(cfg: &Config, app: Arc<A>) -> anyhow::Result<()>
where
    A: Application,
{
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    let identity = cfg.identity();
    info!(
        "Listening on http://{}:{}",
        identity.name, identity.port
    );

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let identity = identity.clone();
        let app = Arc::clone(&app);
        tokio::spawn(async move {
            let conn = Connection::new(socket, identity, app);
            if let Err(e) = conn.serve().await {
                error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
