//! Server lifecycle
//!
//! Runs the router until a shutdown signal arrives, then gives in-flight
//! connections a bounded window to finish.

use std::{future::Future, future::IntoFuture, io, sync::Arc, time::Duration};

use axum::Router;
use tokio::{net::TcpListener, sync::Notify};
use tracing::{info, warn};

/// Serve `app` until `signal` resolves, then drain for at most `drain_timeout`
///
/// Returns once every connection has closed or the drain window has elapsed,
/// whichever comes first. Connections still open at that point are abandoned.
///
/// # Errors
///
/// Returns the I/O error that stopped the accept loop.
pub async fn serve<S>(
    listener: TcpListener,
    app: Router,
    signal: S,
    drain_timeout: Duration,
) -> io::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    let signalled = Arc::new(Notify::new());
    let notify = Arc::clone(&signalled);

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            signal.await;
            notify.notify_one();
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return result,
        () = signalled.notified() => {},
    }

    info!("Waiting up to {:?} for connections to close...", drain_timeout);
    if let Ok(result) = tokio::time::timeout(drain_timeout, server).await {
        result
    } else {
        warn!(
            timeout_secs = drain_timeout.as_secs_f32(),
            "Shutdown timeout elapsed, closing remaining connections"
        );
        Ok(())
    }
}
