//! Serving with a bounded graceful shutdown.
//!
//! # Design
//! The shutdown trigger is an ordinary future passed in by the caller: the
//! binary passes `shutdown_signal()`, tests pass a channel. Once it resolves
//! the listener stops accepting and in-flight requests get `grace` to finish.
//!
//! axum runs every connection in its own task, so stopping the accept loop
//! does not stop handlers. Each request is therefore raced against an expiry
//! flag; when the grace period runs out the flag flips, every pending handler
//! future is dropped mid-flight and the client gets a 503.

use std::{future::Future, future::IntoFuture, io, sync::Arc, time::Duration};

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{from_fn_with_state, Next},
    response::Response,
    Router,
};
use tokio::{
    net::TcpListener,
    sync::{watch, Notify},
    task::JoinError,
};

use crate::response::{render, MessageBody};

/// Serve `app` on `listener` until `shutdown` resolves.
///
/// Returns once every request has completed or been cancelled.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    grace: Duration,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send,
{
    let (expire, expired) = watch::channel(false);
    let app = app.layer(from_fn_with_state(expired, cancel_on_expiry));

    let stop = Arc::new(Notify::new());
    let stopped = {
        let stop = Arc::clone(&stop);
        async move { stop.notified().await }
    };

    let mut server = tokio::spawn(
        axum::serve(listener, app)
            .with_graceful_shutdown(stopped)
            .into_future(),
    );

    tokio::select! {
        joined = &mut server => return flatten(joined),
        () = shutdown => {}
    }

    tracing::info!(?grace, "shutting down, draining in-flight requests");
    // notify_one keeps a permit if the server task has not polled yet
    stop.notify_one();

    if let Ok(joined) = tokio::time::timeout(grace, &mut server).await {
        return flatten(joined);
    }

    tracing::warn!("grace period elapsed, cancelling remaining requests");
    expire.send_replace(true);
    match tokio::time::timeout(CANCEL_WAIT, &mut server).await {
        Ok(joined) => flatten(joined),
        Err(_) => {
            tracing::warn!("connections still open after cancellation, dropping them");
            server.abort();
            Ok(())
        }
    }
}

/// How long cancelled connections get to write their 503 and close.
const CANCEL_WAIT: Duration = Duration::from_millis(500);

async fn cancel_on_expiry(
    State(mut expired): State<watch::Receiver<bool>>,
    request: Request,
    next: Next,
) -> Response {
    tokio::select! {
        response = next.run(request) => response,
        _ = expired.wait_for(|done| *done) => {
            render(StatusCode::SERVICE_UNAVAILABLE, MessageBody::new("server shutting down"))
        }
    }
}

fn flatten(joined: Result<io::Result<()>, JoinError>) -> io::Result<()> {
    joined.map_err(io::Error::other)?
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
