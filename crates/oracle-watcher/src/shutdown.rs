//! Termination signals that end the watcher gracefully.

/// Resolves with the name of the first termination signal the process
/// receives.
pub async fn termination_signal() -> &'static str {
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::warn!(?err, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = terminate => "SIGTERM",
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => "SIGINT",
            Err(err) => {
                tracing::warn!(?err, "cannot listen for Ctrl+C");
                std::future::pending::<&'static str>().await
            }
        },
    }
}

/// Logs and resolves once a termination signal arrived.
pub async fn signal_handler() {
    let signal = termination_signal().await;
    tracing::info!(signal, "initiating graceful shutdown");
}
