use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Wait for a shutdown signal (SIGTERM or SIGINT/Ctrl-C).
///
/// When the signal is received, cancels the provided token so both
/// schedulers stop and the ledger is written one last time.
pub async fn wait_for_shutdown_signal(token: CancellationToken) {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {
                        info!(event = "cli.shutdown.signal_received", signal = "SIGINT");
                    }
                    _ = sigterm.recv() => {
                        info!(event = "cli.shutdown.signal_received", signal = "SIGTERM");
                    }
                    _ = token.cancelled() => return,
                }
            }
            Err(e) => {
                warn!(event = "cli.shutdown.sigterm_register_failed", error = %e);
                tokio::select! {
                    _ = ctrl_c => {
                        info!(event = "cli.shutdown.signal_received", signal = "SIGINT");
                    }
                    _ = token.cancelled() => return,
                }
            }
        }
    }

    #[cfg(not(unix))]
    {
        tokio::select! {
            _ = ctrl_c => {
                info!(event = "cli.shutdown.signal_received", signal = "SIGINT");
            }
            _ = token.cancelled() => return,
        }
    }

    token.cancel();
}
