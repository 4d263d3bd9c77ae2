// src/cli/signal.rs — Ctrl-C handling for a running command

use std::future::Future;

/// Exit code for an interrupted run (128 + SIGINT).
pub const EXIT_INTERRUPTED: i32 = 130;

/// Resolves once `signal` reports an interrupt.
///
/// A handler that fails to install is logged and never resolves, so the
/// command runs to completion instead of exiting as if interrupted.
pub async fn interrupted<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::warn!("Could not listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_resolves_on_interrupt() {
        let done = tokio::time::timeout(
            Duration::from_millis(200),
            interrupted(async { Ok(()) }),
        )
        .await;
        assert!(done.is_ok());
    }

    #[tokio::test]
    async fn test_failed_handler_never_resolves() {
        let done = tokio::time::timeout(
            Duration::from_millis(50),
            interrupted(async { Err(std::io::Error::other("no signal handler")) }),
        )
        .await;
        assert!(done.is_err());
    }
}
