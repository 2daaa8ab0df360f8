//! Process shutdown signalling

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

/// Cloneable handle; triggering any clone stops every waiter
#[derive(Clone)]
pub struct ShutdownService {
    state: Arc<watch::Sender<bool>>,
}

impl Default for ShutdownService {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownService {
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self {
            state: Arc::new(state),
        }
    }

    pub fn trigger(&self) {
        self.state.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.state.borrow()
    }

    /// Owned future resolving once shutdown is triggered (immediately if it already was)
    pub fn wait(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.state.subscribe();
        async move {
            // Err means every sender is gone, which also ends the wait
            let _ = rx.wait_for(|stopped| *stopped).await;
        }
    }

    /// Trigger on Ctrl+C or SIGTERM
    pub fn install_signal_handlers(&self) {
        let service = self.clone();
        tokio::spawn(async move {
            let signal = os_signal().await;
            tracing::debug!(signal, "Shutting down");
            service.trigger();
        });
    }
}

async fn os_signal() -> &'static str {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => "SIGINT",
        _ = terminate => "SIGTERM",
    }
}
