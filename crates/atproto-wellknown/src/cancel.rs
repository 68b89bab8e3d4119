//! Caller-driven cancellation of an in-flight resolution

use tokio::sync::watch;

/// Fires the paired [`Cancellation`]
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        // send_replace works even when every receiver is gone
        self.tx.send_replace(true);
    }
}

/// Cancellation signal observed by the fetch loop
#[derive(Debug, Clone)]
pub struct Cancellation {
    rx: Option<watch::Receiver<bool>>,
}

impl Cancellation {
    pub fn new() -> (CancelHandle, Self) {
        let (tx, rx) = watch::channel(false);
        (CancelHandle { tx }, Self { rx: Some(rx) })
    }

    /// A signal that never fires
    pub fn none() -> Self {
        Self { rx: None }
    }

    pub fn is_cancelled(&self) -> bool {
        self.rx.as_ref().map(|rx| *rx.borrow()).unwrap_or(false)
    }

    /// Resolves once cancelled; pends forever if the handle was dropped unfired
    pub async fn cancelled(&self) {
        let Some(rx) = self.rx.as_ref() else {
            return std::future::pending().await;
        };
        let mut rx = rx.clone();
        let fired = rx.wait_for(|fired| *fired).await.is_ok();
        if !fired {
            std::future::pending::<()>().await;
        }
    }
}

impl Default for Cancellation {
    fn default() -> Self {
        Self::none()
    }
}
