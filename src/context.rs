//! Cancellation and deadlines for operations that talk to AWS.

/// Carries a cancellation signal and an optional deadline. Clones share the signal.
#[derive(Clone, Debug)]
pub struct Context {
    cancelled: tokio::sync::watch::Receiver<bool>,
    deadline: Option<tokio::time::Instant>,
}

/// Cancels every clone of the [`Context`] it was created with.
#[derive(Debug)]
pub struct CancelHandle {
    tx: tokio::sync::watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        // sender is dropped right away; done() treats a closed channel as "never"
        let (_, rx) = tokio::sync::watch::channel(false);
        Self {
            cancelled: rx,
            deadline: None,
        }
    }

    pub fn with_cancel() -> (Self, CancelHandle) {
        let (tx, rx) = tokio::sync::watch::channel(false);
        (
            Self {
                cancelled: rx,
                deadline: None,
            },
            CancelHandle { tx },
        )
    }

    /// Adds a deadline `timeout` from now. An earlier existing deadline is kept.
    pub fn with_timeout(self, timeout: std::time::Duration) -> Self {
        let deadline = tokio::time::Instant::now() + timeout;
        Self {
            deadline: Some(match self.deadline {
                Some(d) if d < deadline => d,
                _ => deadline,
            }),
            ..self
        }
    }

    pub fn deadline(&self) -> Option<tokio::time::Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }

    async fn done(&self) {
        let mut rx = self.cancelled.clone();
        loop {
            if *rx.borrow() {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }

    async fn expired(&self) {
        match self.deadline {
            Some(d) => tokio::time::sleep_until(d).await,
            None => std::future::pending::<()>().await,
        }
    }

    /// Drives `fut` to completion unless the context ends first.
    ///
    /// A context that is already cancelled never polls `fut`.
    pub async fn run<F, T>(&self, fut: F) -> Result<T, crate::error::Error>
    where
        F: std::future::Future<Output = Result<T, crate::error::Error>>,
    {
        if self.is_cancelled() {
            return Err(crate::error::Error::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.done() => Err(crate::error::Error::Cancelled),
            _ = self.expired() => Err(crate::error::Error::DeadlineExceeded),
            r = fut => r,
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}
