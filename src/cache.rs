//! Caching facade over a credentials provider.

/// Credentials expiring within this window are treated as expired.
pub const DEFAULT_EXPIRY_WINDOW: std::time::Duration = std::time::Duration::from_secs(10);

pub struct CredentialsCache<P> {
    provider: P,
    cached: tokio::sync::Mutex<Option<crate::credentials::Credentials>>,
    expiry_window: chrono::Duration,
}

impl<P: crate::provider::ProvideCredentials> CredentialsCache<P> {
    pub fn new(provider: P) -> Self {
        Self::with_expiry_window(provider, DEFAULT_EXPIRY_WINDOW)
    }

    pub fn with_expiry_window(provider: P, window: std::time::Duration) -> Self {
        Self {
            provider,
            cached: tokio::sync::Mutex::new(None),
            expiry_window: chrono::Duration::from_std(window)
                .unwrap_or_else(|_| chrono::Duration::zero()),
        }
    }

    /// Returns cached credentials, or fetches and stores new ones on a miss.
    ///
    /// Concurrent callers serialize on the cache; the first one populates it.
    pub async fn retrieve(
        &self,
        ctx: &crate::context::Context,
    ) -> Result<crate::credentials::Credentials, crate::error::Error> {
        ctx.run(async {
            let mut cached = self.cached.lock().await;
            if let Some(creds) = cached.as_ref() {
                if !creds.expires_within(chrono::Utc::now(), self.expiry_window) {
                    tracing::trace!(message = "Using cached credentials", access_key_id = ?creds.access_key_id());
                    return Ok(creds.clone());
                }
                tracing::debug!(message = "Cached credentials expired", expiration = ?creds.expires_at());
            }

            let creds = self.provider.provide_credentials().await?;
            *cached = Some(creds.clone());
            Ok(creds)
        })
        .await
    }
}
