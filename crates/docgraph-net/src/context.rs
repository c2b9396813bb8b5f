//! Per-call request context.
//!
//! Every operation takes a [`RequestContext`] carrying the tenant to act for,
//! an optional deadline, and an optional cancellation token. Nothing about a
//! call is read from ambient state.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

/// Environment variable holding the default tenant id.
pub const TENANT_ID_ENV: &str = "DOCGRAPH_TENANT_ID";

/// A cancellation signal shared between a caller and in-flight requests.
///
/// Cloning yields another handle to the same signal. Once cancelled, a token
/// stays cancelled.
#[derive(Clone, Debug)]
pub struct CancelToken {
    sender: Arc<watch::Sender<bool>>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    /// Create a new, uncancelled token.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Cancel every request observing this token.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    /// Check if the token has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    /// Wait until the token is cancelled.
    pub async fn cancelled(&self) {
        let mut receiver = self.sender.subscribe();
        // The sender lives as long as `self`, so this only returns once cancelled.
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }
}

/// Options applied to a single operation.
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    /// Tenant the call acts for; sent as the tenant header when set.
    pub tenant_id: Option<String>,
    /// Deadline for the whole round trip, overriding the client timeout.
    pub timeout: Option<Duration>,
    /// Cancellation signal for the call.
    pub cancel: Option<CancelToken>,
}

impl RequestContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context acting for a tenant.
    pub fn for_tenant(tenant_id: impl Into<String>) -> Self {
        Self::new().tenant(tenant_id)
    }

    /// Create a context from `DOCGRAPH_TENANT_ID`, if set and non-empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            tenant_id: lookup(TENANT_ID_ENV).filter(|id| !id.is_empty()),
            ..Self::default()
        }
    }

    /// Set the tenant id.
    pub fn tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    /// Set the deadline for the call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Attach a cancellation token.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Check if the attached token, if any, has already fired.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_builder() {
        let token = CancelToken::new();
        let ctx = RequestContext::for_tenant("acme")
            .timeout(Duration::from_secs(2))
            .cancel_token(token.clone());

        assert_eq!(ctx.tenant_id.as_deref(), Some("acme"));
        assert_eq!(ctx.timeout, Some(Duration::from_secs(2)));
        assert!(!ctx.is_cancelled());

        token.cancel();
        assert!(ctx.is_cancelled());
    }

    #[test]
    fn test_from_lookup() {
        let ctx = RequestContext::from_lookup(|key| {
            (key == TENANT_ID_ENV).then(|| "tenant-7".to_string())
        });
        assert_eq!(ctx.tenant_id.as_deref(), Some("tenant-7"));

        let empty = RequestContext::from_lookup(|_| Some(String::new()));
        assert!(empty.tenant_id.is_none());
    }

    #[tokio::test]
    async fn test_cancelled_resolves_after_cancel() {
        let token = CancelToken::new();
        let waiter = token.clone();
        let handle = tokio::spawn(async move { waiter.cancelled().await });

        token.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("cancelled() should resolve")
            .unwrap();
    }

    #[tokio::test]
    async fn test_cancelled_resolves_when_already_cancelled() {
        let token = CancelToken::new();
        token.cancel();
        tokio::time::timeout(Duration::from_secs(1), token.cancelled())
            .await
            .expect("already-cancelled token should resolve immediately");
        assert!(token.is_cancelled());
    }
}
