//! # Gateway registry: channel → gateway resolution with construct-once caching.
//!
//! [`GatewayRegistry`] maps each [`Channel`] to a shared gateway instance.
//! The first resolution for a channel constructs and caches the gateway;
//! every later resolution returns the cached `Arc`.
//!
//! ## Architecture
//! ```text
//! Worker 1 ──┐
//! Worker 2 ──┼── resolve(channel) ──► RwLock<HashMap<Channel, GatewayRef>>
//! Worker N ──┘                              │
//!                                           ▼
//!                            read hit ──► Arc::clone (fast path)
//!                            read miss ─► write lock ─► re-check ─► construct
//! ```
//!
//! ## Rules
//! - Construction for a given channel happens **at most once**, even when
//!   several workers race their first resolution: the write path re-checks
//!   the map before constructing (double-checked acquisition).
//! - Gateways are immutable once constructed; only the map itself is guarded.
//! - The registry is owned by the pool and passed by reference to workers —
//!   no process-wide mutable state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::gateways::{EmailGateway, Gateway, GatewayRef, PushGateway, SmsGateway};
use crate::notifications::Channel;

/// Construct-once cache of per-channel gateways.
pub struct GatewayRegistry {
    gateways: RwLock<HashMap<Channel, GatewayRef>>,
}

impl GatewayRegistry {
    /// Creates an empty registry; gateways are constructed on first
    /// resolution.
    pub fn new() -> Self {
        Self {
            gateways: RwLock::new(HashMap::new()),
        }
    }

    /// Resolves the gateway for `channel`, constructing and caching it on
    /// first use.
    ///
    /// Concurrent callers resolving the same channel all receive the same
    /// instance (pointer-equal `Arc`).
    pub async fn resolve(&self, channel: Channel) -> GatewayRef {
        if let Some(gateway) = self.gateways.read().await.get(&channel) {
            return Arc::clone(gateway);
        }

        let mut gateways = self.gateways.write().await;
        if let Some(gateway) = gateways.get(&channel) {
            return Arc::clone(gateway);
        }

        let gateway = Self::construct(channel);
        gateways.insert(channel, Arc::clone(&gateway));
        gateway
    }

    /// Installs a gateway for `channel`, replacing any cached instance.
    ///
    /// Subsequent [`resolve`](GatewayRegistry::resolve) calls for that
    /// channel return the installed gateway. Useful for plugging custom
    /// implementations (simulated flaky transports, instrumented fakes).
    pub async fn install(&self, channel: Channel, gateway: impl Gateway) {
        self.gateways
            .write()
            .await
            .insert(channel, Arc::new(gateway));
    }

    fn construct(channel: Channel) -> GatewayRef {
        match channel {
            Channel::Email => Arc::new(EmailGateway),
            Channel::Sms => Arc::new(SmsGateway),
            Channel::Push => Arc::new(PushGateway),
        }
    }
}

impl Default for GatewayRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_caches_per_channel() {
        let registry = GatewayRegistry::new();

        let first = registry.resolve(Channel::Email).await;
        let second = registry.resolve(Channel::Email).await;
        assert!(Arc::ptr_eq(&first, &second));

        let sms = registry.resolve(Channel::Sms).await;
        assert!(!Arc::ptr_eq(&first, &sms));
        assert_eq!(sms.channel(), Channel::Sms);
    }

    #[tokio::test]
    async fn test_concurrent_first_resolution_yields_one_instance() {
        let registry = Arc::new(GatewayRegistry::new());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(
                async move { registry.resolve(Channel::Push).await },
            ));
        }

        let mut resolved = Vec::new();
        for handle in handles {
            resolved.push(handle.await.expect("resolution task panicked"));
        }

        let first = &resolved[0];
        for gateway in &resolved {
            assert!(Arc::ptr_eq(first, gateway));
        }
    }

    #[tokio::test]
    async fn test_install_replaces_cached_instance() {
        let registry = GatewayRegistry::new();
        let original = registry.resolve(Channel::Sms).await;

        registry.install(Channel::Sms, SmsGateway).await;
        let replaced = registry.resolve(Channel::Sms).await;
        assert!(!Arc::ptr_eq(&original, &replaced));
    }
}
