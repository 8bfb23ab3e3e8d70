//! Platform-to-publisher routing.

use crate::SimulatedPublisher;
use herald_core::Platform;
use herald_interface::Publisher;
use std::collections::HashMap;
use std::sync::Arc;
use strum::IntoEnumIterator;

/// Maps each platform to its publishing adapter.
///
/// # Examples
///
/// ```
/// use herald_core::Platform;
/// use herald_social::PublisherRegistry;
///
/// let registry = PublisherRegistry::simulated();
/// assert!(registry.get(Platform::Twitter).is_some());
/// ```
#[derive(Clone, Default)]
pub struct PublisherRegistry {
    publishers: HashMap<Platform, Arc<dyn Publisher>>,
}

impl PublisherRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry where every platform publishes through
    /// [`SimulatedPublisher`]. Real adapters replace entries via
    /// [`with_publisher`](Self::with_publisher).
    pub fn simulated() -> Self {
        let mut registry = Self::new();
        for platform in Platform::iter() {
            registry
                .publishers
                .insert(platform, Arc::new(SimulatedPublisher::new(platform)));
        }
        registry
    }

    /// Register (or replace) the adapter for its platform.
    pub fn with_publisher(mut self, publisher: Arc<dyn Publisher>) -> Self {
        self.publishers.insert(publisher.platform(), publisher);
        self
    }

    /// The adapter for a platform, when one is registered.
    pub fn get(&self, platform: Platform) -> Option<Arc<dyn Publisher>> {
        self.publishers.get(&platform).cloned()
    }
}
