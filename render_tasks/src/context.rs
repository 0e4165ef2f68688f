//! Execution context shared by tasks while emitting commands.

use std::sync::Arc;

use crate::caps::Caps;
use crate::resources::ResourceProvider;

/// Device capabilities and the resource provider used while recording commands.
#[derive(Clone)]
pub struct Context {
    caps: Caps,
    resource_provider: Arc<dyn ResourceProvider>,
}

impl Context {
    /// Create a new context.
    pub fn new(caps: Caps, resource_provider: Arc<dyn ResourceProvider>) -> Self {
        Self {
            caps,
            resource_provider,
        }
    }

    /// Get the device capabilities.
    pub fn caps(&self) -> &Caps {
        &self.caps
    }

    /// Get the resource provider.
    pub fn resource_provider(&self) -> &dyn ResourceProvider {
        self.resource_provider.as_ref()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context").field("caps", &self.caps).finish()
    }
}

static_assertions::assert_impl_all!(Context: Send, Sync);
