//! Scratch texture tracking.

use std::sync::Arc;

use crate::error::GraphicsError;
use crate::resources::{ResourceProvider, Texture};
use crate::types::{Extent2d, TextureInfo};

/// Hands out short-lived textures and reclaims them between tasks.
///
/// Textures returned with [`return_texture`](Self::return_texture) stay pending
/// until the next [`notify_resources_consumed`](Self::notify_resources_consumed),
/// since tasks prepared earlier may still reference them. Only textures nobody
/// else holds are handed out again.
pub struct ScratchResourceManager {
    provider: Arc<dyn ResourceProvider>,
    available: Vec<Arc<Texture>>,
    pending: Vec<Arc<Texture>>,
    notification_count: u64,
}

impl ScratchResourceManager {
    /// Create a scratch manager allocating through `provider`.
    pub fn new(provider: Arc<dyn ResourceProvider>) -> Self {
        Self {
            provider,
            available: Vec::new(),
            pending: Vec::new(),
            notification_count: 0,
        }
    }

    /// Get a texture matching `dimensions` and `info`, reusing an available one if possible.
    pub fn get_scratch_texture(
        &mut self,
        dimensions: Extent2d,
        info: &TextureInfo,
        label: Option<&str>,
    ) -> Result<Arc<Texture>, GraphicsError> {
        let reusable = self.available.iter().position(|texture| {
            texture.dimensions() == dimensions
                && info.is_compatible_with(texture.info())
                && Texture::is_sole_owner(texture)
        });
        if let Some(index) = reusable {
            log::trace!("Reusing scratch texture ({})", dimensions);
            return Ok(self.available.swap_remove(index));
        }

        self.provider.create_texture(dimensions, info, label)
    }

    /// Give a scratch texture back; it becomes reusable after the next notification.
    pub fn return_texture(&mut self, texture: Arc<Texture>) {
        self.pending.push(texture);
    }

    /// Called once a task has consumed its scratch resources.
    pub fn notify_resources_consumed(&mut self) {
        self.notification_count += 1;
        self.available.append(&mut self.pending);
    }

    /// Drop every available texture, releasing the pool's references.
    ///
    /// Pending textures are kept, since prepared tasks may still use them.
    pub fn purge(&mut self) {
        if !self.available.is_empty() {
            log::debug!("Purging {} scratch textures", self.available.len());
        }
        self.available.clear();
    }

    /// Get the number of textures ready for reuse.
    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    /// Get the number of returned textures awaiting the next notification.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Get how many times resources were reported consumed.
    pub fn notification_count(&self) -> u64 {
        self.notification_count
    }
}

impl std::fmt::Debug for ScratchResourceManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScratchResourceManager")
            .field("available", &self.available.len())
            .field("pending", &self.pending.len())
            .field("notification_count", &self.notification_count)
            .finish()
    }
}
