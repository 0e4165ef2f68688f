//! Resource provider trait.

use std::sync::Arc;

use crate::error::GraphicsError;
use crate::resources::Texture;
use crate::types::{Extent2d, TextureInfo};

/// Creates and caches live textures for the task graph.
///
/// Backends implement this trait; tasks only ever see `&dyn ResourceProvider`.
pub trait ResourceProvider: Send + Sync {
    /// Create a new texture.
    fn create_texture(
        &self,
        dimensions: Extent2d,
        info: &TextureInfo,
        label: Option<&str>,
    ) -> Result<Arc<Texture>, GraphicsError>;

    /// Find or create a multisampled color attachment whose contents are
    /// discarded at the end of every pass, so it can be shared freely.
    fn find_or_create_discardable_msaa_attachment(
        &self,
        dimensions: Extent2d,
        info: &TextureInfo,
    ) -> Result<Arc<Texture>, GraphicsError>;

    /// Find or create a depth/stencil attachment.
    fn find_or_create_depth_stencil_attachment(
        &self,
        dimensions: Extent2d,
        info: &TextureInfo,
    ) -> Result<Arc<Texture>, GraphicsError>;
}
