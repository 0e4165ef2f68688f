//! Live GPU texture resource.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::{Extent2d, TextureInfo};

/// Process-unique identity of a [`Texture`].
///
/// Replay data names its target by id so that a recording can be matched
/// against the texture a task actually draws into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(u64);

impl TextureId {
    fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A live texture resource.
///
/// Textures are created by a [`ResourceProvider`](crate::ResourceProvider) and
/// shared as `Arc<Texture>` between proxies, the scratch manager, and
/// recorded render passes.
pub struct Texture {
    id: TextureId,
    dimensions: Extent2d,
    info: TextureInfo,
    label: Option<String>,
}

impl Texture {
    /// Create a new texture with a fresh id.
    pub fn new(dimensions: Extent2d, info: TextureInfo) -> Self {
        Self {
            id: TextureId::next(),
            dimensions,
            info,
            label: None,
        }
    }

    /// Set the debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the texture id.
    pub fn id(&self) -> TextureId {
        self.id
    }

    /// Get the texture dimensions.
    pub fn dimensions(&self) -> Extent2d {
        self.dimensions
    }

    /// Get the texture width.
    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    /// Get the texture height.
    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    /// Get the texture shape.
    pub fn info(&self) -> &TextureInfo {
        &self.info
    }

    /// Get the sample count.
    pub fn sample_count(&self) -> u32 {
        self.info.sample_count
    }

    /// Get the texture label, if set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Check if `texture` has no owners besides the caller's handle.
    pub fn is_sole_owner(texture: &Arc<Texture>) -> bool {
        Arc::strong_count(texture) == 1
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("id", &self.id.0)
            .field("dimensions", &self.dimensions)
            .field("format", &self.info.format)
            .field("sample_count", &self.info.sample_count)
            .field("label", &self.label)
            .finish()
    }
}

static_assertions::assert_impl_all!(Texture: Send, Sync);
