//! Device capabilities consulted while building and executing render passes.

use crate::render_pass::DepthStencilFlags;
use crate::types::{Extent2d, TextureFormat, TextureInfo, TextureUsage};

/// Capabilities of a graphics device.
///
/// `Caps` is plain configuration: backends fill it in once and tasks query it
/// through the [`Context`](crate::Context).
///
/// # Example
///
/// ```
/// use redlilium_render_tasks::Caps;
///
/// let caps = Caps::default()
///     .with_default_msaa_sample_count(8)
///     .with_depth_attachment_granularity(16);
/// assert_eq!(caps.default_msaa_sample_count(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Caps {
    /// Maximum texture dimension.
    max_texture_dimension: u32,
    /// Sample count used for multisampled color attachments.
    default_msaa_sample_count: u32,
    /// Depth attachments are rounded up to a multiple of this many pixels so
    /// that targets of similar size can share one attachment.
    depth_attachment_granularity: u32,
    /// Whether multisampled rendering with a resolve attachment is supported.
    msaa_supported: bool,
}

impl Default for Caps {
    fn default() -> Self {
        Self {
            max_texture_dimension: 16384,
            default_msaa_sample_count: 4,
            depth_attachment_granularity: 1,
            msaa_supported: true,
        }
    }
}

impl Caps {
    /// Set the maximum texture dimension.
    pub fn with_max_texture_dimension(mut self, dimension: u32) -> Self {
        self.max_texture_dimension = dimension;
        self
    }

    /// Set the default MSAA sample count.
    pub fn with_default_msaa_sample_count(mut self, count: u32) -> Self {
        self.default_msaa_sample_count = count;
        self
    }

    /// Set the depth attachment size granularity (1 keeps exact sizes).
    pub fn with_depth_attachment_granularity(mut self, granularity: u32) -> Self {
        self.depth_attachment_granularity = granularity.max(1);
        self
    }

    /// Enable or disable multisampled rendering.
    pub fn with_msaa_supported(mut self, supported: bool) -> Self {
        self.msaa_supported = supported;
        self
    }

    /// Get the maximum texture dimension.
    pub fn max_texture_dimension(&self) -> u32 {
        self.max_texture_dimension
    }

    /// Get the default MSAA sample count.
    pub fn default_msaa_sample_count(&self) -> u32 {
        self.default_msaa_sample_count
    }

    /// Get the depth attachment granularity.
    pub fn depth_attachment_granularity(&self) -> u32 {
        self.depth_attachment_granularity
    }

    /// Check if multisampled rendering is supported.
    pub fn msaa_supported(&self) -> bool {
        self.msaa_supported && self.default_msaa_sample_count > 1
    }

    /// Shape of the discardable multisampled color attachment paired with a
    /// single-sampled `target_info`.
    ///
    /// Returns an invalid info if MSAA is not supported.
    pub fn default_msaa_texture_info(&self, target_info: &TextureInfo) -> TextureInfo {
        if !self.msaa_supported() || !target_info.is_valid() {
            return TextureInfo::invalid();
        }
        TextureInfo {
            format: target_info.format,
            sample_count: self.default_msaa_sample_count,
            usage: TextureUsage::RENDER_ATTACHMENT,
            mipmapped: false,
            protected: target_info.protected,
        }
    }

    /// Shape of the depth/stencil attachment for the requested aspects.
    ///
    /// Returns an invalid info when `flags` is empty.
    pub fn default_depth_stencil_texture_info(
        &self,
        flags: DepthStencilFlags,
        sample_count: u32,
        protected: bool,
    ) -> TextureInfo {
        let format = if flags.contains(DepthStencilFlags::DEPTH_STENCIL) {
            TextureFormat::Depth24PlusStencil8
        } else if flags.contains(DepthStencilFlags::DEPTH) {
            TextureFormat::Depth16Unorm
        } else if flags.contains(DepthStencilFlags::STENCIL) {
            TextureFormat::Stencil8
        } else {
            return TextureInfo::invalid();
        };
        TextureInfo::new(format, TextureUsage::RENDER_ATTACHMENT)
            .with_sample_count(sample_count)
            .with_protected(protected)
    }

    /// Dimensions of the depth/stencil attachment used with a color target.
    pub fn depth_attachment_dimensions(
        &self,
        target_info: &TextureInfo,
        target_dimensions: Extent2d,
    ) -> Extent2d {
        debug_assert!(target_info.is_valid());
        let granularity = self.depth_attachment_granularity;
        let round_up = |value: u32| {
            value
                .div_ceil(granularity)
                .saturating_mul(granularity)
                .min(self.max_texture_dimension.max(value))
        };
        Extent2d::new(
            round_up(target_dimensions.width),
            round_up(target_dimensions.height),
        )
    }
}
