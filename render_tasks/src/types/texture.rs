//! Texture formats, usage flags, and shape descriptors.

use bitflags::bitflags;

/// Texture format enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum TextureFormat {
    /// 8-bit red channel, unsigned normalized.
    R8Unorm,
    /// 16-bit red channel, float.
    R16Float,
    /// 8-bit RGBA channels, unsigned normalized.
    #[default]
    Rgba8Unorm,
    /// 8-bit RGBA channels, sRGB.
    Rgba8UnormSrgb,
    /// 8-bit BGRA channels, unsigned normalized.
    Bgra8Unorm,
    /// 16-bit RGBA channels, float.
    Rgba16Float,

    // Depth/stencil formats
    /// 8-bit stencil.
    Stencil8,
    /// 16-bit depth.
    Depth16Unorm,
    /// 32-bit depth, float.
    Depth32Float,
    /// 24-bit depth with 8-bit stencil.
    Depth24PlusStencil8,
    /// 32-bit depth float with 8-bit stencil.
    Depth32FloatStencil8,
}

impl TextureFormat {
    /// Returns true if this is a depth or stencil format.
    pub fn is_depth_stencil(&self) -> bool {
        self.has_depth() || self.has_stencil()
    }

    /// Returns true if this format has a depth component.
    pub fn has_depth(&self) -> bool {
        matches!(
            self,
            Self::Depth16Unorm
                | Self::Depth32Float
                | Self::Depth24PlusStencil8
                | Self::Depth32FloatStencil8
        )
    }

    /// Returns true if this format has a stencil component.
    pub fn has_stencil(&self) -> bool {
        matches!(
            self,
            Self::Stencil8 | Self::Depth24PlusStencil8 | Self::Depth32FloatStencil8
        )
    }
}

bitflags! {
    /// Usage flags for textures.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextureUsage: u32 {
        /// Texture can be copied from.
        const COPY_SRC = 1 << 0;
        /// Texture can be copied to.
        const COPY_DST = 1 << 1;
        /// Texture can be sampled in a shader.
        const TEXTURE_BINDING = 1 << 2;
        /// Texture can be used as a storage texture.
        const STORAGE_BINDING = 1 << 3;
        /// Texture can be used as a render attachment.
        const RENDER_ATTACHMENT = 1 << 4;
    }
}

impl Default for TextureUsage {
    fn default() -> Self {
        Self::empty()
    }
}

/// Backend-independent shape of a texture.
///
/// A default-constructed `TextureInfo` has no format and is invalid; render pass
/// descriptors use invalid infos to mark attachments that are not present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureInfo {
    /// Pixel format, `None` for an invalid info.
    pub format: Option<TextureFormat>,
    /// Number of samples per pixel.
    pub sample_count: u32,
    /// Usage flags.
    pub usage: TextureUsage,
    /// Whether the texture has a full mip chain.
    pub mipmapped: bool,
    /// Whether the texture lives in protected memory.
    pub protected: bool,
}

impl TextureInfo {
    /// Create a single-sampled texture info with the given format and usage.
    pub fn new(format: TextureFormat, usage: TextureUsage) -> Self {
        Self {
            format: Some(format),
            sample_count: 1,
            usage,
            mipmapped: false,
            protected: false,
        }
    }

    /// Create a render-attachment info suitable for a color target.
    pub fn render_target(format: TextureFormat) -> Self {
        Self::new(
            format,
            TextureUsage::RENDER_ATTACHMENT | TextureUsage::TEXTURE_BINDING,
        )
    }

    /// An info describing no texture.
    pub fn invalid() -> Self {
        Self::default()
    }

    /// Set the sample count.
    pub fn with_sample_count(mut self, count: u32) -> Self {
        self.sample_count = count;
        self
    }

    /// Set the protected flag.
    pub fn with_protected(mut self, protected: bool) -> Self {
        self.protected = protected;
        self
    }

    /// Returns true if this info describes an actual texture.
    pub fn is_valid(&self) -> bool {
        self.format.is_some() && self.sample_count > 0
    }

    /// Returns true if more than one sample is stored per pixel.
    pub fn is_multisampled(&self) -> bool {
        self.sample_count > 1
    }

    /// Check if a texture created with `other` can stand in for one described by `self`.
    ///
    /// Format, sample count, and protection must match and `other` must provide at
    /// least the usages `self` asks for.
    pub fn is_compatible_with(&self, other: &TextureInfo) -> bool {
        self.is_valid()
            && other.is_valid()
            && self.format == other.format
            && self.sample_count == other.sample_count
            && self.protected == other.protected
            && other.usage.contains(self.usage)
    }
}

impl Default for TextureInfo {
    fn default() -> Self {
        Self {
            format: None,
            sample_count: 1,
            usage: TextureUsage::empty(),
            mipmapped: false,
            protected: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_info_is_invalid() {
        assert!(!TextureInfo::default().is_valid());
        assert!(!TextureInfo::invalid().is_valid());
    }

    #[test]
    fn test_zero_samples_is_invalid() {
        let info = TextureInfo::render_target(TextureFormat::Rgba8Unorm).with_sample_count(0);
        assert!(!info.is_valid());
    }

    #[test]
    fn test_multisampled() {
        let info = TextureInfo::render_target(TextureFormat::Rgba8Unorm);
        assert!(!info.is_multisampled());
        assert!(info.with_sample_count(4).is_multisampled());
    }

    #[test]
    fn test_compatibility_requires_matching_samples() {
        let single = TextureInfo::render_target(TextureFormat::Rgba8Unorm);
        let msaa = single.with_sample_count(4);
        assert!(single.is_compatible_with(&single));
        assert!(!single.is_compatible_with(&msaa));
    }

    #[test]
    fn test_compatibility_allows_extra_usage() {
        let wanted = TextureInfo::new(TextureFormat::Rgba8Unorm, TextureUsage::RENDER_ATTACHMENT);
        let provided = TextureInfo::new(
            TextureFormat::Rgba8Unorm,
            TextureUsage::RENDER_ATTACHMENT | TextureUsage::COPY_SRC,
        );
        assert!(wanted.is_compatible_with(&provided));
        assert!(!provided.is_compatible_with(&wanted));
    }

    #[test]
    fn test_depth_stencil_formats() {
        assert!(TextureFormat::Depth32Float.has_depth());
        assert!(!TextureFormat::Depth32Float.has_stencil());
        assert!(TextureFormat::Stencil8.is_depth_stencil());
        assert!(TextureFormat::Depth24PlusStencil8.has_stencil());
        assert!(!TextureFormat::Rgba8Unorm.is_depth_stencil());
    }
}
