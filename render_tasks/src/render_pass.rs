//! Render pass descriptors.
//!
//! A [`RenderPassDesc`] describes the shape of every attachment a render pass
//! binds (color, optional resolve, optional depth/stencil) together with the
//! pass-wide sample count and clear values. Descriptors only carry
//! [`TextureInfo`]s; the live textures are selected when the pass is recorded.

use bitflags::bitflags;

use crate::caps::Caps;
use crate::types::TextureInfo;

/// Operation to perform when loading an attachment at the start of a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadOp {
    /// Load the existing contents of the attachment.
    #[default]
    Load,
    /// Clear the attachment with the descriptor's clear value.
    Clear,
    /// Don't care about the existing contents (may be undefined).
    DontCare,
}

/// Operation to perform when storing an attachment at the end of a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StoreOp {
    /// Store the attachment contents for later use.
    #[default]
    Store,
    /// Don't care about the contents after the pass (may be discarded).
    DontCare,
}

bitflags! {
    /// Depth/stencil aspects a render pass needs.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DepthStencilFlags: u8 {
        /// A depth buffer is needed.
        const DEPTH = 1 << 0;
        /// A stencil buffer is needed.
        const STENCIL = 1 << 1;
        /// Both depth and stencil are needed.
        const DEPTH_STENCIL = Self::DEPTH.bits() | Self::STENCIL.bits();
    }
}

/// Shape and load/store behavior of one attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AttachmentDesc {
    /// Shape of the attachment; invalid when the attachment is absent.
    pub texture_info: TextureInfo,
    /// Operation when loading the attachment.
    pub load_op: LoadOp,
    /// Operation when storing the attachment.
    pub store_op: StoreOp,
}

impl AttachmentDesc {
    /// Create an attachment descriptor.
    pub fn new(texture_info: TextureInfo, load_op: LoadOp, store_op: StoreOp) -> Self {
        Self {
            texture_info,
            load_op,
            store_op,
        }
    }

    /// Check if the attachment is present.
    pub fn is_valid(&self) -> bool {
        self.texture_info.is_valid()
    }

    /// Get the attachment sample count.
    pub fn sample_count(&self) -> u32 {
        self.texture_info.sample_count
    }
}

/// Description of a render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderPassDesc {
    /// Color attachment the draws render into.
    pub color_attachment: AttachmentDesc,
    /// Single-sampled attachment receiving the resolved color, if any.
    pub color_resolve_attachment: AttachmentDesc,
    /// Depth/stencil attachment, if any.
    pub depth_stencil_attachment: AttachmentDesc,
    /// Clear color (RGBA) used when the color load op is `Clear`.
    pub clear_color: [f32; 4],
    /// Depth clear value.
    pub clear_depth: f32,
    /// Stencil clear value.
    pub clear_stencil: u32,
    /// Sample count shared by every rasterized attachment of the pass.
    pub sample_count: u32,
}

impl Default for RenderPassDesc {
    fn default() -> Self {
        Self {
            color_attachment: AttachmentDesc::default(),
            color_resolve_attachment: AttachmentDesc::default(),
            depth_stencil_attachment: AttachmentDesc::default(),
            clear_color: [0.0, 0.0, 0.0, 0.0],
            clear_depth: 1.0,
            clear_stencil: 0,
            sample_count: 1,
        }
    }
}

impl RenderPassDesc {
    /// Build the descriptor for drawing into a target of shape `target_info`.
    ///
    /// When `requires_msaa` is set and the target is single-sampled, the pass
    /// renders into a discardable multisampled attachment that resolves into
    /// the target. If the device has no MSAA support the pass falls back to
    /// single-sampled rendering. Depth and stencil are cleared to zero at the
    /// start of the pass and discarded at its end.
    ///
    /// # Panics
    ///
    /// Panics if `store_op` is not [`StoreOp::Store`]: the target of a draw
    /// pass is always kept.
    pub fn new(
        caps: &Caps,
        target_info: &TextureInfo,
        load_op: LoadOp,
        store_op: StoreOp,
        depth_stencil_flags: DepthStencilFlags,
        clear_color: [f32; 4],
        requires_msaa: bool,
    ) -> Self {
        assert_eq!(
            store_op,
            StoreOp::Store,
            "Render pass target must be stored"
        );

        let mut desc = Self {
            clear_color,
            sample_count: target_info.sample_count,
            color_attachment: AttachmentDesc::new(*target_info, load_op, store_op),
            ..Self::default()
        };

        if requires_msaa && !target_info.is_multisampled() {
            let msaa_info = caps.default_msaa_texture_info(target_info);
            if msaa_info.is_valid() {
                let msaa_load = if load_op == LoadOp::Clear {
                    LoadOp::Clear
                } else {
                    LoadOp::DontCare
                };
                let resolve_load = if load_op == LoadOp::Load {
                    LoadOp::Load
                } else {
                    LoadOp::DontCare
                };
                desc.color_attachment =
                    AttachmentDesc::new(msaa_info, msaa_load, StoreOp::DontCare);
                desc.color_resolve_attachment =
                    AttachmentDesc::new(*target_info, resolve_load, store_op);
                desc.sample_count = msaa_info.sample_count;
            } else {
                log::debug!("MSAA requested but unsupported, rendering single-sampled");
            }
        }

        if !depth_stencil_flags.is_empty() {
            let info = caps.default_depth_stencil_texture_info(
                depth_stencil_flags,
                desc.sample_count,
                target_info.protected,
            );
            desc.depth_stencil_attachment =
                AttachmentDesc::new(info, LoadOp::Clear, StoreOp::DontCare);
            desc.clear_depth = 0.0;
            desc.clear_stencil = 0;
        }

        desc
    }

    /// Check if the color attachment resolves into a separate attachment.
    pub fn has_resolve(&self) -> bool {
        self.color_resolve_attachment.is_valid()
    }

    /// Check if the pass uses a depth/stencil attachment.
    pub fn has_depth_stencil(&self) -> bool {
        self.depth_stencil_attachment.is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TextureFormat;

    fn target_info() -> TextureInfo {
        TextureInfo::render_target(TextureFormat::Rgba8Unorm)
    }

    #[test]
    fn test_load_op_default() {
        assert_eq!(LoadOp::default(), LoadOp::Load);
    }

    #[test]
    fn test_store_op_default() {
        assert_eq!(StoreOp::default(), StoreOp::Store);
    }

    #[test]
    fn test_default_desc_has_no_attachments() {
        let desc = RenderPassDesc::default();
        assert!(!desc.color_attachment.is_valid());
        assert!(!desc.has_resolve());
        assert!(!desc.has_depth_stencil());
        assert_eq!(desc.sample_count, 1);
    }

    #[test]
    fn test_single_sampled_desc() {
        let desc = RenderPassDesc::new(
            &Caps::default(),
            &target_info(),
            LoadOp::Clear,
            StoreOp::Store,
            DepthStencilFlags::empty(),
            [0.1, 0.2, 0.3, 1.0],
            false,
        );
        assert_eq!(desc.color_attachment.texture_info, target_info());
        assert_eq!(desc.color_attachment.load_op, LoadOp::Clear);
        assert!(!desc.has_resolve());
        assert_eq!(desc.sample_count, 1);
        assert_eq!(desc.clear_color, [0.1, 0.2, 0.3, 1.0]);
    }

    #[test]
    fn test_msaa_desc_resolves_into_target() {
        let desc = RenderPassDesc::new(
            &Caps::default(),
            &target_info(),
            LoadOp::Load,
            StoreOp::Store,
            DepthStencilFlags::empty(),
            [0.0; 4],
            true,
        );
        assert_eq!(desc.sample_count, 4);
        assert_eq!(desc.color_attachment.sample_count(), 4);
        assert_eq!(desc.color_attachment.load_op, LoadOp::DontCare);
        assert_eq!(desc.color_attachment.store_op, StoreOp::DontCare);
        assert_eq!(desc.color_resolve_attachment.texture_info, target_info());
        assert_eq!(desc.color_resolve_attachment.load_op, LoadOp::Load);
        assert_eq!(desc.color_resolve_attachment.store_op, StoreOp::Store);
    }

    #[test]
    fn test_msaa_clear_keeps_clear_on_color() {
        let desc = RenderPassDesc::new(
            &Caps::default(),
            &target_info(),
            LoadOp::Clear,
            StoreOp::Store,
            DepthStencilFlags::empty(),
            [0.0; 4],
            true,
        );
        assert_eq!(desc.color_attachment.load_op, LoadOp::Clear);
        assert_eq!(desc.color_resolve_attachment.load_op, LoadOp::DontCare);
    }

    #[test]
    fn test_msaa_falls_back_when_unsupported() {
        let desc = RenderPassDesc::new(
            &Caps::default().with_msaa_supported(false),
            &target_info(),
            LoadOp::Load,
            StoreOp::Store,
            DepthStencilFlags::DEPTH,
            [0.0; 4],
            true,
        );
        assert!(!desc.has_resolve());
        assert_eq!(desc.sample_count, 1);
        assert_eq!(desc.depth_stencil_attachment.sample_count(), 1);
    }

    #[test]
    fn test_depth_stencil_matches_pass_samples() {
        let desc = RenderPassDesc::new(
            &Caps::default(),
            &target_info(),
            LoadOp::Clear,
            StoreOp::Store,
            DepthStencilFlags::DEPTH_STENCIL,
            [0.0; 4],
            true,
        );
        assert!(desc.has_depth_stencil());
        assert_eq!(desc.depth_stencil_attachment.sample_count(), desc.sample_count);
        assert_eq!(desc.depth_stencil_attachment.load_op, LoadOp::Clear);
        assert_eq!(desc.depth_stencil_attachment.store_op, StoreOp::DontCare);
        assert_eq!(desc.clear_depth, 0.0);
    }

    #[test]
    #[should_panic(expected = "Render pass target must be stored")]
    fn test_discarded_target_panics() {
        RenderPassDesc::new(
            &Caps::default(),
            &target_info(),
            LoadOp::Load,
            StoreOp::DontCare,
            DepthStencilFlags::empty(),
            [0.0; 4],
            false,
        );
    }
}
