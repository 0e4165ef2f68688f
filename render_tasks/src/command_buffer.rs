//! Command buffer trait and render pass attachments.

use std::sync::Arc;

use crate::draw_pass::DrawPass;
use crate::error::GraphicsError;
use crate::render_pass::RenderPassDesc;
use crate::resources::Texture;
use crate::types::{Offset2d, Viewport};

/// Live textures bound to a render pass.
#[derive(Debug, Clone)]
pub struct RenderPassAttachments {
    /// Texture the draws render into.
    pub color: Arc<Texture>,
    /// Texture receiving the resolved color, if the color is multisampled.
    pub resolve: Option<Arc<Texture>>,
    /// Depth/stencil texture, if any.
    pub depth_stencil: Option<Arc<Texture>>,
}

impl RenderPassAttachments {
    /// Create attachments with only a color texture.
    pub fn new(color: Arc<Texture>) -> Self {
        Self {
            color,
            resolve: None,
            depth_stencil: None,
        }
    }

    /// Set the resolve texture.
    pub fn with_resolve(mut self, resolve: Arc<Texture>) -> Self {
        self.resolve = Some(resolve);
        self
    }

    /// Set the depth/stencil texture.
    pub fn with_depth_stencil(mut self, depth_stencil: Arc<Texture>) -> Self {
        self.depth_stencil = Some(depth_stencil);
        self
    }
}

/// Receives render passes and turns them into GPU commands.
pub trait CommandBuffer {
    /// Offset all following passes by `translation`.
    fn set_replay_translation(&mut self, translation: Offset2d);

    /// Stop offsetting following passes.
    fn clear_replay_translation(&mut self);

    /// Record a render pass running `draw_passes` against `attachments`.
    fn add_render_pass(
        &mut self,
        desc: &RenderPassDesc,
        attachments: RenderPassAttachments,
        viewport: Viewport,
        draw_passes: &[Arc<dyn DrawPass>],
    ) -> Result<(), GraphicsError>;
}
