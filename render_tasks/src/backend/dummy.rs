//! Dummy backend for testing and development.
//!
//! This backend doesn't talk to a GPU but validates everything it is asked to
//! do, so task logic can be exercised without requiring GPU hardware.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::command_buffer::{CommandBuffer, RenderPassAttachments};
use crate::draw_pass::DrawPass;
use crate::effects::{EffectId, RuntimeEffectDictionary};
use crate::error::GraphicsError;
use crate::render_pass::RenderPassDesc;
use crate::resources::{ResourceProvider, Texture, TextureProxy};
use crate::types::{Extent2d, Offset2d, TextureInfo, Viewport};

// ============================================================================
// Resource Provider
// ============================================================================

type AttachmentKey = (Extent2d, TextureInfo);

#[derive(Default)]
struct ProviderState {
    msaa_attachments: HashMap<AttachmentKey, Arc<Texture>>,
    depth_stencil_attachments: HashMap<AttachmentKey, Arc<Texture>>,
    textures_created: usize,
}

/// Resource provider creating CPU-side [`Texture`] objects.
///
/// Discardable MSAA and depth/stencil attachments are cached by shape and
/// handed out again for every request with the same dimensions and info.
pub struct DummyResourceProvider {
    max_texture_dimension: u32,
    state: Mutex<ProviderState>,
}

impl DummyResourceProvider {
    /// Create a new dummy resource provider.
    pub fn new() -> Self {
        Self {
            max_texture_dimension: 16384,
            state: Mutex::new(ProviderState::default()),
        }
    }

    /// Set the largest dimension the provider accepts.
    pub fn with_max_texture_dimension(mut self, dimension: u32) -> Self {
        self.max_texture_dimension = dimension;
        self
    }

    /// Get the number of textures created so far.
    pub fn textures_created(&self) -> usize {
        self.state.lock().textures_created
    }

    /// Get the number of cached discardable MSAA attachments.
    pub fn msaa_attachment_count(&self) -> usize {
        self.state.lock().msaa_attachments.len()
    }

    /// Get the number of cached depth/stencil attachments.
    pub fn depth_stencil_attachment_count(&self) -> usize {
        self.state.lock().depth_stencil_attachments.len()
    }

    fn validate(&self, dimensions: Extent2d, info: &TextureInfo) -> Result<(), GraphicsError> {
        if dimensions.is_empty() {
            return Err(GraphicsError::InvalidParameter(format!(
                "texture dimensions must be non-zero ({dimensions})"
            )));
        }
        if dimensions.width > self.max_texture_dimension
            || dimensions.height > self.max_texture_dimension
        {
            return Err(GraphicsError::ResourceCreationFailed(format!(
                "texture dimensions {dimensions} exceed maximum {}",
                self.max_texture_dimension
            )));
        }
        if !info.is_valid() {
            return Err(GraphicsError::InvalidParameter(
                "texture info is invalid".to_string(),
            ));
        }
        Ok(())
    }

    fn new_texture(
        state: &mut ProviderState,
        dimensions: Extent2d,
        info: &TextureInfo,
        label: Option<&str>,
    ) -> Arc<Texture> {
        log::trace!(
            "DummyResourceProvider: creating texture {:?} ({}, {} samples)",
            label,
            dimensions,
            info.sample_count
        );
        state.textures_created += 1;
        let texture = Texture::new(dimensions, *info);
        Arc::new(match label {
            Some(label) => texture.with_label(label),
            None => texture,
        })
    }
}

impl Default for DummyResourceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceProvider for DummyResourceProvider {
    fn create_texture(
        &self,
        dimensions: Extent2d,
        info: &TextureInfo,
        label: Option<&str>,
    ) -> Result<Arc<Texture>, GraphicsError> {
        self.validate(dimensions, info)?;
        Ok(Self::new_texture(&mut self.state.lock(), dimensions, info, label))
    }

    fn find_or_create_discardable_msaa_attachment(
        &self,
        dimensions: Extent2d,
        info: &TextureInfo,
    ) -> Result<Arc<Texture>, GraphicsError> {
        self.validate(dimensions, info)?;
        if !info.is_multisampled() {
            return Err(GraphicsError::InvalidParameter(
                "discardable MSAA attachment must be multisampled".to_string(),
            ));
        }

        let mut state = self.state.lock();
        if let Some(texture) = state.msaa_attachments.get(&(dimensions, *info)) {
            return Ok(Arc::clone(texture));
        }
        let texture = Self::new_texture(&mut state, dimensions, info, Some("discardable msaa"));
        state
            .msaa_attachments
            .insert((dimensions, *info), Arc::clone(&texture));
        Ok(texture)
    }

    fn find_or_create_depth_stencil_attachment(
        &self,
        dimensions: Extent2d,
        info: &TextureInfo,
    ) -> Result<Arc<Texture>, GraphicsError> {
        self.validate(dimensions, info)?;
        if !info.format.is_some_and(|format| format.is_depth_stencil()) {
            return Err(GraphicsError::InvalidParameter(
                "depth/stencil attachment needs a depth or stencil format".to_string(),
            ));
        }

        let mut state = self.state.lock();
        if let Some(texture) = state.depth_stencil_attachments.get(&(dimensions, *info)) {
            return Ok(Arc::clone(texture));
        }
        let texture = Self::new_texture(&mut state, dimensions, info, Some("depth stencil"));
        state
            .depth_stencil_attachments
            .insert((dimensions, *info), Arc::clone(&texture));
        Ok(texture)
    }
}

impl std::fmt::Debug for DummyResourceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("DummyResourceProvider")
            .field("max_texture_dimension", &self.max_texture_dimension)
            .field("textures_created", &state.textures_created)
            .finish()
    }
}

static_assertions::assert_impl_all!(DummyResourceProvider: Send, Sync);

// ============================================================================
// Command Buffer
// ============================================================================

/// A render pass accepted by a [`DummyCommandBuffer`].
#[derive(Debug, Clone)]
pub struct RecordedRenderPass {
    /// Descriptor the pass was recorded with.
    pub desc: RenderPassDesc,
    /// Live attachments bound to the pass.
    pub attachments: RenderPassAttachments,
    /// Viewport of the pass.
    pub viewport: Viewport,
    /// Number of draw passes executed in the pass.
    pub draw_pass_count: usize,
    /// Replay translation active when the pass was recorded.
    pub translation: Option<Offset2d>,
}

/// Command buffer that checks and records render passes.
#[derive(Debug, Default)]
pub struct DummyCommandBuffer {
    replay_translation: Option<Offset2d>,
    render_passes: Vec<RecordedRenderPass>,
}

impl DummyCommandBuffer {
    /// Create an empty command buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently active replay translation.
    pub fn replay_translation(&self) -> Option<Offset2d> {
        self.replay_translation
    }

    /// Get the recorded render passes.
    pub fn render_passes(&self) -> &[RecordedRenderPass] {
        &self.render_passes
    }

    fn validate(
        desc: &RenderPassDesc,
        attachments: &RenderPassAttachments,
    ) -> Result<(), GraphicsError> {
        let color = &attachments.color;
        if color.sample_count() != desc.color_attachment.sample_count() {
            return Err(GraphicsError::InvalidParameter(format!(
                "color attachment has {} samples, descriptor expects {}",
                color.sample_count(),
                desc.color_attachment.sample_count()
            )));
        }

        match (&attachments.resolve, desc.has_resolve()) {
            (Some(resolve), true) => {
                if resolve.sample_count() != 1 || resolve.dimensions() != color.dimensions() {
                    return Err(GraphicsError::InvalidParameter(
                        "resolve attachment must be single-sampled and match the color size"
                            .to_string(),
                    ));
                }
            }
            (None, false) => {}
            _ => {
                return Err(GraphicsError::InvalidParameter(
                    "resolve attachment does not match descriptor".to_string(),
                ));
            }
        }

        match (&attachments.depth_stencil, desc.has_depth_stencil()) {
            (Some(depth_stencil), true) => {
                let dims = depth_stencil.dimensions();
                if depth_stencil.sample_count() != desc.sample_count
                    || dims.width < color.width()
                    || dims.height < color.height()
                {
                    return Err(GraphicsError::InvalidParameter(
                        "depth/stencil attachment incompatible with color attachment".to_string(),
                    ));
                }
            }
            (None, false) => {}
            _ => {
                return Err(GraphicsError::InvalidParameter(
                    "depth/stencil attachment does not match descriptor".to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl CommandBuffer for DummyCommandBuffer {
    fn set_replay_translation(&mut self, translation: Offset2d) {
        self.replay_translation = Some(translation);
    }

    fn clear_replay_translation(&mut self) {
        self.replay_translation = None;
    }

    fn add_render_pass(
        &mut self,
        desc: &RenderPassDesc,
        attachments: RenderPassAttachments,
        viewport: Viewport,
        draw_passes: &[Arc<dyn DrawPass>],
    ) -> Result<(), GraphicsError> {
        Self::validate(desc, &attachments)?;
        log::trace!(
            "DummyCommandBuffer: recording render pass ({} samples, {} draw passes)",
            desc.sample_count,
            draw_passes.len()
        );
        self.render_passes.push(RecordedRenderPass {
            desc: *desc,
            attachments,
            viewport,
            draw_pass_count: draw_passes.len(),
            translation: self.replay_translation,
        });
        Ok(())
    }
}

// ============================================================================
// Draw Pass
// ============================================================================

/// Draw pass that instantiates the textures it samples and checks its effects.
#[derive(Debug, Default)]
pub struct DummyDrawPass {
    sampled_textures: Vec<Arc<TextureProxy>>,
    required_effects: Vec<EffectId>,
    draw_count: usize,
    prepare_count: AtomicUsize,
}

impl DummyDrawPass {
    /// Create an empty draw pass.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample `texture` in this pass.
    pub fn with_sampled_texture(mut self, texture: Arc<TextureProxy>) -> Self {
        self.sampled_textures.push(texture);
        self
    }

    /// Require `effect` to be registered when preparing.
    pub fn with_required_effect(mut self, effect: EffectId) -> Self {
        self.required_effects.push(effect);
        self
    }

    /// Set the number of draws.
    pub fn with_draw_count(mut self, count: usize) -> Self {
        self.draw_count = count;
        self
    }

    /// Get how many times resources were prepared.
    pub fn prepare_count(&self) -> usize {
        self.prepare_count.load(Ordering::Relaxed)
    }
}

impl DrawPass for DummyDrawPass {
    fn prepare_resources(
        &self,
        provider: &dyn ResourceProvider,
        effects: &RuntimeEffectDictionary,
        desc: &RenderPassDesc,
    ) -> Result<(), GraphicsError> {
        self.prepare_count.fetch_add(1, Ordering::Relaxed);

        for texture in &self.sampled_textures {
            texture.instantiate_if_not_lazy(provider)?;
        }

        for &id in &self.required_effects {
            let effect = effects.find(id).ok_or_else(|| {
                GraphicsError::InvalidParameter(format!(
                    "runtime effect {:?} is not registered",
                    id
                ))
            })?;
            if effect.source().is_empty() {
                return Err(GraphicsError::InvalidParameter(format!(
                    "runtime effect '{}' has no source",
                    effect.label()
                )));
            }
        }

        log::trace!(
            "DummyDrawPass: prepared {} draws for {} samples",
            self.draw_count,
            desc.sample_count
        );
        Ok(())
    }

    fn draw_count(&self) -> usize {
        self.draw_count
    }
}
