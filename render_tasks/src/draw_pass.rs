//! Draw pass trait.

use std::sync::Arc;

use crate::effects::RuntimeEffectDictionary;
use crate::error::GraphicsError;
use crate::render_pass::RenderPassDesc;
use crate::resources::ResourceProvider;

/// A recorded batch of draws executed inside one render pass.
///
/// Draw passes are built by the recorder and shared with the render pass task
/// and, after recording, with the command buffer that replays them.
pub trait DrawPass: Send + Sync + std::fmt::Debug {
    /// Instantiate the textures the draws sample and compile their pipelines
    /// against the render pass they will run in.
    fn prepare_resources(
        &self,
        provider: &dyn ResourceProvider,
        effects: &RuntimeEffectDictionary,
        desc: &RenderPassDesc,
    ) -> Result<(), GraphicsError>;

    /// Number of draws in the pass.
    fn draw_count(&self) -> usize {
        0
    }
}

/// Ordered draw passes of a render pass.
pub type DrawPassList = Vec<Arc<dyn DrawPass>>;
