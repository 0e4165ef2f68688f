//! # RedLilium Render Tasks
//!
//! Render pass nodes for the RedLilium GPU task graph.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`RenderPassTask`] - Draws a list of draw passes into one render target
//! - [`Task`] - Two-phase contract every graph node follows
//! - [`TaskList`] - Ordered driver running tasks through both phases
//! - [`TextureProxy`] - Lazily instantiated texture handle
//! - [`ScratchResourceManager`] - Reuse of short-lived textures between tasks
//! - A dummy backend for headless testing (feature `dummy`)
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use redlilium_render_tasks::{
//!     Caps, Context, DepthStencilFlags, DrawPass, Extent2d, LoadOp, RenderPassDesc,
//!     RenderPassTask, ReplayTargetData, RuntimeEffectDictionary, ScratchResourceManager,
//!     StoreOp, Task, TaskStatus, TextureFormat, TextureInfo, TextureProxy,
//! };
//! use redlilium_render_tasks::backend::dummy::{
//!     DummyCommandBuffer, DummyDrawPass, DummyResourceProvider,
//! };
//!
//! let provider = Arc::new(DummyResourceProvider::new());
//! let context = Context::new(Caps::default(), provider.clone());
//! let mut scratch = ScratchResourceManager::new(provider.clone());
//! let effects = RuntimeEffectDictionary::new();
//!
//! let target_info = TextureInfo::render_target(TextureFormat::Rgba8Unorm);
//! let target = Arc::new(TextureProxy::new(Extent2d::new(640, 480), target_info));
//! let desc = RenderPassDesc::new(
//!     context.caps(),
//!     &target_info,
//!     LoadOp::Clear,
//!     StoreOp::Store,
//!     DepthStencilFlags::DEPTH,
//!     [0.0, 0.0, 0.0, 1.0],
//!     true,
//! );
//!
//! let draw_pass: Arc<dyn DrawPass> = Arc::new(DummyDrawPass::new());
//! let mut task = RenderPassTask::make(vec![draw_pass], &desc, Some(target)).unwrap();
//!
//! let mut command_buffer = DummyCommandBuffer::new();
//! task.prepare_resources(provider.as_ref(), &mut scratch, &effects).unwrap();
//! let status = task
//!     .add_commands(&context, &mut command_buffer, &ReplayTargetData::none())
//!     .unwrap();
//! assert_eq!(status, TaskStatus::Success);
//! ```

pub mod backend;
mod caps;
mod command_buffer;
mod context;
mod draw_pass;
mod effects;
mod error;
mod render_pass;
pub mod resources;
pub mod task;
pub mod types;

// Re-export main types for convenience
pub use caps::Caps;
pub use command_buffer::{CommandBuffer, RenderPassAttachments};
pub use context::Context;
pub use draw_pass::{DrawPass, DrawPassList};
pub use effects::{EffectId, RuntimeEffect, RuntimeEffectDictionary};
pub use error::{GraphicsError, TaskError};
pub use render_pass::{AttachmentDesc, DepthStencilFlags, LoadOp, RenderPassDesc, StoreOp};
pub use resources::{
    LazyInstantiateCallback, ResourceProvider, ScratchResourceManager, Texture, TextureId,
    TextureProxy, Volatile,
};
pub use task::{ReplayTargetData, RenderPassTask, Task, TaskList, TaskResult, TaskState, TaskStatus};
pub use types::{Extent2d, Offset2d, TextureFormat, TextureInfo, TextureUsage, Viewport};

/// Render tasks library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the render task subsystem.
///
/// Only logs the library version; call it once at startup.
pub fn init() {
    log::info!("RedLilium Render Tasks v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_task_list_creation() {
        let list = TaskList::new();
        assert!(list.is_empty());
    }

    #[cfg(feature = "dummy")]
    #[test]
    fn test_dummy_provider() {
        let provider = backend::dummy::DummyResourceProvider::new();
        let texture = provider
            .create_texture(
                Extent2d::new(4, 4),
                &TextureInfo::render_target(TextureFormat::Rgba8Unorm),
                Some("test"),
            )
            .unwrap();
        assert_eq!(texture.label(), Some("test"));
    }
}
