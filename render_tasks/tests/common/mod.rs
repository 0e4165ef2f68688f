//! Common utilities for render task integration tests.
//!
//! Provides a resource provider that can be told to fail, a command buffer
//! that rejects every pass, and a [`TestContext`] bundling everything a task
//! needs to run both phases.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use redlilium_render_tasks::backend::dummy::{DummyDrawPass, DummyResourceProvider};
use redlilium_render_tasks::{
    Caps, CommandBuffer, Context, DepthStencilFlags, DrawPass, DrawPassList, Extent2d,
    GraphicsError, LoadOp, Offset2d, RenderPassAttachments, RenderPassDesc, RenderPassTask,
    ReplayTargetData, ResourceProvider, RuntimeEffectDictionary, ScratchResourceManager, StoreOp,
    Task, TaskResult, Texture, TextureFormat, TextureInfo, TextureProxy, Viewport,
};

/// Initialize logging once for the test binary.
pub fn init_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

// ============================================================================
// Resource Provider
// ============================================================================

/// Kind of attachment requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    DiscardableMsaa,
    DepthStencil,
}

/// A find-or-create request seen by [`TestProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentRequest {
    pub kind: AttachmentKind,
    pub dimensions: Extent2d,
    pub info: TextureInfo,
}

/// Dummy provider wrapper with failure injection and request logging.
#[derive(Default)]
pub struct TestProvider {
    inner: DummyResourceProvider,
    fail_textures: bool,
    fail_msaa: bool,
    fail_depth_stencil: bool,
    create_calls: AtomicUsize,
    requests: Mutex<Vec<AttachmentRequest>>,
}

impl TestProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `create_texture` fail.
    pub fn with_failing_textures(mut self) -> Self {
        self.fail_textures = true;
        self
    }

    /// Make discardable MSAA attachment requests fail.
    pub fn with_failing_msaa(mut self) -> Self {
        self.fail_msaa = true;
        self
    }

    /// Make depth/stencil attachment requests fail.
    pub fn with_failing_depth_stencil(mut self) -> Self {
        self.fail_depth_stencil = true;
        self
    }

    /// Number of `create_texture` calls, including failed ones.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::Relaxed)
    }

    /// Attachment requests in call order.
    pub fn requests(&self) -> Vec<AttachmentRequest> {
        self.requests.lock().clone()
    }

    fn record(&self, kind: AttachmentKind, dimensions: Extent2d, info: &TextureInfo) {
        self.requests.lock().push(AttachmentRequest {
            kind,
            dimensions,
            info: *info,
        });
    }
}

impl ResourceProvider for TestProvider {
    fn create_texture(
        &self,
        dimensions: Extent2d,
        info: &TextureInfo,
        label: Option<&str>,
    ) -> Result<Arc<Texture>, GraphicsError> {
        self.create_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_textures {
            return Err(GraphicsError::OutOfMemory);
        }
        self.inner.create_texture(dimensions, info, label)
    }

    fn find_or_create_discardable_msaa_attachment(
        &self,
        dimensions: Extent2d,
        info: &TextureInfo,
    ) -> Result<Arc<Texture>, GraphicsError> {
        self.record(AttachmentKind::DiscardableMsaa, dimensions, info);
        if self.fail_msaa {
            return Err(GraphicsError::OutOfMemory);
        }
        self.inner
            .find_or_create_discardable_msaa_attachment(dimensions, info)
    }

    fn find_or_create_depth_stencil_attachment(
        &self,
        dimensions: Extent2d,
        info: &TextureInfo,
    ) -> Result<Arc<Texture>, GraphicsError> {
        self.record(AttachmentKind::DepthStencil, dimensions, info);
        if self.fail_depth_stencil {
            return Err(GraphicsError::ResourceCreationFailed(
                "depth/stencil pool exhausted".to_string(),
            ));
        }
        self.inner
            .find_or_create_depth_stencil_attachment(dimensions, info)
    }
}

// ============================================================================
// Command Buffer
// ============================================================================

/// Command buffer that tracks the replay translation and rejects every pass.
#[derive(Debug, Default)]
pub struct RejectingCommandBuffer {
    pub replay_translation: Option<Offset2d>,
    pub attempts: usize,
}

impl CommandBuffer for RejectingCommandBuffer {
    fn set_replay_translation(&mut self, translation: Offset2d) {
        self.replay_translation = Some(translation);
    }

    fn clear_replay_translation(&mut self) {
        self.replay_translation = None;
    }

    fn add_render_pass(
        &mut self,
        _desc: &RenderPassDesc,
        _attachments: RenderPassAttachments,
        _viewport: Viewport,
        _draw_passes: &[Arc<dyn DrawPass>],
    ) -> Result<(), GraphicsError> {
        self.attempts += 1;
        Err(GraphicsError::DeviceLost)
    }
}

// ============================================================================
// Test Context
// ============================================================================

/// Everything a task needs to run both phases.
pub struct TestContext {
    pub provider: Arc<TestProvider>,
    pub context: Context,
    pub scratch: ScratchResourceManager,
    pub effects: RuntimeEffectDictionary,
}

impl TestContext {
    /// Create a context over a default [`TestProvider`].
    pub fn new(caps: Caps) -> Self {
        Self::with_provider(caps, TestProvider::new())
    }

    /// Create a context over `provider`.
    pub fn with_provider(caps: Caps, provider: TestProvider) -> Self {
        init_logging();
        let provider = Arc::new(provider);
        Self {
            context: Context::new(caps, provider.clone()),
            scratch: ScratchResourceManager::new(provider.clone()),
            effects: RuntimeEffectDictionary::new(),
            provider,
        }
    }

    /// Get the device capabilities.
    pub fn caps(&self) -> &Caps {
        self.context.caps()
    }

    /// Run the preparation phase of `task`.
    pub fn prepare(&mut self, task: &mut dyn Task) -> TaskResult {
        task.prepare_resources(self.provider.as_ref(), &mut self.scratch, &self.effects)
    }

    /// Run the command phase of `task`.
    pub fn add_commands(
        &self,
        task: &mut dyn Task,
        command_buffer: &mut dyn CommandBuffer,
        replay: &ReplayTargetData,
    ) -> TaskResult {
        task.add_commands(&self.context, command_buffer, replay)
    }

    /// Build a descriptor for an RGBA8 target.
    pub fn desc(
        &self,
        requires_msaa: bool,
        depth_stencil_flags: DepthStencilFlags,
    ) -> RenderPassDesc {
        RenderPassDesc::new(
            self.caps(),
            &target_info(),
            LoadOp::Clear,
            StoreOp::Store,
            depth_stencil_flags,
            [0.0, 0.0, 0.0, 1.0],
            requires_msaa,
        )
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Shape of every render target in these tests.
pub fn target_info() -> TextureInfo {
    TextureInfo::render_target(TextureFormat::Rgba8Unorm)
}

/// A non-lazy RGBA8 target proxy.
pub fn create_target(width: u32, height: u32) -> Arc<TextureProxy> {
    Arc::new(TextureProxy::new(Extent2d::new(width, height), target_info()).with_label("target"))
}

/// A draw pass list holding `draw_pass`.
pub fn draw_pass_list(draw_pass: &Arc<DummyDrawPass>) -> DrawPassList {
    vec![draw_pass.clone() as Arc<dyn DrawPass>]
}

/// Create a render pass task with a fresh draw pass, returning both.
pub fn create_task(
    desc: &RenderPassDesc,
    target: Arc<TextureProxy>,
) -> (RenderPassTask, Arc<DummyDrawPass>) {
    let draw_pass = Arc::new(DummyDrawPass::new().with_draw_count(3));
    let task = RenderPassTask::make(draw_pass_list(&draw_pass), desc, Some(target))
        .expect("task with a target");
    (task, draw_pass)
}
