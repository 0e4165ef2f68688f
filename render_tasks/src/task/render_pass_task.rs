//! Task that draws into one render target.

use std::sync::Arc;

use crate::command_buffer::{CommandBuffer, RenderPassAttachments};
use crate::context::Context;
use crate::draw_pass::DrawPassList;
use crate::effects::RuntimeEffectDictionary;
use crate::error::TaskError;
use crate::render_pass::RenderPassDesc;
use crate::resources::{ResourceProvider, ScratchResourceManager, TextureProxy};
use crate::task::{ReplayTargetData, Task, TaskResult, TaskStatus};
use crate::types::Viewport;

/// Lifecycle of a [`RenderPassTask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    /// Built, resources not prepared yet.
    Constructed,
    /// Resources prepared, ready to add commands.
    Prepared,
    /// Commands added at least once. The task may be replayed.
    Done,
    /// A phase failed. The task must not be used again.
    Failed,
}

/// Renders a list of draw passes into a target texture.
///
/// The task picks the live attachments when its commands are added: the
/// target itself, or a discardable multisampled texture resolving into the
/// target, plus an optional depth/stencil texture shared between passes.
#[derive(Debug)]
pub struct RenderPassTask {
    draw_passes: DrawPassList,
    desc: RenderPassDesc,
    target: Arc<TextureProxy>,
    state: TaskState,
}

impl RenderPassTask {
    /// Create a task running `draw_passes` against `target`.
    ///
    /// Returns `None` if there is no target.
    ///
    /// # Panics
    ///
    /// Panics if `draw_passes` does not hold exactly one draw pass, or if the
    /// attachment sample counts of `desc` disagree with its pass sample count.
    /// A single-sampled color attachment is only allowed when it resolves.
    pub fn make(
        draw_passes: DrawPassList,
        desc: &RenderPassDesc,
        target: Option<Arc<TextureProxy>>,
    ) -> Option<Self> {
        assert_eq!(
            draw_passes.len(),
            1,
            "RenderPassTask requires exactly one draw pass"
        );

        let target = target?;

        if desc.color_attachment.is_valid() {
            let color_samples = desc.color_attachment.sample_count();
            assert!(
                color_samples == desc.sample_count || (color_samples == 1 && desc.has_resolve()),
                "Color attachment sample count {} does not match render pass sample count {}",
                color_samples,
                desc.sample_count
            );
        }

        if desc.has_depth_stencil() {
            let depth_samples = desc.depth_stencil_attachment.sample_count();
            assert!(
                depth_samples == desc.sample_count,
                "Depth/stencil attachment sample count {} does not match \
                 render pass sample count {}",
                depth_samples,
                desc.sample_count
            );
        }

        Some(Self {
            draw_passes,
            desc: *desc,
            target,
            state: TaskState::Constructed,
        })
    }

    /// Get the render pass descriptor.
    pub fn desc(&self) -> &RenderPassDesc {
        &self.desc
    }

    /// Get the target proxy.
    pub fn target(&self) -> &Arc<TextureProxy> {
        &self.target
    }

    /// Get the draw passes.
    pub fn draw_passes(&self) -> &DrawPassList {
        &self.draw_passes
    }

    /// Get the lifecycle state.
    pub fn state(&self) -> TaskState {
        self.state
    }

    fn fail(&mut self, error: TaskError) -> TaskResult {
        self.state = TaskState::Failed;
        Err(error)
    }
}

impl Task for RenderPassTask {
    /// # Panics
    ///
    /// Panics if called more than once or after a failure.
    fn prepare_resources(
        &mut self,
        provider: &dyn ResourceProvider,
        scratch: &mut ScratchResourceManager,
        effects: &RuntimeEffectDictionary,
    ) -> TaskResult {
        match self.state {
            TaskState::Constructed => {}
            TaskState::Failed => panic!("RenderPassTask used after a failure"),
            TaskState::Prepared | TaskState::Done => {
                panic!("RenderPassTask resources prepared twice")
            }
        }

        if let Err(source) = self.target.instantiate_if_not_lazy(provider) {
            let dimensions = self.target.dimensions();
            log::warn!("Failed to instantiate RenderPassTask target. Will not create render pass!");
            log::warn!("Dimensions are ({}, {}).", dimensions.width, dimensions.height);
            return self.fail(TaskError::TargetInstantiation { dimensions, source });
        }

        let failure = self
            .draw_passes
            .iter()
            .enumerate()
            .find_map(|(index, draw_pass)| {
                draw_pass
                    .prepare_resources(provider, effects, &self.desc)
                    .err()
                    .map(|source| (index, source))
            });
        if let Some((index, source)) = failure {
            log::debug!("Draw pass {} failed to prepare: {}", index, source);
            return self.fail(TaskError::DrawPassPreparation { index, source });
        }

        // Scratch textures handed out while recording these draws are free for
        // later tasks once every draw pass holds its own references.
        scratch.notify_resources_consumed();

        self.state = TaskState::Prepared;
        log::debug!("Prepared render pass task ({})", self.target.dimensions());
        Ok(TaskStatus::Success)
    }

    /// # Panics
    ///
    /// Panics if resources were not prepared, if the task failed earlier, or
    /// if the target has no texture.
    fn add_commands(
        &mut self,
        context: &Context,
        command_buffer: &mut dyn CommandBuffer,
        replay: &ReplayTargetData,
    ) -> TaskResult {
        match self.state {
            TaskState::Prepared | TaskState::Done => {}
            TaskState::Failed => panic!("RenderPassTask used after a failure"),
            TaskState::Constructed => {
                panic!("RenderPassTask commands added before resources were prepared")
            }
        }

        let Some(target_texture) = self.target.texture() else {
            panic!("RenderPassTask target is not instantiated");
        };

        if replay.matches(target_texture.id()) {
            command_buffer.set_replay_translation(replay.translation);
        } else {
            command_buffer.clear_replay_translation();
        }

        let dimensions = self.target.dimensions();
        let target_info = *target_texture.info();
        let provider = context.resource_provider();

        let mut attachments = if self.desc.has_resolve() {
            assert_eq!(
                self.target.sample_count(),
                1,
                "Resolve target must be single-sampled"
            );
            assert!(
                self.desc.color_attachment.texture_info.is_multisampled(),
                "Resolving color attachment must be multisampled"
            );

            let color = match provider.find_or_create_discardable_msaa_attachment(
                dimensions,
                &self.desc.color_attachment.texture_info,
            ) {
                Ok(color) => color,
                Err(source) => {
                    log::warn!("Could not get color attachment for RenderPassTask ({dimensions})");
                    return self.fail(TaskError::ColorAttachment { dimensions, source });
                }
            };
            RenderPassAttachments::new(color).with_resolve(target_texture)
        } else {
            RenderPassAttachments::new(target_texture)
        };

        if self.desc.has_depth_stencil() {
            let depth_dimensions = context
                .caps()
                .depth_attachment_dimensions(&target_info, dimensions);
            match provider.find_or_create_depth_stencil_attachment(
                depth_dimensions,
                &self.desc.depth_stencil_attachment.texture_info,
            ) {
                Ok(depth_stencil) => attachments = attachments.with_depth_stencil(depth_stencil),
                Err(source) => {
                    log::warn!(
                        "Could not get depth/stencil attachment for RenderPassTask \
                         ({depth_dimensions})"
                    );
                    return self.fail(TaskError::DepthStencilAttachment {
                        dimensions: depth_dimensions,
                        source,
                    });
                }
            }
        }

        let viewport = Viewport::from_dimensions(dimensions);
        if let Err(source) =
            command_buffer.add_render_pass(&self.desc, attachments, viewport, &self.draw_passes)
        {
            log::debug!("Command buffer rejected render pass: {}", source);
            return self.fail(TaskError::Submission { source });
        }

        self.state = TaskState::Done;
        Ok(TaskStatus::Success)
    }
}
