//! Task graph nodes.
//!
//! Every node of the graph goes through two phases driven by the caller:
//!
//! 1. [`Task::prepare_resources`] instantiates the resources the node needs
//! 2. [`Task::add_commands`] records the node into a [`CommandBuffer`]
//!
//! A failure in either phase is returned as a [`TaskError`]; the driver is
//! expected to abandon the whole graph rather than continue with the next node.

mod render_pass_task;
mod task_list;

pub use render_pass_task::{RenderPassTask, TaskState};
pub use task_list::TaskList;

use crate::command_buffer::CommandBuffer;
use crate::context::Context;
use crate::effects::RuntimeEffectDictionary;
use crate::error::TaskError;
use crate::resources::{ResourceProvider, ScratchResourceManager, TextureId};
use crate::types::Offset2d;

/// Outcome of a task phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    /// The phase completed.
    Success,
    /// The task has nothing to do and can be dropped from its list.
    Discard,
    /// The phase failed. Only produced by [`TaskStatus::from_result`].
    Fail,
}

impl TaskStatus {
    /// Reduce a phase result to a status, mapping every error to `Fail`.
    pub fn from_result(result: &TaskResult) -> Self {
        match result {
            Ok(status) => *status,
            Err(_) => Self::Fail,
        }
    }

    /// Check if the status is `Success`.
    pub fn is_success(&self) -> bool {
        *self == Self::Success
    }
}

/// Result of a task phase.
pub type TaskResult = Result<TaskStatus, TaskError>;

/// Redirects a recorded pass onto a substitute render target.
///
/// Passes whose target texture matches `target` are offset by `translation`
/// when their commands are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ReplayTargetData {
    /// Texture whose passes are redirected.
    pub target: Option<TextureId>,
    /// Offset applied to redirected passes.
    pub translation: Offset2d,
}

impl ReplayTargetData {
    /// Redirect passes drawing into `target` by `translation`.
    pub fn new(target: TextureId, translation: Offset2d) -> Self {
        Self {
            target: Some(target),
            translation,
        }
    }

    /// Replay data matching no texture.
    pub fn none() -> Self {
        Self::default()
    }

    /// Check if passes drawing into `texture` are redirected.
    pub fn matches(&self, texture: TextureId) -> bool {
        self.target == Some(texture)
    }
}

/// A node of the task graph.
pub trait Task: std::fmt::Debug {
    /// Instantiate the resources this task needs before commands are added.
    fn prepare_resources(
        &mut self,
        provider: &dyn ResourceProvider,
        scratch: &mut ScratchResourceManager,
        effects: &RuntimeEffectDictionary,
    ) -> TaskResult;

    /// Record this task into `command_buffer`.
    fn add_commands(
        &mut self,
        context: &Context,
        command_buffer: &mut dyn CommandBuffer,
        replay: &ReplayTargetData,
    ) -> TaskResult;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphicsError;
    use crate::types::Extent2d;

    #[test]
    fn test_status_from_result() {
        assert_eq!(
            TaskStatus::from_result(&Ok(TaskStatus::Success)),
            TaskStatus::Success
        );
        assert_eq!(
            TaskStatus::from_result(&Ok(TaskStatus::Discard)),
            TaskStatus::Discard
        );
        let err = TaskError::ColorAttachment {
            dimensions: Extent2d::new(1, 1),
            source: GraphicsError::OutOfMemory,
        };
        assert_eq!(TaskStatus::from_result(&Err(err)), TaskStatus::Fail);
    }

    #[test]
    fn test_replay_none_matches_nothing() {
        let replay = ReplayTargetData::none();
        assert_eq!(replay.target, None);
        assert_eq!(replay.translation, Offset2d::zero());
    }
}
