//! Ordered list of tasks driven through both phases.

use crate::command_buffer::CommandBuffer;
use crate::context::Context;
use crate::effects::RuntimeEffectDictionary;
use crate::resources::{ResourceProvider, ScratchResourceManager};
use crate::task::{ReplayTargetData, Task, TaskResult, TaskStatus};

/// Runs tasks in insertion order.
///
/// A phase stops at the first failing task. Tasks reporting
/// [`TaskStatus::Discard`] are dropped from the list, even when a later
/// task fails. If every task was dropped, or the list was empty, the phase
/// reports `Discard` itself.
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Box<dyn Task>>,
}

impl TaskList {
    /// Create an empty task list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task.
    pub fn add(&mut self, task: Box<dyn Task>) {
        self.tasks.push(task);
    }

    /// Append every task of `other`, leaving it empty.
    pub fn append(&mut self, other: &mut TaskList) {
        self.tasks.append(&mut other.tasks);
    }

    /// Get the number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if the list has no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Remove every task.
    pub fn reset(&mut self) {
        self.tasks.clear();
    }

    /// Prepare the resources of every task.
    pub fn prepare_resources(
        &mut self,
        provider: &dyn ResourceProvider,
        scratch: &mut ScratchResourceManager,
        effects: &RuntimeEffectDictionary,
    ) -> TaskResult {
        self.visit_tasks(|task| task.prepare_resources(provider, scratch, effects))
    }

    /// Record every task into `command_buffer`.
    pub fn add_commands(
        &mut self,
        context: &Context,
        command_buffer: &mut dyn CommandBuffer,
        replay: &ReplayTargetData,
    ) -> TaskResult {
        self.visit_tasks(|task| task.add_commands(context, command_buffer, replay))
    }

    fn visit_tasks<F>(&mut self, mut visit: F) -> TaskResult
    where
        F: FnMut(&mut dyn Task) -> TaskResult,
    {
        let mut discarded = vec![false; self.tasks.len()];
        let mut failure = None;
        for (index, task) in self.tasks.iter_mut().enumerate() {
            match visit(task.as_mut()) {
                Ok(TaskStatus::Discard) => discarded[index] = true,
                Ok(_) => {}
                Err(error) => {
                    failure = Some(error);
                    break;
                }
            }
        }

        // Tasks visited before a failure are dropped too.
        let total = self.tasks.len();
        let mut flags = discarded.into_iter();
        self.tasks.retain(|_| !flags.next().unwrap_or(false));

        let discard_count = total - self.tasks.len();
        if discard_count > 0 {
            log::debug!("Discarded {} of {} tasks", discard_count, total);
        }

        if let Some(error) = failure {
            return Err(error);
        }
        if self.tasks.is_empty() {
            Ok(TaskStatus::Discard)
        } else {
            Ok(TaskStatus::Success)
        }
    }
}
