/*!
 * Thread Dispatcher
 * Reference single-core cooperative scheduler driving a SyscallHandler
 */

use super::types::{Step, SyscallOutcome, Task};
use crate::core::types::{SyscallReturn, TaskId};
use crate::guest::{Arch, Emulator};
use crate::signals::HandlerTask;
use crate::syscalls::{SyscallContext, SyscallError, SyscallHandler, SyscallResult};
use std::collections::VecDeque;
use tracing::{debug, info};

/// Owns the tasks of one emulated process; the front task is running
pub struct ThreadDispatcher {
    handler: SyscallHandler,
    tasks: VecDeque<Task>,
    next_tid: TaskId,
}

impl ThreadDispatcher {
    /// Start with the main task only
    pub fn new(handler: SyscallHandler) -> Self {
        let pid = handler.pid();
        let mut tasks = VecDeque::new();
        tasks.push_back(Task::main(pid));
        Self {
            handler,
            tasks,
            next_tid: pid + 1,
        }
    }

    /// Add a runnable thread task behind the current one
    pub fn spawn_thread(&mut self) -> TaskId {
        let tid = self.next_tid;
        self.next_tid += 1;
        self.tasks.push_back(Task::thread(tid));
        debug!(tid, "Spawned thread task");
        tid
    }

    pub fn current(&self) -> Option<&Task> {
        self.tasks.front()
    }

    pub fn current_mut(&mut self) -> Option<&mut Task> {
        self.tasks.front_mut()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn handler(&self) -> &SyscallHandler {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut SyscallHandler {
        &mut self.handler
    }

    /// Run syscall `nr` on behalf of the current task
    pub fn handle_syscall(&mut self, emulator: &mut dyn Emulator, nr: u64) -> SyscallResult<Step> {
        let task_count = self.tasks.len();
        let Some(task) = self.tasks.front_mut() else {
            return Err(SyscallError::unsupported("dispatch", "no runnable task"));
        };
        let outcome = {
            let mut ctx = SyscallContext::new(emulator, Some(task), task_count);
            self.handler.dispatch(nr, &mut ctx)?
        };

        match outcome {
            SyscallOutcome::Completed(value) => match self.tasks.front() {
                Some(task) if !task.is_thread() && task.exit_status.is_some() => {
                    let status = task.exit_status.unwrap_or_default();
                    info!(status, "Main task exited");
                    Ok(Step::Exited(status))
                }
                _ => Ok(Step::Return(value)),
            },
            SyscallOutcome::Yield(value) => Ok(self.switch(value)),
        }
    }

    /// Suspend the front task with its eventual return value and rotate
    fn switch(&mut self, value: SyscallReturn) -> Step {
        let Some(mut task) = self.tasks.pop_front() else {
            return Step::Exited(0);
        };
        let from = task.id;
        task.resume_value = Some(value);
        let retired = match (task.is_thread(), task.exit_status) {
            (true, Some(status)) => {
                debug!(tid = from, status, "Retired thread task");
                Some(status)
            }
            _ => {
                self.tasks.push_back(task);
                None
            }
        };
        match self.tasks.front() {
            Some(next) => {
                debug!(from, to = next.id, "Context switch");
                Step::Switched { from, to: next.id }
            }
            None => Step::Exited(retired.unwrap_or_default()),
        }
    }

    /// Dequeue the current task's next signal as a delivery work item
    pub fn next_signal(&mut self, arch: Arch) -> Option<HandlerTask> {
        let pending = self.tasks.front_mut()?.pending.pop_front()?;
        Some(self.handler.create_signal_handler_task(pending.signum, arch))
    }

    /// Take the value a resumed task should observe as its syscall return
    pub fn resume(&mut self) -> Option<SyscallReturn> {
        self.tasks.front_mut()?.resume_value.take()
    }
}
