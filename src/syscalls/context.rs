/*!
 * Syscall Context
 * Everything one handler invocation may touch besides per-process state
 */

use crate::guest::{Arch, Emulator};
use crate::scheduler::Task;

/// Explicit view of the calling environment
///
/// The running task is passed in rather than looked up, and `task_count`
/// is the number of runnable tasks when the call was made.
pub struct SyscallContext<'a> {
    pub emulator: &'a mut dyn Emulator,
    pub task: Option<&'a mut Task>,
    pub task_count: usize,
}

impl<'a> SyscallContext<'a> {
    pub fn new(emulator: &'a mut dyn Emulator, task: Option<&'a mut Task>, task_count: usize) -> Self {
        Self {
            emulator,
            task,
            task_count,
        }
    }

    /// Context with no task, as seen from host-side tooling
    pub fn detached(emulator: &'a mut dyn Emulator) -> Self {
        Self::new(emulator, None, 1)
    }

    #[inline]
    pub fn arch(&self) -> Arch {
        self.emulator.arch()
    }

    #[inline]
    pub fn arg(&self, index: usize) -> u64 {
        self.emulator.arg(index)
    }

    #[inline]
    pub fn int_arg(&self, index: usize) -> i32 {
        self.emulator.int_arg(index)
    }

    #[inline]
    pub fn pointer_arg(&self, index: usize) -> Option<u64> {
        self.emulator.pointer_arg(index)
    }

    pub fn task_id(&self) -> Option<u32> {
        self.task.as_deref().map(|task| task.id)
    }
}
