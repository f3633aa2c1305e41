/*!
 * Process Syscalls
 */

use super::context::SyscallContext;
use super::handler::{done, SyscallHandler};
use super::types::SyscallResult;
use crate::scheduler::SyscallOutcome;
use tracing::{debug, info};

impl SyscallHandler {
    /// exit(status)
    ///
    /// A thread records its status and yields so the scheduler can retire
    /// it. The main task stops the whole emulated process.
    pub(super) fn exit(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let status = ctx.int_arg(0);
        if let Some(task) = ctx.task.as_deref_mut() {
            task.set_exit_status(status);
            if task.is_thread() {
                debug!(task = %task, status, "Thread exit");
                return Ok(SyscallOutcome::Yield(0));
            }
        }
        info!(status, pid = self.pid(), "exit");
        ctx.emulator.emu_stop();
        done(0)
    }
}
