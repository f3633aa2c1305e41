/*!
 * Scheduler Syscalls
 * Affinity, policy and priority are recorded or faked, never enforced
 */

use super::context::SyscallContext;
use super::handler::{done, SyscallHandler};
use super::types::SyscallResult;
use crate::core::limits::{ANDROID_PRIORITY_NORMAL, SCHED_OTHER};
use crate::scheduler::SyscallOutcome;
use tracing::debug;

impl SyscallHandler {
    /// Store the mask bytes process-wide; a NULL mask keeps the previous one
    pub(super) fn sched_setaffinity(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let pid = ctx.int_arg(0);
        let cpusetsize = ctx.arg(1) as usize;
        let Some(mask) = ctx.pointer_arg(2) else {
            debug!(pid, cpusetsize, "sched_setaffinity: null mask");
            return done(0);
        };
        let bytes = ctx.emulator.read_bytes(mask, cpusetsize)?;
        debug!(pid, cpusetsize, mask = ?bytes, "sched_setaffinity");
        self.sched_cpu_mask = Some(bytes);
        done(0)
    }

    /// Returns the number of bytes copied, or 0 (buffer untouched) when no
    /// mask was ever set
    pub(super) fn sched_getaffinity(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let pid = ctx.int_arg(0);
        let cpusetsize = ctx.int_arg(1);
        let mask = ctx.pointer_arg(2);
        debug!(pid, cpusetsize, stored = ?self.sched_cpu_mask, "sched_getaffinity");
        match (mask, self.sched_cpu_mask.as_deref()) {
            (Some(mask), Some(stored)) => {
                let len = (cpusetsize.max(0) as usize).min(stored.len());
                ctx.emulator.write_bytes(mask, &stored[..len])?;
                done(len as i64)
            }
            _ => done(0),
        }
    }

    pub(super) fn sched_setscheduler(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let pid = ctx.int_arg(0);
        let policy = ctx.int_arg(1);
        let param = ctx.arg(2);
        debug!(pid, policy, param = %format!("{:#x}", param), "sched_setscheduler");
        done(0)
    }

    pub(super) fn sched_getscheduler(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let pid = ctx.int_arg(0);
        debug!(pid, "sched_getscheduler");
        done(SCHED_OTHER)
    }

    pub(super) fn sched_setparam(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let pid = ctx.int_arg(0);
        let param = ctx.arg(1);
        debug!(pid, param = %format!("{:#x}", param), "sched_setparam");
        done(0)
    }

    /// Writes the normal priority into `param->sched_priority`
    pub(super) fn sched_getparam(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let pid = ctx.int_arg(0);
        let param = ctx.arg(1);
        debug!(pid, param = %format!("{:#x}", param), "sched_getparam");
        ctx.emulator.write_i32(param, ANDROID_PRIORITY_NORMAL)?;
        done(0)
    }

    /// No-op with a single task, otherwise a forced switch
    pub(super) fn sched_yield(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        debug!(task_count = ctx.task_count, "sched_yield");
        if ctx.task_count <= 1 {
            done(0)
        } else {
            Ok(SyscallOutcome::Yield(0))
        }
    }

    pub(super) fn getpriority(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let which = ctx.int_arg(0);
        let who = ctx.int_arg(1);
        debug!(which, who, "getpriority");
        done(ANDROID_PRIORITY_NORMAL)
    }

    pub(super) fn setpriority(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let which = ctx.int_arg(0);
        let who = ctx.int_arg(1);
        let prio = ctx.int_arg(2);
        debug!(which, who, prio, "setpriority");
        done(0)
    }
}
