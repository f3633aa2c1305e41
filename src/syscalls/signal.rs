/*!
 * Signal Syscalls
 * Disposition table updates and synchronous signal delivery
 */

use super::context::SyscallContext;
use super::handler::{done, SyscallHandler};
use super::types::{SyscallError, SyscallResult};
use crate::core::types::{Address, Signum, SyscallReturn};
use crate::core::Errno;
use crate::guest::Arch;
use crate::scheduler::{SyscallOutcome, Task};
use crate::signals::{signal_name, HandlerTask, SigAction, SIG_ERR};
use tracing::{debug, info};

impl SyscallHandler {
    /// rt_sigaction(signum, act, oldact, sigsetsize)
    pub(super) fn rt_sigaction(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let arch = ctx.arch();
        let signum = ctx.int_arg(0);
        let act = ctx.pointer_arg(1);
        let oldact = ctx.pointer_arg(2);
        let action = act
            .map(|addr| SigAction::read(&*ctx.emulator, arch, addr))
            .transpose()?;
        done(self.sigaction(ctx, signum, action, oldact)?)
    }

    /// Swap the disposition of `signum`, reporting the previous one at `oldact`
    ///
    /// Returns 0, or `-EINVAL` for SIGKILL/SIGSTOP, in which case only the
    /// handler word of `oldact` is overwritten with SIG_ERR.
    pub fn sigaction(
        &mut self,
        ctx: &mut SyscallContext<'_>,
        signum: Signum,
        action: Option<SigAction>,
        oldact: Option<Address>,
    ) -> SyscallResult<SyscallReturn> {
        let arch = ctx.arch();
        debug!(signum, ?action, oldact = ?oldact, "sigaction");

        let previous = match self.signals.set(signum, action) {
            Ok(previous) => previous,
            Err(err) => {
                debug!(signum, error = %err, "sigaction rejected");
                if let Some(oldact) = oldact {
                    SigAction::write_handler(&mut *ctx.emulator, arch, oldact, SIG_ERR)?;
                }
                return Ok(Errno::EINVAL.as_neg());
            }
        };

        if let Some(oldact) = oldact {
            match previous {
                None => SigAction::clear(&mut *ctx.emulator, arch, oldact)?,
                Some(previous) => previous.write(&mut *ctx.emulator, arch, oldact)?,
            }
        }
        Ok(0)
    }

    /// kill(pid, sig): only the caller's own process group (pid 0) is modelled
    pub(super) fn kill(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let pid = ctx.int_arg(0);
        let sig = ctx.int_arg(1);
        debug!(pid, sig, "kill");
        if pid == 0 && sig > 0 {
            if let Some(task) = ctx.task.as_deref_mut() {
                return Ok(self.queue_signal(task, sig));
            }
        }
        Err(SyscallError::unsupported(
            "kill",
            format!("pid={}, sig={}, lr={:#x}", pid, sig, ctx.emulator.lr()),
        ))
    }

    /// tgkill(tgid, tid, sig): delivered to the calling task
    pub(super) fn tgkill(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let tgid = ctx.int_arg(0);
        let tid = ctx.int_arg(1);
        let sig = ctx.int_arg(2);
        debug!(tgid, tid, sig, "tgkill");
        if sig > 0 {
            if let Some(task) = ctx.task.as_deref_mut() {
                return Ok(self.queue_signal(task, sig));
            }
        }
        Err(SyscallError::unsupported(
            "tgkill",
            format!("tgid={}, tid={}, sig={}, lr={:#x}", tgid, tid, sig, ctx.emulator.lr()),
        ))
    }

    /// Queue `sig` on `task` and yield if a disposition is installed
    fn queue_signal(&self, task: &mut Task, sig: Signum) -> SyscallOutcome {
        match self.signals.get(sig) {
            Some(action) => {
                task.add_signal_task(sig, *action);
                debug!(task = %task, signal = %signal_name(sig), "Signal queued");
                SyscallOutcome::Yield(0)
            }
            None => SyscallOutcome::Completed(0),
        }
    }

    /// Work item for delivering `signum` under the current disposition
    pub fn create_signal_handler_task(&self, signum: Signum, arch: Arch) -> HandlerTask {
        let task = self.signals.handler_task(signum, arch);
        debug!(signal = %signal_name(signum), ?task, "Signal handler task");
        task
    }

    pub(super) fn sigaltstack(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let ss = ctx.arg(0);
        let old_ss = ctx.arg(1);
        debug!(ss = %format!("{:#x}", ss), old_ss = %format!("{:#x}", old_ss), "sigaltstack");
        done(0)
    }

    /// Never blocks and never consumes a queued signal
    pub(super) fn rt_sigtimedwait(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let uthese = ctx.arg(0);
        let uinfo = ctx.arg(1);
        let uts = ctx.arg(2);
        let sigsetsize = ctx.arg(3);
        info!(
            uthese = %format!("{:#x}", uthese),
            uinfo = %format!("{:#x}", uinfo),
            uts = %format!("{:#x}", uts),
            sigsetsize,
            task = ?ctx.task_id(),
            "rt_sigtimedwait"
        );
        done(0)
    }
}
