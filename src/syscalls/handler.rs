/*!
 * Syscall Handler
 * Per-process emulated kernel state and the syscall dispatch table
 */

use super::context::SyscallContext;
use super::numbers::Sysno;
use super::types::{SyscallError, SyscallResult};
use crate::core::types::{Fd, Pid, SyscallReturn};
use crate::core::{Errno, SyscallConfig};
use crate::fd::{FdTable, StdStream, Stdio};
use crate::monitoring::SyscallSpan;
use crate::scheduler::SyscallOutcome;
use crate::signals::SignalTable;
use crate::vfs::FileSystem;
use std::sync::Arc;
use tracing::debug;

/// State of one emulated process plus every syscall handler
///
/// Handlers run on the single running task; nothing here is locked.
pub struct SyscallHandler {
    pub(super) fs: Arc<dyn FileSystem>,
    pub(super) fds: FdTable,
    pub(super) signals: SignalTable,
    pub(super) sched_cpu_mask: Option<Vec<u8>>,
    pub(super) config: SyscallConfig,
}

impl SyscallHandler {
    /// New process with stdin, stdout and stderr open
    pub fn new(fs: Arc<dyn FileSystem>, config: SyscallConfig) -> Self {
        let mut fds = FdTable::new(config.max_fds);
        for (fd, stream) in [StdStream::Stdin, StdStream::Stdout, StdStream::Stderr]
            .into_iter()
            .enumerate()
        {
            fds.install(fd as Fd, Box::new(Stdio::new(stream)));
        }
        debug!(fs = fs.name(), pid = config.pid, max_fds = config.max_fds, "New syscall handler");
        Self {
            fs,
            fds,
            signals: SignalTable::new(),
            sched_cpu_mask: None,
            config,
        }
    }

    pub fn with_defaults(fs: Arc<dyn FileSystem>) -> Self {
        Self::new(fs, SyscallConfig::default())
    }

    pub fn pid(&self) -> Pid {
        self.config.pid
    }

    pub fn config(&self) -> &SyscallConfig {
        &self.config
    }

    pub fn fds(&self) -> &FdTable {
        &self.fds
    }

    pub fn fds_mut(&mut self) -> &mut FdTable {
        &mut self.fds
    }

    pub fn signals(&self) -> &SignalTable {
        &self.signals
    }

    pub fn filesystem(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    /// Most recent sched_setaffinity mask
    pub fn cpu_mask(&self) -> Option<&[u8]> {
        self.sched_cpu_mask.as_deref()
    }

    /// Route syscall `nr` to its handler
    pub fn dispatch(&mut self, nr: u64, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let arch = ctx.arch();
        let sysno = Sysno::from_raw(arch, nr).ok_or(SyscallError::UnknownSyscall { nr, arch })?;
        let span = SyscallSpan::new(sysno.name(arch), nr, ctx.task_id());
        let _guard = span.enter();

        let result = match sysno {
            Sysno::Exit => self.exit(ctx),
            Sysno::Read => self.read(ctx),
            Sysno::Write => self.write(ctx),
            Sysno::Close => self.close(ctx),
            Sysno::Openat => self.openat(ctx),
            Sysno::Getdents64 => self.getdents64(ctx),
            Sysno::Kill => self.kill(ctx),
            Sysno::Tgkill => self.tgkill(ctx),
            Sysno::Getpriority => self.getpriority(ctx),
            Sysno::Setpriority => self.setpriority(ctx),
            Sysno::Newselect => self.newselect(ctx),
            Sysno::Pselect6 => self.pselect6(ctx),
            Sysno::SchedSetparam => self.sched_setparam(ctx),
            Sysno::SchedGetparam => self.sched_getparam(ctx),
            Sysno::SchedSetscheduler => self.sched_setscheduler(ctx),
            Sysno::SchedGetscheduler => self.sched_getscheduler(ctx),
            Sysno::SchedYield => self.sched_yield(ctx),
            Sysno::SchedSetaffinity => self.sched_setaffinity(ctx),
            Sysno::SchedGetaffinity => self.sched_getaffinity(ctx),
            Sysno::RtSigaction => self.rt_sigaction(ctx),
            Sysno::RtSigtimedwait => self.rt_sigtimedwait(ctx),
            Sysno::Sigaltstack => self.sigaltstack(ctx),
            Sysno::Statfs => self.statfs(ctx),
            Sysno::Mkdirat => self.mkdirat(ctx),
            Sysno::Fchownat => self.fchownat(ctx),
            Sysno::Fchmodat => self.fchmodat(ctx),
            Sysno::Unlinkat => self.unlinkat(ctx),
            Sysno::Renameat => self.renameat(ctx),
            Sysno::Eventfd2 => self.eventfd2(ctx),
            Sysno::Pipe2 => self.pipe2(ctx),
        };
        match &result {
            Ok(outcome) => span.record_return(outcome.value(), outcome.is_yield()),
            Err(err) => span.record_error(err),
        }
        result
    }
}

/// Guest-visible failure: set errno and return -1
#[inline]
pub(super) fn fail(ctx: &mut SyscallContext<'_>, errno: Errno) -> SyscallResult<SyscallOutcome> {
    ctx.emulator.set_errno(errno);
    Ok(SyscallOutcome::Completed(-1))
}

#[inline]
pub(super) fn done(value: impl Into<SyscallReturn>) -> SyscallResult<SyscallOutcome> {
    Ok(SyscallOutcome::Completed(value.into()))
}
