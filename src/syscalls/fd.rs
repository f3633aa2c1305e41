/*!
 * File Descriptor Syscalls
 * Calls that create, use or poll descriptor-table objects
 */

use super::context::SyscallContext;
use super::handler::{done, fail, SyscallHandler};
use super::types::{SyscallError, SyscallResult};
use crate::core::limits::{EFD_CLOEXEC, EFD_NONBLOCK, EFD_SEMAPHORE, MAX_RW_CHUNK};
use crate::core::types::{Address, Fd};
use crate::core::Errno;
use crate::fd::{pipe_pair, EventFd};
use crate::scheduler::SyscallOutcome;
use tracing::{debug, info};

impl SyscallHandler {
    /// Create a pipe: write end first, so it always gets the lower fd
    pub(super) fn pipe2(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let pipefd = ctx.arg(0);
        let flags = ctx.int_arg(1);
        let (writer, reader) = pipe_pair(self.config.pipe_capacity);

        let writefd = match self.fds.insert(Box::new(writer)) {
            Ok(fd) => fd,
            Err(errno) => return fail(ctx, errno),
        };
        let readfd = match self.fds.insert(Box::new(reader)) {
            Ok(fd) => fd,
            Err(errno) => {
                if let Err(close_err) = self.fds.close(writefd) {
                    debug!(writefd, error = %close_err, "pipe2 rollback failed");
                }
                return fail(ctx, errno);
            }
        };

        ctx.emulator.write_i32(pipefd, readfd)?;
        ctx.emulator.write_i32(pipefd + 4, writefd)?;
        debug!(
            pipefd = %format!("{:#x}", pipefd),
            flags = %format!("{:#x}", flags),
            readfd,
            writefd,
            "pipe2"
        );
        done(0)
    }

    pub(super) fn eventfd2(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let initval = ctx.arg(0) as u32;
        let flags = ctx.int_arg(1);
        if flags & EFD_CLOEXEC != 0 {
            return Err(SyscallError::unsupported(
                "eventfd2",
                format!("initval={}, flags={:#x}", initval, flags),
            ));
        }

        let semaphore = flags & EFD_SEMAPHORE != 0;
        let nonblock = flags & EFD_NONBLOCK != 0;
        match self.fds.insert(Box::new(EventFd::new(initval, semaphore, nonblock))) {
            Ok(fd) => {
                if self.config.verbose {
                    info!(fd, lr = %format!("{:#x}", ctx.emulator.lr()), "eventfd created");
                }
                debug!(fd, initval, semaphore, nonblock, "eventfd2");
                done(fd)
            }
            Err(errno) => fail(ctx, errno),
        }
    }

    pub(super) fn close(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let fd = ctx.int_arg(0);
        match self.fds.close(fd) {
            Ok(()) => done(0),
            Err(errno) => {
                debug!(fd, %errno, "close failed");
                fail(ctx, errno)
            }
        }
    }

    pub(super) fn read(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let fd = ctx.int_arg(0);
        let buf = ctx.arg(1);
        let count = (ctx.arg(2) as usize).min(MAX_RW_CHUNK);
        let Some(io) = self.fds.get_mut(fd) else {
            return fail(ctx, Errno::EBADF);
        };

        let mut data = vec![0u8; count];
        match io.read(&mut data) {
            Ok(n) => {
                ctx.emulator.write_bytes(buf, &data[..n])?;
                done(n as i64)
            }
            Err(errno) => fail(ctx, errno),
        }
    }

    pub(super) fn write(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let fd = ctx.int_arg(0);
        let buf = ctx.arg(1);
        let count = (ctx.arg(2) as usize).min(MAX_RW_CHUNK);
        let Some(io) = self.fds.get_mut(fd) else {
            return fail(ctx, Errno::EBADF);
        };

        let data = ctx.emulator.read_bytes(buf, count)?;
        match io.write(&data) {
            Ok(n) => done(n as i64),
            Err(errno) => fail(ctx, errno),
        }
    }

    pub(super) fn getdents64(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let fd = ctx.int_arg(0);
        let dirp = ctx.arg(1);
        let count = ctx.arg(2) as usize;
        let Some(io) = self.fds.get_mut(fd) else {
            return fail(ctx, Errno::EBADF);
        };

        match io.getdents64(count) {
            Ok(raw) => {
                ctx.emulator.write_bytes(dirp, &raw)?;
                done(raw.len() as i64)
            }
            Err(errno) => fail(ctx, errno),
        }
    }

    /// Readiness scan over one fd_set
    ///
    /// Bits for descriptors that are not ready are cleared in `checkfds`.
    /// When anything is ready the whole `clearfds` set is zeroed.
    pub fn select(
        &self,
        ctx: &mut SyscallContext<'_>,
        nfds: i32,
        checkfds: Address,
        clearfds: Option<Address>,
        check_read: bool,
    ) -> SyscallResult<i32> {
        let mut count = 0;
        for fd in 0..nfds.max(0) {
            let word = checkfds + (fd / 32) as u64 * 4;
            let bit = 1u32 << (fd % 32);
            let mask = ctx.emulator.read_i32(word)? as u32;
            if mask & bit == 0 {
                continue;
            }
            if !check_read || self.is_readable(fd) {
                count += 1;
            } else {
                ctx.emulator.write_i32(word, (mask & !bit) as i32)?;
            }
        }

        if count > 0 {
            if let Some(clear) = clearfds {
                let words = (nfds.max(0) as usize).div_ceil(32);
                ctx.emulator.write_bytes(clear, &vec![0u8; words * 4])?;
            }
        }
        Ok(count)
    }

    fn is_readable(&self, fd: Fd) -> bool {
        self.fds.get(fd).is_some_and(|io| io.can_read())
    }

    /// Read set first, then the write set; the first non-zero count wins
    fn select_sets(&mut self, ctx: &mut SyscallContext<'_>, name: &str) -> SyscallResult<SyscallOutcome> {
        let nfds = ctx.int_arg(0);
        let readfds = ctx.pointer_arg(1);
        let writefds = ctx.pointer_arg(2);

        if let Some(readfds) = readfds {
            let count = self.select(ctx, nfds, readfds, writefds, true)?;
            if count > 0 {
                debug!(nfds, count, "{} read ready", name);
                return done(count);
            }
        }
        if let Some(writefds) = writefds {
            let count = self.select(ctx, nfds, writefds, readfds, false)?;
            if count > 0 {
                debug!(nfds, count, "{} write ready", name);
                return done(count);
            }
        }
        debug!(nfds, "{} nothing ready", name);
        done(0)
    }

    pub(super) fn pselect6(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        self.select_sets(ctx, "pselect6")
    }

    pub(super) fn newselect(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        self.select_sets(ctx, "_newselect")
    }
}
