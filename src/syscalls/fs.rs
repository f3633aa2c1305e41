/*!
 * Filesystem Syscalls
 * Path-based calls delegated to the FileSystem backend
 */

use super::context::SyscallContext;
use super::handler::{done, fail, SyscallHandler};
use super::types::{SyscallError, SyscallResult};
use crate::core::limits::{AT_FDCWD, O_RDONLY};
use crate::core::Errno;
use crate::fd::{DirectoryEntry, DirectoryFile, DirentType, StatFs};
use crate::guest::Arch;
use crate::scheduler::SyscallOutcome;
use crate::vfs::{proc_view, FileResult, OpenFlags, ProcView};
use tracing::{debug, info};

impl SyscallHandler {
    /// Resolve a guest path, serving the synthetic /proc views first
    pub fn resolve(&self, path: &str, oflags: i32) -> FileResult {
        match proc_view(path, self.pid()) {
            Some(ProcView::FdDir) => FileResult::Found(Box::new(self.create_fd_dir(oflags, path))),
            Some(ProcView::TaskDir) => FileResult::Found(Box::new(self.create_task_dir(oflags, path))),
            None => self.fs.resolve(path, OpenFlags::from_raw(oflags)),
        }
    }

    /// Snapshot of the open descriptors as symlink entries
    fn create_fd_dir(&self, oflags: i32, path: &str) -> DirectoryFile {
        let entries = self
            .fds
            .fds()
            .map(|fd| DirectoryEntry::new(DirentType::Lnk, fd.to_string()))
            .collect();
        DirectoryFile::new(oflags, path, entries)
    }

    fn create_task_dir(&self, oflags: i32, path: &str) -> DirectoryFile {
        let entries = vec![DirectoryEntry::new(DirentType::Dir, self.pid().to_string())];
        DirectoryFile::new(oflags, path, entries)
    }

    pub(super) fn openat(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let dirfd = ctx.int_arg(0);
        let path = ctx.emulator.read_c_string(ctx.arg(1))?;
        let oflags = ctx.int_arg(2);
        if dirfd != AT_FDCWD && !path.starts_with('/') {
            return Err(SyscallError::unsupported(
                "openat",
                format!("dirfd={}, path={}", dirfd, path),
            ));
        }

        match self.resolve(&path, oflags) {
            FileResult::Found(io) => match self.fds.insert(io) {
                Ok(fd) => {
                    debug!(fd, path = %path, oflags = %format!("{:#o}", oflags), "openat");
                    done(fd)
                }
                Err(errno) => fail(ctx, errno),
            },
            FileResult::NotFound => {
                debug!(path = %path, "openat: no such file");
                fail(ctx, Errno::ENOENT)
            }
            FileResult::Failed(errno) => {
                info!(path = %path, %errno, "openat failed");
                fail(ctx, errno)
            }
        }
    }

    /// statfs64(path, size, buf) on arm32, statfs(path, buf) on arm64
    pub(super) fn statfs(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let arch = ctx.arch();
        let path = ctx.emulator.read_c_string(ctx.arg(0))?;
        let buf = match arch {
            Arch::Arm32 => ctx.arg(2),
            Arch::Arm64 => ctx.arg(1),
        };

        let io = match self.resolve(&path, O_RDONLY) {
            FileResult::Found(io) => io,
            FileResult::NotFound => {
                info!(path = %path, buf = %format!("{:#x}", buf), "statfs: no such file");
                return fail(ctx, Errno::ENOENT);
            }
            FileResult::Failed(errno) => {
                info!(path = %path, %errno, "statfs failed");
                return fail(ctx, errno);
            }
        };

        let mut stat = StatFs::default();
        let ret = io.statfs(&mut stat);
        if ret != 0 {
            info!(path = %path, ret, "statfs failed");
        } else {
            ctx.emulator.write_bytes(buf, &stat.encode(arch))?;
            if self.config.verbose {
                info!(path = %path, kind = ?io.kind(), lr = %format!("{:#x}", ctx.emulator.lr()), "File statfs");
            }
            debug!(path = %path, buf = %format!("{:#x}", buf), "statfs");
        }
        done(ret)
    }

    pub(super) fn mkdirat(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let dirfd = ctx.int_arg(0);
        let path = ctx.emulator.read_c_string(ctx.arg(1))?;
        let mode = ctx.arg(2) as u32;
        debug!(dirfd, path = %path, mode = %format!("{:o}", mode), "mkdirat");
        if dirfd != AT_FDCWD {
            return Err(SyscallError::unsupported(
                "mkdirat",
                format!("dirfd={}, path={}", dirfd, path),
            ));
        }

        if self.fs.mkdir(&path, mode) {
            debug!(path = %path, "mkdir succeeded");
            done(0)
        } else {
            info!(path = %path, mode = %format!("{:o}", mode), "mkdir failed");
            fail(ctx, Errno::EACCES)
        }
    }

    /// Always reports success; the backend result is only logged
    pub(super) fn renameat(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let olddirfd = ctx.int_arg(0);
        let oldpath = ctx.emulator.read_c_string(ctx.arg(1))?;
        let newdirfd = ctx.int_arg(2);
        let newpath = ctx.emulator.read_c_string(ctx.arg(3))?;
        let ret = self.fs.rename(&oldpath, &newpath);
        if ret != 0 {
            info!(olddirfd, oldpath = %oldpath, newdirfd, newpath = %newpath, ret, "renameat failed");
        } else {
            debug!(olddirfd, oldpath = %oldpath, newdirfd, newpath = %newpath, "renameat");
        }
        done(0)
    }

    pub(super) fn unlinkat(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let dirfd = ctx.int_arg(0);
        let path = ctx.emulator.read_c_string(ctx.arg(1))?;
        let flags = ctx.int_arg(2);
        self.fs.unlink(&path);
        debug!(dirfd, path = %path, flags, "unlinkat");
        done(0)
    }

    pub(super) fn fchmodat(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let dirfd = ctx.int_arg(0);
        let path = ctx.emulator.read_c_string(ctx.arg(1))?;
        let mode = ctx.int_arg(2);
        let flags = ctx.int_arg(3);
        debug!(dirfd, path = %path, mode = %format!("{:o}", mode), flags = %format!("{:#x}", flags), "fchmodat");
        done(0)
    }

    pub(super) fn fchownat(&mut self, ctx: &mut SyscallContext<'_>) -> SyscallResult<SyscallOutcome> {
        let dirfd = ctx.int_arg(0);
        let path = ctx.emulator.read_c_string(ctx.arg(1))?;
        let owner = ctx.int_arg(2);
        let group = ctx.int_arg(3);
        let flags = ctx.int_arg(4);
        debug!(dirfd, path = %path, owner, group, flags = %format!("{:#x}", flags), "fchownat");
        done(0)
    }
}
