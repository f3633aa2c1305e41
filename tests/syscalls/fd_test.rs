/*!
 * Descriptor Syscall Tests
 * pipe2, eventfd2, read/write/close and descriptor exhaustion
 */

use crate::harness::{int, Harness};
use guest_kernel::core::limits::{EFD_CLOEXEC, EFD_NONBLOCK, EFD_SEMAPHORE};
use guest_kernel::guest::Arch;
use guest_kernel::syscalls::{SyscallHandler, Sysno};
use guest_kernel::vfs::MemFS;
use guest_kernel::{Errno, SyscallConfig};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn open_pipe(h: &mut Harness) -> (i32, i32) {
    let pipefd = h.buffer(8);
    assert_eq!(h.completed(Sysno::Pipe2, &[pipefd, 0]), 0);
    (h.read_i32(pipefd), h.read_i32(pipefd + 4))
}

#[test]
fn test_pipe2_write_end_is_allocated_first() {
    for arch in [Arch::Arm32, Arch::Arm64] {
        let mut h = Harness::new(arch);
        let (readfd, writefd) = open_pipe(&mut h);
        assert_eq!((readfd, writefd), (4, 3));
        assert!(writefd < readfd);
    }
}

#[test]
fn test_pipe2_bytes_arrive_in_order() {
    let mut h = Harness::new(Arch::Arm64);
    let (readfd, writefd) = open_pipe(&mut h);

    let first = h.guest.alloc_bytes(b"hello");
    let second = h.guest.alloc_bytes(b" world");
    assert_eq!(h.completed(Sysno::Write, &[writefd as u64, first, 5]), 5);
    assert_eq!(h.completed(Sysno::Write, &[writefd as u64, second, 6]), 6);

    let out = h.buffer(32);
    assert_eq!(h.completed(Sysno::Read, &[readfd as u64, out, 32]), 11);
    assert_eq!(h.read(out, 11), b"hello world");

    // Drained with the writer still open
    assert_eq!(h.completed(Sysno::Read, &[readfd as u64, out, 32]), -1);
    assert_eq!(h.guest.errno(), Some(Errno::EAGAIN));

    // EOF once the writer is closed
    assert_eq!(h.completed(Sysno::Close, &[writefd as u64]), 0);
    assert_eq!(h.completed(Sysno::Read, &[readfd as u64, out, 32]), 0);
}

#[test]
fn test_pipe_write_after_reader_closed() {
    let mut h = Harness::new(Arch::Arm32);
    let (readfd, writefd) = open_pipe(&mut h);
    assert_eq!(h.completed(Sysno::Close, &[readfd as u64]), 0);
    let data = h.guest.alloc_bytes(b"x");
    assert_eq!(h.completed(Sysno::Write, &[writefd as u64, data, 1]), -1);
    assert_eq!(h.guest.errno(), Some(Errno::EPIPE));
}

#[test]
fn test_eventfd2_cloexec_is_fatal() {
    let mut h = Harness::new(Arch::Arm64);
    for flags in [EFD_CLOEXEC, EFD_CLOEXEC | EFD_NONBLOCK, EFD_CLOEXEC | EFD_SEMAPHORE] {
        let err = h.call(Sysno::Eventfd2, &[0, int(flags)]).unwrap_err();
        assert!(err.is_unsupported());
    }
    assert_eq!(h.handler.fds().len(), 3);
}

#[test]
fn test_eventfd2_takes_lowest_free_fd() {
    let mut h = Harness::new(Arch::Arm64);
    for (expected, flags) in [(3, 0), (4, EFD_NONBLOCK), (5, EFD_SEMAPHORE | EFD_NONBLOCK)] {
        assert_eq!(h.completed(Sysno::Eventfd2, &[0, int(flags)]), expected);
    }
    assert_eq!(h.completed(Sysno::Close, &[4]), 0);
    assert_eq!(h.completed(Sysno::Eventfd2, &[0, int(EFD_SEMAPHORE)]), 4);
}

#[test]
fn test_eventfd_semaphore_reads() {
    let mut h = Harness::new(Arch::Arm32);
    let fd = h.completed(Sysno::Eventfd2, &[2, int(EFD_SEMAPHORE | EFD_NONBLOCK)]) as u64;
    let buf = h.buffer(8);
    for _ in 0..2 {
        assert_eq!(h.completed(Sysno::Read, &[fd, buf, 8]), 8);
        assert_eq!(h.read(buf, 8), 1u64.to_le_bytes());
    }
    assert_eq!(h.completed(Sysno::Read, &[fd, buf, 8]), -1);
    assert_eq!(h.guest.errno(), Some(Errno::EAGAIN));

    let value = h.guest.alloc_bytes(&5u64.to_le_bytes());
    assert_eq!(h.completed(Sysno::Write, &[fd, value, 8]), 8);
    assert_eq!(h.completed(Sysno::Read, &[fd, buf, 8]), 8);
}

#[test]
fn test_close_unknown_fd() {
    let mut h = Harness::new(Arch::Arm64);
    assert_eq!(h.completed(Sysno::Close, &[42]), -1);
    assert_eq!(h.guest.errno(), Some(Errno::EBADF));
    assert_eq!(h.completed(Sysno::Read, &[42, 0, 0]), -1);
    assert_eq!(h.guest.errno(), Some(Errno::EBADF));
}

#[test]
fn test_descriptor_exhaustion() {
    let mut h = Harness::new(Arch::Arm64);
    let config = SyscallConfig::default().with_max_fds(4);
    h.handler = SyscallHandler::new(Arc::new(MemFS::new()), config);

    // Only one slot left: the write end fits, the read end does not
    let pipefd = h.buffer(8);
    assert_eq!(h.completed(Sysno::Pipe2, &[pipefd, 0]), -1);
    assert_eq!(h.guest.errno(), Some(Errno::EMFILE));
    assert_eq!(h.handler.fds().len(), 3);

    assert_eq!(h.completed(Sysno::Eventfd2, &[0, 0]), 3);
    assert_eq!(h.completed(Sysno::Eventfd2, &[0, 0]), -1);
    assert_eq!(h.guest.errno(), Some(Errno::EMFILE));
}

#[test]
fn test_pipe2_with_zero_capacity_config() {
    let mut h = Harness::new(Arch::Arm64);
    let config = SyscallConfig {
        pipe_capacity: 0,
        ..SyscallConfig::default()
    };
    h.handler = SyscallHandler::new(Arc::new(MemFS::new()), config);

    let (readfd, writefd) = open_pipe(&mut h);
    let data = h.guest.alloc_bytes(b"xy");
    assert_eq!(h.completed(Sysno::Write, &[writefd as u64, data, 2]), 1);
    let out = h.buffer(8);
    assert_eq!(h.completed(Sysno::Read, &[readfd as u64, out, 8]), 1);
    assert_eq!(h.read(out, 1), b"x");
}
