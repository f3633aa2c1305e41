/*!
 * select Readiness Tests
 */

use crate::harness::Harness;
use guest_kernel::guest::Arch;
use guest_kernel::syscalls::{SyscallContext, Sysno};
use pretty_assertions::assert_eq;

/// Pipe on fds 3 (write) and 4 (read) with one byte buffered
fn ready_pipe(h: &mut Harness) {
    let pipefd = h.buffer(8);
    assert_eq!(h.completed(Sysno::Pipe2, &[pipefd, 0]), 0);
    let byte = h.guest.alloc_bytes(b"!");
    assert_eq!(h.completed(Sysno::Write, &[3, byte, 1]), 1);
}

fn fd_set(h: &mut Harness, fds: &[i32]) -> u64 {
    let mask = fds.iter().fold(0u32, |mask, fd| mask | 1 << fd);
    let addr = h.buffer(4);
    h.write(addr, &mask.to_le_bytes());
    addr
}

#[test]
fn test_select_clears_unready_bits_and_clear_set() {
    let mut h = Harness::new(Arch::Arm64);
    ready_pipe(&mut h);
    let check = fd_set(&mut h, &[3, 4]);
    let clear = fd_set(&mut h, &[0, 1, 2, 3, 4]);

    let mut ctx = SyscallContext::new(&mut h.guest, None, 1);
    let count = h.handler.select(&mut ctx, 5, check, Some(clear), true).unwrap();
    assert_eq!(count, 1);
    // fd 3 is the write end and never readable
    assert_eq!(h.read_i32(check), 1 << 4);
    assert_eq!(h.read_i32(clear), 0);
}

#[test]
fn test_select_without_read_check_counts_every_set_bit() {
    let mut h = Harness::new(Arch::Arm32);
    ready_pipe(&mut h);
    let check = fd_set(&mut h, &[1, 3]);

    let mut ctx = SyscallContext::new(&mut h.guest, None, 1);
    let count = h.handler.select(&mut ctx, 4, check, None, false).unwrap();
    assert_eq!(count, 2);
    assert_eq!(h.read_i32(check), (1 << 1) | (1 << 3));
}

#[test]
fn test_select_nothing_ready_keeps_clear_set() {
    let mut h = Harness::new(Arch::Arm64);
    let pipefd = h.buffer(8);
    h.completed(Sysno::Pipe2, &[pipefd, 0]);
    let check = fd_set(&mut h, &[4]);
    let clear = fd_set(&mut h, &[3]);

    let mut ctx = SyscallContext::new(&mut h.guest, None, 1);
    assert_eq!(h.handler.select(&mut ctx, 5, check, Some(clear), true).unwrap(), 0);
    assert_eq!(h.read_i32(check), 0);
    assert_eq!(h.read_i32(clear), 1 << 3);
}

#[test]
fn test_pselect6_read_set_first() {
    let mut h = Harness::new(Arch::Arm64);
    ready_pipe(&mut h);
    let readfds = fd_set(&mut h, &[4]);
    let writefds = fd_set(&mut h, &[3]);
    assert_eq!(h.completed(Sysno::Pselect6, &[5, readfds, writefds, 0, 0, 0]), 1);
    assert_eq!(h.read_i32(readfds), 1 << 4);
    assert_eq!(h.read_i32(writefds), 0);
}

#[test]
fn test_newselect_falls_back_to_write_set() {
    let mut h = Harness::new(Arch::Arm32);
    let pipefd = h.buffer(8);
    h.completed(Sysno::Pipe2, &[pipefd, 0]);
    // Nothing buffered: the read set comes back empty
    let readfds = fd_set(&mut h, &[4]);
    let writefds = fd_set(&mut h, &[3]);
    assert_eq!(h.completed(Sysno::Newselect, &[5, readfds, writefds, 0, 0]), 1);
    assert_eq!(h.read_i32(readfds), 0);
    assert_eq!(h.read_i32(writefds), 1 << 3);
}

#[test]
fn test_pselect6_nothing_ready() {
    let mut h = Harness::new(Arch::Arm64);
    let pipefd = h.buffer(8);
    h.completed(Sysno::Pipe2, &[pipefd, 0]);
    let readfds = fd_set(&mut h, &[4]);
    assert_eq!(h.completed(Sysno::Pselect6, &[5, readfds, 0, 0, 0, 0]), 0);
    assert_eq!(h.read_i32(readfds), 0);
}
