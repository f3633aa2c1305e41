/*!
 * Scheduling Stub Tests
 * Affinity, policy, priority and the sched_yield switch rule
 */

use crate::harness::Harness;
use guest_kernel::guest::Arch;
use guest_kernel::scheduler::SyscallOutcome;
use guest_kernel::syscalls::Sysno;
use pretty_assertions::assert_eq;

#[test]
fn test_getaffinity_before_set_leaves_buffer() {
    let mut h = Harness::new(Arch::Arm64);
    let out = h.guest.alloc_bytes(&[0x55; 8]);
    assert_eq!(h.completed(Sysno::SchedGetaffinity, &[0, 8, out]), 0);
    assert_eq!(h.read(out, 8), vec![0x55; 8]);
}

#[test]
fn test_affinity_round_trip() {
    let mut h = Harness::new(Arch::Arm32);
    let mask = [0x0F, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x80];
    let input = h.guest.alloc_bytes(&mask);
    assert_eq!(h.completed(Sysno::SchedSetaffinity, &[0, 8, input]), 0);
    assert_eq!(h.handler.cpu_mask(), Some(&mask[..]));

    let out = h.buffer(8);
    assert_eq!(h.completed(Sysno::SchedGetaffinity, &[0, 8, out]), 8);
    assert_eq!(h.read(out, 8), mask);
}

#[test]
fn test_affinity_is_process_wide() {
    let mut h = Harness::new(Arch::Arm64);
    let input = h.guest.alloc_bytes(&[0x03]);
    h.completed(Sysno::SchedSetaffinity, &[0, 1, input]);

    // A different pid sees the same mask
    let out = h.buffer(8);
    assert_eq!(h.completed(Sysno::SchedGetaffinity, &[1234, 1, out]), 1);
    assert_eq!(h.read(out, 1), vec![0x03]);
}

#[test]
fn test_getaffinity_reports_bytes_copied() {
    let mut h = Harness::new(Arch::Arm64);
    let input = h.guest.alloc_bytes(&[0x03]);
    h.completed(Sysno::SchedSetaffinity, &[0, 1, input]);

    let out = h.guest.alloc_bytes(&[0xAA; 8]);
    assert_eq!(h.completed(Sysno::SchedGetaffinity, &[0, 8, out]), 1);
    assert_eq!(h.read(out, 8), vec![0x03, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA]);
}

#[test]
fn test_setaffinity_null_mask_keeps_previous() {
    let mut h = Harness::new(Arch::Arm32);
    let input = h.guest.alloc_bytes(&[0x05, 0x00]);
    h.completed(Sysno::SchedSetaffinity, &[0, 2, input]);

    assert_eq!(h.completed(Sysno::SchedSetaffinity, &[0, 2, 0]), 0);
    assert_eq!(h.handler.cpu_mask(), Some(&[0x05, 0x00][..]));
}

#[test]
fn test_setaffinity_null_mask_before_any_set() {
    let mut h = Harness::new(Arch::Arm64);
    assert_eq!(h.completed(Sysno::SchedSetaffinity, &[0, 8, 0]), 0);
    assert_eq!(h.handler.cpu_mask(), None);
}

#[test]
fn test_sched_yield_single_task() {
    let mut h = Harness::new(Arch::Arm64);
    assert_eq!(h.call(Sysno::SchedYield, &[]).unwrap(), SyscallOutcome::Completed(0));
}

#[test]
fn test_sched_yield_under_contention() {
    let mut h = Harness::new(Arch::Arm64);
    h.task_count = 3;
    assert_eq!(h.call(Sysno::SchedYield, &[]).unwrap(), SyscallOutcome::Yield(0));
}

#[test]
fn test_policy_and_priority_are_fixed() {
    let mut h = Harness::new(Arch::Arm64);
    let param = h.guest.alloc_bytes(&[0x7F; 4]);
    assert_eq!(h.completed(Sysno::SchedSetscheduler, &[0, 1, param]), 0);
    assert_eq!(h.completed(Sysno::SchedGetscheduler, &[0]), 0);
    assert_eq!(h.completed(Sysno::SchedSetparam, &[0, param]), 0);
    assert_eq!(h.completed(Sysno::SchedGetparam, &[0, param]), 0);
    assert_eq!(h.read_i32(param), 0);
    assert_eq!(h.completed(Sysno::Setpriority, &[0, 0, 19]), 0);
    assert_eq!(h.completed(Sysno::Getpriority, &[0, 0]), 0);
}
