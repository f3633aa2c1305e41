/*!
 * Thread Dispatcher Tests
 * Cooperative switching, task retirement and signal hand-off
 */

use guest_kernel::guest::Arch;
use guest_kernel::signals::{HandlerTask, SigAction};
use guest_kernel::syscalls::Sysno;
use guest_kernel::vfs::MemFS;
use guest_kernel::{SimulatedGuest, Step, SyscallConfig, SyscallHandler, ThreadDispatcher};
use pretty_assertions::assert_eq;
use std::sync::Arc;

const PID: u32 = 100;

fn setup(arch: Arch) -> (ThreadDispatcher, SimulatedGuest) {
    let config = SyscallConfig::default().with_pid(PID);
    let handler = SyscallHandler::new(Arc::new(MemFS::new()), config);
    (ThreadDispatcher::new(handler), SimulatedGuest::new(arch))
}

fn run(dispatcher: &mut ThreadDispatcher, guest: &mut SimulatedGuest, sysno: Sysno, args: &[u64]) -> Step {
    use guest_kernel::Emulator;
    let nr = sysno.number(guest.arch()).unwrap();
    guest.set_args(args);
    dispatcher.handle_syscall(guest, nr).unwrap()
}

#[test]
fn test_completed_call_returns() {
    let (mut dispatcher, mut guest) = setup(Arch::Arm64);
    assert_eq!(dispatcher.current().unwrap().id, PID);
    assert_eq!(run(&mut dispatcher, &mut guest, Sysno::SchedGetscheduler, &[0]), Step::Return(0));
    assert_eq!(dispatcher.resume(), None);
}

#[test]
fn test_yield_rotates_tasks() {
    let (mut dispatcher, mut guest) = setup(Arch::Arm32);
    let tid = dispatcher.spawn_thread();
    assert_eq!(dispatcher.task_count(), 2);

    assert_eq!(
        run(&mut dispatcher, &mut guest, Sysno::SchedYield, &[]),
        Step::Switched { from: PID, to: tid }
    );
    assert_eq!(dispatcher.current().unwrap().id, tid);
    assert_eq!(dispatcher.resume(), None);

    assert_eq!(
        run(&mut dispatcher, &mut guest, Sysno::SchedYield, &[]),
        Step::Switched { from: tid, to: PID }
    );
    assert_eq!(dispatcher.resume(), Some(0));
    assert_eq!(dispatcher.resume(), None);
}

#[test]
fn test_yield_alone_completes() {
    let (mut dispatcher, mut guest) = setup(Arch::Arm64);
    assert_eq!(run(&mut dispatcher, &mut guest, Sysno::SchedYield, &[]), Step::Return(0));
}

#[test]
fn test_thread_exit_retires_task() {
    let (mut dispatcher, mut guest) = setup(Arch::Arm64);
    let tid = dispatcher.spawn_thread();
    run(&mut dispatcher, &mut guest, Sysno::SchedYield, &[]);
    assert_eq!(dispatcher.current().unwrap().id, tid);

    assert_eq!(
        run(&mut dispatcher, &mut guest, Sysno::Exit, &[3]),
        Step::Switched { from: tid, to: PID }
    );
    assert_eq!(dispatcher.task_count(), 1);
    assert!(dispatcher.task(tid).is_none());
    assert!(!guest.is_stopped());
}

#[test]
fn test_main_exit_stops_guest() {
    let (mut dispatcher, mut guest) = setup(Arch::Arm32);
    assert_eq!(run(&mut dispatcher, &mut guest, Sysno::Exit, &[7]), Step::Exited(7));
    assert!(guest.is_stopped());
}

#[test]
fn test_kill_queues_handler_task() {
    let (mut dispatcher, mut guest) = setup(Arch::Arm64);
    let action = SigAction::new(0x7000_0000, 0);
    let act = guest.alloc_bytes(&action.encode(Arch::Arm64));
    assert_eq!(run(&mut dispatcher, &mut guest, Sysno::RtSigaction, &[10, act, 0, 8]), Step::Return(0));

    assert_eq!(
        run(&mut dispatcher, &mut guest, Sysno::Kill, &[0, 10]),
        Step::Switched { from: PID, to: PID }
    );
    assert_eq!(dispatcher.current().unwrap().pending_count(), 1);
    assert_eq!(dispatcher.resume(), Some(0));

    let Some(HandlerTask::Invoke(function)) = dispatcher.next_signal(Arch::Arm64) else {
        panic!("expected a handler invocation");
    };
    assert_eq!(function.signum, 10);
    assert_eq!(function.entry(), 0x7000_0000);
    assert_eq!(function.call_arguments(0, 0), vec![10]);
    assert_eq!(dispatcher.next_signal(Arch::Arm64), None);
}

#[test]
fn test_unknown_syscall_is_fatal() {
    let (mut dispatcher, mut guest) = setup(Arch::Arm64);
    assert!(dispatcher.handle_syscall(&mut guest, 4000).is_err());
    assert_eq!(dispatcher.task_count(), 1);
}
