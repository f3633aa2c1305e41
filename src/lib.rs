/*!
 * Guest Kernel Library
 * Linux/Android syscall emulation for guests running inside an instruction emulator
 *
 * The embedding run loop decodes a syscall number, hands it to a
 * `SyscallHandler` (directly or through the reference `ThreadDispatcher`)
 * and either writes the returned value into the guest's return register or,
 * on a yield, lets the scheduler pick the next task.
 */

pub mod core;
pub mod fd;
pub mod guest;
pub mod monitoring;
pub mod scheduler;
pub mod signals;
pub mod syscalls;
pub mod vfs;

// Re-exports
pub use crate::core::{Errno, KernelError, KernelResult, SyscallConfig};
pub use fd::{FdTable, FileIO};
pub use guest::{Arch, Emulator, SimulatedGuest};
pub use monitoring::init_tracing;
pub use scheduler::{Step, SyscallOutcome, Task, TaskKind, ThreadDispatcher};
pub use signals::{HandlerTask, SigAction, SignalFunction, SignalTable};
pub use syscalls::{SyscallContext, SyscallError, SyscallHandler, SyscallResult, Sysno};
pub use vfs::{FileSystem, MemFS};
