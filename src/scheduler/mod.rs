/*!
 * Scheduler Module
 * Cooperative task model and the yield protocol between handlers and scheduler
 */

pub mod dispatcher;
pub mod types;

// Re-export for convenience
pub use dispatcher::ThreadDispatcher;
pub use types::{Step, SyscallOutcome, Task, TaskKind};
