/*!
 * Scheduler Types
 * Tasks, syscall outcomes and dispatcher steps
 */

use crate::core::types::{Pid, Signum, SyscallReturn, TaskId};
use crate::signals::{PendingSignal, SigAction};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Result of one syscall handler invocation
///
/// `Yield` hands control back to the scheduler. The carried value is what the
/// suspended call site observes once the task is resumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyscallOutcome {
    Completed(SyscallReturn),
    Yield(SyscallReturn),
}

impl SyscallOutcome {
    #[inline]
    pub fn is_yield(&self) -> bool {
        matches!(self, SyscallOutcome::Yield(_))
    }

    /// The value the guest eventually sees
    #[inline]
    pub fn value(&self) -> SyscallReturn {
        match self {
            SyscallOutcome::Completed(v) | SyscallOutcome::Yield(v) => *v,
        }
    }
}

/// Main process task or a spawned thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    Main,
    Thread { tid: TaskId },
}

/// One schedulable unit of guest execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub kind: TaskKind,
    pub pending: VecDeque<PendingSignal>,
    pub exit_status: Option<i32>,
    pub resume_value: Option<SyscallReturn>,
}

impl Task {
    fn with_kind(id: TaskId, kind: TaskKind) -> Self {
        Self {
            id,
            kind,
            pending: VecDeque::new(),
            exit_status: None,
            resume_value: None,
        }
    }

    /// Main task; its id is the process id
    pub fn main(pid: Pid) -> Self {
        Self::with_kind(pid, TaskKind::Main)
    }

    pub fn thread(tid: TaskId) -> Self {
        Self::with_kind(tid, TaskKind::Thread { tid })
    }

    #[inline]
    pub fn is_thread(&self) -> bool {
        matches!(self.kind, TaskKind::Thread { .. })
    }

    /// Queue a signal for delivery when this task next runs
    pub fn add_signal_task(&mut self, signum: Signum, action: SigAction) {
        self.pending.push_back(PendingSignal::new(signum, action));
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn set_exit_status(&mut self, status: i32) {
        self.exit_status = Some(status);
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TaskKind::Main => write!(f, "main({})", self.id),
            TaskKind::Thread { tid } => write!(f, "thread({})", tid),
        }
    }
}

/// What the dispatch loop should do after a syscall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Write the value into the return register and continue
    Return(SyscallReturn),
    /// The calling task was suspended; `to` is now current
    Switched { from: TaskId, to: TaskId },
    /// The process is gone
    Exited(i32),
}
