/*!
 * Signal Types
 * Signal numbers, disposition constants and error types
 */

use super::action::SigAction;
use crate::core::types::Signum;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Default disposition
pub const SIG_DFL: u64 = 0;
/// Ignore disposition
pub const SIG_IGN: u64 = 1;
/// Error disposition, all ones in the guest word
pub const SIG_ERR: u64 = u64::MAX;

/// Handler takes (signum, siginfo, ucontext)
pub const SA_SIGINFO: u64 = 0x0000_0004;
pub const SA_ONSTACK: u64 = 0x0800_0000;
/// `restorer` holds the sigreturn trampoline
pub const SA_RESTORER: u64 = 0x0400_0000;

pub const SIGKILL: Signum = 9;
pub const SIGSTOP: Signum = 19;

/// Signal operation result
pub type SignalResult<T> = Result<T, SignalError>;

/// Signal errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalError {
    #[error("Invalid signal: {0}")]
    InvalidSignal(Signum),

    #[error("Signal {0} cannot be caught or ignored")]
    Uncatchable(Signal),
}

/// UNIX-style signal numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum Signal {
    SIGHUP = 1,
    SIGINT = 2,
    SIGQUIT = 3,
    SIGILL = 4,
    SIGTRAP = 5,
    SIGABRT = 6,
    SIGBUS = 7,
    SIGFPE = 8,
    /// Kill signal (cannot be caught or ignored)
    SIGKILL = 9,
    SIGUSR1 = 10,
    SIGSEGV = 11,
    SIGUSR2 = 12,
    SIGPIPE = 13,
    SIGALRM = 14,
    SIGTERM = 15,
    SIGSTKFLT = 16,
    SIGCHLD = 17,
    SIGCONT = 18,
    /// Stop process (cannot be caught or ignored)
    SIGSTOP = 19,
    SIGTSTP = 20,
    SIGTTIN = 21,
    SIGTTOU = 22,
    SIGURG = 23,
    SIGXCPU = 24,
    SIGXFSZ = 25,
    SIGVTALRM = 26,
    SIGPROF = 27,
    SIGWINCH = 28,
    SIGIO = 29,
    SIGPWR = 30,
    SIGSYS = 31,
}

impl Signal {
    /// Convert from signal number
    pub fn from_number(n: Signum) -> SignalResult<Self> {
        use Signal::*;
        const ALL: [Signal; 31] = [
            SIGHUP, SIGINT, SIGQUIT, SIGILL, SIGTRAP, SIGABRT, SIGBUS, SIGFPE, SIGKILL, SIGUSR1,
            SIGSEGV, SIGUSR2, SIGPIPE, SIGALRM, SIGTERM, SIGSTKFLT, SIGCHLD, SIGCONT, SIGSTOP,
            SIGTSTP, SIGTTIN, SIGTTOU, SIGURG, SIGXCPU, SIGXFSZ, SIGVTALRM, SIGPROF, SIGWINCH,
            SIGIO, SIGPWR, SIGSYS,
        ];
        match n {
            1..=31 => Ok(ALL[(n - 1) as usize]),
            _ => Err(SignalError::InvalidSignal(n)),
        }
    }

    #[inline]
    pub fn number(&self) -> Signum {
        *self as Signum
    }

    /// SIGKILL and SIGSTOP keep their default disposition
    #[inline]
    pub fn can_catch(&self) -> bool {
        !matches!(self, Signal::SIGKILL | Signal::SIGSTOP)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Human-readable name for logs; real-time signals have no name
pub fn signal_name(signum: Signum) -> String {
    match Signal::from_number(signum) {
        Ok(signal) => signal.to_string(),
        Err(_) => format!("SIG{}", signum),
    }
}

/// Signal queued on a task until the dispatcher delivers it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSignal {
    pub signum: Signum,
    pub action: SigAction,
}

impl PendingSignal {
    pub fn new(signum: Signum, action: SigAction) -> Self {
        Self { signum, action }
    }
}
