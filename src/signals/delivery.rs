/*!
 * Signal Delivery
 * Work items produced when a queued signal reaches the front of a task
 */

use super::action::SigAction;
use crate::core::types::{Address, Signum};
use crate::guest::Arch;

/// Guest signal handler ready to be called
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalFunction {
    pub signum: Signum,
    pub action: SigAction,
    pub arch: Arch,
}

impl SignalFunction {
    pub fn new(signum: Signum, action: SigAction, arch: Arch) -> Self {
        Self {
            signum,
            action,
            arch,
        }
    }

    /// Guest address of the handler
    pub fn entry(&self) -> Address {
        self.arch.truncate(self.action.handler)
    }

    /// Where the handler returns to, if the guest registered a trampoline
    pub fn return_address(&self) -> Option<Address> {
        self.action.restorer().map(|addr| self.arch.truncate(addr))
    }

    /// Argument registers for the call
    ///
    /// SA_SIGINFO handlers receive `(signum, info, ucontext)`, plain ones
    /// only `signum`.
    pub fn call_arguments(&self, info: Address, ucontext: Address) -> Vec<u64> {
        let signum = u64::from(self.signum as u32);
        if self.action.has_siginfo() {
            vec![signum, info, ucontext]
        } else {
            vec![signum]
        }
    }
}

/// How the dispatcher should handle a dequeued signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerTask {
    /// Run the guest handler
    Invoke(SignalFunction),
    /// SIG_IGN: drop it
    Ignore { signum: Signum },
    /// SIG_DFL: the host decides (terminate for most signals)
    Default { signum: Signum },
}

impl HandlerTask {
    pub fn signum(&self) -> Signum {
        match self {
            HandlerTask::Invoke(function) => function.signum,
            HandlerTask::Ignore { signum } | HandlerTask::Default { signum } => *signum,
        }
    }
}
