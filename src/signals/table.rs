/*!
 * Signal Table
 * Per-process signal dispositions installed through rt_sigaction
 */

use super::action::SigAction;
use super::delivery::{HandlerTask, SignalFunction};
use super::types::{Signal, SignalError, SignalResult, SIGKILL, SIGSTOP};
use crate::core::types::Signum;
use crate::guest::Arch;
use ahash::RandomState;
use std::collections::HashMap;

/// Signal number to installed action
#[derive(Debug, Clone, Default)]
pub struct SignalTable {
    actions: HashMap<Signum, SigAction, RandomState>,
}

impl SignalTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `action` for `signum` and return the previous one
    ///
    /// `None` queries without changing anything, as a NULL `act` does on
    /// Linux; it does not remove the installed action. SIGKILL and SIGSTOP
    /// are rejected whether or not an action is supplied.
    pub fn set(&mut self, signum: Signum, action: Option<SigAction>) -> SignalResult<Option<SigAction>> {
        if signum == SIGKILL || signum == SIGSTOP {
            let signal = Signal::from_number(signum)?;
            return Err(SignalError::Uncatchable(signal));
        }
        match action {
            Some(action) => Ok(self.actions.insert(signum, action)),
            None => Ok(self.actions.get(&signum).copied()),
        }
    }

    pub fn get(&self, signum: Signum) -> Option<&SigAction> {
        self.actions.get(&signum)
    }

    pub fn contains(&self, signum: Signum) -> bool {
        self.actions.contains_key(&signum)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Build the work item that delivers `signum` to the guest
    pub fn handler_task(&self, signum: Signum, arch: Arch) -> HandlerTask {
        match self.actions.get(&signum) {
            Some(action) if action.is_ignore() => HandlerTask::Ignore { signum },
            Some(action) if !action.is_default() => {
                HandlerTask::Invoke(SignalFunction::new(signum, *action, arch))
            }
            _ => HandlerTask::Default { signum },
        }
    }
}
