/*!
 * Syscall Numbers
 * Per-architecture numbering of every syscall this layer handles
 */

use crate::guest::Arch;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest syscall number either table uses
const MAX_SYSCALL_NR: u64 = 512;

/// Syscalls with a handler in this layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sysno {
    Exit,
    Read,
    Write,
    Close,
    Openat,
    Getdents64,
    Kill,
    Tgkill,
    Getpriority,
    Setpriority,
    Newselect,
    Pselect6,
    SchedSetparam,
    SchedGetparam,
    SchedSetscheduler,
    SchedGetscheduler,
    SchedYield,
    SchedSetaffinity,
    SchedGetaffinity,
    RtSigaction,
    RtSigtimedwait,
    Sigaltstack,
    Statfs,
    Mkdirat,
    Fchownat,
    Fchmodat,
    Unlinkat,
    Renameat,
    Eventfd2,
    Pipe2,
}

impl Sysno {
    /// Map a raw syscall number for `arch`
    pub fn from_raw(arch: Arch, nr: u64) -> Option<Self> {
        match arch {
            Arch::Arm32 => Self::from_arm32(nr),
            Arch::Arm64 => Self::from_arm64(nr),
        }
    }

    /// Raw number of this syscall on `arch`, if it exists there
    pub fn number(&self, arch: Arch) -> Option<u64> {
        (0..=MAX_SYSCALL_NR).find(|nr| Self::from_raw(arch, *nr) == Some(*self))
    }

    // ARM EABI numbering
    fn from_arm32(nr: u64) -> Option<Self> {
        use Sysno::*;
        Some(match nr {
            1 => Exit,
            3 => Read,
            4 => Write,
            6 => Close,
            37 => Kill,
            96 => Getpriority,
            97 => Setpriority,
            142 => Newselect,
            154 => SchedSetparam,
            155 => SchedGetparam,
            156 => SchedSetscheduler,
            157 => SchedGetscheduler,
            158 => SchedYield,
            174 => RtSigaction,
            177 => RtSigtimedwait,
            186 => Sigaltstack,
            217 => Getdents64,
            241 => SchedSetaffinity,
            242 => SchedGetaffinity,
            266 => Statfs,
            268 => Tgkill,
            322 => Openat,
            323 => Mkdirat,
            325 => Fchownat,
            328 => Unlinkat,
            329 => Renameat,
            333 => Fchmodat,
            335 => Pselect6,
            356 => Eventfd2,
            359 => Pipe2,
            _ => return None,
        })
    }

    // asm-generic numbering
    fn from_arm64(nr: u64) -> Option<Self> {
        use Sysno::*;
        Some(match nr {
            19 => Eventfd2,
            34 => Mkdirat,
            35 => Unlinkat,
            38 => Renameat,
            43 => Statfs,
            53 => Fchmodat,
            54 => Fchownat,
            56 => Openat,
            57 => Close,
            59 => Pipe2,
            61 => Getdents64,
            63 => Read,
            64 => Write,
            72 => Pselect6,
            93 => Exit,
            118 => SchedSetparam,
            119 => SchedSetscheduler,
            120 => SchedGetscheduler,
            121 => SchedGetparam,
            122 => SchedSetaffinity,
            123 => SchedGetaffinity,
            124 => SchedYield,
            129 => Kill,
            131 => Tgkill,
            132 => Sigaltstack,
            134 => RtSigaction,
            137 => RtSigtimedwait,
            140 => Setpriority,
            141 => Getpriority,
            _ => return None,
        })
    }

    /// Kernel name, as used in traces
    pub fn name(&self, arch: Arch) -> &'static str {
        use Sysno::*;
        match self {
            Exit => "exit",
            Read => "read",
            Write => "write",
            Close => "close",
            Openat => "openat",
            Getdents64 => "getdents64",
            Kill => "kill",
            Tgkill => "tgkill",
            Getpriority => "getpriority",
            Setpriority => "setpriority",
            Newselect => "_newselect",
            Pselect6 => "pselect6",
            SchedSetparam => "sched_setparam",
            SchedGetparam => "sched_getparam",
            SchedSetscheduler => "sched_setscheduler",
            SchedGetscheduler => "sched_getscheduler",
            SchedYield => "sched_yield",
            SchedSetaffinity => "sched_setaffinity",
            SchedGetaffinity => "sched_getaffinity",
            RtSigaction => "rt_sigaction",
            RtSigtimedwait => "rt_sigtimedwait",
            Sigaltstack => "sigaltstack",
            Statfs if arch.is_64bit() => "statfs",
            Statfs => "statfs64",
            Mkdirat => "mkdirat",
            Fchownat => "fchownat",
            Fchmodat => "fchmodat",
            Unlinkat => "unlinkat",
            Renameat => "renameat",
            Eventfd2 => "eventfd2",
            Pipe2 => "pipe2",
        }
    }
}

impl fmt::Display for Sysno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name(Arch::Arm64))
    }
}
