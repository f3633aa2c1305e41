/*!
 * Simulated Guest
 * Flat in-memory emulator used by tests and host-side tooling
 */

use super::traits::{Backend, Emulator, GuestMemory, RegisterContext};
use super::types::{Arch, MemoryError, MemoryResult};
use crate::core::types::Address;
use crate::core::Errno;

/// Default base of the simulated address space
pub const DEFAULT_BASE: Address = 0x1000_0000;

/// Default size of the simulated address space (1MB)
pub const DEFAULT_MEMORY_SIZE: usize = 1024 * 1024;

const MAX_ARGS: usize = 8;

/// A single contiguous mapping plus a register file of syscall arguments
#[derive(Debug, Clone)]
pub struct SimulatedGuest {
    arch: Arch,
    base: Address,
    memory: Vec<u8>,
    next_free: Address,
    args: [u64; MAX_ARGS],
    lr: Address,
    errno: Option<Errno>,
    stopped: bool,
}

impl SimulatedGuest {
    pub fn new(arch: Arch) -> Self {
        Self::with_memory(arch, DEFAULT_BASE, DEFAULT_MEMORY_SIZE)
    }

    pub fn with_memory(arch: Arch, base: Address, size: usize) -> Self {
        Self {
            arch,
            base,
            memory: vec![0; size],
            next_free: base,
            args: [0; MAX_ARGS],
            lr: 0,
            errno: None,
            stopped: false,
        }
    }

    /// Load the argument registers for the next call (remaining ones are zeroed)
    pub fn set_args(&mut self, args: &[u64]) {
        self.args = [0; MAX_ARGS];
        for (slot, value) in self.args.iter_mut().zip(args) {
            *slot = *value;
        }
    }

    pub fn set_lr(&mut self, lr: Address) {
        self.lr = lr;
    }

    /// Bump-allocate `len` zeroed bytes, 8-byte aligned
    pub fn alloc(&mut self, len: usize) -> Address {
        let addr = self.next_free;
        let aligned = (len as u64 + 7) & !7;
        self.next_free += aligned.max(8);
        addr
    }

    /// Allocate and fill a buffer
    pub fn alloc_bytes(&mut self, data: &[u8]) -> Address {
        let addr = self.alloc(data.len());
        let start = (addr - self.base) as usize;
        self.memory[start..start + data.len()].copy_from_slice(data);
        addr
    }

    /// Allocate a NUL-terminated string
    pub fn alloc_c_string(&mut self, s: &str) -> Address {
        let mut raw = s.as_bytes().to_vec();
        raw.push(0);
        self.alloc_bytes(&raw)
    }

    /// Last errno stored by a handler
    pub fn errno(&self) -> Option<Errno> {
        self.errno
    }

    pub fn clear_errno(&mut self) {
        self.errno = None;
    }

    /// Whether a handler stopped the run loop
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    fn range(&self, addr: Address, len: usize) -> MemoryResult<std::ops::Range<usize>> {
        let end = self.base + self.memory.len() as u64;
        if addr < self.base || addr.saturating_add(len as u64) > end {
            return Err(MemoryError::Unmapped { addr, len });
        }
        let start = (addr - self.base) as usize;
        Ok(start..start + len)
    }
}

impl RegisterContext for SimulatedGuest {
    fn arg(&self, index: usize) -> u64 {
        self.args.get(index).copied().unwrap_or(0)
    }

    fn lr(&self) -> Address {
        self.lr
    }
}

impl GuestMemory for SimulatedGuest {
    fn read_bytes(&self, addr: Address, len: usize) -> MemoryResult<Vec<u8>> {
        let range = self.range(addr, len)?;
        Ok(self.memory[range].to_vec())
    }

    fn write_bytes(&mut self, addr: Address, data: &[u8]) -> MemoryResult<()> {
        let range = self.range(addr, data.len())?;
        self.memory[range].copy_from_slice(data);
        Ok(())
    }

    fn set_errno(&mut self, errno: Errno) {
        self.errno = Some(errno);
    }
}

impl Backend for SimulatedGuest {
    fn emu_stop(&mut self) {
        self.stopped = true;
    }
}

impl Emulator for SimulatedGuest {
    fn arch(&self) -> Arch {
        self.arch
    }
}
