/*!
 * Guest Capability Traits
 * What the syscall layer needs from the instruction emulator
 */

use super::types::{Arch, MemoryError, MemoryResult};
use crate::core::types::Address;
use crate::core::Errno;

/// Longest guest C string the layer will read (PATH_MAX)
pub const MAX_GUEST_STRING: usize = 4096;

/// Calling-convention view of the syscall arguments
pub trait RegisterContext {
    /// Raw argument register value
    fn arg(&self, index: usize) -> u64;

    /// Link register of the calling code, for diagnostics
    fn lr(&self) -> Address;

    /// Argument truncated to a C `int`
    fn int_arg(&self, index: usize) -> i32 {
        self.arg(index) as i32
    }

    /// Argument as a guest pointer, `None` when null
    fn pointer_arg(&self, index: usize) -> Option<Address> {
        match self.arg(index) {
            0 => None,
            addr => Some(addr),
        }
    }
}

/// Byte-level access to the emulated address space
pub trait GuestMemory {
    /// Read `len` bytes at `addr`
    fn read_bytes(&self, addr: Address, len: usize) -> MemoryResult<Vec<u8>>;

    /// Write `data` at `addr`
    fn write_bytes(&mut self, addr: Address, data: &[u8]) -> MemoryResult<()>;

    /// Store the thread-local errno the guest libc will read
    fn set_errno(&mut self, errno: Errno);

    /// Read a NUL-terminated UTF-8 string
    fn read_c_string(&self, addr: Address) -> MemoryResult<String> {
        let mut raw = Vec::new();
        for offset in 0..MAX_GUEST_STRING as u64 {
            let byte = self.read_bytes(addr + offset, 1)?[0];
            if byte == 0 {
                return String::from_utf8(raw).map_err(|_| MemoryError::InvalidString { addr });
            }
            raw.push(byte);
        }
        Err(MemoryError::UnterminatedString { addr })
    }

    fn read_i32(&self, addr: Address) -> MemoryResult<i32> {
        let raw = self.read_bytes(addr, 4)?;
        Ok(i32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }

    fn write_i32(&mut self, addr: Address, value: i32) -> MemoryResult<()> {
        self.write_bytes(addr, &value.to_le_bytes())
    }

    fn read_u64(&self, addr: Address) -> MemoryResult<u64> {
        let raw = self.read_bytes(addr, 8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&raw);
        Ok(u64::from_le_bytes(buf))
    }

    fn write_u64(&mut self, addr: Address, value: u64) -> MemoryResult<()> {
        self.write_bytes(addr, &value.to_le_bytes())
    }

    /// Read one guest machine word
    fn read_word(&self, arch: Arch, addr: Address) -> MemoryResult<u64> {
        match arch {
            Arch::Arm32 => self.read_i32(addr).map(|v| u64::from(v as u32)),
            Arch::Arm64 => self.read_u64(addr),
        }
    }

    /// Write one guest machine word, truncated to the word width
    fn write_word(&mut self, arch: Arch, addr: Address, value: u64) -> MemoryResult<()> {
        match arch {
            Arch::Arm32 => self.write_bytes(addr, &(value as u32).to_le_bytes()),
            Arch::Arm64 => self.write_u64(addr, value),
        }
    }
}

/// Control over the instruction-execution backend
pub trait Backend {
    /// Stop the run loop after the current instruction
    fn emu_stop(&mut self);
}

/// Combined capability set handed to every syscall handler
pub trait Emulator: RegisterContext + GuestMemory + Backend {
    /// Guest architecture
    fn arch(&self) -> Arch;
}
