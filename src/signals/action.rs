/*!
 * Signal Action Layout
 * Bit-exact `struct sigaction` as the guest kernel ABI lays it out
 *
 * arm32 (20 bytes): handler@0 flags@4 restorer@8 mask(u64)@12
 * arm64 (32 bytes): handler@0 flags@8 restorer@16 mask@24
 */

use super::types::{SA_RESTORER, SA_SIGINFO, SIG_DFL, SIG_IGN};
use crate::core::types::Address;
use crate::guest::{Arch, GuestMemory, MemoryResult};
use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};

pub const SIGACTION_ARM32_SIZE: usize = 20;
pub const SIGACTION_ARM64_SIZE: usize = 32;

/// Guest signal disposition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SigAction {
    pub handler: u64,
    pub flags: u64,
    pub restorer: u64,
    pub mask: u64,
}

impl SigAction {
    pub fn new(handler: u64, flags: u64) -> Self {
        Self {
            handler,
            flags,
            ..Default::default()
        }
    }

    #[inline]
    pub const fn size(arch: Arch) -> usize {
        match arch {
            Arch::Arm32 => SIGACTION_ARM32_SIZE,
            Arch::Arm64 => SIGACTION_ARM64_SIZE,
        }
    }

    const fn offsets(arch: Arch) -> (u64, u64, u64, u64) {
        match arch {
            Arch::Arm32 => (0, 4, 8, 12),
            Arch::Arm64 => (0, 8, 16, 24),
        }
    }

    /// Decode a sigaction from guest memory
    pub fn read<M: GuestMemory + ?Sized>(mem: &M, arch: Arch, addr: Address) -> MemoryResult<Self> {
        let (handler, flags, restorer, mask) = Self::offsets(arch);
        Ok(Self {
            handler: mem.read_word(arch, addr + handler)?,
            flags: mem.read_word(arch, addr + flags)?,
            restorer: mem.read_word(arch, addr + restorer)?,
            mask: mem.read_u64(addr + mask)?,
        })
    }

    /// Store into guest memory
    pub fn write<M: GuestMemory + ?Sized>(&self, mem: &mut M, arch: Arch, addr: Address) -> MemoryResult<()> {
        mem.write_bytes(addr, &self.encode(arch))
    }

    /// Overwrite only the handler word at `addr`
    pub fn write_handler<M: GuestMemory + ?Sized>(
        mem: &mut M,
        arch: Arch,
        addr: Address,
        handler: u64,
    ) -> MemoryResult<()> {
        mem.write_word(arch, addr, handler)
    }

    /// Zero the whole structure at `addr`
    pub fn clear<M: GuestMemory + ?Sized>(mem: &mut M, arch: Arch, addr: Address) -> MemoryResult<()> {
        mem.write_bytes(addr, &vec![0u8; Self::size(arch)])
    }

    /// Serialise in the guest layout
    pub fn encode(&self, arch: Arch) -> BytesMut {
        let mut buf = BytesMut::with_capacity(Self::size(arch));
        match arch {
            Arch::Arm32 => {
                buf.put_u32_le(self.handler as u32);
                buf.put_u32_le(self.flags as u32);
                buf.put_u32_le(self.restorer as u32);
                buf.put_u64_le(self.mask);
            }
            Arch::Arm64 => {
                buf.put_u64_le(self.handler);
                buf.put_u64_le(self.flags);
                buf.put_u64_le(self.restorer);
                buf.put_u64_le(self.mask);
            }
        }
        buf
    }

    #[inline]
    pub fn is_default(&self) -> bool {
        self.handler == SIG_DFL
    }

    #[inline]
    pub fn is_ignore(&self) -> bool {
        self.handler == SIG_IGN
    }

    #[inline]
    pub fn has_siginfo(&self) -> bool {
        self.flags & SA_SIGINFO != 0
    }

    /// Sigreturn trampoline, when the guest supplied one
    pub fn restorer(&self) -> Option<Address> {
        (self.flags & SA_RESTORER != 0 && self.restorer != 0).then_some(self.restorer)
    }
}
