/*!
 * statfs Structures
 * Filesystem statistics and their 32/64-bit guest layouts
 */

use crate::core::limits::{
    EXT4_SUPER_MAGIC, STATFS_BLOCK_SIZE, STATFS_NAME_MAX, STATFS_TOTAL_BLOCKS, STATFS_TOTAL_FILES,
};
use crate::guest::Arch;
use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};

/// Size of the packed ARM EABI `struct statfs64`
pub const STATFS64_ARM32_SIZE: usize = 84;

/// Size of the arm64 `struct statfs`
pub const STATFS_ARM64_SIZE: usize = 120;

/// Filesystem statistics filled in by a file object
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatFs {
    pub f_type: u64,
    pub f_bsize: u64,
    pub f_blocks: u64,
    pub f_bfree: u64,
    pub f_bavail: u64,
    pub f_files: u64,
    pub f_ffree: u64,
    pub f_fsid: [i32; 2],
    pub f_namelen: u64,
    pub f_frsize: u64,
    pub f_flags: u64,
    pub f_spare: [u64; 4],
}

impl StatFs {
    /// Statistics of an ext4-like volume with `used_blocks` in use
    pub fn ext4(used_blocks: u64) -> Self {
        let free = STATFS_TOTAL_BLOCKS.saturating_sub(used_blocks);
        Self {
            f_type: EXT4_SUPER_MAGIC,
            f_bsize: STATFS_BLOCK_SIZE,
            f_blocks: STATFS_TOTAL_BLOCKS,
            f_bfree: free,
            f_bavail: free,
            f_files: STATFS_TOTAL_FILES,
            f_ffree: STATFS_TOTAL_FILES / 2,
            f_fsid: [0, 0],
            f_namelen: STATFS_NAME_MAX,
            f_frsize: STATFS_BLOCK_SIZE,
            f_flags: 0,
            f_spare: [0; 4],
        }
    }

    /// Guest layout size for `arch`
    pub const fn encoded_len(arch: Arch) -> usize {
        match arch {
            Arch::Arm32 => STATFS64_ARM32_SIZE,
            Arch::Arm64 => STATFS_ARM64_SIZE,
        }
    }

    /// Serialize into the layout the guest's word size expects
    pub fn encode(&self, arch: Arch) -> BytesMut {
        let mut buf = BytesMut::with_capacity(Self::encoded_len(arch));
        match arch {
            Arch::Arm32 => {
                // statfs64 is packed to 4-byte alignment on EABI
                buf.put_u32_le(self.f_type as u32);
                buf.put_u32_le(self.f_bsize as u32);
                buf.put_u64_le(self.f_blocks);
                buf.put_u64_le(self.f_bfree);
                buf.put_u64_le(self.f_bavail);
                buf.put_u64_le(self.f_files);
                buf.put_u64_le(self.f_ffree);
                buf.put_i32_le(self.f_fsid[0]);
                buf.put_i32_le(self.f_fsid[1]);
                buf.put_u32_le(self.f_namelen as u32);
                buf.put_u32_le(self.f_frsize as u32);
                buf.put_u32_le(self.f_flags as u32);
                for spare in self.f_spare {
                    buf.put_u32_le(spare as u32);
                }
            }
            Arch::Arm64 => {
                buf.put_u64_le(self.f_type);
                buf.put_u64_le(self.f_bsize);
                buf.put_u64_le(self.f_blocks);
                buf.put_u64_le(self.f_bfree);
                buf.put_u64_le(self.f_bavail);
                buf.put_u64_le(self.f_files);
                buf.put_u64_le(self.f_ffree);
                buf.put_i32_le(self.f_fsid[0]);
                buf.put_i32_le(self.f_fsid[1]);
                buf.put_u64_le(self.f_namelen);
                buf.put_u64_le(self.f_frsize);
                buf.put_u64_le(self.f_flags);
                for spare in self.f_spare {
                    buf.put_u64_le(spare);
                }
            }
        }
        buf
    }
}
