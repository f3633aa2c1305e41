/*!
 * Path Syscall Tests
 * mkdirat, renameat, unlinkat, statfs, openat and the synthetic /proc views
 */

use crate::harness::{int, Harness, PID};
use guest_kernel::core::limits::AT_FDCWD;
use guest_kernel::fd::FileIO;
use guest_kernel::guest::Arch;
use guest_kernel::syscalls::Sysno;
use guest_kernel::vfs::{FileResult, FileSystem, MemFS, OpenFlags};
use guest_kernel::Errno;
use mockall::mock;
use pretty_assertions::assert_eq;
use std::sync::Arc;

mock! {
    pub Fs {}

    impl FileSystem for Fs {
        fn resolve(&self, path: &str, flags: OpenFlags) -> FileResult;
        fn mkdir(&self, path: &str, mode: u32) -> bool;
        fn rename(&self, old_path: &str, new_path: &str) -> i32;
        fn unlink(&self, path: &str);
        fn name(&self) -> &'static str;
    }
}

fn mocked(arch: Arch, mut fs: MockFs) -> Harness {
    fs.expect_name().return_const("mock");
    Harness::with_filesystem(arch, Arc::new(fs), MemFS::new())
}

/// (d_type, name) of every linux_dirent64 record in `raw`
fn dirents(raw: &[u8]) -> Vec<(u8, String)> {
    let mut entries = Vec::new();
    let mut offset = 0;
    while offset < raw.len() {
        let reclen = u16::from_le_bytes([raw[offset + 16], raw[offset + 17]]) as usize;
        let d_type = raw[offset + 18];
        let name = &raw[offset + 19..offset + reclen];
        let end = name.iter().position(|b| *b == 0).unwrap();
        entries.push((d_type, String::from_utf8(name[..end].to_vec()).unwrap()));
        offset += reclen;
    }
    entries
}

#[test]
fn test_mkdirat_cwd() {
    let mut h = Harness::new(Arch::Arm64);
    let path = h.string("/data");
    assert_eq!(h.completed(Sysno::Mkdirat, &[int(AT_FDCWD), path, 0o755]), 0);
    assert!(h.fs.is_dir("/data"));

    // Second attempt fails the way the guest sees it
    assert_eq!(h.completed(Sysno::Mkdirat, &[int(AT_FDCWD), path, 0o755]), -1);
    assert_eq!(h.guest.errno(), Some(Errno::EACCES));
}

#[test]
fn test_mkdirat_backend_failure_is_eacces() {
    let mut fs = MockFs::new();
    fs.expect_mkdir()
        .withf(|path: &str, mode: &u32| path == "/ro/dir" && *mode == 0o700)
        .times(1)
        .return_const(false);
    let mut h = mocked(Arch::Arm32, fs);
    let path = h.string("/ro/dir");
    assert_eq!(h.completed(Sysno::Mkdirat, &[int(AT_FDCWD), path, 0o700]), -1);
    assert_eq!(h.guest.errno(), Some(Errno::EACCES));
}

#[test]
fn test_mkdirat_other_base_is_fatal() {
    let mut h = Harness::new(Arch::Arm32);
    let path = h.string("sub");
    let err = h.call(Sysno::Mkdirat, &[3, path, 0o755]).unwrap_err();
    assert!(err.is_unsupported());
    assert!(!h.fs.exists("/sub"));
}

#[test]
fn test_renameat_always_returns_zero() {
    let mut fs = MockFs::new();
    fs.expect_rename()
        .withf(|old: &str, new: &str| old == "/a" && new == "/b")
        .times(1)
        .return_const(-Errno::ENOENT.code());
    let mut h = mocked(Arch::Arm64, fs);
    let old = h.string("/a");
    let new = h.string("/b");
    assert_eq!(
        h.completed(Sysno::Renameat, &[int(AT_FDCWD), old, int(AT_FDCWD), new]),
        0
    );
    assert_eq!(h.guest.errno(), None);
}

#[test]
fn test_renameat_moves_file() {
    let mut h = Harness::new(Arch::Arm64);
    h.fs.write_file("/old.txt", b"payload").unwrap();
    let old = h.string("/old.txt");
    let new = h.string("/new.txt");
    assert_eq!(
        h.completed(Sysno::Renameat, &[int(AT_FDCWD), old, int(AT_FDCWD), new]),
        0
    );
    assert_eq!(h.fs.read_file("/new.txt").unwrap(), b"payload");
}

#[test]
fn test_unlinkat_forwards_path() {
    let mut fs = MockFs::new();
    fs.expect_unlink()
        .withf(|path: &str| path == "/tmp/lock")
        .times(1)
        .return_const(());
    let mut h = mocked(Arch::Arm64, fs);
    let path = h.string("/tmp/lock");
    assert_eq!(h.completed(Sysno::Unlinkat, &[int(AT_FDCWD), path, 0]), 0);
}

#[test]
fn test_chmod_chown_are_acknowledged() {
    let mut h = Harness::new(Arch::Arm32);
    h.fs.write_file("/f", b"").unwrap();
    let path = h.string("/f");
    assert_eq!(h.completed(Sysno::Fchmodat, &[int(AT_FDCWD), path, 0o777, 0]), 0);
    assert_eq!(h.completed(Sysno::Fchownat, &[int(AT_FDCWD), path, 1000, 1000, 0]), 0);
    assert_eq!(h.guest.errno(), None);
}

#[test]
fn test_statfs64_arm32_layout() {
    let mut h = Harness::new(Arch::Arm32);
    h.fs.write_file("/data.bin", &[0u8; 5000]).unwrap();
    let path = h.string("/data.bin");
    let buf = h.buffer(84);
    assert_eq!(h.completed(Sysno::Statfs, &[path, 84, buf]), 0);

    let raw = h.read(buf, 84);
    let u32_at = |o: usize| u32::from_le_bytes(raw[o..o + 4].try_into().unwrap());
    let u64_at = |o: usize| u64::from_le_bytes(raw[o..o + 8].try_into().unwrap());
    assert_eq!(u32_at(0), 0xEF53);
    assert_eq!(u32_at(4), 4096);
    assert_eq!(u64_at(8), 0x40000);
    assert_eq!(u64_at(16), 0x40000 - 2);
    assert_eq!(u32_at(56), 255);
    assert_eq!(u32_at(60), 4096);
}

#[test]
fn test_statfs_arm64_layout() {
    let mut h = Harness::new(Arch::Arm64);
    h.fs.create_dir_all("/sdcard").unwrap();
    let path = h.string("/sdcard");
    let buf = h.buffer(120);
    assert_eq!(h.completed(Sysno::Statfs, &[path, buf]), 0);

    let raw = h.read(buf, 120);
    let u64_at = |o: usize| u64::from_le_bytes(raw[o..o + 8].try_into().unwrap());
    assert_eq!(u64_at(0), 0xEF53);
    assert_eq!(u64_at(8), 4096);
    assert_eq!(u64_at(16), 0x40000);
    assert_eq!(u64_at(64), 255);
}

#[test]
fn test_statfs_missing_path() {
    let mut h = Harness::new(Arch::Arm64);
    let path = h.string("/nowhere");
    let buf = h.buffer(120);
    assert_eq!(h.completed(Sysno::Statfs, &[path, buf]), -1);
    assert_eq!(h.guest.errno(), Some(Errno::ENOENT));
    assert_eq!(h.read(buf, 120), vec![0u8; 120]);
}

#[test]
fn test_statfs_backend_error() {
    let mut fs = MockFs::new();
    fs.expect_resolve()
        .returning(|_, _| FileResult::Failed(Errno::EACCES));
    let mut h = mocked(Arch::Arm64, fs);
    let path = h.string("/secret");
    let buf = h.buffer(120);
    assert_eq!(h.completed(Sysno::Statfs, &[path, buf]), -1);
    assert_eq!(h.guest.errno(), Some(Errno::EACCES));
}

#[test]
fn test_proc_fd_directory() {
    let mut h = Harness::new(Arch::Arm64);
    let pipefd = h.buffer(8);
    assert_eq!(h.completed(Sysno::Pipe2, &[pipefd, 0]), 0);

    let path = h.string("/proc/self/fd/");
    let fd = h.completed(Sysno::Openat, &[int(AT_FDCWD), path, 0, 0]);
    assert_eq!(fd, 5);

    let dirp = h.buffer(512);
    let n = h.completed(Sysno::Getdents64, &[fd as u64, dirp, 512]);
    let entries = dirents(&h.read(dirp, n as usize));
    let names: Vec<_> = entries.iter().map(|(_, name)| name.as_str()).collect();
    // Snapshot taken before the directory's own descriptor was installed
    assert_eq!(names, vec!["0", "1", "2", "3", "4"]);
    assert!(entries.iter().all(|(d_type, _)| *d_type == 10));

    assert_eq!(h.completed(Sysno::Getdents64, &[fd as u64, dirp, 512]), 0);
}

#[test]
fn test_proc_task_directory() {
    let mut h = Harness::new(Arch::Arm32);
    let path = h.string(&format!("/proc/{}/task", PID));
    let fd = h.completed(Sysno::Openat, &[int(AT_FDCWD), path, 0, 0]);
    assert_eq!(fd, 3);

    let dirp = h.buffer(256);
    let n = h.completed(Sysno::Getdents64, &[fd as u64, dirp, 256]);
    assert_eq!(dirents(&h.read(dirp, n as usize)), vec![(4, PID.to_string())]);
}

#[test]
fn test_openat_regular_file() {
    let mut h = Harness::new(Arch::Arm64);
    h.fs.create_dir_all("/etc").unwrap();
    h.fs.write_file("/etc/hosts", b"127.0.0.1 localhost").unwrap();

    let path = h.string("/etc/hosts");
    let fd = h.completed(Sysno::Openat, &[int(AT_FDCWD), path, 0, 0]);
    let buf = h.buffer(64);
    assert_eq!(h.completed(Sysno::Read, &[fd as u64, buf, 64]), 19);
    assert_eq!(h.read(buf, 9), b"127.0.0.1");
}

#[test]
fn test_openat_missing_file() {
    let mut h = Harness::new(Arch::Arm64);
    let path = h.string("/missing");
    assert_eq!(h.completed(Sysno::Openat, &[int(AT_FDCWD), path, 0, 0]), -1);
    assert_eq!(h.guest.errno(), Some(Errno::ENOENT));
}

#[test]
fn test_openat_dirfd_rules() {
    let mut h = Harness::new(Arch::Arm64);
    h.fs.write_file("/abs", b"").unwrap();
    let relative = h.string("rel");
    assert!(h
        .call(Sysno::Openat, &[3, relative, 0, 0])
        .unwrap_err()
        .is_unsupported());

    // An absolute path ignores dirfd
    let absolute = h.string("/abs");
    assert_eq!(h.completed(Sysno::Openat, &[3, absolute, 0, 0]), 3);
}

#[test]
fn test_getdents64_errors() {
    let mut h = Harness::new(Arch::Arm64);
    let dirp = h.buffer(64);
    // stdout is not a directory
    assert_eq!(h.completed(Sysno::Getdents64, &[1, dirp, 64]), -1);
    assert_eq!(h.guest.errno(), Some(Errno::ENOTDIR));

    let path = h.string("/proc/self/fd");
    let fd = h.completed(Sysno::Openat, &[int(AT_FDCWD), path, 0, 0]);
    assert_eq!(h.completed(Sysno::Getdents64, &[fd as u64, dirp, 8]), -1);
    assert_eq!(h.guest.errno(), Some(Errno::EINVAL));

    assert_eq!(h.completed(Sysno::Getdents64, &[77, dirp, 64]), -1);
    assert_eq!(h.guest.errno(), Some(Errno::EBADF));
}

#[test]
fn test_resolve_prefers_proc_views() {
    let h = Harness::new(Arch::Arm64);
    h.fs.create_dir_all("/proc/self/fd").unwrap();
    let FileResult::Found(dir) = h.handler.resolve("/proc/self/fd", 0) else {
        panic!("fd view not resolved");
    };
    // The synthetic view lists descriptors, not the MemFS directory
    assert_eq!(dir.dir_entries().map(|e| e.len()), Some(3));
    assert!(matches!(
        h.handler.resolve("/proc/self/maps", 0),
        FileResult::NotFound
    ));
}
