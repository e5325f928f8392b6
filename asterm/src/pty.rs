//! Pseudo-terminal pair used by the tests: bytes written to the master side
//! show up as terminal input on the slave side.

use std::ffi::CStr;
use std::fs::File;
use std::io::{self, Write};
use std::os::unix::io::{AsRawFd, FromRawFd, OwnedFd, RawFd};
use std::thread;
use std::time::{Duration, Instant};

pub(crate) struct Pty {
    master: File,
    slave: OwnedFd,
}

fn check(rc: libc::c_int) -> io::Result<libc::c_int> {
    if rc == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(rc)
    }
}

impl Pty {
    pub(crate) fn open() -> io::Result<Self> {
        unsafe {
            let master = check(libc::posix_openpt(libc::O_RDWR | libc::O_NOCTTY))?;
            let master = OwnedFd::from_raw_fd(master);
            check(libc::grantpt(master.as_raw_fd()))?;
            check(libc::unlockpt(master.as_raw_fd()))?;

            let mut name = [0 as libc::c_char; 128];
            #[cfg(target_os = "linux")]
            {
                let rc = libc::ptsname_r(master.as_raw_fd(), name.as_mut_ptr(), name.len());
                if rc != 0 {
                    return Err(io::Error::from_raw_os_error(rc));
                }
            }
            #[cfg(not(target_os = "linux"))]
            {
                let p = libc::ptsname(master.as_raw_fd());
                if p.is_null() {
                    return Err(io::Error::last_os_error());
                }
                libc::strncpy(name.as_mut_ptr(), p, name.len() - 1);
            }

            let path = CStr::from_ptr(name.as_ptr());
            let slave = check(libc::open(path.as_ptr(), libc::O_RDWR | libc::O_NOCTTY))?;

            Ok(Pty {
                master: File::from(master),
                slave: OwnedFd::from_raw_fd(slave),
            })
        }
    }

    pub(crate) fn slave_fd(&self) -> RawFd {
        self.slave.as_raw_fd()
    }

    /// A second handle on the master side, for typing from another thread.
    pub(crate) fn keyboard(&self) -> File {
        self.master.try_clone().expect("clone pty master")
    }

    /// Types `bytes` into the terminal.
    pub(crate) fn feed(&mut self, bytes: &[u8]) {
        self.master.write_all(bytes).expect("write to pty master");
    }

    /// The line discipline moves bytes from master to slave asynchronously;
    /// waits until at least `n` are readable on the slave or a second passes.
    pub(crate) fn wait_pending(&self, n: usize) -> usize {
        let deadline = Instant::now() + Duration::from_secs(1);
        loop {
            let mut count: libc::c_int = 0;
            let rc = unsafe { libc::ioctl(self.slave_fd(), libc::FIONREAD, &mut count) };
            let count = if rc == -1 { 0 } else { count as usize };
            if count >= n || Instant::now() >= deadline {
                return count;
            }
            thread::sleep(Duration::from_millis(5));
        }
    }
}
