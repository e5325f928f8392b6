//! Scoped terminal line-discipline changes.
//!
//! This module defines the `RawMode` struct, a session object representing
//! "this terminal is in raw mode". Entering it snapshots the current
//! attributes and applies a [`LineMode`]; leaving it (explicitly through
//! [`RawMode::restore`] or implicitly on drop) puts the snapshot back, so the
//! terminal is restored on every exit path.
//!
//! Attributes are read and written with the `termios` crate.
//!
//! # Example
//! ```rust
//! let raw = RawMode::enter(0, LineMode::raw(), termios::TCSADRAIN)?;
//! // canonical mode and echo are off within this scope
//! raw.restore()?;
//! ```

use std::os::unix::io::RawFd;

use termios::{tcsetattr, Termios, ECHO, ICANON, TCSANOW, VMIN, VTIME};
use tracing::{debug, warn};

use crate::error::{Result, Stage, TermError};

/// Which line-discipline settings a raw-mode session changes.
///
/// Flags set to `true` are cleared on entry; `None` leaves the matching
/// control character untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMode {
    pub disable_canonical: bool,
    pub disable_echo: bool,
    pub vmin: Option<u8>,
    pub vtime: Option<u8>,
}

impl LineMode {
    /// Canonical mode and echo off, reads return after one byte with no timeout.
    pub const fn raw() -> Self {
        Self {
            disable_canonical: true,
            disable_echo: true,
            vmin: Some(1),
            vtime: Some(0),
        }
    }

    /// Only canonical mode off: typed bytes become readable (and countable)
    /// immediately, echo is left as it was.
    pub const fn unbuffered() -> Self {
        Self {
            disable_canonical: true,
            disable_echo: false,
            vmin: None,
            vtime: None,
        }
    }

    /// Applies this mode to a copy of the terminal attributes.
    pub fn apply_to(&self, attrs: &mut Termios) {
        if self.disable_canonical {
            attrs.c_lflag &= !ICANON;
        }
        if self.disable_echo {
            attrs.c_lflag &= !ECHO;
        }
        if let Some(vmin) = self.vmin {
            attrs.c_cc[VMIN] = vmin;
        }
        if let Some(vtime) = self.vtime {
            attrs.c_cc[VTIME] = vtime;
        }
    }
}

/// Returns `true` if `fd` refers to a terminal device.
pub fn is_terminal(fd: RawFd) -> bool {
    unsafe { libc::isatty(fd) == 1 }
}

/// Reads the current attributes of `fd`.
pub fn get_attrs(fd: RawFd) -> Result<Termios> {
    Termios::from_fd(fd).map_err(|e| {
        warn!(fd, error = %e, "tcgetattr() failed");
        TermError::GetAttr(e)
    })
}

/// Applies `attrs` to `fd`; `stage` tags the error if it fails.
pub fn set_attrs(fd: RawFd, action: libc::c_int, attrs: &Termios, stage: Stage) -> Result<()> {
    tcsetattr(fd, action, attrs).map_err(|e| {
        warn!(fd, %stage, error = %e, "tcsetattr() failed");
        TermError::SetAttr { stage, source: e }
    })
}

/// Represents a terminal in raw mode.
/// When dropped, restores the attributes found on entry.
pub struct RawMode {
    fd: RawFd,
    original: Termios,
    restore_action: libc::c_int,
    active: bool,
}

impl RawMode {
    /// Snapshots the attributes of `fd` and applies `mode` immediately.
    ///
    /// `restore_action` is the `tcsetattr()` action used when leaving
    /// (`TCSADRAIN` lets pending output drain first).
    pub fn enter(fd: RawFd, mode: LineMode, restore_action: libc::c_int) -> Result<Self> {
        let original = get_attrs(fd)?;
        let mut raw = original;
        mode.apply_to(&mut raw);
        set_attrs(fd, TCSANOW, &raw, Stage::Enter)?;
        debug!(fd, ?mode, "entered raw mode");

        Ok(RawMode {
            fd,
            original,
            restore_action,
            active: true,
        })
    }

    /// The attributes that will be put back when the session ends.
    pub fn original(&self) -> &Termios {
        &self.original
    }

    /// Ends the session, reporting a failed restore to the caller.
    pub fn restore(mut self) -> Result<()> {
        self.active = false;
        set_attrs(self.fd, self.restore_action, &self.original, Stage::Leave)?;
        debug!(fd = self.fd, "left raw mode");
        Ok(())
    }
}

impl Drop for RawMode {
    /// Restores the original attributes if `restore()` was not called.
    /// Nothing can be returned from here, so a failure is only logged.
    fn drop(&mut self) {
        if self.active
            && set_attrs(self.fd, self.restore_action, &self.original, Stage::Leave).is_ok()
        {
            debug!(fd = self.fd, "left raw mode on drop");
        }
    }
}

// ==================== TESTS =======================
