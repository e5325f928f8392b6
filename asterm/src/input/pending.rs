//! Non-blocking "is input waiting" query.

use std::os::unix::io::RawFd;

use termios::Termios;
use tracing::{debug, trace, warn};

use crate::error::{Result, Stage, TermError};
use crate::terminal::{get_attrs, set_attrs, LineMode};

/// Returns how many bytes can be read from `fd` right now without blocking.
///
/// The bytes are not consumed. In canonical mode the driver only counts
/// completed lines, see [`make_unbuffered`].
pub fn pending_input_count(fd: RawFd) -> Result<usize> {
    let mut count: libc::c_int = 0;
    let rc = unsafe { libc::ioctl(fd, libc::FIONREAD, &mut count as *mut libc::c_int) };
    if rc == -1 {
        let e = std::io::Error::last_os_error();
        warn!(fd, error = %e, "ioctl(FIONREAD) failed");
        return Err(TermError::PendingQuery(e));
    }
    trace!(fd, count, "pending input");
    Ok(usize::try_from(count).unwrap_or(0))
}

/// Turns canonical mode off on `fd` and leaves it off.
///
/// Returns the attributes found before the change so the caller can put them
/// back later.
pub fn make_unbuffered(fd: RawFd) -> Result<Termios> {
    let original = get_attrs(fd)?;
    let mut attrs = original;
    LineMode::unbuffered().apply_to(&mut attrs);
    set_attrs(fd, termios::TCSANOW, &attrs, Stage::Enter)?;
    debug!(fd, "canonical mode disabled for polling");
    Ok(original)
}

// ==================== TESTS =======================
