// char_reader.rs - blocking single-byte reader

use std::io::{self, Write};
use std::os::unix::io::RawFd;

use tracing::{trace, warn};

use crate::config::Config;
use crate::error::{Result, TermError};
use crate::input::renderer::EchoRenderer;
use crate::terminal::{LineMode, RawMode};

/// Reads one byte from `fd`, blocking until it arrives.
///
/// Straight `read(2)` on the descriptor: nothing is buffered on the Rust
/// side, so bytes not consumed here stay in the terminal driver.
pub fn read_byte(fd: RawFd) -> Result<u8> {
    let mut byte = 0u8;
    loop {
        let n = unsafe { libc::read(fd, (&mut byte as *mut u8).cast(), 1) };
        match n {
            1 => return Ok(byte),
            0 => {
                warn!(fd, "read() hit end of input");
                return Err(TermError::EndOfInput);
            }
            _ => {
                let e = io::Error::last_os_error();
                if e.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                warn!(fd, error = %e, "read() failed");
                return Err(TermError::Read(e));
            }
        }
    }
}

/// Blocks until one byte is typed on `fd` and returns it.
///
/// - Flushes `out` first so a prompt is visible while waiting.
/// - Canonical mode and echo are off only for the duration of the read; the
///   previous attributes are restored on every path, including errors.
/// - With `config.echo`, the byte and a newline are written to `out`.
/// - Once the byte is consumed, a failed restore or echo comes back as
///   [`TermError::AfterRead`] carrying it.
///
pub fn read_one_char<W: Write>(fd: RawFd, out: &mut W, config: &Config) -> Result<u8> {
    EchoRenderer::flush(out)?;

    let raw = RawMode::enter(fd, LineMode::raw(), config.restore_action())?;
    let byte = read_byte(fd)?;
    raw.restore().map_err(|e| e.after_read(byte))?;
    trace!(fd, byte, "read one char");

    if config.echo {
        EchoRenderer::echo(out, byte).map_err(|e| e.after_read(byte))?;
    }
    Ok(byte)
}

// ==================== TESTS =======================
