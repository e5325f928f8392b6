use std::io::Write;

use crate::error::{Result, TermError};

/// EchoRenderer: handles the display side of a read
///
pub struct EchoRenderer;

impl EchoRenderer {
    /// Flushes pending output so a prompt is visible before the read blocks.
    ///
    pub fn flush<W: Write>(out: &mut W) -> Result<()> {
        out.flush().map_err(TermError::Echo)
    }

    /// Writes the byte that was read followed by a newline.
    ///
    /// - The byte is written as-is, no UTF-8 decoding.
    /// - Flushes so the echo is visible immediately.
    ///
    pub fn echo<W: Write>(out: &mut W, byte: u8) -> Result<()> {
        out.write_all(&[byte, b'\n']).map_err(TermError::Echo)?;
        out.flush().map_err(TermError::Echo)
    }
}

// ==================== TESTS =======================
