//! Explicit handle over an interactive terminal.
//!
//! A `Console` pairs an input descriptor with the writer used as its display
//! and owns the one piece of state the two primitives share: whether the
//! input has been switched out of canonical mode for polling.
//!
//! # Example
//! ```rust
//! let mut console = Console::stdio(Config::default())?;
//! loop {
//!     if let Some(byte) = console.try_read_char()? {
//!         if byte == b'q' { break; }
//!     }
//! }
//! ```
//!
//! The terminal attributes are process-wide. Two consoles on the same device
//! are not coordinated with each other.

use std::io::{self, Stdout, Write};
use std::os::unix::io::RawFd;

use termios::Termios;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Result, Stage, TermError};
use crate::input::char_reader;
use crate::input::pending::{self, make_unbuffered};
use crate::terminal::{is_terminal, set_attrs};

pub struct Console<W: Write = Stdout> {
    fd: RawFd,
    out: W,
    config: Config,
    /// Attributes found by `init()`, present while polling mode is on.
    baseline: Option<Termios>,
}

impl Console<Stdout> {
    /// Console over standard input, displaying on standard output.
    pub fn stdio(config: Config) -> Result<Self> {
        Self::open(libc::STDIN_FILENO, io::stdout(), config)
    }
}

impl<W: Write> Console<W> {
    /// Wraps `fd` and `out`. Fails with [`TermError::NotATerminal`] when `fd`
    /// is redirected from a file or pipe.
    pub fn open(fd: RawFd, out: W, config: Config) -> Result<Self> {
        if !is_terminal(fd) {
            return Err(TermError::NotATerminal(fd));
        }
        debug!(fd, ?config, "console opened");
        Ok(Self {
            fd,
            out,
            config,
            baseline: None,
        })
    }

    /// The display writer, e.g. for printing a prompt before a read.
    pub fn output(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn is_initialized(&self) -> bool {
        self.baseline.is_some()
    }

    /// Switches the input out of canonical mode so typed bytes can be counted
    /// before Enter is pressed. Runs once; later calls do nothing.
    pub fn init(&mut self) -> Result<()> {
        if self.baseline.is_some() {
            return Ok(());
        }
        self.baseline = Some(make_unbuffered(self.fd)?);
        info!(fd = self.fd, "console initialized for polling");
        Ok(())
    }

    /// Puts back the attributes found by `init()`. No-op if not initialized.
    pub fn release(&mut self) -> Result<()> {
        if let Some(baseline) = self.baseline.take() {
            set_attrs(
                self.fd,
                self.config.restore_action(),
                &baseline,
                Stage::Leave,
            )?;
            info!(fd = self.fd, "console released");
        }
        Ok(())
    }

    /// Number of bytes readable right now, without consuming them.
    ///
    /// With `unbuffered_input` set, the first call runs [`Console::init`].
    pub fn pending_input_count(&mut self) -> Result<usize> {
        if self.config.unbuffered_input {
            self.init()?;
        }
        pending::pending_input_count(self.fd)
    }

    /// Blocks until one byte is typed and returns it.
    pub fn read_one_char(&mut self) -> Result<u8> {
        char_reader::read_one_char(self.fd, &mut self.out, &self.config)
    }

    /// Reads one byte if any is waiting, otherwise returns `None` at once.
    pub fn try_read_char(&mut self) -> Result<Option<u8>> {
        if self.pending_input_count()? == 0 {
            return Ok(None);
        }
        self.read_one_char().map(Some)
    }
}

impl<W: Write> Drop for Console<W> {
    fn drop(&mut self) {
        if self.config.restore_on_drop {
            let _ = self.release();
        }
    }
}

// ==================== TESTS =======================
