use std::fmt;
use std::io;

use thiserror::Error;

/// Which side of a raw-mode session a `tcsetattr()` call belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Switching the terminal into raw mode.
    Enter,
    /// Putting the saved attributes back.
    Leave,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Enter => f.write_str("entering raw mode"),
            Stage::Leave => f.write_str("leaving raw mode"),
        }
    }
}

#[derive(Error, Debug)]
pub enum TermError {
    #[error("tcgetattr() failed: {0}")]
    GetAttr(#[source] io::Error),

    #[error("tcsetattr() failed while {stage}: {source}")]
    SetAttr {
        stage: Stage,
        #[source]
        source: io::Error,
    },

    #[error("read() failed: {0}")]
    Read(#[source] io::Error),

    #[error("end of input")]
    EndOfInput,

    #[error("ioctl(FIONREAD) failed: {0}")]
    PendingQuery(#[source] io::Error),

    #[error("file descriptor {0} is not a terminal")]
    NotATerminal(i32),

    #[error("failed to write to the display: {0}")]
    Echo(#[source] io::Error),

    /// A byte was consumed from the terminal, then a later step failed.
    #[error("read byte {byte:#04x}, then {source}")]
    AfterRead {
        byte: u8,
        #[source]
        source: Box<TermError>,
    },
}

pub type Result<T> = std::result::Result<T, TermError>;

impl TermError {
    /// The OS error behind this failure, if there is one.
    pub fn os_error(&self) -> Option<&io::Error> {
        match self {
            TermError::GetAttr(e)
            | TermError::Read(e)
            | TermError::PendingQuery(e)
            | TermError::Echo(e)
            | TermError::SetAttr { source: e, .. } => Some(e),
            TermError::AfterRead { source, .. } => source.os_error(),
            TermError::EndOfInput | TermError::NotATerminal(_) => None,
        }
    }

    /// The byte already taken from the terminal when the failure happened.
    pub fn byte(&self) -> Option<u8> {
        match self {
            TermError::AfterRead { byte, .. } => Some(*byte),
            _ => None,
        }
    }

    pub(crate) fn after_read(self, byte: u8) -> Self {
        TermError::AfterRead {
            byte,
            source: Box::new(self),
        }
    }
}

// ==================== TESTS =======================
