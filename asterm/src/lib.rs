#![cfg(unix)]

pub mod config;
pub mod console;
pub mod error;
pub mod input;
pub mod terminal;

#[cfg(test)]
pub(crate) mod pty;

pub use config::Config;
pub use console::Console;
pub use error::{Stage, TermError};
pub use input::char_reader::read_one_char;
pub use input::pending::pending_input_count;
pub use terminal::{is_terminal, LineMode, RawMode};
