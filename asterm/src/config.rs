//! Caller-selected behaviour for a [`Console`](crate::Console).
//!
//! Every side effect the console performs beyond its core contract is
//! switched here:
//! - `echo`: after a blocking read, write the byte and a newline to the display.
//! - `unbuffered_input`: before the first pending-input query, leave canonical
//!   mode off on the input so bytes are countable as soon as they are typed.
//! - `restore_on_drop`: when the console is dropped, put back the attributes
//!   captured by [`Console::init`](crate::Console::init).
//! - `drain_on_restore`: restore attributes with `TCSADRAIN` instead of `TCSANOW`.
//!
//! With the `serde` feature the struct can be loaded from a config file; any
//! missing key keeps its default.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Config {
    pub echo: bool,
    pub unbuffered_input: bool,
    pub restore_on_drop: bool,
    pub drain_on_restore: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            echo: true,
            unbuffered_input: true,
            restore_on_drop: true,
            drain_on_restore: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn echo(mut self, on: bool) -> Self {
        self.echo = on;
        self
    }

    pub fn unbuffered_input(mut self, on: bool) -> Self {
        self.unbuffered_input = on;
        self
    }

    pub fn restore_on_drop(mut self, on: bool) -> Self {
        self.restore_on_drop = on;
        self
    }

    pub fn drain_on_restore(mut self, on: bool) -> Self {
        self.drain_on_restore = on;
        self
    }

    /// `tcsetattr()` action used when putting saved attributes back.
    pub(crate) fn restore_action(&self) -> libc::c_int {
        if self.drain_on_restore {
            termios::TCSADRAIN
        } else {
            termios::TCSANOW
        }
    }
}

// ==================== TESTS =======================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keeps_classic_behaviour() {
        let cfg = Config::default();
        assert!(cfg.echo);
        assert!(cfg.unbuffered_input);
        assert!(cfg.restore_on_drop);
        assert_eq!(cfg.restore_action(), termios::TCSADRAIN);
    }

    #[test]
    fn test_builder_overrides() {
        let cfg = Config::new().echo(false).drain_on_restore(false);
        assert!(!cfg.echo);
        assert!(cfg.unbuffered_input);
        assert_eq!(cfg.restore_action(), termios::TCSANOW);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_file_keeps_defaults() {
        let cfg: Config = toml::from_str("echo = false\n").unwrap();
        assert_eq!(cfg, Config::default().echo(false));
    }
}
