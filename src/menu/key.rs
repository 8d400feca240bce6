// Key decoding for the interactive menus.
// Raw input arrives as 1-3 bytes per read: plain keys are a single byte,
// arrow keys are an ANSI escape sequence (ESC '[' followed by the
// direction byte). Decoding is a pure function over whatever one read
// produced, so the tables live in `match` arms rather than mutable state.

use std::fs::File;
use std::io::Read;

use anyhow::{Context, Result};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

/// One decoded key event. Everything the menus do not react to collapses
/// into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Escape,
    Space,
    Other,
}

const ESC: u8 = 0x1b;

/// Decode the bytes of a single raw-mode read into a [`Key`].
///
/// Arrow keys arrive as the full 3-byte sequence in one read; a lone ESC
/// byte means the Escape key itself was pressed. Enter is CR in raw mode,
/// but LF is accepted too for terminals that deliver it.
pub fn decode(bytes: &[u8]) -> Key {
    match bytes {
        [ESC, b'[', b'A'] => Key::Up,
        [ESC, b'[', b'B'] => Key::Down,
        [ESC] => Key::Escape,
        [b'\r'] | [b'\n'] => Key::Enter,
        [b' '] => Key::Space,
        _ => Key::Other,
    }
}

/// Source of key events for a menu interaction loop. The menus only ever
/// have one outstanding `read_key` call; implementations block until a key
/// arrives. Tests supply a scripted source.
pub trait KeySource {
    fn read_key(&mut self) -> Result<Key>;
}

/// Key source reading the controlling terminal.
///
/// Raw mode is entered immediately before each read and left immediately
/// after it, whatever the read returned, so the terminal is back in cooked
/// mode between keystrokes and interleaved writes behave normally.
pub struct Tty {
    device: File,
}

impl Tty {
    /// Open the terminal device. Failing here means there is no interactive
    /// terminal to run on, which is fatal to the caller.
    pub fn open() -> Result<Self> {
        let device = File::open("/dev/tty").context("failed to open terminal device")?;
        Ok(Self { device })
    }
}

impl KeySource for Tty {
    fn read_key(&mut self) -> Result<Key> {
        enable_raw_mode().context("failed to enable terminal raw mode")?;
        let mut buf = [0u8; 3];
        let read = self.device.read(&mut buf);
        disable_raw_mode().context("failed to restore terminal mode")?;

        let n = read.context("failed to read key from terminal")?;
        Ok(decode(&buf[..n]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_arrow_sequences() {
        assert_eq!(decode(&[0x1b, b'[', b'A']), Key::Up);
        assert_eq!(decode(&[0x1b, b'[', b'B']), Key::Down);
    }

    #[test]
    fn decodes_plain_keys() {
        assert_eq!(decode(&[b'\r']), Key::Enter);
        assert_eq!(decode(&[b'\n']), Key::Enter);
        assert_eq!(decode(&[0x1b]), Key::Escape);
        assert_eq!(decode(&[b' ']), Key::Space);
    }

    #[test]
    fn unknown_bytes_are_other() {
        assert_eq!(decode(&[b'q']), Key::Other);
        assert_eq!(decode(&[0]), Key::Other);
        // right arrow: recognized prefix, unrecognized direction
        assert_eq!(decode(&[0x1b, b'[', b'C']), Key::Other);
        assert_eq!(decode(&[0x1b, b'O', b'A']), Key::Other);
        assert_eq!(decode(&[]), Key::Other);
    }
}
