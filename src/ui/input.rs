//! Line-based input for the human Explorer.
//!
//! Reading blocks until a full line arrives; there is no timeout.
//! `None` means the input stream is closed.

#[cfg(test)]
use std::collections::VecDeque;
use std::io::{self, BufRead};

use log::trace;

use crate::logutil::escape_log;

pub trait LineSource {
    /// Next raw line without its line terminator, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// Reads lines from any buffered reader (stdin in the real game).
pub struct StdinSource<R: BufRead> {
    reader: R,
}

impl<R: BufRead> StdinSource<R> {
    pub fn new(reader: R) -> Self {
        StdinSource { reader }
    }
}

impl<R: BufRead> LineSource for StdinSource<R> {
    /// Invalid UTF-8 is replaced with U+FFFD, not rejected.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let text = String::from_utf8_lossy(&buf);
        let line = text.trim_end_matches(['\n', '\r']).to_string();
        trace!("input line: {}", escape_log(&line));
        Ok(Some(line))
    }
}

/// Fixed script of lines, for replaying games in tests.
#[cfg(test)]
pub struct ScriptedLines {
    lines: VecDeque<String>,
}

#[cfg(test)]
impl ScriptedLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedLines { lines: lines.into_iter().map(Into::into).collect() }
    }
}

#[cfg(test)]
impl LineSource for ScriptedLines {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn strips_terminators_and_reports_eof() {
        let mut src = StdinSource::new(Cursor::new("move n\r\nLOOK\n\nquit"));
        assert_eq!(src.read_line().unwrap().as_deref(), Some("move n"));
        assert_eq!(src.read_line().unwrap().as_deref(), Some("LOOK"));
        assert_eq!(src.read_line().unwrap().as_deref(), Some(""));
        assert_eq!(src.read_line().unwrap().as_deref(), Some("quit"));
        assert_eq!(src.read_line().unwrap(), None);
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let mut src = StdinSource::new(Cursor::new(&b"caf\xe9\r\nLOOK\n"[..]));
        assert_eq!(src.read_line().unwrap().as_deref(), Some("caf\u{FFFD}"));
        assert_eq!(src.read_line().unwrap().as_deref(), Some("LOOK"));
        assert_eq!(src.read_line().unwrap(), None);
    }

    #[test]
    fn scripted_lines_drain_in_order() {
        let mut src = ScriptedLines::new(["a", "b"]);
        assert_eq!(src.read_line().unwrap().as_deref(), Some("a"));
        assert_eq!(src.read_line().unwrap().as_deref(), Some("b"));
        assert_eq!(src.read_line().unwrap(), None);
    }
}
