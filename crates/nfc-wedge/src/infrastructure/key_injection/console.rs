//! Console sink: prints each new UID on its own line instead of typing it.
//!
//! Useful for checking a reader before handing it the keyboard, and for
//! piping UIDs into another program.  The binary sends its log lines to
//! stderr, so stdout carries nothing but UIDs.

use std::io::{self, Write};

use wedge_core::Uid;

use crate::application::emit_uid::{InjectionError, UidSink};

/// A [`UidSink`] writing one UID per line to `W` (stdout by default).
#[derive(Debug)]
pub struct ConsoleSink<W = io::Stdout> {
    out: W,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> UidSink for ConsoleSink<W> {
    fn send(&mut self, uid: &Uid) -> Result<(), InjectionError> {
        writeln!(self.out, "{uid}")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_sink_writes_one_line_per_uid() {
        // Arrange
        let mut sink = ConsoleSink::new(Vec::new());

        // Act
        sink.send(&Uid::from_bytes(&[0x04, 0xA1])).unwrap();
        sink.send(&Uid::from_bytes(&[0xFF])).unwrap();

        // Assert
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "04A1\nFF\n");
    }
}
