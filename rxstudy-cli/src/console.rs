//! Where demo output goes

use std::io::{self, Write};

/// Line-oriented output sink shared by every demo callback
pub trait Console: Send + Sync {
    fn line(&self, line: &str);
}

/// Writes each line to standard output
///
/// Write failures (a closed pipe, for one) are logged and otherwise ignored,
/// so a demo callback never panics on output.
pub struct Stdout;

impl Stdout {
    fn write_line<W: Write>(mut out: W, line: &str) -> io::Result<()> {
        writeln!(out, "{}", line)?;
        out.flush()
    }
}

impl Console for Stdout {
    fn line(&self, line: &str) {
        if let Err(err) = Self::write_line(io::stdout().lock(), line) {
            tracing::debug!(error = %err, "Dropped console line");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sink whose reader has gone away
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_line() {
        let mut buf = Vec::new();
        Stdout::write_line(&mut buf, "onSuccess 1").unwrap();
        assert_eq!(buf, b"onSuccess 1\n");
    }

    #[test]
    fn test_write_line_reports_broken_pipe() {
        let err = Stdout::write_line(ClosedPipe, "onSuccess 1").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
