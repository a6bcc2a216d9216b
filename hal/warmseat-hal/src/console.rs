//! Diagnostic console
//!
//! Lines are for humans only. Every write is best-effort: a line that
//! cannot be sent is dropped and the caller carries on.

use core::fmt::{self, Write};

use heapless::String;

use crate::uart::UartTx;

/// Longest formatted line; longer output is truncated
pub const MAX_LINE_LEN: usize = 64;

/// Line-oriented, write-only text output
pub trait Console {
    /// Write one line; the implementation adds the terminator
    fn write_line(&mut self, line: &str);

    /// Format and write one line
    fn write_fmt_line(&mut self, args: fmt::Arguments<'_>) {
        let mut buf: String<MAX_LINE_LEN> = String::new();
        // Overflow stops formatting; whatever fit is still sent
        let _ = buf.write_fmt(args);
        self.write_line(&buf);
    }
}

impl<T: Console + ?Sized> Console for &mut T {
    fn write_line(&mut self, line: &str) {
        (**self).write_line(line)
    }
}

/// Console over a UART with carriage-return line endings
///
/// Each line is terminated with `\r\n`, and any embedded `\n` is sent as
/// `\r\n` so serial terminals return to column zero.
pub struct UartConsole<T> {
    uart: T,
    dropped: u32,
}

impl<T: UartTx> UartConsole<T> {
    /// Create a console on `uart`
    pub fn new(uart: T) -> Self {
        Self { uart, dropped: 0 }
    }

    /// Number of lines that failed to send
    pub fn dropped_lines(&self) -> u32 {
        self.dropped
    }

    /// Release the underlying UART
    pub fn into_inner(self) -> T {
        self.uart
    }

    fn send(&mut self, line: &str) -> Result<(), T::Error> {
        let mut parts = line.split('\n');
        if let Some(first) = parts.next() {
            self.uart.write_blocking(first.as_bytes())?;
        }
        for part in parts {
            self.uart.write_blocking(b"\r\n")?;
            self.uart.write_blocking(part.as_bytes())?;
        }
        self.uart.write_blocking(b"\r\n")
    }
}

impl<T: UartTx> Console for UartConsole<T> {
    fn write_line(&mut self, line: &str) {
        if self.send(line).is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }
}
