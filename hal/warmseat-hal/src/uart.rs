//! UART transmit abstraction
//!
//! Only the transmit half is modelled; the diagnostic console never
//! consumes input.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been queued or an error occurs. The wait
    /// is bounded by the time the hardware needs to drain its FIFO.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Adapter from any blocking `embedded-io` writer
pub struct IoUart<W>(pub W);

impl<W: embedded_io::Write> UartTx for IoUart<W> {
    type Error = W::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.0.flush()
    }
}

/// UART configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self { baudrate: 9600 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use heapless::Vec;

    struct Sink(Vec<u8, 32>);

    impl embedded_io::ErrorType for Sink {
        type Error = Infallible;
    }

    impl embedded_io::Write for Sink {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Infallible> {
            // Accept one byte per call to exercise write_all's retry loop
            match buf.first() {
                Some(&b) => {
                    let _ = self.0.push(b);
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        fn flush(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    #[test]
    fn test_io_uart_writes_everything() {
        let mut uart = IoUart(Sink(Vec::new()));
        uart.write_blocking(b"boot").unwrap();
        uart.flush().unwrap();
        assert_eq!(uart.0 .0.as_slice(), b"boot");
    }
}
