//! Communication port - where samples are written
//!
//! On the board this is the USB serial port; in tests it is a buffer.

use crate::domain::Sample;
use crate::line_protocol::encode_line;

/// Error type for communication operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommunicationError {
    /// Not connected
    NotConnected,
    /// Connection lost
    Disconnected,
    /// Failed to send
    SendFailed,
    /// Line longer than the transport accepts
    MessageTooLarge,
}

/// Port for the line-oriented sample stream
pub trait SampleSinkPort {
    /// Wait until a host is listening
    fn wait_connection(&mut self) -> impl core::future::Future<Output = ()>;

    /// Check if a host is listening
    fn is_connected(&self) -> bool;

    /// Write one complete line, terminator included
    fn write_line(
        &mut self,
        line: &[u8],
    ) -> impl core::future::Future<Output = Result<(), CommunicationError>>;

    /// Encode and write one sample
    fn emit(
        &mut self,
        sample: Sample,
    ) -> impl core::future::Future<Output = Result<(), CommunicationError>> {
        async move {
            let line = encode_line(sample);
            self.write_line(line.as_bytes()).await
        }
    }
}
