//! USB CDC sample stream adapter
//!
//! This adapter implements the SampleSinkPort trait for USB CDC ACM
//! (serial over USB), the same place MicroPython's `print` ends up.

use crate::line_protocol::MAX_LINE_LEN;
use crate::ports::communication::{CommunicationError, SampleSinkPort};
use embassy_usb::class::cdc_acm::CdcAcmClass;
use embassy_usb::driver::EndpointError;

/// USB packet size (CDC ACM max)
pub const USB_PACKET_SIZE: usize = 64;

// A whole line always goes out as a single packet.
const _: () = assert!(MAX_LINE_LEN < USB_PACKET_SIZE);

/// USB CDC sample stream adapter
pub struct UsbCdcSink<'a, D: embassy_usb::driver::Driver<'a>> {
    /// USB CDC ACM class instance
    class: CdcAcmClass<'a, D>,
}

impl<'a, D: embassy_usb::driver::Driver<'a>> UsbCdcSink<'a, D> {
    /// Create a new USB CDC sink
    pub fn new(class: CdcAcmClass<'a, D>) -> Self {
        Self { class }
    }
}

impl<'a, D: embassy_usb::driver::Driver<'a>> SampleSinkPort for UsbCdcSink<'a, D> {
    async fn wait_connection(&mut self) {
        self.class.wait_connection().await;
    }

    fn is_connected(&self) -> bool {
        self.class.dtr()
    }

    async fn write_line(&mut self, line: &[u8]) -> Result<(), CommunicationError> {
        if line.len() >= USB_PACKET_SIZE {
            return Err(CommunicationError::MessageTooLarge);
        }

        self.class.write_packet(line).await.map_err(|e| match e {
            EndpointError::Disabled => CommunicationError::Disconnected,
            EndpointError::BufferOverflow => CommunicationError::SendFailed,
        })
    }
}
