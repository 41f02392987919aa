//! Adapters - concrete implementations of ports
//!
//! - **rp2040_adc**: one RP2040 ADC input
//! - **usb_cdc**: USB CDC serial stream

pub mod rp2040_adc;
pub mod usb_cdc;

pub use rp2040_adc::Rp2040AdcSensor;
pub use usb_cdc::UsbCdcSink;
