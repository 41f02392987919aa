//! MyoWare muscle sensor streamer for the RP2040
//!
//! Reads one analog channel every 50 ms and writes each reading as a
//! decimal line on the USB serial port, ready for a terminal or a plotter.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                                 │
//! │  - Sample (12-bit to 16-bit widening)                            │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Ports (Traits)                               │
//! │  - AnalogSensorPort: read the channel                            │
//! │  - SampleSinkPort: write the line stream                         │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Adapters (device feature)                    │
//! │  - Rp2040AdcSensor: ADC0 / GPIO26                                │
//! │  - UsbCdcSink: USB CDC serial                                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The [`sampler::Sampler`] loop only sees the ports, so it runs on a host
//! against simulated channels as well as on the board.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

// ============================================================================
// Line protocol (shared between host and device)
// ============================================================================

pub mod line_protocol;

pub use line_protocol::{encode_line, parse_line, LineError, MAX_LINE_LEN};

// ============================================================================
// Hexagonal Architecture
// ============================================================================

/// Domain layer - pure logic
pub mod domain;

/// Ports - traits defining boundaries
pub mod ports;

/// The sampling loop
pub mod sampler;

/// Adapters - RP2040 hardware implementations
#[cfg(feature = "device")]
pub mod adapters;

pub use domain::Sample;
pub use ports::{AnalogSensorPort, CommunicationError, SampleSinkPort, SamplerConfig, SensorError};
pub use sampler::{Sampler, SamplerError};

#[cfg(feature = "device")]
pub use adapters::{Rp2040AdcSensor, UsbCdcSink};
