//! Ports (interfaces) defining the boundaries of the application
//!
//! - **AnalogSensorPort**: how a sample is read (RP2040 ADC, simulated)
//! - **SampleSinkPort**: where the sample stream goes (USB CDC, buffer)

pub mod communication;
pub mod sensor;

pub use communication::{CommunicationError, SampleSinkPort};
pub use sensor::{AnalogSensorPort, SamplerConfig, SensorError};
