//! Domain layer - pure logic independent of hardware
//!
//! The only entity is the `Sample`: one widened ADC reading.

pub mod sample;

pub use sample::{Sample, ADC_REFERENCE_VOLTS};
