//! RP2040 ADC channel adapter
//!
//! This adapter implements the AnalogSensorPort trait for one external
//! ADC input (ADC0 on GPIO26 for the MyoWare wiring).

use crate::domain::Sample;
use crate::ports::sensor::{AnalogSensorPort, SensorError};
use embassy_rp::adc::{Adc, Blocking, Channel as AdcChannel};

/// RP2040 analog input adapter
///
/// Performs a blocking 12-bit conversion and widens it to a 16-bit sample.
pub struct Rp2040AdcSensor<'a> {
    /// ADC peripheral (blocking mode)
    adc: Adc<'a, Blocking>,
    /// Input channel, held exclusively for the adapter's lifetime
    channel: AdcChannel<'a>,
    /// Last raw 12-bit value (for diagnostics)
    last_raw: Option<u16>,
}

impl<'a> Rp2040AdcSensor<'a> {
    /// Create a new adapter
    ///
    /// # Arguments
    ///
    /// * `adc` - ADC peripheral in blocking mode
    /// * `channel` - Pin channel the sensor output is wired to
    pub fn new(adc: Adc<'a, Blocking>, channel: AdcChannel<'a>) -> Self {
        Self {
            adc,
            channel,
            last_raw: None,
        }
    }
}

impl AnalogSensorPort for Rp2040AdcSensor<'_> {
    async fn read(&mut self) -> Result<Sample, SensorError> {
        let raw = self
            .adc
            .blocking_read(&mut self.channel)
            .map_err(|_| SensorError::ReadFailed)?;

        self.last_raw = Some(raw);
        Ok(Sample::from_raw_12bit(raw))
    }

    fn last_raw_value(&self) -> Option<u16> {
        self.last_raw
    }
}
