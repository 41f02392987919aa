//! Sensor port - abstraction for reading the analog channel
//!
//! The sampler reads through this trait so it can run against the RP2040
//! ADC on the board or a simulated channel on a host.

use crate::domain::Sample;

/// Error type for sensor operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Conversion did not complete
    ReadFailed,
    /// Channel not initialized
    NotInitialized,
    /// Hardware error
    HardwareError,
}

/// Configuration for the sampling loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SamplerConfig {
    /// Pause after each emitted sample (milliseconds)
    pub interval_ms: u32,
}

impl SamplerConfig {
    /// 50 ms between samples, about 20 Hz
    pub const DEFAULT: Self = Self { interval_ms: 50 };

    /// Create config with a custom interval
    pub const fn with_interval_ms(interval_ms: u32) -> Self {
        Self { interval_ms }
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Port for reading one analog channel
///
/// # Example Implementation
///
/// ```ignore
/// struct Rp2040AdcSensor<'a> {
///     adc: Adc<'a, Blocking>,
///     channel: AdcChannel<'a>,
/// }
///
/// impl AnalogSensorPort for Rp2040AdcSensor<'_> {
///     async fn read(&mut self) -> Result<Sample, SensorError> {
///         let raw = self.adc.blocking_read(&mut self.channel)?;
///         Ok(Sample::from_raw_12bit(raw))
///     }
/// }
/// ```
pub trait AnalogSensorPort {
    /// Take one reading from the channel
    fn read(&mut self) -> impl core::future::Future<Output = Result<Sample, SensorError>>;

    /// Get the last raw converter value (for diagnostics)
    ///
    /// Returns `None` if the sensor doesn't expose raw values.
    fn last_raw_value(&self) -> Option<u16> {
        None
    }
}
