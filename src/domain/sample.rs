//! Sample domain entity
//!
//! One reading from the muscle sensor's analog channel. It carries no
//! timestamp and no identity: the stream is consumed live and nothing is
//! kept between iterations.

/// Full-scale reference voltage of the ADC input
pub const ADC_REFERENCE_VOLTS: f32 = 3.3;

/// Mask for the RP2040's 12-bit conversion result
const RAW_12BIT_MASK: u16 = 0x0FFF;

/// A 16-bit reading proportional to the input voltage.
///
/// `0` is 0.0 V and `65535` is the 3.3 V reference. The range is the width
/// of the type, so every value is valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample(u16);

impl Sample {
    /// Lowest possible reading (0.0 V)
    pub const MIN: Sample = Sample(0);

    /// Highest possible reading (full scale)
    pub const MAX: Sample = Sample(u16::MAX);

    /// Midpoint of the range, roughly 1.65 V
    pub const MIDPOINT: Sample = Sample(32768);

    /// Wrap an already 16-bit value
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Widen a raw 12-bit conversion to the 16-bit range.
    ///
    /// Replicates the top bits into the bottom nibble so that 0 maps to 0
    /// and 4095 maps to 65535. Bits above bit 11 are ignored.
    pub const fn from_raw_12bit(raw: u16) -> Self {
        let raw = raw & RAW_12BIT_MASK;
        Self((raw << 4) | (raw >> 8))
    }

    /// Get the raw 16-bit value
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Nominal input voltage for this reading
    pub fn volts(&self) -> f32 {
        self.0 as f32 * ADC_REFERENCE_VOLTS / u16::MAX as f32
    }
}

impl From<u16> for Sample {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<Sample> for u16 {
    fn from(sample: Sample) -> Self {
        sample.0
    }
}
