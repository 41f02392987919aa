//! Shared line format between the device and host tools
//!
//! Each sample travels as its decimal value followed by `\r\n`, which is
//! what a serial terminal or a line-oriented plotter expects. Lines carry
//! no state: any line can be parsed on its own.

use core::fmt::{self, Write};

use heapless::String;

use crate::domain::Sample;

/// Longest encoded line: `"65535\r\n"`
pub const MAX_LINE_LEN: usize = 7;

/// Terminator appended to every line
pub const LINE_TERMINATOR: &str = "\r\n";

/// Encode a sample as one line of text.
pub fn encode_line(sample: Sample) -> String<MAX_LINE_LEN> {
    let mut line = String::new();
    let written = write!(line, "{}{}", sample.value(), LINE_TERMINATOR);
    debug_assert!(written.is_ok(), "encoded line exceeds MAX_LINE_LEN");
    line
}

/// Reasons a received line is not a sample
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Nothing but whitespace
    Empty,
    /// Contains something other than ASCII digits
    InvalidDigit,
    /// Number does not fit in 16 bits
    OutOfRange,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineError::Empty => f.write_str("empty line"),
            LineError::InvalidDigit => f.write_str("line is not a decimal number"),
            LineError::OutOfRange => f.write_str("value exceeds 65535"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LineError {}

/// Parse one line (with or without its terminator) into a sample.
pub fn parse_line(line: &str) -> Result<Sample, LineError> {
    let digits = line.trim();
    if digits.is_empty() {
        return Err(LineError::Empty);
    }

    let mut value: u32 = 0;
    for byte in digits.bytes() {
        if !byte.is_ascii_digit() {
            return Err(LineError::InvalidDigit);
        }
        value = value * 10 + u32::from(byte - b'0');
        if value > u32::from(u16::MAX) {
            return Err(LineError::OutOfRange);
        }
    }

    Ok(Sample::new(value as u16))
}
