//! Brightness feature report encoding and decoding.
//!
//! Layout (7 bytes):
//!   - byte 0: report ID ([`BRIGHTNESS_REPORT_ID`])
//!   - bytes 1..5: absolute brightness, unsigned little-endian
//!   - bytes 5..7: padding, zero on write and ignored on read

use crate::brightness::Brightness;
use crate::error::{Error, Result};
use crate::BRIGHTNESS_REPORT_ID;

/// Brightness feature report length (including report ID).
pub const REPORT_LEN: usize = 7;

/// A buffer primed for a feature report read.
pub fn request_buffer() -> [u8; REPORT_LEN] {
    let mut buf = [0u8; REPORT_LEN];
    buf[0] = BRIGHTNESS_REPORT_ID;
    buf
}

/// Encode a brightness value into a feature report.
pub fn encode(brightness: Brightness) -> [u8; REPORT_LEN] {
    let mut buf = request_buffer();
    buf[1..5].copy_from_slice(&brightness.get().to_le_bytes());
    buf
}

/// Decode a feature report read back from the device.
pub fn decode(data: &[u8]) -> Result<Brightness> {
    if data.len() < REPORT_LEN {
        return Err(Error::Protocol(format!(
            "feature report too short: {} bytes (expected {})",
            data.len(),
            REPORT_LEN
        )));
    }

    if data[0] != BRIGHTNESS_REPORT_ID {
        return Err(Error::Protocol(format!(
            "unexpected report ID: 0x{:02X}",
            data[0]
        )));
    }

    let raw = u32::from_le_bytes([data[1], data[2], data[3], data[4]]);
    Brightness::new(raw)
        .map_err(|_| Error::Protocol(format!("brightness {raw} outside device range")))
}
