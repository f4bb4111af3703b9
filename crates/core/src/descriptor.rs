//! Report descriptor fingerprinting.
//!
//! The Pro Display XDR advertises four HID interfaces under one
//! vendor/product pair. The brightness control interface is recognized by
//! the first [`DESCRIPTOR_PREFIX_LEN`] bytes of its report descriptor:
//!
//! | offset | size | field                          |
//! |--------|------|--------------------------------|
//! | 0      | 2    | usage page                     |
//! | 2      | 2    | usage                          |
//! | 4      | 2    | collection                     |
//! | 6      | 2    | report id item (tag, id)       |
//! | 8      | 3    | report usage page item         |
//! | 11     | 2    | report usage                   |
//! | 13     | 1    | logical minimum item tag       |
//! | 14     | 2    | logical minimum (signed)       |
//! | 16     | 1    | logical maximum item tag       |
//! | 17     | 4    | logical maximum (signed)       |
//! | 21     | 5    | unit                           |
//! | 26     | 2    | unit exponent                  |
//! | 28     | 2    | report size                    |
//! | 30     | 2    | report count                   |
//! | 32     | 2    | feature                        |
//!
//! Multi-byte fields are little-endian.

use crate::transport::HidEndpoint;
use crate::{
    BRIGHTNESS_MAX, BRIGHTNESS_MIN, BRIGHTNESS_REPORT_ID, BRIGHTNESS_USAGE, BRIGHTNESS_USAGE_PAGE,
};
use tracing::{debug, trace, warn};

/// Number of descriptor bytes inspected.
pub const DESCRIPTOR_PREFIX_LEN: usize = 34;

/// Parsed descriptor prefix. Only the fingerprint fields are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptorPrefix {
    pub usage_page: u16,
    pub usage: u16,
    pub report_id_item: u16,
    pub report_usage: u16,
    pub logical_minimum: i16,
    pub logical_maximum: i32,
}

impl DescriptorPrefix {
    /// Parse a prefix. Returns `None` unless exactly [`DESCRIPTOR_PREFIX_LEN`]
    /// bytes are supplied.
    pub fn parse(data: &[u8]) -> Option<Self> {
        let d: &[u8; DESCRIPTOR_PREFIX_LEN] = data.try_into().ok()?;
        let u16_at = |o: usize| u16::from_le_bytes([d[o], d[o + 1]]);
        Some(Self {
            usage_page: u16_at(0),
            usage: u16_at(2),
            report_id_item: u16_at(6),
            report_usage: u16_at(11),
            logical_minimum: i16::from_le_bytes([d[14], d[15]]),
            logical_maximum: i32::from_le_bytes([d[17], d[18], d[19], d[20]]),
        })
    }

    /// The report ID carried by the report id item (high byte; the low byte
    /// is the item tag).
    pub fn report_id(&self) -> u8 {
        (self.report_id_item >> 8) as u8
    }

    /// First fingerprint field that does not match, if any.
    pub fn mismatch(&self) -> Option<&'static str> {
        if self.usage_page != BRIGHTNESS_USAGE_PAGE {
            Some("usage_page")
        } else if self.report_usage != BRIGHTNESS_USAGE {
            Some("report_usage")
        } else if self.report_id() != BRIGHTNESS_REPORT_ID {
            Some("report_id")
        } else if i64::from(self.logical_minimum) != i64::from(BRIGHTNESS_MIN) {
            Some("logical_minimum")
        } else if i64::from(self.logical_maximum) != i64::from(BRIGHTNESS_MAX) {
            Some("logical_maximum")
        } else {
            None
        }
    }

    /// Whether this is the brightness control interface.
    pub fn matches(&self) -> bool {
        self.mismatch().is_none()
    }
}

/// Read the descriptor prefix of an open endpoint and fingerprint it.
///
/// Read failures and short reads are logged and count as "not a match".
pub fn is_brightness_control(endpoint: &dyn HidEndpoint, path: &str) -> bool {
    let mut buf = [0u8; DESCRIPTOR_PREFIX_LEN];
    let n = match endpoint.report_descriptor(&mut buf) {
        Ok(n) => n,
        Err(e) => {
            warn!(path, "failed to retrieve report descriptor: {e}");
            return false;
        }
    };
    trace!(path, descriptor_hex = format_args!("{:02X?}", &buf[..n]), "descriptor prefix");

    let Some(prefix) = DescriptorPrefix::parse(&buf[..n]) else {
        warn!(
            path,
            got = n,
            expected = DESCRIPTOR_PREFIX_LEN,
            "report descriptor too short"
        );
        return false;
    };

    match prefix.mismatch() {
        None => true,
        Some(field) => {
            debug!(path, field, "descriptor does not match brightness control");
            false
        }
    }
}
