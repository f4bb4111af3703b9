//! xdr-brightness-core: control-endpoint discovery, feature report codec, and
//! brightness unit conversion for the Apple Pro Display XDR.
//!
//! The display exposes four HID interfaces under the same vendor/product pair.
//! Only one of them accepts the brightness feature report; it is identified by
//! the first bytes of its report descriptor, never by enumeration position.

pub mod backend;
pub mod brightness;
pub mod command;
pub mod descriptor;
pub mod device;
pub mod error;
pub mod report;
pub mod transport;

/// Apple USB Vendor ID.
pub const APPLE_VID: u16 = 0x05AC;

/// Known Apple display product IDs.
pub mod pids {
    /// Pro Display XDR (all four HID interfaces share it).
    pub const PRO_DISPLAY_XDR: u16 = 0x9243;
}

/// Report ID of the brightness feature report.
pub const BRIGHTNESS_REPORT_ID: u8 = 0x01;

/// Vendor usage page declared by the brightness control interface.
pub const BRIGHTNESS_USAGE_PAGE: u16 = 0x8005;

/// Usage of the brightness control within [`BRIGHTNESS_USAGE_PAGE`].
pub const BRIGHTNESS_USAGE: u16 = 0x1009;

/// Lowest absolute brightness accepted by the display.
pub const BRIGHTNESS_MIN: u32 = 400;

/// Highest absolute brightness accepted by the display.
pub const BRIGHTNESS_MAX: u32 = 50_000;

/// Width of the absolute brightness range.
pub const BRIGHTNESS_RANGE: u32 = BRIGHTNESS_MAX - BRIGHTNESS_MIN;

const _: () = assert!(BRIGHTNESS_MIN < BRIGHTNESS_MAX);
