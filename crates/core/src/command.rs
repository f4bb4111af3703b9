//! Get/set orchestration.
//!
//! Each call runs to completion on its own: locate the control endpoint,
//! exchange one feature report, and close the handle on every path.

use crate::brightness::{to_percentage, Brightness, BrightnessValue, Percentage};
use crate::device::locate;
use crate::error::{Result, ResultCode};
use crate::report::{self, REPORT_LEN};
use crate::transport::{check_api_version, HidBackend, HidEndpoint};
use serde::Serialize;
use std::fmt;
use tracing::{debug, error, info, trace};

/// A brightness read back from the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reading {
    /// Absolute device units.
    pub brightness: u32,
    /// Truncated percentage of the device range.
    pub percentage: u8,
}

impl Reading {
    pub fn new(brightness: Brightness) -> Self {
        Self {
            brightness: brightness.get(),
            percentage: to_percentage(brightness).get(),
        }
    }

    /// `25200` or `50%`.
    pub fn format(&self, as_percentage: bool) -> String {
        if as_percentage {
            format!("{}%", self.percentage)
        } else {
            self.brightness.to_string()
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}%)", self.brightness, self.percentage)
    }
}

/// Read the current brightness through an open endpoint.
pub fn read_brightness(endpoint: &dyn HidEndpoint) -> Result<Brightness> {
    let mut buf = report::request_buffer();
    let n = endpoint.get_feature_report(&mut buf)?.min(REPORT_LEN);
    trace!(
        report_hex = format_args!("{:02X?}", &buf[..n]),
        "feature report RX"
    );
    report::decode(&buf[..n])
}

/// Write a brightness value through an open endpoint.
pub fn write_brightness(endpoint: &dyn HidEndpoint, brightness: Brightness) -> Result<()> {
    let buf = report::encode(brightness);
    trace!(report_hex = format_args!("{:02X?}", buf), "feature report TX");
    endpoint.send_feature_report(&buf)
}

/// Locate the display and read its brightness.
pub fn get(backend: &dyn HidBackend) -> Result<Reading> {
    let endpoint = locate(backend)?;
    let result = read_brightness(endpoint.as_ref());
    drop(endpoint);

    let reading = Reading::new(result?);
    debug!(%reading, "Brightness read");
    Ok(reading)
}

/// Validate `value`, locate the display, and apply it.
///
/// Out-of-range values are rejected before any device is opened. Returns the
/// absolute value written.
pub fn set(backend: &dyn HidBackend, value: BrightnessValue) -> Result<Brightness> {
    let brightness = value.resolve()?;

    let endpoint = locate(backend)?;
    let result = write_brightness(endpoint.as_ref(), brightness);
    drop(endpoint);

    result?;
    info!(
        requested = %value,
        brightness = brightness.get(),
        "Brightness set"
    );
    Ok(brightness)
}

/// Set a percentage directly, skipping token parsing.
pub fn set_percentage(backend: &dyn HidBackend, percentage: Percentage) -> Result<Brightness> {
    set(backend, BrightnessValue::Percentage(u32::from(percentage.get())))
}

/// A request from the command-line layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Get { as_percentage: bool },
    Set { value: BrightnessValue },
}

/// Run one command after the HID API version gate.
///
/// Returns the result code and, for `get`, the formatted value.
pub fn execute(backend: &dyn HidBackend, command: Command) -> (ResultCode, Option<String>) {
    match try_execute(backend, command) {
        Ok(output) => (ResultCode::Success, output),
        Err(e) => {
            error!("{e}");
            (ResultCode::from(&e), None)
        }
    }
}

fn try_execute(backend: &dyn HidBackend, command: Command) -> Result<Option<String>> {
    check_api_version(backend.api_versions())?;
    match command {
        Command::Get { as_percentage } => Ok(Some(get(backend)?.format(as_percentage))),
        Command::Set { value } => set(backend, value).map(|_| None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::transport::mock::{report_bytes, MockBackend, MockEndpoint};

    #[test]
    fn reading_formats() {
        let r = Reading::new(Brightness::new(25_200).unwrap());
        assert_eq!(r.format(false), "25200");
        assert_eq!(r.format(true), "50%");
        assert_eq!(r.to_string(), "25200 (50%)");
    }

    #[test]
    fn reading_serializes_both_units() {
        let r = Reading::new(Brightness::MAX);
        let json = serde_json::to_value(r).unwrap();
        assert_eq!(json, serde_json::json!({"brightness": 50000, "percentage": 100}));
    }

    #[test]
    fn get_closes_handle_after_read() {
        let backend = MockBackend::xdr(2, 12_800);
        let reading = get(&backend).unwrap();
        assert_eq!(reading.brightness, 12_800);
        assert_eq!(reading.percentage, 25);
        assert_eq!(backend.ledger().open_handles(), 0);
    }

    #[test]
    fn get_short_read_is_protocol_error() {
        let backend = MockBackend::new().with_xdr_endpoint(
            MockEndpoint::control(400).with_feature_report(Ok(report_bytes(400)[..5].to_vec())),
        );
        assert!(matches!(get(&backend), Err(Error::Protocol(_))));
        assert_eq!(backend.ledger().open_handles(), 0);
    }

    #[test]
    fn get_read_failure_closes_handle() {
        let backend = MockBackend::new().with_xdr_endpoint(
            MockEndpoint::control(400).with_feature_report(Err("pipe error".into())),
        );
        assert!(matches!(get(&backend), Err(Error::Hid(_))));
        assert_eq!(backend.ledger().open_handles(), 0);
    }

    #[test]
    fn set_absolute_writes_report() {
        let backend = MockBackend::xdr(0, 400);
        let written = set(&backend, BrightnessValue::Absolute(50_000)).unwrap();
        assert_eq!(written, Brightness::MAX);
        let ledger = backend.ledger();
        assert_eq!(ledger.sent, vec![report_bytes(50_000)]);
        assert_eq!(ledger.open_handles(), 0);
    }

    #[test]
    fn set_percentage_converts_before_write() {
        let backend = MockBackend::xdr(3, 400);
        set_percentage(&backend, Percentage::new(50).unwrap()).unwrap();
        assert_eq!(backend.ledger().sent, vec![report_bytes(25_200)]);
    }

    #[test]
    fn set_rejects_out_of_range_before_io() {
        for value in [
            BrightnessValue::Percentage(101),
            BrightnessValue::Absolute(399),
            BrightnessValue::Absolute(50_001),
        ] {
            let backend = MockBackend::xdr(0, 400);
            let err = set(&backend, value).unwrap_err();
            assert_eq!(ResultCode::from(&err), ResultCode::InvalidInput);
            let ledger = backend.ledger();
            assert_eq!(ledger.enumerations, 0);
            assert!(ledger.opened.is_empty());
        }
    }

    #[test]
    fn set_write_failure_closes_handle() {
        let backend = MockBackend::new()
            .with_xdr_endpoint(MockEndpoint::control(400).failing_send("stall"));
        assert!(matches!(
            set(&backend, BrightnessValue::Absolute(1000)),
            Err(Error::Hid(_))
        ));
        assert_eq!(backend.ledger().open_handles(), 0);
    }
}
